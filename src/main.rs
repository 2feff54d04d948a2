// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! A CGI program that reports back what it received. It reads the request
//! from the process environment and stdin, and writes the response to
//! stdout. Logs go to stderr, filtered by `SERVENTE_LOG`.

use std::{
    fmt::Write as _,
    io::{self, Cursor, Read},
};

use anyhow::Context;
use servente_message::{
    Environment,
    Error,
    FramedOutput,
    Message,
    MessageSettings,
    Parameters,
    Request,
    Response,
    StatusCode,
    Value,
};
use tracing_subscriber::EnvFilter;

const LOG_FILTER_VARIABLE: &str = "SERVENTE_LOG";
const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

fn main() -> anyhow::Result<()> {
    init_logging();

    let environment: Environment = std::env::vars_os()
        .map(|(name, value)| (name.to_string_lossy().into_owned(), value.to_string_lossy().into_owned()))
        .collect();
    let settings = MessageSettings::from_env_snapshot(&environment);

    let query = environment.get("QUERY_STRING")
        .map(Parameters::parse_urlencoded)
        .unwrap_or_default();

    let (post, body) = read_form(&environment)?;

    let mut response = match Request::with_settings(environment, query, post, body, settings) {
        Ok(mut request) => respond(&mut request)?,
        Err(Error::MissingMethod) => {
            tracing::error!("invoked without REQUEST_METHOD, not running under a gateway?");
            Response::with_status_and_string_body(StatusCode::InternalServerError, "Internal Server Error")
        }
        Err(e) => return Err(e).context("failed to materialize the request"),
    };

    let stdout = io::stdout();
    let mut output = FramedOutput::cgi(stdout.lock());
    response.send(&mut output).context("failed to write the response")?;
    Ok(())
}

fn init_logging() {
    let default_directive = if cfg!(feature = "debugging") { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_FILTER_VARIABLE)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Form submissions are decoded up front, like a gateway runtime does. The
/// raw body stays available to the request through the buffer.
fn read_form(environment: &Environment) -> anyhow::Result<(Parameters, Box<dyn Read>)> {
    let is_form = environment.get("CONTENT_TYPE")
        .and_then(|content_type| content_type.split(';').next())
        .is_some_and(|media_type| unicase::eq_ascii(media_type.trim(), FORM_MEDIA_TYPE));

    if !is_form {
        let body: Box<dyn Read> = Box::new(io::stdin());
        return Ok((Parameters::new(), body));
    }

    let content_length = environment.get("CONTENT_LENGTH")
        .and_then(|length| length.trim().parse().ok())
        .unwrap_or(0);

    let mut buffer = Vec::new();
    io::stdin().lock()
        .take(content_length)
        .read_to_end(&mut buffer)
        .context("failed to read the form body")?;

    let post = Parameters::parse_urlencoded(&String::from_utf8_lossy(&buffer));
    let body: Box<dyn Read> = Box::new(Cursor::new(buffer));
    Ok((post, body))
}

fn respond(request: &mut Request) -> anyhow::Result<Response> {
    let mut text = String::new();
    writeln!(text, "method: {}", request.method().as_string())?;

    for (name, value) in request.headers().iter() {
        writeln!(text, "header: {name}: {value}")?;
    }

    for (name, value) in request.query().iter() {
        writeln!(text, "query: {name} = {}", describe_value(value))?;
    }

    for (name, value) in request.post().iter() {
        writeln!(text, "form: {name} = {}", describe_value(value))?;
    }

    match request.content() {
        Ok(content) => writeln!(text, "body: {} bytes", content.map_or(0, |body| body.len()))?,
        Err(Error::BodyTooLarge { limit }) => {
            tracing::warn!(limit, "request body too large");
            return Ok(Response::with_status_and_string_body(StatusCode::RequestEntityTooLarge, "Request Entity Too Large"));
        }
        Err(e) => return Err(e).context("failed to read the request body"),
    }

    let mut response = Response::new();
    response.set_header("Content-Type", "text/plain; charset=utf-8");
    response.set_header("Content-Length", text.len().to_string());
    response.set_length(text.len());
    response.set_content(text);
    Ok(response)
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::List(items) => items.iter()
            .map(describe_value)
            .collect::<Vec<_>>()
            .join(", "),
        _ => value.to_text().unwrap_or_default(),
    }
}
