// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{
    fmt,
    io::Read,
};

use crate::{
    canonicalize_transport_name,
    BodyKind,
    Environment,
    Error,
    HeaderMap,
    Message,
    MessageParts,
    MessageSettings,
    Method,
    Parameters,
    Value,
};

/// The meta-variable holding the method of the request.
pub const REQUEST_METHOD_VARIABLE: &str = "REQUEST_METHOD";

/// An inbound request, materialized from what the gateway handed over.
///
/// The header fields are derived once, at construction, from the `HTTP_*`
/// meta-variables. The body is only read when [`Message::content`] is first
/// called.
pub struct Request {
    parts: MessageParts,
    method: Method,
    query: Parameters,
    post: Parameters,
    server: Environment,
    settings: MessageSettings,

    /// Taken on the first call to `content()`, so the body is read at most
    /// once.
    body_source: Option<Box<dyn Read>>,
}

impl Request {
    pub fn new<R>(server: Environment, query: Parameters, post: Parameters, body: R) -> Result<Self, Error>
            where R: Read + 'static {
        Self::with_settings(server, query, post, body, MessageSettings::default())
    }

    pub fn with_settings<R>(server: Environment, query: Parameters, post: Parameters, body: R,
                            settings: MessageSettings) -> Result<Self, Error>
            where R: Read + 'static {
        let mut headers = HeaderMap::new();
        for (name, value) in server.iter() {
            match canonicalize_transport_name(name) {
                Some(header_name) => headers.set(header_name, value),
                None => tracing::trace!(variable = name, "not a header carrier"),
            }
        }

        let method = server.get(REQUEST_METHOD_VARIABLE)
            .map(Method::from)
            .ok_or(Error::MissingMethod)?;

        tracing::debug!(method = method.as_string(), headers = headers.len(), "request materialized");

        Ok(Self {
            parts: MessageParts {
                headers,
                content: None,
                length: 0,
            },
            method,
            query,
            post,
            server,
            settings,
            body_source: Some(Box::new(body)),
        })
    }

    /// Constructs the request from dynamically typed snapshots. Each must be
    /// a map or a list of `[name, value]` pairs.
    pub fn from_values<R>(server: Value, query: Value, post: Value, body: R) -> Result<Self, Error>
            where R: Read + 'static {
        Self::new(
            Environment::try_from_value(server)?,
            Parameters::try_from_value(query)?,
            Parameters::try_from_value(post)?,
            body,
        )
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn is_get(&self) -> bool {
        self.method == Method::Get
    }

    #[must_use]
    pub fn is_post(&self) -> bool {
        self.method == Method::Post
    }

    /// The form fields that were submitted with the request.
    #[must_use]
    pub fn post(&self) -> &Parameters {
        &self.post
    }

    #[must_use]
    pub fn post_value(&self, name: &str) -> Option<&Value> {
        self.post.get(name)
    }

    /// The parameters of the query string.
    #[must_use]
    pub fn query(&self) -> &Parameters {
        &self.query
    }

    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&Value> {
        self.query.get(name)
    }

    /// All meta-variables, exactly as the gateway passed them.
    #[must_use]
    pub fn server(&self) -> &Environment {
        &self.server
    }

    #[must_use]
    pub fn server_variable(&self, name: &str) -> Option<&str> {
        self.server.get(name)
    }
}

impl Message for Request {
    fn parts(&self) -> &MessageParts {
        &self.parts
    }

    fn parts_mut(&mut self) -> &mut MessageParts {
        &mut self.parts
    }

    /// Looks up the header by its exact name first, and falls back to a
    /// case-insensitive comparison.
    fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name)
            .or_else(|| self.parts.headers.get_ignore_case(name))
    }

    /// Returns the body, reading it from the gateway on the first call. If
    /// that read fails, the error is returned and the body stays absent.
    fn content(&mut self) -> Result<Option<&BodyKind>, Error> {
        if self.parts.content.is_none() {
            if let Some(source) = self.body_source.take() {
                let body = read_body(source, self.settings.max_body_size)?;
                tracing::debug!(length = body.len(), "request body read");
                self.parts.content = Some(BodyKind::Bytes(body));
            }
        }

        Ok(self.parts.content.as_ref())
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("parts", &self.parts)
            .field("method", &self.method)
            .field("query", &self.query)
            .field("post", &self.post)
            .field("server", &self.server)
            .field("settings", &self.settings)
            .field("body_pending", &self.body_source.is_some())
            .finish()
    }
}

fn read_body(source: Box<dyn Read>, limit: Option<u64>) -> Result<Vec<u8>, Error> {
    let mut body = Vec::new();
    match limit {
        Some(limit) => {
            source.take(limit.saturating_add(1)).read_to_end(&mut body)?;
            if body.len() as u64 > limit {
                return Err(Error::BodyTooLarge { limit });
            }
        }
        None => {
            let mut source = source;
            source.read_to_end(&mut body)?;
        }
    }
    Ok(body)
}
