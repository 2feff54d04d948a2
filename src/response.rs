// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{
    standard_reason_phrase,
    BodyKind,
    Error,
    InvalidArgumentError,
    Message,
    MessageParts,
    OutputBoundary,
    StatusCode,
    StatusCodeClass,
    Value,
};

/// The phrase used for status codes without a standard reason phrase.
pub const UNKNOWN_REASON_PHRASE: &str = "Unknown";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SendState {
    NotSent,
    Sent,
}

/// What a call to [`Response::send`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Emitted,

    /// Nothing was written, because this response or another one was
    /// already written to the boundary.
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    parts: MessageParts,
    status_code: u16,
    reason_phrase: Option<String>,
    state: SendState,
}

impl Default for Response {
    fn default() -> Self {
        Self::with_status(StatusCode::Ok)
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(status: StatusCode) -> Self {
        Self {
            parts: MessageParts::default(),
            status_code: status.as_u16(),
            reason_phrase: None,
            state: SendState::NotSent,
        }
    }

    pub fn with_status_and_string_body(status: StatusCode, body: impl Into<BodyKind>) -> Self {
        let mut response = Self::with_status(status);
        response.set_header("Content-Type", "text/plain; charset=utf-8");
        response.set_content(body);
        response
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::with_status_and_string_body(StatusCode::NotFound, message)
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Sets the status code. Codes without a standard reason phrase are
    /// allowed.
    pub fn set_status_code(&mut self, status_code: u16) -> &mut Self {
        self.status_code = status_code;
        self
    }

    /// Sets the status code from a dynamically typed value, which must be an
    /// integer that fits in 16 bits.
    pub fn set_status_code_from_value(&mut self, status_code: &Value) -> Result<&mut Self, Error> {
        let Some(status_code) = status_code.as_integer() else {
            return Err(InvalidArgumentError::StatusCodeNotInteger.into());
        };

        let status_code = u16::try_from(status_code)
            .map_err(|_| InvalidArgumentError::StatusCodeOutOfRange)?;
        Ok(self.set_status_code(status_code))
    }

    /// The explicitly set reason phrase, otherwise the standard one of the
    /// status code, otherwise `"Unknown"`.
    #[must_use]
    pub fn reason_phrase(&self) -> &str {
        match &self.reason_phrase {
            Some(reason_phrase) => reason_phrase.as_str(),
            None => standard_reason_phrase(self.status_code).unwrap_or(UNKNOWN_REASON_PHRASE),
        }
    }

    pub fn set_reason_phrase(&mut self, reason_phrase: impl Into<String>) -> &mut Self {
        self.reason_phrase = Some(reason_phrase.into());
        self
    }

    #[must_use]
    pub fn class(&self) -> Option<StatusCodeClass> {
        StatusCodeClass::of(self.status_code)
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status_code == StatusCode::Ok.as_u16()
    }

    #[must_use]
    pub fn is_informational(&self) -> bool {
        self.class() == Some(StatusCodeClass::Informational)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.class() == Some(StatusCodeClass::Success)
    }

    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.class() == Some(StatusCodeClass::Redirection)
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.class() == Some(StatusCodeClass::ClientError)
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.class() == Some(StatusCodeClass::ServerError)
    }

    /// Whether or not anything was already written to the boundary, by this
    /// response or by any other.
    #[must_use]
    pub fn is_content_sent<O>(&self, output: &O) -> bool
            where O: OutputBoundary + ?Sized {
        output.headers_sent()
    }

    #[must_use]
    pub fn send_state(&self) -> SendState {
        self.state
    }

    /// Writes the status line, the headers in order and the content to the
    /// boundary. This happens at most once: when this response was already
    /// sent, or the boundary already has output, nothing is written.
    pub fn send<O>(&mut self, output: &mut O) -> Result<SendOutcome, Error>
            where O: OutputBoundary + ?Sized {
        if self.state == SendState::Sent || output.headers_sent() {
            tracing::debug!(status = self.status_code, "output already sent, skipping response");
            return Ok(SendOutcome::Skipped);
        }

        output.write_status_line(&format!("HTTP/1.1 {} {}", self.status_code, self.reason_phrase()))?;

        for (name, value) in self.parts.headers.iter() {
            output.write_header_line(&format!("{name}: {value}"))?;
        }

        let body = self.parts.content.as_ref().map(BodyKind::as_bytes).unwrap_or_default();
        output.write_body(body)?;

        self.state = SendState::Sent;
        tracing::debug!(status = self.status_code, headers = self.parts.headers.len(), body = body.len(), "response emitted");
        Ok(SendOutcome::Emitted)
    }
}

impl Message for Response {
    fn parts(&self) -> &MessageParts {
        &self.parts
    }

    fn parts_mut(&mut self) -> &mut MessageParts {
        &mut self.parts
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rstest::rstest;

    use super::*;
    use crate::FramedOutput;

    /// Records every call, so the number of writes can be checked.
    #[derive(Default)]
    struct RecordingOutput {
        status_lines: Vec<String>,
        header_lines: Vec<String>,
        bodies: Vec<Vec<u8>>,
    }

    impl OutputBoundary for RecordingOutput {
        fn headers_sent(&self) -> bool {
            !self.status_lines.is_empty() || !self.header_lines.is_empty()
        }

        fn write_status_line(&mut self, status_line: &str) -> io::Result<()> {
            self.status_lines.push(status_line.to_string());
            Ok(())
        }

        fn write_header_line(&mut self, header_line: &str) -> io::Result<()> {
            self.header_lines.push(header_line.to_string());
            Ok(())
        }

        fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
            self.bodies.push(body.to_vec());
            Ok(())
        }
    }

    #[rstest]
    #[case(100, [false, false, false, false, false])]
    #[case(200, [true, true, false, false, false])]
    #[case(204, [false, true, false, false, false])]
    #[case(302, [false, false, true, false, false])]
    #[case(404, [false, false, false, true, false])]
    #[case(503, [false, false, false, false, true])]
    #[case(999, [false, false, false, false, false])]
    fn classification(#[case] code: u16, #[case] expected: [bool; 5]) {
        let mut response = Response::new();
        response.set_status_code(code);
        assert_eq!([
            response.is_ok(),
            response.is_success(),
            response.is_redirect(),
            response.is_client_error(),
            response.is_server_error(),
        ], expected);
    }

    #[rstest]
    #[case(404, None, "Not Found")]
    #[case(200, None, "OK")]
    #[case(999, None, "Unknown")]
    #[case(404, Some("Nothing Here"), "Nothing Here")]
    #[case(999, Some("Custom"), "Custom")]
    fn reason_phrase(#[case] code: u16, #[case] explicit: Option<&str>, #[case] expected: &str) {
        let mut response = Response::new();
        response.set_status_code(code);
        if let Some(phrase) = explicit {
            response.set_reason_phrase(phrase);
        }
        assert_eq!(response.reason_phrase(), expected);
    }

    #[test]
    fn defaults() {
        let response = Response::new();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.reason_phrase(), "OK");
        assert_eq!(response.send_state(), SendState::NotSent);
        assert!(response.headers().is_empty());
        assert_eq!(response.length(), 0);
    }

    #[rstest]
    #[case(Value::Integer(404), Some(404))]
    #[case(Value::Integer(999), Some(999))]
    #[case(Value::from("404"), None)]
    #[case(Value::Float(404.0), None)]
    #[case(Value::Bool(true), None)]
    #[case(Value::Null, None)]
    fn status_code_from_value(#[case] value: Value, #[case] expected: Option<u16>) {
        let mut response = Response::new();
        match response.set_status_code_from_value(&value) {
            Ok(response) => assert_eq!(Some(response.status_code()), expected),
            Err(error) => {
                assert!(expected.is_none());
                assert!(matches!(error, Error::InvalidArgument(InvalidArgumentError::StatusCodeNotInteger)));
            }
        }
    }

    #[rstest]
    #[case(-1)]
    #[case(70_000)]
    fn status_code_out_of_range(#[case] code: i64) {
        let mut response = Response::new();
        let error = response.set_status_code_from_value(&Value::Integer(code)).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument(InvalidArgumentError::StatusCodeOutOfRange)));
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn send_emits_exactly_once() {
        let mut response = Response::new();
        response.set_status_code(201);
        response.set_header("Location", "/items/1");
        response.set_header("X-Trace-Id", "abc123");
        response.set_content("created");

        let mut output = RecordingOutput::default();
        assert!(!response.is_content_sent(&output));

        assert_eq!(response.send(&mut output).unwrap(), SendOutcome::Emitted);
        assert_eq!(response.send(&mut output).unwrap(), SendOutcome::Skipped);

        assert!(response.is_content_sent(&output));
        assert_eq!(response.send_state(), SendState::Sent);
        assert_eq!(output.status_lines, vec!["HTTP/1.1 201 Created"]);
        assert_eq!(output.header_lines, vec!["Location: /items/1", "X-Trace-Id: abc123"]);
        assert_eq!(output.bodies, vec![b"created".to_vec()]);
    }

    #[test]
    fn send_is_skipped_when_boundary_already_has_output() {
        let mut output = RecordingOutput::default();
        let mut first = Response::new();
        first.send(&mut output).unwrap();

        let mut second = Response::not_found("Not Found");
        assert!(second.is_content_sent(&output));
        assert_eq!(second.send(&mut output).unwrap(), SendOutcome::Skipped);
        assert_eq!(second.send_state(), SendState::NotSent);
        assert_eq!(output.status_lines.len(), 1);
    }

    #[test]
    fn send_to_http1_output() {
        let mut response = Response::with_status_and_string_body(StatusCode::NotFound, "Not Found");
        let mut output = FramedOutput::http1(Vec::new());
        response.send(&mut output).unwrap();

        assert_eq!(
            String::from_utf8(output.into_inner()).unwrap(),
            "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain; charset=utf-8\r\n\r\nNot Found"
        );
    }

    /// Takes the first write, then reports a closed pipe.
    struct ClosingWriter {
        written: Vec<u8>,
        accepted: bool,
    }

    impl io::Write for ClosingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accepted {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"));
            }
            self.accepted = true;
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_send_is_not_repeated() {
        let mut output = FramedOutput::http1(ClosingWriter { written: Vec::new(), accepted: false });
        let mut response = Response::new();

        assert!(matches!(response.send(&mut output), Err(Error::Io(_))));
        assert!(response.is_content_sent(&output));
        assert_eq!(response.send(&mut output).unwrap(), SendOutcome::Skipped);
        assert_eq!(output.get_ref().written, b"HTTP/1.1 200 OK");
    }

    #[test]
    fn send_to_cgi_output() {
        let mut response = Response::with_status_and_string_body(StatusCode::Ok, "x");
        response.set_header("Content-Type", "text/plain");
        let mut output = FramedOutput::cgi(Vec::new());
        response.send(&mut output).unwrap();
        assert_eq!(output.into_inner(), b"Status: 200 OK\nContent-Type: text/plain\n\nx");
    }

    #[test]
    fn send_without_content_terminates_headers() {
        let mut response = Response::with_status(StatusCode::NoContent);
        let mut output = FramedOutput::http1(Vec::new());
        response.send(&mut output).unwrap();
        assert_eq!(output.into_inner(), b"HTTP/1.1 204 No Content\r\n\r\n");
    }

    #[test]
    fn headers_are_case_sensitive_on_responses() {
        let mut response = Response::new();
        response.set_header("X-Trace-Id", "abc123");
        assert_eq!(response.header("X-Trace-Id"), Some("abc123"));
        assert_eq!(response.header("x-trace-id"), None);
    }
}
