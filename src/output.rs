// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::io::{self, Write};

/// The channel a response is written to.
///
/// The boundary owns the framing of what it is given. It also remembers
/// whether the header section has been started, which is the guard against
/// emitting a second response for the same invocation.
pub trait OutputBoundary {
    /// Whether or not a status line or header has already been written.
    fn headers_sent(&self) -> bool;

    /// Writes the status line, without line terminator, e.g.
    /// `HTTP/1.1 200 OK`.
    fn write_status_line(&mut self, status_line: &str) -> io::Result<()>;

    /// Writes a single `Name: Value` line, without line terminator.
    fn write_header_line(&mut self, header_line: &str) -> io::Result<()>;

    /// Writes (a part of) the body. The header section is terminated before
    /// the first body write.
    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

impl<T> OutputBoundary for &mut T
        where T: OutputBoundary + ?Sized {
    fn headers_sent(&self) -> bool {
        (**self).headers_sent()
    }

    fn write_status_line(&mut self, status_line: &str) -> io::Result<()> {
        (**self).write_status_line(status_line)
    }

    fn write_header_line(&mut self, header_line: &str) -> io::Result<()> {
        (**self).write_header_line(header_line)
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        (**self).write_body(body)
    }
}

/// How the header section is put on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Framing {
    /// Lines are written as-is, as a server would send them to the client.
    Http1,

    /// The output of a CGI script, which conveys the status as a `Status`
    /// header field instead of a status line.
    ///
    /// # References
    /// * [RFC 3875 Section 6.3.3](https://www.rfc-editor.org/rfc/rfc3875#section-6.3.3)
    Cgi,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum OutputState {
    Idle,
    Headers,
    Body,
}

/// An [`OutputBoundary`] over a byte sink, e.g. `stdout` or a `Vec<u8>`.
#[derive(Debug)]
pub struct FramedOutput<W> {
    writer: W,
    framing: Framing,
    state: OutputState,
}

impl<W> FramedOutput<W>
        where W: Write {
    pub fn new(writer: W, framing: Framing) -> Self {
        Self {
            writer,
            framing,
            state: OutputState::Idle,
        }
    }

    pub fn http1(writer: W) -> Self {
        Self::new(writer, Framing::Http1)
    }

    pub fn cgi(writer: W) -> Self {
        Self::new(writer, Framing::Cgi)
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// CGI scripts end their header lines with a bare newline, which the
    /// server translates for the client.
    fn line_terminator(&self) -> &'static [u8] {
        match self.framing {
            Framing::Http1 => b"\r\n",
            Framing::Cgi => b"\n",
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        // Once a byte may have reached the writer, the output counts as
        // started, even if the write fails halfway.
        if self.state == OutputState::Idle {
            self.state = OutputState::Headers;
        }

        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(self.line_terminator())
    }
}

impl<W> OutputBoundary for FramedOutput<W>
        where W: Write {
    fn headers_sent(&self) -> bool {
        self.state != OutputState::Idle
    }

    fn write_status_line(&mut self, status_line: &str) -> io::Result<()> {
        match self.framing {
            Framing::Http1 => self.write_line(status_line),
            Framing::Cgi => {
                // Drop the protocol version: "HTTP/1.1 404 Not Found" becomes
                // "Status: 404 Not Found".
                let status = status_line.split_once(' ')
                    .map_or(status_line, |(_, status)| status);
                self.write_line(&format!("Status: {status}"))
            }
        }
    }

    fn write_header_line(&mut self, header_line: &str) -> io::Result<()> {
        self.write_line(header_line)
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        if self.state != OutputState::Body {
            self.state = OutputState::Body;
            self.writer.write_all(self.line_terminator())?;
        }

        self.writer.write_all(body)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http1_framing() {
        let mut output = FramedOutput::http1(Vec::new());
        assert!(!output.headers_sent());

        output.write_status_line("HTTP/1.1 200 OK").unwrap();
        assert!(output.headers_sent());
        output.write_header_line("Content-Type: text/plain").unwrap();
        output.write_body(b"Hello").unwrap();
        output.write_body(b", world").unwrap();

        assert_eq!(output.into_inner(), b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nHello, world");
    }

    #[test]
    fn cgi_framing() {
        let mut output = FramedOutput::cgi(Vec::new());
        output.write_status_line("HTTP/1.1 404 Not Found").unwrap();
        output.write_header_line("Content-Type: text/plain").unwrap();
        output.write_body(b"").unwrap();

        assert_eq!(output.get_ref().as_slice(), b"Status: 404 Not Found\nContent-Type: text/plain\n\n");
    }

    /// Accepts a fixed number of writes, then fails every following one.
    struct FailingWriter {
        written: Vec<u8>,
        writes_left: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes_left == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.writes_left -= 1;
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_line_still_marks_headers_sent() {
        let mut output = FramedOutput::http1(FailingWriter { written: Vec::new(), writes_left: 1 });
        assert!(output.write_status_line("HTTP/1.1 200 OK").is_err());
        assert!(output.headers_sent());
        assert_eq!(output.get_ref().written, b"HTTP/1.1 200 OK");
    }
}
