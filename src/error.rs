// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{fmt, io};

use strum_macros::AsRefStr;

#[derive(Debug)]
pub enum Error {
    InvalidArgument(InvalidArgumentError),

    /// The environment snapshot didn't contain a `REQUEST_METHOD` variable.
    MissingMethod,

    /// The request body was larger than the configured maximum.
    BodyTooLarge {
        limit: u64,
    },

    Io(io::Error),
}

impl From<InvalidArgumentError> for Error {
    fn from(error: InvalidArgumentError) -> Self {
        Error::InvalidArgument(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(error) => write!(f, "invalid argument: {}", error.as_ref()),
            Error::MissingMethod => f.write_str("REQUEST_METHOD is not present in the environment"),
            Error::BodyTooLarge { limit } => write!(f, "request body exceeds the limit of {limit} bytes"),
            Error::Io(error) => write!(f, "I/O error: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}

/// A contract violation by the caller. These are never recovered from inside
/// this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr)]
pub enum InvalidArgumentError {
    /// The value used as a header key isn't a string, number or boolean.
    ///
    /// ## Example:
    /// ```text
    /// getHeaders(["Content-Type"])
    /// ```
    KeyNotScalar,

    /// The collection is neither a map nor a list of `(key, value)` pairs.
    ///
    /// ## Example:
    /// ```text
    /// setHeaders(42)
    /// setHeaders(["Content-Type", "text/plain"])
    /// ```
    NotTraversable,

    /// The header value isn't a scalar and therefore has no textual form.
    ValueNotScalar,

    /// The status code isn't an integer.
    ///
    /// ## Example:
    /// ```text
    /// setStatusCode("404")
    /// setStatusCode(404.0)
    /// ```
    StatusCodeNotInteger,

    /// The status code is an integer, but doesn't fit in 16 bits.
    StatusCodeOutOfRange,
}
