// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Bytes(Vec<u8>),
    StaticString(&'static str),
    String(String),
}

impl BodyKind {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            BodyKind::Bytes(bytes) => bytes,
            BodyKind::StaticString(str) => str.as_bytes(),
            BodyKind::String(str) => str.as_bytes(),
        }
    }

    /// The body as text, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BodyKind::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            BodyKind::StaticString(str) => Some(str),
            BodyKind::String(str) => Some(str),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&'static str> for BodyKind {
    fn from(value: &'static str) -> Self {
        Self::StaticString(value)
    }
}

impl From<String> for BodyKind {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for BodyKind {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}
