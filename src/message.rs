// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{
    BodyKind,
    Error,
    HeaderMap,
    Value,
};

/// The state every HTTP message carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageParts {
    pub headers: HeaderMap,
    pub content: Option<BodyKind>,

    /// The length as declared by the owner of the message. This is not
    /// derived from, nor checked against, `content`.
    pub length: usize,
}

/// Shared accessors of requests and responses.
///
/// Implementors only expose their [`MessageParts`]; they can override the
/// lookup and content accessors when they need different behavior, as
/// [`Request`](crate::Request) does.
pub trait Message {
    fn parts(&self) -> &MessageParts;

    fn parts_mut(&mut self) -> &mut MessageParts;

    /// Replaces all header fields by the given ones.
    fn set_headers<I, K, V>(&mut self, headers: I)
            where I: IntoIterator<Item = (K, V)>,
                  K: Into<String>,
                  V: Into<String>,
                  Self: Sized {
        self.parts_mut().headers = headers.into_iter().collect();
    }

    /// Replaces all header fields by a dynamically typed collection, which
    /// must be a map or a list of `[name, value]` pairs. On error the current
    /// headers are left untouched.
    fn set_headers_from_value(&mut self, headers: Value) -> Result<(), Error> {
        self.parts_mut().headers = HeaderMap::try_from_value(headers)?;
        Ok(())
    }

    fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>)
            where Self: Sized {
        self.parts_mut().headers.set(name, value);
    }

    fn headers(&self) -> &HeaderMap {
        &self.parts().headers
    }

    /// Looks up a header by its exact name.
    fn header(&self, name: &str) -> Option<&str> {
        self.parts().headers.get(name)
    }

    /// Looks up a header by a dynamically typed key, which must be a string,
    /// number or boolean.
    fn header_by_value(&self, key: &Value) -> Result<Option<&str>, Error> {
        let key = key.to_key()?;
        Ok(self.header(&key))
    }

    fn set_content(&mut self, content: impl Into<BodyKind>)
            where Self: Sized {
        self.parts_mut().content = Some(content.into());
    }

    fn content(&mut self) -> Result<Option<&BodyKind>, Error> {
        Ok(self.parts().content.as_ref())
    }

    fn set_length(&mut self, length: usize) {
        self.parts_mut().length = length;
    }

    fn length(&self) -> usize {
        self.parts().length
    }
}
