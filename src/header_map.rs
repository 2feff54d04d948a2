// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{
    InvalidArgumentError,
    Value,
};

/// The header fields of a message, in insertion order. Names are unique;
/// setting an existing name replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    headers: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> HeaderMap {
        HeaderMap::default()
    }

    /// Builds the map from a dynamically typed collection. The collection must
    /// be a map, or a list of `[name, value]` pairs, with scalar names and
    /// values.
    pub fn try_from_value(value: Value) -> Result<HeaderMap, InvalidArgumentError> {
        let mut headers = HeaderMap::new();
        for (name, value) in value.into_pairs()? {
            headers.set(name.to_key()?, value.to_text()?);
        }
        Ok(headers)
    }

    #[must_use]
    pub fn contains(&self, header_name: &str) -> bool {
        self.get(header_name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Looks up the value of the header with exactly this name.
    #[must_use]
    pub fn get(&self, header_name: &str) -> Option<&str> {
        for (name, value) in &self.headers {
            if name == header_name {
                return Some(value);
            }
        }

        None
    }

    /// Looks up the value of the header, comparing names ASCII
    /// case-insensitively. When several names only differ in case, the last
    /// inserted one wins.
    #[must_use]
    pub fn get_ignore_case(&self, header_name: &str) -> Option<&str> {
        self.headers.iter()
            .rev()
            .find(|(name, _)| unicase::eq_ascii(name.as_str(), header_name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn remove(&mut self, header_name: &str) {
        self.headers.retain(|(name, _)| name != header_name);
    }

    pub fn set(&mut self, header_name: impl Into<String>, value: impl Into<String>) {
        let header_name = header_name.into();
        let value = value.into();
        for (name, existing_value) in &mut self.headers {
            if *name == header_name {
                *existing_value = value;
                return;
            }
        }

        self.headers.push((header_name, value));
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderMap
        where K: Into<String>, V: Into<String> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = HeaderMap::new();
        for (name, value) in iter {
            headers.set(name, value);
        }
        headers
    }
}
