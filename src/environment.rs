// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{
    InvalidArgumentError,
    Value,
};

/// The meta-variables the gateway passed for a single request, e.g.
/// `REQUEST_METHOD`, `QUERY_STRING` and the `HTTP_*` header carriers. Order
/// is preserved, names are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    variables: Vec<(String, String)>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the snapshot from a dynamically typed collection, which must be
    /// a map or a list of `[name, value]` pairs with scalar entries.
    pub fn try_from_value(value: Value) -> Result<Self, InvalidArgumentError> {
        let mut environment = Self::new();
        for (name, value) in value.into_pairs()? {
            environment.set(name.to_key()?, value.to_text()?);
        }
        Ok(environment)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.iter()
            .find(|(variable, _)| variable == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.variables.iter_mut().find(|(variable, _)| *variable == name) {
            Some((_, existing_value)) => *existing_value = value,
            None => self.variables.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
        where K: Into<String>, V: Into<String> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut environment = Self::new();
        for (name, value) in iter {
            environment.set(name, value);
        }
        environment
    }
}
