// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use hashbrown::HashMap;

use crate::{
    InvalidArgumentError,
    Value,
};

/// Query or form parameters of a request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameters {
    values: HashMap<String, Value>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `application/x-www-form-urlencoded` data, such as a query
    /// string. Later occurrences of a name override earlier ones, except for
    /// names ending in `[]`, which collect their values in a list. Dots and
    /// spaces in names are replaced by underscores, so `user.name` and
    /// `user name` are both stored as `user_name`. Nested names such as
    /// `a[b]` are kept verbatim; they are not turned into maps.
    ///
    /// # References
    /// * [WHATWG URL - application/x-www-form-urlencoded parsing](https://url.spec.whatwg.org/#urlencoded-parsing)
    pub fn parse_urlencoded(input: &str) -> Self {
        let mut parameters = Self::new();

        for sequence in input.split('&') {
            if sequence.is_empty() {
                continue;
            }

            let (name, value) = sequence.split_once('=').unwrap_or((sequence, ""));
            let name = normalize_name(decode_component(name));
            let value = Value::String(decode_component(value));

            match name.strip_suffix("[]") {
                Some(list_name) => parameters.append(list_name, value),
                None => parameters.insert(name, value),
            }
        }

        parameters
    }

    /// Builds the parameters from a dynamically typed collection, which must
    /// be a map or a list of `[name, value]` pairs with scalar names.
    pub fn try_from_value(value: Value) -> Result<Self, InvalidArgumentError> {
        let mut parameters = Self::new();
        for (name, value) in value.into_pairs()? {
            parameters.insert(name.to_key()?, value);
        }
        Ok(parameters)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Shorthand for parameters that hold a single string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Appends the value to the list stored under the name. A non-list value
    /// that was there before is discarded.
    pub fn append(&mut self, name: &str, value: Value) {
        match self.values.get_mut(name) {
            Some(Value::List(list)) => list.push(value),
            _ => {
                self.values.insert(name.to_string(), Value::List(vec![value]));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
        where K: Into<String>, V: Into<Value> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Self::new();
        for (name, value) in iter {
            parameters.insert(name, value);
        }
        parameters
    }
}

fn decode_component(input: &str) -> String {
    let input = input.replace('+', " ");
    match urlencoding::decode(&input) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(input.as_bytes())).into_owned(),
    }
}

fn normalize_name(name: String) -> String {
    if name.contains(['.', ' ']) {
        name.replace(['.', ' '], "_")
    } else {
        name
    }
}
