// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::InvalidArgumentError;

/// A loosely typed value, as handed over by the gateway for query strings,
/// form fields and other dynamically typed arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),

    /// An ordered map. Keys are normally scalars, but nothing prevents a
    /// caller from building one with a compound key, which is why the
    /// consumers validate them.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Creates a [`Value::Map`] from anything that yields pairs.
    pub fn map<I, K, V>(entries: I) -> Self
            where I: IntoIterator<Item = (K, V)>,
                  K: Into<Value>,
                  V: Into<Value> {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Whether or not this is a string, number or boolean.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Integer(_) | Value::Float(_) | Value::String(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(str) => Some(str),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(integer) => Some(*integer),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Converts a scalar to the string used to key a map with it. Booleans
    /// become `1`/`0` and floats are truncated towards zero.
    pub fn to_key(&self) -> Result<String, InvalidArgumentError> {
        match self {
            Value::String(str) => Ok(str.clone()),
            Value::Integer(integer) => Ok(integer.to_string()),
            Value::Bool(true) => Ok(String::from("1")),
            Value::Bool(false) => Ok(String::from("0")),
            Value::Float(float) => Ok((float.trunc() as i64).to_string()),
            _ => Err(InvalidArgumentError::KeyNotScalar),
        }
    }

    /// Converts a scalar to its textual form, e.g. for a header value. A
    /// `false` is the empty string.
    pub fn to_text(&self) -> Result<String, InvalidArgumentError> {
        match self {
            Value::String(str) => Ok(str.clone()),
            Value::Integer(integer) => Ok(integer.to_string()),
            Value::Bool(true) => Ok(String::from("1")),
            Value::Bool(false) => Ok(String::new()),
            Value::Float(float) => Ok(float.to_string()),
            _ => Err(InvalidArgumentError::ValueNotScalar),
        }
    }

    /// Splits a map, or a list of two-element lists, into its entries.
    pub fn into_pairs(self) -> Result<Vec<(Value, Value)>, InvalidArgumentError> {
        match self {
            Value::Map(entries) => Ok(entries),
            Value::List(items) => items.into_iter()
                .map(|item| match item {
                    Value::List(pair) if pair.len() == 2 => {
                        let mut pair = pair.into_iter();
                        match (pair.next(), pair.next()) {
                            (Some(key), Some(value)) => Ok((key, value)),
                            _ => Err(InvalidArgumentError::NotTraversable),
                        }
                    }
                    _ => Err(InvalidArgumentError::NotTraversable),
                })
                .collect(),
            _ => Err(InvalidArgumentError::NotTraversable),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use super::*;

    #[rstest]
    #[case(Value::from("X-Trace-Id"), Ok("X-Trace-Id"))]
    #[case(Value::from(42), Ok("42"))]
    #[case(Value::from(true), Ok("1"))]
    #[case(Value::from(false), Ok("0"))]
    #[case(Value::from(3.9), Ok("3"))]
    #[case(Value::Null, Err(InvalidArgumentError::KeyNotScalar))]
    #[case(Value::List(Vec::new()), Err(InvalidArgumentError::KeyNotScalar))]
    #[case(Value::Map(Vec::new()), Err(InvalidArgumentError::KeyNotScalar))]
    fn to_key(#[case] value: Value, #[case] expected: Result<&str, InvalidArgumentError>) {
        assert_eq!(value.to_key(), expected.map(String::from));
    }

    #[test]
    fn false_has_empty_text() {
        assert_eq!(Value::Bool(false).to_text(), Ok(String::new()));
        assert_eq!(Value::Float(1.5).to_text(), Ok(String::from("1.5")));
    }

    #[test]
    fn list_of_pairs_splits() {
        let value = Value::List(vec![
            Value::List(vec!["Accept".into(), "*/*".into()]),
            Value::List(vec!["Host".into(), "localhost".into()]),
        ]);
        let pairs = value.into_pairs().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], (Value::from("Host"), Value::from("localhost")));
    }

    #[rstest]
    #[case(Value::Integer(7))]
    #[case(Value::from("Accept"))]
    #[case(Value::Null)]
    #[case(Value::List(vec!["Accept".into(), "*/*".into()]))]
    #[case(Value::List(vec![Value::List(vec!["Accept".into()])]))]
    fn not_traversable(#[case] value: Value) {
        assert_eq!(value.into_pairs(), Err(InvalidArgumentError::NotTraversable));
    }
}
