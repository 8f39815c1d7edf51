//! Slot values
//!
//! Every slot of an encoded array holds one of a closed set of JSON shapes.
//! There is no object shape: a record always travels as an array.

use core::fmt;

use serde::ser::{Serialize, Serializer};
use serde_json::Number;

use crate::error::{Error, Result};

/// A single array slot
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Empty slot or JSON `null`
    #[default]
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, keeping the integer/float distinction of the source
    Number(Number),
    /// JSON string
    Text(String),
    /// Nested array, typically an encoded nested record
    Array(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in error reports
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Returns true for [`Value::Null`]
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text if this is a string slot
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the elements if this is an array slot
    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric view as `f64`, the way JSON decoders see every number
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Build a number slot from a float; non-finite floats become null
    pub fn from_f64(v: f64) -> Self {
        Number::from_f64(v).map_or(Value::Null, Value::Number)
    }

    /// Parse a JSON text that must be an array
    pub fn parse_array(text: &str) -> Result<Vec<Value>> {
        match serde_json::from_str::<serde_json::Value>(text)? {
            serde_json::Value::Array(items) => items.into_iter().map(Value::try_from).collect(),
            other => Err(Error::Json {
                message: format!("expected JSON array, got {}", json_kind(&other)),
            }),
        }
    }

    /// Compact JSON text for a sequence of slots
    pub fn array_to_json(items: &[Value]) -> Result<String> {
        Ok(serde_json::to_string(items)?)
    }
}

fn json_kind(raw: &serde_json::Value) -> &'static str {
    match raw {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(raw: serde_json::Value) -> Result<Self> {
        Ok(match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(_) => return Err(Error::UnsupportedJson { found: "object" }),
        })
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Value::Number(n),
            Value::Text(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items),
        }
    }
}

// Floats at or beyond 2^53 no longer hold every integer exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Default textual rendering, used when a text field receives a non-text slot
///
/// Floats with an integral value print without a fraction, so `5.0` reads
/// as `5`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => match n.as_f64() {
                Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < MAX_EXACT_FLOAT => {
                    write!(f, "{}", x as i64)
                }
                _ => write!(f, "{n}"),
            },
            Value::Text(s) => f.write_str(s),
            Value::Array(items) => match serde_json::to_string(items) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Number(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::from_f64(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
