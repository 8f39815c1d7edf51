//! Schema-free positional values
//!
//! A [`DynamicSchema`] is an ordered slot array used when no record type is
//! known. Element `i` holds position `i + 1`.

use crate::decoder::array_to_record;
use crate::encoder::record_to_array;
use crate::error::{Error, Result};
use crate::frame;
use crate::position::Record;
use crate::value::Value;

/// Untyped ordered slot values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynamicSchema {
    values: Vec<Value>,
}

impl DynamicSchema {
    /// Create an empty schema
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the slots
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Take the slots
    #[inline]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Number of slots
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no slots
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Slot at a 1-based position
    #[inline]
    pub fn get(&self, position: usize) -> Option<&Value> {
        position
            .checked_sub(1)
            .and_then(|idx| self.values.get(idx))
    }

    /// Store a value at a 1-based position, padding any gap with `null`
    ///
    /// Position 0 is not addressable and is ignored; returns whether the
    /// value was stored.
    pub fn set(&mut self, position: usize, value: impl Into<Value>) -> bool {
        let Some(idx) = position.checked_sub(1) else {
            return false;
        };
        if idx >= self.values.len() {
            self.values.resize(idx + 1, Value::Null);
        }
        self.values[idx] = value.into();
        true
    }

    /// Append a value at the next position
    #[inline]
    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    /// Iterate `(position, value)` pairs
    pub fn positioned(&self) -> impl Iterator<Item = (usize, &Value)> + '_ {
        self.values.iter().enumerate().map(|(idx, v)| (idx + 1, v))
    }

    /// Capture a record's slot array
    pub fn from_record<R: Record>(record: &R) -> Result<Self> {
        record_to_array(record).map(Self::from)
    }

    /// Interpret the slots as a record of type `R`
    pub fn to_record<R: Record>(&self) -> Result<R> {
        array_to_record(&self.values)
    }

    /// Encode as a framed JSON array
    pub fn encode(&self) -> Result<Vec<u8>> {
        frame::encode_values(&self.values)
    }

    /// Decode either a framed payload or a bare JSON array
    pub fn decode(data: &[u8], framed: bool) -> Result<Self> {
        let values = if framed {
            frame::unwrap(data)?
        } else {
            let text = core::str::from_utf8(data).map_err(|e| Error::Json {
                message: format!("payload is not valid UTF-8: {e}"),
            })?;
            Value::parse_array(text)?
        };
        Ok(Self { values })
    }
}

impl From<Vec<Value>> for DynamicSchema {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl From<DynamicSchema> for Vec<Value> {
    fn from(schema: DynamicSchema) -> Self {
        schema.values
    }
}

impl FromIterator<Value> for DynamicSchema {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
