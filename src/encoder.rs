//! Record to array encoding
//!
//! Each field is written into the slot named by its resolved position. The
//! array is exactly as long as the largest position and gaps stay `null`.

use crate::error::{Error, Result};
use crate::position::{max_position, resolve, Record};
use crate::value::Value;
use crate::MAX_DEPTH;

/// Fixed-length slot array under construction
#[derive(Debug, Clone, PartialEq)]
pub struct SlotWriter {
    slots: Vec<Value>,
}

impl SlotWriter {
    /// Create a writer with `len` null slots
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Value::Null; len],
        }
    }

    /// Store a value at a 1-based position
    ///
    /// Positions outside `1..=len` are not materializable and are ignored.
    /// Returns whether the value was stored. A later write to the same
    /// position replaces the earlier one.
    #[inline]
    pub fn put(&mut self, position: usize, value: Value) -> bool {
        match position
            .checked_sub(1)
            .and_then(|idx| self.slots.get_mut(idx))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Number of slots
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the writer has no slots
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get a slice of the slots written so far
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.slots
    }

    /// Finish and take the slot array
    #[inline]
    pub fn finish(self) -> Vec<Value> {
        self.slots
    }
}

/// Encode a record into its position-ordered slot array
pub fn record_to_array<R: Record>(record: &R) -> Result<Vec<Value>> {
    encode_at(record, 0)
}

/// Encode a record nested `depth` levels deep into an array value
pub fn record_to_value<R: Record>(record: &R, depth: usize) -> Result<Value> {
    encode_at(record, depth).map(Value::Array)
}

fn encode_at<R: Record>(record: &R, depth: usize) -> Result<Vec<Value>> {
    if depth > MAX_DEPTH {
        return Err(Error::DepthExceeded { limit: MAX_DEPTH });
    }

    let table = resolve(record);
    let mut writer = SlotWriter::new(max_position(&table));
    for field in table {
        let value = field.value.to_value(depth)?;
        writer.put(field.position, value);
    }

    tracing::trace!(depth, slots = writer.len(), "encoded record");
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{FieldMut, FieldRef};

    #[test]
    fn test_slot_writer_bounds() {
        let mut writer = SlotWriter::new(3);
        assert!(writer.put(1, Value::from("a")));
        assert!(writer.put(3, Value::from("c")));
        assert!(!writer.put(0, Value::from("zero")));
        assert!(!writer.put(4, Value::from("past")));

        assert_eq!(
            writer.finish(),
            vec![Value::from("a"), Value::Null, Value::from("c")]
        );
    }

    #[test]
    fn test_slot_writer_last_write_wins() {
        let mut writer = SlotWriter::new(1);
        writer.put(1, Value::from(1i64));
        writer.put(1, Value::from(2i64));
        assert_eq!(writer.as_slice(), &[Value::from(2i64)]);
    }

    #[derive(Default)]
    struct Shuffled {
        c: String,
        a: String,
        b: String,
    }

    impl Record for Shuffled {
        fn fields(&self) -> Vec<FieldRef<'_>> {
            vec![
                FieldRef::tagged("c", "3", &self.c),
                FieldRef::tagged("a", "1", &self.a),
                FieldRef::tagged("b", "2", &self.b),
            ]
        }

        fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
            vec![
                FieldMut::tagged("c", "3", &mut self.c),
                FieldMut::tagged("a", "1", &mut self.a),
                FieldMut::tagged("b", "2", &mut self.b),
            ]
        }
    }

    #[test]
    fn test_encode_orders_by_position() {
        let record = Shuffled {
            c: "C".into(),
            a: "A".into(),
            b: "B".into(),
        };
        assert_eq!(
            record_to_array(&record).unwrap(),
            vec![Value::from("A"), Value::from("B"), Value::from("C")]
        );
    }

    #[derive(Default)]
    struct Empty;

    impl Record for Empty {
        fn fields(&self) -> Vec<FieldRef<'_>> {
            Vec::new()
        }

        fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
            Vec::new()
        }
    }

    #[test]
    fn test_encode_empty_record() {
        assert!(record_to_array(&Empty).unwrap().is_empty());
    }

    #[test]
    fn test_depth_guard() {
        assert_eq!(
            record_to_value(&Empty, MAX_DEPTH + 1),
            Err(Error::DepthExceeded { limit: MAX_DEPTH })
        );
        assert!(record_to_value(&Empty, MAX_DEPTH).is_ok());
    }
}
