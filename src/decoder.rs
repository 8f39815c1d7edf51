//! Array to record decoding
//!
//! Slots are read by resolved position. Missing slots, trailing extra slots
//! and `null` slots leave fields at their default; only values that cannot
//! be structurally converted are reported.

use crate::error::{Error, Result};
use crate::position::{resolve_mut, Record};
use crate::value::Value;
use crate::MAX_DEPTH;

/// Borrowed view over a decoded slot array
#[derive(Debug, Clone, Copy)]
pub struct SlotReader<'a> {
    slots: &'a [Value],
}

impl<'a> SlotReader<'a> {
    /// Create a reader over the given slots
    #[inline]
    pub fn new(slots: &'a [Value]) -> Self {
        Self { slots }
    }

    /// Slot at a 1-based position, `None` when out of range
    #[inline]
    pub fn get(&self, position: usize) -> Option<&'a Value> {
        position
            .checked_sub(1)
            .and_then(|idx| self.slots.get(idx))
    }

    /// Slot at a 1-based position, skipping `null`
    #[inline]
    pub fn present(&self, position: usize) -> Option<&'a Value> {
        self.get(position).filter(|v| !v.is_null())
    }

    /// Number of slots
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when there are no slots
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Decode a slot array into a fresh record
pub fn array_to_record<R: Record>(array: &[Value]) -> Result<R> {
    let mut record = R::default();
    populate(&mut record, array, 0)?;
    Ok(record)
}

/// Decode an array value into a fresh record
///
/// Fails with [`Error::TargetKind`] when the value is not an array.
pub fn record_from_value<R: Record>(value: &Value) -> Result<R> {
    match value {
        Value::Array(items) => array_to_record(items),
        other => Err(Error::TargetKind {
            found: other.kind_name(),
        }),
    }
}

/// Fill an existing record from a slot array
///
/// On error the record may be partially populated.
pub fn populate<R: Record>(record: &mut R, array: &[Value], depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(Error::DepthExceeded { limit: MAX_DEPTH });
    }

    let reader = SlotReader::new(array);
    for field in resolve_mut(record) {
        if let Some(slot) = reader.present(field.position) {
            field.value.assign(field.name, slot, depth)?;
        }
    }
    Ok(())
}

/// Decode a nested record held in a parent's slot
///
/// An array slot always counts as applied, even when it fills no field.
pub fn assign_record<R: Record>(
    record: &mut R,
    field: &'static str,
    value: &Value,
    depth: usize,
) -> Result<bool> {
    match value {
        Value::Array(items) => populate(record, items, depth).map(|()| true),
        other => Err(Error::Shape {
            field,
            found: other.kind_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{FieldMut, FieldRef};

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        second: String,
        first: i64,
    }

    impl Record for Pair {
        fn fields(&self) -> Vec<FieldRef<'_>> {
            vec![
                FieldRef::tagged("second", "2", &self.second),
                FieldRef::tagged("first", "1", &self.first),
            ]
        }

        fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
            vec![
                FieldMut::tagged("second", "2", &mut self.second),
                FieldMut::tagged("first", "1", &mut self.first),
            ]
        }
    }

    #[test]
    fn test_slot_reader() {
        let slots = [Value::from("a"), Value::Null];
        let reader = SlotReader::new(&slots);
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.get(0), None);
        assert_eq!(reader.get(1), Some(&Value::from("a")));
        assert_eq!(reader.get(2), Some(&Value::Null));
        assert_eq!(reader.present(2), None);
        assert_eq!(reader.get(3), None);
    }

    #[test]
    fn test_decode_by_position() {
        let pair: Pair = array_to_record(&[Value::from(5i64), Value::from("two")]).unwrap();
        assert_eq!(
            pair,
            Pair {
                second: "two".into(),
                first: 5,
            }
        );
    }

    #[test]
    fn test_short_long_and_null_arrays() {
        let pair: Pair = array_to_record(&[Value::from(5i64)]).unwrap();
        assert_eq!(pair.first, 5);
        assert_eq!(pair.second, "");

        let pair: Pair = array_to_record(&[]).unwrap();
        assert_eq!(pair, Pair::default());

        let pair: Pair = array_to_record(&[
            Value::Null,
            Value::from("x"),
            Value::from("extra"),
            Value::Bool(true),
        ])
        .unwrap();
        assert_eq!(pair.first, 0);
        assert_eq!(pair.second, "x");
    }

    #[test]
    fn test_record_from_value_target_kind() {
        assert_eq!(
            record_from_value::<Pair>(&Value::from("nope")),
            Err(Error::TargetKind { found: "string" })
        );
    }

    #[test]
    fn test_assign_record_shape() {
        let mut pair = Pair::default();
        assert_eq!(
            assign_record(&mut pair, "inner", &Value::from(3i64), 1),
            Err(Error::Shape {
                field: "inner",
                found: "number",
            })
        );
    }
}
