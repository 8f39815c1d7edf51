//! Per-type slot conversion
//!
//! [`Field`] is implemented for the scalar types the codec can coerce, for
//! `Option`, `Box`, raw [`Value`] slots and, through
//! [`record_field!`](crate::record_field), for record types.
//!
//! Coercion is lenient. Text that does not parse into a numeric or boolean
//! target leaves the field untouched instead of failing, and `assign`
//! reports `false` so wrappers such as `Option` stay unset.

use serde_json::Number;

use crate::error::{Error, Result};
use crate::value::Value;

/// A value that can occupy an array slot
pub trait Field {
    /// Convert to a slot value. `depth` is the nesting level of the
    /// enclosing record.
    fn to_value(&self, depth: usize) -> Result<Value>;

    /// Coerce a non-null slot value into this field
    ///
    /// Returns whether the slot was applied; `false` means the field was left
    /// as it was. The default rejects every value, for types that can be
    /// written but have no decode rule.
    fn assign(&mut self, field: &'static str, _value: &Value, _depth: usize) -> Result<bool> {
        Err(Error::UnsupportedType {
            field,
            type_name: self.type_name(),
        })
    }

    /// Rust type name, used in error reports
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Integer view of a slot: numbers truncate, text must parse
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::Text(s) => s.parse().ok(),
        _ => None,
    }
}

/// Unsigned view of a slot: numbers truncate, text must parse
pub fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::Text(s) => s.parse().ok(),
        _ => None,
    }
}

/// Float view of a slot
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Text(s) => s.parse().ok(),
        _ => None,
    }
}

/// Boolean view of a slot
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Text(s) => parse_bool(s),
        _ => None,
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[inline]
fn store<T>(target: &mut T, coerced: Option<T>) -> bool {
    match coerced {
        Some(v) => {
            *target = v;
            true
        }
        None => false,
    }
}

macro_rules! signed_field {
    ($($t:ty),* $(,)?) => {
        $(
            impl Field for $t {
                #[inline]
                fn to_value(&self, _depth: usize) -> Result<Value> {
                    Ok(Value::Number(Number::from(*self)))
                }

                fn assign(&mut self, _field: &'static str, value: &Value, _depth: usize) -> Result<bool> {
                    Ok(store(self, coerce_i64(value).and_then(|v| <$t>::try_from(v).ok())))
                }
            }
        )*
    };
}

macro_rules! unsigned_field {
    ($($t:ty),* $(,)?) => {
        $(
            impl Field for $t {
                #[inline]
                fn to_value(&self, _depth: usize) -> Result<Value> {
                    Ok(Value::Number(Number::from(*self)))
                }

                fn assign(&mut self, _field: &'static str, value: &Value, _depth: usize) -> Result<bool> {
                    Ok(store(self, coerce_u64(value).and_then(|v| <$t>::try_from(v).ok())))
                }
            }
        )*
    };
}

signed_field!(i8, i16, i32, i64, isize);
unsigned_field!(u8, u16, u32, u64, usize);

impl Field for f64 {
    #[inline]
    fn to_value(&self, _depth: usize) -> Result<Value> {
        Ok(Value::from_f64(*self))
    }

    fn assign(&mut self, _field: &'static str, value: &Value, _depth: usize) -> Result<bool> {
        Ok(store(self, coerce_f64(value)))
    }
}

impl Field for f32 {
    #[inline]
    fn to_value(&self, _depth: usize) -> Result<Value> {
        Ok(Value::from_f64(f64::from(*self)))
    }

    fn assign(&mut self, _field: &'static str, value: &Value, _depth: usize) -> Result<bool> {
        Ok(store(self, coerce_f64(value).map(|v| v as f32)))
    }
}

impl Field for bool {
    #[inline]
    fn to_value(&self, _depth: usize) -> Result<Value> {
        Ok(Value::Bool(*self))
    }

    fn assign(&mut self, _field: &'static str, value: &Value, _depth: usize) -> Result<bool> {
        Ok(store(self, coerce_bool(value)))
    }
}

impl Field for String {
    #[inline]
    fn to_value(&self, _depth: usize) -> Result<Value> {
        Ok(Value::Text(self.clone()))
    }

    fn assign(&mut self, _field: &'static str, value: &Value, _depth: usize) -> Result<bool> {
        *self = match value {
            Value::Text(s) => s.clone(),
            other => other.to_string(),
        };
        Ok(true)
    }
}

impl Field for Value {
    #[inline]
    fn to_value(&self, _depth: usize) -> Result<Value> {
        Ok(self.clone())
    }

    fn assign(&mut self, _field: &'static str, value: &Value, _depth: usize) -> Result<bool> {
        *self = value.clone();
        Ok(true)
    }
}

impl<T: Field + Default> Field for Option<T> {
    fn to_value(&self, depth: usize) -> Result<Value> {
        match self {
            Some(inner) => inner.to_value(depth),
            None => Ok(Value::Null),
        }
    }

    fn assign(&mut self, field: &'static str, value: &Value, depth: usize) -> Result<bool> {
        if let Some(inner) = self {
            return inner.assign(field, value, depth);
        }

        // Only materialize the inner value once the slot actually applies.
        let mut inner = T::default();
        let applied = inner.assign(field, value, depth)?;
        if applied {
            *self = Some(inner);
        }
        Ok(applied)
    }
}

impl<T: Field + ?Sized> Field for Box<T> {
    #[inline]
    fn to_value(&self, depth: usize) -> Result<Value> {
        (**self).to_value(depth)
    }

    #[inline]
    fn assign(&mut self, field: &'static str, value: &Value, depth: usize) -> Result<bool> {
        (**self).assign(field, value, depth)
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

// Written as arrays, never read back.
impl<T: Field> Field for Vec<T> {
    fn to_value(&self, depth: usize) -> Result<Value> {
        self.iter()
            .map(|item| item.to_value(depth))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<T: Field>(target: &mut T, value: Value) -> Result<bool> {
        target.assign("f", &value, 0)
    }

    #[test]
    fn test_integer_coercion() {
        let mut v = 0i64;
        set(&mut v, Value::from(42i64)).unwrap();
        assert_eq!(v, 42);

        set(&mut v, Value::from(7.9)).unwrap();
        assert_eq!(v, 7);

        set(&mut v, Value::from("-12")).unwrap();
        assert_eq!(v, -12);

        // Unparsable text leaves the field alone
        assert!(!set(&mut v, Value::from("twelve")).unwrap());
        assert_eq!(v, -12);

        assert!(!set(&mut v, Value::Bool(true)).unwrap());
        assert_eq!(v, -12);
    }

    #[test]
    fn test_narrow_integer_out_of_range() {
        let mut v = 5u8;
        set(&mut v, Value::from(300i64)).unwrap();
        assert_eq!(v, 5);

        set(&mut v, Value::from(-1i64)).unwrap();
        assert_eq!(v, 5);

        set(&mut v, Value::from("200")).unwrap();
        assert_eq!(v, 200);
    }

    #[test]
    fn test_float_coercion() {
        let mut v = 0.0f64;
        set(&mut v, Value::from(3i64)).unwrap();
        assert_eq!(v, 3.0);

        set(&mut v, Value::from("2.5")).unwrap();
        assert_eq!(v, 2.5);

        let mut f = 0.0f32;
        set(&mut f, Value::from(0.25)).unwrap();
        assert_eq!(f, 0.25);
    }

    #[test]
    fn test_bool_coercion() {
        let mut b = false;
        set(&mut b, Value::Bool(true)).unwrap();
        assert!(b);

        set(&mut b, Value::from("F")).unwrap();
        assert!(!b);

        set(&mut b, Value::from("yes")).unwrap();
        assert!(!b);

        set(&mut b, Value::from(1i64)).unwrap();
        assert!(!b);
    }

    #[test]
    fn test_text_coercion() {
        let mut s = String::new();
        set(&mut s, Value::from("abc")).unwrap();
        assert_eq!(s, "abc");

        set(&mut s, Value::from(2i64)).unwrap();
        assert_eq!(s, "2");

        set(&mut s, Value::from(1.5)).unwrap();
        assert_eq!(s, "1.5");

        set(&mut s, Value::from(5.0)).unwrap();
        assert_eq!(s, "5");

        set(&mut s, Value::Bool(true)).unwrap();
        assert_eq!(s, "true");
    }

    #[test]
    fn test_option_and_box() {
        let mut o: Option<i32> = None;
        assert_eq!(o.to_value(0).unwrap(), Value::Null);
        set(&mut o, Value::from(9i64)).unwrap();
        assert_eq!(o, Some(9));

        let mut b: Box<String> = Box::default();
        set(&mut b, Value::from("boxed")).unwrap();
        assert_eq!(*b, "boxed");
    }

    #[test]
    fn test_option_stays_unset_on_unparsable_text() {
        let mut n: Option<i64> = None;
        assert!(!set(&mut n, Value::from("abc")).unwrap());
        assert_eq!(n, None);

        let mut b: Option<bool> = None;
        assert!(!set(&mut b, Value::from("maybe")).unwrap());
        assert_eq!(b, None);

        let mut small: Option<u8> = None;
        assert!(!set(&mut small, Value::from(300i64)).unwrap());
        assert_eq!(small, None);

        // An already present value is kept as is.
        let mut n = Some(4i64);
        assert!(!set(&mut n, Value::from("abc")).unwrap());
        assert_eq!(n, Some(4));
        assert!(set(&mut n, Value::from("8")).unwrap());
        assert_eq!(n, Some(8));
    }

    #[test]
    fn test_vec_has_no_decode_rule() {
        let mut list = vec![1i64, 2, 3];
        assert_eq!(
            list.to_value(0).unwrap(),
            Value::Array(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)])
        );

        match set(&mut list, Value::Array(vec![])) {
            Err(Error::UnsupportedType { field, type_name }) => {
                assert_eq!(field, "f");
                assert!(type_name.contains("Vec"));
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
        assert_eq!(list, vec![1, 2, 3]);
    }
}
