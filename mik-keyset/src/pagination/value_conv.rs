//! Value conversion helpers for pagination.

use miniserde::json::{Number, Value as JsonValue};

use crate::builder::Value;

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl Value {
    /// Convert from a miniserde JSON scalar.
    ///
    /// Arrays and objects are not cursor values and yield `None`, as do
    /// unsigned integers that do not fit in `i64`.
    ///
    /// ```
    /// use mik_keyset::Value;
    /// use miniserde::json::{Number, Value as JsonValue};
    ///
    /// let json = JsonValue::Number(Number::U64(42));
    /// assert_eq!(Value::from_json(&json), Some(Value::Int(42)));
    /// ```
    #[must_use]
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => Some(Self::Null),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) => match n {
                Number::I64(i) => Some(Self::Int(*i)),
                Number::U64(u) => i64::try_from(*u).ok().map(Self::Int),
                Number::F64(f) => Some(Self::Float(*f)),
            },
            JsonValue::String(s) => Some(Self::String(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    /// Convert into a miniserde JSON scalar.
    ///
    /// Returns `None` for non-finite floats, which JSON cannot represent.
    #[must_use]
    pub fn to_json(&self) -> Option<JsonValue> {
        Some(match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::Number(Number::I64(*i)),
            Self::Float(f) if f.is_finite() => JsonValue::Number(Number::F64(*f)),
            Self::Float(_) => return None,
            Self::String(s) => JsonValue::String(s.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_conversions() {
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(7u32), Value::Int(7));
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
    }

    #[test]
    fn test_json_scalars() {
        assert_eq!(
            Value::from_json(&JsonValue::Number(Number::I64(-3))),
            Some(Value::Int(-3))
        );
        assert_eq!(
            Value::from_json(&JsonValue::Number(Number::U64(u64::MAX))),
            None
        );
        assert_eq!(Value::from_json(&JsonValue::Null), Some(Value::Null));
    }

    #[test]
    fn test_non_finite_float_has_no_json() {
        assert!(Value::Float(f64::NAN).to_json().is_none());
        assert!(Value::Float(f64::INFINITY).to_json().is_none());
        assert!(Value::Float(2.5).to_json().is_some());
    }
}
