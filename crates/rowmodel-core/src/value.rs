//! Column values exchanged with the backend.

use std::fmt;

use serde::{Serialize, Serializer};

/// A single column value.
///
/// Only flat scalars (and their absence) are representable: anything richer
/// lives at the entity layer, which is responsible for flattening nested
/// entities out of payloads before they reach a driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL / an absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Double(f64),
    /// Text string.
    Text(String),
}

impl Value {
    /// True if this value is NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True if this value is numeric, or text whose content parses as a
    /// number.
    ///
    /// This is the loose identity check the entity layer uses: an identity
    /// read back from a driver may arrive as `Text("42")` and still counts.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Int(_) | Value::Double(_) => true,
            Value::Text(s) => s.trim().parse::<f64>().is_ok(),
            Value::Null | Value::Bool(_) => false,
        }
    }

    /// Get as an integer, if this is an `Int`.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as a float, widening `Int` values.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as a string slice, if this is `Text`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get as a boolean, if this is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert into a `serde_json::Value` for serialization trees.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Double(f) => serde_json::Value::from(*f),
            Value::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Double(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(0).is_null());
        assert!(!Value::Text(String::new()).is_null());
    }

    #[test]
    fn test_is_numeric() {
        assert!(Value::Int(42).is_numeric());
        assert!(Value::Double(1.5).is_numeric());
        assert!(Value::Text("42".to_string()).is_numeric());
        assert!(Value::Text(" 3.25 ".to_string()).is_numeric());
        assert!(!Value::Text("forty-two".to_string()).is_numeric());
        assert!(!Value::Text(String::new()).is_numeric());
        assert!(!Value::Bool(true).is_numeric());
        assert!(!Value::Null.is_numeric());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Text("x".to_string()).as_i64(), None);
        assert_eq!(Value::Text("x".to_string()).as_str(), Some("x"));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(5i64)), Value::Int(5));
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::Null.to_json(), serde_json::Value::Null);
        assert_eq!(Value::Int(7).to_json(), serde_json::json!(7));
        assert_eq!(
            Value::Text("bo".to_string()).to_json(),
            serde_json::json!("bo")
        );
    }
}
