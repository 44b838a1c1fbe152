//! Typed cell values.

use crate::field_type::ColumnType;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A single typed cell of a [`Table`](crate::Table) row.
///
/// Serializes untagged: numbers become JSON numbers, text becomes JSON strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A field that parsed as a decimal number.
    Number(f64),
    /// Any other field, including the empty string.
    Text(String),
}

impl Value {
    /// Returns the numeric payload, if any.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// A value is defined unless it is the empty string.
    #[inline]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Value::Text(s) if s.is_empty())
    }

    /// The column type this single value would imply.
    #[inline]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Number(_) => ColumnType::Number,
            Value::Text(_) => ColumnType::String,
        }
    }

    /// Numeric payload, or 0 for text.
    #[inline]
    pub fn number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Case-insensitive substring test against an already lowercased needle.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            Value::Text(s) => s.to_lowercase().contains(needle),
            Value::Number(_) => self.to_string().contains(needle),
        }
    }

    /// Natural ordering used by the query engine.
    ///
    /// Numbers compare numerically, text compares lexicographically, and every
    /// number sorts before every text value.
    pub fn natural_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                if a == b {
                    Ordering::Equal
                } else {
                    a.total_cmp(b)
                }
            }
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // -0 prints as 0
            Value::Number(n) if *n == 0.0 => write!(f, "0"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_numbers_without_fraction() {
        assert_eq!(Value::Number(1200.0).to_string(), "1200");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_defined() {
        assert!(Value::Number(0.0).is_defined());
        assert!(Value::from("x").is_defined());
        assert!(!Value::from("").is_defined());
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(Value::Number(2.0).natural_cmp(&Value::Number(10.0)), Ordering::Less);
        assert_eq!(Value::from("b").natural_cmp(&Value::from("a")), Ordering::Greater);
        assert_eq!(Value::Number(99.0).natural_cmp(&Value::from("1")), Ordering::Less);
        assert_eq!(Value::from("1").natural_cmp(&Value::Number(99.0)), Ordering::Greater);
        assert_eq!(Value::Number(0.0).natural_cmp(&Value::Number(-0.0)), Ordering::Equal);
    }

    #[test]
    fn test_contains_lowercase() {
        assert!(Value::from("Laptop Pro").contains_lowercase("lap"));
        assert!(Value::Number(1200.0).contains_lowercase("20"));
        assert!(!Value::Number(1200.0).contains_lowercase("1200.0"));
    }

    #[test]
    fn test_untagged_serialization() {
        assert_eq!(serde_json::to_string(&Value::Number(45.0)).unwrap(), "45.0");
        assert_eq!(serde_json::to_string(&Value::from("Mouse")).unwrap(), "\"Mouse\"");
    }
}
