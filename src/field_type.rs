use serde::Serialize;
use std::fmt;

/// Data type inferred for a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Every defined value in the column parsed as a decimal number.
    Number,
    /// At least one defined value is text (fallback type).
    #[default]
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Number => write!(f, "number"),
            ColumnType::String => write!(f, "string"),
        }
    }
}

impl ColumnType {
    /// Returns true if this type is numeric.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number)
    }

    /// Merge two types, returning the most general type that can represent both.
    pub fn merge(self, other: ColumnType) -> ColumnType {
        match (self, other) {
            (ColumnType::Number, ColumnType::Number) => ColumnType::Number,
            _ => ColumnType::String,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_merge() {
        assert_eq!(ColumnType::Number.merge(ColumnType::Number), ColumnType::Number);
        assert_eq!(ColumnType::Number.merge(ColumnType::String), ColumnType::String);
        assert_eq!(ColumnType::String.merge(ColumnType::Number), ColumnType::String);
        assert_eq!(ColumnType::String.merge(ColumnType::String), ColumnType::String);
    }

    #[test]
    fn test_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ColumnType::Number).unwrap(), "\"number\"");
        assert_eq!(serde_json::to_string(&ColumnType::String).unwrap(), "\"string\"");
    }
}
