//! Core type definitions: column types and typed cell values.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Inferred data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (every value parses as a base-10 integer).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Text/string values.
    Text,
    /// No present value to infer from.
    Other,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Short dtype token used in schema summaries.
    pub fn dtype(&self) -> &'static str {
        match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::Text => "string",
            ColumnType::Other => "object",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Other
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dtype())
    }
}

/// A single typed cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Empty cell or null token.
    #[default]
    Missing,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl Value {
    /// Returns true for [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Hashable identity used for frequency counting.
    pub(crate) fn key(&self) -> Option<ValueKey<'_>> {
        match self {
            Value::Missing => None,
            Value::Integer(i) => Some(ValueKey::Integer(*i)),
            // -0.0 and 0.0 count as the same value
            Value::Float(f) if *f == 0.0 => Some(ValueKey::Float(0.0f64.to_bits())),
            Value::Float(f) => Some(ValueKey::Float(f.to_bits())),
            Value::Boolean(b) => Some(ValueKey::Boolean(*b)),
            Value::Text(s) => Some(ValueKey::Text(s.as_str())),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Missing => serializer.serialize_none(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => f.write_str("null"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Borrowed, hashable identity of a present value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey<'a> {
    Integer(i64),
    Float(u64),
    Boolean(bool),
    Text(&'a str),
}
