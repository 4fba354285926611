//! Column type inference and cell conversion.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::error::Result;
use crate::input::RawTable;
use crate::schema::{Column, ColumnType, Table, Value};

// Cell contents treated as missing, in addition to the empty string.
static NULL_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
        "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .collect()
});

/// Converts a [`RawTable`] of strings into a typed [`Table`].
///
/// Each column is assigned the narrowest type that accepts every present
/// cell, tried in the order Integer, Float, Boolean, Text. A column with no
/// present cells is [`ColumnType::Float`], so its statistics come out null
/// and its histogram empty.
#[derive(Debug, Clone, Default)]
pub struct TypeInference;

impl TypeInference {
    pub fn new() -> Self {
        Self
    }

    /// Check if a raw cell represents a missing value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty() || NULL_TOKENS.contains(trimmed)
    }

    /// Build a typed table from parsed rows.
    pub fn infer_table(&self, raw: &RawTable) -> Result<Table> {
        let columns = raw
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<&str> = raw.column_values(idx).collect();
                let column_type = self.infer_type(&cells);
                let values = cells
                    .iter()
                    .map(|cell| convert_cell(cell, column_type))
                    .collect();
                Column::new(name.clone(), column_type, values)
            })
            .collect();

        Table::new(columns)
    }

    /// Infer the type of a column from its raw cells.
    pub fn infer_type(&self, cells: &[&str]) -> ColumnType {
        let present: Vec<&str> = cells
            .iter()
            .filter(|c| !Self::is_null_value(c))
            .map(|c| c.trim())
            .collect();

        if present.is_empty() {
            return ColumnType::Float;
        }

        if present.iter().all(|v| v.parse::<i64>().is_ok()) {
            ColumnType::Integer
        } else if present.iter().all(|v| parse_finite(v).is_some()) {
            ColumnType::Float
        } else if present.iter().all(|v| parse_bool(v).is_some()) {
            ColumnType::Boolean
        } else {
            ColumnType::Text
        }
    }
}

/// Convert one raw cell to a value of the column's type.
fn convert_cell(cell: &str, column_type: ColumnType) -> Value {
    if TypeInference::is_null_value(cell) {
        return Value::Missing;
    }
    let trimmed = cell.trim();

    match column_type {
        ColumnType::Integer => trimmed
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or(Value::Missing),
        ColumnType::Float => parse_finite(trimmed)
            .map(Value::Float)
            .unwrap_or(Value::Missing),
        ColumnType::Boolean => parse_bool(trimmed)
            .map(Value::Boolean)
            .unwrap_or(Value::Missing),
        ColumnType::Text | ColumnType::Other => Value::Text(cell.to_string()),
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}
