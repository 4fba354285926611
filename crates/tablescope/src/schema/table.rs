//! Typed in-memory table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::{ColumnType, Value};
use crate::error::{Result, TablescopeError};

/// One row rendered as an ordered column-name to value map.
pub type Row = IndexMap<String, Value>;

/// Schema summary entry for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub dtype: String,
}

/// A named, typed column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Inferred data type.
    pub column_type: ColumnType,
    /// One value per row.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from already-typed values.
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    /// Iterate over the non-missing values, in row order.
    pub fn present(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Numeric values of the present cells.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An immutable rectangular dataset with ordered columns.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, checking that every column has the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        if let Some(ragged) = columns.iter().find(|c| c.len() != row_count) {
            return Err(TablescopeError::InvalidArgument(format!(
                "column '{}' has {} values, expected {}",
                ragged.name,
                ragged.len(),
                row_count
            )));
        }

        Ok(Self { columns, row_count })
    }

    /// Columns in source order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Ordered `{name, type}` summary.
    pub fn schema(&self) -> Vec<SchemaField> {
        self.columns
            .iter()
            .map(|c| SchemaField {
                name: c.name.clone(),
                dtype: c.column_type.dtype().to_string(),
            })
            .collect()
    }

    /// Render a single row.
    pub fn row(&self, index: usize) -> Option<Row> {
        if index >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.values[index].clone()))
                .collect(),
        )
    }

    /// Render every row, in order.
    pub fn rows(&self) -> Vec<Row> {
        (0..self.row_count).filter_map(|i| self.row(i)).collect()
    }
}
