//! Parsed source data and its metadata.

use serde::{Deserialize, Serialize};

/// Metadata about an uploaded or loaded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Original file name, when the caller supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// SHA-256 hash of the raw bytes.
    pub hash: String,
    /// Size of the raw bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Decoded encoding.
    pub encoding: String,
    /// Number of data rows kept (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Rows dropped because their field count did not match the header.
    pub skipped_rows: usize,
}

/// Represents parsed tabular data before typing.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column headers, de-duplicated.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order). Every row has `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
    /// Number of malformed rows that were skipped.
    pub skipped_rows: usize,
}

impl RawTable {
    /// Create a new raw table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
            skipped_rows: 0,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }
}
