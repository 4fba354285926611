//! Error types for the Tablescope library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Tablescope operations.
#[derive(Debug, Error)]
pub enum TablescopeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The uploaded bytes could not be turned into a table.
    #[error("CSV parsing failed: {0}")]
    Ingest(String),

    /// No dataset is registered under the given identifier.
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// The dataset has no column with the given name.
    #[error("Invalid column: '{column}'")]
    InvalidColumn { column: String },

    /// A numeric-only operation was requested on a non-numeric column.
    #[error("Histogram only for numeric columns: '{column}' is {column_type}")]
    NotNumeric { column: String, column_type: String },

    /// A caller-supplied argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for Tablescope operations.
pub type Result<T> = std::result::Result<T, TablescopeError>;
