//! Table model and column types.

mod table;
mod types;

pub use table::{Column, Row, SchemaField, Table};
pub use types::{ColumnType, Value};
pub(crate) use types::ValueKey;
