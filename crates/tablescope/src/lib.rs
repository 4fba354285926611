//! Tablescope: in-memory tabular dataset exploration.
//!
//! Tablescope ingests CSV payloads, infers a typed schema, keeps the resulting
//! tables in a registry keyed by sequential ids, and serves per-column
//! descriptive statistics and histograms.
//!
//! # Example
//!
//! ```
//! use tablescope::{Tablescope, Value};
//!
//! let scope = Tablescope::new();
//! let receipt = scope.ingest(b"a,b\n1,x\n2,y\n,z\n").unwrap();
//! assert_eq!(receipt.schema[0].dtype, "int64");
//!
//! let stats = scope.column_stats(&receipt.dataset_id, "b").unwrap();
//! assert_eq!(stats.mode, Value::Text("x".to_string()));
//!
//! let hist = scope.column_histogram(&receipt.dataset_id, "a", Some(2)).unwrap();
//! assert_eq!(hist.counts.iter().sum::<usize>(), 2);
//! ```

pub mod analysis;
pub mod error;
pub mod inference;
pub mod input;
pub mod registry;
pub mod schema;

mod tablescope;

pub use crate::tablescope::{DatasetSummary, IngestReceipt, Tablescope, TablescopeConfig};
pub use analysis::{AnalyzerConfig, ColumnAnalyzer, ColumnStats, Histogram, NumericSummary};
pub use error::{Result, TablescopeError};
pub use input::{Parser, ParserConfig, RawTable, SourceMetadata};
pub use registry::{DatasetInfo, DatasetRegistry};
pub use schema::{Column, ColumnType, Row, SchemaField, Table, Value};
