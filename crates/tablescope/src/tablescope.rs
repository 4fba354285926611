//! Main Tablescope struct and public API.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::analysis::{AnalyzerConfig, ColumnAnalyzer, ColumnStats, Histogram};
use crate::error::{Result, TablescopeError};
use crate::inference::TypeInference;
use crate::input::{Parser, ParserConfig, RawTable, SourceMetadata};
use crate::registry::{DatasetInfo, DatasetRegistry};
use crate::schema::{Row, SchemaField, Table};

/// Configuration for a Tablescope instance.
#[derive(Debug, Clone, Default)]
pub struct TablescopeConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Column analyzer configuration.
    pub analyzer: AnalyzerConfig,
    /// Maximum datasets held at once (None = unbounded).
    pub max_datasets: Option<usize>,
}

impl TablescopeConfig {
    /// Set the parser configuration.
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Set the analyzer configuration.
    pub fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Bound the number of datasets kept in memory.
    pub fn with_max_datasets(mut self, max_datasets: usize) -> Self {
        self.max_datasets = Some(max_datasets);
        self
    }
}

/// Response to a successful ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReceipt {
    /// Identifier of the new dataset.
    pub dataset_id: String,
    /// Ordered `{name, type}` summary.
    pub schema: Vec<SchemaField>,
    /// Number of rows kept.
    pub row_count: usize,
}

/// Dataset metadata together with its schema.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    #[serde(flatten)]
    pub info: DatasetInfo,
    pub schema: Vec<SchemaField>,
}

/// The dataset ingest and analysis engine.
///
/// Owns the [`DatasetRegistry`]; every read operation is keyed by dataset id.
pub struct Tablescope {
    parser: Parser,
    inference: TypeInference,
    analyzer: ColumnAnalyzer,
    registry: DatasetRegistry,
}

impl Tablescope {
    /// Create a new Tablescope instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(TablescopeConfig::default())
    }

    /// Create a Tablescope instance with custom configuration.
    pub fn with_config(config: TablescopeConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            inference: TypeInference::new(),
            analyzer: ColumnAnalyzer::with_config(config.analyzer),
            registry: DatasetRegistry::with_capacity(config.max_datasets),
        }
    }

    /// Parse, type and register a CSV payload.
    ///
    /// On failure nothing is registered.
    pub fn ingest(&self, bytes: &[u8]) -> Result<IngestReceipt> {
        self.ingest_named(bytes, None)
    }

    /// Like [`ingest`](Self::ingest), recording the original file name.
    pub fn ingest_named(&self, bytes: &[u8], file_name: Option<String>) -> Result<IngestReceipt> {
        let (raw, source) = self.parser.parse_bytes(bytes, file_name)?;
        self.register(raw, source)
    }

    /// Read a file from disk and ingest it.
    pub fn ingest_path(&self, path: impl AsRef<Path>) -> Result<IngestReceipt> {
        let (raw, source) = self.parser.parse_file(path)?;
        self.register(raw, source)
    }

    fn register(&self, raw: RawTable, source: SourceMetadata) -> Result<IngestReceipt> {
        let table = self.inference.infer_table(&raw)?;
        let schema = table.schema();
        let row_count = table.row_count();

        if source.skipped_rows > 0 {
            tracing::warn!(
                skipped = source.skipped_rows,
                "dropped rows with a mismatched field count"
            );
        }

        let info = self.registry.register(table, source);
        tracing::info!(
            dataset_id = %info.dataset_id,
            rows = row_count,
            columns = schema.len(),
            "dataset registered"
        );

        Ok(IngestReceipt {
            dataset_id: info.dataset_id,
            schema,
            row_count,
        })
    }

    /// Look up a dataset's table.
    pub fn lookup(&self, dataset_id: &str) -> Result<Arc<Table>> {
        self.registry
            .get(dataset_id)
            .ok_or_else(|| TablescopeError::NotFound(dataset_id.to_string()))
    }

    /// Registration metadata of a dataset.
    pub fn info(&self, dataset_id: &str) -> Result<DatasetInfo> {
        self.registry
            .info(dataset_id)
            .ok_or_else(|| TablescopeError::NotFound(dataset_id.to_string()))
    }

    /// Metadata and schema of a dataset.
    pub fn summary(&self, dataset_id: &str) -> Result<DatasetSummary> {
        let table = self.lookup(dataset_id)?;
        let info = self.info(dataset_id)?;

        Ok(DatasetSummary {
            info,
            schema: table.schema(),
        })
    }

    /// Every row of a dataset as column-name to value maps.
    pub fn list_rows(&self, dataset_id: &str) -> Result<Vec<Row>> {
        Ok(self.lookup(dataset_id)?.rows())
    }

    /// Statistics for one column of a dataset.
    pub fn column_stats(&self, dataset_id: &str, column: &str) -> Result<ColumnStats> {
        let table = self.lookup(dataset_id)?;
        self.analyzer.stats(&table, column)
    }

    /// Histogram for one numeric column of a dataset.
    pub fn column_histogram(
        &self,
        dataset_id: &str,
        column: &str,
        bins: Option<usize>,
    ) -> Result<Histogram> {
        let table = self.lookup(dataset_id)?;
        self.analyzer.histogram(&table, column, bins)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    /// The column analyzer in use.
    pub fn analyzer(&self) -> &ColumnAnalyzer {
        &self.analyzer
    }
}

impl Default for Tablescope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Value;

    #[test]
    fn test_ingest_then_stats() {
        let scope = Tablescope::new();
        let receipt = scope.ingest(b"a,b\n1,x\n2,y\n,z\n").unwrap();

        assert_eq!(receipt.dataset_id, "1");
        assert_eq!(receipt.row_count, 3);

        let stats = scope.column_stats("1", "a").unwrap();
        assert_eq!(stats.missing_count, 1);
        assert_eq!(stats.numeric.unwrap().mean, Some(1.5));
    }

    #[test]
    fn test_failed_ingest_registers_nothing() {
        let scope = Tablescope::new();
        assert!(scope.ingest(b"").is_err());
        assert!(scope.ingest(b"a,b\n").is_err());
        assert!(scope.registry().is_empty());

        // The next success still gets the first id
        assert_eq!(scope.ingest(b"a\n1\n").unwrap().dataset_id, "1");
    }

    #[test]
    fn test_unknown_dataset() {
        let scope = Tablescope::new();
        assert!(matches!(scope.lookup("9"), Err(TablescopeError::NotFound(_))));
        assert!(matches!(scope.list_rows("9"), Err(TablescopeError::NotFound(_))));
        assert!(matches!(
            scope.column_stats("9", "a"),
            Err(TablescopeError::NotFound(_))
        ));
        assert!(matches!(
            scope.column_histogram("9", "a", None),
            Err(TablescopeError::NotFound(_))
        ));
        assert!(matches!(scope.summary("9"), Err(TablescopeError::NotFound(_))));
        assert!(matches!(scope.info("9"), Err(TablescopeError::NotFound(_))));
    }

    #[test]
    fn test_summary_carries_source_metadata() {
        let scope = Tablescope::new();
        scope
            .ingest_named(b"a\n1\n1,2\n", Some("data.csv".to_string()))
            .unwrap();

        let summary = scope.summary("1").unwrap();
        assert_eq!(summary.info.source.file_name.as_deref(), Some("data.csv"));
        assert_eq!(summary.info.source.skipped_rows, 1);
        assert_eq!(summary.schema[0].dtype, "int64");
    }

    #[test]
    fn test_list_rows() {
        let scope = Tablescope::new();
        scope.ingest(b"a,b\n1,x\n").unwrap();

        let rows = scope.list_rows("1").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["a"], Value::Integer(1));
    }
}
