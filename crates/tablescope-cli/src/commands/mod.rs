//! CLI command implementations.

pub mod hist;
pub mod schema;
pub mod serve;
pub mod stats;

use std::path::Path;

use tablescope::{IngestReceipt, ParserConfig, Tablescope, TablescopeConfig};

use crate::cli::DelimiterChoice;

/// Ingest a single file into a fresh engine.
pub(crate) fn load(
    file: &Path,
    delimiter: DelimiterChoice,
) -> Result<(Tablescope, IngestReceipt), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = TablescopeConfig::default().with_parser(ParserConfig {
        delimiter: delimiter.as_option(),
        ..ParserConfig::default()
    });
    let scope = Tablescope::with_config(config);
    let receipt = scope.ingest_path(file)?;

    Ok((scope, receipt))
}
