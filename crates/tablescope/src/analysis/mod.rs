//! Column analysis: descriptive statistics and histograms.

mod histogram;
mod stats;

pub use histogram::Histogram;
pub use stats::{ColumnStats, NumericSummary};

use crate::error::{Result, TablescopeError};
use crate::schema::{Column, Table};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 30;

/// Upper bound on the number of histogram bins a caller may request.
pub const MAX_BINS: usize = 10_000;

/// Analyzer configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Bin count used when the caller does not pick one.
    pub default_bins: usize,
    /// Largest accepted bin count.
    pub max_bins: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            default_bins: DEFAULT_BINS,
            max_bins: MAX_BINS,
        }
    }
}

/// Computes statistics and histograms for one column of a table.
#[derive(Debug, Clone, Default)]
pub struct ColumnAnalyzer {
    config: AnalyzerConfig,
}

impl ColumnAnalyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Descriptive statistics for `column`.
    ///
    /// Numeric columns get min/max/mean/median/mode; other columns get the
    /// mode only. Both report the missing count.
    pub fn stats(&self, table: &Table, column: &str) -> Result<ColumnStats> {
        let column = Self::find_column(table, column)?;
        Ok(stats::column_stats(column))
    }

    /// Histogram of a numeric column, using the default bin count when
    /// `bins` is `None`.
    pub fn histogram(&self, table: &Table, column: &str, bins: Option<usize>) -> Result<Histogram> {
        let column = Self::find_column(table, column)?;
        if !column.column_type.is_numeric() {
            return Err(TablescopeError::NotNumeric {
                column: column.name.clone(),
                column_type: column.column_type.to_string(),
            });
        }

        let bins = bins.unwrap_or(self.config.default_bins);
        if bins == 0 || bins > self.config.max_bins {
            return Err(TablescopeError::InvalidArgument(format!(
                "bins must be between 1 and {}, got {}",
                self.config.max_bins, bins
            )));
        }

        Ok(histogram::compute_histogram(&column.numeric_values(), bins))
    }

    fn find_column<'a>(table: &'a Table, name: &str) -> Result<&'a Column> {
        table
            .column(name)
            .ok_or_else(|| TablescopeError::InvalidColumn {
                column: name.to_string(),
            })
    }
}
