//! CSV parser: bytes to a rectangular table of raw cells.

use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{RawTable, SourceMetadata};
use crate::error::{Result, TablescopeError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: Some(b','),
            quote: b'"',
        }
    }
}

/// Parses delimited text into a [`RawTable`].
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the raw table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(RawTable, SourceMetadata)> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|e| TablescopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned());

        self.parse_bytes(&contents, file_name)
    }

    /// Parse raw bytes (e.g. an uploaded file body).
    ///
    /// Fails with [`TablescopeError::Ingest`] on undecodable bytes, a missing
    /// header, or when no well-formed data row remains.
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        file_name: Option<String>,
    ) -> Result<(RawTable, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        std::str::from_utf8(body)
            .map_err(|e| TablescopeError::Ingest(format!("input is not valid UTF-8: {}", e)))?;

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(body)?,
        };

        let table = self.parse_records(body, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata {
            file_name,
            hash,
            size_bytes: bytes.len() as u64,
            format,
            encoding: "utf-8".to_string(),
            row_count: table.row_count(),
            column_count: table.column_count(),
            skipped_rows: table.skipped_rows,
        };

        Ok((table, metadata))
    }

    fn parse_records(&self, bytes: &[u8], delimiter: u8) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let raw_headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if raw_headers.is_empty() || raw_headers.iter().all(|h| h.trim().is_empty()) {
            return Err(TablescopeError::Ingest("No columns found".to_string()));
        }
        let headers = dedupe_headers(&raw_headers);
        let expected_cols = headers.len();

        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for (row_idx, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::debug!(row = row_idx + 1, error = %e, "skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };

            if record.len() != expected_cols {
                tracing::debug!(
                    row = row_idx + 1,
                    fields = record.len(),
                    expected = expected_cols,
                    "skipping malformed row"
                );
                skipped += 1;
                continue;
            }

            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if rows.is_empty() {
            return Err(TablescopeError::Ingest("No data rows found".to_string()));
        }

        let mut table = RawTable::new(headers, rows, delimiter);
        table.skipped_rows = skipped;
        Ok(table)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Make header names unique.
///
/// Blank names become `Unnamed: {index}`; repeats get `.1`, `.2`, ... suffixes,
/// skipping any candidate that is already taken.
fn dedupe_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (idx, name) in raw.iter().enumerate() {
        let trimmed = name.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            trimmed.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(TablescopeError::Ingest("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs rarely occur inside values
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
