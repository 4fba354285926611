//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tablescope: explore CSV datasets from a browser or the terminal
#[derive(Parser)]
#[command(name = "tablescope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server and UI
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Maximum upload size in MiB
        #[arg(long, default_value = "64")]
        max_body_mb: usize,

        /// Keep at most this many datasets in memory, evicting the oldest
        #[arg(long)]
        max_datasets: Option<usize>,

        /// Open the UI in a browser once the server is up
        #[arg(long)]
        open: bool,
    },

    /// Print the inferred schema of a CSV file
    Schema {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter (a single character, "tab", or "auto")
        #[arg(short, long, default_value = ",")]
        delimiter: DelimiterChoice,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print descriptive statistics for one column
    Stats {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column name
        #[arg(value_name = "COLUMN")]
        column: String,

        /// Field delimiter (a single character, "tab", or "auto")
        #[arg(short, long, default_value = ",")]
        delimiter: DelimiterChoice,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a histogram of one numeric column
    Hist {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column name
        #[arg(value_name = "COLUMN")]
        column: String,

        /// Number of bins
        #[arg(short, long, default_value = "30")]
        bins: usize,

        /// Field delimiter (a single character, "tab", or "auto")
        #[arg(short, long, default_value = ",")]
        delimiter: DelimiterChoice,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Field delimiter choice for file subcommands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelimiterChoice {
    /// Detect from the first lines of the file
    Auto,
    /// A fixed single-byte delimiter
    Byte(u8),
}

impl DelimiterChoice {
    /// Parser setting for this choice (`None` = auto-detect).
    pub fn as_option(self) -> Option<u8> {
        match self {
            DelimiterChoice::Auto => None,
            DelimiterChoice::Byte(b) => Some(b),
        }
    }
}

impl std::str::FromStr for DelimiterChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            _ if s.eq_ignore_ascii_case("auto") => Ok(DelimiterChoice::Auto),
            _ if s.eq_ignore_ascii_case("tab") => Ok(DelimiterChoice::Byte(b'\t')),
            "\\t" | "\t" => Ok(DelimiterChoice::Byte(b'\t')),
            _ if s.len() == 1 && s.is_ascii() => Ok(DelimiterChoice::Byte(s.as_bytes()[0])),
            _ => Err(format!(
                "Unknown delimiter: {}. Use a single character, tab, or auto.",
                s
            )),
        }
    }
}

impl std::fmt::Display for DelimiterChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelimiterChoice::Auto => write!(f, "auto"),
            DelimiterChoice::Byte(b'\t') => write!(f, "tab"),
            DelimiterChoice::Byte(b) => write!(f, "{}", *b as char),
        }
    }
}
