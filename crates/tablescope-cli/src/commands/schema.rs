//! Schema command - print the inferred schema of a data file.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::DelimiterChoice;

pub fn run(
    file: PathBuf,
    delimiter: DelimiterChoice,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (scope, receipt) = super::load(&file, delimiter)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        return Ok(());
    }

    let summary = scope.summary(&receipt.dataset_id)?;

    println!(
        "{} {}",
        "Schema of".cyan().bold(),
        file.display().to_string().white()
    );
    println!();
    for field in &receipt.schema {
        println!("  {:24} {}", field.name, field.dtype.yellow());
    }
    println!();
    println!(
        "{} rows, {} columns",
        receipt.row_count.to_string().white().bold(),
        receipt.schema.len().to_string().white().bold()
    );

    if summary.info.source.skipped_rows > 0 {
        println!(
            "{} skipped {} malformed rows",
            "Note:".yellow(),
            summary.info.source.skipped_rows
        );
    }

    if verbose {
        println!("Format: {}", summary.info.source.format);
        println!("Hash: {}", summary.info.source.hash);
    }

    Ok(())
}
