//! Hist command - print a text histogram of one numeric column.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::DelimiterChoice;

/// Width of the longest bar, in characters.
const BAR_WIDTH: usize = 40;

pub fn run(
    file: PathBuf,
    column: String,
    bins: usize,
    delimiter: DelimiterChoice,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (scope, receipt) = super::load(&file, delimiter)?;
    let hist = scope.column_histogram(&receipt.dataset_id, &column, Some(bins))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&hist)?);
        return Ok(());
    }

    println!(
        "{} {} ({} values)",
        "Histogram of".cyan().bold(),
        column.white().bold(),
        hist.total()
    );
    println!();

    if hist.counts.is_empty() {
        println!("{}", "No values present".yellow());
        return Ok(());
    }

    let max_count = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    let last = hist.bin_count() - 1;

    for (i, &count) in hist.counts.iter().enumerate() {
        let close = if i == last { ']' } else { ')' };
        let bar_len = count * BAR_WIDTH / max_count;
        println!(
            "  [{:>12.4}, {:>12.4}{} {:>6} {}",
            hist.bin_edges[i],
            hist.bin_edges[i + 1],
            close,
            count,
            "#".repeat(bar_len).blue()
        );
    }

    Ok(())
}
