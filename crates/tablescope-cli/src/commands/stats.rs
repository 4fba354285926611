//! Stats command - print descriptive statistics for one column.

use std::path::PathBuf;

use colored::Colorize;
use tablescope::Value;

use crate::cli::DelimiterChoice;

pub fn run(
    file: PathBuf,
    column: String,
    delimiter: DelimiterChoice,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (scope, receipt) = super::load(&file, delimiter)?;
    let stats = scope.column_stats(&receipt.dataset_id, &column)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let dtype = receipt
        .schema
        .iter()
        .find(|f| f.name == column)
        .map(|f| f.dtype.as_str())
        .unwrap_or("unknown");

    println!(
        "{} {} ({})",
        "Column".cyan().bold(),
        column.white().bold(),
        dtype.yellow()
    );
    println!();

    if let Some(ref numeric) = stats.numeric {
        print_row("min", &numeric.min.to_string());
        print_row("max", &numeric.max.to_string());
        print_row("mean", &format_opt(numeric.mean));
        print_row("median", &format_opt(numeric.median));
    }
    print_row("mode", &display_value(&stats.mode));
    print_row("count", &stats.count.to_string());
    print_row("unique", &stats.unique_count.to_string());

    let missing = stats.missing_count.to_string();
    if stats.missing_count > 0 {
        print_row("missing", &missing.red().to_string());
    } else {
        print_row("missing", &missing.green().to_string());
    }

    Ok(())
}

fn print_row(label: &str, value: &str) {
    println!("  {:10} {}", label, value);
}

fn format_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.4}", v))
        .unwrap_or_else(|| "null".to_string())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Text(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}
