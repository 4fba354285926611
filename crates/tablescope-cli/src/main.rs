//! Tablescope CLI - CSV dataset exploration server and tools.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            max_body_mb,
            max_datasets,
            open,
        } => commands::serve::run(host, port, max_body_mb, max_datasets, open, cli.verbose),

        Commands::Schema {
            file,
            delimiter,
            json,
        } => commands::schema::run(file, delimiter, json, cli.verbose),

        Commands::Stats {
            file,
            column,
            delimiter,
            json,
        } => commands::stats::run(file, column, delimiter, json, cli.verbose),

        Commands::Hist {
            file,
            column,
            bins,
            delimiter,
            json,
        } => commands::hist::run(file, column, bins, delimiter, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Route `tracing` output to stderr. `RUST_LOG` overrides the defaults.
fn init_logging(cli: &Cli) {
    let default_filter = match (&cli.command, cli.verbose) {
        (_, true) => "debug",
        (Commands::Serve { .. }, false) => "info,tower_http=debug",
        (_, false) => "warn",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
