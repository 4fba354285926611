//! Serve command - run the web UI and JSON API.

use std::net::SocketAddr;

use colored::Colorize;
use tablescope::{Tablescope, TablescopeConfig};

use crate::server::{app, state::AppState};

pub fn run(
    host: String,
    port: u16,
    max_body_mb: usize,
    max_datasets: Option<usize>,
    open: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    let mut config = TablescopeConfig::default();
    if let Some(max) = max_datasets {
        config = config.with_max_datasets(max);
    }
    let state = AppState::new(Tablescope::with_config(config));

    let url = format!("http://{}", addr);
    println!();
    println!(
        "{} {}",
        "Starting Tablescope at".cyan().bold(),
        url.white().bold()
    );
    println!();
    if verbose {
        println!("  Upload limit: {} MiB", max_body_mb);
        match max_datasets {
            Some(max) => println!("  Dataset limit: {}", max),
            None => println!("  Dataset limit: none"),
        }
        println!();
    }
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, addr, mb_to_bytes(max_body_mb)))?;

    println!("{}", "Server stopped".yellow());
    Ok(())
}

fn mb_to_bytes(mb: usize) -> usize {
    mb.saturating_mul(1024).saturating_mul(1024)
}
