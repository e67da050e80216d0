//! tenk CLI binary.
//!
//! # Usage
//!
//! ```bash
//! # Which fiscal year does a period end in?
//! tenk classify 20240131 2023-09-30
//!
//! # Pick the first date representing fiscal 2023
//! tenk select --year 2023 2024-02-03 2023-01-28
//!
//! # Pick the fiscal 2023 10-K from a saved submissions document
//! tenk edgar --submissions CIK0000794367.json --year 2023
//!
//! # Pick a statement column, falling back to the latest
//! tenk columns --year 2023 "2025-02-01 00:00:00" "2024-02-03 00:00:00"
//!
//! # Turn model responses into one upsert
//! tenk bulk-insert responses/*.txt
//! ```

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Options;
use std::process;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(command = ?cli.command, format = ?cli.format, "starting");

    let options = Options {
        format: cli.format,
        require_match: cli.require_match,
    };

    let output = match &cli.command {
        Commands::Classify(args) => commands::classify(args, options)?,
        Commands::Select(args) => commands::select(args, options)?,
        Commands::Edgar(args) => commands::edgar(args, options)?,
        Commands::Columns(args) => commands::columns(args, options)?,
        Commands::Values(args) => commands::values(args)?,
        Commands::BulkInsert(args) => commands::bulk_insert(args)?,
    };

    commands::print(&output);
    Ok(())
}

/// Logs go to stderr so stdout carries only command output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tenk=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tenk=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
