//! porthole-sync - one-shot rebuild of the service mapping.
//!
//! Fetches the upstream endpoints manifest if no local copy exists, merges it
//! into the user-editable mapping and reports what changed. Delete the cached
//! manifest to force a refresh from upstream.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use porthole_core::{logging, Config, Reconciler};

/// Log output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "porthole-sync",
    about = "Fetch the AWS endpoints manifest and rebuild the service mapping",
    version
)]
struct Cli {
    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,

    /// Log output format; implies debug logging
    #[clap(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Directory holding the manifest and mapping files
    #[clap(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(
        cli.verbose || cli.log_format.is_some(),
        cli.log_format == Some(LogFormat::Json),
    );

    let config = match cli.data_dir {
        Some(dir) => Config::with_data_dir(dir),
        None => Config::discover().context("could not determine a data directory")?,
    };

    let summary = Reconciler::new(config)?
        .run()
        .await
        .context("failed to reconcile the service mapping")?;
    println!(
        "Service mapping updated: {} added, {} retained, {} dropped",
        summary.added, summary.retained, summary.dropped
    );
    Ok(())
}
