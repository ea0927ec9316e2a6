//! porthole - print the AWS console URL for a service.
//!
//! Brings the locally cached, user-editable mapping up to date with the
//! upstream endpoints manifest, then resolves the requested service in the
//! requested region. The resolved URL is the only thing written to stdout.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;

use porthole_core::{logging, Config, Console};

/// Log output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "porthole",
    about = "Resolve AWS service names to console URLs",
    version
)]
struct Cli {
    /// Service name to resolve
    #[clap(default_value = "ec2")]
    service: String,

    /// Region substituted into the resolved URL
    #[clap(default_value = "us-west-2")]
    region: String,

    /// List every known service name and exit
    #[clap(short = 's', long = "services")]
    services: bool,

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

fn resolve_config(data_dir: Option<PathBuf>) -> Result<Config> {
    match data_dir {
        Some(dir) => Ok(Config::with_data_dir(dir)),
        None => Config::discover().context("could not determine a data directory"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(
        cli.verbose || cli.log_format.is_some(),
        cli.log_format == Some(LogFormat::Json),
    );

    let config = resolve_config(cli.data_dir)?;
    debug!(data_dir = %config.data_dir.display(), "using data directory");
    let console = Console::new(config)?;

    if cli.services {
        let names = console
            .services()
            .await
            .context("failed to load the service mapping")?;
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let summary = console
        .sync()
        .await
        .context("failed to reconcile the service mapping")?;
    debug!(
        added = summary.added,
        retained = summary.retained,
        dropped = summary.dropped,
        "mapping is up to date"
    );

    let url = console
        .resolve_url_in_region(&cli.service, &cli.region)
        .await
        .context("failed to load the service mapping")?;
    match url {
        Some(url) => println!("{url}"),
        None => bail!(
            "unknown service '{}'; run with --services to list known names",
            cli.service
        ),
    }
    Ok(())
}
