//! # itc - IT cortex neuron simulator
//!
//! Command-line entry point: logging setup and argument parsing.

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use itc_cli::{config::CliConfig, error::CliResult, ItcCli};

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = ItcCli::parse();
    let config = CliConfig::resolve(cli.config.as_deref())?;

    // RUST_LOG wins over --verbose and the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level(cli.verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(err) = cli.execute(config).await {
        error!("Command failed: {}", err);
        std::process::exit(1);
    }

    Ok(())
}
