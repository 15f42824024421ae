//! CLI command implementations for itc

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{config::CliConfig, error::CliResult};

pub mod init;
pub mod inspect;
pub mod latency;
pub mod simulate;

/// itc - IT cortex neuron population simulator
#[derive(Parser, Debug)]
#[command(
    name = "itc",
    version,
    about = "Simulate firing rates of inferior-temporal cortex neurons",
    long_about = "itc builds populations of IT neurons with object selectivity, position, \
                  size, occlusion and clutter tolerance and early/late response dynamics, \
                  drives them with a stimulus schedule and reports their firing rates."
)]
pub struct ItcCli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ITC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an experiment directory with a template experiment
    #[command(alias = "new")]
    Init(init::InitCommand),

    /// Run an experiment and write the rate report
    #[command(alias = "run")]
    Simulate(simulate::SimulateCommand),

    /// Print neuron properties and the preferred-stimulus response
    Inspect(inspect::InspectCommand),

    /// Print the latency-versus-rate profile of a neuron
    Latency(latency::LatencyCommand),
}

impl ItcCli {
    /// Execute the CLI command with the resolved configuration
    pub async fn execute(self, config: CliConfig) -> CliResult<()> {
        match self.command {
            Commands::Init(cmd) => cmd.execute(&config).await,
            Commands::Simulate(cmd) => cmd.execute(&config).await,
            Commands::Inspect(cmd) => cmd.execute(&config).await,
            Commands::Latency(cmd) => cmd.execute(&config).await,
        }
    }
}
