//! Experiment initialization command

use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::{
    config::CliConfig,
    error::{CliError, CliResult},
    experiment,
};

/// Create a new experiment directory
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Experiment name (also the directory name)
    pub name: String,

    /// Parent directory (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing experiment file
    #[arg(long)]
    pub force: bool,

    /// Also write the default global configuration if none exists
    #[arg(long)]
    pub global_config: bool,
}

impl InitCommand {
    pub async fn execute(self, config: &CliConfig) -> CliResult<()> {
        info!("Initializing experiment: {}", self.name);

        let experiment_dir = self.dir.join(&self.name);
        let experiment_file = experiment::experiment_path(&experiment_dir);
        if experiment_file.exists() && !self.force {
            return Err(CliError::invalid_args(format!(
                "{} already exists (use --force to overwrite)",
                experiment_file.display()
            )));
        }

        tokio::fs::create_dir_all(experiment_dir.join("results")).await?;
        tokio::fs::write(&experiment_file, experiment::template(&self.name)).await?;

        if self.global_config {
            let path = CliConfig::default_config_path()?;
            if path.exists() {
                warn!("Global configuration already present at {}", path.display());
            } else {
                config.save_to_file(&path)?;
                info!("Wrote global configuration to {}", path.display());
            }
        }

        info!("Experiment initialized at: {}", experiment_dir.display());
        info!(
            "Run 'itc simulate {} -o {}' to simulate it",
            experiment_file.display(),
            experiment_dir.join("results").join("rates.json").display()
        );

        Ok(())
    }
}
