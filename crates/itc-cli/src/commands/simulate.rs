//! Simulation command: run an experiment and write a JSON rate report

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use itc_runtime::{NeuronId, SimulationResult};

use crate::{
    config::CliConfig,
    error::{CliError, CliResult},
    experiment::Experiment,
};

/// Run an experiment
#[derive(Args, Debug)]
pub struct SimulateCommand {
    /// Experiment file
    pub experiment: PathBuf,

    /// Output JSON file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Draw Poisson spikes from the rates
    #[arg(long)]
    pub spikes: bool,

    /// Override the experiment seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the number of steps
    #[arg(long)]
    pub steps: Option<usize>,
}

/// Per-neuron summary of a run
#[derive(Debug, Serialize)]
pub struct NeuronSummary {
    pub neuron: u32,
    pub mean_rate: f64,
    pub peak_rate: f64,
    pub spike_count: usize,
}

/// JSON report written by `itc simulate`
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub experiment: String,
    pub seed: u64,
    pub neurons: usize,
    pub dt: f64,
    pub steps: usize,
    pub summary: Vec<NeuronSummary>,
    /// Rates per step, one entry per neuron
    pub rates: Vec<Vec<f64>>,
    /// `(step, neuron)` pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spikes: Option<Vec<(u64, u32)>>,
}

impl SimulationReport {
    fn new(experiment: &Experiment, seed: u64, neurons: usize, result: SimulationResult, spikes: bool) -> Self {
        let summary = (0..neurons as u32)
            .map(|raw| {
                let id = NeuronId::new(raw);
                NeuronSummary {
                    neuron: raw,
                    mean_rate: result.mean_rate(id),
                    peak_rate: result.peak_rate(id),
                    spike_count: result.spikes_for_neuron(id).len(),
                }
            })
            .collect();

        Self {
            experiment: experiment.experiment.name.clone(),
            seed,
            neurons,
            dt: result.dt,
            steps: result.steps_executed,
            summary,
            spikes: spikes.then(|| result.export_spikes()),
            rates: result.rates,
        }
    }
}

impl SimulateCommand {
    pub async fn execute(self, config: &CliConfig) -> CliResult<()> {
        let mut experiment = Experiment::load(&self.experiment)?;
        if self.spikes {
            experiment.simulation.record_spikes = true;
        }
        if let Some(seed) = self.seed {
            experiment.simulation.seed = Some(seed);
        }
        if let Some(steps) = self.steps {
            experiment.simulation.steps = steps;
        }

        let seed = experiment.seed(config.default_seed);
        let mut engine = experiment.engine(config.default_seed)?;
        let neurons = engine.population().len();
        let steps = engine.params().steps;
        let record_spikes = engine.params().record_spikes;

        info!(
            "Simulating '{}': {} neurons, {} steps, seed {}",
            experiment.experiment.name, neurons, steps, seed
        );

        let progress = if config.preferences.show_progress {
            let pb = ProgressBar::new(steps as u64);
            pb.set_style(
                ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} steps")
                    .map_err(|e| CliError::Generic(anyhow::anyhow!(e)))?,
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let bar = progress.clone();
        let result = tokio::task::spawn_blocking(move || engine.run_with_progress(|_| bar.inc(1)))
            .await
            .map_err(|e| CliError::Generic(anyhow::anyhow!(e)))??;
        progress.finish_and_clear();

        info!(
            "Completed {} steps; {} spikes recorded",
            result.steps_executed,
            result.spikes.len()
        );

        let report = SimulationReport::new(&experiment, seed, neurons, result, record_spikes);
        let json = if config.preferences.pretty_json {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };

        match self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, json).await?;
                info!("Report written to {}", path.display());
            }
            None => println!("{}", json),
        }

        Ok(())
    }
}
