//! Latency profile command

use clap::Args;
use std::path::PathBuf;

use itc_runtime::NeuronId;

use crate::{
    config::CliConfig,
    error::{CliError, CliResult},
    experiment::Experiment,
};

/// Print a neuron's response latency over a range of early rates
#[derive(Args, Debug)]
pub struct LatencyCommand {
    /// Experiment file
    pub experiment: PathBuf,

    /// Neuron to profile
    #[arg(short, long, default_value = "0")]
    pub neuron: u32,

    /// Highest rate of the profile (spikes/s)
    #[arg(long, default_value = "100.0")]
    pub max_rate: f64,

    /// Rate increment (spikes/s)
    #[arg(long, default_value = "5.0")]
    pub rate_step: f64,
}

impl LatencyCommand {
    pub async fn execute(self, config: &CliConfig) -> CliResult<()> {
        if !(self.rate_step > 0.0) || !(self.max_rate >= 0.0) {
            return Err(CliError::invalid_args(
                "--rate-step must be > 0 and --max-rate >= 0",
            ));
        }

        let experiment = Experiment::load(&self.experiment)?;
        let population = experiment.population(config.default_seed)?;
        let neuron = population.neuron(NeuronId::new(self.neuron))?;
        let dynamics = neuron.dynamics().ok_or_else(|| {
            CliError::invalid_args(format!(
                "neuron {} has no dynamics profile; set dynamics = \"tamura\"",
                neuron.id()
            ))
        })?;

        let count = (self.max_rate / self.rate_step).floor() as usize + 1;
        let rates = (0..count).map(|i| i as f64 * self.rate_step);

        println!("{}", dynamics.params().latency);
        println!("{:>10} {:>12} {:>8}", "rate", "latency_s", "steps");
        for (rate, latency) in dynamics.params().latency.profile(rates) {
            println!(
                "{:>10.2} {:>12.4} {:>8}",
                rate,
                latency,
                dynamics.latency_steps(rate)
            );
        }

        Ok(())
    }
}
