//! Neuron inspection command

use clap::Args;
use std::path::PathBuf;
use tracing::info;

use itc_runtime::{simulation::preferred_stimulus_trace, NeuronId};

use crate::{config::CliConfig, error::CliResult, experiment::Experiment};

/// Inspect the neurons of an experiment
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Experiment file
    pub experiment: PathBuf,

    /// Neuron to inspect (all neurons when omitted)
    #[arg(short, long)]
    pub neuron: Option<u32>,

    /// Also print the response to the preferred stimulus over this many steps
    #[arg(long)]
    pub trace_steps: Option<usize>,
}

impl InspectCommand {
    pub async fn execute(self, config: &CliConfig) -> CliResult<()> {
        let experiment = Experiment::load(&self.experiment)?;
        let mut population = experiment.population(config.default_seed)?;
        info!("Inspecting '{}'", experiment.experiment.name);

        let ids = match self.neuron {
            Some(raw) => vec![NeuronId::new(raw)],
            None => population.neuron_ids(),
        };

        for id in ids {
            let neuron = population.neuron_mut(id)?;
            println!("{}", neuron);

            if let Some(steps) = self.trace_steps {
                let dt = experiment.neuron.dt;
                let trace = preferred_stimulus_trace(neuron, steps)?;
                println!("{:>8} {:>10} {:>12}", "step", "time_s", "rate");
                for (step, rate) in trace.iter().enumerate() {
                    println!("{:>8} {:>10.3} {:>12.4}", step, step as f64 * dt, rate);
                }
            }
        }

        Ok(())
    }
}
