//! Experiment files: one neuron configuration, a population size and a stimulus schedule

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use itc_runtime::{
    NeuronConfig, Population, SimulationEngine, SimulationParams, StimulusEpoch, StimulusSchedule,
};

use crate::error::{CliError, CliResult};

/// File name written by `itc init`
pub const EXPERIMENT_FILE: &str = "experiment.toml";

/// Experiment file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    #[serde(default)]
    pub experiment: ExperimentInfo,
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub neuron: NeuronConfig,
    #[serde(default)]
    pub stimulus: Vec<StimulusEpoch>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    /// Number of neurons sharing the configuration
    pub neurons: u32,
    /// Number of time steps
    pub steps: usize,
    /// Population and spike seed
    pub seed: Option<u64>,
    /// Draw Poisson spikes
    pub record_spikes: bool,
    /// Spike recording limit
    pub max_recorded_spikes: Option<usize>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        let params = SimulationParams::default();
        Self {
            neurons: 1,
            steps: params.steps,
            seed: None,
            record_spikes: params.record_spikes,
            max_recorded_spikes: params.max_recorded_spikes,
        }
    }
}

impl Experiment {
    /// Load and validate an experiment file
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::missing_resource(format!(
                "experiment file {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let experiment: Self = toml::from_str(&content)?;
        experiment.validate()?;

        tracing::debug!(
            "Loaded experiment '{}' ({} neurons, {} steps, {} stimulus epochs)",
            experiment.experiment.name,
            experiment.simulation.neurons,
            experiment.simulation.steps,
            experiment.stimulus.len()
        );
        Ok(experiment)
    }

    /// Check the neuron configuration, simulation section and every epoch
    pub fn validate(&self) -> CliResult<()> {
        if self.simulation.neurons == 0 {
            return Err(CliError::config("simulation.neurons must be > 0"));
        }
        self.neuron.validate()?;
        self.params(None)?;
        for epoch in &self.stimulus {
            epoch.validate()?;
        }
        Ok(())
    }

    /// Seed of the run: the experiment's, else the fallback, else 0
    pub fn seed(&self, fallback: Option<u64>) -> u64 {
        self.simulation.seed.or(fallback).unwrap_or(0)
    }

    /// Simulation parameters
    pub fn params(&self, fallback_seed: Option<u64>) -> CliResult<SimulationParams> {
        let mut params = SimulationParams::new(self.simulation.steps)?
            .with_spikes(self.simulation.record_spikes)
            .with_seed(self.seed(fallback_seed));
        params.max_recorded_spikes = self.simulation.max_recorded_spikes;
        Ok(params)
    }

    /// Build the population described by the experiment
    pub fn population(&self, fallback_seed: Option<u64>) -> CliResult<Population> {
        Ok(Population::new(
            self.simulation.neurons,
            &self.neuron,
            self.seed(fallback_seed),
        )?)
    }

    /// Stimulus schedule
    pub fn schedule(&self) -> CliResult<StimulusSchedule> {
        let mut schedule = StimulusSchedule::new();
        for epoch in &self.stimulus {
            schedule.add(epoch.clone())?;
        }
        Ok(schedule)
    }

    /// Engine ready to run
    pub fn engine(&self, fallback_seed: Option<u64>) -> CliResult<SimulationEngine> {
        let engine = SimulationEngine::new(self.population(fallback_seed)?, self.params(fallback_seed)?)?;
        Ok(engine.with_schedule(self.schedule()?))
    }
}

/// Commented template written by `itc init`
pub fn template(name: &str) -> String {
    TEMPLATE.replace("{name}", name)
}

/// Path of the experiment file inside an experiment directory
pub fn experiment_path(dir: &Path) -> PathBuf {
    dir.join(EXPERIMENT_FILE)
}

const TEMPLATE: &str = r#"# IT neuron experiment
[experiment]
name = "{name}"
description = "Preferred object alone, then joined by a second object, then an empty scene"

[simulation]
neurons = 4
steps = 600         # 3 s at dt = 5 ms
seed = 42
record_spikes = false

[neuron]
dt = 0.005          # time step (s)
max_fire_rate = 100.0
dynamics = "tamura"             # none | tamura
position = "gaussian"           # none | gaussian
size = "lognormal"              # none | lognormal (requires gaussian position)
occlusion = "two_input_sigmoid" # none | two_input_sigmoid
clutter = "average"             # average

[neuron.preferences]
car = 0.8
van = 0.45
bus = 0.1

[neuron.gaussian_position]
rf_center = [0.0, 0.0]
position_tolerance = 0.3

[neuron.lognormal_size]
pref_size = 0.2

[neuron.two_input_sigmoid]
diagnosticity = 0.6
diagnostic = { a = 0.32, b = 70.0 }
nondiagnostic = { a = 0.1, b = 40.0 }

[[stimulus]]
start_step = 20
stop_step = 300
objects = [
    { object = "car", x = 0.05, y = 0.0, size = 0.2 },
]

[[stimulus]]
start_step = 150
stop_step = 300
objects = [
    { object = "van", x = -0.2, y = 0.1, size = 0.25, vis_nondiagnostic = 0.8, vis_diagnostic = 0.6 },
]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_and_validates() {
        let experiment: Experiment = toml::from_str(&template("demo")).unwrap();
        experiment.validate().unwrap();
        assert_eq!(experiment.experiment.name, "demo");
        assert_eq!(experiment.simulation.neurons, 4);
        assert_eq!(experiment.neuron.dynamics, "tamura");
        assert_eq!(experiment.neuron.preferences["van"], 0.45);
        assert_eq!(experiment.stimulus.len(), 2);
        assert_eq!(experiment.stimulus[1].objects[0].vis_diagnostic, 0.6);
        assert_eq!(experiment.stimulus[0].objects[0].vis_diagnostic, 1.0);
    }

    #[test]
    fn test_minimal_experiment_uses_defaults() {
        let experiment: Experiment = toml::from_str("[neuron.preferences]\nA = 0.5\n").unwrap();
        experiment.validate().unwrap();
        assert_eq!(experiment.simulation.neurons, 1);
        assert_eq!(experiment.neuron.clutter, "average");
        assert_eq!(experiment.seed(Some(9)), 9);

        let mut engine = experiment.engine(None).unwrap();
        let results = engine.run().unwrap();
        assert!(results.rates.iter().all(|step| step == &vec![0.0]));
    }

    #[test]
    fn test_unknown_profile_is_reported() {
        let experiment: Experiment = toml::from_str("[neuron]\nposition = \"cauchy\"\n").unwrap();
        let err = experiment.validate().unwrap_err().to_string();
        assert!(err.contains("cauchy") && err.contains("none, gaussian"), "{err}");
    }

    #[test]
    fn test_zero_neurons_rejected() {
        let experiment: Experiment = toml::from_str("[simulation]\nneurons = 0\n").unwrap();
        assert!(experiment.validate().is_err());
    }
}
