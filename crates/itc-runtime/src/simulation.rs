//! Simulation engine: stimulus schedules, rate traces and Poisson spikes

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{error::*, neuron::Neuron, population::Population, scene::SceneObject, NeuronId, Spike};

/// Simulation parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParams {
    /// Number of time steps
    pub steps: usize,
    /// Draw Poisson spikes from the rates
    pub record_spikes: bool,
    /// Seed for neuron parameters and spike draws
    pub random_seed: Option<u64>,
    /// Maximum spikes to record
    pub max_recorded_spikes: Option<usize>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            steps: 200,
            record_spikes: false,
            random_seed: None,
            max_recorded_spikes: Some(1_000_000),
        }
    }
}

impl SimulationParams {
    /// Create new simulation parameters with validation
    pub fn new(steps: usize) -> Result<Self> {
        if steps == 0 {
            return Err(RuntimeError::invalid_parameter("steps", steps.to_string(), "> 0"));
        }
        Ok(Self {
            steps,
            ..Default::default()
        })
    }

    /// Enable Poisson spike generation
    pub fn with_spikes(mut self, enabled: bool) -> Self {
        self.record_spikes = enabled;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Set maximum spike recording limit
    pub fn with_spike_limit(mut self, limit: usize) -> Self {
        self.max_recorded_spikes = Some(limit);
        self
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        Self::new(self.steps)?;
        Ok(())
    }
}

/// Objects shown over a half-open range of steps
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StimulusEpoch {
    /// First step the objects are visible
    pub start_step: usize,
    /// First step the objects are gone
    pub stop_step: usize,
    /// Objects visible during the epoch
    pub objects: Vec<SceneObject>,
}

impl StimulusEpoch {
    /// Create an epoch with validation
    pub fn new(start_step: usize, stop_step: usize, objects: Vec<SceneObject>) -> Result<Self> {
        let epoch = Self {
            start_step,
            stop_step,
            objects,
        };
        epoch.validate()?;
        Ok(epoch)
    }

    /// Check the step range and object attributes
    pub fn validate(&self) -> Result<()> {
        if self.stop_step <= self.start_step {
            return Err(RuntimeError::invalid_parameter(
                "stop_step",
                self.stop_step.to_string(),
                format!("> start_step ({})", self.start_step),
            ));
        }
        for object in &self.objects {
            object.validate()?;
        }
        Ok(())
    }

    /// Whether the epoch covers `step`
    pub fn is_active(&self, step: usize) -> bool {
        (self.start_step..self.stop_step).contains(&step)
    }
}

/// Time-varying scene built from possibly overlapping epochs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StimulusSchedule {
    epochs: Vec<StimulusEpoch>,
}

impl StimulusSchedule {
    /// Empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an epoch
    pub fn add(&mut self, epoch: StimulusEpoch) -> Result<()> {
        epoch.validate()?;
        self.epochs.push(epoch);
        Ok(())
    }

    /// Epochs in insertion order
    pub fn epochs(&self) -> &[StimulusEpoch] {
        &self.epochs
    }

    /// Objects visible at `step`: the union of every active epoch
    pub fn scene_at(&self, step: usize) -> Vec<SceneObject> {
        self.epochs
            .iter()
            .filter(|epoch| epoch.is_active(step))
            .flat_map(|epoch| epoch.objects.iter().cloned())
            .collect()
    }
}

/// Simulation results
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Time step (s)
    pub dt: f64,
    /// Firing rates per step, one entry per neuron
    pub rates: Vec<Vec<f64>>,
    /// Recorded spikes
    pub spikes: Vec<Spike>,
    /// Number of steps executed
    pub steps_executed: usize,
}

impl SimulationResult {
    /// Create a new empty result
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            rates: Vec::new(),
            spikes: Vec::new(),
            steps_executed: 0,
        }
    }

    /// Rate trace of one neuron
    pub fn rates_for_neuron(&self, neuron_id: NeuronId) -> Vec<f64> {
        self.rates
            .iter()
            .filter_map(|step| step.get(neuron_id.index()).copied())
            .collect()
    }

    /// Mean rate of one neuron over the run (spikes/s)
    pub fn mean_rate(&self, neuron_id: NeuronId) -> f64 {
        let trace = self.rates_for_neuron(neuron_id);
        if trace.is_empty() {
            return 0.0;
        }
        trace.iter().sum::<f64>() / trace.len() as f64
    }

    /// Peak rate of one neuron over the run (spikes/s)
    pub fn peak_rate(&self, neuron_id: NeuronId) -> f64 {
        self.rates_for_neuron(neuron_id)
            .into_iter()
            .fold(0.0, f64::max)
    }

    /// Get spikes for a specific neuron
    pub fn spikes_for_neuron(&self, neuron_id: NeuronId) -> Vec<&Spike> {
        self.spikes
            .iter()
            .filter(|spike| spike.neuron_id == neuron_id)
            .collect()
    }

    /// Simulated time (s)
    pub fn duration_s(&self) -> f64 {
        self.steps_executed as f64 * self.dt
    }

    /// Export spikes to simple format (step, neuron_id)
    pub fn export_spikes(&self) -> Vec<(u64, u32)> {
        self.spikes
            .iter()
            .map(|spike| (spike.step, spike.neuron_id.raw()))
            .collect()
    }
}

/// One Bernoulli draw per rate: a spike when `U < dt * rate`
pub fn poisson_spikes<R: Rng + ?Sized>(dt: f64, rates: &[f64], rng: &mut R) -> Vec<bool> {
    rates
        .iter()
        .map(|rate| rng.gen::<f64>() < dt * rate)
        .collect()
}

/// Rate trace of a neuron shown its ideal stimulus for the first half of `steps`
/// and an empty scene for the rest
pub fn preferred_stimulus_trace(neuron: &mut Neuron, steps: usize) -> Result<Vec<f64>> {
    let ideal = neuron.preferred_stimulus().ok_or_else(|| {
        RuntimeError::invalid_config(format!("neuron {} has no preferred objects", neuron.id()))
    })?;
    let scene = [ideal];
    let onset_off = steps / 2;

    (0..steps)
        .map(|step| {
            if step < onset_off {
                neuron.firing_rate(&scene)
            } else {
                neuron.firing_rate(&[])
            }
        })
        .collect()
}

/// Simulation engine.
///
/// Neuron state carries over between runs; build a new population to start afresh.
#[derive(Debug)]
pub struct SimulationEngine {
    population: Population,
    params: SimulationParams,
    schedule: StimulusSchedule,
    rng: StdRng,
}

impl SimulationEngine {
    /// Create a new simulation engine
    pub fn new(population: Population, params: SimulationParams) -> Result<Self> {
        params.validate()?;
        let rng = StdRng::seed_from_u64(params.random_seed.unwrap_or(population.seed()));

        Ok(Self {
            population,
            params,
            schedule: StimulusSchedule::new(),
            rng,
        })
    }

    /// Add an input stimulus
    pub fn add_stimulus(&mut self, epoch: StimulusEpoch) -> Result<()> {
        self.schedule.add(epoch)
    }

    /// Replace the stimulus schedule
    pub fn with_schedule(mut self, schedule: StimulusSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Run the complete simulation
    pub fn run(&mut self) -> Result<SimulationResult> {
        self.run_with_progress(|_| {})
    }

    /// Run the complete simulation, reporting each finished step
    pub fn run_with_progress(&mut self, mut on_step: impl FnMut(usize)) -> Result<SimulationResult> {
        let num_steps = self.params.steps;
        let dt = self.population.dt();
        log::info!(
            "Starting simulation: {} neurons, {} steps of {} s",
            self.population.len(),
            num_steps,
            dt
        );

        let mut results = SimulationResult::new(dt);
        results.rates.reserve(num_steps);
        let mut spike_limit_hit = false;

        for step in 0..num_steps {
            let scene = self.schedule.scene_at(step);
            let rates = self.population.step(&scene)?;

            if self.params.record_spikes && !spike_limit_hit {
                let fired = poisson_spikes(dt, &rates, &mut self.rng);
                for (index, spiked) in fired.into_iter().enumerate() {
                    if spiked {
                        results
                            .spikes
                            .push(Spike::new(NeuronId::new(index as u32), step as u64));
                    }
                }

                if let Some(max_spikes) = self.params.max_recorded_spikes {
                    if results.spikes.len() >= max_spikes {
                        log::warn!("Spike recording limit reached: {}", max_spikes);
                        results.spikes.truncate(max_spikes);
                        spike_limit_hit = true;
                    }
                }
            }

            results.rates.push(rates);
            results.steps_executed = step + 1;
            on_step(step);

            if step % (num_steps / 10).max(1) == 0 {
                let progress = (step as f64 / num_steps as f64) * 100.0;
                log::debug!("Simulation progress: {:.1}%", progress);
            }
        }

        log::info!(
            "Simulation completed: {} spikes in {} steps",
            results.spikes.len(),
            results.steps_executed
        );

        Ok(results)
    }

    /// Get reference to the population
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Get mutable reference to the population
    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    /// Get simulation parameters
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Get the stimulus schedule
    pub fn schedule(&self) -> &StimulusSchedule {
        &self.schedule
    }
}
