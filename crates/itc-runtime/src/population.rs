//! Population of independently parameterized IT neurons sharing one scene

use crate::{
    error::*,
    neuron::{Neuron, NeuronConfig},
    scene::SceneObject,
    NeuronId,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Seed of one neuron's generator, derived from the population seed
pub fn neuron_seed(base: u64, id: NeuronId) -> u64 {
    // splitmix64 finalizer so neighbouring IDs get unrelated streams
    let mut z = base.wrapping_add((u64::from(id.raw()) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A population of IT neurons
#[derive(Debug, Clone)]
pub struct Population {
    neurons: Vec<Neuron>,
    dt: f64,
    seed: u64,
}

impl Population {
    /// Build `size` neurons from one configuration, each with its own random draw
    pub fn new(size: u32, config: &NeuronConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        let neurons = (0..size)
            .map(|raw| {
                let id = NeuronId::new(raw);
                Neuron::new(id, config, neuron_seed(seed, id))
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!("Created population of {} neurons (seed {})", neurons.len(), seed);

        Ok(Self {
            neurons,
            dt: config.dt,
            seed,
        })
    }

    /// Number of neurons
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    /// Whether the population has no neurons
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Simulation time step (s)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Seed the neurons were drawn from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// All neurons, ordered by ID
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Neuron IDs
    pub fn neuron_ids(&self) -> Vec<NeuronId> {
        self.neurons.iter().map(Neuron::id).collect()
    }

    /// Look up a neuron
    pub fn neuron(&self, id: NeuronId) -> Result<&Neuron> {
        self.neurons
            .get(id.index())
            .ok_or(RuntimeError::NeuronNotFound { neuron_id: id.raw() })
    }

    /// Look up a neuron mutably
    pub fn neuron_mut(&mut self, id: NeuronId) -> Result<&mut Neuron> {
        self.neurons
            .get_mut(id.index())
            .ok_or(RuntimeError::NeuronNotFound { neuron_id: id.raw() })
    }

    /// Advance every neuron by one step on the same scene; rates are ordered by neuron ID
    pub fn step(&mut self, scene: &[SceneObject]) -> Result<Vec<f64>> {
        #[cfg(feature = "parallel")]
        {
            self.neurons
                .par_iter_mut()
                .map(|neuron| neuron.firing_rate(scene))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.neurons
                .iter_mut()
                .map(|neuron| neuron.firing_rate(scene))
                .collect()
        }
    }
}

/// Builder for populations
#[derive(Debug, Clone, Default)]
pub struct PopulationBuilder {
    config: NeuronConfig,
    size: u32,
    seed: u64,
}

impl PopulationBuilder {
    /// Create a new builder for an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the neuron configuration
    pub fn with_config(mut self, config: NeuronConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of neurons
    pub fn with_neurons(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the population seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the population
    pub fn build(self) -> Result<Population> {
        Population::new(self.size, &self.config, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NeuronConfig {
        NeuronConfig::with_preferences([("A", 0.5), ("B", 0.2)]).dynamics("tamura")
    }

    #[test]
    fn test_population_creation() {
        let population = PopulationBuilder::new()
            .with_config(config())
            .with_neurons(8)
            .with_seed(7)
            .build()
            .unwrap();

        assert_eq!(population.len(), 8);
        assert!(!population.is_empty());
        assert_eq!(population.dt(), 0.005);
        assert_eq!(population.neuron_ids()[3], NeuronId::new(3));
    }

    #[test]
    fn test_neurons_are_individually_parameterized() {
        let population = Population::new(4, &config(), 11).unwrap();
        let a = population.neuron(NeuronId::new(0)).unwrap().dynamics().unwrap().params();
        let b = population.neuron(NeuronId::new(1)).unwrap().dynamics().unwrap().params();
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = Population::new(4, &config(), 3).unwrap();
        let b = Population::new(4, &config(), 3).unwrap();
        for (x, y) in a.neurons().iter().zip(b.neurons()) {
            assert_eq!(x.dynamics().unwrap().params(), y.dynamics().unwrap().params());
        }
    }

    #[test]
    fn test_same_seed_same_traces() {
        let mut a = Population::new(16, &config(), 5).unwrap();
        let mut b = Population::new(16, &config(), 5).unwrap();
        let scene = [SceneObject::new("A", 0.0, 0.0, 1.0)];
        for step in 0..150 {
            let visible: &[SceneObject] = if step < 80 { &scene } else { &[] };
            assert_eq!(a.step(visible).unwrap(), b.step(visible).unwrap());
        }
    }

    #[test]
    fn test_missing_neuron() {
        let mut population = Population::new(2, &config(), 0).unwrap();
        assert!(matches!(
            population.neuron(NeuronId::new(2)),
            Err(RuntimeError::NeuronNotFound { neuron_id: 2 })
        ));
        assert!(population.neuron_mut(NeuronId::new(5)).is_err());
    }

    #[test]
    fn test_step_returns_rate_per_neuron() {
        let static_config = NeuronConfig::with_preferences([("A", 0.5)]);
        let mut population = Population::new(3, &static_config, 0).unwrap();
        let rates = population
            .step(&[SceneObject::new("A", 0.0, 0.0, 1.0)])
            .unwrap();
        assert_eq!(rates, vec![50.0; 3]);
        assert_eq!(population.step(&[]).unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad = config().occlusion("paper_bag");
        assert!(Population::new(2, &bad, 0).is_err());
    }

    #[test]
    fn test_neuron_seeds_differ() {
        assert_ne!(neuron_seed(0, NeuronId::new(0)), neuron_seed(0, NeuronId::new(1)));
        assert_ne!(neuron_seed(0, NeuronId::new(0)), neuron_seed(1, NeuronId::new(0)));
    }
}
