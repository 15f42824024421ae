//! Identifier and event types shared across the runtime

use core::fmt;

/// Unique identifier for a neuron within a population
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeuronId(pub u32);

impl NeuronId {
    /// Create a new neuron ID
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Index into population storage
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A spike emitted by the Poisson approximation of a neuron's rate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spike {
    /// Emitting neuron
    pub neuron_id: NeuronId,
    /// Simulation step at which the spike occurred
    pub step: u64,
}

impl Spike {
    /// Create a new spike event
    pub const fn new(neuron_id: NeuronId, step: u64) -> Self {
        Self { neuron_id, step }
    }

    /// Spike time in seconds for a given time step
    pub fn time_s(&self, dt: f64) -> f64 {
        self.step as f64 * dt
    }
}
