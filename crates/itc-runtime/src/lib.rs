//! Firing-rate runtime for inferior temporal (IT) cortex neurons
//!
//! A neuron's rate is the product of an object preference and a set of
//! tolerance profiles (position, size, occlusion), combined across
//! simultaneously visible objects by a clutter profile. An optional
//! dual-phase dynamics profile turns that static rate into a time course
//! with a rate-dependent onset latency, a transient early response and a
//! sustained late response.

#![deny(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod dynamics;
pub mod error;
pub mod history;
pub mod ids;
pub mod latency;
pub mod lti;
pub mod neuron;
pub mod population;
pub mod profile;
pub mod scene;
pub mod simulation;

// Re-export essential types
pub use dynamics::{DynamicsConfig, DynamicsParams, PhaseOutput, TamuraDynamics};
pub use error::{Result, RuntimeError};
pub use history::RateHistory;
pub use ids::{NeuronId, Spike};
pub use latency::LatencyParams;
pub use neuron::{Neuron, NeuronConfig, ProfileKinds};
pub use population::{Population, PopulationBuilder};
pub use profile::{
    ClutterKind, ClutterProfile, DynamicsKind, OcclusionKind, OcclusionProfile, PositionKind,
    PositionProfile, Selectivity, SizeKind, SizeProfile,
};
pub use scene::SceneObject;
pub use simulation::{
    SimulationEngine, SimulationParams, SimulationResult, StimulusEpoch, StimulusSchedule,
};

/// Default simulation time step (5 ms)
pub const DEFAULT_TIMESTEP_S: f64 = 0.005;
