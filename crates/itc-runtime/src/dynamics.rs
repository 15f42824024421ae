//! Early/late dual-phase response dynamics
//!
//! Model of IT spike-rate dynamics after Tamura & Tanaka (2001), Cerebral
//! Cortex 11(5):384-399:
//!
//! 1. Responses have an early (transient) and a late (sustained) phase.
//! 2. Selectivity is higher in the late phase than in the early phase.
//! 3. Peak early responses are typically higher than late responses.
//! 4. Response latency is negatively correlated with response magnitude.
//!
//! The early phase is a two-state band-pass system and the late phase a
//! one-state low-pass system. Inputs reach both systems through a per-neuron
//! history buffer, delayed by a rate-dependent latency; the late phase waits a
//! fixed number of extra steps on top of it.

use core::fmt;
use std::collections::BTreeMap;

use nalgebra::{Matrix1, Matrix2, RowVector1, RowVector2, Vector1, Vector2};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::{
    error::*,
    history::RateHistory,
    latency::{LatencyParams, DEFAULT_MAX_LATENCY},
    lti::LtiSystem,
    profile::selectivity::{early_preferences, rank, write_ranked},
};

/// Extra delay of the late phase relative to the early phase (steps)
pub const DEFAULT_LATE_EXTRA_DELAY_STEPS: usize = 10;

/// Output gain of the early (band-pass) phase
pub const DEFAULT_EARLY_GAIN: f64 = 1.5 / 0.39;

/// Output gain of the late (low-pass) phase
pub const DEFAULT_LATE_GAIN: f64 = 1.0;

/// Floor on both phase time constants (s)
pub const MIN_PHASE_TAU: f64 = 0.005;

/// Tunable constants of the dual-phase model
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DynamicsConfig {
    /// Ceiling on every neuron's maximum latency (s); sizes the history buffer
    pub max_latency: f64,
    /// Extra delay of the late phase (steps)
    pub late_extra_delay_steps: usize,
    /// Early-phase output gain
    pub early_gain: f64,
    /// Late-phase output gain
    pub late_gain: f64,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            max_latency: DEFAULT_MAX_LATENCY,
            late_extra_delay_steps: DEFAULT_LATE_EXTRA_DELAY_STEPS,
            early_gain: DEFAULT_EARLY_GAIN,
            late_gain: DEFAULT_LATE_GAIN,
        }
    }
}

impl DynamicsConfig {
    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.max_latency > 0.0) || !self.max_latency.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "max_latency",
                self.max_latency.to_string(),
                "> 0.0",
            ));
        }
        if !self.early_gain.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "early_gain",
                self.early_gain.to_string(),
                "finite",
            ));
        }
        if !self.late_gain.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "late_gain",
                self.late_gain.to_string(),
                "finite",
            ));
        }
        Ok(())
    }
}

/// Per-neuron parameters, drawn once at construction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicsParams {
    /// Rate-to-latency mapping
    pub latency: LatencyParams,
    /// Early-phase time constant (s)
    pub early_tau: f64,
    /// Late-phase time constant (s)
    pub late_tau: f64,
}

impl DynamicsParams {
    /// Create new dynamics parameters with validation
    pub fn new(latency: LatencyParams, early_tau: f64, late_tau: f64) -> Result<Self> {
        latency.validate()?;
        if !(early_tau > 0.0) || !early_tau.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "early_tau",
                early_tau.to_string(),
                "> 0.0",
            ));
        }
        if !(late_tau > 0.0) || !late_tau.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "late_tau",
                late_tau.to_string(),
                "> 0.0",
            ));
        }

        Ok(Self {
            latency,
            early_tau,
            late_tau,
        })
    }

    /// Draw parameters for one neuron
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, config: &DynamicsConfig) -> Result<Self> {
        let latency = LatencyParams::sample(rng, config.max_latency)?;
        let early_noise: f64 = rng.sample(StandardNormal);
        let late_noise: f64 = rng.sample(StandardNormal);

        let early_tau = (0.017 + 0.005 * early_noise).max(MIN_PHASE_TAU);
        let late_tau = (0.05 + 0.01 * late_noise).max(MIN_PHASE_TAU);

        Self::new(latency, early_tau, late_tau)
    }
}

/// Outputs of both phases for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseOutput {
    /// Early (band-pass) output; negative during overshoot
    pub early: f64,
    /// Late (low-pass) output
    pub late: f64,
}

impl PhaseOutput {
    /// Combined rate: the early phase clipped at zero plus the late phase
    #[inline]
    pub fn rate(&self) -> f64 {
        self.early.max(0.0) + self.late
    }
}

/// Dual-phase dynamics of one neuron
#[derive(Debug, Clone)]
pub struct TamuraDynamics {
    dt: f64,
    config: DynamicsConfig,
    params: DynamicsParams,
    early_objects: BTreeMap<String, f64>,
    early: LtiSystem<2>,
    late: LtiSystem<1>,
    early_x: Vector2<f64>,
    late_x: Vector1<f64>,
    history: RateHistory,
}

impl TamuraDynamics {
    /// Build dynamics for a neuron with the given late preference table, drawing parameters from `rng`
    pub fn new<R: Rng + ?Sized>(
        dt: f64,
        late_objects: &BTreeMap<String, f64>,
        config: DynamicsConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let params = DynamicsParams::sample(rng, &config)?;
        Self::with_params(dt, late_objects, config, params)
    }

    /// Build dynamics with explicit parameters
    pub fn with_params(
        dt: f64,
        late_objects: &BTreeMap<String, f64>,
        config: DynamicsConfig,
        params: DynamicsParams,
    ) -> Result<Self> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(RuntimeError::invalid_parameter("dt", dt.to_string(), "> 0.0"));
        }
        config.validate()?;
        if params.latency.max_latency > config.max_latency {
            return Err(RuntimeError::invalid_parameter(
                "latency.max_latency",
                format!("{} (with ceiling={})", params.latency.max_latency, config.max_latency),
                "<= max_latency ceiling",
            ));
        }
        if dt >= 2.0 * params.early_tau.min(params.late_tau) {
            log::warn!(
                "Time step {}s is unstable for phase time constants ({}s, {}s)",
                dt,
                params.early_tau,
                params.late_tau
            );
        }

        // Templates scaled by 1/tau per neuron; the early output goes negative on offset
        let early = LtiSystem::new(
            Matrix2::new(-1.0, 0.0, 1.0, -1.0),
            Vector2::new(1.0, 0.0),
            RowVector2::new(config.early_gain, -config.early_gain),
        )
        .with_time_constant(params.early_tau);
        let late = LtiSystem::new(
            Matrix1::new(-1.0),
            Vector1::new(1.0),
            RowVector1::new(config.late_gain),
        )
        .with_time_constant(params.late_tau);

        let history = RateHistory::new(RateHistory::capacity_for(
            config.max_latency,
            dt,
            config.late_extra_delay_steps,
        ));

        log::debug!(
            "Tamura dynamics: latency [{:.4}, {:.4}]s tau_latency {:.2}, early tau {:.4}s, late tau {:.4}s, {} history slots",
            params.latency.min_latency,
            params.latency.max_latency,
            params.latency.tau_latency,
            params.early_tau,
            params.late_tau,
            history.len()
        );

        Ok(Self {
            dt,
            config,
            params,
            early_objects: early_preferences(late_objects),
            early,
            late,
            early_x: Vector2::zeros(),
            late_x: Vector1::zeros(),
            history,
        })
    }

    /// Advance one time step and return the instantaneous rate.
    ///
    /// Must be called exactly once per simulation step, with zero rates when
    /// nothing is visible, to keep the history aligned in time.
    pub fn step(&mut self, early_rate: f64, late_rate: f64) -> Result<f64> {
        Ok(self.step_phases(early_rate, late_rate)?.rate())
    }

    /// Advance one time step and return both phase outputs
    pub fn step_phases(&mut self, early_rate: f64, late_rate: f64) -> Result<PhaseOutput> {
        ensure_finite("early rate", early_rate)?;
        ensure_finite("late rate", late_rate)?;

        self.history.record(early_rate, late_rate);

        let delay = self.latency_steps(early_rate);
        let early_u = self.history.early_delayed(delay);
        let late_u = self
            .history
            .late_delayed(delay + self.config.late_extra_delay_steps);

        self.history.advance();

        Ok(self.integrate(early_u, late_u))
    }

    fn integrate(&mut self, early_u: f64, late_u: f64) -> PhaseOutput {
        let (early_x, early_y) = self.early.step(self.dt, self.early_x, early_u);
        let (late_x, late_y) = self.late.step(self.dt, self.late_x, late_u);
        self.early_x = early_x;
        self.late_x = late_x;

        PhaseOutput {
            early: early_y,
            late: late_y,
        }
    }

    /// Response latency (s) for an early static rate
    pub fn latency(&self, early_rate: f64) -> f64 {
        self.params.latency.latency(early_rate)
    }

    /// Response latency in steps, clipped to the history capacity
    pub fn latency_steps(&self, early_rate: f64) -> usize {
        self.params
            .latency
            .latency_steps(early_rate, self.dt, self.history.max_delay())
    }

    /// Simulation time step (s)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Per-neuron parameters
    pub fn params(&self) -> &DynamicsParams {
        &self.params
    }

    /// Model constants
    pub fn config(&self) -> &DynamicsConfig {
        &self.config
    }

    /// Early-phase preference table
    pub fn early_objects(&self) -> &BTreeMap<String, f64> {
        &self.early_objects
    }

    /// Early-phase preference for an object, 0 when unknown
    pub fn early_preference(&self, object: &str) -> f64 {
        self.early_objects.get(object).copied().unwrap_or(0.0)
    }

    /// Objects by descending early preference
    pub fn ranked_early_objects(&self) -> Vec<(&str, f64)> {
        rank(&self.early_objects)
    }

    /// History buffer length (slots)
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Current early and late state vectors
    pub fn phase_state(&self) -> ([f64; 2], f64) {
        ([self.early_x[0], self.early_x[1]], self.late_x[0])
    }
}

impl fmt::Display for TamuraDynamics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile            = tamura")?;
        writeln!(f, "{}", self.params.latency)?;
        writeln!(f, "Early tau          = {:.4}", self.params.early_tau)?;
        writeln!(f, "Late tau           = {:.4}", self.params.late_tau)?;
        writeln!(f, "Memory size        = {}", self.history.len())?;
        write!(f, "Early Object Preferences =")?;
        write_ranked(f, &self.ranked_early_objects())
    }
}
