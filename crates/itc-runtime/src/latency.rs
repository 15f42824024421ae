//! Rate-dependent response latency
//!
//! Stronger responses arrive sooner: the latency decays exponentially from
//! `max_latency` towards `min_latency` as the early static rate grows.

use core::fmt;

use rand::Rng;
use rand_distr::{Distribution, Gamma};

use crate::error::*;

/// Default ceiling on the maximum latency (s)
pub const DEFAULT_MAX_LATENCY: f64 = 0.25;

/// Latency parameters of a single neuron
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatencyParams {
    /// Latency for arbitrarily strong responses (s)
    pub min_latency: f64,
    /// Latency for a zero-rate response (s)
    pub max_latency: f64,
    /// Rate scale of the exponential decay (spikes/s)
    pub tau_latency: f64,
}

impl LatencyParams {
    /// Create new latency parameters with validation
    pub fn new(min_latency: f64, max_latency: f64, tau_latency: f64) -> Result<Self> {
        if !(min_latency >= 0.0) {
            return Err(RuntimeError::invalid_parameter(
                "min_latency",
                min_latency.to_string(),
                ">= 0.0",
            ));
        }
        if !(max_latency >= min_latency) || !max_latency.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "max_latency",
                format!("{} (with min_latency={})", max_latency, min_latency),
                ">= min_latency",
            ));
        }
        if !(tau_latency > 0.0) || !tau_latency.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "tau_latency",
                tau_latency.to_string(),
                "> 0.0",
            ));
        }

        Ok(Self {
            min_latency,
            max_latency,
            tau_latency,
        })
    }

    /// Draw per-neuron latency parameters, with `max_latency` capped at `ceiling`
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, ceiling: f64) -> Result<Self> {
        let spread = Gamma::new(5.0_f64, 0.02)
            .map_err(|e| RuntimeError::numerical_error(format!("latency spread: {}", e)))?;
        let tau = Gamma::new(2.0_f64, 20.0)
            .map_err(|e| RuntimeError::numerical_error(format!("latency tau: {}", e)))?;

        let min_latency = (0.09 + 0.01 * rng.gen::<f64>()).min(ceiling);
        let max_latency = ceiling.min(min_latency + spread.sample(rng));
        let tau_latency = tau.sample(rng).max(f64::MIN_POSITIVE);

        Self::new(min_latency, max_latency, tau_latency)
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        Self::new(self.min_latency, self.max_latency, self.tau_latency)?;
        Ok(())
    }

    /// Response latency (s) for a given early static rate
    #[inline]
    pub fn latency(&self, static_rate: f64) -> f64 {
        self.min_latency
            + (self.max_latency - self.min_latency) * (-static_rate / self.tau_latency).exp()
    }

    /// Latency in whole time steps, never exceeding `capacity`
    #[inline]
    pub fn latency_steps(&self, static_rate: f64, dt: f64, capacity: usize) -> usize {
        let steps = (self.latency(static_rate) / dt).round();
        if steps <= 0.0 {
            0
        } else {
            (steps as usize).min(capacity)
        }
    }

    /// `(rate, latency)` pairs over the given rates
    pub fn profile(&self, rates: impl IntoIterator<Item = f64>) -> Vec<(f64, f64)> {
        rates
            .into_iter()
            .map(|rate| (rate, self.latency(rate)))
            .collect()
    }
}

impl fmt::Display for LatencyParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "minimum latency = {:.4}", self.min_latency)?;
        writeln!(f, "maximum latency = {:.4}", self.max_latency)?;
        write!(f, "tau latency     = {:.4}", self.tau_latency)
    }
}
