//! Size tolerance
//!
//! Log-normal tuning around a preferred size. The tuning bandwidth follows the
//! receptive field spread, so a log-normal size profile can only be built on
//! top of a Gaussian position profile.

use core::fmt;

use crate::error::*;

/// Parameters of log-normal size tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogNormalSizeConfig {
    /// Preferred stimulus size (radians)
    pub pref_size: f64,
    /// Full width at half maximum in octaves; derived from the position tolerance when unset
    pub size_bandwidth: Option<f64>,
    /// Octaves of bandwidth per radian of position tolerance
    pub bandwidth_slope: f64,
    /// Bandwidth of a neuron with a point receptive field (octaves)
    pub bandwidth_intercept: f64,
    /// Lower bound on the derived bandwidth (octaves)
    pub min_bandwidth: f64,
}

impl Default for LogNormalSizeConfig {
    fn default() -> Self {
        Self {
            pref_size: 0.2,
            size_bandwidth: None,
            bandwidth_slope: 2.0,
            bandwidth_intercept: 1.0,
            min_bandwidth: 0.5,
        }
    }
}

/// Log-normal size tuning curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormalSize {
    pref_size: f64,
    size_bandwidth: f64,
    log_sigma: f64,
}

impl LogNormalSize {
    /// Build size tuning for a neuron with the given receptive field spread
    pub fn new(config: &LogNormalSizeConfig, position_tolerance: f64) -> Result<Self> {
        if !(config.pref_size > 0.0) || !config.pref_size.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "pref_size",
                config.pref_size.to_string(),
                "> 0.0",
            ));
        }

        let size_bandwidth = match config.size_bandwidth {
            Some(bw) => bw,
            None => (config.bandwidth_slope * position_tolerance + config.bandwidth_intercept)
                .max(config.min_bandwidth),
        };
        if !(size_bandwidth > 0.0) || !size_bandwidth.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "size_bandwidth",
                size_bandwidth.to_string(),
                "> 0.0",
            ));
        }

        // FWHM in natural-log units over the Gaussian FWHM factor 2 sqrt(2 ln 2)
        let fwhm = size_bandwidth * std::f64::consts::LN_2;
        let log_sigma = fwhm / (2.0 * (2.0 * std::f64::consts::LN_2).sqrt());

        Ok(Self {
            pref_size: config.pref_size,
            size_bandwidth,
            log_sigma,
        })
    }

    /// Preferred size (radians)
    pub fn pref_size(&self) -> f64 {
        self.pref_size
    }

    /// Bandwidth in octaves
    pub fn size_bandwidth(&self) -> f64 {
        self.size_bandwidth
    }

    /// Response weight for an object of the given size; 0 for non-positive sizes
    #[inline]
    pub fn firing_rate_modifier(&self, size: f64) -> f64 {
        if size <= 0.0 {
            return 0.0;
        }
        let d = (size / self.pref_size).ln();
        (-(d * d) / (2.0 * self.log_sigma * self.log_sigma)).exp()
    }
}

/// Size tolerance of a neuron
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeProfile {
    /// Every size weighted 1
    Complete,
    /// Log-normal tuning
    LogNormal(LogNormalSize),
}

impl SizeProfile {
    /// Response weight for an object of the given size
    #[inline]
    pub fn firing_rate_modifier(&self, size: f64) -> f64 {
        match self {
            Self::Complete => 1.0,
            Self::LogNormal(tuning) => tuning.firing_rate_modifier(size),
        }
    }

    /// Preferred size, if the neuron is size tuned
    pub fn pref_size(&self) -> Option<f64> {
        match self {
            Self::Complete => None,
            Self::LogNormal(tuning) => Some(tuning.pref_size),
        }
    }
}

impl fmt::Display for SizeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "Profile            = none"),
            Self::LogNormal(tuning) => {
                writeln!(f, "Profile            = lognormal")?;
                writeln!(f, "preferred size     = {:.4}", tuning.pref_size)?;
                write!(f, "size bandwidth     = {:.4} octaves", tuning.size_bandwidth)
            }
        }
    }
}
