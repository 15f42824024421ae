//! Position tolerance

use core::fmt;

use crate::error::*;

/// Parameters of a Gaussian receptive field
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaussianPositionConfig {
    /// Receptive field centre (x, y) in radians of visual angle
    pub rf_center: [f64; 2],
    /// Standard deviation of the receptive field (radians)
    pub position_tolerance: f64,
}

impl Default for GaussianPositionConfig {
    fn default() -> Self {
        Self {
            rf_center: [0.0, 0.0],
            position_tolerance: 0.3,
        }
    }
}

/// Gaussian receptive field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianPosition {
    rf_center: [f64; 2],
    position_tolerance: f64,
}

impl GaussianPosition {
    /// Create a Gaussian receptive field with validation
    pub fn new(config: &GaussianPositionConfig) -> Result<Self> {
        if !config.rf_center.iter().all(|c| c.is_finite()) {
            return Err(RuntimeError::invalid_parameter(
                "rf_center",
                format!("{:?}", config.rf_center),
                "finite coordinates",
            ));
        }
        if !(config.position_tolerance > 0.0) || !config.position_tolerance.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "position_tolerance",
                config.position_tolerance.to_string(),
                "> 0.0",
            ));
        }

        Ok(Self {
            rf_center: config.rf_center,
            position_tolerance: config.position_tolerance,
        })
    }

    /// Response weight at (x, y)
    #[inline]
    pub fn firing_rate_modifier(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.rf_center[0];
        let dy = y - self.rf_center[1];
        let var = self.position_tolerance * self.position_tolerance;
        (-(dx * dx + dy * dy) / (2.0 * var)).exp()
    }
}

/// Position tolerance of a neuron
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionProfile {
    /// Every position weighted 1
    Complete,
    /// Gaussian receptive field
    Gaussian(GaussianPosition),
}

impl PositionProfile {
    /// Response weight for an object at (x, y)
    #[inline]
    pub fn firing_rate_modifier(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::Complete => 1.0,
            Self::Gaussian(rf) => rf.firing_rate_modifier(x, y),
        }
    }

    /// Receptive field centre; the origin under complete tolerance
    pub fn rf_center(&self) -> [f64; 2] {
        match self {
            Self::Complete => [0.0, 0.0],
            Self::Gaussian(rf) => rf.rf_center,
        }
    }

    /// Receptive field spread, if the neuron has one
    pub fn position_tolerance(&self) -> Option<f64> {
        match self {
            Self::Complete => None,
            Self::Gaussian(rf) => Some(rf.position_tolerance),
        }
    }
}

impl fmt::Display for PositionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "Profile            = none"),
            Self::Gaussian(rf) => {
                writeln!(f, "Profile            = gaussian")?;
                writeln!(
                    f,
                    "RF center          = ({:.4}, {:.4})",
                    rf.rf_center[0], rf.rf_center[1]
                )?;
                write!(f, "position tolerance = {:.4}", rf.position_tolerance)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaussian() -> PositionProfile {
        PositionProfile::Gaussian(
            GaussianPosition::new(&GaussianPositionConfig {
                rf_center: [0.1, -0.2],
                position_tolerance: 0.5,
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_complete_tolerance() {
        let p = PositionProfile::Complete;
        assert_eq!(p.firing_rate_modifier(10.0, -3.0), 1.0);
        assert_eq!(p.position_tolerance(), None);
    }

    #[test]
    fn test_gaussian_peak_and_falloff() {
        let p = gaussian();
        assert!((p.firing_rate_modifier(0.1, -0.2) - 1.0).abs() < 1e-12);

        // One standard deviation away
        let one_sd = p.firing_rate_modifier(0.6, -0.2);
        assert!((one_sd - (-0.5f64).exp()).abs() < 1e-12);

        let far = p.firing_rate_modifier(5.0, 5.0);
        assert!(far < one_sd && far >= 0.0);
        assert_eq!(p.position_tolerance(), Some(0.5));
    }

    #[test]
    fn test_validation() {
        let bad = GaussianPositionConfig {
            position_tolerance: 0.0,
            ..Default::default()
        };
        assert!(GaussianPosition::new(&bad).is_err());

        let bad = GaussianPositionConfig {
            rf_center: [f64::NAN, 0.0],
            ..Default::default()
        };
        assert!(GaussianPosition::new(&bad).is_err());
    }
}
