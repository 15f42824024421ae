//! Occlusion tolerance
//!
//! Responses to partially occluded objects mix two tuning curves: one over the
//! occlusion of the object's diagnostic parts and one over the rest. The mix
//! is weighted by the neuron's diagnosticity (the share of response variance
//! explained by diagnostic parts).

use core::fmt;

use crate::error::*;

/// Decreasing sigmoid `1 / (1 + exp(a (x - b)))` over occlusion in percent
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SigmoidParams {
    /// Slope
    pub a: f64,
    /// Occlusion percentage at half response
    pub b: f64,
}

impl SigmoidParams {
    /// Evaluate at `occlusion` percent
    #[inline]
    pub fn eval(&self, occlusion: f64) -> f64 {
        1.0 / (1.0 + (self.a * (occlusion - self.b)).exp())
    }
}

/// Parameters of the two-input sigmoid occlusion profile
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TwoInputSigmoidConfig {
    /// Weight of the diagnostic tuning curve, in `[0, 1]`
    pub diagnosticity: f64,
    /// Tuning over occlusion of diagnostic parts
    pub diagnostic: SigmoidParams,
    /// Tuning over occlusion of non-diagnostic parts
    pub nondiagnostic: SigmoidParams,
}

impl Default for TwoInputSigmoidConfig {
    fn default() -> Self {
        Self {
            diagnosticity: 0.6,
            diagnostic: SigmoidParams { a: 0.32, b: 70.0 },
            nondiagnostic: SigmoidParams { a: 0.1, b: 40.0 },
        }
    }
}

/// Two-input sigmoid occlusion tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoInputSigmoidOcclusion {
    config: TwoInputSigmoidConfig,
}

impl TwoInputSigmoidOcclusion {
    /// Create the profile with validation
    pub fn new(config: &TwoInputSigmoidConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&config.diagnosticity) {
            return Err(RuntimeError::invalid_parameter(
                "diagnosticity",
                config.diagnosticity.to_string(),
                "within [0.0, 1.0]",
            ));
        }
        let params = [
            ("diagnostic.a", config.diagnostic.a),
            ("diagnostic.b", config.diagnostic.b),
            ("nondiagnostic.a", config.nondiagnostic.a),
            ("nondiagnostic.b", config.nondiagnostic.b),
        ];
        for (name, value) in params {
            if !value.is_finite() {
                return Err(RuntimeError::invalid_parameter(name, value.to_string(), "finite"));
            }
        }

        Ok(Self { config: *config })
    }

    /// Response weight given the visible fractions of the non-diagnostic and diagnostic parts
    #[inline]
    pub fn firing_rate_modifier(&self, vis_nondiagnostic: f64, vis_diagnostic: f64) -> f64 {
        let occ_nd = 100.0 * (1.0 - vis_nondiagnostic.clamp(0.0, 1.0));
        let occ_d = 100.0 * (1.0 - vis_diagnostic.clamp(0.0, 1.0));
        let d = self.config.diagnosticity;
        d * self.config.diagnostic.eval(occ_d) + (1.0 - d) * self.config.nondiagnostic.eval(occ_nd)
    }
}

/// Occlusion tolerance of a neuron
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OcclusionProfile {
    /// Occlusion has no effect
    Complete,
    /// Weighted diagnostic / non-diagnostic sigmoids
    TwoInputSigmoid(TwoInputSigmoidOcclusion),
}

impl OcclusionProfile {
    /// Response weight for the given visibilities
    #[inline]
    pub fn firing_rate_modifier(&self, vis_nondiagnostic: f64, vis_diagnostic: f64) -> f64 {
        match self {
            Self::Complete => 1.0,
            Self::TwoInputSigmoid(p) => p.firing_rate_modifier(vis_nondiagnostic, vis_diagnostic),
        }
    }
}

impl fmt::Display for OcclusionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "Profile            = none"),
            Self::TwoInputSigmoid(p) => {
                let c = &p.config;
                writeln!(f, "Profile            = two_input_sigmoid")?;
                writeln!(f, "diagnosticity      = {:.4}", c.diagnosticity)?;
                writeln!(
                    f,
                    "diagnostic         = a {:.4}, b {:.4}",
                    c.diagnostic.a, c.diagnostic.b
                )?;
                write!(
                    f,
                    "non-diagnostic     = a {:.4}, b {:.4}",
                    c.nondiagnostic.a, c.nondiagnostic.b
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> OcclusionProfile {
        OcclusionProfile::TwoInputSigmoid(
            TwoInputSigmoidOcclusion::new(&TwoInputSigmoidConfig::default()).unwrap(),
        )
    }

    #[test]
    fn test_sigmoid_midpoint() {
        let s = SigmoidParams { a: 0.32, b: 70.0 };
        assert!((s.eval(70.0) - 0.5).abs() < 1e-12);
        assert!(s.eval(0.0) > 0.99);
        assert!(s.eval(100.0) < 0.01);
    }

    #[test]
    fn test_fully_visible_object_is_near_unity() {
        let m = profile().firing_rate_modifier(1.0, 1.0);
        assert!(m > 0.98 && m <= 1.0);
    }

    #[test]
    fn test_occlusion_reduces_response() {
        let p = profile();
        let visible = p.firing_rate_modifier(1.0, 1.0);
        let half = p.firing_rate_modifier(0.5, 0.5);
        let hidden = p.firing_rate_modifier(0.0, 0.0);
        assert!(visible > half && half > hidden);
    }

    #[test]
    fn test_diagnostic_parts_weigh_more() {
        let p = profile();
        // Hiding the diagnostic parts costs more than hiding the rest
        assert!(p.firing_rate_modifier(1.0, 0.0) < p.firing_rate_modifier(0.0, 1.0));
    }

    #[test]
    fn test_validation() {
        let bad = TwoInputSigmoidConfig {
            diagnosticity: 1.2,
            ..Default::default()
        };
        assert!(TwoInputSigmoidOcclusion::new(&bad).is_err());
        assert_eq!(OcclusionProfile::Complete.firing_rate_modifier(0.0, 0.0), 1.0);
    }
}
