//! Clutter: combination of simultaneously visible objects into one response

use core::fmt;

/// Multi-object combination policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClutterProfile {
    /// Average of isolated responses, weighted by each object's position weight
    #[default]
    Average,
}

impl ClutterProfile {
    /// Joint rate from per-object isolated rates and position weights.
    ///
    /// Returns 0 for an empty scene or when no object carries positive weight.
    pub fn firing_rate_modifier(&self, isolated_rates: &[f64], position_weights: &[f64]) -> f64 {
        debug_assert_eq!(isolated_rates.len(), position_weights.len());
        match self {
            Self::Average => {
                let total: f64 = position_weights.iter().sum();
                if !(total > 0.0) {
                    return 0.0;
                }
                isolated_rates
                    .iter()
                    .zip(position_weights)
                    .map(|(rate, weight)| rate * (weight / total))
                    .sum()
            }
        }
    }
}

impl fmt::Display for ClutterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Average => write!(f, "Profile            = average"),
        }
    }
}
