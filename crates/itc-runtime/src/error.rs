//! Error types for the IT neuron runtime

use thiserror::Error;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that can occur in the IT neuron runtime
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Invalid neuron or simulation configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Reason for invalid configuration
        reason: String,
    },

    /// Profile name not in the closed set of its category
    #[error("Invalid {category} profile: {value} (allowed: {})", allowed.join(", "))]
    UnknownProfile {
        /// Profile category (position, size, ...)
        category: &'static str,
        /// Offending name
        value: String,
        /// Accepted names
        allowed: &'static [&'static str],
    },

    /// A profile requires another profile that is not configured
    #[error("{profile} profile requires a {requires} profile")]
    MissingDependency {
        /// Profile being constructed
        profile: String,
        /// Profile it depends on
        requires: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter {parameter}: {value} (expected {constraint})")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Neuron not found
    #[error("Neuron {neuron_id} not found")]
    NeuronNotFound {
        /// Neuron ID that was not found
        neuron_id: u32,
    },

    /// Numerical computation error
    #[error("Numerical error: {reason}")]
    NumericalError {
        /// Reason for numerical error
        reason: String,
    },
}

impl RuntimeError {
    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create an unknown profile error
    pub fn unknown_profile(
        category: &'static str,
        value: impl Into<String>,
        allowed: &'static [&'static str],
    ) -> Self {
        Self::UnknownProfile {
            category,
            value: value.into(),
            allowed,
        }
    }

    /// Create a missing dependency error
    pub fn missing_dependency(profile: impl Into<String>, requires: impl Into<String>) -> Self {
        Self::MissingDependency {
            profile: profile.into(),
            requires: requires.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Create a numerical error
    pub fn numerical_error(reason: impl Into<String>) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }

    /// Whether this error was raised while building a neuron
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. }
                | Self::UnknownProfile { .. }
                | Self::MissingDependency { .. }
                | Self::InvalidParameter { .. }
        )
    }
}

/// Reject non-finite values with a descriptive numerical error
pub(crate) fn ensure_finite(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RuntimeError::numerical_error(format!(
            "{} is not finite ({})",
            what, value
        )))
    }
}
