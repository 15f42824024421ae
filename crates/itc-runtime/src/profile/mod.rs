//! Tolerance profiles and the closed set of profile kinds
//!
//! Each category has a kind enum parsed from its configuration name and a
//! profile enum holding the parameters. "Complete tolerance" (modifier 1) is
//! an explicit variant of every category that can be left unconfigured.

use core::fmt;
use core::str::FromStr;

use crate::error::*;

pub mod clutter;
pub mod occlusion;
pub mod position;
pub mod selectivity;
pub mod size;

pub use clutter::ClutterProfile;
pub use occlusion::{OcclusionProfile, SigmoidParams, TwoInputSigmoidConfig, TwoInputSigmoidOcclusion};
pub use position::{GaussianPosition, GaussianPositionConfig, PositionProfile};
pub use selectivity::Selectivity;
pub use size::{LogNormalSize, LogNormalSizeConfig, SizeProfile};

/// Case-insensitive name with `-` and spaces folded into `_`
fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Position tolerance kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionKind {
    /// No position dependence
    Complete,
    /// Gaussian receptive field
    Gaussian,
}

impl PositionKind {
    /// Accepted configuration names
    pub const ALLOWED: &'static [&'static str] = &["none", "gaussian"];
}

impl FromStr for PositionKind {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" | "complete" => Ok(Self::Complete),
            "gaussian" => Ok(Self::Gaussian),
            _ => Err(RuntimeError::unknown_profile("position", s, Self::ALLOWED)),
        }
    }
}

impl fmt::Display for PositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "none"),
            Self::Gaussian => write!(f, "gaussian"),
        }
    }
}

/// Size tolerance kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    /// No size dependence
    Complete,
    /// Log-normal tuning around a preferred size
    LogNormal,
}

impl SizeKind {
    /// Accepted configuration names
    pub const ALLOWED: &'static [&'static str] = &["none", "lognormal"];
}

impl FromStr for SizeKind {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" | "complete" => Ok(Self::Complete),
            "lognormal" | "log_normal" => Ok(Self::LogNormal),
            _ => Err(RuntimeError::unknown_profile("size", s, Self::ALLOWED)),
        }
    }
}

impl fmt::Display for SizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "none"),
            Self::LogNormal => write!(f, "lognormal"),
        }
    }
}

/// Occlusion tolerance kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcclusionKind {
    /// No occlusion dependence
    Complete,
    /// Weighted diagnostic / non-diagnostic sigmoids
    TwoInputSigmoid,
}

impl OcclusionKind {
    /// Accepted configuration names
    pub const ALLOWED: &'static [&'static str] = &["none", "two_input_sigmoid"];
}

impl FromStr for OcclusionKind {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" | "complete" => Ok(Self::Complete),
            "two_input_sigmoid" | "twoinputsigmoid" => Ok(Self::TwoInputSigmoid),
            _ => Err(RuntimeError::unknown_profile("occlusion", s, Self::ALLOWED)),
        }
    }
}

impl fmt::Display for OcclusionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "none"),
            Self::TwoInputSigmoid => write!(f, "two_input_sigmoid"),
        }
    }
}

/// Multi-object combination kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClutterKind {
    /// Position-weighted average of isolated responses
    Average,
}

impl ClutterKind {
    /// Accepted configuration names
    pub const ALLOWED: &'static [&'static str] = &["average"];
}

impl FromStr for ClutterKind {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "average" => Ok(Self::Average),
            _ => Err(RuntimeError::unknown_profile("clutter", s, Self::ALLOWED)),
        }
    }
}

impl fmt::Display for ClutterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Average => write!(f, "average"),
        }
    }
}

/// Temporal response kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicsKind {
    /// Static rate is reported directly
    Static,
    /// Early/late dual-phase dynamics with rate-dependent latency
    Tamura,
}

impl DynamicsKind {
    /// Accepted configuration names
    pub const ALLOWED: &'static [&'static str] = &["none", "tamura"];
}

impl FromStr for DynamicsKind {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" | "static" => Ok(Self::Static),
            "tamura" => Ok(Self::Tamura),
            _ => Err(RuntimeError::unknown_profile("dynamics", s, Self::ALLOWED)),
        }
    }
}

impl fmt::Display for DynamicsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "none"),
            Self::Tamura => write!(f, "tamura"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!("Gaussian".parse::<PositionKind>().unwrap(), PositionKind::Gaussian);
        assert_eq!("LogNormal".parse::<SizeKind>().unwrap(), SizeKind::LogNormal);
        assert_eq!(
            "TwoInputSigmoid".parse::<OcclusionKind>().unwrap(),
            OcclusionKind::TwoInputSigmoid
        );
        assert_eq!(
            "two-input-sigmoid".parse::<OcclusionKind>().unwrap(),
            OcclusionKind::TwoInputSigmoid
        );
        assert_eq!("AVERAGE".parse::<ClutterKind>().unwrap(), ClutterKind::Average);
        assert_eq!("Tamura".parse::<DynamicsKind>().unwrap(), DynamicsKind::Tamura);
        assert_eq!("none".parse::<DynamicsKind>().unwrap(), DynamicsKind::Static);
    }

    #[test]
    fn test_unknown_kind_reports_allowed_set() {
        let err = "cauchy".parse::<PositionKind>().unwrap_err();
        match err {
            RuntimeError::UnknownProfile { category, value, allowed } => {
                assert_eq!(category, "position");
                assert_eq!(value, "cauchy");
                assert_eq!(allowed, PositionKind::ALLOWED);
            }
            other => panic!("unexpected error {:?}", other),
        }

        assert!("sum".parse::<ClutterKind>().is_err());
        assert!("gamma".parse::<SizeKind>().is_err());
        assert!("".parse::<OcclusionKind>().is_err());
        assert!("brincat".parse::<DynamicsKind>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [PositionKind::Complete, PositionKind::Gaussian] {
            assert_eq!(kind.to_string().parse::<PositionKind>().unwrap(), kind);
        }
        for kind in [SizeKind::Complete, SizeKind::LogNormal] {
            assert_eq!(kind.to_string().parse::<SizeKind>().unwrap(), kind);
        }
        for kind in [OcclusionKind::Complete, OcclusionKind::TwoInputSigmoid] {
            assert_eq!(kind.to_string().parse::<OcclusionKind>().unwrap(), kind);
        }
        for kind in [DynamicsKind::Static, DynamicsKind::Tamura] {
            assert_eq!(kind.to_string().parse::<DynamicsKind>().unwrap(), kind);
        }
    }
}
