//! IT neuron: composition of tolerance profiles into one firing rate

use core::fmt;
use std::collections::BTreeMap;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    dynamics::{DynamicsConfig, TamuraDynamics},
    error::*,
    profile::{
        selectivity::DEFAULT_MAX_FIRE_RATE, ClutterKind, ClutterProfile, DynamicsKind,
        GaussianPosition, GaussianPositionConfig, LogNormalSize, LogNormalSizeConfig,
        OcclusionKind, OcclusionProfile, PositionKind, PositionProfile, Selectivity, SizeKind,
        SizeProfile, TwoInputSigmoidConfig, TwoInputSigmoidOcclusion,
    },
    scene::SceneObject,
    NeuronId, DEFAULT_TIMESTEP_S,
};

/// Size of the preferred stimulus when the neuron is not size tuned
const UNTUNED_STIMULUS_SIZE: f64 = 1.0;

/// Configuration of an IT neuron.
///
/// Profiles are selected by name; parameters for every profile kind are
/// carried alongside and only read for the kinds actually selected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NeuronConfig {
    /// Simulation time step (s)
    pub dt: f64,
    /// Maximum firing rate (spikes/s)
    pub max_fire_rate: f64,
    /// Normalized preference per object, in `[0, 1]`
    pub preferences: BTreeMap<String, f64>,
    /// Dynamics profile name (`none`, `tamura`)
    pub dynamics: String,
    /// Position profile name (`none`, `gaussian`)
    pub position: String,
    /// Size profile name (`none`, `lognormal`)
    pub size: String,
    /// Occlusion profile name (`none`, `two_input_sigmoid`)
    pub occlusion: String,
    /// Clutter profile name (`average`)
    pub clutter: String,
    /// Constants of the dual-phase dynamics
    pub tamura: DynamicsConfig,
    /// Gaussian receptive field parameters
    pub gaussian_position: GaussianPositionConfig,
    /// Log-normal size tuning parameters
    pub lognormal_size: LogNormalSizeConfig,
    /// Two-input sigmoid occlusion parameters
    pub two_input_sigmoid: TwoInputSigmoidConfig,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_TIMESTEP_S,
            max_fire_rate: DEFAULT_MAX_FIRE_RATE,
            preferences: BTreeMap::new(),
            dynamics: "none".to_string(),
            position: "none".to_string(),
            size: "none".to_string(),
            occlusion: "none".to_string(),
            clutter: "average".to_string(),
            tamura: DynamicsConfig::default(),
            gaussian_position: GaussianPositionConfig::default(),
            lognormal_size: LogNormalSizeConfig::default(),
            two_input_sigmoid: TwoInputSigmoidConfig::default(),
        }
    }
}

/// Profile kinds resolved from a [`NeuronConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileKinds {
    /// Temporal response
    pub dynamics: DynamicsKind,
    /// Position tolerance
    pub position: PositionKind,
    /// Size tolerance
    pub size: SizeKind,
    /// Occlusion tolerance
    pub occlusion: OcclusionKind,
    /// Clutter combination
    pub clutter: ClutterKind,
}

impl NeuronConfig {
    /// Configuration with a preference table and every tolerance complete
    pub fn with_preferences<K: Into<String>>(preferences: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            preferences: preferences.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Default::default()
        }
    }

    /// Select the dynamics profile by name
    pub fn dynamics(mut self, name: impl Into<String>) -> Self {
        self.dynamics = name.into();
        self
    }

    /// Select the position profile by name
    pub fn position(mut self, name: impl Into<String>) -> Self {
        self.position = name.into();
        self
    }

    /// Select the size profile by name
    pub fn size(mut self, name: impl Into<String>) -> Self {
        self.size = name.into();
        self
    }

    /// Select the occlusion profile by name
    pub fn occlusion(mut self, name: impl Into<String>) -> Self {
        self.occlusion = name.into();
        self
    }

    /// Select the clutter profile by name
    pub fn clutter(mut self, name: impl Into<String>) -> Self {
        self.clutter = name.into();
        self
    }

    /// Set the maximum firing rate
    pub fn max_fire_rate(mut self, rate: f64) -> Self {
        self.max_fire_rate = rate;
        self
    }

    /// Set the simulation time step
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Parse every profile name and check cross-profile requirements
    pub fn kinds(&self) -> Result<ProfileKinds> {
        let kinds = ProfileKinds {
            dynamics: self.dynamics.parse()?,
            position: self.position.parse()?,
            size: self.size.parse()?,
            occlusion: self.occlusion.parse()?,
            clutter: self.clutter.parse()?,
        };

        if kinds.size == SizeKind::LogNormal && kinds.position != PositionKind::Gaussian {
            return Err(RuntimeError::missing_dependency(
                "lognormal size",
                "gaussian position",
            ));
        }

        Ok(kinds)
    }

    /// Validate the configuration without drawing any per-neuron parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            return Err(RuntimeError::invalid_parameter("dt", self.dt.to_string(), "> 0.0"));
        }
        self.kinds()?;
        Ok(())
    }
}

/// An IT neuron
#[derive(Debug, Clone)]
pub struct Neuron {
    id: NeuronId,
    selectivity: Selectivity,
    dynamics: Option<TamuraDynamics>,
    position: PositionProfile,
    size: SizeProfile,
    occlusion: OcclusionProfile,
    clutter: ClutterProfile,
}

impl Neuron {
    /// Build a neuron, drawing its random parameters from a generator seeded with `seed`
    pub fn new(id: NeuronId, config: &NeuronConfig, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_rng(id, config, &mut rng)
    }

    /// Build a neuron, drawing its random parameters from `rng`
    pub fn with_rng<R: Rng + ?Sized>(id: NeuronId, config: &NeuronConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let kinds = config.kinds()?;

        let selectivity = Selectivity::new(config.preferences.clone(), config.max_fire_rate)?;

        let position = match kinds.position {
            PositionKind::Complete => PositionProfile::Complete,
            PositionKind::Gaussian => {
                PositionProfile::Gaussian(GaussianPosition::new(&config.gaussian_position)?)
            }
        };

        let size = match kinds.size {
            SizeKind::Complete => SizeProfile::Complete,
            SizeKind::LogNormal => {
                let tolerance = position.position_tolerance().ok_or_else(|| {
                    RuntimeError::missing_dependency("lognormal size", "gaussian position")
                })?;
                SizeProfile::LogNormal(LogNormalSize::new(&config.lognormal_size, tolerance)?)
            }
        };

        let occlusion = match kinds.occlusion {
            OcclusionKind::Complete => OcclusionProfile::Complete,
            OcclusionKind::TwoInputSigmoid => OcclusionProfile::TwoInputSigmoid(
                TwoInputSigmoidOcclusion::new(&config.two_input_sigmoid)?,
            ),
        };

        let clutter = match kinds.clutter {
            ClutterKind::Average => ClutterProfile::Average,
        };

        let dynamics = match kinds.dynamics {
            DynamicsKind::Static => None,
            DynamicsKind::Tamura => Some(TamuraDynamics::new(
                config.dt,
                selectivity.objects(),
                config.tamura,
                rng,
            )?),
        };

        log::debug!(
            "Built neuron {} (dynamics={}, position={}, size={}, occlusion={}, clutter={})",
            id,
            kinds.dynamics,
            kinds.position,
            kinds.size,
            kinds.occlusion,
            kinds.clutter
        );

        Ok(Self {
            id,
            selectivity,
            dynamics,
            position,
            size,
            occlusion,
            clutter,
        })
    }

    /// Firing rate (spikes/s) for the objects currently in view.
    ///
    /// With dynamics attached this advances the neuron by one time step, so it
    /// must be called exactly once per step, also for empty scenes.
    pub fn firing_rate(&mut self, scene: &[SceneObject]) -> Result<f64> {
        for object in scene {
            object.validate()?;
        }

        let late_rate = self.static_firing_rate(scene, |object| self.selectivity.preference(object));

        let early_rate = self.dynamics.as_ref().map(|dynamics| {
            self.static_firing_rate(scene, |object| dynamics.early_preference(object))
        });

        let rate = match (self.dynamics.as_mut(), early_rate) {
            (Some(dynamics), Some(early_rate)) => dynamics.step(early_rate, late_rate)?,
            _ => late_rate,
        };

        ensure_finite("firing rate", rate)
    }

    /// Static rate of the scene: per-object isolated rates combined by the clutter profile
    fn static_firing_rate(&self, scene: &[SceneObject], preference: impl Fn(&str) -> f64) -> f64 {
        let mut isolated_rates = Vec::with_capacity(scene.len());
        let mut position_weights = Vec::with_capacity(scene.len());

        for object in scene {
            let weight = self.position.firing_rate_modifier(object.x, object.y);
            let rate = self.selectivity.max_fire_rate()
                * preference(&object.object)
                * weight
                * self.size.firing_rate_modifier(object.size)
                * self
                    .occlusion
                    .firing_rate_modifier(object.vis_nondiagnostic, object.vis_diagnostic);

            isolated_rates.push(rate);
            position_weights.push(weight);
        }

        self.clutter
            .firing_rate_modifier(&isolated_rates, &position_weights)
    }

    /// Ideal stimulus: the most preferred object at the receptive field centre and preferred size
    pub fn preferred_stimulus(&self) -> Option<SceneObject> {
        let (object, _) = self.selectivity.ranked_objects().into_iter().next()?;
        let [x, y] = self.position.rf_center();
        let size = self.size.pref_size().unwrap_or(UNTUNED_STIMULUS_SIZE);
        Some(SceneObject::new(object, x, y, size))
    }

    /// Neuron ID
    pub fn id(&self) -> NeuronId {
        self.id
    }

    /// Object selectivity
    pub fn selectivity(&self) -> &Selectivity {
        &self.selectivity
    }

    /// Dual-phase dynamics, when attached
    pub fn dynamics(&self) -> Option<&TamuraDynamics> {
        self.dynamics.as_ref()
    }

    /// Position tolerance
    pub fn position(&self) -> &PositionProfile {
        &self.position
    }

    /// Size tolerance
    pub fn size(&self) -> &SizeProfile {
        &self.size
    }

    /// Occlusion tolerance
    pub fn occlusion(&self) -> &OcclusionProfile {
        &self.occlusion
    }

    /// Clutter combination
    pub fn clutter(&self) -> &ClutterProfile {
        &self.clutter
    }
}

impl fmt::Display for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Neuron {} Properties {}", "*".repeat(20), self.id, "*".repeat(20))?;
        writeln!(f, "SELECTIVITY TOLERANCE {}", "-".repeat(27))?;
        writeln!(f, "{}", self.selectivity)?;
        if let Some(dynamics) = &self.dynamics {
            writeln!(f, "DYNAMIC FIRING RATE PROFILE {}", "-".repeat(21))?;
            writeln!(f, "{}", dynamics)?;
        }
        writeln!(f, "POSITION TOLERANCE {}", "-".repeat(30))?;
        writeln!(f, "{}", self.position)?;
        writeln!(f, "SIZE TOLERANCE {}", "-".repeat(34))?;
        writeln!(f, "{}", self.size)?;
        writeln!(f, "CLUTTER TOLERANCE {}", "-".repeat(31))?;
        writeln!(f, "{}", self.clutter)?;
        writeln!(f, "OCCLUSION TOLERANCE {}", "-".repeat(29))?;
        writeln!(f, "{}", self.occlusion)?;
        write!(f, "{}", "*".repeat(60))
    }
}
