//! Scene descriptions: the objects simultaneously visible at one time step

use crate::error::*;

/// Ground truth of one visible object
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneObject {
    /// Object class name
    pub object: String,
    /// Horizontal position (radians of visual angle)
    pub x: f64,
    /// Vertical position (radians of visual angle)
    pub y: f64,
    /// Object size (radians of visual angle)
    pub size: f64,
    /// Rotation about the x axis (radians)
    #[cfg_attr(feature = "serde", serde(default))]
    pub rot_x: f64,
    /// Rotation about the y axis (radians)
    #[cfg_attr(feature = "serde", serde(default))]
    pub rot_y: f64,
    /// Rotation about the z axis (radians)
    #[cfg_attr(feature = "serde", serde(default))]
    pub rot_z: f64,
    /// Visible fraction of the non-diagnostic parts
    #[cfg_attr(feature = "serde", serde(default = "fully_visible"))]
    pub vis_nondiagnostic: f64,
    /// Visible fraction of the diagnostic parts
    #[cfg_attr(feature = "serde", serde(default = "fully_visible"))]
    pub vis_diagnostic: f64,
}

#[cfg(feature = "serde")]
fn fully_visible() -> f64 {
    1.0
}

impl SceneObject {
    /// Unrotated, fully visible object
    pub fn new(object: impl Into<String>, x: f64, y: f64, size: f64) -> Self {
        Self {
            object: object.into(),
            x,
            y,
            size,
            rot_x: 0.0,
            rot_y: 0.0,
            rot_z: 0.0,
            vis_nondiagnostic: 1.0,
            vis_diagnostic: 1.0,
        }
    }

    /// Set rotations
    pub fn with_rotation(mut self, rot_x: f64, rot_y: f64, rot_z: f64) -> Self {
        self.rot_x = rot_x;
        self.rot_y = rot_y;
        self.rot_z = rot_z;
        self
    }

    /// Set visible fractions of the non-diagnostic and diagnostic parts
    pub fn with_visibility(mut self, vis_nondiagnostic: f64, vis_diagnostic: f64) -> Self {
        self.vis_nondiagnostic = vis_nondiagnostic;
        self.vis_diagnostic = vis_diagnostic;
        self
    }

    /// Reject non-finite attributes
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("size", self.size),
            ("rot_x", self.rot_x),
            ("rot_y", self.rot_y),
            ("rot_z", self.rot_z),
            ("vis_nondiagnostic", self.vis_nondiagnostic),
            ("vis_diagnostic", self.vis_diagnostic),
        ];
        for (name, value) in fields {
            ensure_finite(&format!("{}.{}", self.object, name), value)?;
        }
        Ok(())
    }
}
