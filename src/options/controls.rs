use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::controls::GestureKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Trackball speeds, limits and damping.
pub struct ControlOptions {
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub rotate_speed: f64,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub zoom_speed: f64,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f64,
    /// Disable orbiting.
    #[schemars(title = "Lock Rotation")]
    pub no_rotate: bool,
    /// Disable zooming.
    #[schemars(title = "Lock Zoom")]
    pub no_zoom: bool,
    /// Disable panning.
    #[schemars(title = "Lock Pan")]
    pub no_pan: bool,
    /// Stop immediately on release instead of coasting.
    #[schemars(title = "Static Moving")]
    pub static_moving: bool,
    /// Fraction of the remaining motion closed per frame, `0 < f < 1`.
    #[schemars(title = "Damping", range(min = 0.01, max = 0.99), extend("step" = 0.01))]
    pub dynamic_damping_factor: f64,
    /// Closest the camera may get to the target (perspective only).
    #[schemars(skip)]
    pub min_distance: f64,
    /// Farthest the camera may get from the target (perspective only).
    #[schemars(skip)]
    pub max_distance: f64,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.2,
            pan_speed: 0.3,
            no_rotate: false,
            no_zoom: false,
            no_pan: false,
            static_moving: false,
            dynamic_damping_factor: 0.2,
            min_distance: 0.0,
            max_distance: f64::INFINITY,
        }
    }
}

impl ControlOptions {
    /// Whether the given gesture is switched off.
    #[must_use]
    pub fn is_disabled(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Rotate => self.no_rotate,
            GestureKind::Zoom => self.no_zoom,
            GestureKind::Pan => self.no_pan,
        }
    }

    /// Per-frame decay applied to the coasting rotation angle.
    #[must_use]
    pub fn coast_decay(&self) -> f64 {
        (1.0 - self.dynamic_damping_factor).sqrt()
    }
}
