use glam::{DVec2, DVec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// A gesture a mouse button or modifier key can be bound to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// Orbit around the target.
    Rotate,
    /// Dolly (perspective) or scale the projection (orthographic).
    Zoom,
    /// Translate camera and target together.
    Pan,
}

/// Current interaction mode. Exactly one is active at any instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GestureMode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Mouse-driven orbit.
    Rotate,
    /// Mouse-driven zoom.
    Zoom,
    /// Mouse-driven pan.
    Pan,
    /// Single-finger orbit.
    TouchRotate,
    /// Two-finger pinch zoom plus midpoint pan.
    TouchZoomPan,
}

impl From<GestureKind> for GestureMode {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Rotate => Self::Rotate,
            GestureKind::Zoom => Self::Zoom,
            GestureKind::Pan => Self::Pan,
        }
    }
}

/// Pose captured once at construction and restored by `reset()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    /// Look-at target.
    pub target: DVec3,
    /// Camera position.
    pub position: DVec3,
    /// Camera up vector.
    pub up: DVec3,
    /// Projection zoom scalar.
    pub zoom: f64,
}

/// Raw samples and derived motion state of one controller.
///
/// Input handlers only write samples; the per-frame update consumes them
/// and owns everything else.
#[derive(Debug, Clone)]
pub struct ControllerState {
    /// Trackball coordinate at the previous frame (or press).
    pub(crate) move_prev: DVec2,
    /// Latest trackball coordinate.
    pub(crate) move_curr: DVec2,
    pub(crate) last_axis: DVec3,
    pub(crate) last_angle: f64,
    pub(crate) zoom_start: DVec2,
    pub(crate) zoom_end: DVec2,
    pub(crate) touch_zoom_distance_start: f64,
    pub(crate) touch_zoom_distance_end: f64,
    pub(crate) pan_start: DVec2,
    pub(crate) pan_end: DVec2,
    /// Camera position minus target.
    pub(crate) eye: DVec3,
    pub(crate) target: DVec3,
    baseline: Baseline,
}

impl ControllerState {
    /// Fresh state for a camera orbiting `target`.
    #[must_use]
    pub fn new(camera: &Camera, target: DVec3) -> Self {
        Self {
            move_prev: DVec2::ZERO,
            move_curr: DVec2::ZERO,
            last_axis: DVec3::ZERO,
            last_angle: 0.0,
            zoom_start: DVec2::ZERO,
            zoom_end: DVec2::ZERO,
            touch_zoom_distance_start: 0.0,
            touch_zoom_distance_end: 0.0,
            pan_start: DVec2::ZERO,
            pan_end: DVec2::ZERO,
            eye: camera.position - target,
            target,
            baseline: Baseline {
                target,
                position: camera.position,
                up: camera.up,
                zoom: camera.zoom(),
            },
        }
    }

    /// Look-at target.
    #[must_use]
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Camera position relative to the target, as of the last update.
    #[must_use]
    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    /// Angle of the last applied rotation; decays while coasting.
    #[must_use]
    pub fn last_angle(&self) -> f64 {
        self.last_angle
    }

    /// Axis of the last applied rotation.
    #[must_use]
    pub fn last_axis(&self) -> DVec3 {
        self.last_axis
    }

    /// Pose captured at construction.
    #[must_use]
    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Start and end pinch distances of the current touch zoom.
    #[must_use]
    pub fn pinch_distances(&self) -> (f64, f64) {
        (self.touch_zoom_distance_start, self.touch_zoom_distance_end)
    }

    /// Seed a rotate gesture so the first frame rotates by nothing.
    pub(crate) fn seed_rotate(&mut self, circle: DVec2) {
        self.move_curr = circle;
        self.move_prev = circle;
    }

    pub(crate) fn track_rotate(&mut self, circle: DVec2) {
        self.move_prev = self.move_curr;
        self.move_curr = circle;
    }

    pub(crate) fn seed_zoom(&mut self, screen: DVec2) {
        self.zoom_start = screen;
        self.zoom_end = screen;
    }

    pub(crate) fn seed_pan(&mut self, screen: DVec2) {
        self.pan_start = screen;
        self.pan_end = screen;
    }

    pub(crate) fn seed_pinch(&mut self, distance: f64) {
        self.touch_zoom_distance_start = distance;
        self.touch_zoom_distance_end = distance;
    }

    /// Drop every in-flight sample and the coasting rotation.
    pub(crate) fn clear_motion(&mut self) {
        self.move_prev = self.move_curr;
        self.last_angle = 0.0;
        self.zoom_start = self.zoom_end;
        self.pan_start = self.pan_end;
        self.touch_zoom_distance_start = self.touch_zoom_distance_end;
    }

    /// Restore target and camera pose from the baseline.
    pub(crate) fn restore_baseline(&mut self, camera: &mut Camera) {
        let base = self.baseline;
        self.target = base.target;
        camera.position = base.position;
        camera.up = base.up;
        camera.projection.set_zoom(base.zoom);
        camera.update_projection_matrix();
        self.eye = camera.position - self.target;
    }
}
