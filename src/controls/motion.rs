//! Per-frame rotate, zoom and pan math.
//!
//! Every function works on the eye vector (`camera.position - target`)
//! held in [`ControllerState`] and reports whether it changed the pose, so
//! a frame with no motion leaves the camera bit-for-bit untouched.

use glam::{DQuat, DVec2, DVec3};

use super::state::{ControllerState, GestureMode};
use crate::camera::{Camera, Projection};
use crate::options::ControlOptions;

/// Orbit the eye around the target from the trackball delta, or keep
/// coasting along the last axis when the pointer is still.
pub(crate) fn rotate_camera(
    state: &mut ControllerState,
    camera: &mut Camera,
    opts: &ControlOptions,
) -> bool {
    let delta = state.move_curr - state.move_prev;
    let magnitude = delta.length();
    let mut moved = false;

    if magnitude > 0.0 {
        state.eye = camera.position - state.target;
        if let Some(axis) = drag_axis(state.eye, camera.up, delta) {
            let angle = magnitude * opts.rotate_speed;
            apply_rotation(state, camera, axis, angle);
            state.last_axis = axis;
            state.last_angle = angle;
            moved = true;
        }
    } else if !opts.static_moving && state.last_angle != 0.0 {
        state.last_angle *= opts.coast_decay();
        state.eye = camera.position - state.target;
        let (axis, angle) = (state.last_axis, state.last_angle);
        apply_rotation(state, camera, axis, angle);
        moved = true;
    }

    state.move_prev = state.move_curr;
    moved
}

/// Rotation axis for a trackball drag of `delta`, or `None` when the
/// geometry is degenerate (zero eye, up parallel to eye).
fn drag_axis(eye: DVec3, up: DVec3, delta: DVec2) -> Option<DVec3> {
    let eye_dir = eye.normalize_or_zero();
    let up_dir = up.normalize_or_zero();
    let sideways = up_dir.cross(eye_dir).normalize_or_zero();
    let move_dir = up_dir * delta.y + sideways * delta.x;
    let axis = move_dir.cross(eye).normalize_or_zero();
    (axis != DVec3::ZERO).then_some(axis)
}

fn apply_rotation(
    state: &mut ControllerState,
    camera: &mut Camera,
    axis: DVec3,
    angle: f64,
) {
    let q = DQuat::from_axis_angle(axis, angle);
    state.eye = q * state.eye;
    camera.up = q * camera.up;
}

/// Pinch ratio in `TouchZoomPan`, damped wheel/drag zoom otherwise.
pub(crate) fn zoom_camera(
    state: &mut ControllerState,
    camera: &mut Camera,
    mode: GestureMode,
    opts: &ControlOptions,
) -> bool {
    if mode == GestureMode::TouchZoomPan {
        let factor =
            state.touch_zoom_distance_start / state.touch_zoom_distance_end;
        state.touch_zoom_distance_start = state.touch_zoom_distance_end;
        if !(factor.is_finite() && factor > 0.0) || factor == 1.0 {
            return false;
        }
        match &mut camera.projection {
            Projection::Perspective(_) => state.eye *= factor,
            Projection::Orthographic(o) => {
                o.zoom *= factor;
                camera.update_projection_matrix();
            }
        }
        return true;
    }

    let factor =
        1.0 + (state.zoom_end.y - state.zoom_start.y) * opts.zoom_speed;
    let mut moved = false;
    if factor != 1.0 && factor > 0.0 {
        match &mut camera.projection {
            Projection::Perspective(_) => state.eye *= factor,
            Projection::Orthographic(o) => {
                o.zoom /= factor;
                camera.update_projection_matrix();
            }
        }
        moved = true;
    }

    if opts.static_moving {
        state.zoom_start = state.zoom_end;
    } else {
        state.zoom_start.y += (state.zoom_end.y - state.zoom_start.y)
            * opts.dynamic_damping_factor;
    }
    moved
}

/// Translate camera and target together by the eased pan delta.
pub(crate) fn pan_camera(
    state: &mut ControllerState,
    camera: &mut Camera,
    client_width: f64,
    opts: &ControlOptions,
) -> bool {
    let mut change = state.pan_end - state.pan_start;
    if change.length_squared() == 0.0 {
        return false;
    }

    if let Projection::Orthographic(o) = &camera.projection {
        if client_width > 0.0 {
            change.x *= (o.right - o.left) / o.zoom / client_width;
            change.y *= (o.top - o.bottom) / o.zoom / client_width;
        }
    }
    change *= state.eye.length() * opts.pan_speed;

    let pan = state.eye.cross(camera.up).normalize_or_zero() * change.x
        + camera.up.normalize_or_zero() * change.y;
    camera.position += pan;
    state.target += pan;

    if opts.static_moving {
        state.pan_start = state.pan_end;
    } else {
        state.pan_start +=
            (state.pan_end - state.pan_start) * opts.dynamic_damping_factor;
    }
    pan != DVec3::ZERO
}
