use std::fmt;

use glam::{DMat3, DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveProjection {
    /// Vertical field of view in degrees.
    pub fovy: f64,
    /// Viewport aspect ratio (width / height).
    pub aspect: f64,
    /// Near clipping plane distance.
    pub znear: f64,
    /// Far clipping plane distance.
    pub zfar: f64,
    /// Optical zoom; narrows the field of view when above 1.
    pub zoom: f64,
}

impl Default for PerspectiveProjection {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            aspect: 1.0,
            znear: 0.1,
            zfar: 500_000.0,
            zoom: 1.0,
        }
    }
}

/// Orthographic projection parameters. The visible box is
/// `[left, right] x [bottom, top]` divided by `zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthographicProjection {
    /// Left plane of the unzoomed view volume.
    pub left: f64,
    /// Right plane of the unzoomed view volume.
    pub right: f64,
    /// Top plane of the unzoomed view volume.
    pub top: f64,
    /// Bottom plane of the unzoomed view volume.
    pub bottom: f64,
    /// Near clipping plane distance.
    pub znear: f64,
    /// Far clipping plane distance.
    pub zfar: f64,
    /// Projection zoom scalar.
    pub zoom: f64,
}

impl Default for OrthographicProjection {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            znear: 0.1,
            zfar: 2000.0,
            zoom: 1.0,
        }
    }
}

/// Camera projection model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// Distance-based zoom.
    Perspective(PerspectiveProjection),
    /// Projection-scalar-based zoom.
    Orthographic(OrthographicProjection),
}

/// Discriminator of a [`Projection`], captured once by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    /// See [`Projection::Perspective`].
    Perspective,
    /// See [`Projection::Orthographic`].
    Orthographic,
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Perspective => f.write_str("perspective"),
            Self::Orthographic => f.write_str("orthographic"),
        }
    }
}

impl Projection {
    /// The projection's discriminator.
    #[must_use]
    pub fn kind(&self) -> ProjectionKind {
        match self {
            Self::Perspective(_) => ProjectionKind::Perspective,
            Self::Orthographic(_) => ProjectionKind::Orthographic,
        }
    }

    /// Current zoom scalar.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        match self {
            Self::Perspective(p) => p.zoom,
            Self::Orthographic(o) => o.zoom,
        }
    }

    /// Overwrite the zoom scalar. Callers must refresh the matrix with
    /// [`Camera::update_projection_matrix`].
    pub fn set_zoom(&mut self, zoom: f64) {
        match self {
            Self::Perspective(p) => p.zoom = zoom,
            Self::Orthographic(o) => o.zoom = zoom,
        }
    }

    /// Build the projection matrix ([0,1] depth range, right-handed).
    #[must_use]
    pub fn build_matrix(&self) -> DMat4 {
        match self {
            Self::Perspective(p) => {
                let half = (p.fovy.to_radians() * 0.5).tan() / p.zoom;
                DMat4::perspective_rh(
                    2.0 * half.atan(),
                    p.aspect,
                    p.znear,
                    p.zfar,
                )
            }
            Self::Orthographic(o) => {
                let cx = (o.right + o.left) * 0.5;
                let cy = (o.top + o.bottom) * 0.5;
                let dx = (o.right - o.left) / (2.0 * o.zoom);
                let dy = (o.top - o.bottom) / (2.0 * o.zoom);
                DMat4::orthographic_rh(
                    cx - dx,
                    cx + dx,
                    cy - dy,
                    cy + dy,
                    o.znear,
                    o.zfar,
                )
            }
        }
    }
}

/// Camera pose plus projection.
///
/// `position` and `up` are mutated directly by the controller; call
/// [`Camera::look_at`] afterwards to refresh the orientation.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub position: DVec3,
    /// Up direction vector. Not kept normalized.
    pub up: DVec3,
    /// Projection model.
    pub projection: Projection,
    orientation: DQuat,
    projection_matrix: DMat4,
}

impl Camera {
    /// Create a camera at `position` looking down -Z with +Y up.
    #[must_use]
    pub fn new(position: DVec3, projection: Projection) -> Self {
        Self {
            position,
            up: DVec3::Y,
            projection,
            orientation: DQuat::IDENTITY,
            projection_matrix: projection.build_matrix(),
        }
    }

    /// Perspective camera with the given field of view (degrees) and aspect.
    #[must_use]
    pub fn perspective(position: DVec3, fovy: f64, aspect: f64) -> Self {
        Self::new(
            position,
            Projection::Perspective(PerspectiveProjection {
                fovy,
                aspect,
                ..PerspectiveProjection::default()
            }),
        )
    }

    /// Orthographic camera with the given view volume.
    #[must_use]
    pub fn orthographic(
        position: DVec3,
        projection: OrthographicProjection,
    ) -> Self {
        Self::new(position, Projection::Orthographic(projection))
    }

    /// Current zoom scalar of the projection.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.projection.zoom()
    }

    /// World-space orientation (camera looks down its local -Z).
    #[must_use]
    pub fn orientation(&self) -> DQuat {
        self.orientation
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::NEG_Z
    }

    /// Rotate the camera so its -Z axis points at `target`, keeping `up` as
    /// the reference up direction.
    pub fn look_at(&mut self, target: DVec3) {
        let dir = target - self.position;
        if dir.length_squared() == 0.0 {
            return;
        }
        let mut up = self.up;
        if dir.cross(up).length_squared() < 1e-20 {
            // up parallel to the view direction; pick any perpendicular
            up = dir.normalize().any_orthonormal_vector();
        }
        let view =
            DMat4::look_at_rh(self.position, target, up.normalize());
        self.orientation =
            DQuat::from_mat3(&DMat3::from_mat4(view).transpose()).normalize();
    }

    /// Recompute the cached projection matrix after projection edits.
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = self.projection.build_matrix();
    }

    /// Cached projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        self.projection_matrix
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.orientation, self.position)
            .inverse()
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> DMat4 {
        self.projection_matrix * self.view_matrix()
    }

    /// Update the aspect ratio after the display surface was resized.
    ///
    /// Orthographic cameras keep their vertical extent and widen or narrow
    /// horizontally around the current center.
    pub fn set_aspect(&mut self, aspect: f64) {
        if !(aspect.is_finite() && aspect > 0.0) {
            return;
        }
        match &mut self.projection {
            Projection::Perspective(p) => p.aspect = aspect,
            Projection::Orthographic(o) => {
                let half_h = (o.top - o.bottom) * 0.5;
                let cx = (o.right + o.left) * 0.5;
                o.left = cx - half_h * aspect;
                o.right = cx + half_h * aspect;
            }
        }
        self.update_projection_matrix();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_points_forward_at_target() {
        let mut cam = Camera::perspective(DVec3::new(3.0, 4.0, 5.0), 50.0, 1.0);
        let target = DVec3::new(-1.0, 0.5, 2.0);
        cam.look_at(target);
        let expected = (target - cam.position).normalize();
        assert!((cam.forward() - expected).length() < 1e-12);
    }

    #[test]
    fn look_at_survives_up_parallel_to_view() {
        let mut cam = Camera::perspective(DVec3::new(0.0, 5.0, 0.0), 50.0, 1.0);
        cam.look_at(DVec3::ZERO);
        assert!(cam.forward().is_finite());
        assert!((cam.forward() - DVec3::NEG_Y).length() < 1e-12);
    }

    #[test]
    fn view_matrix_maps_target_onto_negative_z() {
        let mut cam = Camera::perspective(DVec3::new(0.0, 0.0, 5.0), 50.0, 1.0);
        cam.look_at(DVec3::ZERO);
        let p = cam.view_matrix().transform_point3(DVec3::ZERO);
        assert!((p - DVec3::new(0.0, 0.0, -5.0)).length() < 1e-12);
    }

    #[test]
    fn orthographic_aspect_keeps_height() {
        let mut cam = Camera::orthographic(
            DVec3::Z,
            OrthographicProjection::default(),
        );
        cam.set_aspect(2.0);
        let Projection::Orthographic(o) = cam.projection else {
            unreachable!("constructed orthographic");
        };
        assert_eq!(o.top - o.bottom, 2.0);
        assert_eq!(o.right - o.left, 4.0);
    }

    #[test]
    fn zoom_round_trips_through_projection() {
        let mut proj =
            Projection::Perspective(PerspectiveProjection::default());
        proj.set_zoom(2.5);
        assert_eq!(proj.zoom(), 2.5);
        assert_eq!(proj.kind(), ProjectionKind::Perspective);
    }
}
