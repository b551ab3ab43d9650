//! Camera model driven by the trackball controller.
//!
//! The controller mutates `position`, `up` and the projection zoom of a
//! [`Camera`]; everything else here exists so the render loop can turn the
//! result into matrices.

/// Core camera struct and projection models.
pub mod core;

pub use self::core::{
    Camera, OrthographicProjection, PerspectiveProjection, Projection,
    ProjectionKind,
};
