// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Trackball camera controller for interactive 3D viewers.
//!
//! A pointer drag orbits the camera around a target as if rolling a ball
//! under the cursor, the wheel or a pinch zooms, and a second button or a
//! two-finger drag pans. Rotation can keep coasting after release and
//! zoom/pan ease toward their goal, both governed by a damping factor.
//!
//! # Key entry points
//!
//! - [`controls::TrackballControls`] - the controller
//! - [`camera::Camera`] - perspective or orthographic camera it drives
//! - [`input::InputSurface`] - what a host implements to deliver input
//! - [`input::HeadlessSurface`] - in-memory host for tests and replays
//! - [`options::Options`] - TOML-backed speeds, limits and bindings
//!
//! # Frame loop
//!
//! The host forwards each platform event to
//! [`handle_event`](controls::TrackballControls::handle_event), which only
//! records samples. Once per rendered frame it calls
//! [`update`](controls::TrackballControls::update), which moves the camera
//! and emits [`ControlEvent::Change`](controls::ControlEvent::Change) when
//! the pose moved far enough to warrant a redraw.

pub mod camera;
pub mod controls;
pub mod error;
pub mod input;
pub mod options;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use camera::{Camera, Projection, ProjectionKind};
pub use controls::{ControlEvent, TrackballControls};
pub use error::TrackballError;
pub use input::{HeadlessSurface, InputEvent, InputSurface};
pub use options::Options;
