//! Input handling: host-neutral events, listener lifetimes, screen
//! normalization and the router that feeds the gesture state machine.

/// Host-neutral input events.
pub mod event;
/// In-memory surface for headless hosts and tests.
pub mod headless;
/// Routes events into controller state.
pub mod router;
/// Pointer normalization against the surface rectangle.
pub mod screen;
/// Construction-time and drag-scoped listener registrations.
pub mod session;
/// The display-surface abstraction hosts implement.
pub mod surface;
/// Translation of winit window events.
#[cfg(feature = "viewer")]
pub mod window;

pub use event::{
    InputEvent, InputSignal, MouseButton, TouchPoint, WheelDeltaMode,
};
pub use headless::HeadlessSurface;
pub use router::InputRouter;
pub use screen::{PointerSample, ScreenRect, ScreenRectTracker};
pub use session::{DragSession, Subscriptions};
pub use surface::{InputSurface, ListenerId, ListenerScope, SurfaceRect};
#[cfg(feature = "viewer")]
pub use window::WindowEventTranslator;
