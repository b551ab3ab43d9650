use glam::DVec2;

use super::event::InputSignal;
use crate::error::TrackballError;

/// Bounding box of the display surface relative to the viewport, as
/// returned by `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceRect {
    /// Left edge in viewport pixels.
    pub left: f64,
    /// Top edge in viewport pixels.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// The display surface itself.
    Surface,
    /// The whole document; used for drags that leave the surface.
    Document,
    /// The host window; keyboard and resize signals.
    Window,
}

/// Opaque handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Host display surface the controller listens on.
///
/// The host is responsible for delivering the events of every active
/// subscription to the controller's `handle_event`, and for nothing else.
pub trait InputSurface {
    /// Current bounding box of the surface.
    fn bounding_rect(&self) -> SurfaceRect;

    /// Page scroll offset of the owning window.
    fn page_offset(&self) -> DVec2 {
        DVec2::ZERO
    }

    /// Border offset of the owning document element (`clientLeft`,
    /// `clientTop`).
    fn client_offset(&self) -> DVec2 {
        DVec2::ZERO
    }

    /// Inner width of the surface in pixels.
    fn client_width(&self) -> f64 {
        self.bounding_rect().width
    }

    /// Start delivering `signal` events observed at `scope`.
    fn subscribe(
        &mut self,
        scope: ListenerScope,
        signal: InputSignal,
    ) -> Result<ListenerId, TrackballError>;

    /// Stop delivering events for `id`. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: ListenerId);
}
