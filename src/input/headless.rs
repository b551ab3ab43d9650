//! In-memory display surface for headless hosts and tests.

use std::collections::BTreeMap;

use glam::DVec2;

use super::event::InputSignal;
use super::surface::{InputSurface, ListenerId, ListenerScope, SurfaceRect};
use crate::error::TrackballError;

/// Display surface with a fixed, settable geometry that records its
/// listener registrations instead of talking to a real platform.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    rect: SurfaceRect,
    page_offset: DVec2,
    client_offset: DVec2,
    listeners: BTreeMap<ListenerId, (ListenerScope, InputSignal)>,
    next_id: u64,
    refuse: Option<InputSignal>,
}

impl HeadlessSurface {
    /// Surface at the page origin with the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            rect: SurfaceRect {
                left: 0.0,
                top: 0.0,
                width,
                height,
            },
            ..Self::default()
        }
    }

    /// Change the surface size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.rect.width = width;
        self.rect.height = height;
    }

    /// Move the surface's top-left corner in viewport pixels.
    pub fn set_origin(&mut self, left: f64, top: f64) {
        self.rect.left = left;
        self.rect.top = top;
    }

    /// Set the window scroll offset.
    pub fn set_page_offset(&mut self, offset: DVec2) {
        self.page_offset = offset;
    }

    /// Set the document border offset.
    pub fn set_client_offset(&mut self, offset: DVec2) {
        self.client_offset = offset;
    }

    /// Make every future subscription to `signal` fail.
    pub fn refuse(&mut self, signal: InputSignal) {
        self.refuse = Some(signal);
    }

    /// Undo [`refuse`](Self::refuse).
    pub fn accept_all(&mut self) {
        self.refuse = None;
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether some listener for `signal` at `scope` is live.
    #[must_use]
    pub fn is_listening(
        &self,
        scope: ListenerScope,
        signal: InputSignal,
    ) -> bool {
        self.listeners.values().any(|&entry| entry == (scope, signal))
    }

    /// Whether an event for `signal` would be delivered at all.
    #[must_use]
    pub fn delivers(&self, signal: InputSignal) -> bool {
        self.listeners.values().any(|&(_, s)| s == signal)
    }
}

impl InputSurface for HeadlessSurface {
    fn bounding_rect(&self) -> SurfaceRect {
        self.rect
    }

    fn page_offset(&self) -> DVec2 {
        self.page_offset
    }

    fn client_offset(&self) -> DVec2 {
        self.client_offset
    }

    fn subscribe(
        &mut self,
        scope: ListenerScope,
        signal: InputSignal,
    ) -> Result<ListenerId, TrackballError> {
        if self.refuse == Some(signal) {
            return Err(TrackballError::Subscribe(format!(
                "{} refused by headless surface",
                signal.dom_name()
            )));
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let _ = self.listeners.insert(id, (scope, signal));
        Ok(id)
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        let _ = self.listeners.remove(&id);
    }
}
