//! Listener lifetimes.
//!
//! [`Subscriptions`] holds the listeners registered for the controller's
//! whole life; [`DragSession`] holds the document-level move/up listeners
//! that only exist between a press and its release. Both are released by
//! consuming them, so a handle cannot be released twice or forgotten in a
//! live controller.

use super::event::InputSignal;
use super::surface::{InputSurface, ListenerId, ListenerScope};
use crate::error::TrackballError;

/// Listeners registered at construction.
pub(crate) const CONSTRUCTION_PLAN: [(ListenerScope, InputSignal); 9] = [
    (ListenerScope::Surface, InputSignal::ContextMenu),
    (ListenerScope::Surface, InputSignal::PointerDown),
    (ListenerScope::Surface, InputSignal::Wheel),
    (ListenerScope::Surface, InputSignal::TouchStart),
    (ListenerScope::Surface, InputSignal::TouchEnd),
    (ListenerScope::Surface, InputSignal::TouchMove),
    (ListenerScope::Window, InputSignal::KeyDown),
    (ListenerScope::Window, InputSignal::KeyUp),
    (ListenerScope::Window, InputSignal::Resize),
];

/// Listeners registered for the duration of one mouse drag.
const DRAG_PLAN: [(ListenerScope, InputSignal); 2] = [
    (ListenerScope::Document, InputSignal::PointerMove),
    (ListenerScope::Document, InputSignal::PointerUp),
];

/// A set of live listener registrations.
#[derive(Debug)]
#[must_use = "subscriptions stay registered until released"]
pub struct Subscriptions {
    ids: Vec<ListenerId>,
}

impl Subscriptions {
    /// Register every `(scope, signal)` pair. If any registration fails the
    /// ones already made are rolled back before the error is returned.
    pub fn register<S: InputSurface + ?Sized>(
        surface: &mut S,
        plan: &[(ListenerScope, InputSignal)],
    ) -> Result<Self, TrackballError> {
        let mut ids = Vec::with_capacity(plan.len());
        for &(scope, signal) in plan {
            match surface.subscribe(scope, signal) {
                Ok(id) => ids.push(id),
                Err(e) => {
                    for id in ids {
                        surface.unsubscribe(id);
                    }
                    return Err(e);
                }
            }
        }
        Ok(Self { ids })
    }

    /// Number of listeners held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no listeners are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Unregister every listener.
    pub fn release<S: InputSurface + ?Sized>(self, surface: &mut S) {
        for id in self.ids {
            surface.unsubscribe(id);
        }
    }
}

/// Document-level move/up listeners for one press-to-release drag.
#[derive(Debug)]
#[must_use = "a drag session stays registered until released"]
pub struct DragSession {
    listeners: Subscriptions,
}

impl DragSession {
    /// Start listening for moves and the release anywhere on the page.
    pub fn begin<S: InputSurface + ?Sized>(
        surface: &mut S,
    ) -> Result<Self, TrackballError> {
        let listeners = Subscriptions::register(surface, &DRAG_PLAN)?;
        log::debug!("drag session started");
        Ok(Self { listeners })
    }

    /// Stop listening.
    pub fn release<S: InputSurface + ?Sized>(self, surface: &mut S) {
        self.listeners.release(surface);
        log::debug!("drag session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::headless::HeadlessSurface;

    #[test]
    fn construction_plan_registers_and_releases() {
        let mut surface = HeadlessSurface::new(10.0, 10.0);
        let subs =
            Subscriptions::register(&mut surface, &CONSTRUCTION_PLAN).unwrap();
        assert_eq!(subs.len(), CONSTRUCTION_PLAN.len());
        assert!(surface.is_listening(
            ListenerScope::Window,
            InputSignal::KeyDown
        ));
        subs.release(&mut surface);
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn failed_registration_rolls_back() {
        let mut surface = HeadlessSurface::new(10.0, 10.0);
        surface.refuse(InputSignal::KeyUp);
        let result = Subscriptions::register(&mut surface, &CONSTRUCTION_PLAN);
        assert!(matches!(result, Err(TrackballError::Subscribe(_))));
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn drag_session_scopes_move_and_up_to_document() {
        let mut surface = HeadlessSurface::new(10.0, 10.0);
        let drag = DragSession::begin(&mut surface).unwrap();
        assert!(surface.is_listening(
            ListenerScope::Document,
            InputSignal::PointerMove
        ));
        assert!(surface
            .is_listening(ListenerScope::Document, InputSignal::PointerUp));
        drag.release(&mut surface);
        assert!(!surface.delivers(InputSignal::PointerMove));
        assert!(!surface.delivers(InputSignal::PointerUp));
    }
}
