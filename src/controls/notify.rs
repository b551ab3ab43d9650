//! Start/change/end notifications.

use std::fmt;

use glam::DVec3;

use crate::camera::{Camera, ProjectionKind};

/// Squared distance the camera must move before a change is reported.
pub const CHANGE_EPSILON: f64 = 1e-6;

/// Notifications raised by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// A gesture began (press, touch, or wheel tick).
    Start,
    /// The camera moved enough to warrant a re-render.
    Change,
    /// A gesture ended.
    End,
}

/// Handle returned by [`EventEmitter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(ControlEvent)>;

/// Owned list of notification listeners.
#[derive(Default)]
pub struct EventEmitter {
    listeners: Vec<(SubscriptionId, ControlEvent, Listener)>,
    next_id: u64,
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventEmitter {
    /// Call `listener` every time `event` is emitted.
    pub fn subscribe<F>(
        &mut self,
        event: ControlEvent,
        listener: F,
    ) -> SubscriptionId
    where
        F: FnMut(ControlEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, event, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Invoke every listener registered for `event`, in subscription order.
    pub fn emit(&mut self, event: ControlEvent) {
        for (_, wanted, listener) in &mut self.listeners {
            if *wanted == event {
                listener(event);
            }
        }
    }

    /// Emit a sequence of events.
    pub fn emit_all(&mut self, events: &[ControlEvent]) {
        for &event in events {
            self.emit(event);
        }
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

/// Last pose a change was reported for. Owned per controller so that two
/// controllers never compare against each other's camera.
#[derive(Debug, Clone, Copy)]
pub struct ChangeNotifier {
    last_position: DVec3,
    last_zoom: f64,
}

impl ChangeNotifier {
    /// Notifier primed with the camera's current pose.
    #[must_use]
    pub fn new(camera: &Camera) -> Self {
        Self {
            last_position: camera.position,
            last_zoom: camera.zoom(),
        }
    }

    /// Whether the camera moved past the threshold since the last report;
    /// records the new pose when it did.
    pub fn observe(&mut self, camera: &Camera) -> bool {
        let moved = self.last_position.distance_squared(camera.position)
            > CHANGE_EPSILON;
        let zoomed = match camera.projection.kind() {
            ProjectionKind::Perspective => false,
            ProjectionKind::Orthographic => self.last_zoom != camera.zoom(),
        };
        if moved || zoomed {
            self.mark(camera);
        }
        moved || zoomed
    }

    /// Record the camera's pose as reported.
    pub fn mark(&mut self, camera: &Camera) {
        self.last_position = camera.position;
        self.last_zoom = camera.zoom();
    }
}
