//! The trackball controller.
//!
//! [`TrackballControls`] owns a [`Camera`], the host's display surface and
//! all interaction state. The host forwards events through
//! [`handle_event`](TrackballControls::handle_event) and calls
//! [`update`](TrackballControls::update) once per rendered frame.

/// Distance limits.
pub mod bounds;
/// Gesture mode transitions.
pub mod gesture;
pub(crate) mod motion;
/// Notifications and change detection.
pub mod notify;
/// Gesture kinds, modes and the raw sample state.
pub mod state;

use glam::DVec3;

pub use bounds::BoundsEnforcer;
pub use gesture::GestureStateMachine;
pub use notify::{
    ChangeNotifier, ControlEvent, EventEmitter, SubscriptionId, CHANGE_EPSILON,
};
pub use state::{Baseline, ControllerState, GestureKind, GestureMode};

use crate::camera::{Camera, Projection, ProjectionKind};
use crate::error::TrackballError;
use crate::input::router::RouteTarget;
use crate::input::session::CONSTRUCTION_PLAN;
use crate::input::{
    InputEvent, InputRouter, InputSurface, ScreenRect, Subscriptions,
};
use crate::options::Options;

/// Trackball camera controller bound to one display surface.
#[derive(Debug)]
pub struct TrackballControls<S: InputSurface> {
    camera: Camera,
    surface: S,
    options: Options,
    projection_kind: ProjectionKind,
    state: ControllerState,
    gesture: GestureStateMachine,
    router: InputRouter,
    notifier: ChangeNotifier,
    events: EventEmitter,
    subscriptions: Option<Subscriptions>,
}

impl<S: InputSurface> TrackballControls<S> {
    /// Bind a controller for `camera`, orbiting `target`, to `surface`.
    ///
    /// Registers the construction listeners, measures the surface and runs
    /// one update so the camera faces the target. The pose at this point is
    /// the baseline `reset()` returns to.
    pub fn new(
        camera: Camera,
        target: DVec3,
        mut surface: S,
        options: Options,
    ) -> Result<Self, TrackballError> {
        let subscriptions =
            Subscriptions::register(&mut surface, &CONSTRUCTION_PLAN)?;
        let router = InputRouter::new(&surface);
        let mut controls = Self {
            projection_kind: camera.projection.kind(),
            state: ControllerState::new(&camera, target),
            notifier: ChangeNotifier::new(&camera),
            camera,
            surface,
            options,
            gesture: GestureStateMachine::new(),
            router,
            events: EventEmitter::default(),
            subscriptions: Some(subscriptions),
        };
        controls.camera.look_at(target);
        let _ = controls.update()?;
        log::debug!(
            "trackball bound to {}x{} surface ({} camera)",
            controls.router.screen_rect().width,
            controls.router.screen_rect().height,
            controls.projection_kind,
        );
        Ok(controls)
    }

    /// Apply one input event delivered by the host.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
    ) -> Result<(), TrackballError> {
        if self.subscriptions.is_none() {
            log::warn!("event {:?} after dispose ignored", event.signal());
            return Ok(());
        }
        if let InputEvent::Resize = event {
            self.handle_resize();
            return Ok(());
        }
        let events = self.router.route(
            event,
            &mut self.surface,
            RouteTarget {
                gesture: &mut self.gesture,
                state: &mut self.state,
                options: &self.options,
            },
        )?;
        self.events.emit_all(events);
        Ok(())
    }

    /// Advance one frame. Returns whether a `Change` was emitted.
    pub fn update(&mut self) -> Result<bool, TrackballError> {
        let found = self.camera.projection.kind();
        if found != self.projection_kind {
            return Err(TrackballError::UnsupportedProjection {
                expected: self.projection_kind,
                found,
            });
        }

        let opts = &self.options.controls;
        self.state.eye = self.camera.position - self.state.target;

        let mut moved = false;
        if !opts.no_rotate {
            moved |=
                motion::rotate_camera(&mut self.state, &mut self.camera, opts);
        }
        if !opts.no_zoom {
            moved |= motion::zoom_camera(
                &mut self.state,
                &mut self.camera,
                self.gesture.mode(),
                opts,
            );
        }
        if !opts.no_pan {
            moved |= motion::pan_camera(
                &mut self.state,
                &mut self.camera,
                self.surface.client_width(),
                opts,
            );
        }
        if moved {
            self.camera.position = self.state.target + self.state.eye;
        }

        let perspective =
            matches!(self.camera.projection, Projection::Perspective(_));
        if perspective && (!opts.no_zoom || !opts.no_pan) {
            if let Some(eye) = BoundsEnforcer::new(opts).clamp(self.state.eye) {
                log::trace!(
                    "eye distance {:.4} clamped to {:.4}",
                    self.state.eye.length(),
                    eye.length()
                );
                self.state.eye = eye;
                self.camera.position = self.state.target + eye;
                self.state.zoom_start = self.state.zoom_end;
                moved = true;
            }
        }

        if moved {
            self.camera.look_at(self.state.target);
        }

        let changed = self.notifier.observe(&self.camera);
        if changed {
            self.events.emit(ControlEvent::Change);
        }
        Ok(changed)
    }

    /// Re-measure the surface and fit the camera aspect to it.
    pub fn handle_resize(&mut self) {
        self.router.handle_resize(&self.surface);
        let rect = self.router.screen_rect();
        if !rect.is_degenerate() {
            self.camera.set_aspect(rect.width / rect.height);
        }
    }

    /// Return to the pose captured at construction and emit `Change`.
    pub fn reset(&mut self) {
        self.gesture.reset();
        self.router.end_drag(&mut self.surface);
        self.state.clear_motion();
        self.state.restore_baseline(&mut self.camera);
        self.camera.look_at(self.state.target);
        self.events.emit(ControlEvent::Change);
        self.notifier.mark(&self.camera);
    }

    /// Release every listener registration and drop every subscriber.
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        self.router.end_drag(&mut self.surface);
        if let Some(subscriptions) = self.subscriptions.take() {
            subscriptions.release(&mut self.surface);
            self.gesture.reset();
            self.events.clear();
            log::debug!("trackball disposed");
        }
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.subscriptions.is_none()
    }

    /// Whether input is acted on.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.router.enabled()
    }

    /// Pause or resume input. Pausing ends any gesture in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.router.end_drag(&mut self.surface);
            self.gesture.reset();
        }
        self.router.set_enabled(enabled);
    }

    /// Call `listener` whenever `event` is emitted.
    pub fn subscribe<F>(
        &mut self,
        event: ControlEvent,
        listener: F,
    ) -> SubscriptionId
    where
        F: FnMut(ControlEvent) + 'static,
    {
        self.events.subscribe(event, listener)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// The controlled camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access. Changing the projection kind makes the next
    /// `update()` fail.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Look-at target.
    #[must_use]
    pub fn target(&self) -> DVec3 {
        self.state.target
    }

    /// Move the look-at target and face it immediately.
    pub fn set_target(&mut self, target: DVec3) {
        self.state.target = target;
        self.state.eye = self.camera.position - target;
        self.camera.look_at(target);
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Mutable options; edits apply from the next event or frame.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Interaction state.
    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Mode the next frame acts on, including any modifier override.
    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.gesture.effective()
    }

    /// Projection kind captured at construction.
    #[must_use]
    pub fn projection_kind(&self) -> ProjectionKind {
        self.projection_kind
    }

    /// Screen rectangle input is normalized against.
    #[must_use]
    pub fn screen_rect(&self) -> ScreenRect {
        self.router.screen_rect()
    }

    /// The display surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access, e.g. to resize a headless surface before
    /// delivering `Resize`.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::camera::OrthographicProjection;
    use crate::input::{HeadlessSurface, InputSignal, MouseButton};

    fn controls() -> TrackballControls<HeadlessSurface> {
        let camera = Camera::perspective(DVec3::new(0.0, 0.0, 5.0), 50.0, 1.0);
        TrackballControls::new(
            camera,
            DVec3::ZERO,
            HeadlessSurface::new(800.0, 600.0),
            Options::default(),
        )
        .unwrap()
    }

    fn record(
        c: &mut TrackballControls<HeadlessSurface>,
        event: ControlEvent,
    ) -> Rc<RefCell<usize>> {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let _ = c.subscribe(event, move |_| *sink.borrow_mut() += 1);
        count
    }

    #[test]
    fn construction_registers_listeners_and_faces_target() {
        let c = controls();
        assert_eq!(c.surface().listener_count(), 9);
        assert!(c.surface().delivers(InputSignal::Wheel));
        assert!(!c.surface().delivers(InputSignal::PointerMove));
        assert!((c.camera().forward() - DVec3::NEG_Z).length() < 1e-12);
        // aspect follows the surface only after a resize
        assert_eq!(c.screen_rect().width, 800.0);
    }

    #[test]
    fn stationary_update_is_idempotent() {
        let mut c = controls();
        let before = c.camera().position;
        for _ in 0..10 {
            assert!(!c.update().unwrap());
        }
        assert_eq!(c.camera().position, before);
    }

    #[test]
    fn wheel_emits_start_end_then_changes_over_frames() {
        let mut c = controls();
        let starts = record(&mut c, ControlEvent::Start);
        let changes = record(&mut c, ControlEvent::Change);
        c.handle_event(&InputEvent::Wheel {
            delta_y: 200.0,
            mode: crate::input::WheelDeltaMode::Pixel,
        })
        .unwrap();
        assert_eq!(*starts.borrow(), 1);
        assert!(c.update().unwrap());
        assert!(c.state().eye().length() > 5.0);
        assert_eq!(*changes.borrow(), 1);
    }

    #[test]
    fn dispose_is_idempotent_and_silences_input() {
        let mut c = controls();
        let changes = record(&mut c, ControlEvent::Change);
        c.handle_event(&InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 10.0,
            y: 10.0,
        })
        .unwrap();
        assert_eq!(c.surface().listener_count(), 11);
        c.dispose();
        c.dispose();
        assert!(c.is_disposed());
        assert_eq!(c.surface().listener_count(), 0);
        c.reset();
        assert_eq!(*changes.borrow(), 0);
        c.handle_event(&InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 10.0,
            y: 10.0,
        })
        .unwrap();
        assert_eq!(c.surface().listener_count(), 0);
    }

    #[test]
    fn refused_subscription_fails_construction_cleanly() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        surface.refuse(InputSignal::KeyUp);
        let camera = Camera::perspective(DVec3::Z, 50.0, 1.0);
        let err = TrackballControls::new(
            camera,
            DVec3::ZERO,
            surface,
            Options::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TrackballError::Subscribe(_)));
    }

    #[test]
    fn swapped_projection_is_rejected() {
        let mut c = controls();
        c.camera_mut().projection =
            Projection::Orthographic(OrthographicProjection::default());
        let err = c.update().unwrap_err();
        assert!(matches!(
            err,
            TrackballError::UnsupportedProjection {
                expected: ProjectionKind::Perspective,
                found: ProjectionKind::Orthographic,
            }
        ));
    }

    #[test]
    fn reset_always_emits_change() {
        let mut c = controls();
        let changes = record(&mut c, ControlEvent::Change);
        c.reset();
        assert_eq!(*changes.borrow(), 1);
        assert!(!c.update().unwrap());
    }

    #[test]
    fn pausing_ends_the_drag() {
        let mut c = controls();
        c.handle_event(&InputEvent::PointerDown {
            button: MouseButton::Right,
            x: 400.0,
            y: 300.0,
        })
        .unwrap();
        assert_eq!(c.mode(), GestureMode::Pan);
        c.set_enabled(false);
        assert_eq!(c.mode(), GestureMode::Idle);
        assert_eq!(c.surface().listener_count(), 9);
        c.handle_event(&InputEvent::Wheel {
            delta_y: 100.0,
            mode: crate::input::WheelDeltaMode::Line,
        })
        .unwrap();
        assert!(!c.update().unwrap());
    }

    #[test]
    fn resize_refits_aspect() {
        let mut c = controls();
        c.surface_mut().resize(1000.0, 500.0);
        c.handle_event(&InputEvent::Resize).unwrap();
        assert_eq!(c.screen_rect().width, 1000.0);
        let Projection::Perspective(p) = &c.camera().projection else {
            panic!("perspective camera expected");
        };
        assert_eq!(p.aspect, 2.0);
    }

    #[test]
    fn set_target_faces_new_target() {
        let mut c = controls();
        c.set_target(DVec3::new(5.0, 0.0, 5.0));
        assert!((c.camera().forward() - DVec3::X).length() < 1e-12);
        assert!(!c.update().unwrap());
    }
}
