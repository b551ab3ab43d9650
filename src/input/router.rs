//! Routes normalized input into the gesture state machine.
//!
//! The router owns everything an input callback may touch: the `enabled`
//! gate, the screen rectangle used for normalization and the press-scoped
//! drag session. It writes raw samples into [`ControllerState`] and never
//! moves the camera itself.

use super::event::{InputEvent, MouseButton, TouchPoint, WheelDeltaMode};
use super::screen::{ScreenRect, ScreenRectTracker};
use super::session::DragSession;
use super::surface::InputSurface;
use crate::controls::{
    ControlEvent, ControllerState, GestureMode, GestureStateMachine,
};
use crate::error::TrackballError;
use crate::options::Options;

const NONE: &[ControlEvent] = &[];
const START: &[ControlEvent] = &[ControlEvent::Start];
const END: &[ControlEvent] = &[ControlEvent::End];
const START_END: &[ControlEvent] = &[ControlEvent::Start, ControlEvent::End];

/// Controller state an input callback may write.
pub(crate) struct RouteTarget<'a> {
    pub gesture: &'a mut GestureStateMachine,
    pub state: &'a mut ControllerState,
    pub options: &'a Options,
}

/// Normalizes host input and feeds the gesture state machine.
#[derive(Debug)]
pub struct InputRouter {
    enabled: bool,
    screen: ScreenRectTracker,
    drag: Option<DragSession>,
}

impl InputRouter {
    /// Router measuring `surface` for the first time.
    pub fn new<S: InputSurface + ?Sized>(surface: &S) -> Self {
        Self {
            enabled: true,
            screen: ScreenRectTracker::new(surface),
            drag: None,
        }
    }

    /// Whether input is currently acted on.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Pause or resume input handling without touching registrations.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current screen rectangle.
    #[must_use]
    pub fn screen_rect(&self) -> ScreenRect {
        self.screen.rect()
    }

    /// Whether a press-to-release drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Re-measure the display surface.
    pub fn handle_resize<S: InputSurface + ?Sized>(&mut self, surface: &S) {
        self.screen.refresh(surface);
    }

    /// Release the drag session, if one is open.
    pub fn end_drag<S: InputSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(drag) = self.drag.take() {
            drag.release(surface);
        }
    }

    /// Apply one event. Returns the notifications it raises.
    pub(crate) fn route<S: InputSurface + ?Sized>(
        &mut self,
        event: &InputEvent,
        surface: &mut S,
        target: RouteTarget<'_>,
    ) -> Result<&'static [ControlEvent], TrackballError> {
        if let InputEvent::Resize = event {
            // Kept current even while paused so resuming never sees a stale
            // rect.
            self.handle_resize(surface);
            return Ok(NONE);
        }
        if !self.enabled {
            return Ok(NONE);
        }

        match event {
            InputEvent::PointerDown { button, x, y } => {
                self.pointer_down(*button, *x, *y, surface, target)
            }
            InputEvent::PointerMove { x, y } => {
                if self.drag.is_some() {
                    self.pointer_move(*x, *y, target);
                }
                Ok(NONE)
            }
            InputEvent::PointerUp { .. } => {
                if self.drag.is_none() {
                    return Ok(NONE);
                }
                target.gesture.release();
                self.end_drag(surface);
                Ok(END)
            }
            InputEvent::Wheel { delta_y, mode } => {
                Ok(Self::wheel(*delta_y, *mode, target))
            }
            InputEvent::TouchStart { touches } => {
                Ok(self.touch_start(touches, target))
            }
            InputEvent::TouchMove { touches } => {
                self.touch_move(touches, target);
                Ok(NONE)
            }
            InputEvent::TouchEnd { touches } => {
                self.touch_end(touches, target);
                Ok(END)
            }
            InputEvent::KeyDown { code } => {
                if let Some(kind) = target.options.keybindings.lookup(code) {
                    if !target.options.controls.is_disabled(kind) {
                        let _ = target.gesture.key_down(kind);
                    }
                }
                Ok(NONE)
            }
            InputEvent::KeyUp { .. } => {
                target.gesture.key_up();
                Ok(NONE)
            }
            InputEvent::ContextMenu | InputEvent::Resize => Ok(NONE),
        }
    }

    fn pointer_down<S: InputSurface + ?Sized>(
        &mut self,
        button: MouseButton,
        x: f64,
        y: f64,
        surface: &mut S,
        target: RouteTarget<'_>,
    ) -> Result<&'static [ControlEvent], TrackballError> {
        // a press without a matching release leaves a stale session behind
        self.end_drag(surface);
        self.drag = Some(DragSession::begin(surface)?);

        let controls = &target.options.controls;
        let mode = target.gesture.press(target.options.mouse.lookup(button));
        let sample = self.screen.sample(x, y);
        match mode {
            GestureMode::Rotate if !controls.no_rotate => {
                target.state.seed_rotate(sample.circle);
            }
            GestureMode::Zoom if !controls.no_zoom => {
                target.state.seed_zoom(sample.screen);
            }
            GestureMode::Pan if !controls.no_pan => {
                target.state.seed_pan(sample.screen);
            }
            _ => {}
        }
        Ok(START)
    }

    fn pointer_move(&self, x: f64, y: f64, target: RouteTarget<'_>) {
        let controls = &target.options.controls;
        let sample = self.screen.sample(x, y);
        match target.gesture.effective() {
            GestureMode::Rotate if !controls.no_rotate => {
                target.state.track_rotate(sample.circle);
            }
            GestureMode::Zoom if !controls.no_zoom => {
                target.state.zoom_end = sample.screen;
            }
            GestureMode::Pan if !controls.no_pan => {
                target.state.pan_end = sample.screen;
            }
            _ => {}
        }
    }

    fn wheel(
        delta_y: f64,
        mode: WheelDeltaMode,
        target: RouteTarget<'_>,
    ) -> &'static [ControlEvent] {
        if target.options.controls.no_zoom {
            return NONE;
        }
        target.state.zoom_start.y -= delta_y * mode.zoom_scale();
        START_END
    }

    fn touch_start(
        &self,
        touches: &[TouchPoint],
        target: RouteTarget<'_>,
    ) -> &'static [ControlEvent] {
        if touches.is_empty() {
            log::warn!("touch start without touch points ignored");
            return NONE;
        }
        let _ = target.gesture.touches(touches.len());
        self.seed_touches(touches, target.state);
        START
    }

    fn touch_move(&self, touches: &[TouchPoint], target: RouteTarget<'_>) {
        match touches {
            [] => {}
            [only] => {
                let circle = self.screen.on_circle(only.x, only.y);
                target.state.track_rotate(circle);
            }
            [a, b, ..] => {
                let mid = a.midpoint(*b);
                target.state.touch_zoom_distance_end = a.distance(*b);
                target.state.pan_end = self.screen.on_screen(mid.x, mid.y);
            }
        }
    }

    fn touch_end(&self, touches: &[TouchPoint], target: RouteTarget<'_>) {
        let _ = target.gesture.touches(touches.len());
        // re-seed from the fingers still down so the next frame does not
        // jump
        self.seed_touches(touches, target.state);
    }

    fn seed_touches(
        &self,
        touches: &[TouchPoint],
        state: &mut ControllerState,
    ) {
        match touches {
            [] => {}
            [only] => state.seed_rotate(self.screen.on_circle(only.x, only.y)),
            [a, b, ..] => {
                let mid = a.midpoint(*b);
                state.seed_pinch(a.distance(*b));
                state.seed_pan(self.screen.on_screen(mid.x, mid.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::camera::Camera;
    use crate::controls::GestureKind;
    use crate::input::event::InputSignal;
    use crate::input::headless::HeadlessSurface;

    struct Rig {
        surface: HeadlessSurface,
        router: InputRouter,
        gesture: GestureStateMachine,
        state: ControllerState,
        options: Options,
    }

    impl Rig {
        fn new() -> Self {
            let surface = HeadlessSurface::new(800.0, 600.0);
            let router = InputRouter::new(&surface);
            let camera =
                Camera::perspective(glam::DVec3::new(0.0, 0.0, 5.0), 50.0, 1.0);
            Self {
                surface,
                router,
                gesture: GestureStateMachine::new(),
                state: ControllerState::new(&camera, glam::DVec3::ZERO),
                options: Options::default(),
            }
        }

        fn send(&mut self, event: InputEvent) -> &'static [ControlEvent] {
            self.router
                .route(
                    &event,
                    &mut self.surface,
                    RouteTarget {
                        gesture: &mut self.gesture,
                        state: &mut self.state,
                        options: &self.options,
                    },
                )
                .unwrap()
        }
    }

    fn down(button: MouseButton, x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown { button, x, y }
    }

    #[test]
    fn press_opens_and_release_closes_drag_session() {
        let mut rig = Rig::new();
        assert_eq!(rig.send(down(MouseButton::Left, 500.0, 300.0)), START);
        assert!(rig.surface.delivers(InputSignal::PointerMove));
        assert_eq!(rig.gesture.mode(), GestureMode::Rotate);
        assert_eq!(
            rig.send(InputEvent::PointerUp {
                button: MouseButton::Left
            }),
            END
        );
        assert!(!rig.router.is_dragging());
        assert_eq!(rig.surface.listener_count(), 0);
        assert_eq!(rig.gesture.mode(), GestureMode::Idle);
    }

    #[test]
    fn repeated_press_does_not_leak_listeners() {
        let mut rig = Rig::new();
        let _ = rig.send(down(MouseButton::Left, 10.0, 10.0));
        let _ = rig.send(down(MouseButton::Right, 20.0, 20.0));
        assert_eq!(rig.surface.listener_count(), 2);
    }

    #[test]
    fn moves_outside_a_drag_are_ignored() {
        let mut rig = Rig::new();
        let _ = rig.send(InputEvent::PointerMove { x: 0.0, y: 0.0 });
        assert_eq!(rig.state.move_curr, DVec2::ZERO);
        assert_eq!(
            rig.send(InputEvent::PointerUp {
                button: MouseButton::Left
            }),
            NONE
        );
    }

    #[test]
    fn rotate_move_keeps_previous_sample() {
        let mut rig = Rig::new();
        let _ = rig.send(down(MouseButton::Left, 500.0, 300.0));
        let _ = rig.send(InputEvent::PointerMove { x: 400.0, y: 300.0 });
        assert_eq!(rig.state.move_prev, DVec2::new(0.25, 0.0));
        assert_eq!(rig.state.move_curr, DVec2::ZERO);
    }

    #[test]
    fn modifier_key_forces_pan_on_left_button() {
        let mut rig = Rig::new();
        let _ = rig.send(InputEvent::KeyDown { code: "KeyD".into() });
        let _ = rig.send(down(MouseButton::Left, 400.0, 300.0));
        let _ = rig.send(InputEvent::PointerMove { x: 480.0, y: 300.0 });
        assert_eq!(rig.state.pan_start, DVec2::new(0.5, 0.5));
        assert_eq!(rig.state.pan_end, DVec2::new(0.6, 0.5));
        assert_eq!(rig.state.move_curr, DVec2::ZERO);
    }

    #[test]
    fn modifier_for_disabled_gesture_is_ignored() {
        let mut rig = Rig::new();
        rig.options.controls.no_pan = true;
        let _ = rig.send(InputEvent::KeyDown { code: "KeyD".into() });
        assert_eq!(rig.gesture.key_override(), None);
        let _ = rig.send(InputEvent::KeyDown { code: "KeyS".into() });
        assert_eq!(rig.gesture.key_override(), Some(GestureKind::Zoom));
    }

    #[test]
    fn wheel_units_scale_differently() {
        let mut rig = Rig::new();
        assert_eq!(
            rig.send(InputEvent::Wheel {
                delta_y: 100.0,
                mode: WheelDeltaMode::Pixel,
            }),
            START_END
        );
        assert!((rig.state.zoom_start.y + 0.025).abs() < 1e-12);
        let _ = rig.send(InputEvent::Wheel {
            delta_y: 1.0,
            mode: WheelDeltaMode::Page,
        });
        assert!((rig.state.zoom_start.y + 0.05).abs() < 1e-12);
    }

    #[test]
    fn wheel_is_silent_when_zoom_disabled() {
        let mut rig = Rig::new();
        rig.options.controls.no_zoom = true;
        let events = rig.send(InputEvent::Wheel {
            delta_y: 100.0,
            mode: WheelDeltaMode::Line,
        });
        assert_eq!(events, NONE);
        assert_eq!(rig.state.zoom_start, DVec2::ZERO);
    }

    #[test]
    fn disabled_router_ignores_everything_but_resize() {
        let mut rig = Rig::new();
        rig.router.set_enabled(false);
        assert_eq!(rig.send(down(MouseButton::Left, 1.0, 1.0)), NONE);
        assert_eq!(rig.surface.listener_count(), 0);
        rig.surface.resize(100.0, 100.0);
        let _ = rig.send(InputEvent::Resize);
        assert_eq!(rig.router.screen_rect().width, 100.0);
    }

    #[test]
    fn pinch_then_lift_reseeds_rotation() {
        let mut rig = Rig::new();
        let a = TouchPoint::new(300.0, 300.0);
        let b = TouchPoint::new(500.0, 300.0);
        let _ = rig.send(InputEvent::TouchStart { touches: vec![a, b] });
        assert_eq!(rig.gesture.mode(), GestureMode::TouchZoomPan);
        assert_eq!(rig.state.pinch_distances(), (200.0, 200.0));
        assert_eq!(rig.state.pan_start, DVec2::new(0.5, 0.5));

        let b2 = TouchPoint::new(600.0, 300.0);
        let _ = rig.send(InputEvent::TouchMove { touches: vec![a, b2] });
        assert_eq!(rig.state.pinch_distances(), (200.0, 300.0));

        assert_eq!(rig.send(InputEvent::TouchEnd { touches: vec![a] }), END);
        assert_eq!(rig.gesture.mode(), GestureMode::TouchRotate);
        assert_eq!(rig.state.move_prev, rig.state.move_curr);
        assert_eq!(rig.state.move_curr, DVec2::new(-0.25, 0.0));
    }

    #[test]
    fn empty_touch_start_is_ignored() {
        let mut rig = Rig::new();
        assert_eq!(rig.send(InputEvent::TouchStart { touches: vec![] }), NONE);
        assert_eq!(rig.gesture.mode(), GestureMode::Idle);
    }

    #[test]
    fn refused_drag_session_leaves_gesture_idle() {
        let mut rig = Rig::new();
        rig.surface.refuse(InputSignal::PointerMove);
        let event = down(MouseButton::Right, 400.0, 300.0);
        let result = rig.router.route(
            &event,
            &mut rig.surface,
            RouteTarget {
                gesture: &mut rig.gesture,
                state: &mut rig.state,
                options: &rig.options,
            },
        );
        assert!(result.is_err());
        assert_eq!(rig.gesture.mode(), GestureMode::Idle);
        assert!(!rig.router.is_dragging());
        assert_eq!(rig.surface.listener_count(), 0);

        rig.surface.accept_all();
        assert_eq!(rig.send(down(MouseButton::Left, 500.0, 300.0)), START);
        assert_eq!(rig.gesture.mode(), GestureMode::Rotate);
    }
}
