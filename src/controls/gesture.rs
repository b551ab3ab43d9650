//! Gesture state machine.
//!
//! ```text
//! Idle ──press──▶ Rotate | Zoom | Pan ──release──▶ Idle
//! Idle ──1 touch──▶ TouchRotate ──0 touches──▶ Idle
//! Idle ──2+ touches──▶ TouchZoomPan ──1 touch──▶ TouchRotate
//! ```
//!
//! A held modifier key overrides the button mode for the duration of the
//! hold. Only the first modifier pressed counts until it is released.

use super::state::{GestureKind, GestureMode};

/// Owns the current mode and the keyboard override.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureStateMachine {
    mode: GestureMode,
    key_override: Option<GestureKind>,
}

impl GestureStateMachine {
    /// Machine in the `Idle` mode with no override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mode implied by buttons and touches alone.
    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Held modifier override, if any.
    #[must_use]
    pub fn key_override(&self) -> Option<GestureKind> {
        self.key_override
    }

    /// Mode that input samples and updates should act on.
    #[must_use]
    pub fn effective(&self) -> GestureMode {
        self.key_override.map_or(self.mode, GestureMode::from)
    }

    /// Mouse press. The button binding only applies from `Idle`; a press
    /// while another gesture runs keeps that gesture.
    pub fn press(&mut self, binding: Option<GestureKind>) -> GestureMode {
        if self.mode == GestureMode::Idle {
            let next = binding.map_or(GestureMode::Idle, GestureMode::from);
            self.transition(next);
        }
        self.effective()
    }

    /// Mouse release.
    pub fn release(&mut self) {
        self.transition(GestureMode::Idle);
    }

    /// Touch start or end with `count` fingers now down.
    pub fn touches(&mut self, count: usize) -> GestureMode {
        let next = match count {
            0 => GestureMode::Idle,
            1 => GestureMode::TouchRotate,
            _ => GestureMode::TouchZoomPan,
        };
        self.transition(next);
        self.mode
    }

    /// Modifier pressed. Returns `true` if it became the override.
    pub fn key_down(&mut self, kind: GestureKind) -> bool {
        if self.key_override.is_some() {
            return false;
        }
        log::debug!("modifier override: {kind:?}");
        self.key_override = Some(kind);
        true
    }

    /// Modifier released; any key release ends the override.
    pub fn key_up(&mut self) {
        self.key_override = None;
    }

    /// Back to `Idle` with no override.
    pub fn reset(&mut self) {
        self.transition(GestureMode::Idle);
        self.key_override = None;
    }

    fn transition(&mut self, next: GestureMode) {
        if self.mode != next {
            log::debug!("gesture mode {:?} -> {next:?}", self.mode);
            self.mode = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_from_idle_uses_binding() {
        let mut fsm = GestureStateMachine::new();
        assert_eq!(fsm.press(Some(GestureKind::Pan)), GestureMode::Pan);
        fsm.release();
        assert_eq!(fsm.mode(), GestureMode::Idle);
    }

    #[test]
    fn second_press_keeps_running_gesture() {
        let mut fsm = GestureStateMachine::new();
        let _ = fsm.press(Some(GestureKind::Rotate));
        assert_eq!(fsm.press(Some(GestureKind::Zoom)), GestureMode::Rotate);
    }

    #[test]
    fn unbound_button_stays_idle() {
        let mut fsm = GestureStateMachine::new();
        assert_eq!(fsm.press(None), GestureMode::Idle);
    }

    #[test]
    fn modifier_overrides_button_and_first_wins() {
        let mut fsm = GestureStateMachine::new();
        assert!(fsm.key_down(GestureKind::Zoom));
        assert!(!fsm.key_down(GestureKind::Pan));
        assert_eq!(fsm.press(Some(GestureKind::Rotate)), GestureMode::Zoom);
        assert_eq!(fsm.mode(), GestureMode::Rotate);
        fsm.key_up();
        assert_eq!(fsm.effective(), GestureMode::Rotate);
        assert!(fsm.key_down(GestureKind::Pan));
    }

    #[test]
    fn touch_count_drives_touch_modes() {
        let mut fsm = GestureStateMachine::new();
        assert_eq!(fsm.touches(1), GestureMode::TouchRotate);
        assert_eq!(fsm.touches(3), GestureMode::TouchZoomPan);
        assert_eq!(fsm.touches(1), GestureMode::TouchRotate);
        assert_eq!(fsm.touches(0), GestureMode::Idle);
    }

    #[test]
    fn reset_clears_override() {
        let mut fsm = GestureStateMachine::new();
        let _ = fsm.key_down(GestureKind::Pan);
        let _ = fsm.touches(2);
        fsm.reset();
        assert_eq!(fsm.effective(), GestureMode::Idle);
    }
}
