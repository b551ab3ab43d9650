use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::controls::GestureKind;
use crate::input::MouseButton;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Mouse", inline)]
#[serde(default)]
/// Which gesture each mouse button starts.
pub struct MouseBindingOptions {
    /// Primary button.
    pub left: GestureKind,
    /// Wheel button.
    pub middle: GestureKind,
    /// Secondary button.
    pub right: GestureKind,
}

impl Default for MouseBindingOptions {
    fn default() -> Self {
        Self {
            left: GestureKind::Rotate,
            middle: GestureKind::Zoom,
            right: GestureKind::Pan,
        }
    }
}

impl MouseBindingOptions {
    /// Gesture bound to `button`; extra buttons start nothing.
    #[must_use]
    pub fn lookup(&self, button: MouseButton) -> Option<GestureKind> {
        match button {
            MouseButton::Left => Some(self.left),
            MouseButton::Middle => Some(self.middle),
            MouseButton::Right => Some(self.right),
            MouseButton::Other(_) => None,
        }
    }
}
