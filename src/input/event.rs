use serde::{Deserialize, Serialize};

/// Platform-agnostic input events, in page pixels.
///
/// Whatever host owns the display surface feeds these into
/// [`TrackballControls::handle_event`].
///
/// [`TrackballControls::handle_event`]:
///     crate::controls::TrackballControls::handle_event
///
/// # Example
///
/// ```ignore
/// controls.handle_event(&InputEvent::PointerDown {
///     button: MouseButton::Left,
///     x: 500.0,
///     y: 300.0,
/// })?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse button pressed over the display surface.
    PointerDown {
        /// Which button changed.
        button: MouseButton,
        /// Horizontal page position.
        x: f64,
        /// Vertical page position.
        y: f64,
    },
    /// Pointer moved anywhere on the page during a drag.
    PointerMove {
        /// Horizontal page position.
        x: f64,
        /// Vertical page position.
        y: f64,
    },
    /// Mouse button released anywhere on the page during a drag.
    PointerUp {
        /// Which button changed.
        button: MouseButton,
    },
    /// Scroll wheel over the display surface.
    Wheel {
        /// Vertical scroll amount (positive = scroll down = zoom out).
        delta_y: f64,
        /// Unit `delta_y` is reported in.
        #[serde(default)]
        mode: WheelDeltaMode,
    },
    /// One or more fingers touched the surface. `touches` lists every
    /// finger currently down.
    TouchStart {
        /// Active touch points.
        touches: Vec<TouchPoint>,
    },
    /// Active fingers moved.
    TouchMove {
        /// Active touch points.
        touches: Vec<TouchPoint>,
    },
    /// A finger lifted. `touches` lists the fingers still down.
    TouchEnd {
        /// Remaining touch points.
        touches: Vec<TouchPoint>,
    },
    /// Key pressed, identified by its physical key code (`"KeyA"`).
    KeyDown {
        /// Physical key code.
        code: String,
    },
    /// Key released.
    KeyUp {
        /// Physical key code.
        code: String,
    },
    /// Context menu requested over the surface.
    ContextMenu,
    /// The display surface changed size or position.
    Resize,
}

impl InputEvent {
    /// The signal a host has to be subscribed to for this event to arrive.
    #[must_use]
    pub fn signal(&self) -> InputSignal {
        match self {
            Self::PointerDown { .. } => InputSignal::PointerDown,
            Self::PointerMove { .. } => InputSignal::PointerMove,
            Self::PointerUp { .. } => InputSignal::PointerUp,
            Self::Wheel { .. } => InputSignal::Wheel,
            Self::TouchStart { .. } => InputSignal::TouchStart,
            Self::TouchMove { .. } => InputSignal::TouchMove,
            Self::TouchEnd { .. } => InputSignal::TouchEnd,
            Self::KeyDown { .. } => InputSignal::KeyDown,
            Self::KeyUp { .. } => InputSignal::KeyUp,
            Self::ContextMenu => InputSignal::ContextMenu,
            Self::Resize => InputSignal::Resize,
        }
    }
}

/// Kinds of host signal the controller subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSignal {
    /// `contextmenu`
    ContextMenu,
    /// `mousedown`
    PointerDown,
    /// `mousemove`
    PointerMove,
    /// `mouseup`
    PointerUp,
    /// `wheel`
    Wheel,
    /// `touchstart`
    TouchStart,
    /// `touchmove`
    TouchMove,
    /// `touchend`
    TouchEnd,
    /// `keydown`
    KeyDown,
    /// `keyup`
    KeyUp,
    /// `resize`
    Resize,
}

impl InputSignal {
    /// DOM event name for this signal.
    #[must_use]
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::ContextMenu => "contextmenu",
            Self::PointerDown => "mousedown",
            Self::PointerMove => "mousemove",
            Self::PointerUp => "mouseup",
            Self::Wheel => "wheel",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Resize => "resize",
        }
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Middle mouse button (wheel click).
    Middle,
    /// Secondary (right) mouse button.
    Right,
    /// Any other button, by DOM button index.
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            other => Self::Other(u16::try_from(other).unwrap_or(0)),
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            winit::event::MouseButton::Back => Self::Other(3),
            winit::event::MouseButton::Forward => Self::Other(4),
            winit::event::MouseButton::Other(n) => Self::Other(n),
        }
    }
}

/// Unit of a wheel delta, as reported by the DOM `WheelEvent.deltaMode`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WheelDeltaMode {
    /// Pixels (also used when the host does not report a mode).
    #[default]
    Pixel,
    /// Lines.
    Line,
    /// Pages.
    Page,
}

impl WheelDeltaMode {
    /// Map a DOM `WheelEvent.deltaMode` value.
    #[must_use]
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }

    /// Zoom-sample change per unit of `delta_y`.
    #[must_use]
    pub fn zoom_scale(self) -> f64 {
        match self {
            Self::Page => 0.025,
            Self::Line => 0.01,
            Self::Pixel => 0.000_25,
        }
    }
}

/// A single finger position in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Horizontal page position.
    pub x: f64,
    /// Vertical page position.
    pub y: f64,
}

impl TouchPoint {
    /// Construct a touch point.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another touch point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between two touches.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_scales_are_ordered_page_line_pixel() {
        assert!(
            WheelDeltaMode::Page.zoom_scale()
                > WheelDeltaMode::Line.zoom_scale()
        );
        assert!(
            WheelDeltaMode::Line.zoom_scale()
                > WheelDeltaMode::Pixel.zoom_scale()
        );
        assert_eq!(WheelDeltaMode::from_dom(7), WheelDeltaMode::Pixel);
    }

    #[test]
    fn pinch_geometry() {
        let a = TouchPoint::new(0.0, 0.0);
        let b = TouchPoint::new(30.0, 40.0);
        assert_eq!(a.distance(b), 50.0);
        assert_eq!(a.midpoint(b), TouchPoint::new(15.0, 20.0));
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let ev: InputEvent = serde_json::from_str(
            r#"{"type":"pointer_down","button":"left","x":1.0,"y":2.0}"#,
        )
        .unwrap();
        assert_eq!(ev.signal(), InputSignal::PointerDown);

        let wheel: InputEvent =
            serde_json::from_str(r#"{"type":"wheel","delta_y":-120.0}"#)
                .unwrap();
        assert_eq!(
            wheel,
            InputEvent::Wheel {
                delta_y: -120.0,
                mode: WheelDeltaMode::Pixel,
            }
        );
    }
}
