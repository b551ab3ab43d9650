//! Translation of winit window events into [`InputEvent`]s.
//!
//! A winit window delivers every event to the application, so a native
//! host pairs this translator with a [`HeadlessSurface`] sized to the
//! window's inner size and resized on `WindowEvent::Resized`.
//!
//! [`HeadlessSurface`]: super::HeadlessSurface

use std::collections::BTreeMap;

use glam::DVec2;
use winit::event::{
    ElementState, MouseScrollDelta, Touch, TouchPhase, WindowEvent,
};
use winit::keyboard::PhysicalKey;

use super::event::{InputEvent, MouseButton, TouchPoint, WheelDeltaMode};

/// Stateful translator; winit reports the cursor and each finger
/// separately while [`InputEvent`] carries them with every event.
#[derive(Debug, Clone, Default)]
pub struct WindowEventTranslator {
    cursor: DVec2,
    touches: BTreeMap<u64, TouchPoint>,
}

impl WindowEventTranslator {
    /// Translator with the cursor at the window origin and no fingers down.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position in window pixels.
    #[must_use]
    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    /// The [`InputEvent`] for `event`, if the controller cares about it.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = DVec2::new(position.x, position.y);
                Some(InputEvent::PointerMove {
                    x: position.x,
                    y: position.y,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::from(*button);
                Some(match state {
                    ElementState::Pressed => InputEvent::PointerDown {
                        button,
                        x: self.cursor.x,
                        y: self.cursor.y,
                    },
                    ElementState::Released => InputEvent::PointerUp { button },
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling up as positive, the DOM as negative
                let (delta_y, mode) = match delta {
                    MouseScrollDelta::LineDelta(_, y) => {
                        (-f64::from(*y), WheelDeltaMode::Line)
                    }
                    MouseScrollDelta::PixelDelta(pos) => {
                        (-pos.y, WheelDeltaMode::Pixel)
                    }
                };
                Some(InputEvent::Wheel { delta_y, mode })
            }
            WindowEvent::Touch(touch) => Some(self.touch(touch)),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let code = format!("{code:?}");
                Some(match event.state {
                    ElementState::Pressed => InputEvent::KeyDown { code },
                    ElementState::Released => InputEvent::KeyUp { code },
                })
            }
            WindowEvent::Resized(_) => Some(InputEvent::Resize),
            _ => None,
        }
    }

    fn touch(&mut self, touch: &Touch) -> InputEvent {
        let point = TouchPoint::new(touch.location.x, touch.location.y);
        match touch.phase {
            TouchPhase::Started => {
                let _ = self.touches.insert(touch.id, point);
                InputEvent::TouchStart {
                    touches: self.active(),
                }
            }
            TouchPhase::Moved => {
                let _ = self.touches.insert(touch.id, point);
                InputEvent::TouchMove {
                    touches: self.active(),
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let _ = self.touches.remove(&touch.id);
                InputEvent::TouchEnd {
                    touches: self.active(),
                }
            }
        }
    }

    fn active(&self) -> Vec<TouchPoint> {
        self.touches.values().copied().collect()
    }
}
