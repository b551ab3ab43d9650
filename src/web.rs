//! Browser host for the `web` feature.
//!
//! [`CanvasSurface`] attaches DOM listeners to an `HtmlCanvasElement` and
//! its window and queues the translated [`InputEvent`]s. [`WebTrackball`]
//! drains that queue once per animation frame, throttles resizes and runs
//! the controller update.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use glam::{DVec2, DVec3};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, HtmlCanvasElement,
    KeyboardEvent, MouseEvent, TouchEvent, WheelEvent, Window,
};

use crate::camera::Camera;
use crate::controls::TrackballControls;
use crate::error::TrackballError;
use crate::input::{
    InputEvent, InputSignal, InputSurface, ListenerId, ListenerScope,
    MouseButton, SurfaceRect, TouchPoint, WheelDeltaMode,
};
use crate::options::Options;
use crate::util::ResizeThrottle;

type EventQueue = Rc<RefCell<VecDeque<InputEvent>>>;

/// Route `log` output to the browser console and panics to
/// `console.error`.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        // already initialized by the embedding page
        log::debug!("console logger already installed");
    }
}

struct Registration {
    target: EventTarget,
    signal: InputSignal,
    callback: Closure<dyn FnMut(Event)>,
}

/// Display surface backed by a canvas element.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    window: Window,
    document: Document,
    queue: EventQueue,
    enabled: Rc<Cell<bool>>,
    listeners: HashMap<ListenerId, Registration>,
    next_id: u64,
}

impl std::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("listeners", &self.listeners.len())
            .field("queued", &self.queue.borrow().len())
            .finish_non_exhaustive()
    }
}

impl CanvasSurface {
    /// Surface for an existing canvas.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, TrackballError> {
        let window = web_sys::window().ok_or_else(|| {
            TrackballError::MissingSurface("no window".to_owned())
        })?;
        let document = window.document().ok_or_else(|| {
            TrackballError::MissingSurface("no document".to_owned())
        })?;
        Ok(Self {
            canvas,
            window,
            document,
            queue: Rc::default(),
            enabled: Rc::new(Cell::new(true)),
            listeners: HashMap::new(),
            next_id: 0,
        })
    }

    /// Surface for the canvas with DOM id `id`.
    pub fn from_element_id(id: &str) -> Result<Self, TrackballError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| {
                TrackballError::MissingSurface("no document".to_owned())
            })?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| {
                TrackballError::MissingSurface(format!("no element #{id}"))
            })?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| {
                TrackballError::MissingSurface(format!("#{id} is not a canvas"))
            })?;
        Self::new(canvas)
    }

    /// The canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Take every event queued since the last call.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Whether listeners should swallow the browser's default handling.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn target(&self, scope: ListenerScope) -> EventTarget {
        match scope {
            ListenerScope::Surface => self.canvas.clone().into(),
            ListenerScope::Document => self.document.clone().into(),
            ListenerScope::Window => self.window.clone().into(),
        }
    }
}

impl InputSurface for CanvasSurface {
    fn bounding_rect(&self) -> SurfaceRect {
        let r = self.canvas.get_bounding_client_rect();
        SurfaceRect {
            left: r.left(),
            top: r.top(),
            width: r.width(),
            height: r.height(),
        }
    }

    fn page_offset(&self) -> DVec2 {
        DVec2::new(
            self.window.page_x_offset().unwrap_or(0.0),
            self.window.page_y_offset().unwrap_or(0.0),
        )
    }

    fn client_offset(&self) -> DVec2 {
        self.document.document_element().map_or(DVec2::ZERO, |root| {
            DVec2::new(
                f64::from(root.client_left()),
                f64::from(root.client_top()),
            )
        })
    }

    fn client_width(&self) -> f64 {
        f64::from(self.canvas.client_width())
    }

    fn subscribe(
        &mut self,
        scope: ListenerScope,
        signal: InputSignal,
    ) -> Result<ListenerId, TrackballError> {
        let queue = Rc::clone(&self.queue);
        let enabled = Rc::clone(&self.enabled);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if !enabled.get() {
                return;
            }
            if swallows_default(signal) {
                event.prevent_default();
                event.stop_propagation();
            }
            if let Some(input) = translate(signal, &event) {
                queue.borrow_mut().push_back(input);
            }
        });

        let target = self.target(scope);
        let options = AddEventListenerOptions::new();
        // wheel and touch listeners must be active to cancel scrolling
        options.set_passive(false);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                signal.dom_name(),
                callback.as_ref().unchecked_ref::<js_sys::Function>(),
                &options,
            )
            .map_err(|e| {
                TrackballError::Subscribe(format!(
                    "{}: {e:?}",
                    signal.dom_name()
                ))
            })?;

        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let _ = self.listeners.insert(
            id,
            Registration {
                target,
                signal,
                callback,
            },
        );
        Ok(id)
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        let Some(reg) = self.listeners.remove(&id) else {
            return;
        };
        if let Err(e) = reg.target.remove_event_listener_with_callback(
            reg.signal.dom_name(),
            reg.callback.as_ref().unchecked_ref::<js_sys::Function>(),
        ) {
            log::warn!(
                "removing {} listener failed: {e:?}",
                reg.signal.dom_name()
            );
        }
    }
}

fn swallows_default(signal: InputSignal) -> bool {
    matches!(
        signal,
        InputSignal::ContextMenu
            | InputSignal::PointerDown
            | InputSignal::PointerMove
            | InputSignal::PointerUp
            | InputSignal::Wheel
            | InputSignal::TouchStart
            | InputSignal::TouchMove
    )
}

fn translate(signal: InputSignal, event: &Event) -> Option<InputEvent> {
    match signal {
        InputSignal::PointerDown => {
            let e = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerDown {
                button: MouseButton::from_dom(e.button()),
                x: f64::from(e.page_x()),
                y: f64::from(e.page_y()),
            })
        }
        InputSignal::PointerMove => {
            let e = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerMove {
                x: f64::from(e.page_x()),
                y: f64::from(e.page_y()),
            })
        }
        InputSignal::PointerUp => {
            let e = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerUp {
                button: MouseButton::from_dom(e.button()),
            })
        }
        InputSignal::Wheel => {
            let e = event.dyn_ref::<WheelEvent>()?;
            Some(InputEvent::Wheel {
                delta_y: e.delta_y(),
                mode: WheelDeltaMode::from_dom(e.delta_mode()),
            })
        }
        InputSignal::TouchStart => Some(InputEvent::TouchStart {
            touches: touches(event)?,
        }),
        InputSignal::TouchMove => Some(InputEvent::TouchMove {
            touches: touches(event)?,
        }),
        InputSignal::TouchEnd => Some(InputEvent::TouchEnd {
            touches: touches(event)?,
        }),
        InputSignal::KeyDown => {
            let e = event.dyn_ref::<KeyboardEvent>()?;
            Some(InputEvent::KeyDown { code: e.code() })
        }
        InputSignal::KeyUp => {
            let e = event.dyn_ref::<KeyboardEvent>()?;
            Some(InputEvent::KeyUp { code: e.code() })
        }
        InputSignal::ContextMenu => Some(InputEvent::ContextMenu),
        InputSignal::Resize => Some(InputEvent::Resize),
    }
}

/// Fingers still on the surface, in page coordinates.
fn touches(event: &Event) -> Option<Vec<TouchPoint>> {
    let list = event.dyn_ref::<TouchEvent>()?.touches();
    Some(
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| {
                TouchPoint::new(f64::from(t.page_x()), f64::from(t.page_y()))
            })
            .collect(),
    )
}

/// Trackball bound to a canvas, driven from `requestAnimationFrame`.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WebTrackball {
    controls: TrackballControls<CanvasSurface>,
    throttle: ResizeThrottle,
}

impl WebTrackball {
    /// Controller for `camera` orbiting `target` on `surface`.
    pub fn with_camera(
        surface: CanvasSurface,
        camera: Camera,
        target: DVec3,
        options: Options,
    ) -> Result<Self, TrackballError> {
        Ok(Self {
            controls: TrackballControls::new(camera, target, surface, options)?,
            throttle: ResizeThrottle::default(),
        })
    }

    /// The wrapped controller.
    #[must_use]
    pub fn controls(&self) -> &TrackballControls<CanvasSurface> {
        &self.controls
    }

    /// Mutable access to the wrapped controller.
    pub fn controls_mut(&mut self) -> &mut TrackballControls<CanvasSurface> {
        &mut self.controls
    }

    fn step(&mut self) -> Result<bool, TrackballError> {
        for event in self.controls.surface().drain() {
            if let InputEvent::Resize = event {
                if self.throttle.request_now() {
                    self.controls.handle_resize();
                }
                continue;
            }
            self.controls.handle_event(&event)?;
        }
        if self.throttle.poll_now() {
            self.controls.handle_resize();
        }
        self.controls.update()
    }
}

impl From<TrackballError> for JsValue {
    fn from(e: TrackballError) -> Self {
        Self::from_str(&e.to_string())
    }
}

#[wasm_bindgen]
impl WebTrackball {
    /// Perspective controller on canvas `#canvas_id`, camera at
    /// `(x, y, z)` looking at the origin.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Self, JsValue> {
        let surface = CanvasSurface::from_element_id(canvas_id)?;
        let rect = surface.bounding_rect();
        let aspect = if rect.height > 0.0 {
            rect.width / rect.height
        } else {
            1.0
        };
        let camera = Camera::perspective(DVec3::new(x, y, z), 50.0, aspect);
        Ok(Self::with_camera(
            surface,
            camera,
            DVec3::ZERO,
            Options::default(),
        )?)
    }

    /// Process queued input and advance one frame. Returns whether the
    /// camera changed.
    pub fn frame(&mut self) -> Result<bool, JsValue> {
        Ok(self.step()?)
    }

    /// Apply options from TOML text.
    #[wasm_bindgen(js_name = loadOptions)]
    pub fn load_options(&mut self, toml: &str) -> Result<(), JsValue> {
        *self.controls.options_mut() = Options::from_toml(toml)?;
        Ok(())
    }

    /// Pause or resume input.
    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.controls.surface().set_enabled(enabled);
        self.controls.set_enabled(enabled);
    }

    /// Return to the initial pose.
    pub fn reset(&mut self) {
        self.controls.reset();
    }

    /// Remove every DOM listener.
    pub fn dispose(&mut self) {
        self.controls.dispose();
    }

    /// Column-major view-projection matrix.
    #[wasm_bindgen(js_name = viewProjection)]
    pub fn view_projection(&self) -> Vec<f32> {
        self.controls.camera().build_matrix().as_mat4().to_cols_array().to_vec()
    }

    /// Camera position as `[x, y, z]`.
    #[wasm_bindgen(js_name = cameraPosition)]
    pub fn camera_position(&self) -> Vec<f64> {
        self.controls.camera().position.to_array().to_vec()
    }
}
