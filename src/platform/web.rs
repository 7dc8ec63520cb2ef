//! Browser gesture sources
//!
//! Two interchangeable sources feed the same recognizers. Pointer Events
//! are preferred; older hosts get raw touch + mouse listeners.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, PointerEvent, TouchEvent};

use super::input::{
    GestureConfig, GestureDelta, GestureHandler, GestureSource, MouseDrag, PointerKind,
    PointerTracker, TouchPoint, TwoFingerSwipe,
};
use crate::error::WalkError;

type SharedHandler = Rc<RefCell<Option<GestureHandler>>>;

struct Recognizers {
    mouse: MouseDrag,
    swipe: TwoFingerSwipe,
}

impl Recognizers {
    fn new(config: GestureConfig) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            mouse: MouseDrag::new(),
            swipe: TwoFingerSwipe::new(config),
        }))
    }
}

fn emit(handler: &SharedHandler, delta: Option<GestureDelta>) {
    let Some(delta) = delta else { return };
    if let Some(h) = handler.borrow_mut().as_mut() {
        h(delta);
    }
}

fn canvas_pos(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        client_x as f32 - rect.left() as f32,
        client_y as f32 - rect.top() as f32,
    )
}

fn listen<E>(canvas: &HtmlCanvasElement, event: &str, f: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(f);
    if canvas
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("Failed to listen for {}", event);
    }
    closure.forget();
}

/// Keep the browser from claiming touches on the canvas for scroll or zoom
fn disable_touch_action(canvas: &HtmlCanvasElement) {
    if canvas.style().set_property("touch-action", "none").is_err() {
        log::warn!("Failed to set touch-action on canvas");
    }
}

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

/// Pick the best gesture source the host supports
pub fn select_gesture_source(
    canvas: &HtmlCanvasElement,
    config: GestureConfig,
) -> Result<Box<dyn GestureSource>, WalkError> {
    let window = web_sys::window().ok_or(WalkError::NoGestureInput)?;
    let source: Box<dyn GestureSource> = if has_property(&window, "PointerEvent") {
        Box::new(PointerGestureSource::new(canvas.clone(), config))
    } else if has_property(&window, "ontouchstart") || has_property(&window, "onmousedown") {
        Box::new(TouchMouseGestureSource::new(canvas.clone(), config))
    } else {
        return Err(WalkError::NoGestureInput);
    };
    log::info!("Gesture input: {}", source.name());
    Ok(source)
}

/// Pointer Events: mouse pointers drag, touch pointers swipe in pairs
pub struct PointerGestureSource {
    canvas: HtmlCanvasElement,
    config: GestureConfig,
    handler: SharedHandler,
    installed: bool,
}

impl PointerGestureSource {
    pub fn new(canvas: HtmlCanvasElement, config: GestureConfig) -> Self {
        Self {
            canvas,
            config,
            handler: Rc::new(RefCell::new(None)),
            installed: false,
        }
    }

    fn install(&self) {
        disable_touch_action(&self.canvas);
        let state = Rc::new(RefCell::new(PointerTracker::new(self.config)));

        {
            let state = state.clone();
            let canvas = self.canvas.clone();
            listen(&self.canvas, "pointerdown", move |event: PointerEvent| {
                event.prevent_default();
                let pos = canvas_pos(&canvas, event.client_x(), event.client_y());
                let kind = PointerKind::from_pointer_type(&event.pointer_type());
                state.borrow_mut().down(kind, event.pointer_id(), pos);
            });
        }

        {
            let state = state.clone();
            let handler = self.handler.clone();
            let canvas = self.canvas.clone();
            listen(&self.canvas, "pointermove", move |event: PointerEvent| {
                let pos = canvas_pos(&canvas, event.client_x(), event.client_y());
                let kind = PointerKind::from_pointer_type(&event.pointer_type());
                let delta = state.borrow_mut().moved(kind, event.pointer_id(), pos);
                if delta.is_some() {
                    event.prevent_default();
                }
                emit(&handler, delta);
            });
        }

        for name in ["pointerup", "pointercancel", "pointerleave"] {
            let state = state.clone();
            listen(&self.canvas, name, move |event: PointerEvent| {
                let kind = PointerKind::from_pointer_type(&event.pointer_type());
                state.borrow_mut().up(kind, event.pointer_id());
            });
        }
    }
}

impl GestureSource for PointerGestureSource {
    fn name(&self) -> &'static str {
        "pointer-events"
    }

    fn on_gesture_delta(&mut self, handler: GestureHandler) -> Result<(), WalkError> {
        *self.handler.borrow_mut() = Some(handler);
        if !self.installed {
            self.install();
            self.installed = true;
        }
        Ok(())
    }
}

/// Raw `touch*` and `mouse*` listeners
pub struct TouchMouseGestureSource {
    canvas: HtmlCanvasElement,
    config: GestureConfig,
    handler: SharedHandler,
    installed: bool,
}

impl TouchMouseGestureSource {
    pub fn new(canvas: HtmlCanvasElement, config: GestureConfig) -> Self {
        Self {
            canvas,
            config,
            handler: Rc::new(RefCell::new(None)),
            installed: false,
        }
    }

    fn touch_points(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Vec<TouchPoint> {
        let list = event.touches();
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| TouchPoint {
                id: t.identifier(),
                pos: canvas_pos(canvas, t.client_x(), t.client_y()),
            })
            .collect()
    }

    fn install(&self) {
        disable_touch_action(&self.canvas);
        let state = Recognizers::new(self.config);

        {
            let state = state.clone();
            let canvas = self.canvas.clone();
            listen(&self.canvas, "mousedown", move |event: MouseEvent| {
                event.prevent_default();
                let pos = canvas_pos(&canvas, event.client_x(), event.client_y());
                state.borrow_mut().mouse.press(pos);
            });
        }

        {
            let state = state.clone();
            let handler = self.handler.clone();
            let canvas = self.canvas.clone();
            listen(&self.canvas, "mousemove", move |event: MouseEvent| {
                let pos = canvas_pos(&canvas, event.client_x(), event.client_y());
                let delta = state.borrow_mut().mouse.move_to(pos);
                if delta.is_some() {
                    event.prevent_default();
                }
                emit(&handler, delta);
            });
        }

        for name in ["mouseup", "mouseleave"] {
            let state = state.clone();
            listen(&self.canvas, name, move |_event: MouseEvent| {
                state.borrow_mut().mouse.release();
            });
        }

        {
            let state = state.clone();
            let canvas = self.canvas.clone();
            listen(&self.canvas, "touchstart", move |event: TouchEvent| {
                let touches = Self::touch_points(&canvas, &event);
                if touches.len() == 2 {
                    event.prevent_default();
                }
                state.borrow_mut().swipe.touch_start(&touches);
            });
        }

        {
            let state = state.clone();
            let handler = self.handler.clone();
            let canvas = self.canvas.clone();
            listen(&self.canvas, "touchmove", move |event: TouchEvent| {
                let touches = Self::touch_points(&canvas, &event);
                if touches.len() == 2 {
                    event.prevent_default();
                }
                let delta = state.borrow_mut().swipe.touch_move(&touches);
                emit(&handler, delta);
            });
        }

        for name in ["touchend", "touchcancel"] {
            let state = state.clone();
            listen(&self.canvas, name, move |_event: TouchEvent| {
                state.borrow_mut().swipe.touch_end();
            });
        }
    }
}

impl GestureSource for TouchMouseGestureSource {
    fn name(&self) -> &'static str {
        "touch-mouse"
    }

    fn on_gesture_delta(&mut self, handler: GestureHandler) -> Result<(), WalkError> {
        *self.handler.borrow_mut() = Some(handler);
        if !self.installed {
            self.install();
            self.installed = true;
        }
        Ok(())
    }
}
