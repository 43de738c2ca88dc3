//! Browser bindings (WASM only)
//!
//! Mounts the particle field on a canvas with a requestAnimationFrame loop,
//! and wires the verification gate to its form. Both return handles whose
//! `stop()` cancels pending work and removes every listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Event, EventTarget, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement, Window,
};

use crate::field::{FieldAnimator, FrameOutcome};
use crate::gate::{Gate, GateView, Navigator, sanitize_answer, verify};
use crate::lifecycle::{CallbackSlot, CancelToken};
use crate::renderer::CanvasSurface;
use crate::settings::{FieldConfig, GateConfig};

/// DOM element ids the page provides
pub mod ids {
    pub const CANVAS: &str = "particle-field";
    pub const FORM: &str = "verification-form";
    pub const CHALLENGE: &str = "challenge";
    pub const ANSWER: &str = "answer";
    pub const SUBMIT: &str = "verify-btn";
    pub const REFRESH: &str = "refresh-btn";
    pub const MESSAGE: &str = "gate-error";
    pub const MESSAGE_TEXT: &str = "gate-error-text";
    pub const DISMISS: &str = "gate-error-dismiss";
    pub const ATTEMPTS: &str = "attempts";
}

/// An event listener that unregisters itself when dropped
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(target: EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to listen for {}: {:?}", event, e);
        }
        Self {
            target,
            event,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Current window size in CSS pixels
pub fn viewport(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

// ---------------------------------------------------------------------------
// Particle field
// ---------------------------------------------------------------------------

type CanvasAnimator = FieldAnimator<CanvasSurface>;
type FrameCallback = Closure<dyn FnMut(f64)>;

/// A mounted particle background
pub struct FieldHandle {
    window: Window,
    animator: Rc<RefCell<CanvasAnimator>>,
    frame_id: Rc<Cell<Option<i32>>>,
    callback: CallbackSlot<FrameCallback>,
    resize: Option<Listener>,
}

/// Start the particle field on `canvas`. Returns `None` (and draws nothing)
/// when the canvas has no 2D context or the viewport is empty.
pub fn mount_field(window: &Window, canvas: HtmlCanvasElement, config: FieldConfig, seed: u64) -> Option<FieldHandle> {
    let surface = match CanvasSurface::new(canvas) {
        Ok(surface) => surface,
        Err(e) => {
            log::warn!("Particle field disabled: {}", e);
            return None;
        }
    };
    let animator = match FieldAnimator::start(surface, viewport(window), config, seed) {
        Ok(animator) => animator,
        Err(e) => {
            log::warn!("Particle field disabled: {}", e);
            return None;
        }
    };

    let animator = Rc::new(RefCell::new(animator));
    let frame_id = Rc::new(Cell::new(None));
    let callback = CallbackSlot::new();

    let resize = {
        let animator = animator.clone();
        let win = window.clone();
        Listener::new(window.clone().into(), "resize", move |_event: Event| {
            let (w, h) = viewport(&win);
            animator.borrow_mut().resize(w, h);
        })
    };

    let token = animator.borrow().token();
    callback.set(frame_callback(
        window,
        animator.clone(),
        frame_id.clone(),
        callback.clone(),
        token.clone(),
    ));
    request_frame(window, &callback, &frame_id, &token);

    Some(FieldHandle {
        window: window.clone(),
        animator,
        frame_id,
        callback,
        resize: Some(resize),
    })
}

/// The per-frame callback. It re-arms itself only after the frame completes,
/// so frames never overlap.
fn frame_callback(
    window: &Window,
    animator: Rc<RefCell<CanvasAnimator>>,
    frame_id: Rc<Cell<Option<i32>>>,
    callback: CallbackSlot<FrameCallback>,
    token: CancelToken,
) -> FrameCallback {
    let window = window.clone();
    Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
        frame_id.set(None);
        if token.is_cancelled() {
            return;
        }
        let outcome = animator.borrow_mut().frame();
        if outcome == FrameOutcome::Continue {
            request_frame(&window, &callback, &frame_id, &token);
        }
    })
}

/// Queue the next frame unless the loop was stopped
fn request_frame(
    window: &Window,
    callback: &CallbackSlot<FrameCallback>,
    frame_id: &Cell<Option<i32>>,
    token: &CancelToken,
) {
    if token.is_cancelled() {
        return;
    }
    let requested = callback.with(|closure| window.request_animation_frame(closure.as_ref().unchecked_ref()));
    match requested {
        Some(Ok(id)) => frame_id.set(Some(id)),
        Some(Err(e)) => log::warn!("requestAnimationFrame failed: {:?}", e),
        None => {}
    }
}

impl FieldHandle {
    /// Cancel the loop and any queued frame, then release the frame callback
    /// and the resize listener
    pub fn stop(&mut self) {
        self.animator.borrow_mut().stop();
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.release();
        self.resize = None;
    }
}

impl Drop for FieldHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

// ---------------------------------------------------------------------------
// Verification gate
// ---------------------------------------------------------------------------

/// Navigates by assigning `window.location`
struct LocationNavigator {
    window: Window,
}

impl Navigator for LocationNavigator {
    fn navigate(&mut self, target: &str) {
        log::info!("Redirecting to {}", target);
        if let Err(e) = self.window.location().assign(target) {
            log::error!("Navigation to {} failed: {:?}", target, e);
        }
    }
}

/// The `redirect` query parameter of the current page
pub fn redirect_param(window: &Window) -> Option<String> {
    let search = window.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()?.get("redirect")
}

/// Resolve after `ms` milliseconds
pub async fn sleep_ms(window: &Window, ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
    });
    let _ = JsFuture::from(promise).await;
}

/// Push the gate's current state into the form
fn render_gate(document: &Document, view: &GateView) {
    if let Some(el) = document.get_element_by_id(ids::CHALLENGE) {
        el.set_text_content(Some(&view.challenge));
    }
    if let Some(el) = document.get_element_by_id(ids::ATTEMPTS) {
        el.set_text_content(Some(&view.attempts));
    }
    if let Some(input) = element::<HtmlInputElement>(document, ids::ANSWER) {
        if input.value() != view.answer {
            input.set_value(&view.answer);
        }
        input.set_disabled(!view.input_enabled);
    }
    if let Some(btn) = element::<HtmlButtonElement>(document, ids::SUBMIT) {
        btn.set_disabled(!view.submit_enabled);
        btn.set_text_content(Some(view.submit_label));
    }
    if let Some(el) = document.get_element_by_id(ids::MESSAGE) {
        match view.message {
            Some(text) => {
                if let Some(text_el) = document.get_element_by_id(ids::MESSAGE_TEXT) {
                    text_el.set_text_content(Some(text));
                }
                let _ = el.class_list().remove_1("hidden");
            }
            None => {
                let _ = el.class_list().add_1("hidden");
            }
        }
    }
}

/// A mounted verification form
pub struct GateHandle {
    gate: Rc<RefCell<Gate>>,
    token: CancelToken,
    listeners: Vec<Listener>,
}

impl GateHandle {
    /// Detach from the form. A verification still in its delay is dropped.
    pub fn stop(&mut self) {
        if self.token.is_active() {
            self.token.cancel();
            self.listeners.clear();
            log::info!(
                "Verification gate unmounted ({} attempts)",
                self.gate.borrow().attempts()
            );
        }
    }
}

impl Drop for GateHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Wire the gate to the page's verification form, if the page has one
pub fn mount_gate(window: &Window, document: &Document, config: &GateConfig, seed: u64) -> Option<GateHandle> {
    let form = document.get_element_by_id(ids::FORM)?;

    let redirect = redirect_param(window);
    let gate = match Gate::new(config, redirect.as_deref(), seed) {
        Ok(gate) => Rc::new(RefCell::new(gate)),
        Err(e) => {
            log::warn!("Verification gate disabled: {}", e);
            return None;
        }
    };
    let token = CancelToken::new();
    let delay_ms = config.verify_delay_ms;
    let mut listeners = Vec::new();

    // Submit
    {
        let gate = gate.clone();
        let token = token.clone();
        let window = window.clone();
        let document = document.clone();
        listeners.push(Listener::new(form.into(), "submit", move |event: Event| {
            event.prevent_default();
            if token.is_cancelled() {
                return;
            }
            let pending = match gate.borrow_mut().begin_submit() {
                Ok(pending) => pending,
                Err(e) => {
                    log::debug!("Submit ignored: {}", e);
                    return;
                }
            };
            render_gate(&document, &GateView::from(&*gate.borrow()));

            let gate = gate.clone();
            let token = token.clone();
            let window = window.clone();
            let document = document.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut navigator = LocationNavigator {
                    window: window.clone(),
                };
                let delay = sleep_ms(&window, delay_ms);
                if verify(&gate, pending, &token, delay, &mut navigator)
                    .await
                    .is_some()
                {
                    render_gate(&document, &GateView::from(&*gate.borrow()));
                }
            });
        }));
    }

    // Answer typing
    if let Some(input) = document.get_element_by_id(ids::ANSWER) {
        let gate = gate.clone();
        let document = document.clone();
        let field = input.clone();
        listeners.push(Listener::new(input.into(), "input", move |_event: Event| {
            if let Ok(field) = field.clone().dyn_into::<HtmlInputElement>() {
                gate.borrow_mut().set_answer(&sanitize_answer(&field.value()));
            }
            render_gate(&document, &GateView::from(&*gate.borrow()));
        }));
    }

    // "Generate new problem"
    if let Some(btn) = document.get_element_by_id(ids::REFRESH) {
        let gate = gate.clone();
        let document = document.clone();
        listeners.push(Listener::new(btn.into(), "click", move |_event: Event| {
            if let Err(e) = gate.borrow_mut().generate_challenge() {
                log::debug!("New problem refused: {}", e);
            }
            render_gate(&document, &GateView::from(&*gate.borrow()));
        }));
    }

    // Dismiss inline error
    if let Some(btn) = document.get_element_by_id(ids::DISMISS) {
        let gate = gate.clone();
        let document = document.clone();
        listeners.push(Listener::new(btn.into(), "click", move |_event: Event| {
            gate.borrow_mut().dismiss_message();
            render_gate(&document, &GateView::from(&*gate.borrow()));
        }));
    }

    render_gate(document, &GateView::from(&*gate.borrow()));

    Some(GateHandle {
        gate,
        token,
        listeners,
    })
}
