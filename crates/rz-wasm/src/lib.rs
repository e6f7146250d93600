//! WASM bridge for Resizr: exposes the resize frame and the toolbar tool
//! to the Storybook addon's JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The preview decorator owns a
//! `ResizrFrame`; the manager toolbar owns a `ResizrTool`. Both are handed
//! the globals accessors and the channel's `emit`, and get channel events
//! forwarded back through `on_pending_size_changed`.
//!
//! Every method borrows its state with `try_borrow_mut`: a JS callback that
//! re-enters the same object (a synchronous channel echo, say) is dropped
//! instead of panicking.

mod host;

pub use host::{
    IframeSurface, JsChannel, JsStore, PREVIEW_SELECTOR, WebDragHost, parse_pending_payload,
    pending_payload,
};

use js_sys::Function;
use rz_core::constants::{
    ADDON_ID, HEIGHT_KEY, PARAM_KEY, PENDING_SIZE_CHANGED, PREVIEW_ID, TOOL_ID, WIDTH_KEY,
};
use rz_core::ResizrParameters;
use rz_editor::commands::ToolbarCommand;
use rz_editor::frame::{Overlay, ResizeFrame};
use rz_editor::input::{Direction, PointerEvent};
use rz_editor::toolbar::Toolbar;
use serde_json::json;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent};

type WebFrame = ResizeFrame<JsStore, JsChannel, IframeSurface, WebDragHost>;

// ─── Frame ───────────────────────────────────────────────────────────────

/// The resize frame around the preview iframe.
#[wasm_bindgen]
pub struct ResizrFrame {
    inner: Rc<RefCell<WebFrame>>,
    /// Called after document-level drag events change the overlay.
    on_change: Function,
}

#[wasm_bindgen]
impl ResizrFrame {
    /// `wrapper` is the element the iframe is laid out in. `read_globals()`
    /// returns the globals object, `write_globals(json)` updates it, and
    /// `emit(event, json)` publishes on the channel.
    #[wasm_bindgen(constructor)]
    pub fn new(
        params_json: &str,
        wrapper: HtmlElement,
        read_globals: Function,
        write_globals: Function,
        emit: Function,
        on_change: Function,
    ) -> Result<ResizrFrame, JsValue> {
        console_error_panic_hook_setup();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("resizr: no document"))?;
        let params = parse_params(params_json);
        let store = JsStore::new(read_globals, write_globals);
        let channel = JsChannel::new(emit);
        let surface = IframeSurface::new(document.clone(), wrapper);

        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<WebFrame>>| {
            let (frame, notify) = (weak.clone(), on_change.clone());
            let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
                let (x, y) = client_position(&e);
                dispatch(&frame, &notify, PointerEvent::Move { x, y });
            });
            let (frame, notify) = (weak.clone(), on_change.clone());
            let on_up = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
                let (x, y) = client_position(&e);
                dispatch(&frame, &notify, PointerEvent::Up { x, y });
            });
            let host = WebDragHost::new(document, on_move, on_up);
            RefCell::new(ResizeFrame::new(params, store, channel, surface, host))
        });

        Ok(Self { inner, on_change })
    }

    /// Mouse-down on a handle (`"horizontal"`, `"vertical"`, `"both"`).
    pub fn pointer_down(&self, x: f64, y: f64, handle: &str) -> bool {
        let handle = Direction::from_name(handle);
        self.with_frame(false, |f| {
            f.handle_pointer(&PointerEvent::Down { x, y, handle })
        })
    }

    /// Mouse-move over the preview wrapper.
    pub fn pointer_move(&self, x: f64, y: f64) -> bool {
        self.with_frame(false, |f| f.handle_pointer(&PointerEvent::Move { x, y }))
    }

    /// Mouse-move inside the iframe, in the iframe's own coordinates.
    pub fn nested_pointer_move(&self, x: f64, y: f64) -> bool {
        self.with_frame(false, |f| {
            f.handle_nested_pointer_move(rz_core::Point::new(x, y))
        })
    }

    /// Channel event `storybook-addon-resizr/pending-size-changed`.
    pub fn on_pending_size_changed(&self, payload_json: &str) -> bool {
        let size = parse_pending_payload(payload_json);
        self.with_frame(false, |f| f.on_pending_size_changed(size))
    }

    /// The `resizrWidth` / `resizrHeight` globals changed.
    pub fn on_globals_changed(&self) -> bool {
        self.with_frame(false, |f| f.on_persisted_changed())
    }

    /// The iframe or its wrapper was resized.
    pub fn on_layout_changed(&self) -> bool {
        self.with_frame(false, |f| f.on_layout_changed())
    }

    /// New story parameters. Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn set_params(&self, params_json: &str) -> String {
        match ResizrParameters::from_json(params_json) {
            Ok(params) => {
                self.with_frame((), |f| f.set_params(params));
                r#"{"ok":true}"#.to_string()
            }
            Err(e) => error_json(&e.to_string()),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.inner
            .try_borrow()
            .map(|f| f.is_dragging())
            .unwrap_or(false)
    }

    /// Overlay render state as JSON.
    pub fn overlay(&self) -> String {
        match self.inner.try_borrow() {
            Ok(f) => overlay_json(&f.overlay()),
            Err(_) => overlay_json(&Overlay::default()),
        }
    }

    /// Ask the host to re-render.
    pub fn notify(&self) {
        let _ = self.on_change.call0(&JsValue::NULL);
    }
}

impl ResizrFrame {
    fn with_frame<R>(&self, busy: R, f: impl FnOnce(&mut WebFrame) -> R) -> R {
        match self.inner.try_borrow_mut() {
            Ok(mut frame) => f(&mut frame),
            Err(_) => {
                log::debug!("frame busy; dropping re-entrant call");
                busy
            }
        }
    }
}

fn client_position(e: &MouseEvent) -> (f64, f64) {
    (f64::from(e.client_x()), f64::from(e.client_y()))
}

/// Route a document-level mouse event into the frame, then notify outside
/// the borrow.
fn dispatch(frame: &Weak<RefCell<WebFrame>>, notify: &Function, event: PointerEvent) {
    let Some(rc) = frame.upgrade() else {
        return;
    };
    let changed = match rc.try_borrow_mut() {
        Ok(mut frame) => frame.handle_pointer(&event),
        Err(_) => return,
    };
    if changed {
        let _ = notify.call0(&JsValue::NULL);
    }
}

fn overlay_json(o: &Overlay) -> String {
    json!({
        "rect": o.rect.map(|r| json!({
            "x": r.x0,
            "y": r.y0,
            "width": r.width(),
            "height": r.height(),
        })),
        "handlesVisible": o.handles_visible,
        "capturePointer": o.capture_pointer,
        "activeHandle": o.active_handle.map(|d| d.as_str()),
        "dimensionLabel": o.dimension_label,
    })
    .to_string()
}

// ─── Toolbar tool ────────────────────────────────────────────────────────

/// The size button and preset menu in the manager toolbar.
#[wasm_bindgen]
pub struct ResizrTool {
    inner: RefCell<Toolbar<JsStore, JsChannel>>,
}

#[wasm_bindgen]
impl ResizrTool {
    #[wasm_bindgen(constructor)]
    pub fn new(
        params_json: &str,
        read_globals: Function,
        write_globals: Function,
        emit: Function,
    ) -> ResizrTool {
        console_error_panic_hook_setup();
        let params = parse_params(params_json);
        Self {
            inner: RefCell::new(Toolbar::new(
                &params,
                JsStore::new(read_globals, write_globals),
                JsChannel::new(emit),
            )),
        }
    }

    /// Tool match: story view mode with no addon tab selected.
    pub fn is_visible(&self, view_mode: &str, tab_id: Option<String>) -> bool {
        self.inner
            .try_borrow()
            .map(|t| t.is_visible(view_mode, tab_id.as_deref()))
            .unwrap_or(false)
    }

    /// Toolbar render state:
    /// `{selection, label, active, affordances, menu}`.
    pub fn state(&self) -> String {
        let Ok(t) = self.inner.try_borrow() else {
            return error_json("toolbar busy");
        };
        json!({
            "selection": t.selection().as_str(),
            "label": t.display_label(),
            "active": t.is_active(),
            "affordances": t.affordances(),
            "menu": t.menu(),
        })
        .to_string()
    }

    /// Run `"select"` (with the entry id), `"rotate"`, `"reset"` or
    /// `"persist"`. Returns `true` if the size changed.
    pub fn run(&self, action: &str, arg: Option<String>) -> bool {
        let Some(command) = ToolbarCommand::from_name(action, arg.as_deref()) else {
            log::warn!("unknown toolbar action {action:?}");
            return false;
        };
        match self.inner.try_borrow_mut() {
            Ok(mut t) => t.run(command),
            Err(_) => false,
        }
    }

    /// Channel event `storybook-addon-resizr/pending-size-changed`.
    pub fn on_pending_size_changed(&self, payload_json: &str) -> bool {
        let size = parse_pending_payload(payload_json);
        match self.inner.try_borrow_mut() {
            Ok(mut t) => t.on_pending_size_changed(size),
            Err(_) => false,
        }
    }

    pub fn set_params(&self, params_json: &str) -> String {
        match ResizrParameters::from_json(params_json) {
            Ok(params) => {
                if let Ok(mut t) = self.inner.try_borrow_mut() {
                    t.set_params(&params);
                }
                r#"{"ok":true}"#.to_string()
            }
            Err(e) => error_json(&e.to_string()),
        }
    }
}

// ─── Standalone functions ────────────────────────────────────────────────

/// Identifiers the registration code needs, plus the initial globals.
#[wasm_bindgen]
pub fn addon_manifest() -> String {
    json!({
        "addonId": ADDON_ID,
        "toolId": TOOL_ID,
        "previewId": PREVIEW_ID,
        "parameterKey": PARAM_KEY,
        "pendingSizeChanged": PENDING_SIZE_CHANGED,
        "initialGlobals": {
            WIDTH_KEY: null,
            HEIGHT_KEY: null,
        },
    })
    .to_string()
}

/// Validate a parameters document. Returns `{"ok":true}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_params(params_json: &str) -> String {
    match ResizrParameters::from_json(params_json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => error_json(&e.to_string()),
    }
}

fn parse_params(json: &str) -> ResizrParameters {
    ResizrParameters::from_json(json).unwrap_or_else(|e| {
        log::warn!("invalid resizr parameters, using defaults: {e}");
        ResizrParameters::default()
    })
}

fn error_json(message: &str) -> String {
    json!({ "ok": false, "error": message }).to_string()
}

// ─── Panic hook ──────────────────────────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Resizr WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
