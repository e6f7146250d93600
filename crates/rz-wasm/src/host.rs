//! DOM and Storybook-API implementations of the editor's host traits.
//!
//! The store and the channel are plain JS callbacks handed over by the
//! addon's registration code; the surface and the drag host talk to the DOM.

use js_sys::Function;
use rz_core::constants::{HEIGHT_KEY, PENDING_SIZE_CHANGED, WIDTH_KEY};
use rz_core::{Point, Rect, Size, SizeRecord};
use rz_editor::host::{DragHost, IntrospectionDenied, PendingChannel, ResizableSurface, SizeStore};
use serde_json::{Map, Value};
use std::cell::Cell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlIFrameElement, MouseEvent};

/// The preview iframe rendered by Storybook.
pub const PREVIEW_SELECTOR: &str = "iframe[data-is-storybook=\"true\"]";

// ─── Store ───────────────────────────────────────────────────────────────

/// Storybook globals. `read` returns the globals object; `write` takes a
/// JSON string of the keys to update.
#[derive(Clone)]
pub struct JsStore {
    read: Function,
    write: Function,
}

impl JsStore {
    pub fn new(read: Function, write: Function) -> Self {
        Self { read, write }
    }

    fn globals(&self) -> Option<Map<String, Value>> {
        let raw = match self.read.call0(&JsValue::NULL) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("reading globals failed: {e:?}");
                return None;
            }
        };
        let json = js_sys::JSON::stringify(&raw).ok()?.as_string()?;
        serde_json::from_str(&json).ok()
    }
}

impl SizeStore for JsStore {
    fn load(&self) -> Option<Size> {
        let globals = self.globals()?;
        let width = globals.get(WIDTH_KEY).unwrap_or(&Value::Null);
        let height = globals.get(HEIGHT_KEY).unwrap_or(&Value::Null);
        match SizeRecord::from_store_values(width, height) {
            Ok(record) => record.into_size(),
            Err(e) => {
                log::warn!("ignoring persisted size: {e}");
                None
            }
        }
    }

    fn save(&self, size: Option<Size>) {
        let (width, height) = SizeRecord::from(size).to_store_values();
        let mut update = Map::new();
        update.insert(WIDTH_KEY.to_string(), width);
        update.insert(HEIGHT_KEY.to_string(), height);
        let payload = JsValue::from_str(&Value::Object(update).to_string());
        if let Err(e) = self.write.call1(&JsValue::NULL, &payload) {
            log::warn!("writing globals failed: {e:?}");
        }
    }
}

// ─── Channel ─────────────────────────────────────────────────────────────

/// Storybook channel. `emit(event, payloadJson)`.
#[derive(Clone)]
pub struct JsChannel {
    emit: Function,
}

impl JsChannel {
    pub fn new(emit: Function) -> Self {
        Self { emit }
    }
}

impl PendingChannel for JsChannel {
    fn publish(&self, size: Option<Size>) {
        let payload = pending_payload(size);
        let event = JsValue::from_str(PENDING_SIZE_CHANGED);
        if let Err(e) = self
            .emit
            .call2(&JsValue::NULL, &event, &JsValue::from_str(&payload))
        {
            log::warn!("emitting {PENDING_SIZE_CHANGED} failed: {e:?}");
        }
    }
}

/// Channel payload for a pending size: `{width, height}`, or `null` to clear.
pub fn pending_payload(size: Option<Size>) -> String {
    serde_json::to_string(&size).unwrap_or_else(|_| "null".to_string())
}

/// Parse a channel payload (`{width, height}` or `null`). A half-set pair
/// clears; malformed payloads clear with a warning.
pub fn parse_pending_payload(json: &str) -> Option<Size> {
    match serde_json::from_str::<Option<SizeRecord>>(json) {
        Ok(record) => record.and_then(SizeRecord::into_size),
        Err(e) => {
            log::warn!("malformed pending size payload: {e}");
            None
        }
    }
}

// ─── Surface ─────────────────────────────────────────────────────────────

fn client_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.right(), r.bottom())
}

/// The preview iframe inside its wrapper element.
pub struct IframeSurface {
    document: Document,
    wrapper: HtmlElement,
    /// Cross-origin already reported to the console.
    denied_reported: Cell<bool>,
}

impl IframeSurface {
    pub fn new(document: Document, wrapper: HtmlElement) -> Self {
        Self {
            document,
            wrapper,
            denied_reported: Cell::new(false),
        }
    }

    fn iframe(&self) -> Option<HtmlIFrameElement> {
        self.document
            .query_selector(PREVIEW_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlIFrameElement>().ok())
    }
}

impl ResizableSurface for IframeSurface {
    fn bounds(&self) -> Option<Rect> {
        self.iframe().map(|iframe| client_rect(&iframe))
    }

    fn container_bounds(&self) -> Option<Rect> {
        Some(client_rect(&self.wrapper))
    }

    fn apply_size(&mut self, size: Option<Size>) {
        let Some(iframe) = self.iframe() else {
            return;
        };
        let style = iframe.style();
        let result = match size {
            Some(s) => style
                .set_property("width", &format!("{}px", s.width))
                .and_then(|()| style.set_property("height", &format!("{}px", s.height))),
            None => style
                .remove_property("width")
                .and_then(|_| style.remove_property("height"))
                .map(|_| ()),
        };
        if let Err(e) = result {
            log::warn!("styling the preview iframe failed: {e:?}");
        }
    }

    fn content_origin(&self) -> Result<Point, IntrospectionDenied> {
        let iframe = self.iframe().ok_or_else(|| IntrospectionDenied {
            reason: "preview iframe not mounted".to_string(),
        })?;
        if iframe.content_document().is_none() {
            if !self.denied_reported.replace(true) {
                web_sys::console::warn_1(
                    &"resizr: preview iframe is cross-origin; edge detection inside it is disabled"
                        .into(),
                );
            }
            return Err(IntrospectionDenied {
                reason: "cross-origin preview iframe".to_string(),
            });
        }
        Ok(client_rect(&iframe).origin())
    }
}

// ─── Drag host ───────────────────────────────────────────────────────────

pub type MouseListener = Closure<dyn FnMut(MouseEvent)>;

/// Body styles plus document-level `mousemove` / `mouseup` listeners.
pub struct WebDragHost {
    document: Document,
    body: Option<HtmlElement>,
    on_move: MouseListener,
    on_up: MouseListener,
    attached: bool,
}

impl WebDragHost {
    pub fn new(document: Document, on_move: MouseListener, on_up: MouseListener) -> Self {
        let body = document.body();
        Self {
            document,
            body,
            on_move,
            on_up,
            attached: false,
        }
    }

    fn style_value(&self, name: &str) -> String {
        self.body
            .as_ref()
            .and_then(|b| b.style().get_property_value(name).ok())
            .unwrap_or_default()
    }

    fn set_style_value(&self, name: &str, value: &str) {
        let Some(body) = &self.body else {
            return;
        };
        if let Err(e) = body.style().set_property(name, value) {
            log::warn!("setting body {name} failed: {e:?}");
        }
    }

    fn listener_fn(listener: &MouseListener) -> &Function {
        listener.as_ref().unchecked_ref()
    }
}

impl DragHost for WebDragHost {
    fn cursor(&self) -> String {
        self.style_value("cursor")
    }

    fn set_cursor(&mut self, cursor: &str) {
        self.set_style_value("cursor", cursor);
    }

    fn user_select(&self) -> String {
        self.style_value("user-select")
    }

    fn set_user_select(&mut self, value: &str) {
        self.set_style_value("user-select", value);
    }

    fn attach_pointer_listeners(&mut self) {
        if self.attached {
            return;
        }
        let added = self
            .document
            .add_event_listener_with_callback("mousemove", Self::listener_fn(&self.on_move))
            .and_then(|()| {
                self.document
                    .add_event_listener_with_callback("mouseup", Self::listener_fn(&self.on_up))
            });
        match added {
            Ok(()) => self.attached = true,
            Err(e) => log::warn!("attaching drag listeners failed: {e:?}"),
        }
    }

    fn detach_pointer_listeners(&mut self) {
        if !self.attached {
            return;
        }
        let _ = self
            .document
            .remove_event_listener_with_callback("mousemove", Self::listener_fn(&self.on_move));
        let _ = self
            .document
            .remove_event_listener_with_callback("mouseup", Self::listener_fn(&self.on_up));
        self.attached = false;
    }
}

impl Drop for WebDragHost {
    fn drop(&mut self) {
        self.detach_pointer_listeners();
    }
}
