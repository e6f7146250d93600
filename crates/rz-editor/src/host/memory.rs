//! In-memory host: store, channel, surface, and drag host backed by plain
//! data. Used by native embeddings and by the tests.
//!
//! Everything here is single-threaded (`Rc<RefCell<_>>`), matching the UI
//! event loop the real host runs on.

use super::{DragHost, IntrospectionDenied, PendingChannel, ResizableSurface, SizeStore};
use rz_core::constants::{HEIGHT_KEY, WIDTH_KEY};
use rz_core::{Point, Rect, Size, SizeRecord};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

// ─── Store ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct StoreState {
    values: Map<String, Value>,
    writes: usize,
}

/// Flat key-value store holding `resizrWidth` / `resizrHeight`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<StoreState>>,
}

impl MemoryStore {
    /// A store with both keys initialised to `null`.
    pub fn new() -> Self {
        let store = Self::default();
        store.set_raw(WIDTH_KEY, Value::Null);
        store.set_raw(HEIGHT_KEY, Value::Null);
        store
    }

    /// Write a raw value, as a URL rehydration would. Not counted as a write.
    pub fn set_raw(&self, key: &str, value: Value) {
        self.state.borrow_mut().values.insert(key.to_string(), value);
    }

    pub fn raw(&self, key: &str) -> Value {
        self.state
            .borrow()
            .values
            .get(key)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Number of `save` calls so far.
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }
}

impl SizeStore for MemoryStore {
    fn load(&self) -> Option<Size> {
        let record = SizeRecord::from_store_values(&self.raw(WIDTH_KEY), &self.raw(HEIGHT_KEY));
        match record {
            Ok(record) => record.into_size(),
            Err(e) => {
                log::warn!("ignoring persisted size: {e}");
                None
            }
        }
    }

    fn save(&self, size: Option<Size>) {
        let (width, height) = SizeRecord::from(size).to_store_values();
        let mut state = self.state.borrow_mut();
        state.values.insert(WIDTH_KEY.to_string(), width);
        state.values.insert(HEIGHT_KEY.to_string(), height);
        state.writes += 1;
    }
}

// ─── Channel ─────────────────────────────────────────────────────────────

type Handler = Box<dyn FnMut(Option<Size>)>;

#[derive(Default)]
struct ChannelState {
    subscribers: Vec<(u64, Handler)>,
    /// Ids unsubscribed while their handler list was checked out for delivery.
    removed: Vec<u64>,
    queue: VecDeque<Option<Size>>,
    history: Vec<Option<Size>>,
    delivering: bool,
    next_id: u64,
}

/// Publish/subscribe channel for the pending size.
///
/// Messages published from inside a handler are queued and delivered after
/// the current message, so every subscriber sees messages in publish order.
#[derive(Clone, Default)]
pub struct LocalChannel {
    state: Rc<RefCell<ChannelState>>,
}

/// Keeps a handler subscribed; unsubscribes on drop.
pub struct Subscription {
    id: u64,
    channel: Weak<RefCell<ChannelState>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(state) = self.channel.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        if let Some(pos) = state.subscribers.iter().position(|(id, _)| *id == self.id) {
            state.subscribers.remove(pos);
        } else if state.delivering {
            state.removed.push(self.id);
        }
    }
}

impl LocalChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl FnMut(Option<Size>) + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push((id, Box::new(handler)));
        Subscription {
            id,
            channel: Rc::downgrade(&self.state),
        }
    }

    /// Every message published so far, oldest first.
    pub fn history(&self) -> Vec<Option<Size>> {
        self.state.borrow().history.clone()
    }

    pub fn last(&self) -> Option<Option<Size>> {
        self.state.borrow().history.last().copied()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    fn deliver(&self) {
        loop {
            let next = self.state.borrow_mut().queue.pop_front();
            let Some(message) = next else {
                break;
            };
            // Check the handlers out so they may publish or subscribe.
            let mut handlers = std::mem::take(&mut self.state.borrow_mut().subscribers);
            for (_, handler) in handlers.iter_mut() {
                handler(message);
            }
            let mut state = self.state.borrow_mut();
            let removed = std::mem::take(&mut state.removed);
            handlers.retain(|(id, _)| !removed.contains(id));
            handlers.append(&mut state.subscribers);
            state.subscribers = handlers;
        }
    }
}

impl PendingChannel for LocalChannel {
    fn publish(&self, size: Option<Size>) {
        {
            let mut state = self.state.borrow_mut();
            state.history.push(size);
            state.queue.push_back(size);
            if state.delivering {
                return;
            }
            state.delivering = true;
        }
        self.deliver();
        self.state.borrow_mut().delivering = false;
    }
}

// ─── Surface ─────────────────────────────────────────────────────────────

/// How the surface is placed inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Flush with the container's left edge.
    Start,
    /// Horizontally centered.
    Center,
}

/// A surface laid out against a fixed container. Without an applied size
/// it fills the container.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    pub container: Rect,
    pub alignment: Alignment,
    pub mounted: bool,
    /// Whether nested content may be introspected (same-origin).
    pub introspectable: bool,
    applied: Option<Size>,
    apply_calls: usize,
}

impl MemorySurface {
    pub fn new(container: Rect, alignment: Alignment) -> Self {
        Self {
            container,
            alignment,
            mounted: true,
            introspectable: true,
            applied: None,
            apply_calls: 0,
        }
    }

    /// Current inline size.
    pub fn applied(&self) -> Option<Size> {
        self.applied
    }

    pub fn apply_calls(&self) -> usize {
        self.apply_calls
    }
}

impl ResizableSurface for MemorySurface {
    fn bounds(&self) -> Option<Rect> {
        if !self.mounted {
            return None;
        }
        let c = self.container;
        let (w, h) = match self.applied {
            Some(s) => (f64::from(s.width), f64::from(s.height)),
            None => (c.width(), c.height()),
        };
        let x0 = match self.alignment {
            Alignment::Start => c.x0,
            Alignment::Center => c.x0 + (c.width() - w) / 2.0,
        };
        Some(Rect::new(x0, c.y0, x0 + w, c.y0 + h))
    }

    fn container_bounds(&self) -> Option<Rect> {
        Some(self.container)
    }

    fn apply_size(&mut self, size: Option<Size>) {
        self.applied = size;
        self.apply_calls += 1;
    }

    fn content_origin(&self) -> Result<Point, IntrospectionDenied> {
        if !self.introspectable {
            return Err(IntrospectionDenied {
                reason: "cross-origin content".to_string(),
            });
        }
        self.bounds()
            .map(|r| r.origin())
            .ok_or_else(|| IntrospectionDenied {
                reason: "surface not mounted".to_string(),
            })
    }
}

// ─── Drag host ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct DragHostState {
    cursor: String,
    user_select: String,
    attached: usize,
    attach_calls: usize,
    detach_calls: usize,
}

/// Records body styles and listener registration.
#[derive(Debug, Clone, Default)]
pub struct MemoryDragHost {
    state: Rc<RefCell<DragHostState>>,
}

impl MemoryDragHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_styles(cursor: &str, user_select: &str) -> Self {
        let host = Self::default();
        {
            let mut s = host.state.borrow_mut();
            s.cursor = cursor.to_string();
            s.user_select = user_select.to_string();
        }
        host
    }

    /// Listener sets currently attached. Never more than one.
    pub fn attached_listener_sets(&self) -> usize {
        self.state.borrow().attached
    }

    pub fn attach_calls(&self) -> usize {
        self.state.borrow().attach_calls
    }

    pub fn detach_calls(&self) -> usize {
        self.state.borrow().detach_calls
    }
}

impl DragHost for MemoryDragHost {
    fn cursor(&self) -> String {
        self.state.borrow().cursor.clone()
    }

    fn set_cursor(&mut self, cursor: &str) {
        self.state.borrow_mut().cursor = cursor.to_string();
    }

    fn user_select(&self) -> String {
        self.state.borrow().user_select.clone()
    }

    fn set_user_select(&mut self, value: &str) {
        self.state.borrow_mut().user_select = value.to_string();
    }

    fn attach_pointer_listeners(&mut self) {
        let mut s = self.state.borrow_mut();
        s.attached += 1;
        s.attach_calls += 1;
    }

    fn detach_pointer_listeners(&mut self) {
        let mut s = self.state.borrow_mut();
        s.attached = s.attached.saturating_sub(1);
        s.detach_calls += 1;
    }
}
