//! Size sync: persisted ↔ pending ↔ effective, plus surface tracking.
//!
//! Every UI context (the frame around the preview, the toolbar tool) owns a
//! `SizeSync` over the same shared store and channel:
//!
//! - **Persisted**: lives in the host store. Authoritative for reloads and
//!   bookmarks; writing it makes the host reload the previewed content.
//!
//! - **Pending**: the live size, broadcast over the channel and mirrored
//!   locally. Drags and rotations land here so the preview updates without
//!   a reload.
//!
//! - **Effective**: pending if present, else persisted, else natural.
//!
//! `SurfaceTracker` keeps the surface's box relative to its container and
//! answers the hover question: is the pointer close enough to an edge to
//! reveal the resize handles?

use crate::host::{PendingChannel, ResizableSurface, SizeStore};
use rz_core::{Point, Size, SurfaceBox};

pub struct SizeSync<S, C> {
    store: S,
    channel: C,
    /// Local mirror of the channel's pending size.
    pending: Option<Size>,
}

impl<S: SizeStore, C: PendingChannel> SizeSync<S, C> {
    pub fn new(store: S, channel: C) -> Self {
        Self {
            store,
            channel,
            pending: None,
        }
    }

    pub fn persisted(&self) -> Option<Size> {
        self.store.load()
    }

    pub fn pending(&self) -> Option<Size> {
        self.pending
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn effective(&self) -> Option<Size> {
        self.pending.or_else(|| self.persisted())
    }

    // ─── Pending tier ────────────────────────────────────────────────────

    /// Set the pending size here and broadcast it to the other contexts.
    pub fn publish_pending(&mut self, size: Option<Size>) {
        self.pending = size;
        self.channel.publish(size);
    }

    /// A pending size arrived from another context. Returns `true` if the
    /// local mirror changed.
    pub fn receive_pending(&mut self, size: Option<Size>) -> bool {
        if self.pending == size {
            return false;
        }
        self.pending = size;
        true
    }

    // ─── Persisted tier ──────────────────────────────────────────────────

    /// Write `size` to the store and clear the pending tier everywhere.
    pub fn commit(&mut self, size: Option<Size>) {
        self.store.save(size);
        self.publish_pending(None);
        log::debug!(
            "committed size {}",
            size.map_or_else(|| "natural".to_string(), |s| s.to_string())
        );
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

// ─── Surface tracking ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct SurfaceTracker {
    surface_box: Option<SurfaceBox>,
    hovering: bool,
}

impl SurfaceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read the surface and container boxes. Returns `true` if the
    /// tracked box changed.
    pub fn remeasure(&mut self, surface: &impl ResizableSurface) -> bool {
        let next = match (surface.bounds(), surface.container_bounds()) {
            (Some(s), Some(c)) => Some(SurfaceBox::measure(s, c)),
            _ => None,
        };
        let changed = next != self.surface_box;
        self.surface_box = next;
        changed
    }

    pub fn surface_box(&self) -> Option<SurfaceBox> {
        self.surface_box
    }

    pub fn is_centered_horizontally(&self) -> bool {
        self.surface_box
            .is_some_and(|b| b.is_centered_horizontally())
    }

    /// Whether a viewport-space pointer is near a handle edge.
    pub fn is_near_edge(&self, pointer: Point) -> bool {
        self.surface_box
            .is_some_and(|b| b.proximity(pointer).reveals_handles())
    }

    pub fn hovering(&self) -> bool {
        self.hovering
    }

    /// Update hover state from a viewport-space pointer. Returns `true` if
    /// it changed.
    pub fn update_hover(&mut self, pointer: Point) -> bool {
        self.set_hovering(self.is_near_edge(pointer))
    }

    /// Update hover from a position inside the surface's nested content,
    /// given that content's viewport origin.
    pub fn update_hover_nested(&mut self, local: Point, content_origin: Point) -> bool {
        let pointer = Point::new(content_origin.x + local.x, content_origin.y + local.y);
        self.update_hover(pointer)
    }

    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        let changed = self.hovering != hovering;
        self.hovering = hovering;
        changed
    }
}
