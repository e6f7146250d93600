//! The resize frame: the decorator drawn around the preview surface.
//!
//! Owns the drag controller, the active `ResizeSession`, the surface and its
//! tracker, and this context's `SizeSync`. Pointer input goes in through
//! `handle_pointer`; the handles overlay comes out through `overlay`.
//!
//! Drags resize the surface directly on every move and broadcast the live
//! size as pending. Nothing is persisted on release: the pending size stays
//! until the toolbar commits it, picks a preset, or resets.

use crate::drag::{DragController, DragEvent, DragHost};
use crate::host::{PendingChannel, ResizableSurface, SizeStore};
use crate::input::{Direction, PointerEvent};
use crate::session::ResizeSession;
use crate::sync::{SizeSync, SurfaceTracker};
use rz_core::{Point, Rect, ResizeConstraints, ResizrParameters, Size};

/// Render state for the handles overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    /// Overlay box, container-relative. `None` until the surface is measured.
    pub rect: Option<Rect>,
    pub handles_visible: bool,
    /// Show the full-window layer that keeps pointer events away from the
    /// nested surface while dragging.
    pub capture_pointer: bool,
    pub active_handle: Option<Direction>,
    /// `{w}x{h}` when `showDimensions` is on.
    pub dimension_label: Option<String>,
}

pub struct ResizeFrame<S, C, F, H: DragHost> {
    params: ResizrParameters,
    constraints: ResizeConstraints,
    sync: SizeSync<S, C>,
    tracker: SurfaceTracker,
    surface: F,
    drag: DragController<H>,
    session: Option<ResizeSession>,
    /// Cross-origin warning already logged.
    nested_warned: bool,
}

impl<S, C, F, H> ResizeFrame<S, C, F, H>
where
    S: SizeStore,
    C: PendingChannel,
    F: ResizableSurface,
    H: DragHost,
{
    pub fn new(params: ResizrParameters, store: S, channel: C, surface: F, host: H) -> Self {
        let constraints = params.constraints();
        let mut frame = Self {
            params,
            constraints,
            sync: SizeSync::new(store, channel),
            tracker: SurfaceTracker::new(),
            surface,
            drag: DragController::new(host),
            session: None,
            nested_warned: false,
        };
        frame.apply_effective();
        frame
    }

    pub fn is_disabled(&self) -> bool {
        self.params.disable
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn effective(&self) -> Option<Size> {
        self.sync.effective()
    }

    pub fn sync(&self) -> &SizeSync<S, C> {
        &self.sync
    }

    pub fn surface(&self) -> &F {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut F {
        &mut self.surface
    }

    pub fn drag(&self) -> &DragController<H> {
        &self.drag
    }

    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// Swap in parameters for a newly selected story.
    pub fn set_params(&mut self, params: ResizrParameters) {
        if params.disable && self.drag.is_dragging() {
            self.drag.end();
            self.session = None;
        }
        self.constraints = params.constraints();
        self.params = params;
        self.tracker.set_hovering(false);
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Handle a pointer event from the container or the document.
    /// Returns `true` if the overlay or surface changed.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        if self.params.disable {
            return false;
        }
        match self.drag.handle(event) {
            Some(DragEvent::Start {
                direction, origin, ..
            }) => {
                self.start_session(direction, origin);
                true
            }
            Some(DragEvent::Drag { position, .. }) => self.drag_to(position),
            Some(DragEvent::End { .. }) => self.finish_session(),
            None => match *event {
                PointerEvent::Move { x, y } if !self.drag.is_dragging() => {
                    self.tracker.update_hover(Point::new(x, y))
                }
                _ => false,
            },
        }
    }

    /// Pointer moved inside the surface's nested content (local coordinates).
    /// Skipped, with a one-time warning, when the content can't be read.
    pub fn handle_nested_pointer_move(&mut self, local: Point) -> bool {
        if self.params.disable || self.drag.is_dragging() {
            return false;
        }
        match self.surface.content_origin() {
            Ok(origin) => self.tracker.update_hover_nested(local, origin),
            Err(e) => {
                if !self.nested_warned {
                    log::warn!("edge detection inside the surface is unavailable: {e}");
                    self.nested_warned = true;
                }
                false
            }
        }
    }

    // ─── Host notifications ──────────────────────────────────────────────

    /// A pending size arrived over the channel. Ignored mid-drag: the open
    /// session owns the surface until release publishes its own size.
    pub fn on_pending_size_changed(&mut self, size: Option<Size>) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        if !self.sync.receive_pending(size) {
            return false;
        }
        self.apply_effective();
        true
    }

    /// The persisted store changed (reload, navigation, another context).
    pub fn on_persisted_changed(&mut self) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        self.apply_effective();
        true
    }

    /// The surface or its container was resized.
    pub fn on_layout_changed(&mut self) -> bool {
        self.tracker.remeasure(&self.surface)
    }

    // ─── Output ──────────────────────────────────────────────────────────

    pub fn overlay(&self) -> Overlay {
        if self.params.disable {
            return Overlay::default();
        }
        let dragging = self.drag.is_dragging();
        let surface_box = self.tracker.surface_box();
        let dimension_label = if self.params.show_dimensions {
            self.sync
                .effective()
                .or_else(|| surface_box.map(|b| Size::from_f64(b.rect.width(), b.rect.height())))
                .map(|s| s.to_string())
        } else {
            None
        };
        Overlay {
            rect: surface_box.map(|b| b.rect),
            handles_visible: self.tracker.hovering() || dragging,
            capture_pointer: dragging,
            active_handle: self.drag.active_direction(),
            dimension_label,
        }
    }

    // ─── Private helpers ─────────────────────────────────────────────────

    fn start_session(&mut self, direction: Direction, origin: Point) {
        self.tracker.remeasure(&self.surface);
        let (width, height) = ResizeSession::start_dimensions(
            self.sync.effective(),
            self.surface.bounds(),
            self.params.fallback_size(),
        );
        self.session = Some(ResizeSession::begin(direction, origin, width, height));
    }

    fn drag_to(&mut self, position: Point) -> bool {
        let centered = self.tracker.is_centered_horizontally();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let size = session.update(position, centered, &self.constraints);
        if self.sync.pending() == Some(size) {
            return false;
        }
        self.surface.apply_size(Some(size));
        self.tracker.remeasure(&self.surface);
        self.sync.publish_pending(Some(size));
        true
    }

    fn finish_session(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        if let Some(size) = session.finish() {
            self.sync.publish_pending(Some(size));
        }
        true
    }

    fn apply_effective(&mut self) {
        self.surface.apply_size(self.sync.effective());
        self.tracker.remeasure(&self.surface);
    }
}
