//! Capabilities the host environment provides.
//!
//! The shared store and the pending channel are handles: they are cloned
//! into every UI context (frame, toolbar) and take `&self`, since the host
//! owns the underlying state. The surface is owned by the frame.

pub mod memory;

use rz_core::{Point, Rect, Size};
use std::rc::Rc;
use thiserror::Error;

pub use crate::drag::DragHost;

/// Shared, persisted size (URL-backed on the web). Survives reloads.
pub trait SizeStore {
    fn load(&self) -> Option<Size>;
    fn save(&self, size: Option<Size>);
}

/// Ephemeral cross-context channel for the pending size. `None` clears it.
pub trait PendingChannel {
    fn publish(&self, size: Option<Size>);
}

/// The nested surface's content could not be read (cross-origin).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("surface content is not accessible: {reason}")]
pub struct IntrospectionDenied {
    pub reason: String,
}

/// The resizable surface and its container.
pub trait ResizableSurface {
    /// Surface box in viewport coordinates; `None` when it isn't mounted.
    fn bounds(&self) -> Option<Rect>;

    /// Container box in viewport coordinates.
    fn container_bounds(&self) -> Option<Rect>;

    /// Set (or with `None`, clear) the surface's inline size. Visual only.
    fn apply_size(&mut self, size: Option<Size>);

    /// Viewport origin of the surface's nested content, used to translate
    /// pointer positions reported from inside it.
    fn content_origin(&self) -> Result<Point, IntrospectionDenied>;
}

impl<T: SizeStore + ?Sized> SizeStore for Rc<T> {
    fn load(&self) -> Option<Size> {
        (**self).load()
    }

    fn save(&self, size: Option<Size>) {
        (**self).save(size)
    }
}

impl<T: PendingChannel + ?Sized> PendingChannel for Rc<T> {
    fn publish(&self, size: Option<Size>) {
        (**self).publish(size)
    }
}
