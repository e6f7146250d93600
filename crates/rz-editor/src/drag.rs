//! Pointer-drag controller.
//!
//! Turns a handle press plus document-wide pointer moves and release into a
//! start / drag / end protocol. While a drag is open the controller holds
//! the host's global pointer listeners and cursor / text-selection
//! overrides; they are released exactly once, on pointer-up or when the
//! controller is dropped mid-drag.
//!
//! One controller serves all handles of a frame, so "is dragging" is shared
//! between them. Each drag is identified by a `DragToken`; a press while a
//! drag is open is rejected instead of opening a second session.

use crate::input::{Direction, PointerEvent};
use rz_core::Point;
use thiserror::Error;

/// Host side effects a drag needs: global listeners and body styles.
pub trait DragHost {
    fn cursor(&self) -> String;
    fn set_cursor(&mut self, cursor: &str);
    fn user_select(&self) -> String;
    fn set_user_select(&mut self, value: &str);
    /// Start delivering document-wide pointer-move / pointer-up.
    fn attach_pointer_listeners(&mut self);
    fn detach_pointer_listeners(&mut self);
}

/// Identifies one drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("drag session {0:?} is already active")]
    AlreadyActive(DragToken),
}

/// What the controller produced for an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Start {
        token: DragToken,
        direction: Direction,
        origin: Point,
    },
    Drag {
        token: DragToken,
        direction: Direction,
        position: Point,
    },
    End {
        token: DragToken,
    },
}

/// Styles captured at drag start, restored at drag end.
#[derive(Debug)]
struct ActiveDrag {
    token: DragToken,
    direction: Direction,
    saved_cursor: String,
    saved_user_select: String,
}

pub struct DragController<H: DragHost> {
    host: H,
    active: Option<ActiveDrag>,
    next_token: u64,
}

impl<H: DragHost> DragController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            active: None,
            next_token: 1,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_token(&self) -> Option<DragToken> {
        self.active.as_ref().map(|a| a.token)
    }

    pub fn active_direction(&self) -> Option<Direction> {
        self.active.as_ref().map(|a| a.direction)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Open a drag from a handle press.
    pub fn begin(&mut self, direction: Direction) -> Result<DragToken, DragError> {
        if let Some(active) = &self.active {
            log::debug!("ignoring {} press: drag already active", direction.as_str());
            return Err(DragError::AlreadyActive(active.token));
        }

        let token = DragToken(self.next_token);
        self.next_token += 1;

        let saved_cursor = self.host.cursor();
        let saved_user_select = self.host.user_select();
        self.host.attach_pointer_listeners();
        self.host.set_cursor(direction.cursor());
        self.host.set_user_select("none");

        log::trace!("drag {token:?} started ({})", direction.as_str());
        self.active = Some(ActiveDrag {
            token,
            direction,
            saved_cursor,
            saved_user_select,
        });
        Ok(token)
    }

    /// A document-wide pointer move. `None` when no drag is open.
    pub fn drag_to(&self, position: Point) -> Option<DragEvent> {
        self.active.as_ref().map(|a| DragEvent::Drag {
            token: a.token,
            direction: a.direction,
            position,
        })
    }

    /// Close the open drag. Returns its token the one time it closes;
    /// a release with no open drag is ignored.
    pub fn end(&mut self) -> Option<DragToken> {
        let active = self.active.take()?;
        self.release(&active);
        log::trace!("drag {:?} ended", active.token);
        Some(active.token)
    }

    /// Route a pointer event through the drag protocol.
    pub fn handle(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        match *event {
            PointerEvent::Down {
                x,
                y,
                handle: Some(direction),
            } => self
                .begin(direction)
                .ok()
                .map(|token| DragEvent::Start {
                    token,
                    direction,
                    origin: Point::new(x, y),
                }),
            PointerEvent::Down { handle: None, .. } => None,
            PointerEvent::Move { x, y } => self.drag_to(Point::new(x, y)),
            PointerEvent::Up { .. } => self.end().map(|token| DragEvent::End { token }),
        }
    }

    fn release(&mut self, active: &ActiveDrag) {
        self.host.detach_pointer_listeners();
        self.host.set_cursor(&active.saved_cursor);
        self.host.set_user_select(&active.saved_user_select);
    }
}

impl<H: DragHost> Drop for DragController<H> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            log::debug!("drag {:?} torn down without pointer-up", active.token);
            self.release(&active);
        }
    }
}
