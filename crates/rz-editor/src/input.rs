//! Input abstraction layer.
//!
//! Normalizes mouse and pointer events from the host into a `PointerEvent`
//! consumed by the drag controller and the frame. Coordinates are viewport
//! (client) pixels.

use rz_core::Point;

/// Which dimension(s) a handle resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Right edge: width only.
    Horizontal,
    /// Bottom edge: height only.
    Vertical,
    /// Bottom-right corner: both.
    Both,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Horizontal, Direction::Vertical, Direction::Both];

    pub fn affects_width(self) -> bool {
        matches!(self, Direction::Horizontal | Direction::Both)
    }

    pub fn affects_height(self) -> bool {
        matches!(self, Direction::Vertical | Direction::Both)
    }

    /// CSS cursor shown globally while this handle is dragged.
    pub fn cursor(self) -> &'static str {
        match self {
            Direction::Horizontal => "ew-resize",
            Direction::Vertical => "ns-resize",
            Direction::Both => "nwse-resize",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
            Direction::Both => "both",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "horizontal" => Some(Direction::Horizontal),
            "vertical" => Some(Direction::Vertical),
            "both" => Some(Direction::Both),
            _ => None,
        }
    }
}

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed. `handle` is set when the press landed on a resize handle.
    Down {
        x: f64,
        y: f64,
        handle: Option<Direction>,
    },

    /// Pointer moved anywhere in the document.
    Move { x: f64, y: f64 },

    /// Pointer released anywhere in the document.
    Up { x: f64, y: f64 },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { x, y, .. }
            | PointerEvent::Move { x, y }
            | PointerEvent::Up { x, y } => Point::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_axes() {
        assert!(Direction::Horizontal.affects_width());
        assert!(!Direction::Horizontal.affects_height());
        assert!(Direction::Vertical.affects_height());
        assert!(Direction::Both.affects_width() && Direction::Both.affects_height());
    }

    #[test]
    fn direction_names_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_name(d.as_str()), Some(d));
        }
        assert_eq!(Direction::from_name("diagonal"), None);
    }
}
