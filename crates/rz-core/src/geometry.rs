//! Clamping and surface geometry.
//!
//! All rectangles are `kurbo::Rect` in CSS pixels. Viewport-space rects come
//! straight from the host (`getBoundingClientRect` on the web); a
//! `SurfaceBox` stores the surface relative to its container so the handles
//! overlay can be positioned inside the container.

use crate::constants::{CENTER_TOLERANCE, EDGE_THRESHOLD};
use kurbo::{Point, Rect};

/// Clamp `value` to `[min, max]`. Without a max only the floor applies.
///
/// When `min > max` the floor wins: the result is `min`.
pub fn clamp(value: f64, min: f64, max: Option<f64>) -> f64 {
    match max {
        Some(max) => min.max(max.min(value)),
        None => min.max(value),
    }
}

/// The resizable surface's box, measured against its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBox {
    /// Surface rect, container-relative.
    pub rect: Rect,
    /// Container rect, viewport coordinates.
    pub container: Rect,
}

impl SurfaceBox {
    /// Build from two viewport-space rects.
    pub fn measure(surface: Rect, container: Rect) -> Self {
        let rect = Rect::new(
            surface.x0 - container.x0,
            surface.y0 - container.y0,
            surface.x1 - container.x0,
            surface.y1 - container.y0,
        );
        Self { rect, container }
    }

    /// The surface rect back in viewport coordinates.
    pub fn absolute(&self) -> Rect {
        Rect::new(
            self.rect.x0 + self.container.x0,
            self.rect.y0 + self.container.y0,
            self.rect.x1 + self.container.x0,
            self.rect.y1 + self.container.y0,
        )
    }

    pub fn left_space(&self) -> f64 {
        self.rect.x0
    }

    pub fn right_space(&self) -> f64 {
        self.container.width() - self.rect.x1
    }

    /// Whether the surface sits centered in its container, so a drag on
    /// one edge grows both sides.
    pub fn is_centered_horizontally(&self) -> bool {
        let left = self.left_space();
        (left - self.right_space()).abs() < CENTER_TOLERANCE && left > CENTER_TOLERANCE
    }

    /// Edge proximity of a viewport-space pointer position.
    pub fn proximity(&self, pointer: Point) -> EdgeProximity {
        EdgeProximity::of(self.absolute(), pointer, EDGE_THRESHOLD)
    }
}

/// Which edges of a rect a pointer is close to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeProximity {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    /// Pointer lies within the rect's vertical span, grown by the threshold.
    pub within_vertical: bool,
    /// Pointer lies within the rect's horizontal span, grown by the threshold.
    pub within_horizontal: bool,
}

impl EdgeProximity {
    pub fn of(rect: Rect, p: Point, threshold: f64) -> Self {
        let near = |coord: f64, edge: f64| coord >= edge - threshold && coord <= edge + threshold;
        Self {
            left: near(p.x, rect.x0),
            right: near(p.x, rect.x1),
            top: near(p.y, rect.y0),
            bottom: near(p.y, rect.y1),
            within_vertical: p.y >= rect.y0 - threshold && p.y <= rect.y1 + threshold,
            within_horizontal: p.x >= rect.x0 - threshold && p.x <= rect.x1 + threshold,
        }
    }

    /// Near two adjacent edges at once.
    pub fn near_corner(&self) -> bool {
        (self.left || self.right) && (self.top || self.bottom)
    }

    /// Whether resize handles should be revealed. Handles live on the right
    /// edge, the bottom edge, and the bottom-right corner.
    pub fn reveals_handles(&self) -> bool {
        (self.right && self.within_vertical)
            || (self.bottom && self.within_horizontal)
            || self.near_corner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_without_max_only_floors() {
        assert_eq!(clamp(50.0, 200.0, None), 200.0);
        assert_eq!(clamp(5000.0, 200.0, None), 5000.0);
    }

    #[test]
    fn clamp_within_bounds() {
        for value in [-100.0, 0.0, 199.0, 200.0, 640.0, 1200.0, 9999.0] {
            let c = clamp(value, 200.0, Some(1200.0));
            assert!((200.0..=1200.0).contains(&c), "{value} clamped to {c}");
        }
        assert_eq!(clamp(150.0, 200.0, Some(1200.0)), 200.0);
    }

    #[test]
    fn clamp_floor_wins_when_inverted() {
        assert_eq!(clamp(500.0, 300.0, Some(100.0)), 300.0);
        assert_eq!(clamp(50.0, 300.0, Some(100.0)), 300.0);
    }

    #[test]
    fn measure_is_container_relative() {
        let container = Rect::new(100.0, 40.0, 1100.0, 840.0);
        let surface = Rect::new(150.0, 40.0, 1050.0, 640.0);
        let b = SurfaceBox::measure(surface, container);
        assert_eq!(b.rect, Rect::new(50.0, 0.0, 950.0, 600.0));
        assert_eq!(b.absolute(), surface);
        assert_eq!(b.left_space(), 50.0);
        assert_eq!(b.right_space(), 50.0);
        assert!(b.is_centered_horizontally());
    }

    #[test]
    fn left_aligned_is_not_centered() {
        let container = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let b = SurfaceBox::measure(Rect::new(0.0, 0.0, 900.0, 600.0), container);
        assert!(!b.is_centered_horizontally());

        // Full-width surface: symmetric, but no margin.
        let full = SurfaceBox::measure(container, container);
        assert!(!full.is_centered_horizontally());
    }

    #[test]
    fn proximity_right_edge() {
        let rect = Rect::new(0.0, 0.0, 400.0, 300.0);
        let p = EdgeProximity::of(rect, Point::new(415.0, 150.0), 20.0);
        assert!(p.right && p.within_vertical);
        assert!(p.reveals_handles());

        let far = EdgeProximity::of(rect, Point::new(200.0, 150.0), 20.0);
        assert!(!far.reveals_handles());
    }

    #[test]
    fn proximity_right_edge_outside_vertical_span() {
        let rect = Rect::new(0.0, 0.0, 400.0, 300.0);
        let p = EdgeProximity::of(rect, Point::new(400.0, 500.0), 20.0);
        assert!(p.right);
        assert!(!p.reveals_handles());
    }

    #[test]
    fn proximity_corner() {
        let rect = Rect::new(0.0, 0.0, 400.0, 300.0);
        let p = EdgeProximity::of(rect, Point::new(390.0, 310.0), 20.0);
        assert!(p.near_corner());
        assert!(p.reveals_handles());
    }
}
