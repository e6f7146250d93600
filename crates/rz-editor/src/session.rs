//! Resize session: what one drag gesture means for the surface size.
//!
//! A session is created when a drag starts and consumed when it ends. It
//! keeps the pointer origin and start size, turns each pointer position
//! into a clamped candidate size, and yields the last candidate as the
//! pending size.

use crate::input::Direction;
use rz_core::{Point, Rect, ResizeConstraints, Size, clamp};

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub direction: Direction,
    origin: Point,
    start_width: f64,
    start_height: f64,
    /// Whether the last update grew from both sides.
    centered_growth: bool,
    candidate: Option<Size>,
}

impl ResizeSession {
    pub fn begin(direction: Direction, origin: Point, start_width: f64, start_height: f64) -> Self {
        Self {
            direction,
            origin,
            start_width,
            start_height,
            centered_growth: false,
            candidate: None,
        }
    }

    /// Start dimensions for a drag: the effective size when one is set,
    /// else the surface's measured box, else `fallback`.
    pub fn start_dimensions(
        effective: Option<Size>,
        measured: Option<Rect>,
        fallback: Size,
    ) -> (f64, f64) {
        if let Some(size) = effective {
            return (f64::from(size.width), f64::from(size.height));
        }
        match measured {
            Some(rect) => (rect.width(), rect.height()),
            None => {
                log::debug!("surface not measurable; starting drag from {fallback}");
                (f64::from(fallback.width), f64::from(fallback.height))
            }
        }
    }

    /// Compute the candidate size for a pointer position.
    ///
    /// `centered` doubles the horizontal delta: a centered surface grows
    /// on both sides, so the dragged edge only moves half the width change.
    pub fn update(
        &mut self,
        pointer: Point,
        centered: bool,
        constraints: &ResizeConstraints,
    ) -> Size {
        let delta_x = pointer.x - self.origin.x;
        let delta_y = pointer.y - self.origin.y;
        let multiplier = if centered { 2.0 } else { 1.0 };

        let mut width = self.start_width;
        let mut height = self.start_height;

        if self.direction.affects_width() {
            width = clamp(
                self.start_width + delta_x * multiplier,
                f64::from(constraints.min_width),
                constraints.max_width.map(f64::from),
            );
        }
        if self.direction.affects_height() {
            height = clamp(
                self.start_height + delta_y,
                f64::from(constraints.min_height),
                constraints.max_height.map(f64::from),
            );
        }

        let size = Size::from_f64(width, height);
        self.centered_growth = centered;
        self.candidate = Some(size);
        size
    }

    /// Latest candidate, if the pointer has moved since the drag started.
    pub fn candidate(&self) -> Option<Size> {
        self.candidate
    }

    pub fn centered_growth(&self) -> bool {
        self.centered_growth
    }

    /// End the session, yielding the pending size. A press-and-release
    /// without movement yields nothing.
    pub fn finish(self) -> Option<Size> {
        self.candidate.filter(|s| s.width > 0 && s.height > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn constraints(max_width: Option<u32>, max_height: Option<u32>) -> ResizeConstraints {
        ResizeConstraints {
            max_width,
            max_height,
            ..ResizeConstraints::default()
        }
    }

    #[test]
    fn horizontal_drag_clamps_to_max() {
        let mut s = ResizeSession::begin(Direction::Horizontal, Point::new(0.0, 0.0), 800.0, 600.0);
        let size = s.update(Point::new(1000.0, 0.0), false, &constraints(Some(1200), None));
        assert_eq!(size, Size::new(1200, 600));
    }

    #[test]
    fn horizontal_drag_clamps_to_min() {
        let mut s = ResizeSession::begin(Direction::Horizontal, Point::new(500.0, 0.0), 800.0, 600.0);
        let size = s.update(Point::new(-500.0, 0.0), false, &constraints(None, None));
        assert_eq!(size, Size::new(200, 600));
    }

    #[test]
    fn centered_doubles_width_delta() {
        let mut s = ResizeSession::begin(Direction::Horizontal, Point::new(950.0, 10.0), 900.0, 600.0);
        assert_eq!(
            s.update(Point::new(980.0, 10.0), true, &ResizeConstraints::default()),
            Size::new(960, 600)
        );
        assert!(s.centered_growth());
        assert_eq!(
            s.update(Point::new(980.0, 10.0), false, &ResizeConstraints::default()),
            Size::new(930, 600)
        );
    }

    #[test]
    fn vertical_ignores_horizontal_motion() {
        let mut s = ResizeSession::begin(Direction::Vertical, Point::new(0.0, 0.0), 400.0, 300.0);
        let size = s.update(Point::new(500.0, 50.0), true, &ResizeConstraints::default());
        assert_eq!(size, Size::new(400, 350));
    }

    #[test]
    fn vertical_delta_never_doubles() {
        let mut s = ResizeSession::begin(Direction::Both, Point::new(0.0, 0.0), 400.0, 300.0);
        let size = s.update(Point::new(10.0, 10.0), true, &ResizeConstraints::default());
        assert_eq!(size, Size::new(420, 310));
    }

    #[test]
    fn fractional_start_rounds() {
        let mut s = ResizeSession::begin(Direction::Both, Point::new(0.0, 0.0), 640.4, 480.6);
        let size = s.update(Point::new(0.3, 0.0), false, &ResizeConstraints::default());
        assert_eq!(size, Size::new(641, 481));
    }

    #[test]
    fn finish_without_movement_is_empty() {
        let s = ResizeSession::begin(Direction::Both, Point::new(0.0, 0.0), 400.0, 300.0);
        assert_eq!(s.finish(), None);
    }

    #[test]
    fn finish_yields_last_candidate() {
        let mut s = ResizeSession::begin(Direction::Both, Point::new(0.0, 0.0), 400.0, 300.0);
        s.update(Point::new(10.0, 10.0), false, &ResizeConstraints::default());
        s.update(Point::new(20.0, -10.0), false, &ResizeConstraints::default());
        assert_eq!(s.finish(), Some(Size::new(420, 290)));
    }

    #[test]
    fn start_dimensions_tiers() {
        let fallback = Size::new(800, 600);
        assert_eq!(
            ResizeSession::start_dimensions(
                Some(Size::new(300, 200)),
                Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
                fallback
            ),
            (300.0, 200.0)
        );
        assert_eq!(
            ResizeSession::start_dimensions(None, Some(Rect::new(5.0, 5.0, 1005.0, 705.5)), fallback),
            (1000.0, 700.5)
        );
        assert_eq!(
            ResizeSession::start_dimensions(None, None, fallback),
            (800.0, 600.0)
        );
    }
}
