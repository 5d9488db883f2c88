//! Axis-aligned rectangles in canvas units.

use serde::{Deserialize, Serialize};

/// A rectangle with a top-left origin.
///
/// Containment is half-open: a point on the right or bottom edge belongs to
/// the neighbouring rectangle, so rectangles that share an edge never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Overlapping region, or `None` when the rectangles do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Multiply every coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Pixel columns and rows whose centers fall inside this rectangle,
    /// clamped to a `width` x `height` raster.
    ///
    /// Returns `(x0, y0, x1, y1)` as half-open index ranges.
    pub fn pixel_span(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        // Pixel i is covered when x <= i + 0.5 < right.
        let first = |start: f64| (start - 0.5).ceil().max(0.0);
        let end = |stop: f64, limit: u32| (stop - 0.5).ceil().clamp(0.0, limit as f64);

        let x0 = first(self.x);
        let y0 = first(self.y);
        let x1 = end(self.right(), width);
        let y1 = end(self.bottom(), height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(9.999, 9.999));
        assert!(!r.contains(10.0, 5.0));
        assert!(!r.contains(5.0, 10.0));
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));

        let touching = Rect::new(10.0, 0.0, 5.0, 5.0);
        assert_eq!(a.intersect(&touching), None);
    }

    #[test]
    fn test_pixel_span_uses_centers() {
        // Covers centers 0.5 ..= 2.5 -> pixels 0, 1, 2
        let r = Rect::new(0.0, 0.0, 2.6, 1.0);
        assert_eq!(r.pixel_span(100, 100), Some((0, 0, 3, 1)));

        // Starts just past a center: pixel 0 excluded
        let r = Rect::new(0.6, 0.0, 1.0, 1.0);
        assert_eq!(r.pixel_span(100, 100), Some((1, 0, 2, 1)));

        // Too thin to cover any center
        let r = Rect::new(0.6, 0.0, 0.3, 1.0);
        assert_eq!(r.pixel_span(100, 100), None);
    }

    #[test]
    fn test_adjacent_spans_do_not_overlap() {
        let left = Rect::new(0.0, 0.0, 526.5, 10.0);
        let border = Rect::new(526.5, 0.0, 27.0, 10.0);
        let right = Rect::new(553.5, 0.0, 526.5, 10.0);

        let (_, _, l_end, _) = left.pixel_span(1080, 10).unwrap();
        let (b_start, _, b_end, _) = border.pixel_span(1080, 10).unwrap();
        let (r_start, _, r_end, _) = right.pixel_span(1080, 10).unwrap();

        assert_eq!(l_end, b_start);
        assert_eq!(b_end, r_start);
        assert_eq!(r_end, 1080);
    }

    #[test]
    fn test_pixel_span_clamps_to_raster() {
        let r = Rect::new(-50.0, -50.0, 500.0, 500.0);
        assert_eq!(r.pixel_span(100, 80), Some((0, 0, 100, 80)));
    }
}
