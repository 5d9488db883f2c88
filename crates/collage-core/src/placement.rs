//! Per-frame image placement.
//!
//! A placement records how an image sits inside its frame: a translation
//! and a uniform scale, both authored in preview-canvas units. The image's
//! top-left corner is drawn at `frame origin + offset`, and its size is
//! `natural size * scale`. Scaling therefore anchors at the frame's top-left
//! corner; nothing re-centers the image automatically.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest scale the editor's scale control allows.
pub const MIN_SCALE: f64 = 0.1;

/// Largest scale the editor's scale control allows.
pub const MAX_SCALE: f64 = 3.0;

/// Opaque reference to a decoded bitmap held by the image store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(pub u32);

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image#{}", self.0)
    }
}

/// How one image is positioned inside one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    /// The bitmap to draw.
    pub source: ImageHandle,
    /// Intrinsic width of the image in pixels.
    pub natural_width: u32,
    /// Intrinsic height of the image in pixels.
    pub natural_height: u32,
    /// Horizontal translation in preview units.
    pub offset_x: f64,
    /// Vertical translation in preview units.
    pub offset_y: f64,
    /// Uniform scale multiplier.
    pub scale: f64,
}

impl ImagePlacement {
    /// Create a placement at the stored default: no offset, scale 1.
    pub fn new(source: ImageHandle, natural_width: u32, natural_height: u32) -> Self {
        Self {
            source,
            natural_width,
            natural_height,
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }

    /// Drawn size in preview units.
    pub fn scaled_size(&self) -> (f64, f64) {
        (
            self.natural_width as f64 * self.scale,
            self.natural_height as f64 * self.scale,
        )
    }

    /// Translate by `(dx, dy)`; panning past the frame edge is allowed.
    pub fn apply_delta(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Set the scale, keeping the offset.
    ///
    /// Returns `false` and leaves the placement untouched for values that
    /// are not finite and positive.
    pub fn apply_scale(&mut self, scale: f64) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            return false;
        }
        self.scale = scale;
        true
    }
}

/// The transform a fresh placement starts with.
///
/// This is always scale 1 at offset `(0, 0)`, whatever the image and frame
/// sizes; the frame clip takes care of what is visible.
pub fn initial_placement(
    _natural_width: u32,
    _natural_height: u32,
    _frame_width: f64,
    _frame_height: f64,
) -> (f64, f64, f64) {
    (1.0, 0.0, 0.0)
}

/// Scale and offset that make the image cover the frame, centered.
///
/// Returns `(scale, offset_x, offset_y)`. An image wider than the frame is
/// matched on height (and overflows horizontally), anything else on width.
pub fn cover_fit(
    natural_width: u32,
    natural_height: u32,
    frame_width: f64,
    frame_height: f64,
) -> Option<(f64, f64, f64)> {
    if natural_width == 0 || natural_height == 0 || frame_width <= 0.0 || frame_height <= 0.0 {
        return None;
    }

    let (nw, nh) = (natural_width as f64, natural_height as f64);
    let frame_aspect = frame_width / frame_height;
    let image_aspect = nw / nh;

    let scale = if image_aspect > frame_aspect {
        frame_height / nh
    } else {
        frame_width / nw
    };

    let offset_x = (frame_width - nw * scale) / 2.0;
    let offset_y = (frame_height - nh * scale) / 2.0;
    Some((scale, offset_x, offset_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement() -> ImagePlacement {
        ImagePlacement::new(ImageHandle(7), 800, 600)
    }

    #[test]
    fn test_new_uses_defaults() {
        let p = placement();
        assert_eq!((p.offset_x, p.offset_y, p.scale), (0.0, 0.0, 1.0));
        assert_eq!(p.scaled_size(), (800.0, 600.0));
    }

    #[test]
    fn test_initial_placement_ignores_sizes() {
        assert_eq!(initial_placement(4000, 3000, 195.0, 400.0), (1.0, 0.0, 0.0));
        assert_eq!(initial_placement(10, 10, 1000.0, 1000.0), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_apply_delta_accumulates_without_bounds() {
        let mut p = placement();
        p.apply_delta(-30.0, 12.5);
        p.apply_delta(-1000.0, 0.5);
        assert_eq!((p.offset_x, p.offset_y), (-1030.0, 13.0));
    }

    #[test]
    fn test_apply_scale_keeps_offset() {
        let mut p = placement();
        p.apply_delta(5.0, 5.0);
        assert!(p.apply_scale(0.25));
        assert_eq!(p.scale, 0.25);
        assert_eq!((p.offset_x, p.offset_y), (5.0, 5.0));
        assert_eq!(p.scaled_size(), (200.0, 150.0));
    }

    #[test]
    fn test_apply_scale_accepts_values_outside_ui_range() {
        let mut p = placement();
        assert!(p.apply_scale(0.01));
        assert!(p.apply_scale(12.0));
        assert_eq!(p.scale, 12.0);
    }

    #[test]
    fn test_apply_scale_rejects_non_positive() {
        let mut p = placement();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(!p.apply_scale(bad));
        }
        assert_eq!(p.scale, 1.0);
    }

    #[test]
    fn test_cover_fit_wide_image_matches_height() {
        // 800x400 image into a 195x400 frame
        let (scale, ox, oy) = cover_fit(800, 400, 195.0, 400.0).unwrap();
        assert_eq!(scale, 1.0);
        assert_eq!(oy, 0.0);
        assert_eq!(ox, (195.0 - 800.0) / 2.0);
    }

    #[test]
    fn test_cover_fit_tall_image_matches_width() {
        let (scale, ox, oy) = cover_fit(100, 400, 200.0, 200.0).unwrap();
        assert_eq!(scale, 2.0);
        assert_eq!(ox, 0.0);
        assert_eq!(oy, (200.0 - 800.0) / 2.0);
    }

    #[test]
    fn test_cover_fit_degenerate() {
        assert_eq!(cover_fit(0, 10, 100.0, 100.0), None);
        assert_eq!(cover_fit(10, 10, 0.0, 100.0), None);
    }
}
