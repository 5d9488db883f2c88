//! Frame rectangles for each layout.

use super::{Frame, FrameId, Layout, LayoutError, LayoutType, LayoutVariant, Rect};

/// Share of the canvas width taken by the large frame in the
/// left-large / right-large triptychs.
const LARGE_SHARE: f64 = 0.6;

/// Compute the frames of `layout` on a `width` x `height` canvas with
/// `border` units between adjacent frames.
///
/// Frames are returned in id order (frame-1, frame-2, [frame-3]).
///
/// To get frames at another resolution, call this again with every argument
/// scaled rather than scaling the returned rectangles; both give the same
/// result up to float rounding, but recomputing keeps each resolution exact.
///
/// # Errors
///
/// - [`LayoutError::InvalidLayout`] for a pair outside the six defined layouts
/// - [`LayoutError::InvalidCanvas`] for non-finite or non-positive dimensions
/// - [`LayoutError::InvalidBorder`] for negative or non-finite thickness
/// - [`LayoutError::BorderTooThick`] when a frame would have no area
///
/// # Example
///
/// ```
/// use collage_core::layout::{compute_frames, Layout};
///
/// let frames = compute_frames(Layout::default(), 400.0, 400.0, 10.0).unwrap();
/// assert_eq!(frames[1].x, 205.0);
/// ```
pub fn compute_frames(
    layout: Layout,
    width: f64,
    height: f64,
    border: f64,
) -> Result<Vec<Frame>, LayoutError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(LayoutError::InvalidCanvas { width, height });
    }
    if !border.is_finite() || border < 0.0 {
        return Err(LayoutError::InvalidBorder(border));
    }

    let b = border;
    let rects: Vec<Rect> = match (layout.kind, layout.variant) {
        (LayoutType::Diptych, LayoutVariant::Horizontal) => columns(2, width, height, b),
        (LayoutType::Diptych, LayoutVariant::Vertical) => rows(2, width, height, b),
        (LayoutType::Triptych, LayoutVariant::Horizontal) => columns(3, width, height, b),
        (LayoutType::Triptych, LayoutVariant::Vertical) => rows(3, width, height, b),
        (LayoutType::Triptych, LayoutVariant::LeftLarge) => {
            let large_width = width * LARGE_SHARE;
            let small_width = width * (1.0 - LARGE_SHARE) - b;
            let small_height = (height - b) / 2.0;
            let small_x = large_width + b;
            vec![
                Rect::new(0.0, 0.0, large_width, height),
                Rect::new(small_x, 0.0, small_width, small_height),
                Rect::new(small_x, small_height + b, small_width, small_height),
            ]
        }
        (LayoutType::Triptych, LayoutVariant::RightLarge) => {
            let large_width = width * LARGE_SHARE;
            let small_width = width * (1.0 - LARGE_SHARE) - b;
            let small_height = (height - b) / 2.0;
            vec![
                Rect::new(0.0, 0.0, small_width, small_height),
                Rect::new(0.0, small_height + b, small_width, small_height),
                Rect::new(small_width + b, 0.0, large_width, height),
            ]
        }
        _ => return Err(layout.error()),
    };

    if rects.iter().any(Rect::is_empty) {
        return Err(LayoutError::BorderTooThick {
            border,
            width,
            height,
        });
    }

    Ok(rects
        .into_iter()
        .zip(layout.frame_ids())
        .map(|(rect, id)| Frame::new(id, rect))
        .collect())
}

/// `count` equal-width columns spanning the full height.
fn columns(count: u8, width: f64, height: f64, b: f64) -> Vec<Rect> {
    let n = count as f64;
    let frame_width = (width - (n - 1.0) * b) / n;
    (0..count)
        .map(|i| Rect::new(i as f64 * (frame_width + b), 0.0, frame_width, height))
        .collect()
}

/// `count` equal-height rows spanning the full width.
fn rows(count: u8, width: f64, height: f64, b: f64) -> Vec<Rect> {
    let n = count as f64;
    let frame_height = (height - (n - 1.0) * b) / n;
    (0..count)
        .map(|i| Rect::new(0.0, i as f64 * (frame_height + b), width, frame_height))
        .collect()
}

/// Hit-test: the frame containing `(x, y)`, or `None` for points on a
/// border or outside the canvas.
pub fn frame_at(frames: &[Frame], x: f64, y: f64) -> Option<FrameId> {
    frames
        .iter()
        .find(|frame| frame.rect().contains(x, y))
        .map(|frame| frame.id)
}
