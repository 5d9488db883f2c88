//! Border strips between adjacent frames.
//!
//! For the column and row layouts the strip between frame `i` and frame
//! `i - 1` is found positionally: if frame `i` starts further right it is a
//! vertical strip just left of it, otherwise a horizontal strip just above
//! it. Both span the whole canvas.
//!
//! That rule breaks for the large-frame triptychs: the strip between the two
//! small frames would cross the large one. Those layouts get explicit
//! segments instead: one full-height strip beside the large frame and one
//! strip spanning only the small column.

use super::{Frame, Layout, LayoutError, LayoutType, LayoutVariant, Rect};

/// Border rectangles for `frames`, which must have been computed for
/// `layout` with the same `border` thickness.
///
/// Returns an empty list when `border` is zero.
pub fn border_segments(
    layout: Layout,
    frames: &[Frame],
    border: f64,
) -> Result<Vec<Rect>, LayoutError> {
    if !layout.is_valid() {
        return Err(layout.error());
    }
    if frames.len() != layout.frame_count() {
        return Err(layout.error());
    }
    if border <= 0.0 {
        return Ok(Vec::new());
    }

    let canvas_width = frames.iter().map(|f| f.x + f.width).fold(0.0, f64::max);
    let canvas_height = frames.iter().map(|f| f.y + f.height).fold(0.0, f64::max);

    let segments = match (layout.kind, layout.variant) {
        (LayoutType::Triptych, LayoutVariant::LeftLarge) => {
            let (large, top, bottom) = (&frames[0], &frames[1], &frames[2]);
            vec![
                Rect::new(large.x + large.width, 0.0, border, canvas_height),
                Rect::new(top.x, bottom.y - border, top.width, border),
            ]
        }
        (LayoutType::Triptych, LayoutVariant::RightLarge) => {
            let (top, bottom, large) = (&frames[0], &frames[1], &frames[2]);
            vec![
                Rect::new(top.x, bottom.y - border, top.width, border),
                Rect::new(large.x - border, 0.0, border, canvas_height),
            ]
        }
        _ => frames
            .windows(2)
            .map(|pair| {
                let (prev, frame) = (&pair[0], &pair[1]);
                if frame.x > prev.x {
                    Rect::new(frame.x - border, 0.0, border, canvas_height)
                } else {
                    Rect::new(0.0, frame.y - border, canvas_width, border)
                }
            })
            .collect(),
    };

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_frames;

    fn segments(layout: Layout, w: f64, h: f64, b: f64) -> Vec<Rect> {
        let frames = compute_frames(layout, w, h, b).unwrap();
        border_segments(layout, &frames, b).unwrap()
    }

    #[test]
    fn test_diptych_horizontal_segment() {
        let layout = Layout::parse("diptych", "horizontal").unwrap();
        assert_eq!(
            segments(layout, 400.0, 400.0, 10.0),
            vec![Rect::new(195.0, 0.0, 10.0, 400.0)]
        );
    }

    #[test]
    fn test_triptych_vertical_segments() {
        let layout = Layout::parse("triptych", "vertical").unwrap();
        assert_eq!(
            segments(layout, 360.0, 640.0, 5.0),
            vec![
                Rect::new(0.0, 210.0, 360.0, 5.0),
                Rect::new(0.0, 425.0, 360.0, 5.0)
            ]
        );
    }

    #[test]
    fn test_left_large_segments_avoid_large_frame() {
        let layout = Layout::parse("triptych", "left-large").unwrap();
        assert_eq!(
            segments(layout, 400.0, 400.0, 10.0),
            vec![
                Rect::new(240.0, 0.0, 10.0, 400.0),
                Rect::new(250.0, 195.0, 150.0, 10.0)
            ]
        );
    }

    #[test]
    fn test_right_large_segments_avoid_large_frame() {
        let layout = Layout::parse("triptych", "right-large").unwrap();
        assert_eq!(
            segments(layout, 400.0, 400.0, 10.0),
            vec![
                Rect::new(0.0, 195.0, 150.0, 10.0),
                Rect::new(150.0, 0.0, 10.0, 400.0)
            ]
        );
    }

    #[test]
    fn test_zero_border_has_no_segments() {
        for layout in Layout::ALL {
            assert!(segments(layout, 400.0, 400.0, 0.0).is_empty());
        }
    }

    #[test]
    fn test_mismatched_frames_fail() {
        let diptych = Layout::default();
        let triptych = Layout::ALL[2];
        let frames = compute_frames(diptych, 400.0, 400.0, 10.0).unwrap();
        assert!(matches!(
            border_segments(triptych, &frames, 10.0),
            Err(LayoutError::InvalidLayout { .. })
        ));
    }
}
