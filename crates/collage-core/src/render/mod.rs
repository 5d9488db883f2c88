//! The compositor: paints a collage onto a [`Surface`].
//!
//! # Paint order
//!
//! 1. Background over the whole canvas.
//! 2. Border segments, when the border is thicker than zero.
//! 3. Each occupied frame in frame order: the image is clipped to the frame
//!    and alpha-blended over what is beneath.
//!
//! Frames without an image keep the background color.
//!
//! # Units
//!
//! Placements and border thickness are authored in preview units. A scene
//! carries frames already computed at the output resolution, plus the
//! `scale_factor` mapping preview units onto it, so a factor of 1 reproduces
//! the preview and any other factor scales every measurement by exactly that
//! amount.

mod sample;
mod surface;

use std::borrow::Cow;

use tracing::debug;

use crate::color::Color;
use crate::decode::{resize, DecodedImage, FilterType};
use crate::layout::{border_segments, compute_frames, Frame, FrameId, Layout, LayoutError, Rect};
use crate::placement::ImagePlacement;
use crate::session::{BorderSpec, CollageState};

pub use sample::InterpolationFilter;
pub use surface::Surface;

/// Sources drawn smaller than `1 / PRE_REDUCE_RATIO` of their size are
/// resized with a triangle filter first.
const PRE_REDUCE_RATIO: f64 = 2.0;

/// Everything needed to paint one collage, except the bitmaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub layout: Layout,
    /// Frames at output resolution, in frame order.
    pub frames: Vec<Frame>,
    pub background: Color,
    /// Border in preview units.
    pub border: BorderSpec,
    /// Output units per preview unit.
    pub scale_factor: f64,
    pub filter: InterpolationFilter,
}

impl Scene {
    /// Scene for `state` on a `width x height` canvas.
    ///
    /// Frames are recomputed at that size with the border scaled by
    /// `scale_factor`.
    pub fn from_state(
        state: &CollageState,
        width: f64,
        height: f64,
        scale_factor: f64,
    ) -> Result<Self, LayoutError> {
        let frames = compute_frames(
            state.layout,
            width,
            height,
            state.border.thickness * scale_factor,
        )?;
        Ok(Self {
            layout: state.layout,
            frames,
            background: state.background,
            border: state.border,
            scale_factor,
            filter: InterpolationFilter::default(),
        })
    }

    /// Scene at preview size and factor 1.
    pub fn preview(state: &CollageState) -> Result<Self, LayoutError> {
        let (width, height) = state.preview_size();
        Self::from_state(state, width, height, 1.0)
    }

    pub fn with_filter(mut self, filter: InterpolationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Where the image's full extent lands on the output canvas.
    pub fn image_rect(&self, frame: &Frame, placement: &ImagePlacement) -> Rect {
        let (w, h) = placement.scaled_size();
        let k = self.scale_factor;
        Rect::new(
            frame.x + placement.offset_x * k,
            frame.y + placement.offset_y * k,
            w * k,
            h * k,
        )
    }
}

/// An acquired bitmap with the placement it is drawn with.
#[derive(Debug, Clone, Copy)]
pub struct FrameImage<'a> {
    pub frame: FrameId,
    pub placement: &'a ImagePlacement,
    pub bitmap: &'a DecodedImage,
}

/// Paint `scene` onto `surface`; returns how many images were drawn.
///
/// Images for frames the layout does not have are ignored. Bitmaps are never
/// modified.
pub fn render(
    surface: &mut Surface,
    scene: &Scene,
    images: &[FrameImage<'_>],
) -> Result<usize, LayoutError> {
    surface.fill(scene.background);

    let thickness = scene.border.thickness * scene.scale_factor;
    if thickness > 0.0 {
        for segment in border_segments(scene.layout, &scene.frames, thickness)? {
            surface.fill_rect(&segment, scene.border.color);
        }
    }

    let mut drawn = 0;
    for frame in &scene.frames {
        let Some(image) = images.iter().find(|i| i.frame == frame.id) else {
            continue;
        };
        let dest = scene.image_rect(frame, image.placement);
        debug!(frame = %frame.id, x = dest.x, y = dest.y, width = dest.width, height = dest.height, "drawing frame image");
        if draw_clipped(surface, &frame.rect(), &dest, image.bitmap, scene.filter) {
            drawn += 1;
        }
    }
    Ok(drawn)
}

/// Draw `bitmap` stretched over `dest`, touching only pixels inside `clip`.
///
/// Returns `false` when nothing was visible.
fn draw_clipped(
    surface: &mut Surface,
    clip: &Rect,
    dest: &Rect,
    bitmap: &DecodedImage,
    filter: InterpolationFilter,
) -> bool {
    let finite = [dest.x, dest.y, dest.width, dest.height]
        .iter()
        .all(|v| v.is_finite());
    if !finite || dest.is_empty() || bitmap.is_empty() {
        return false;
    }
    let Some(visible) = clip.intersect(dest) else {
        return false;
    };
    let Some((x0, y0, x1, y1)) = visible.pixel_span(surface.width(), surface.height()) else {
        return false;
    };

    let source = match filter {
        InterpolationFilter::Bilinear => pre_reduce(bitmap, dest),
        InterpolationFilter::Nearest => Cow::Borrowed(bitmap),
    };
    let sx = source.width as f64 / dest.width;
    let sy = source.height as f64 / dest.height;

    for y in y0..y1 {
        let v = (y as f64 + 0.5 - dest.y) * sy;
        for x in x0..x1 {
            let u = (x as f64 + 0.5 - dest.x) * sx;
            surface.blend(x, y, sample::sample(&source, u, v, filter));
        }
    }
    true
}

/// Shrink `bitmap` towards the drawn size when drawing it would skip more
/// than every other source pixel.
fn pre_reduce<'a>(bitmap: &'a DecodedImage, dest: &Rect) -> Cow<'a, DecodedImage> {
    let shrinks = dest.width * PRE_REDUCE_RATIO < bitmap.width as f64
        || dest.height * PRE_REDUCE_RATIO < bitmap.height as f64;
    if !shrinks {
        return Cow::Borrowed(bitmap);
    }

    let width = (dest.width.ceil() as u32).clamp(1, bitmap.width);
    let height = (dest.height.ceil() as u32).clamp(1, bitmap.height);
    match resize(bitmap, width, height, FilterType::Bilinear) {
        Ok(reduced) => Cow::Owned(reduced),
        Err(_) => Cow::Borrowed(bitmap),
    }
}
