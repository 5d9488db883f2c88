//! Source sampling for the compositor.
//!
//! Coordinates are continuous source-pixel coordinates: pixel `(i, j)` covers
//! `[i, i + 1) x [j, j + 1)` and its center is `(i + 0.5, j + 0.5)`. Samples
//! outside the bitmap clamp to the nearest edge pixel. Results are
//! premultiplied RGBA in 0..=255 so transparent texels do not bleed color.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// How source pixels are reconstructed when drawn at a different size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Blocky but exact; no pre-reduction.
    Nearest,
    #[default]
    Bilinear,
}

#[inline]
pub(crate) fn sample(image: &DecodedImage, u: f64, v: f64, filter: InterpolationFilter) -> [f64; 4] {
    match filter {
        InterpolationFilter::Nearest => sample_nearest(image, u, v),
        InterpolationFilter::Bilinear => sample_bilinear(image, u, v),
    }
}

#[inline]
fn premultiplied(image: &DecodedImage, x: u32, y: u32) -> [f64; 4] {
    let [r, g, b, a] = image.pixel(x, y);
    let alpha = a as f64 / 255.0;
    [
        r as f64 * alpha,
        g as f64 * alpha,
        b as f64 * alpha,
        a as f64,
    ]
}

#[inline]
fn clamp_index(i: f64, len: u32) -> u32 {
    i.clamp(0.0, (len - 1) as f64) as u32
}

fn sample_nearest(image: &DecodedImage, u: f64, v: f64) -> [f64; 4] {
    let x = clamp_index(u.floor(), image.width);
    let y = clamp_index(v.floor(), image.height);
    premultiplied(image, x, y)
}

fn sample_bilinear(image: &DecodedImage, u: f64, v: f64) -> [f64; 4] {
    let fx = u - 0.5;
    let fy = v - 0.5;
    let (bx, by) = (fx.floor(), fy.floor());
    let (tx, ty) = (fx - bx, fy - by);

    let x0 = clamp_index(bx, image.width);
    let x1 = clamp_index(bx + 1.0, image.width);
    let y0 = clamp_index(by, image.height);
    let y1 = clamp_index(by + 1.0, image.height);

    let p00 = premultiplied(image, x0, y0);
    let p10 = premultiplied(image, x1, y0);
    let p01 = premultiplied(image, x0, y1);
    let p11 = premultiplied(image, x1, y1);

    let mut out = [0.0; 4];
    for c in 0..4 {
        let top = p00[c] + (p10[c] - p00[c]) * tx;
        let bottom = p01[c] + (p11[c] - p01[c]) * tx;
        out[c] = top + (bottom - top) * ty;
    }
    out
}
