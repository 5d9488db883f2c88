//! Bitmap resizing.
//!
//! Used when importing very large photos (bounded working copies) and by the
//! compositor to pre-reduce sources it would otherwise sample with heavy
//! aliasing. All functions return a new `DecodedImage`.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize to exact dimensions.
///
/// # Errors
///
/// `DecodeError::InvalidDimensions` for a zero target size.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("pixel buffer does not match size".into()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgba_image(resized))
}

/// Shrink so the longest edge is at most `max_edge`, keeping aspect ratio.
///
/// Images that already fit are returned unchanged; nothing is upscaled.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: 0,
            height: 0,
        });
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (width, height) = fit_dimensions(image.width, image.height, max_edge);
    resize(image, width, height, filter)
}

fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;
    if width >= height {
        let h = (max_edge as f64 / ratio).round() as u32;
        (max_edge, h.max(1))
    } else {
        let w = (max_edge as f64 * ratio).round() as u32;
        (w.max(1), max_edge)
    }
}
