//! JPEG export.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{check_rgb_buffer, EncodeError, ExportFormat};

/// Encode RGB pixels (3 bytes per pixel, row-major) as JPEG.
///
/// `quality` is clamped to 1..=100.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_rgb_buffer(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ExportFormat::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
