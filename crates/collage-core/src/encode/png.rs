//! PNG export.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{check_rgb_buffer, EncodeError, ExportFormat};

/// Encode RGB pixels (3 bytes per pixel, row-major) as PNG.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    check_rgb_buffer(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ExportFormat::Png,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_is_lossless() {
        let pixels: Vec<u8> = (0..5 * 4 * 3).map(|i| (i * 13 % 256) as u8).collect();
        let png = encode_png(&pixels, 5, 4).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgb8();
        assert_eq!(decoded.dimensions(), (5, 4));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn test_encode_png_rejects_bad_input() {
        assert!(matches!(
            encode_png(&[0; 5], 1, 2),
            Err(EncodeError::InvalidPixelData {
                expected: 6,
                actual: 5
            })
        ));
        assert!(matches!(
            encode_png(&[], 3, 0),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}
