//! Format-sniffing decode with EXIF orientation correction.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode PNG, JPEG or WebP bytes into an upright RGBA bitmap.
///
/// The format is sniffed from the content, not a file name. EXIF orientation
/// is applied, so the result's size is the image's natural size as the user
/// sees it.
///
/// # Errors
///
/// `DecodeError::InvalidFormat` when the bytes are not a recognized image,
/// `DecodeError::CorruptedFile` when decoding fails part way.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = read_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let rgba = apply_orientation(img, orientation).into_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: rgba.width(),
            height: rgba.height(),
        });
    }
    Ok(DecodedImage::from_rgba_image(rgba))
}

/// EXIF orientation of the image, `Normal` when absent or unreadable.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
