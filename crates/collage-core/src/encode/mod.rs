//! Encoding a composed surface into a downloadable file.
//!
//! Two formats are supported: lossless PNG and JPEG with a 1-100 quality.
//! Both take the compositor's opaque RGB8 buffer as is.
//!
//! # Examples
//!
//! ```ignore
//! use collage_core::encode::{encode, ExportFormat};
//!
//! let bytes = encode(&surface, ExportFormat::Jpeg, 90)?;
//! assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
//! ```

mod jpeg;
mod png;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::Surface;

pub use self::jpeg::encode_jpeg;
pub use self::png::encode_png;

/// Errors that can occur while encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec itself failed.
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: ExportFormat,
        message: String,
    },
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Png, ExportFormat::Jpeg];

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            other => Err(format!("Unknown export format: {other}")),
        }
    }
}

/// Encode `surface` as `format`. `quality` only affects JPEG.
pub fn encode(surface: &Surface, format: ExportFormat, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (surface.width(), surface.height());
    match format {
        ExportFormat::Png => encode_png(surface.pixels(), width, height),
        ExportFormat::Jpeg => encode_jpeg(surface.pixels(), width, height, quality),
    }
}

fn check_rgb_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
