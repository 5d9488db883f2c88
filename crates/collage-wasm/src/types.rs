//! WASM-compatible wrapper types and conversion helpers.

use std::fmt::Display;

use collage_core::decode::{DecodeError, DecodedImage, FilterType};
use collage_core::layout::FrameId;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A decoded RGBA bitmap for JavaScript.
///
/// `pixels()` copies the buffer out of WASM memory; its layout matches
/// `ImageData.data` (4 bytes per pixel, row-major).
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Wrap RGBA pixel data (4 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Copy of the RGBA pixel data as a `Uint8Array`.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Release the WASM memory now instead of waiting for the finalizer.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Copy into a core bitmap, validating the buffer length.
    pub(crate) fn to_decoded(&self) -> Result<DecodedImage, DecodeError> {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// Resize filter from its numeric code: 0 nearest, 2 Lanczos3, anything
/// else bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Error message for the JS side.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(js_error)
}

/// Parse a `frame-N` identifier.
pub(crate) fn parse_frame(id: &str) -> Result<FrameId, String> {
    id.parse::<FrameId>()
}
