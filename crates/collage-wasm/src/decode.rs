//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@collage/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = resize_to_fit(decode_image(bytes), 4096, 1);
//! session.add_decoded_image('frame-1', image);
//! ```

use collage_core::decode;
use wasm_bindgen::prelude::*;

use crate::types::{filter_from_u8, js_error, JsDecodedImage};

/// Decode PNG, JPEG or WebP bytes into an upright RGBA image.
///
/// EXIF orientation is applied, so `width`/`height` are the natural size
/// the editor places in a frame.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Shrink an image so its longest edge is at most `max_edge`.
///
/// `filter`: 0 nearest, 1 bilinear, 2 Lanczos3.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    let decoded = image.to_decoded().map_err(js_error)?;
    decode::resize_to_fit(&decoded, max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}
