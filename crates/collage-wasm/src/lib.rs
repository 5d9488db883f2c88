//! Collage WASM - WebAssembly bindings for the collage editor
//!
//! Exposes collage-core to the browser: stateless geometry helpers for
//! drawing the preview, and a `JsCollageSession` that holds the editor state
//! and produces exports.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible bitmap wrapper and conversion helpers
//! - `decode` - image decoding and resizing
//! - `geometry` - frames, borders, aspect ratios, layouts and presets
//! - `session` - the editing session (state, images, dragging, export)
//! - `export` - export options and results
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCollageSession, compute_frames } from '@collage/wasm';
//!
//! await init();
//!
//! const frames = compute_frames('triptych', 'left-large', 400, 400, 10);
//! const session = new JsCollageSession();
//! session.add_image('frame-1', new Uint8Array(await file.arrayBuffer()));
//! const result = session.export({ tier: 'ultra', format: 'jpeg', quality: 85 });
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod export;
mod geometry;
mod session;
mod types;

pub use decode::{decode_image, resize_to_fit};
pub use export::{JsExportOptions, JsExportResult};
pub use geometry::{
    aspect_ratio_dimensions, aspect_ratios, border_segments, compute_frames, export_dimensions,
    layouts, preset_colors, style_presets,
};
pub use session::JsCollageSession;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
