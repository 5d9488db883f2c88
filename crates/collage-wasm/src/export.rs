//! Export bindings.
//!
//! Options arrive as a plain object, e.g.
//! `{ tier: "ultra", format: "jpeg", quality: 85 }`; every field is optional.

use collage_core::encode::ExportFormat;
use collage_core::export::{ExportArtifact, ExportOptions, ResolutionTier, SkippedFrame};
use collage_core::render::InterpolationFilter;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::types::to_js;

/// Export options as sent from JavaScript.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JsExportOptions {
    pub tier: Option<ResolutionTier>,
    pub format: Option<ExportFormat>,
    pub quality: Option<u8>,
    pub filter: Option<InterpolationFilter>,
}

impl From<JsExportOptions> for ExportOptions {
    fn from(js: JsExportOptions) -> Self {
        let defaults = ExportOptions::default();
        ExportOptions {
            tier: js.tier.unwrap_or(defaults.tier),
            format: js.format.unwrap_or(defaults.format),
            quality: js.quality.unwrap_or(defaults.quality).clamp(1, 100),
            filter: js.filter.unwrap_or(defaults.filter),
        }
    }
}

/// A finished export, ready to hand to a download link.
#[wasm_bindgen]
pub struct JsExportResult {
    artifact: ExportArtifact,
}

#[wasm_bindgen]
impl JsExportResult {
    /// Encoded file contents as a `Uint8Array`.
    pub fn bytes(&self) -> Vec<u8> {
        self.artifact.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.artifact.mime_type().to_string()
    }

    /// Suggested download name, `collage-<millis>.<ext>`.
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.artifact.filename.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.artifact.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.artifact.height
    }

    /// `[{ frame: "frame-2", reason: "..." }]` for frames that rendered empty.
    pub fn skipped_frames(&self) -> Result<JsValue, JsValue> {
        to_js(&self.artifact.skipped_frames)
    }
}

impl JsExportResult {
    pub(crate) fn new(artifact: ExportArtifact) -> Self {
        Self { artifact }
    }

    pub(crate) fn skipped(&self) -> &[SkippedFrame] {
        &self.artifact.skipped_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_use_defaults() {
        let options = ExportOptions::from(JsExportOptions::default());
        assert_eq!(options, ExportOptions::default());
    }

    #[test]
    fn test_options_override_and_clamp() {
        let options = ExportOptions::from(JsExportOptions {
            tier: Some(ResolutionTier::Ultra),
            format: Some(ExportFormat::Jpeg),
            quality: Some(0),
            filter: None,
        });
        assert_eq!(options.tier, ResolutionTier::Ultra);
        assert_eq!(options.format, ExportFormat::Jpeg);
        assert_eq!(options.quality, 1);
        assert_eq!(options.filter, InterpolationFilter::Bilinear);
    }

    #[test]
    fn test_result_accessors() {
        let result = JsExportResult::new(ExportArtifact {
            bytes: vec![1, 2, 3],
            format: ExportFormat::Jpeg,
            width: 540,
            height: 675,
            skipped_frames: Vec::new(),
            filename: "collage-1.jpg".into(),
        });
        assert_eq!(result.bytes(), vec![1, 2, 3]);
        assert_eq!(result.mime_type(), "image/jpeg");
        assert_eq!(result.filename(), "collage-1.jpg");
        assert_eq!((result.width(), result.height()), (540, 675));
        assert!(result.skipped().is_empty());
    }
}
