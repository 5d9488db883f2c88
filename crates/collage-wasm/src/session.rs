//! The editor session exposed to JavaScript.
//!
//! `JsCollageSession` owns the collage state, the decoded bitmaps and the
//! drag controller, so the UI only forwards events and reads geometry back.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCollageSession();
//! session.set_layout('triptych', 'left-large');
//! session.add_image('frame-1', new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.onpointerdown = (e) => session.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => session.pointer_move(e.offsetX, e.offsetY);
//! canvas.onpointerup = () => session.pointer_up();
//!
//! const result = session.export({ tier: 'high', format: 'png' });
//! ```

use collage_core::aspect::AspectRatio;
use collage_core::color::{Color, StylePreset};
use collage_core::decode::{self, DecodedImage};
use collage_core::export::{ExportArtifact, ExportError, ExportOptions, ExportPipeline, ImageStore};
use collage_core::layout::{FrameId, Layout};
use collage_core::session::{CollageState, DragController, Point};
use futures::FutureExt;
use wasm_bindgen::prelude::*;

use crate::export::{JsExportOptions, JsExportResult};
use crate::geometry::frames_and_borders;
use crate::types::{js_error, parse_frame, to_js, JsDecodedImage};

#[wasm_bindgen]
#[derive(Default)]
pub struct JsCollageSession {
    state: CollageState,
    store: ImageStore,
    drag: DragController,
    exports: ExportPipeline,
}

#[wasm_bindgen]
impl JsCollageSession {
    /// A fresh session: diptych side by side, 1:1, white, 10px white border.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCollageSession {
        Self::default()
    }

    // ----- layout and style -----

    /// Fails for any pair outside the six defined layouts.
    pub fn set_layout(&mut self, layout_type: &str, variant: &str) -> Result<(), JsValue> {
        let layout = Layout::parse(layout_type, variant).map_err(js_error)?;
        self.state.set_layout(layout).map_err(js_error)
    }

    pub fn set_aspect_ratio(&mut self, id: &str) -> Result<(), JsValue> {
        let ratio: AspectRatio = id.parse().map_err(js_error)?;
        self.state.set_aspect_ratio(ratio);
        Ok(())
    }

    /// `#rgb` or `#rrggbb`.
    pub fn set_background(&mut self, hex: &str) -> Result<(), JsValue> {
        let color = Color::from_hex(hex).map_err(js_error)?;
        self.state.set_background(color);
        Ok(())
    }

    pub fn set_border_color(&mut self, hex: &str) -> Result<(), JsValue> {
        let color = Color::from_hex(hex).map_err(js_error)?;
        self.state.set_border_color(color);
        Ok(())
    }

    /// Clamped to 0..=50 preview pixels.
    pub fn set_border_thickness(&mut self, thickness: f64) {
        self.state.set_border_thickness(thickness);
    }

    /// `clean-white`, `dark-mode`, `seamless` or `gallery`.
    pub fn apply_preset(&mut self, id: &str) -> Result<(), JsValue> {
        let preset: StylePreset = id.parse().map_err(js_error)?;
        self.state.apply_preset(preset);
        Ok(())
    }

    /// The whole collage state as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state)
    }

    // ----- geometry -----

    /// `{ width, height }` of the preview canvas.
    pub fn preview_size(&self) -> Result<JsValue, JsValue> {
        let (width, height) = self.state.aspect_ratio.preview_dimensions();
        to_js(&crate::geometry::Size { width, height })
    }

    pub fn preview_frames(&self) -> Result<JsValue, JsValue> {
        let frames = self.state.preview_frames().map_err(js_error)?;
        to_js(&frames)
    }

    pub fn preview_border_segments(&self) -> Result<JsValue, JsValue> {
        let (width, height) = self.state.preview_size();
        let (_, borders) = frames_and_borders(
            self.state.layout,
            width,
            height,
            self.state.border.thickness,
        )
        .map_err(js_error)?;
        to_js(&borders)
    }

    /// Frame id under a preview-space point, `undefined` on a border.
    pub fn frame_at(&self, x: f64, y: f64) -> Option<String> {
        self.state.frame_at(x, y).map(|id| id.to_string())
    }

    // ----- images -----

    /// Decode `bytes` and put the image into `frame`.
    pub fn add_image(&mut self, frame: &str, bytes: &[u8]) -> Result<(), JsValue> {
        let frame = self.frame_in_layout(frame).map_err(js_error)?;
        let image = decode::decode_image(bytes).map_err(js_error)?;
        self.place(frame, image);
        Ok(())
    }

    /// Put an already decoded image into `frame`.
    pub fn add_decoded_image(&mut self, frame: &str, image: &JsDecodedImage) -> Result<(), JsValue> {
        let frame = self.frame_in_layout(frame).map_err(js_error)?;
        let image = image.to_decoded().map_err(js_error)?;
        self.place(frame, image);
        Ok(())
    }

    /// Returns whether the frame had an image.
    pub fn remove_image(&mut self, frame: &str) -> Result<bool, JsValue> {
        let frame = parse_frame(frame).map_err(js_error)?;
        let removed = self.state.remove_image(frame).is_some();
        self.store.retain_referenced(&self.state);
        Ok(removed)
    }

    /// Drop images left behind in frames the current layout no longer has.
    pub fn prune_orphans(&mut self) -> Vec<String> {
        let pruned = self.state.prune_orphans();
        self.store.retain_referenced(&self.state);
        pruned.iter().map(ToString::to_string).collect()
    }

    pub fn has_images(&self) -> bool {
        self.state.has_images()
    }

    /// `{ offset_x, offset_y, scale, natural_width, natural_height, source }`
    /// or `undefined` for an empty frame.
    pub fn placement(&self, frame: &str) -> Result<JsValue, JsValue> {
        let frame = parse_frame(frame).map_err(js_error)?;
        match self.state.placement(frame) {
            Some(placement) => to_js(placement),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn selected_frame(&self) -> Option<String> {
        self.state.selected_frame().map(|id| id.to_string())
    }

    /// Select a frame, or clear the selection with `undefined`.
    pub fn select_frame(&mut self, frame: Option<String>) -> Result<(), JsValue> {
        let frame = frame
            .as_deref()
            .map(parse_frame)
            .transpose()
            .map_err(js_error)?;
        self.state.select_frame(frame);
        Ok(())
    }

    /// Clamped to 0.1..=3. Returns `false` for an empty frame.
    pub fn set_image_scale(&mut self, frame: &str, scale: f64) -> Result<bool, JsValue> {
        let frame = parse_frame(frame).map_err(js_error)?;
        Ok(self.state.set_image_scale(frame, scale))
    }

    /// Scale and center the frame's image so it covers the frame.
    pub fn fit_image_to_frame(&mut self, frame: &str) -> Result<bool, JsValue> {
        let frame = parse_frame(frame).map_err(js_error)?;
        self.state.fit_image_to_frame(frame).map_err(js_error)
    }

    // ----- pointer -----

    /// Press at a preview-space point. Returns the frame under the pointer;
    /// dragging starts only when that frame has an image.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<String> {
        let frame = self.state.frame_at(x, y)?;
        self.drag.press(&mut self.state, frame, Point::new(x, y));
        Some(frame.to_string())
    }

    /// Returns whether an image moved.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.drag.move_to(&mut self.state, Point::new(x, y))
    }

    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    /// Leaving the canvas ends a drag like releasing does.
    pub fn pointer_leave(&mut self) {
        self.drag.release();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // ----- export -----

    pub fn is_exporting(&self) -> bool {
        self.exports.is_busy()
    }

    /// Render and encode the collage.
    ///
    /// Fails when no frame has an image. Frames whose image is missing are
    /// reported through `skipped_frames()` and a console warning.
    pub fn export(&self, options: JsValue) -> Result<JsExportResult, JsValue> {
        let options: JsExportOptions = if options.is_undefined() || options.is_null() {
            JsExportOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(js_error)?
        };

        let artifact = self
            .run_export(options.into())
            .ok_or_else(|| js_error("export did not complete"))?
            .map_err(js_error)?;
        let result = JsExportResult::new(artifact);
        for skipped in result.skipped() {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "collage export: {} left empty ({})",
                skipped.frame, skipped.reason
            )));
        }
        Ok(result)
    }
}

impl JsCollageSession {
    pub(crate) fn collage(&self) -> &CollageState {
        &self.state
    }

    pub(crate) fn stored_images(&self) -> usize {
        self.store.len()
    }

    fn frame_in_layout(&self, frame: &str) -> Result<FrameId, String> {
        let id = parse_frame(frame)?;
        if id.index() >= self.state.layout.frame_count() {
            return Err(format!("{id} is not part of {}", self.state.layout));
        }
        Ok(id)
    }

    fn place(&mut self, frame: FrameId, image: DecodedImage) {
        let (width, height) = (image.width, image.height);
        let handle = self.store.insert(image);
        self.state.assign_image(frame, handle, width, height);
        self.store.retain_referenced(&self.state);
    }

    /// Drive the export to completion in a single poll. The in-memory store
    /// never suspends; `None` means something did.
    pub(crate) fn run_export(
        &self,
        options: ExportOptions,
    ) -> Option<Result<ExportArtifact, ExportError>> {
        self.exports
            .run(&self.state, &options, &self.store)
            .now_or_never()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_invalid_inputs_are_errors() {
        let mut session = JsCollageSession::new();
        assert!(session.set_layout("diptych", "left-large").is_err());
        assert!(session.set_aspect_ratio("2:1").is_err());
        assert!(session.set_background("white").is_err());
        assert!(session.apply_preset("neon").is_err());
        assert!(session.add_image("frame-1", &[1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_with_plain_options() {
        let mut session = JsCollageSession::new();
        session
            .add_decoded_image("frame-1", &JsDecodedImage::new(2, 2, vec![255; 16]))
            .unwrap();

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"tier".into(), &"medium".into()).unwrap();
        js_sys::Reflect::set(&options, &"format".into(), &"png".into()).unwrap();

        let result = session.export(options.into()).unwrap();
        assert_eq!(result.mime_type(), "image/png");
        assert_eq!(result.width(), 540);
    }

    #[wasm_bindgen_test]
    fn test_export_without_images_fails() {
        let session = JsCollageSession::new();
        assert!(session.export(JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_geometry_accessors() {
        let session = JsCollageSession::new();
        assert!(session.preview_frames().is_ok());
        assert!(session.preview_border_segments().is_ok());
        assert!(session.preview_size().is_ok());
        assert!(session.state().is_ok());
    }
}
