//! Stateless geometry and catalogue bindings.
//!
//! Everything here returns plain JS objects built with `serde-wasm-bindgen`.
//! Frames look like `{ id: "frame-1", x, y, width, height }`.

use collage_core::aspect::AspectRatio;
use collage_core::color::{StylePreset, PRESET_COLORS};
use collage_core::export::ResolutionTier;
use collage_core::layout::{self, Frame, Layout, LayoutError, Rect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{js_error, to_js};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct Size {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AspectRatioInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub preview: Size,
    pub export_base: Size,
}

impl From<AspectRatio> for AspectRatioInfo {
    fn from(ratio: AspectRatio) -> Self {
        Self {
            id: ratio.id(),
            name: ratio.name(),
            description: ratio.description(),
            preview: ratio.preview_dimensions().into(),
            export_base: ratio.export_base_dimensions().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LayoutInfo {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub variant: &'static str,
    pub name: &'static str,
    pub frame_count: usize,
}

impl From<Layout> for LayoutInfo {
    fn from(layout: Layout) -> Self {
        Self {
            kind: layout.kind.as_str(),
            variant: layout.variant.as_str(),
            name: layout.name(),
            frame_count: layout.frame_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PresetInfo {
    pub id: StylePreset,
    pub name: &'static str,
    pub background: String,
    pub border_thickness: f64,
    pub border_color: String,
}

impl From<StylePreset> for PresetInfo {
    fn from(preset: StylePreset) -> Self {
        let values = preset.values();
        Self {
            id: preset,
            name: preset.name(),
            background: values.background.to_hex(),
            border_thickness: values.border_thickness,
            border_color: values.border_color.to_hex(),
        }
    }
}

pub(crate) fn frames_and_borders(
    layout: Layout,
    width: f64,
    height: f64,
    border: f64,
) -> Result<(Vec<Frame>, Vec<Rect>), LayoutError> {
    let frames = layout::compute_frames(layout, width, height, border)?;
    let borders = layout::border_segments(layout, &frames, border)?;
    Ok((frames, borders))
}

/// Frames of a layout on a `width x height` canvas.
///
/// Fails for any `(type, variant)` pair outside the six defined layouts.
#[wasm_bindgen]
pub fn compute_frames(
    layout_type: &str,
    variant: &str,
    width: f64,
    height: f64,
    border: f64,
) -> Result<JsValue, JsValue> {
    let layout = Layout::parse(layout_type, variant).map_err(js_error)?;
    let frames = layout::compute_frames(layout, width, height, border).map_err(js_error)?;
    to_js(&frames)
}

/// Border strips `{ x, y, width, height }` between the frames of a layout.
#[wasm_bindgen]
pub fn border_segments(
    layout_type: &str,
    variant: &str,
    width: f64,
    height: f64,
    border: f64,
) -> Result<JsValue, JsValue> {
    let layout = Layout::parse(layout_type, variant).map_err(js_error)?;
    let (_, borders) = frames_and_borders(layout, width, height, border).map_err(js_error)?;
    to_js(&borders)
}

/// Preview and export-base sizes plus display strings for an aspect ratio id
/// such as `"4:5"`.
#[wasm_bindgen]
pub fn aspect_ratio_dimensions(id: &str) -> Result<JsValue, JsValue> {
    let ratio: AspectRatio = id.parse().map_err(js_error)?;
    to_js(&AspectRatioInfo::from(ratio))
}

/// Every aspect ratio, in menu order.
#[wasm_bindgen]
pub fn aspect_ratios() -> Result<JsValue, JsValue> {
    let all: Vec<AspectRatioInfo> = AspectRatio::ALL.into_iter().map(Into::into).collect();
    to_js(&all)
}

/// Every layout, in menu order.
#[wasm_bindgen]
pub fn layouts() -> Result<JsValue, JsValue> {
    let all: Vec<LayoutInfo> = Layout::ALL.into_iter().map(Into::into).collect();
    to_js(&all)
}

#[wasm_bindgen]
pub fn style_presets() -> Result<JsValue, JsValue> {
    let all: Vec<PresetInfo> = StylePreset::ALL.into_iter().map(Into::into).collect();
    to_js(&all)
}

/// The color-picker swatches as `#rrggbb` strings.
#[wasm_bindgen]
pub fn preset_colors() -> Vec<String> {
    PRESET_COLORS.iter().map(|c| c.to_hex()).collect()
}

/// Output size for an aspect ratio at a resolution tier
/// (`"medium"`, `"high"` or `"ultra"`).
#[wasm_bindgen]
pub fn export_dimensions(aspect_ratio: &str, tier: &str) -> Result<JsValue, JsValue> {
    let ratio: AspectRatio = aspect_ratio.parse().map_err(js_error)?;
    let tier = parse_tier(tier).ok_or_else(|| js_error(format!("Unknown resolution: {tier}")))?;
    to_js(&Size::from(tier.dimensions(ratio)))
}

pub(crate) fn parse_tier(value: &str) -> Option<ResolutionTier> {
    ResolutionTier::ALL
        .into_iter()
        .find(|t| t.name().eq_ignore_ascii_case(value))
}
