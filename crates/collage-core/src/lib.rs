//! Collage Core - diptych and triptych collage engine
//!
//! This crate provides everything behind the collage editor except the UI:
//! layout geometry, per-frame image placement, the editing session, decoding,
//! compositing and the export pipeline.
//!
//! # Modules
//!
//! - [`aspect`] - canvas aspect ratios with preview and export sizes
//! - [`color`] - colors, the swatch palette and style presets
//! - [`layout`] - frame rectangles, border segments and hit-testing
//! - [`placement`] - how an image sits inside its frame
//! - [`session`] - the editable collage state and pointer dragging
//! - [`decode`] - bytes to upright RGBA bitmaps
//! - [`render`] - painting a collage onto a surface at any scale
//! - [`encode`] - PNG / JPEG encoding
//! - [`export`] - the end-to-end export pipeline

pub mod aspect;
pub mod color;
pub mod decode;
pub mod encode;
pub mod export;
pub mod layout;
pub mod placement;
pub mod render;
pub mod session;

pub use aspect::AspectRatio;
pub use color::{Color, StylePreset};
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{EncodeError, ExportFormat};
pub use export::{
    export, ExportArtifact, ExportError, ExportOptions, ExportPipeline, ImageSource, ImageStore,
    ResolutionTier,
};
pub use layout::{border_segments, compute_frames, Frame, FrameId, Layout, LayoutError, Rect};
pub use placement::{ImageHandle, ImagePlacement};
pub use session::{BorderSpec, CollageState, DragController};
