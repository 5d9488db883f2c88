//! Layout geometry: which frames a collage has and where they sit.
//!
//! A [`Layout`] is a `(type, variant)` pair. Only six pairs are defined:
//!
//! | type     | variants                                          |
//! |----------|---------------------------------------------------|
//! | diptych  | horizontal, vertical                              |
//! | triptych | horizontal, vertical, left-large, right-large     |
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the canvas
//! - All values are `f64` canvas units (pixels at whatever resolution is
//!   being computed)
//! - Borders only separate adjacent frames; there is no outer border
//!
//! Geometry is computed from scratch at each resolution rather than scaled,
//! see [`compute_frames`].

mod borders;
mod frames;
mod rect;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use borders::border_segments;
pub use frames::{compute_frames, frame_at};
pub use rect::Rect;

/// Errors produced by the geometry engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The `(type, variant)` pair is not one of the six defined layouts.
    #[error("Invalid layout: {kind}/{variant}")]
    InvalidLayout { kind: String, variant: String },

    /// Canvas dimensions must be finite and positive.
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    /// Border thickness must be finite and non-negative.
    #[error("Invalid border thickness: {0}")]
    InvalidBorder(f64),

    /// The border leaves no room for at least one frame.
    #[error("Border thickness {border} leaves no room for frames on a {width}x{height} canvas")]
    BorderTooThick { border: f64, width: f64, height: f64 },
}

impl LayoutError {
    fn invalid(kind: impl fmt::Display, variant: impl fmt::Display) -> Self {
        LayoutError::InvalidLayout {
            kind: kind.to_string(),
            variant: variant.to_string(),
        }
    }
}

/// Number of panes in a collage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    /// Two panes.
    #[default]
    Diptych,
    /// Three panes.
    Triptych,
}

impl LayoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutType::Diptych => "diptych",
            LayoutType::Triptych => "triptych",
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arrangement of panes within a layout type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Side by side columns.
    #[default]
    Horizontal,
    /// Stacked rows.
    Vertical,
    /// One large frame on the left, two stacked on the right.
    LeftLarge,
    /// Two stacked frames on the left, one large frame on the right.
    RightLarge,
}

impl LayoutVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutVariant::Horizontal => "horizontal",
            LayoutVariant::Vertical => "vertical",
            LayoutVariant::LeftLarge => "left-large",
            LayoutVariant::RightLarge => "right-large",
        }
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(type, variant)` pair.
///
/// The fields are public so layouts can round-trip through serde; code that
/// builds one from user input should go through [`Layout::new`] or
/// [`Layout::parse`], which reject undefined pairs. The geometry functions
/// re-check the pair and never substitute a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(rename = "type")]
    pub kind: LayoutType,
    pub variant: LayoutVariant,
}

impl Layout {
    /// All valid layouts in the order the selector presents them.
    pub const ALL: [Layout; 6] = [
        Layout::unchecked(LayoutType::Diptych, LayoutVariant::Horizontal),
        Layout::unchecked(LayoutType::Diptych, LayoutVariant::Vertical),
        Layout::unchecked(LayoutType::Triptych, LayoutVariant::Horizontal),
        Layout::unchecked(LayoutType::Triptych, LayoutVariant::Vertical),
        Layout::unchecked(LayoutType::Triptych, LayoutVariant::LeftLarge),
        Layout::unchecked(LayoutType::Triptych, LayoutVariant::RightLarge),
    ];

    const fn unchecked(kind: LayoutType, variant: LayoutVariant) -> Self {
        Self { kind, variant }
    }

    /// Build a layout, rejecting undefined pairs.
    pub fn new(kind: LayoutType, variant: LayoutVariant) -> Result<Self, LayoutError> {
        let layout = Self::unchecked(kind, variant);
        if layout.is_valid() {
            Ok(layout)
        } else {
            Err(LayoutError::invalid(kind, variant))
        }
    }

    /// Build a layout from the identifiers the UI uses, e.g.
    /// `("triptych", "left-large")`.
    pub fn parse(kind: &str, variant: &str) -> Result<Self, LayoutError> {
        let parsed_kind = match kind.trim() {
            "diptych" => LayoutType::Diptych,
            "triptych" => LayoutType::Triptych,
            _ => return Err(LayoutError::invalid(kind, variant)),
        };
        let parsed_variant = match variant.trim() {
            "horizontal" => LayoutVariant::Horizontal,
            "vertical" => LayoutVariant::Vertical,
            "left-large" => LayoutVariant::LeftLarge,
            "right-large" => LayoutVariant::RightLarge,
            _ => return Err(LayoutError::invalid(kind, variant)),
        };
        Self::new(parsed_kind, parsed_variant)
    }

    pub fn is_valid(&self) -> bool {
        match self.kind {
            LayoutType::Diptych => matches!(
                self.variant,
                LayoutVariant::Horizontal | LayoutVariant::Vertical
            ),
            LayoutType::Triptych => true,
        }
    }

    /// Number of frames this layout produces.
    pub fn frame_count(&self) -> usize {
        match self.kind {
            LayoutType::Diptych => 2,
            LayoutType::Triptych => 3,
        }
    }

    /// The frame ids of this layout, in order.
    pub fn frame_ids(&self) -> impl Iterator<Item = FrameId> {
        (1..=self.frame_count() as u8).map(FrameId)
    }

    pub fn name(&self) -> &'static str {
        match (self.kind, self.variant) {
            (LayoutType::Diptych, LayoutVariant::Horizontal) => "Diptych - Side by Side",
            (LayoutType::Diptych, LayoutVariant::Vertical) => "Diptych - Stacked",
            (LayoutType::Triptych, LayoutVariant::Horizontal) => "Triptych - Side by Side",
            (LayoutType::Triptych, LayoutVariant::Vertical) => "Triptych - Stacked",
            (LayoutType::Triptych, LayoutVariant::LeftLarge) => "Triptych - Left Large",
            (LayoutType::Triptych, LayoutVariant::RightLarge) => "Triptych - Right Large",
            _ => "Invalid layout",
        }
    }

    pub(crate) fn error(&self) -> LayoutError {
        LayoutError::invalid(self.kind, self.variant)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.variant)
    }
}

/// Stable ordinal frame identifier, displayed as `frame-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameId(u8);

impl FrameId {
    pub const FIRST: FrameId = FrameId(1);
    pub const SECOND: FrameId = FrameId(2);
    pub const THIRD: FrameId = FrameId(3);

    /// Frame ids are 1-based; only 1 through 3 exist.
    pub fn new(ordinal: u8) -> Option<Self> {
        (1..=3).contains(&ordinal).then_some(FrameId(ordinal))
    }

    pub fn ordinal(self) -> u8 {
        self.0
    }

    /// Zero-based position in a layout's frame list.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

impl FromStr for FrameId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix("frame-")
            .and_then(|n| n.parse::<u8>().ok())
            .and_then(FrameId::new)
            .ok_or_else(|| format!("Invalid frame id: {s}"))
    }
}

impl TryFrom<String> for FrameId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrameId> for String {
    fn from(id: FrameId) -> Self {
        id.to_string()
    }
}

/// A rectangular region of the canvas reserved for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(id: FrameId, rect: Rect) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_the_six_layouts() {
        for layout in Layout::ALL {
            assert_eq!(Layout::new(layout.kind, layout.variant), Ok(layout));
        }
    }

    #[test]
    fn test_new_rejects_diptych_large_variants() {
        for variant in [LayoutVariant::LeftLarge, LayoutVariant::RightLarge] {
            let result = Layout::new(LayoutType::Diptych, variant);
            assert!(matches!(result, Err(LayoutError::InvalidLayout { .. })));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Layout::parse("triptych", "left-large"),
            Ok(Layout::ALL[4])
        );
        let err = Layout::parse("quadtych", "horizontal").unwrap_err();
        assert_eq!(err.to_string(), "Invalid layout: quadtych/horizontal");
        assert!(Layout::parse("diptych", "diagonal").is_err());
        assert!(Layout::parse("diptych", "right-large").is_err());
    }

    #[test]
    fn test_frame_counts_and_ids() {
        let diptych = Layout::default();
        assert_eq!(diptych.frame_count(), 2);
        assert_eq!(
            diptych.frame_ids().collect::<Vec<_>>(),
            vec![FrameId::FIRST, FrameId::SECOND]
        );
        assert_eq!(Layout::ALL[5].frame_ids().count(), 3);
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(Layout::default().name(), "Diptych - Side by Side");
        assert_eq!(Layout::ALL[5].name(), "Triptych - Right Large");
    }

    #[test]
    fn test_frame_id_parse_and_display() {
        assert_eq!("frame-2".parse::<FrameId>(), Ok(FrameId::SECOND));
        assert_eq!(FrameId::THIRD.to_string(), "frame-3");
        assert!("frame-0".parse::<FrameId>().is_err());
        assert!("frame-4".parse::<FrameId>().is_err());
        assert!("2".parse::<FrameId>().is_err());
        assert_eq!(FrameId::new(4), None);
        assert_eq!(FrameId::THIRD.index(), 2);
    }

    #[test]
    fn test_frame_ids_order() {
        assert!(FrameId::FIRST < FrameId::SECOND);
        assert!(FrameId::SECOND < FrameId::THIRD);
    }
}
