//! The collage being edited.
//!
//! [`CollageState`] is the single context object the editor mutates. It owns
//! the frame → placement mapping; geometry, compositing and export read
//! snapshots of it and never hold on to it.
//!
//! # Orphaned placements
//!
//! Switching layout keeps every placement, including ones for frames the new
//! layout does not have (frame-3 after going from a triptych to a diptych).
//! Such placements stay in the map, so switching back restores them, but
//! everything that looks at "occupied frames" ignores them.
//! [`CollageState::prune_orphans`] drops them explicitly.

mod drag;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::color::{Color, StylePreset};
use crate::layout::{compute_frames, frame_at, Frame, FrameId, Layout, LayoutError};
use crate::placement::{cover_fit, ImageHandle, ImagePlacement, MAX_SCALE, MIN_SCALE};

pub use drag::{DragController, DragState, Point};

/// Thickest border the editor allows, in preview units.
pub const MAX_BORDER_THICKNESS: f64 = 50.0;

/// Border drawn between frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSpec {
    /// Thickness in preview units; zero disables borders.
    pub thickness: f64,
    pub color: Color,
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self {
            thickness: 10.0,
            color: Color::WHITE,
        }
    }
}

/// Everything the user has chosen for the collage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollageState {
    pub layout: Layout,
    pub aspect_ratio: AspectRatio,
    pub border: BorderSpec,
    pub background: Color,
    placements: BTreeMap<FrameId, ImagePlacement>,
    selected: Option<FrameId>,
}

impl CollageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_layout(&mut self, layout: Layout) -> Result<(), LayoutError> {
        let layout = Layout::new(layout.kind, layout.variant)?;
        self.layout = layout;
        Ok(())
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.aspect_ratio = aspect_ratio;
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.border.color = color;
    }

    /// Set the border thickness, clamped to `0..=MAX_BORDER_THICKNESS`.
    /// Non-finite input is ignored.
    pub fn set_border_thickness(&mut self, thickness: f64) {
        if thickness.is_finite() {
            self.border.thickness = thickness.clamp(0.0, MAX_BORDER_THICKNESS);
        }
    }

    pub fn apply_preset(&mut self, preset: StylePreset) {
        let values = preset.values();
        self.background = values.background;
        self.set_border_thickness(values.border_thickness);
        self.border.color = values.border_color;
    }

    /// Preview canvas dimensions for the current aspect ratio.
    pub fn preview_size(&self) -> (f64, f64) {
        let (w, h) = self.aspect_ratio.preview_dimensions();
        (w as f64, h as f64)
    }

    /// Frames at preview resolution, for on-screen layout and hit-testing.
    pub fn preview_frames(&self) -> Result<Vec<Frame>, LayoutError> {
        let (w, h) = self.preview_size();
        compute_frames(self.layout, w, h, self.border.thickness)
    }

    /// The frame under a preview-space point.
    pub fn frame_at(&self, x: f64, y: f64) -> Option<FrameId> {
        let frames = self.preview_frames().ok()?;
        frame_at(&frames, x, y)
    }

    /// Put an image into a frame, replacing whatever was there.
    pub fn assign_image(
        &mut self,
        frame: FrameId,
        source: ImageHandle,
        natural_width: u32,
        natural_height: u32,
    ) {
        self.placements.insert(
            frame,
            ImagePlacement::new(source, natural_width, natural_height),
        );
    }

    /// Remove a frame's image; clears the selection if it pointed there.
    pub fn remove_image(&mut self, frame: FrameId) -> Option<ImagePlacement> {
        if self.selected == Some(frame) {
            self.selected = None;
        }
        self.placements.remove(&frame)
    }

    pub fn placement(&self, frame: FrameId) -> Option<&ImagePlacement> {
        self.placements.get(&frame)
    }

    pub fn placement_mut(&mut self, frame: FrameId) -> Option<&mut ImagePlacement> {
        self.placements.get_mut(&frame)
    }

    /// All placements, orphaned ones included, in frame order.
    pub fn placements(&self) -> impl Iterator<Item = (FrameId, &ImagePlacement)> {
        self.placements.iter().map(|(id, p)| (*id, p))
    }

    /// Placements belonging to frames of the current layout, in frame order.
    pub fn occupied_frames(&self) -> impl Iterator<Item = (FrameId, &ImagePlacement)> {
        let count = self.layout.frame_count();
        self.placements()
            .filter(move |(id, _)| id.index() < count)
    }

    /// Whether any frame of the current layout has an image. Export
    /// requires this.
    pub fn has_images(&self) -> bool {
        self.occupied_frames().next().is_some()
    }

    /// Drop placements for frames the current layout does not have.
    pub fn prune_orphans(&mut self) -> Vec<FrameId> {
        let count = self.layout.frame_count();
        let orphans: Vec<FrameId> = self
            .placements
            .keys()
            .copied()
            .filter(|id| id.index() >= count)
            .collect();
        for id in &orphans {
            self.remove_image(*id);
        }
        orphans
    }

    pub fn selected_frame(&self) -> Option<FrameId> {
        self.selected
    }

    pub fn select_frame(&mut self, frame: Option<FrameId>) {
        self.selected = frame;
    }

    /// Pan a frame's image. Returns `false` when the frame is empty.
    pub fn translate_image(&mut self, frame: FrameId, dx: f64, dy: f64) -> bool {
        match self.placements.get_mut(&frame) {
            Some(placement) => {
                placement.apply_delta(dx, dy);
                true
            }
            None => false,
        }
    }

    /// Set a frame's image scale, clamped to the editor's range.
    pub fn set_image_scale(&mut self, frame: FrameId, scale: f64) -> bool {
        if !scale.is_finite() {
            return false;
        }
        self.placements
            .get_mut(&frame)
            .is_some_and(|placement| placement.apply_scale(scale.clamp(MIN_SCALE, MAX_SCALE)))
    }

    /// Scale and center a frame's image so it covers the frame.
    pub fn fit_image_to_frame(&mut self, frame: FrameId) -> Result<bool, LayoutError> {
        let frames = self.preview_frames()?;
        let Some(target) = frames.iter().find(|f| f.id == frame) else {
            return Ok(false);
        };
        let Some(placement) = self.placements.get_mut(&frame) else {
            return Ok(false);
        };
        let Some((scale, offset_x, offset_y)) = cover_fit(
            placement.natural_width,
            placement.natural_height,
            target.width,
            target.height,
        ) else {
            return Ok(false);
        };

        placement.apply_scale(scale);
        placement.offset_x = offset_x;
        placement.offset_y = offset_y;
        Ok(true)
    }
}
