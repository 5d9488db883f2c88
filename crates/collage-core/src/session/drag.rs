//! Pointer dragging of an image inside its frame.
//!
//! ```text
//!        press on occupied frame
//!   Idle ───────────────────────▶ Dragging { frame, last }
//!    ▲                               │  move: apply delta, last = pointer
//!    └───────── release / leave ─────┘
//! ```
//!
//! Moves while `Idle` are ignored. Pointer coordinates are in preview units.

use crate::layout::FrameId;

use super::CollageState;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { frame: FrameId, last: Point },
}

/// Turns press/move/release events into placement deltas.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start dragging `frame`'s image and select the frame.
    ///
    /// Empty frames do not start a drag; returns whether one started.
    pub fn press(&mut self, session: &mut CollageState, frame: FrameId, pointer: Point) -> bool {
        if session.placement(frame).is_none() {
            return false;
        }
        session.select_frame(Some(frame));
        self.state = DragState::Dragging {
            frame,
            last: pointer,
        };
        true
    }

    /// Apply the pointer movement since the last event to the dragged image.
    ///
    /// Returns `false` when no drag is active or the image went away
    /// mid-drag (which also ends the drag).
    pub fn move_to(&mut self, session: &mut CollageState, pointer: Point) -> bool {
        let DragState::Dragging { frame, last } = self.state else {
            return false;
        };
        if !session.translate_image(frame, pointer.x - last.x, pointer.y - last.y) {
            self.state = DragState::Idle;
            return false;
        }
        self.state = DragState::Dragging {
            frame,
            last: pointer,
        };
        true
    }

    /// End the drag (pointer released or left the canvas).
    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }
}
