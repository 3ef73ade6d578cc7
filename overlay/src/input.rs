//! Input model: draw/erase mode and the drag gesture state.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::{Point, Rect};

/// What a pointer gesture on the canvas means right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Dragging draws a new box.
    #[default]
    Draw,
    /// Clicking an existing box removes it.
    Erase,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Draw => Self::Erase,
            Self::Erase => Self::Draw,
        }
    }
}

/// The active gesture, tracked between pointer-down and pointer-up.
///
/// A dragging state never outlives one gesture: it is created on
/// pointer-down and resolved or discarded on pointer-up / mode toggle.
#[derive(Debug, Clone, Copy, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A rectangle is being dragged out from `origin`.
    Dragging {
        /// Canvas-local point where the drag started.
        origin: Point,
        /// Current rectangle, canvas-local, updated on every pointer-move.
        rect: Rect,
    },
}
