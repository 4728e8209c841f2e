//! Pointer gestures that drive window geometry: dragging by the title bar and
//! resizing from an edge or corner.

pub mod capture;
pub mod drag;
pub mod resize;

use crate::geometry::{Position, SnapZone};

pub use capture::{CaptureGuard, GestureKind, PointerCapture};
pub use drag::{DragController, DragEnd, DragStarted, DragStep};
pub use resize::{ResizeController, ResizeEdge, ResizeHandle, resize_handles_for_bounds};

/// What a gesture's start hook decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureStart {
    /// Window origin to drag from instead of the captured one.
    pub override_position: Option<Position>,
}

impl GestureStart {
    /// Drag from the window's current position.
    pub fn keep() -> Self {
        Self::default()
    }

    /// Drag from `position`, which the controller also reports back as an
    /// immediate correction.
    pub fn relocate(position: Position) -> Self {
        Self {
            override_position: Some(position),
        }
    }
}

/// Whether the snap ghost preview changed on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewChange {
    Unchanged,
    Changed(Option<SnapZone>),
}
