use super::capture::{CaptureGuard, GestureKind, PointerCapture};
use super::{GestureStart, PreviewChange};
use crate::constants::SNAP_THRESHOLD;
use crate::geometry::{Position, SnapZone, Viewport};

#[derive(Debug)]
struct ActiveDrag {
    start_pointer: Position,
    start_window: Position,
    preview: Option<SnapZone>,
    _capture: CaptureGuard,
}

/// Result of a successful [`DragController::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragStarted {
    /// Position to apply immediately when the start hook relocated the window.
    pub correction: Option<Position>,
}

/// One pointer-move worth of drag output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragStep {
    pub position: Position,
    pub preview: PreviewChange,
}

/// Terminal result of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    /// Zone under the release pointer; the caller snaps the window into it.
    pub drop_zone: Option<SnapZone>,
    /// Always a change to `None`: the ghost preview is cleared on release.
    pub preview: PreviewChange,
}

/// Turns a pointer-down, pointer-move*, pointer-up sequence into window
/// positions and a snap-zone decision.
///
/// Only the in-flight gesture is stored. Dropping the controller mid-gesture
/// releases the pointer capture.
#[derive(Debug)]
pub struct DragController {
    capture: PointerCapture,
    snap_threshold: u32,
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new(capture: PointerCapture) -> Self {
        Self::with_snap_threshold(capture, SNAP_THRESHOLD)
    }

    pub fn with_snap_threshold(capture: PointerCapture, snap_threshold: u32) -> Self {
        Self {
            capture,
            snap_threshold,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Zone currently shown as the ghost preview.
    pub fn preview(&self) -> Option<SnapZone> {
        self.active.as_ref().and_then(|drag| drag.preview)
    }

    /// Begin a drag at `pointer` for a window currently at `window_position`.
    ///
    /// `on_start` runs once the pointer is captured. It may relocate the
    /// window (for example to pull it out of a maximized layout), in which
    /// case the relocated position becomes the drag origin.
    ///
    /// Returns `None` when another gesture holds the pointer.
    pub fn start<F>(
        &mut self,
        pointer: Position,
        window_position: Position,
        on_start: F,
    ) -> Option<DragStarted>
    where
        F: FnOnce() -> GestureStart,
    {
        if self.active.is_some() {
            return None;
        }
        let capture = self.capture.acquire(GestureKind::Drag)?;
        let (start_window, correction) = match on_start() {
            GestureStart {
                override_position: Some(position),
            } => (position, Some(position)),
            GestureStart {
                override_position: None,
            } => (window_position, None),
        };
        tracing::trace!(?pointer, ?start_window, "drag started");
        self.active = Some(ActiveDrag {
            start_pointer: pointer,
            start_window,
            preview: None,
            _capture: capture,
        });
        Some(DragStarted { correction })
    }

    /// Window position for a pointer move.
    ///
    /// The pointer is clamped to the work area first. The resulting `y` is
    /// floored at 0; `x` is not, so a window can hang off the left edge.
    pub fn update(&mut self, pointer: Position, viewport: &Viewport) -> Option<DragStep> {
        let threshold = self.snap_threshold;
        let drag = self.active.as_mut()?;
        let clamped = viewport.clamp_pointer(pointer);
        let (dx, dy) = clamped.delta_from(drag.start_pointer);
        let mut position = drag.start_window.offset(dx, dy);
        position.y = position.y.max(0);

        let zone = viewport.snap_zone_at(clamped, threshold);
        let preview = if zone != drag.preview {
            drag.preview = zone;
            PreviewChange::Changed(zone)
        } else {
            PreviewChange::Unchanged
        };
        Some(DragStep { position, preview })
    }

    /// Finish the drag at `pointer` and release the capture.
    pub fn end(&mut self, pointer: Position, viewport: &Viewport) -> Option<DragEnd> {
        let drag = self.active.take()?;
        let clamped = viewport.clamp_pointer(pointer);
        let drop_zone = viewport.snap_zone_at(clamped, self.snap_threshold);
        tracing::trace!(?pointer, ?drop_zone, "drag ended");
        drop(drag);
        Some(DragEnd {
            drop_zone,
            preview: PreviewChange::Changed(None),
        })
    }
}
