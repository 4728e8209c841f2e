use super::capture::{CaptureGuard, GestureKind, PointerCapture};
use crate::geometry::{Bounds, Position, Size};
use crate::window::WindowState;

/// The eight resize handles, named after the edges they sit on.
///
/// Compass equivalents: `Top` = N, `TopRight` = NE, `Right` = E,
/// `BottomRight` = SE, `Bottom` = S, `BottomLeft` = SW, `Left` = W,
/// `TopLeft` = NW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// How a handle moves one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grip {
    /// Left or top edge: the origin moves with the pointer.
    Origin,
    /// Right or bottom edge: only the dimension changes.
    Far,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::Top,
        ResizeEdge::TopRight,
        ResizeEdge::Right,
        ResizeEdge::BottomRight,
        ResizeEdge::Bottom,
        ResizeEdge::BottomLeft,
        ResizeEdge::Left,
        ResizeEdge::TopLeft,
    ];

    fn horizontal(self) -> Option<Grip> {
        match self {
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft => Some(Grip::Origin),
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight => Some(Grip::Far),
            ResizeEdge::Top | ResizeEdge::Bottom => None,
        }
    }

    fn vertical(self) -> Option<Grip> {
        match self {
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight => Some(Grip::Origin),
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight => {
                Some(Grip::Far)
            }
            ResizeEdge::Left | ResizeEdge::Right => None,
        }
    }

    pub fn compass(self) -> &'static str {
        match self {
            ResizeEdge::Top => "n",
            ResizeEdge::TopRight => "ne",
            ResizeEdge::Right => "e",
            ResizeEdge::BottomRight => "se",
            ResizeEdge::Bottom => "s",
            ResizeEdge::BottomLeft => "sw",
            ResizeEdge::Left => "w",
            ResizeEdge::TopLeft => "nw",
        }
    }
}

/// Hit region of one resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeHandle<R: Copy + Eq> {
    pub id: R,
    pub bounds: Bounds,
    pub edge: ResizeEdge,
}

/// The eight handles of a window: 1x1 corners first, then the edges between
/// them. Hit-test in this order so corners win.
pub fn resize_handles_for_bounds<R: Copy + Eq>(id: R, bounds: Bounds) -> Vec<ResizeHandle<R>> {
    let mut handles = Vec::new();
    let Bounds { position, size } = bounds;
    if size.width == 0 || size.height == 0 {
        return handles;
    }
    let right = position.x.saturating_add(size.width as i32 - 1);
    let bottom = position.y.saturating_add(size.height as i32 - 1);
    let cell = |x: i32, y: i32| Bounds::new(Position::new(x, y), Size::new(1, 1));

    handles.push(ResizeHandle {
        id,
        bounds: cell(position.x, position.y),
        edge: ResizeEdge::TopLeft,
    });
    handles.push(ResizeHandle {
        id,
        bounds: cell(right, position.y),
        edge: ResizeEdge::TopRight,
    });
    handles.push(ResizeHandle {
        id,
        bounds: cell(position.x, bottom),
        edge: ResizeEdge::BottomLeft,
    });
    handles.push(ResizeHandle {
        id,
        bounds: cell(right, bottom),
        edge: ResizeEdge::BottomRight,
    });
    if size.width > 2 {
        let span = Size::new(size.width - 2, 1);
        handles.push(ResizeHandle {
            id,
            bounds: Bounds::new(Position::new(position.x + 1, position.y), span),
            edge: ResizeEdge::Top,
        });
        handles.push(ResizeHandle {
            id,
            bounds: Bounds::new(Position::new(position.x + 1, bottom), span),
            edge: ResizeEdge::Bottom,
        });
    }
    if size.height > 2 {
        let span = Size::new(1, size.height - 2);
        handles.push(ResizeHandle {
            id,
            bounds: Bounds::new(Position::new(position.x, position.y + 1), span),
            edge: ResizeEdge::Left,
        });
        handles.push(ResizeHandle {
            id,
            bounds: Bounds::new(Position::new(right, position.y + 1), span),
            edge: ResizeEdge::Right,
        });
    }
    handles
}

/// Resolve one axis. Returns the new origin and dimension.
///
/// An origin grip that would shrink the window below `min` pins the
/// dimension at `min` and parks the origin so the opposite edge stays where
/// it was at gesture start.
fn resize_axis(start_pos: i32, start_dim: u32, delta: i32, min: u32, grip: Grip) -> (i32, u32) {
    let start_pos = start_pos as i64;
    let start_dim = start_dim as i64;
    let delta = delta as i64;
    let min = min as i64;
    let (pos, dim) = match grip {
        Grip::Far => (start_pos, (start_dim + delta).max(min).max(0)),
        Grip::Origin => {
            let tentative = start_dim - delta;
            if tentative >= min {
                (start_pos + delta, tentative)
            } else {
                (start_pos + (start_dim - min), min)
            }
        }
    };
    (
        pos.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        dim.clamp(0, u32::MAX as i64) as u32,
    )
}

/// Geometry for a pointer displacement of `(dx, dy)` from gesture start.
pub fn apply_resize(start: Bounds, edge: ResizeEdge, dx: i32, dy: i32, min_size: Size) -> Bounds {
    let mut out = start;
    if let Some(grip) = edge.horizontal() {
        let (x, width) = resize_axis(
            start.position.x,
            start.size.width,
            dx,
            min_size.width,
            grip,
        );
        out.position.x = x;
        out.size.width = width;
    }
    if let Some(grip) = edge.vertical() {
        let (y, height) = resize_axis(
            start.position.y,
            start.size.height,
            dy,
            min_size.height,
            grip,
        );
        out.position.y = y;
        out.size.height = height;
    }
    out
}

#[derive(Debug)]
struct ActiveResize {
    edge: ResizeEdge,
    start_pointer: Position,
    start: Bounds,
    min_size: Size,
    _capture: CaptureGuard,
}

/// Turns a pointer gesture on a resize handle into window geometry, never
/// going below the window's minimum size.
#[derive(Debug)]
pub struct ResizeController {
    capture: PointerCapture,
    active: Option<ActiveResize>,
}

impl ResizeController {
    pub fn new(capture: PointerCapture) -> Self {
        Self {
            capture,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn edge(&self) -> Option<ResizeEdge> {
        self.active.as_ref().map(|resize| resize.edge)
    }

    /// Begin resizing `window` from `edge`.
    ///
    /// Refused while the window is maximized or snapped, and while another
    /// gesture holds the pointer.
    pub fn start(&mut self, pointer: Position, edge: ResizeEdge, window: &WindowState) -> bool {
        if self.active.is_some() || !window.is_floating() {
            return false;
        }
        let Some(capture) = self.capture.acquire(GestureKind::Resize) else {
            return false;
        };
        tracing::trace!(?pointer, edge = edge.compass(), "resize started");
        self.active = Some(ActiveResize {
            edge,
            start_pointer: pointer,
            start: window.bounds(),
            min_size: window.min_size(),
            _capture: capture,
        });
        true
    }

    /// Geometry for the current pointer. Apply with
    /// `WindowRegistry::resize(id, bounds.size, Some(bounds.position))`.
    pub fn update(&self, pointer: Position) -> Option<Bounds> {
        let resize = self.active.as_ref()?;
        let (dx, dy) = pointer.delta_from(resize.start_pointer);
        Some(apply_resize(
            resize.start,
            resize.edge,
            dx,
            dy,
            resize.min_size,
        ))
    }

    /// Finish the gesture and release the capture.
    pub fn end(&mut self) -> bool {
        let ended = self.active.take().is_some();
        if ended {
            tracing::trace!("resize ended");
        }
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{SnapZone, Viewport};
    use crate::window::{AppDescriptor, WindowRegistry, WindowSpec};

    fn start_bounds() -> Bounds {
        Bounds::new(Position::new(100, 100), Size::new(400, 300))
    }

    const MIN: Size = Size::new(300, 200);

    #[test]
    fn left_handle_stops_at_floor_keeping_right_edge() {
        let out = apply_resize(start_bounds(), ResizeEdge::Left, 200, 0, MIN);
        assert_eq!(out.size.width, 300);
        assert_eq!(out.position.x, 100 + 100);
        assert_eq!(out.right(), start_bounds().right());
        assert_eq!(out.position.y, 100);
        assert_eq!(out.size.height, 300);
    }

    #[test]
    fn left_handle_above_floor_moves_origin_with_pointer() {
        let out = apply_resize(start_bounds(), ResizeEdge::Left, 50, 0, MIN);
        assert_eq!(out.position.x, 150);
        assert_eq!(out.size.width, 350);
        let out = apply_resize(start_bounds(), ResizeEdge::Left, -60, 0, MIN);
        assert_eq!(out.position.x, 40);
        assert_eq!(out.size.width, 460);
    }

    #[test]
    fn right_and_bottom_handles_clamp_to_floor() {
        let out = apply_resize(start_bounds(), ResizeEdge::BottomRight, -500, -500, MIN);
        assert_eq!(out.position, Position::new(100, 100));
        assert_eq!(out.size, MIN);
        let out = apply_resize(start_bounds(), ResizeEdge::Right, 25, 999, MIN);
        assert_eq!(out.size, Size::new(425, 300));
    }

    #[test]
    fn top_left_corner_combines_both_axes() {
        let out = apply_resize(start_bounds(), ResizeEdge::TopLeft, -10, 150, MIN);
        assert_eq!(out.position, Position::new(90, 200));
        assert_eq!(out.size, Size::new(410, 200));
    }

    #[test]
    fn top_handle_drag_up_and_down() {
        let down = apply_resize(start_bounds(), ResizeEdge::Top, 0, 5, MIN);
        assert_eq!(down, Bounds::new(Position::new(100, 105), Size::new(400, 295)));
        let up = apply_resize(start_bounds(), ResizeEdge::Top, 0, -5, MIN);
        assert_eq!(up, Bounds::new(Position::new(100, 95), Size::new(400, 305)));
    }

    #[test]
    fn left_handle_preserves_negative_origin() {
        let start = Bounds::new(Position::new(-8, 10), Size::new(400, 300));
        let out = apply_resize(start, ResizeEdge::Left, 4, 0, MIN);
        assert_eq!(out.position.x, -4);
        assert_eq!(out.size.width, 396);
    }

    #[test]
    fn handles_cover_corners_and_edges() {
        let b = Bounds::new(Position::new(2, 3), Size::new(10, 6));
        let handles = resize_handles_for_bounds(7u8, b);
        assert_eq!(handles.len(), 8);
        let at = |x, y| {
            handles
                .iter()
                .find(|h| h.bounds.contains(Position::new(x, y)))
                .map(|h| h.edge)
        };
        assert_eq!(at(2, 3), Some(ResizeEdge::TopLeft));
        assert_eq!(at(11, 8), Some(ResizeEdge::BottomRight));
        assert_eq!(at(5, 3), Some(ResizeEdge::Top));
        assert_eq!(at(2, 5), Some(ResizeEdge::Left));
        assert_eq!(at(11, 5), Some(ResizeEdge::Right));
        assert_eq!(at(5, 8), Some(ResizeEdge::Bottom));
        assert_eq!(at(5, 5), None);
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Pad;

    impl AppDescriptor for Pad {
        fn window_spec(&self) -> WindowSpec {
            WindowSpec {
                title: "Pad".into(),
                position: Position::new(100, 100),
                size: Size::new(400, 300),
                min_size: MIN,
            }
        }
    }

    #[test]
    fn controller_refuses_maximized_and_snapped_windows() {
        let vp = Viewport::new(1280, 800, 48);
        let capture = PointerCapture::new();
        let mut resize = ResizeController::new(capture.clone());
        let mut reg = WindowRegistry::default();
        reg.open(Pad);

        reg.maximize(Pad, &vp);
        assert!(!resize.start(Position::new(0, 0), ResizeEdge::Left, reg.get(Pad).unwrap()));
        reg.maximize(Pad, &vp);
        reg.snap(Pad, Some(SnapZone::Left), &vp);
        assert!(!resize.start(Position::new(0, 0), ResizeEdge::Right, reg.get(Pad).unwrap()));
        assert!(!capture.is_captured());

        reg.snap(Pad, None, &vp);
        assert!(resize.start(Position::new(100, 200), ResizeEdge::Left, reg.get(Pad).unwrap()));
        assert!(capture.is_captured());
    }

    #[test]
    fn controller_drives_registry_and_releases_on_end() {
        let capture = PointerCapture::new();
        let mut resize = ResizeController::new(capture.clone());
        let mut reg = WindowRegistry::default();
        reg.open(Pad);
        assert!(resize.start(Position::new(100, 200), ResizeEdge::Left, reg.get(Pad).unwrap()));
        assert_eq!(resize.edge(), Some(ResizeEdge::Left));

        let bounds = resize.update(Position::new(300, 260)).unwrap();
        reg.resize(Pad, bounds.size, Some(bounds.position));
        let w = reg.get(Pad).unwrap();
        assert_eq!(w.size(), Size::new(300, 300));
        assert_eq!(w.position(), Position::new(200, 100));

        assert!(resize.end());
        assert!(!capture.is_captured());
        assert!(resize.update(Position::new(0, 0)).is_none());
        assert!(!resize.end());
    }

    #[test]
    fn dropping_controller_releases_capture() {
        let capture = PointerCapture::new();
        let mut reg = WindowRegistry::default();
        reg.open(Pad);
        {
            let mut resize = ResizeController::new(capture.clone());
            assert!(resize.start(Position::new(0, 0), ResizeEdge::Bottom, reg.get(Pad).unwrap()));
            assert_eq!(capture.active(), Some(GestureKind::Resize));
        }
        assert!(!capture.is_captured());
    }
}
