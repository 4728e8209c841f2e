//! Value types for window geometry and the pure helpers the window manager
//! builds on.
//!
//! Positions are signed (a window may hang off the left edge of the
//! viewport); sizes are unsigned. All units are viewport units: pixels in a
//! browser-like host, cells in the terminal host.

use ratatui::prelude::Rect;
use serde::Serialize;

/// Top-left corner of a window, or a pointer location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    pub fn delta_from(self, other: Position) -> (i32, i32) {
        (
            self.x.saturating_sub(other.x),
            self.y.saturating_sub(other.y),
        )
    }

    pub fn offset(self, dx: i32, dy: i32) -> Position {
        Position {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A position and a size together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Bounds {
    pub position: Position,
    pub size: Size,
}

impl Bounds {
    pub const fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    pub fn right(&self) -> i64 {
        self.position.x as i64 + self.size.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.position.y as i64 + self.size.height as i64
    }

    /// Half-open containment test: the right and bottom edges are outside.
    pub fn contains(&self, point: Position) -> bool {
        if self.size.width == 0 || self.size.height == 0 {
            return false;
        }
        let (x, y) = (point.x as i64, point.y as i64);
        x >= self.position.x as i64
            && x < self.right()
            && y >= self.position.y as i64
            && y < self.bottom()
    }

    /// Clip these bounds to a terminal-sized area, returning `None` when no
    /// part of the window is visible.
    pub fn visible_rect(&self, area: Rect) -> Option<Rect> {
        let left = (self.position.x as i64).max(area.x as i64);
        let top = (self.position.y as i64).max(area.y as i64);
        let right = self.right().min(area.x as i64 + area.width as i64);
        let bottom = self.bottom().min(area.y as i64 + area.height as i64);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }
}

/// The host surface the desktop lives on.
///
/// `shell_height` is the strip reserved at the bottom for the taskbar; it is
/// part of `height` but never available to windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub shell_height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32, shell_height: u32) -> Self {
        Self {
            width,
            height,
            shell_height,
        }
    }

    /// Height left for windows once the shell strip is reserved.
    pub fn usable_height(&self) -> u32 {
        self.height.saturating_sub(self.shell_height)
    }

    /// The full window area: what maximize and a top snap occupy.
    pub fn work_area(&self) -> Bounds {
        Bounds::new(
            Position::ORIGIN,
            Size::new(self.width, self.usable_height()),
        )
    }

    /// Clamp a raw pointer to `[0, width] x [0, height - shell_height]`.
    pub fn clamp_pointer(&self, pointer: Position) -> Position {
        Position {
            x: pointer.x.clamp(0, saturating_i32(self.width)),
            y: pointer.y.clamp(0, saturating_i32(self.usable_height())),
        }
    }

    /// The geometry a window takes when snapped to `zone`.
    pub fn snap_bounds(&self, zone: SnapZone) -> Bounds {
        let height = self.usable_height();
        let half = self.width / 2;
        match zone {
            SnapZone::Left => Bounds::new(Position::ORIGIN, Size::new(half, height)),
            SnapZone::Right => Bounds::new(
                Position::new(saturating_i32(half), 0),
                Size::new(self.width - half, height),
            ),
            SnapZone::Top => self.work_area(),
        }
    }

    /// Which snap zone, if any, a (clamped) pointer is in. The top edge wins
    /// over the side edges in the corners.
    pub fn snap_zone_at(&self, pointer: Position, threshold: u32) -> Option<SnapZone> {
        let threshold = saturating_i32(threshold);
        if pointer.y < threshold {
            Some(SnapZone::Top)
        } else if pointer.x < threshold {
            Some(SnapZone::Left)
        } else if pointer.x > saturating_i32(self.width).saturating_sub(threshold) {
            Some(SnapZone::Right)
        } else {
            None
        }
    }

    /// Terminal rectangle of the area windows may occupy.
    pub fn work_rect(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width.min(u16::MAX as u32) as u16,
            height: self.usable_height().min(u16::MAX as u32) as u16,
        }
    }

    /// Terminal rectangle of the reserved shell strip.
    pub fn shell_rect(&self) -> Rect {
        let work = self.work_rect();
        Rect {
            x: 0,
            y: work.height,
            width: work.width,
            height: self.shell_height.min(u16::MAX as u32) as u16,
        }
    }
}

impl From<Rect> for Viewport {
    /// A viewport covering a terminal area with a one-row shell strip.
    fn from(area: Rect) -> Self {
        Viewport::new(area.width as u32, area.height as u32, 1)
    }
}

/// A screen-edge region that a dropped window snaps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapZone {
    Left,
    Right,
    Top,
}

pub(crate) fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1280, 800, 48)
    }

    #[test]
    fn clamp_pointer_respects_shell_strip() {
        let vp = viewport();
        assert_eq!(vp.clamp_pointer(Position::new(-5, -5)), Position::new(0, 0));
        assert_eq!(
            vp.clamp_pointer(Position::new(5000, 5000)),
            Position::new(1280, 752)
        );
        assert_eq!(
            vp.clamp_pointer(Position::new(640, 400)),
            Position::new(640, 400)
        );
    }

    #[test]
    fn snap_bounds_halves_and_full() {
        let vp = viewport();
        assert_eq!(
            vp.snap_bounds(SnapZone::Left),
            Bounds::new(Position::new(0, 0), Size::new(640, 752))
        );
        assert_eq!(
            vp.snap_bounds(SnapZone::Right),
            Bounds::new(Position::new(640, 0), Size::new(640, 752))
        );
        assert_eq!(vp.snap_bounds(SnapZone::Top), vp.work_area());
    }

    #[test]
    fn right_snap_covers_odd_widths() {
        let vp = Viewport::new(81, 24, 1);
        let left = vp.snap_bounds(SnapZone::Left);
        let right = vp.snap_bounds(SnapZone::Right);
        assert_eq!(left.size.width, 40);
        assert_eq!(right.position.x, 40);
        assert_eq!(right.size.width, 41);
    }

    #[test]
    fn snap_zone_predicate_prefers_top() {
        let vp = viewport();
        assert_eq!(vp.snap_zone_at(Position::new(5, 5), 20), Some(SnapZone::Top));
        assert_eq!(
            vp.snap_zone_at(Position::new(5, 300), 20),
            Some(SnapZone::Left)
        );
        assert_eq!(
            vp.snap_zone_at(Position::new(1275, 300), 20),
            Some(SnapZone::Right)
        );
        assert_eq!(vp.snap_zone_at(Position::new(640, 300), 20), None);
        // exactly on the threshold is outside the zone
        assert_eq!(vp.snap_zone_at(Position::new(20, 300), 20), None);
    }

    #[test]
    fn bounds_contains_is_half_open() {
        let b = Bounds::new(Position::new(-4, 2), Size::new(10, 5));
        assert!(b.contains(Position::new(-4, 2)));
        assert!(b.contains(Position::new(5, 6)));
        assert!(!b.contains(Position::new(6, 2)));
        assert!(!b.contains(Position::new(0, 7)));
        let empty = Bounds::new(Position::ORIGIN, Size::new(0, 3));
        assert!(!empty.contains(Position::ORIGIN));
    }

    #[test]
    fn visible_rect_clips_negative_origin() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 20,
        };
        let b = Bounds::new(Position::new(-8, 3), Size::new(20, 5));
        assert_eq!(
            b.visible_rect(area),
            Some(Rect {
                x: 0,
                y: 3,
                width: 12,
                height: 5
            })
        );
        let off = Bounds::new(Position::new(-30, 3), Size::new(20, 5));
        assert_eq!(off.visible_rect(area), None);
    }

    #[test]
    fn shell_rect_sits_below_work_area() {
        let vp = Viewport::new(80, 24, 1);
        assert_eq!(vp.work_rect().height, 23);
        assert_eq!(vp.shell_rect().y, 23);
        assert_eq!(vp.shell_rect().height, 1);
    }
}
