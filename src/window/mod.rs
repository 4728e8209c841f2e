pub mod decorator;

mod registry;
pub mod z_order;

use std::fmt::Debug;

use serde::Serialize;

use crate::geometry::{Bounds, Position, Size, SnapZone};

pub use registry::{DesktopSnapshot, WindowRegistry};
pub use z_order::{ZOrderPolicy, next_z_index};

/// Creation-time geometry of an application's window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub position: Position,
    pub size: Size,
    pub min_size: Size,
}

/// Anything that can be opened as a window: a stable id that knows its own
/// default geometry.
pub trait AppDescriptor: Copy + Eq + Ord + Debug {
    fn window_spec(&self) -> WindowSpec;
}

/// How a window is laid out.
///
/// `restore` is the free-floating geometry saved when the window left
/// `Floating`; it is dropped when the window returns there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LayoutMode {
    Floating,
    Maximized { restore: Bounds },
    Snapped { zone: SnapZone, restore: Bounds },
}

impl LayoutMode {
    pub fn restore_bounds(&self) -> Option<Bounds> {
        match *self {
            LayoutMode::Floating => None,
            LayoutMode::Maximized { restore } | LayoutMode::Snapped { restore, .. } => {
                Some(restore)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowState {
    title: String,
    position: Position,
    size: Size,
    min_size: Size,
    minimized: bool,
    layout: LayoutMode,
    z_index: u32,
}

impl WindowState {
    fn new(spec: WindowSpec, z_index: u32) -> Self {
        Self {
            title: spec.title,
            position: spec.position,
            size: spec.size,
            min_size: spec.min_size,
            minimized: false,
            layout: LayoutMode::Floating,
            z_index,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.size)
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn is_floating(&self) -> bool {
        matches!(self.layout, LayoutMode::Floating)
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    /// True when the window fills the work area, whether through the
    /// maximize toggle or a top snap.
    pub fn is_maximized(&self) -> bool {
        matches!(
            self.layout,
            LayoutMode::Maximized { .. }
                | LayoutMode::Snapped {
                    zone: SnapZone::Top,
                    ..
                }
        )
    }

    pub fn is_snapped(&self) -> bool {
        matches!(self.layout, LayoutMode::Snapped { .. })
    }

    pub fn snap_zone(&self) -> Option<SnapZone> {
        match self.layout {
            LayoutMode::Snapped { zone, .. } => Some(zone),
            _ => None,
        }
    }

    pub fn previous_position(&self) -> Option<Position> {
        self.layout.restore_bounds().map(|b| b.position)
    }

    pub fn previous_size(&self) -> Option<Size> {
        self.layout.restore_bounds().map(|b| b.size)
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.position = bounds.position;
        self.size = bounds.size;
    }
}
