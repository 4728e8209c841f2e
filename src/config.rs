use crate::constants::{
    DEFAULT_SHELL_HEIGHT, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, SNAP_THRESHOLD,
};
use crate::error::{DeskError, Result};
use crate::geometry::Viewport;
use crate::window::ZOrderPolicy;

/// Tunables of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellConfig {
    pub viewport: Viewport,
    pub snap_threshold: u32,
    pub z_order: ZOrderPolicy,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(
                DEFAULT_VIEWPORT_WIDTH,
                DEFAULT_VIEWPORT_HEIGHT,
                DEFAULT_SHELL_HEIGHT,
            ),
            snap_threshold: SNAP_THRESHOLD,
            z_order: ZOrderPolicy::default(),
        }
    }
}

impl ShellConfig {
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_snap_threshold(mut self, snap_threshold: u32) -> Self {
        self.snap_threshold = snap_threshold;
        self
    }

    pub fn validate(self) -> Result<Self> {
        let Viewport {
            width,
            height,
            shell_height,
        } = self.viewport;
        if width == 0 || height == 0 {
            return Err(DeskError::InvalidConfig(format!(
                "viewport must not be empty (got {width}x{height})"
            )));
        }
        if shell_height >= height {
            return Err(DeskError::InvalidConfig(format!(
                "shell height {shell_height} leaves no room in a viewport {height} tall"
            )));
        }
        if self.snap_threshold == 0 {
            return Err(DeskError::InvalidConfig(
                "snap threshold must be at least 1".to_string(),
            ));
        }
        if self.z_order.base >= self.z_order.max {
            return Err(DeskError::InvalidConfig(format!(
                "z-index base {} must be below the ceiling {}",
                self.z_order.base, self.z_order.max
            )));
        }
        Ok(self)
    }
}
