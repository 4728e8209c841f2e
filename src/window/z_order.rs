use serde::Serialize;

use crate::constants::{BASE_Z_INDEX, MAX_Z_INDEX};

/// Bounds for z-index allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZOrderPolicy {
    pub base: u32,
    pub max: u32,
}

impl Default for ZOrderPolicy {
    fn default() -> Self {
        Self {
            base: BASE_Z_INDEX,
            max: MAX_Z_INDEX,
        }
    }
}

impl ZOrderPolicy {
    /// Next stacking key after `current`.
    ///
    /// Resets to `base` once `current` reaches `max`. Existing windows are not
    /// renumbered, so a window that was raised before the reset keeps its
    /// larger key and stays above freshly raised ones until it is raised again.
    pub fn next_z_index(&self, current: u32) -> u32 {
        if current >= self.max {
            tracing::debug!(current, base = self.base, "z-index overflow, resetting");
            self.base
        } else {
            current + 1
        }
    }
}

/// [`ZOrderPolicy::next_z_index`] with the default policy.
pub fn next_z_index(current: u32) -> u32 {
    ZOrderPolicy::default().next_z_index(current)
}
