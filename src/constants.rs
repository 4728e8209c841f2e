//! Shared crate-wide constants.

/// Distance from a viewport edge, in viewport units, within which a dragged
/// pointer arms a snap zone.
pub const SNAP_THRESHOLD: u32 = 20;

/// Value the z-index allocator resets to once it reaches [`MAX_Z_INDEX`].
pub const BASE_Z_INDEX: u32 = 100;

/// Ceiling of the z-index allocator.
///
/// Reaching it resets allocation to [`BASE_Z_INDEX`] without renumbering
/// windows that still hold larger values.
pub const MAX_Z_INDEX: u32 = 9_999;

/// Height of the reserved taskbar strip for browser-sized viewports.
pub const DEFAULT_SHELL_HEIGHT: u32 = 48;

/// Default viewport used when the host has not reported one yet.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 800;

/// Terminal host: one cell is one viewport unit and the taskbar is one row.
pub const TERMINAL_SHELL_HEIGHT: u32 = 1;
pub const TERMINAL_SNAP_THRESHOLD: u32 = 2;

/// How long the event loop waits for input before redrawing the clock.
pub const POLL_INTERVAL_MS: u64 = 250;
