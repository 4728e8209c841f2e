use std::io;

use thiserror::Error;

/// Errors surfaced by the host-facing parts of the crate.
///
/// The window-management core itself never fails; these cover configuration,
/// name lookups and the terminal/file I/O around it.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("unknown application `{0}` (expected one of: {1})")]
    UnknownApp(String, String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("terminal or file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not serialize desktop snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T, E = DeskError> = std::result::Result<T, E>;
