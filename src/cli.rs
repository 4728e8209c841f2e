use std::path::PathBuf;

use clap::Parser;

use crate::apps::AppId;
use crate::config::ShellConfig;
use crate::constants::{TERMINAL_SHELL_HEIGHT, TERMINAL_SNAP_THRESHOLD};
use crate::error::Result;
use crate::geometry::Viewport;

#[derive(Parser, Debug)]
#[command(
    name = "deskshell",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small desktop shell with floating windows, drawn in the terminal"
)]
pub struct Cli {
    /// Cells from a screen edge at which a dragged window arms a snap zone.
    #[arg(long, value_name = "CELLS", default_value_t = TERMINAL_SNAP_THRESHOLD)]
    pub snap_threshold: u32,

    /// Rows reserved for the taskbar.
    #[arg(long, value_name = "ROWS", default_value_t = TERMINAL_SHELL_HEIGHT)]
    pub shell_height: u32,

    /// Append logs to this file. Without it logs are discarded.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Keep per-gesture trace events in the log.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the final desktop state as JSON on exit.
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Open an application at startup. Repeatable.
    #[arg(long = "open", value_name = "APP")]
    pub open: Vec<AppId>,
}

impl Cli {
    /// Shell configuration for a terminal of `width` x `height` cells.
    pub fn shell_config(&self, width: u16, height: u16) -> Result<ShellConfig> {
        ShellConfig::default()
            .with_viewport(Viewport::new(
                width as u32,
                height as u32,
                self.shell_height,
            ))
            .with_snap_threshold(self.snap_threshold)
            .validate()
    }
}
