//! The catalog of hosted applications and their desktop icons.
//!
//! Sizes are in terminal cells so the bundled host can show several windows
//! at once on an 80x24 screen.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DeskError;
use crate::geometry::{Position, Size};
use crate::window::{AppDescriptor, WindowSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppId {
    Notepad,
    FileExplorer,
    Terminal,
    Snake,
    Settings,
}

impl AppId {
    /// Catalog order: start menu, desktop icons and number-key shortcuts.
    pub const ALL: [AppId; 5] = [
        AppId::Notepad,
        AppId::FileExplorer,
        AppId::Terminal,
        AppId::Snake,
        AppId::Settings,
    ];

    /// Short name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            AppId::Notepad => "notepad",
            AppId::FileExplorer => "explorer",
            AppId::Terminal => "terminal",
            AppId::Snake => "snake",
            AppId::Settings => "settings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AppId::Notepad => "Notepad",
            AppId::FileExplorer => "File Explorer",
            AppId::Terminal => "Terminal",
            AppId::Snake => "Snake",
            AppId::Settings => "Settings",
        }
    }

    pub fn icon(self) -> IconId {
        match self {
            AppId::Notepad => IconId::Document,
            AppId::FileExplorer => IconId::Folder,
            AppId::Terminal => IconId::Prompt,
            AppId::Snake => IconId::Gamepad,
            AppId::Settings => IconId::Gear,
        }
    }

    /// One-line description shown in the placeholder body of the window.
    pub fn blurb(self) -> &'static str {
        match self {
            AppId::Notepad => "Plain text editing.",
            AppId::FileExplorer => "Browse the simulated file system.",
            AppId::Terminal => "A toy command prompt.",
            AppId::Snake => "Eat, grow, avoid your tail.",
            AppId::Settings => "Theme, wallpaper and display options.",
        }
    }
}

impl AppDescriptor for AppId {
    fn window_spec(&self) -> WindowSpec {
        let (position, size, min_size) = match self {
            AppId::Notepad => (Position::new(4, 2), Size::new(44, 14), Size::new(20, 6)),
            AppId::FileExplorer => (Position::new(10, 4), Size::new(52, 15), Size::new(30, 8)),
            AppId::Terminal => (Position::new(16, 6), Size::new(48, 13), Size::new(24, 6)),
            AppId::Snake => (Position::new(22, 3), Size::new(34, 16), Size::new(34, 16)),
            AppId::Settings => (Position::new(28, 5), Size::new(40, 14), Size::new(28, 8)),
        };
        WindowSpec {
            title: self.title().to_string(),
            position,
            size,
            min_size,
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AppId {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AppId::ALL
            .into_iter()
            .find(|app| app.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = AppId::ALL.iter().map(|app| app.name()).collect();
                DeskError::UnknownApp(s.to_string(), known.join(", "))
            })
    }
}

/// Every icon the shell can draw. Resolved by an exhaustive match, so there
/// is no "unknown icon" case to fall back from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    Document,
    Folder,
    Prompt,
    Gamepad,
    Gear,
    Start,
    Bell,
    Sliders,
    Widgets,
    Calendar,
}

impl IconId {
    pub fn glyph(self) -> &'static str {
        match self {
            IconId::Document => "≡",
            IconId::Folder => "▤",
            IconId::Prompt => "›",
            IconId::Gamepad => "◆",
            IconId::Gear => "☼",
            IconId::Start => "◧",
            IconId::Bell => "♪",
            IconId::Sliders => "≣",
            IconId::Widgets => "▦",
            IconId::Calendar => "▣",
        }
    }
}
