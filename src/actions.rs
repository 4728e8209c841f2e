use std::fmt;

use crate::apps::AppId;
use crate::geometry::SnapZone;
use crate::shell::Overlay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ToggleHelp,
    // Esc: closes help or the open overlay
    Dismiss,
    ToggleOverlay(Overlay),
    Launch(AppId),
    // Focus/tab navigation
    FocusNext,
    FocusPrev,
    // Operations on the focused window
    Minimize,
    ToggleMaximize,
    Snap(SnapZone),
    Unsnap,
    Close,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => write!(f, "Quit"),
            Action::ToggleHelp => write!(f, "Toggle help"),
            Action::Dismiss => write!(f, "Close help / panel"),
            Action::ToggleOverlay(overlay) => write!(f, "Toggle {}", overlay.title()),
            Action::Launch(app) => write!(f, "Open {}", app.title()),
            Action::FocusNext => write!(f, "Focus next window"),
            Action::FocusPrev => write!(f, "Focus previous window"),
            Action::Minimize => write!(f, "Minimize"),
            Action::ToggleMaximize => write!(f, "Maximize / restore"),
            Action::Snap(SnapZone::Left) => write!(f, "Snap left"),
            Action::Snap(SnapZone::Right) => write!(f, "Snap right"),
            Action::Snap(SnapZone::Top) => write!(f, "Snap to top"),
            Action::Unsnap => write!(f, "Unsnap"),
            Action::Close => write!(f, "Close window"),
        }
    }
}
