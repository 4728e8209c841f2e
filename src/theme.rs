use ratatui::style::{Color, Modifier, Style};

// Centralized desktop colors.

pub fn desktop_bg() -> Color {
    Color::Rgb(0, 90, 130)
}
pub fn desktop_fg() -> Color {
    Color::White
}

// Window chrome
pub fn border() -> Style {
    Style::default().fg(Color::Gray).bg(Color::Black)
}
pub fn border_focused() -> Style {
    Style::default().fg(Color::LightCyan).bg(Color::Black)
}
pub fn header(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
pub fn close_button(focused: bool) -> Style {
    header(focused).bg(Color::Red)
}
pub fn body() -> Style {
    Style::default().bg(Color::Black).fg(Color::Gray)
}

// Taskbar
pub fn panel_bg() -> Color {
    Color::DarkGray
}
pub fn panel_fg() -> Color {
    Color::White
}
pub fn panel_active() -> Style {
    Style::default()
        .bg(Color::Gray)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}
pub fn panel_minimized() -> Style {
    Style::default()
        .bg(panel_bg())
        .fg(Color::Gray)
        .add_modifier(Modifier::DIM)
}

// Overlays
pub fn menu() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}
pub fn menu_selected() -> Style {
    Style::default().bg(Color::Gray).fg(Color::Black)
}

pub fn snap_ghost() -> Style {
    Style::default().fg(Color::LightBlue).bg(Color::Rgb(30, 60, 110))
}
