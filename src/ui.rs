//! Desktop composition: wallpaper, icons, windows in stacking order, the snap
//! ghost, the taskbar and whichever panel is open.
//!
//! Drawing goes through [`UiFrame`], a thin wrapper around a ratatui buffer
//! that clips every widget to the visible area, so windows hanging off an
//! edge never write out of bounds.

use chrono::{DateTime, Datelike, Local, Months, NaiveDate};
use indoc::formatdoc;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::apps::AppId;
use crate::geometry::Bounds;
use crate::gesture::GestureKind;
use crate::keybindings::KeyBindings;
use crate::panel::{Panel, TaskEntry};
use crate::shell::{Overlay, ShellController};
use crate::theme;
use crate::window::decorator::{ChromeView, WindowDecorator, body_bounds, put_str};
use crate::window::{LayoutMode, WindowState};

/// Wrapper around a ratatui buffer that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Draw into a detached buffer, as the tests do.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

const ICON_WIDTH: u16 = 17;

/// Where the desktop launchers sit: a column along the right edge of the
/// work area, one every other row.
pub fn desktop_icon_rects(work: Rect, count: usize) -> Vec<Rect> {
    let x = work.right().saturating_sub(ICON_WIDTH + 1).max(work.x);
    (0..count)
        .map(|idx| Rect::new(x, work.y + 1 + 2 * idx as u16, ICON_WIDTH, 1))
        .filter(|rect| rect.bottom() <= work.bottom())
        .collect()
}

/// Placeholder content of a window body.
pub fn body_text(app: AppId, window: &WindowState) -> String {
    let mode = match window.layout() {
        LayoutMode::Floating => "floating".to_string(),
        LayoutMode::Maximized { .. } => "maximized".to_string(),
        LayoutMode::Snapped { zone, .. } => format!("snapped {zone:?}").to_lowercase(),
    };
    let size = window.size();
    formatdoc! {"
        {icon} {title}
        {blurb}

        {width}x{height} · {mode}
        ",
        icon = app.icon().glyph(),
        title = window.title(),
        blurb = app.blurb(),
        width = size.width,
        height = size.height,
    }
}

/// Month grid with today's date starred.
pub fn calendar_lines(date: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        date.format("%B %Y").to_string(),
        "Mo Tu We Th Fr Sa Su".to_string(),
    ];
    let Some(first) = date.with_day(1) else {
        return lines;
    };
    let days = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(28, |last| last.day());
    let offset = first.weekday().num_days_from_monday() as usize;
    let mut row = "   ".repeat(offset);
    for day in 1..=days {
        if day == date.day() {
            row.push_str(&format!("{day:>2}*"));
        } else {
            row.push_str(&format!("{day:>2} "));
        }
        if (offset + day as usize) % 7 == 0 {
            lines.push(row.trim_end().to_string());
            row.clear();
        }
    }
    if !row.trim().is_empty() {
        lines.push(row.trim_end().to_string());
    }
    lines
}

/// Body text of the informational panels.
pub fn overlay_lines(
    overlay: Overlay,
    shell: &ShellController<AppId>,
    now: DateTime<Local>,
) -> Vec<String> {
    let registry = shell.registry();
    match overlay {
        Overlay::StartMenu => AppId::ALL
            .iter()
            .map(|app| format!("{} {}", app.icon().glyph(), app.title()))
            .collect(),
        Overlay::NotificationCenter => {
            if registry.is_empty() {
                return vec!["No new notifications".to_string()];
            }
            registry
                .order()
                .iter()
                .filter_map(|id| {
                    let window = registry.get(*id)?;
                    let state = if window.is_minimized() {
                        "minimized"
                    } else {
                        "open"
                    };
                    Some(format!("{} {} is {state}", id.icon().glyph(), window.title()))
                })
                .collect()
        }
        Overlay::QuickSettings => {
            let vp = shell.viewport();
            vec![
                format!("Screen      {}x{}", vp.width, vp.height),
                format!("Snap edge   {} cells", shell.snap_threshold()),
                format!("Top z-index {}", registry.highest_z_index()),
            ]
        }
        Overlay::Widgets => {
            let focused = shell
                .focused()
                .and_then(|id| registry.get(id))
                .map_or("nothing", |w| w.title());
            let gesture = match shell.active_gesture() {
                Some(GestureKind::Drag) => "dragging",
                Some(GestureKind::Resize) => "resizing",
                None => "idle",
            };
            vec![
                format!("Windows  {}", registry.len()),
                format!("Focused  {focused}"),
                format!("Pointer  {gesture}"),
            ]
        }
        Overlay::Calendar => {
            let mut lines = vec![
                now.format("%A, %-d %B %Y").to_string(),
                now.format("%H:%M").to_string(),
                String::new(),
            ];
            lines.extend(calendar_lines(now.date_naive()));
            lines
        }
    }
}

fn fill(buffer: &mut Buffer, area: Rect, symbol: &str, style: Style) {
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        }
    }
}

fn render_snap_ghost(frame: &mut UiFrame<'_>, work: Rect, ghost: Bounds) {
    if let Some(rect) = ghost.visible_rect(work) {
        fill(frame.buffer_mut(), rect, "░", theme::snap_ghost());
    }
}

fn render_window(
    frame: &mut UiFrame<'_>,
    work: Rect,
    decorator: &dyn WindowDecorator,
    app: AppId,
    window: &WindowState,
    focused: bool,
) {
    let view = ChromeView {
        bounds: window.bounds(),
        title: window.title(),
        icon: app.icon().glyph(),
        focused,
        maximized: window.is_maximized(),
    };
    let buffer = frame.buffer_mut();
    decorator.render_window(buffer, work, &view);
    let body = body_bounds(window.bounds());
    let Some(clip) = body.visible_rect(work) else {
        return;
    };
    let text = body_text(app, window);
    for (idx, line) in text.lines().enumerate() {
        if idx as u32 >= body.size.height {
            break;
        }
        let line = truncate_to_width(line, body.size.width.saturating_sub(2) as usize);
        put_str(
            buffer,
            clip,
            body.position.x + 1,
            body.position.y + idx as i32,
            &line,
            theme::body(),
        );
    }
}

/// Paint one frame of the desktop and refresh the panel's hit regions.
pub fn render_desktop(
    frame: &mut UiFrame<'_>,
    shell: &ShellController<AppId>,
    panel: &mut Panel<AppId>,
    decorator: &dyn WindowDecorator,
    now: DateTime<Local>,
) {
    let viewport = shell.viewport();
    let work = viewport.work_rect().intersection(frame.area());
    let registry = shell.registry();
    panel.begin_frame();

    let wallpaper = Style::default()
        .bg(theme::desktop_bg())
        .fg(theme::desktop_fg());
    fill(frame.buffer_mut(), work, " ", wallpaper);
    let icons = shell.desktop_icons();
    for (icon, rect) in icons.iter().zip(desktop_icon_rects(work, icons.len())) {
        let label = format!(" {} {}", icon.icon.glyph(), icon.label);
        safe_set_string(frame.buffer_mut(), work, rect.x, rect.y, &label, wallpaper);
    }

    let stacking = registry.stacking_order();
    let focused = stacking.last().copied();
    let ghost = shell.snap_preview_bounds();
    for id in &stacking {
        if Some(*id) == focused
            && let Some(ghost) = ghost
        {
            render_snap_ghost(frame, work, ghost);
        }
        if let Some(window) = registry.get(*id) {
            render_window(frame, work, decorator, *id, window, Some(*id) == focused);
        }
    }

    let entries: Vec<TaskEntry<'_, AppId>> = registry
        .order()
        .iter()
        .filter_map(|id| {
            let window = registry.get(*id)?;
            Some(TaskEntry {
                id: *id,
                icon: id.icon().glyph(),
                label: window.title(),
                focused: focused == Some(*id),
                minimized: window.is_minimized(),
            })
        })
        .collect();
    let strip = viewport.shell_rect().intersection(frame.area());
    panel.render_taskbar(frame, strip, &entries, shell.active_overlay());

    match shell.active_overlay() {
        Some(Overlay::StartMenu) => {
            let items: Vec<(AppId, &str, &str)> = AppId::ALL
                .iter()
                .map(|app| (*app, app.icon().glyph(), app.title()))
                .collect();
            panel.render_menu(frame, work, &items, None);
        }
        Some(overlay) => {
            let lines = overlay_lines(overlay, shell, now);
            panel.render_popup(frame, work, overlay, &lines);
        }
        None => {}
    }
}

/// Centered help box: the embedded help text followed by the key table.
pub fn render_help(frame: &mut UiFrame<'_>, help: &str, bindings: &KeyBindings) {
    let mut text: Vec<String> = help.lines().map(str::to_string).collect();
    text.push(String::new());
    for (keys, action) in bindings.help_entries() {
        text.push(format!("{keys:<12} {action}"));
    }
    let area = frame.area();
    let width = 64.min(area.width);
    let height = (text.len() as u16 + 2).min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(text.join("\n"))
            .wrap(Wrap { trim: false })
            .style(theme::menu())
            .block(Block::default().borders(Borders::ALL).title("Help (F1)")),
        rect,
    );
}
