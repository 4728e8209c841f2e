//! The taskbar strip and the panels that pop up from it.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear},
};

use crate::shell::Overlay;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

const START_LABEL: &str = " ◧ Start ";
const MAX_TASK_LABEL: usize = 14;
/// Tray buttons, left to right.
const TRAY: [Overlay; 4] = [
    Overlay::Widgets,
    Overlay::NotificationCenter,
    Overlay::QuickSettings,
    Overlay::Calendar,
];

/// What a click on the shell chrome landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit<R> {
    StartButton,
    Tray(Overlay),
    Window(R),
    MenuItem(R),
    /// Inside an open popup, on nothing in particular.
    Popup,
}

/// One taskbar button.
#[derive(Debug, Clone, Copy)]
pub struct TaskEntry<'a, R> {
    pub id: R,
    pub icon: &'a str,
    pub label: &'a str,
    pub focused: bool,
    pub minimized: bool,
}

pub(crate) fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Draws the taskbar and remembers where everything landed so clicks can be
/// mapped back. Hit regions are rebuilt every frame.
#[derive(Debug)]
pub struct Panel<R: Copy + Eq> {
    area: Rect,
    start_rect: Option<Rect>,
    tray_hits: Vec<(Rect, Overlay)>,
    window_hits: Vec<(Rect, R)>,
    menu_hits: Vec<(Rect, R)>,
    popup_rect: Option<Rect>,
}

impl<R: Copy + Eq> Default for Panel<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Eq> Panel<R> {
    pub fn new() -> Self {
        Self {
            area: Rect::default(),
            start_rect: None,
            tray_hits: Vec::new(),
            window_hits: Vec::new(),
            menu_hits: Vec::new(),
            popup_rect: None,
        }
    }

    pub fn begin_frame(&mut self) {
        self.start_rect = None;
        self.tray_hits.clear();
        self.window_hits.clear();
        self.menu_hits.clear();
        self.popup_rect = None;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn render_taskbar(
        &mut self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        entries: &[TaskEntry<'_, R>],
        active_overlay: Option<Overlay>,
    ) {
        self.area = area;
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let base = Style::default().bg(theme::panel_bg()).fg(theme::panel_fg());
        for yy in bounds.y..bounds.bottom() {
            for xx in bounds.x..bounds.right() {
                if let Some(cell) = buffer.cell_mut((xx, yy)) {
                    cell.set_symbol(" ");
                    cell.set_style(base);
                }
            }
        }
        let y = bounds.y;
        let max_x = bounds.right();

        // Tray first so the window list knows where to stop.
        let tray_width = (TRAY.len() * 3) as u16;
        let mut tray_x = max_x.saturating_sub(tray_width).max(bounds.x);
        let window_limit = tray_x;
        for overlay in TRAY {
            if tray_x.saturating_add(3) > max_x {
                break;
            }
            let style = if active_overlay == Some(overlay) {
                theme::panel_active()
            } else {
                base
            };
            let chunk = format!(" {} ", overlay.icon().glyph());
            safe_set_string(buffer, bounds, tray_x, y, &chunk, style);
            self.tray_hits.push((Rect::new(tray_x, y, 3, 1), overlay));
            tray_x = tray_x.saturating_add(3);
        }

        let mut x = bounds.x;
        let start_width = START_LABEL.chars().count() as u16;
        if x.saturating_add(start_width) <= window_limit {
            let style = if active_overlay == Some(Overlay::StartMenu) {
                theme::panel_active()
            } else {
                base
            };
            safe_set_string(buffer, bounds, x, y, START_LABEL, style);
            self.start_rect = Some(Rect::new(x, y, start_width, 1));
            x = x.saturating_add(start_width + 1);
        }

        for entry in entries {
            let label = truncate_to_width(entry.label, MAX_TASK_LABEL);
            let chunk = format!(" {} {label} ", entry.icon);
            let chunk_width = chunk.chars().count() as u16;
            if x.saturating_add(chunk_width) > window_limit {
                break;
            }
            let style = if entry.focused {
                theme::panel_active()
            } else if entry.minimized {
                theme::panel_minimized()
            } else {
                base
            };
            safe_set_string(buffer, bounds, x, y, &chunk, style);
            self.window_hits.push((Rect::new(x, y, chunk_width, 1), entry.id));
            x = x.saturating_add(chunk_width);
        }
    }

    /// Launcher list opening upwards from the start button.
    pub fn render_menu(
        &mut self,
        frame: &mut UiFrame<'_>,
        bounds: Rect,
        items: &[(R, &str, &str)],
        selected: Option<usize>,
    ) {
        let Some(anchor) = self.start_rect else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let label_width = items
            .iter()
            .map(|(_, icon, label)| (icon.chars().count() + label.chars().count()) as u16)
            .max()
            .unwrap_or(1);
        let width = (label_width + 5).max(16).min(bounds.width);
        let height = (items.len() as u16 + 2).min(bounds.height);
        let rect = Rect::new(
            anchor.x,
            self.area.y.saturating_sub(height).max(bounds.y),
            width,
            height,
        );
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(Overlay::StartMenu.title())
                .style(theme::menu()),
            rect,
        );
        self.popup_rect = Some(rect);
        let buffer = frame.buffer_mut();
        for (idx, (id, icon, label)) in items.iter().enumerate() {
            let row = rect.y + 1 + idx as u16;
            if row >= rect.bottom().saturating_sub(1) {
                break;
            }
            let style = if selected == Some(idx) {
                theme::menu_selected()
            } else {
                theme::menu()
            };
            let inner = Rect::new(rect.x + 1, row, rect.width.saturating_sub(2), 1);
            let text = format!(" {icon} {label}");
            let padded = format!("{text:<width$}", width = inner.width as usize);
            safe_set_string(buffer, inner, inner.x, row, &padded, style);
            self.menu_hits.push((inner, *id));
        }
    }

    /// Informational panel opening upwards from its tray button.
    pub fn render_popup(
        &mut self,
        frame: &mut UiFrame<'_>,
        bounds: Rect,
        overlay: Overlay,
        lines: &[String],
    ) {
        let anchor = self
            .tray_hits
            .iter()
            .find(|(_, o)| *o == overlay)
            .map(|(rect, _)| *rect)
            .or(self.start_rect);
        let Some(anchor) = anchor else {
            return;
        };
        let content_width = lines
            .iter()
            .map(|line| line.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let width = (content_width + 4).max(24).min(bounds.width);
        let height = (lines.len() as u16 + 2).min(bounds.height);
        let x = anchor.right().saturating_sub(width).max(bounds.x);
        let rect = Rect::new(
            x,
            self.area.y.saturating_sub(height).max(bounds.y),
            width,
            height,
        );
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(overlay.title())
                .style(theme::menu()),
            rect,
        );
        self.popup_rect = Some(rect);
        let buffer = frame.buffer_mut();
        let inner = Rect::new(
            rect.x + 2,
            rect.y + 1,
            rect.width.saturating_sub(4),
            rect.height.saturating_sub(2),
        );
        for (idx, line) in lines.iter().enumerate() {
            let row = inner.y + idx as u16;
            if row >= inner.bottom() {
                break;
            }
            safe_set_string(buffer, inner, inner.x, row, line, theme::menu());
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<PanelHit<R>> {
        if let Some((_, id)) = self
            .menu_hits
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
        {
            return Some(PanelHit::MenuItem(*id));
        }
        if self
            .popup_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            return Some(PanelHit::Popup);
        }
        if self
            .start_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            return Some(PanelHit::StartButton);
        }
        if let Some((_, overlay)) = self
            .tray_hits
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
        {
            return Some(PanelHit::Tray(*overlay));
        }
        self.window_hits
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, id)| PanelHit::Window(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn screen() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn taskbar_area() -> Rect {
        Rect::new(0, 23, 80, 1)
    }

    fn entries() -> Vec<TaskEntry<'static, u8>> {
        vec![
            TaskEntry {
                id: 1,
                icon: "≡",
                label: "Notepad",
                focused: true,
                minimized: false,
            },
            TaskEntry {
                id: 2,
                icon: "›",
                label: "A very long terminal title",
                focused: false,
                minimized: true,
            },
        ]
    }

    #[test]
    fn taskbar_hits_map_back_to_targets() {
        let mut buf = Buffer::empty(screen());
        let mut frame = UiFrame::from_parts(screen(), &mut buf);
        let mut panel = Panel::new();
        panel.begin_frame();
        panel.render_taskbar(&mut frame, taskbar_area(), &entries(), None);

        assert_eq!(panel.hit_test(1, 23), Some(PanelHit::StartButton));
        // " ◧ Start " is 9 wide, then a gap
        assert_eq!(panel.hit_test(10, 23), Some(PanelHit::Window(1)));
        assert_eq!(panel.hit_test(79, 23), Some(PanelHit::Tray(Overlay::Calendar)));
        assert_eq!(panel.hit_test(68, 23), Some(PanelHit::Tray(Overlay::Widgets)));
        assert_eq!(panel.hit_test(1, 10), None);

        let row: String = (0..80).map(|x| buf[(x, 23)].symbol().to_string()).collect();
        assert!(row.contains("A very long te "));
        assert!(!row.contains("title"));
    }

    #[test]
    fn start_menu_opens_above_button_and_is_clickable() {
        let mut buf = Buffer::empty(screen());
        let mut frame = UiFrame::from_parts(screen(), &mut buf);
        let mut panel = Panel::new();
        panel.begin_frame();
        panel.render_taskbar(&mut frame, taskbar_area(), &[], Some(Overlay::StartMenu));
        let items = [(7u8, "≡", "Notepad"), (8u8, "▤", "File Explorer")];
        panel.render_menu(&mut frame, Rect::new(0, 0, 80, 23), &items, Some(0));

        // two items + border: rows 19..23
        assert_eq!(panel.hit_test(3, 20), Some(PanelHit::MenuItem(7)));
        assert_eq!(panel.hit_test(3, 21), Some(PanelHit::MenuItem(8)));
        assert_eq!(panel.hit_test(0, 19), Some(PanelHit::Popup));
        assert_eq!(panel.hit_test(40, 10), None);
    }

    #[test]
    fn popup_anchors_to_its_tray_button() {
        let mut buf = Buffer::empty(screen());
        let mut frame = UiFrame::from_parts(screen(), &mut buf);
        let mut panel: Panel<u8> = Panel::new();
        panel.begin_frame();
        panel.render_taskbar(&mut frame, taskbar_area(), &[], Some(Overlay::Calendar));
        let lines = vec!["October 2026".to_string()];
        panel.render_popup(&mut frame, Rect::new(0, 0, 80, 23), Overlay::Calendar, &lines);
        // right edge flush with the calendar button, 3 rows tall
        assert_eq!(panel.hit_test(79, 21), Some(PanelHit::Popup));
        assert_eq!(panel.hit_test(56, 21), Some(PanelHit::Popup));
        assert_eq!(panel.hit_test(55, 21), None);
        assert_eq!(panel.hit_test(79, 19), None);
    }
}
