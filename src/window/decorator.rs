use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::Style;

use crate::geometry::{Bounds, Position, Size};
use crate::gesture::{ResizeEdge, resize_handles_for_bounds};
use crate::theme;

/// Controls in a window's title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Minimize,
    Maximize,
    Close,
    /// Anywhere else on the title bar: starts a drag.
    Drag,
}

/// What a pointer-down on a window landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeHit {
    Header(HeaderAction),
    Resize(ResizeEdge),
    Body,
}

/// Everything the decorator needs to draw one window.
#[derive(Debug, Clone, Copy)]
pub struct ChromeView<'a> {
    pub bounds: Bounds,
    pub title: &'a str,
    pub icon: &'a str,
    pub focused: bool,
    pub maximized: bool,
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Draw the window frame and title bar, clipped to `area`. Windows are
    /// drawn bottom to top, so later calls cover earlier ones.
    fn render_window(&self, buffer: &mut Buffer, area: Rect, view: &ChromeView<'_>);
}

const BUTTON_WIDTH: u32 = 3;

/// Title-bar buttons of a window, left to right.
pub fn header_buttons(bounds: Bounds) -> Vec<(HeaderAction, Bounds)> {
    let Bounds { position, size } = bounds;
    if size.height < 3 || size.width < 2 + 3 * BUTTON_WIDTH + 1 {
        return Vec::new();
    }
    let inner_right = position.x + size.width as i32 - 1;
    let y = position.y + 1;
    [
        HeaderAction::Minimize,
        HeaderAction::Maximize,
        HeaderAction::Close,
    ]
    .into_iter()
    .enumerate()
    .map(|(idx, action)| {
        let x = inner_right - (3 - idx as i32) * BUTTON_WIDTH as i32;
        (
            action,
            Bounds::new(Position::new(x, y), Size::new(BUTTON_WIDTH, 1)),
        )
    })
    .collect()
}

/// Area under the title bar, inside the border.
pub fn body_bounds(bounds: Bounds) -> Bounds {
    let Bounds { position, size } = bounds;
    Bounds::new(
        position.offset(1, 2),
        Size::new(size.width.saturating_sub(2), size.height.saturating_sub(3)),
    )
}

/// Classify a pointer-down at `point`. Resize handles are only offered for
/// floating windows.
pub fn hit_test(bounds: Bounds, point: Position, floating: bool) -> Option<ChromeHit> {
    if !bounds.contains(point) {
        return None;
    }
    let header_y = bounds.position.y + 1;
    let inside_x = point.x > bounds.position.x && (point.x as i64) < bounds.right() - 1;
    if point.y == header_y && inside_x && bounds.size.height >= 3 {
        let action = header_buttons(bounds)
            .into_iter()
            .find(|(_, b)| b.contains(point))
            .map_or(HeaderAction::Drag, |(action, _)| action);
        return Some(ChromeHit::Header(action));
    }
    if floating
        && let Some(handle) = resize_handles_for_bounds((), bounds)
            .into_iter()
            .find(|h| h.bounds.contains(point))
    {
        return Some(ChromeHit::Resize(handle.edge));
    }
    Some(ChromeHit::Body)
}

fn put(buffer: &mut Buffer, area: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < area.x as i32 || y < area.y as i32 {
        return;
    }
    if x >= area.right() as i32 || y >= area.bottom() as i32 {
        return;
    }
    if let Some(cell) = buffer.cell_mut((x as u16, y as u16)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

pub(crate) fn put_str(buffer: &mut Buffer, area: Rect, x: i32, y: i32, text: &str, style: Style) {
    let mut tmp = [0u8; 4];
    for (idx, ch) in text.chars().enumerate() {
        put(buffer, area, x + idx as i32, y, ch.encode_utf8(&mut tmp), style);
    }
}

#[derive(Debug, Default)]
pub struct DeskDecorator;

impl WindowDecorator for DeskDecorator {
    fn render_window(&self, buffer: &mut Buffer, area: Rect, view: &ChromeView<'_>) {
        let Bounds { position, size } = view.bounds;
        if size.width < 2 || size.height < 2 {
            return;
        }
        let left = position.x;
        let top = position.y;
        let right = left + size.width as i32 - 1;
        let bottom = top + size.height as i32 - 1;
        let border = if view.focused {
            theme::border_focused()
        } else {
            theme::border()
        };

        for y in top + 1..bottom {
            for x in left + 1..right {
                put(buffer, area, x, y, " ", theme::body());
            }
        }

        for x in left + 1..right {
            put(buffer, area, x, top, "─", border);
            put(buffer, area, x, bottom, "─", border);
        }
        for y in top + 1..bottom {
            put(buffer, area, left, y, "│", border);
            put(buffer, area, right, y, "│", border);
        }
        put(buffer, area, left, top, "┌", border);
        put(buffer, area, right, top, "┐", border);
        put(buffer, area, left, bottom, "└", border);
        put(buffer, area, right, bottom, "┘", border);

        if size.height < 3 {
            return;
        }
        // Header
        let header_y = top + 1;
        let header_style = theme::header(view.focused);
        for x in left + 1..right {
            put(buffer, area, x, header_y, " ", header_style);
        }
        let buttons = header_buttons(view.bounds);
        let title_room = match buttons.first() {
            Some((_, b)) => b.position.x - left - 1,
            None => size.width as i32 - 2,
        };
        let label = format!(" {} {}", view.icon, view.title);
        let label: String = label.chars().take(title_room.max(0) as usize).collect();
        put_str(buffer, area, left + 1, header_y, &label, header_style);

        for (action, b) in buttons {
            let (glyph, style) = match action {
                HeaderAction::Minimize => (" _ ", header_style),
                HeaderAction::Maximize if view.maximized => (" ❐ ", header_style),
                HeaderAction::Maximize => (" □ ", header_style),
                HeaderAction::Close => (" × ", theme::close_button(view.focused)),
                HeaderAction::Drag => continue,
            };
            put_str(buffer, area, b.position.x, b.position.y, glyph, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, 40, 12)
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn draws_frame_title_and_buttons() {
        let mut buffer = Buffer::empty(area());
        let view = ChromeView {
            bounds: Bounds::new(Position::new(2, 1), Size::new(30, 6)),
            title: "Notepad",
            icon: "≡",
            focused: true,
            maximized: false,
        };
        DeskDecorator.render_window(&mut buffer, area(), &view);
        assert_eq!(buffer[(2, 1)].symbol(), "┌");
        assert_eq!(buffer[(31, 6)].symbol(), "┘");
        let header = row(&buffer, 2);
        assert!(header.contains("≡ Notepad"));
        assert!(header.contains(" _  □  × "));
    }

    #[test]
    fn clips_windows_hanging_off_the_left_edge() {
        let mut buffer = Buffer::empty(area());
        let view = ChromeView {
            bounds: Bounds::new(Position::new(-5, 0), Size::new(20, 6)),
            title: "Files",
            icon: "▤",
            focused: false,
            maximized: false,
        };
        DeskDecorator.render_window(&mut buffer, area(), &view);
        assert_eq!(buffer[(0, 0)].symbol(), "─");
        assert_eq!(buffer[(14, 0)].symbol(), "┐");
        assert_eq!(buffer[(15, 0)].symbol(), " ");
    }

    #[test]
    fn hit_test_distinguishes_buttons_drag_and_edges() {
        let b = Bounds::new(Position::new(10, 5), Size::new(20, 8));
        let buttons = header_buttons(b);
        assert_eq!(buttons.len(), 3);
        let close = buttons[2].1;
        assert_eq!(close.position, Position::new(26, 6));

        assert_eq!(
            hit_test(b, Position::new(27, 6), true),
            Some(ChromeHit::Header(HeaderAction::Close))
        );
        assert_eq!(
            hit_test(b, Position::new(20, 6), true),
            Some(ChromeHit::Header(HeaderAction::Minimize))
        );
        assert_eq!(
            hit_test(b, Position::new(12, 6), true),
            Some(ChromeHit::Header(HeaderAction::Drag))
        );
        assert_eq!(
            hit_test(b, Position::new(15, 5), true),
            Some(ChromeHit::Resize(ResizeEdge::Top))
        );
        assert_eq!(
            hit_test(b, Position::new(29, 12), true),
            Some(ChromeHit::Resize(ResizeEdge::BottomRight))
        );
        assert_eq!(
            hit_test(b, Position::new(10, 6), true),
            Some(ChromeHit::Resize(ResizeEdge::Left))
        );
        assert_eq!(hit_test(b, Position::new(15, 9), true), Some(ChromeHit::Body));
        assert_eq!(hit_test(b, Position::new(30, 9), true), None);
    }

    #[test]
    fn no_resize_handles_when_not_floating() {
        let b = Bounds::new(Position::new(0, 0), Size::new(40, 11));
        assert_eq!(hit_test(b, Position::new(0, 10), false), Some(ChromeHit::Body));
        assert_eq!(
            hit_test(b, Position::new(5, 1), false),
            Some(ChromeHit::Header(HeaderAction::Drag))
        );
    }

    #[test]
    fn body_sits_under_header() {
        let b = Bounds::new(Position::new(4, 2), Size::new(44, 14));
        assert_eq!(
            body_bounds(b),
            Bounds::new(Position::new(5, 4), Size::new(42, 11))
        );
    }
}
