//! Routes terminal input into the shell and drives the draw loop.

use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::actions::Action;
use crate::apps::AppId;
use crate::config::ShellConfig;
use crate::drivers::InputDriver;
use crate::error::Result;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::geometry::{Position, Viewport};
use crate::gesture::GestureKind;
use crate::help::help_text;
use crate::keybindings::KeyBindings;
use crate::panel::{Panel, PanelHit, rect_contains};
use crate::shell::{Overlay, ShellController};
use crate::ui::{UiFrame, desktop_icon_rects, render_desktop, render_help};
use crate::window::decorator::{ChromeHit, DeskDecorator, HeaderAction, hit_test};

/// The terminal desktop: the shell plus everything needed to draw it and
/// map clicks back onto it.
pub struct DesktopApp {
    shell: ShellController<AppId>,
    panel: Panel<AppId>,
    bindings: KeyBindings,
    decorator: DeskDecorator,
    shell_height: u32,
    help_visible: bool,
}

impl DesktopApp {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            shell_height: config.viewport.shell_height,
            shell: ShellController::new(config),
            panel: Panel::new(),
            bindings: KeyBindings::default(),
            decorator: DeskDecorator,
            help_visible: false,
        }
    }

    pub fn shell(&self) -> &ShellController<AppId> {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut ShellController<AppId> {
        &mut self.shell
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Paint a frame. The viewport follows the frame size.
    pub fn draw(&mut self, frame: &mut UiFrame<'_>, now: DateTime<Local>) {
        let area = frame.area();
        self.shell.set_viewport(Viewport::new(
            area.width as u32,
            area.height as u32,
            self.shell_height,
        ));
        render_desktop(frame, &self.shell, &mut self.panel, &self.decorator, now);
        if self.help_visible {
            render_help(frame, help_text(), &self.bindings);
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                ControlFlow::Continue
            }
            Event::Resize(width, height) => {
                self.shell.set_viewport(Viewport::new(
                    *width as u32,
                    *height as u32,
                    self.shell_height,
                ));
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        let Some(action) = self.bindings.action_for_key(key) else {
            return ControlFlow::Continue;
        };
        if self.help_visible {
            return match action {
                Action::Quit => ControlFlow::Quit,
                Action::ToggleHelp | Action::Dismiss => {
                    self.help_visible = false;
                    ControlFlow::Continue
                }
                _ => ControlFlow::Continue,
            };
        }
        self.apply(action)
    }

    /// Carry out a keyboard action. Window actions apply to the focused
    /// window, if there is one.
    pub fn apply(&mut self, action: Action) -> ControlFlow {
        tracing::trace!(%action, "key action");
        let focused = self.shell.focused();
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::Dismiss => self.shell.close_overlay(),
            Action::ToggleOverlay(overlay) => self.shell.toggle_overlay(overlay),
            Action::Launch(app) => self.shell.launch(app),
            Action::FocusNext => self.shell.cycle_focus(true),
            Action::FocusPrev => self.shell.cycle_focus(false),
            Action::Minimize => focused.into_iter().for_each(|id| self.shell.minimize(id)),
            Action::ToggleMaximize => focused.into_iter().for_each(|id| self.shell.maximize(id)),
            Action::Snap(zone) => focused
                .into_iter()
                .for_each(|id| self.shell.snap(id, Some(zone))),
            Action::Unsnap => focused.into_iter().for_each(|id| self.shell.snap(id, None)),
            Action::Close => focused.into_iter().for_each(|id| self.shell.close(id)),
        }
        ControlFlow::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let point = Position::new(mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // A press while a gesture is live means its release was lost
                // outside the terminal.
                if self.shell.active_gesture().is_some() {
                    tracing::debug!("dropping gesture with a lost release");
                    self.shell.cancel_gesture();
                }
                self.pointer_down(mouse.column, mouse.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.shell.active_gesture() {
                Some(GestureKind::Drag) => {
                    self.shell.drag_to(point);
                }
                Some(GestureKind::Resize) => {
                    self.shell.resize_to(point);
                }
                None => {}
            },
            MouseEventKind::Up(MouseButton::Left) => match self.shell.active_gesture() {
                Some(GestureKind::Drag) => {
                    self.shell.end_drag(point);
                }
                Some(GestureKind::Resize) => {
                    self.shell.end_resize();
                }
                None => {}
            },
            _ => {}
        }
    }

    fn pointer_down(&mut self, column: u16, row: u16) {
        if self.help_visible {
            self.help_visible = false;
            return;
        }
        // Menu and popup regions are from the last frame; ignore them once
        // the overlay has been dismissed.
        let overlay_open = self.shell.active_overlay().is_some();
        let hit = self
            .panel
            .hit_test(column, row)
            .filter(|hit| overlay_open || !matches!(hit, PanelHit::MenuItem(_) | PanelHit::Popup));
        if let Some(hit) = hit {
            match hit {
                PanelHit::StartButton => self.shell.toggle_overlay(Overlay::StartMenu),
                PanelHit::Tray(overlay) => self.shell.toggle_overlay(overlay),
                PanelHit::Window(id) => self.shell.activate_taskbar(id),
                PanelHit::MenuItem(app) => self.shell.launch(app),
                PanelHit::Popup => {}
            }
            return;
        }
        // Clicking anywhere else dismisses the open panel.
        self.shell.close_overlay();

        let point = Position::new(column as i32, row as i32);
        let registry = self.shell.registry();
        if let Some(id) = registry.topmost_at(point) {
            let Some((bounds, floating)) = registry
                .get(id)
                .map(|window| (window.bounds(), window.is_floating()))
            else {
                return;
            };
            match hit_test(bounds, point, floating) {
                Some(ChromeHit::Header(HeaderAction::Close)) => self.shell.close(id),
                Some(ChromeHit::Header(HeaderAction::Minimize)) => self.shell.minimize(id),
                Some(ChromeHit::Header(HeaderAction::Maximize)) => {
                    self.shell.focus(id);
                    self.shell.maximize(id);
                }
                Some(ChromeHit::Header(HeaderAction::Drag)) => {
                    self.shell.begin_drag(id, point);
                }
                Some(ChromeHit::Resize(edge)) => {
                    self.shell.begin_resize(id, edge, point);
                }
                Some(ChromeHit::Body) | None => self.shell.focus(id),
            }
            return;
        }

        let work = self.shell.viewport().work_rect();
        let icons = self.shell.desktop_icons();
        let clicked = icons
            .iter()
            .zip(desktop_icon_rects(work, icons.len()))
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(icon, _)| *icon);
        if let Some(icon) = clicked {
            self.shell.activate_icon(icon);
        }
    }
}

/// Run the desktop until the user quits.
pub fn run_desktop<B, D>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    app: &mut DesktopApp,
    poll_interval: Duration,
) -> Result<()>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;
    event_loop.run(|_, event| {
        match event {
            Some(event) => return Ok(app.handle_event(&event)),
            None => {
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        app.draw(&mut ui, Local::now());
                    })
                    .map_err(|e| std::io::Error::other(e.to_string()))?;
            }
        }
        Ok(ControlFlow::Continue)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    use crate::geometry::SnapZone;

    fn app() -> DesktopApp {
        DesktopApp::new(
            ShellConfig::default()
                .with_viewport(Viewport::new(80, 24, 1))
                .with_snap_threshold(2),
        )
    }

    fn paint(app: &mut DesktopApp) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        let now = Local.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        app.draw(&mut UiFrame::from_parts(area, &mut buffer), now);
        buffer
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn click(app: &mut DesktopApp, column: u16, row: u16) {
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    }

    fn key(code: KeyCode, mods: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, mods))
    }

    #[test]
    fn ctrl_q_quits_and_plain_q_opens_quick_settings() {
        let mut app = app();
        assert_eq!(
            app.handle_event(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            ControlFlow::Continue
        );
        assert_eq!(app.shell().active_overlay(), Some(Overlay::QuickSettings));
        assert_eq!(
            app.handle_event(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            ControlFlow::Quit
        );
    }

    #[test]
    fn help_swallows_other_keys_until_dismissed() {
        let mut app = app();
        app.handle_event(&key(KeyCode::Char('1'), KeyModifiers::NONE));
        app.handle_event(&key(KeyCode::F(1), KeyModifiers::NONE));
        assert!(app.help_visible());
        app.handle_event(&key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!app.shell().registry().get(AppId::Notepad).unwrap().is_maximized());
        app.handle_event(&key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!app.help_visible());
        app.handle_event(&key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(app.shell().registry().get(AppId::Notepad).unwrap().is_maximized());
    }

    #[test]
    fn window_keys_act_on_the_focused_window() {
        let mut app = app();
        app.handle_event(&key(KeyCode::Char('1'), KeyModifiers::NONE));
        app.handle_event(&key(KeyCode::Char('3'), KeyModifiers::NONE));
        app.handle_event(&key(KeyCode::Left, KeyModifiers::NONE));
        let terminal = app.shell().registry().get(AppId::Terminal).unwrap();
        assert_eq!(terminal.snap_zone(), Some(SnapZone::Left));
        assert_eq!(terminal.size().width, 40);

        app.handle_event(&key(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert!(!app.shell().registry().contains(AppId::Terminal));
        assert_eq!(app.shell().focused(), Some(AppId::Notepad));
    }

    #[test]
    fn title_bar_buttons_route_to_the_shell() {
        let mut app = app();
        app.shell_mut().open(AppId::Notepad);
        paint(&mut app);
        // Notepad spans x 4..48 with its buttons at 38, 41 and 44 on row 3.
        click(&mut app, 42, 3);
        assert!(app.shell().registry().get(AppId::Notepad).unwrap().is_maximized());
        // maximized it spans the work area, so the button moves to x 73
        click(&mut app, 74, 1);
        assert!(app.shell().registry().get(AppId::Notepad).unwrap().is_floating());
        click(&mut app, 39, 3);
        assert!(app.shell().registry().get(AppId::Notepad).unwrap().is_minimized());
    }

    #[test]
    fn close_button_removes_the_window() {
        let mut app = app();
        app.shell_mut().open(AppId::Notepad);
        paint(&mut app);
        click(&mut app, 45, 3);
        assert!(app.shell().registry().is_empty());
    }

    #[test]
    fn dragging_the_title_bar_moves_and_snaps() {
        let mut app = app();
        app.shell_mut().open(AppId::Notepad);
        paint(&mut app);

        click(&mut app, 10, 3);
        assert_eq!(app.shell().active_gesture(), Some(GestureKind::Drag));
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 20, 8));
        let notepad = app.shell().registry().get(AppId::Notepad).unwrap();
        assert_eq!(notepad.position(), Position::new(14, 7));

        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, 10));
        assert_eq!(app.shell().snap_preview(), Some(SnapZone::Left));
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 0, 10));
        assert_eq!(app.shell().active_gesture(), None);
        let notepad = app.shell().registry().get(AppId::Notepad).unwrap();
        assert_eq!(notepad.snap_zone(), Some(SnapZone::Left));
        assert_eq!(notepad.position(), Position::new(0, 0));
        assert_eq!(notepad.size().height, 23);
    }

    #[test]
    fn maximize_key_while_resizing_wins() {
        let mut app = app();
        app.shell_mut().open(AppId::Notepad);
        paint(&mut app);
        click(&mut app, 47, 15);
        app.handle_event(&key(KeyCode::Char('x'), KeyModifiers::NONE));
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 30, 10));
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 30, 10));
        let notepad = app.shell().registry().get(AppId::Notepad).unwrap();
        assert!(notepad.is_maximized());
        assert_eq!(notepad.size().width, 80);
        assert_eq!(notepad.size().height, 23);
    }

    #[test]
    fn press_after_a_lost_release_starts_fresh() {
        let mut app = app();
        app.shell_mut().open(AppId::Notepad);
        paint(&mut app);
        click(&mut app, 10, 3);
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 20, 8));
        // no Up: the button was released outside the terminal
        click(&mut app, 2, 23);
        assert_eq!(app.shell().active_gesture(), None);
        assert_eq!(app.shell().active_overlay(), Some(Overlay::StartMenu));
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 60, 20));
        let notepad = app.shell().registry().get(AppId::Notepad).unwrap();
        assert_eq!(notepad.position(), Position::new(14, 7));
    }

    #[test]
    fn dragging_the_corner_resizes() {
        let mut app = app();
        app.shell_mut().open(AppId::Notepad);
        paint(&mut app);
        // bottom-right corner of a 44x14 window at (4,2)
        click(&mut app, 47, 15);
        assert_eq!(app.shell().active_gesture(), Some(GestureKind::Resize));
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 51, 17));
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 51, 17));
        let notepad = app.shell().registry().get(AppId::Notepad).unwrap();
        assert_eq!(notepad.size().width, 48);
        assert_eq!(notepad.size().height, 16);
        assert_eq!(app.shell().active_gesture(), None);
    }

    #[test]
    fn taskbar_start_menu_and_tray() {
        let mut app = app();
        paint(&mut app);
        click(&mut app, 2, 23);
        assert_eq!(app.shell().active_overlay(), Some(Overlay::StartMenu));

        // menu items start at row 17, in catalog order
        paint(&mut app);
        click(&mut app, 4, 19);
        assert_eq!(app.shell().active_overlay(), None);
        assert_eq!(app.shell().focused(), Some(AppId::Terminal));

        paint(&mut app);
        click(&mut app, 78, 23);
        assert_eq!(app.shell().active_overlay(), Some(Overlay::Calendar));
        click(&mut app, 78, 23);
        assert_eq!(app.shell().active_overlay(), None);
    }

    #[test]
    fn stale_menu_regions_are_ignored() {
        let mut app = app();
        paint(&mut app);
        click(&mut app, 2, 23);
        paint(&mut app);
        app.handle_event(&key(KeyCode::Esc, KeyModifiers::NONE));
        click(&mut app, 4, 19);
        assert!(app.shell().registry().is_empty());
    }

    #[test]
    fn taskbar_entry_toggles_minimize() {
        let mut app = app();
        app.shell_mut().open(AppId::Notepad);
        paint(&mut app);
        click(&mut app, 11, 23);
        assert!(app.shell().registry().get(AppId::Notepad).unwrap().is_minimized());
        click(&mut app, 11, 23);
        assert_eq!(app.shell().focused(), Some(AppId::Notepad));
    }

    #[test]
    fn desktop_click_dismisses_overlay_and_icons_launch() {
        let mut app = app();
        paint(&mut app);
        app.shell_mut().open_overlay(Overlay::Widgets);
        click(&mut app, 30, 20);
        assert_eq!(app.shell().active_overlay(), None);
        assert!(app.shell().registry().is_empty());

        // the Snake launcher is the fourth icon, on row 7
        click(&mut app, 66, 7);
        assert_eq!(app.shell().focused(), Some(AppId::Snake));
    }

    #[test]
    fn terminal_resize_updates_the_viewport() {
        let mut app = app();
        app.handle_event(&Event::Resize(100, 30));
        assert_eq!(app.shell().viewport(), Viewport::new(100, 30, 1));
    }
}
