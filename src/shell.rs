//! The shell: overlay panels, taskbar semantics, and the glue between pointer
//! gestures and the window registry.

use crate::apps::{AppId, IconId};
use crate::config::ShellConfig;
use crate::geometry::{Bounds, Position, Size, SnapZone, Viewport};
use crate::gesture::{
    DragController, GestureKind, GestureStart, PointerCapture, PreviewChange, ResizeController,
    ResizeEdge,
};
use crate::window::{AppDescriptor, DesktopSnapshot, WindowRegistry};

/// Panels that sit above the desktop. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    StartMenu,
    NotificationCenter,
    QuickSettings,
    Widgets,
    Calendar,
}

impl Overlay {
    pub const ALL: [Overlay; 5] = [
        Overlay::StartMenu,
        Overlay::NotificationCenter,
        Overlay::QuickSettings,
        Overlay::Widgets,
        Overlay::Calendar,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Overlay::StartMenu => "Start",
            Overlay::NotificationCenter => "Notifications",
            Overlay::QuickSettings => "Quick Settings",
            Overlay::Widgets => "Widgets",
            Overlay::Calendar => "Calendar",
        }
    }

    pub fn icon(self) -> IconId {
        match self {
            Overlay::StartMenu => IconId::Start,
            Overlay::NotificationCenter => IconId::Bell,
            Overlay::QuickSettings => IconId::Sliders,
            Overlay::Widgets => IconId::Widgets,
            Overlay::Calendar => IconId::Calendar,
        }
    }
}

/// A launcher on the desktop background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopIcon {
    pub app: AppId,
    pub icon: IconId,
    pub label: &'static str,
}

pub struct ShellController<A: AppDescriptor = AppId> {
    registry: WindowRegistry<A>,
    viewport: Viewport,
    active_overlay: Option<Overlay>,
    capture: PointerCapture,
    snap_threshold: u32,
    drag: DragController,
    drag_target: Option<A>,
    resize: ResizeController,
    resize_target: Option<A>,
    snap_preview: Option<SnapZone>,
}

impl<A: AppDescriptor> ShellController<A> {
    pub fn new(config: ShellConfig) -> Self {
        let capture = PointerCapture::new();
        Self {
            registry: WindowRegistry::new(config.z_order),
            viewport: config.viewport,
            active_overlay: None,
            drag: DragController::with_snap_threshold(capture.clone(), config.snap_threshold),
            drag_target: None,
            resize: ResizeController::new(capture.clone()),
            resize_target: None,
            snap_preview: None,
            snap_threshold: config.snap_threshold,
            capture,
        }
    }

    pub fn registry(&self) -> &WindowRegistry<A> {
        &self.registry
    }

    pub fn snapshot(&self) -> DesktopSnapshot<A> {
        self.registry.snapshot()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn snap_threshold(&self) -> u32 {
        self.snap_threshold
    }

    /// Record a new host size. Existing geometry is left alone; the next
    /// maximize or snap uses the new size.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport != viewport {
            tracing::debug!(?viewport, "viewport changed");
            self.viewport = viewport;
        }
    }

    // --- overlays -------------------------------------------------------

    pub fn active_overlay(&self) -> Option<Overlay> {
        self.active_overlay
    }

    pub fn is_overlay_open(&self, overlay: Overlay) -> bool {
        self.active_overlay == Some(overlay)
    }

    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.active_overlay = None;
        self.active_overlay = Some(overlay);
    }

    pub fn close_overlay(&mut self) {
        self.active_overlay = None;
    }

    pub fn toggle_overlay(&mut self, overlay: Overlay) {
        if self.is_overlay_open(overlay) {
            self.close_overlay();
        } else {
            self.open_overlay(overlay);
        }
    }

    // --- window lifecycle -----------------------------------------------

    pub fn open(&mut self, id: A) {
        self.registry.open(id);
    }

    /// Open from a launcher surface: overlays close first.
    pub fn launch(&mut self, id: A) {
        self.close_overlay();
        self.registry.open(id);
    }

    pub fn close(&mut self, id: A) {
        self.cancel_gestures_for(id);
        self.registry.close(id);
    }

    pub fn minimize(&mut self, id: A) {
        self.cancel_gestures_for(id);
        self.registry.minimize(id);
    }

    pub fn restore(&mut self, id: A) {
        self.registry.restore(id);
    }

    pub fn focus(&mut self, id: A) {
        self.registry.focus(id);
    }

    /// Toggle maximize. A drag or resize in flight on `id` is abandoned so it
    /// cannot overwrite the new layout.
    pub fn maximize(&mut self, id: A) {
        self.cancel_gestures_for(id);
        let viewport = self.viewport;
        self.registry.maximize(id, &viewport);
    }

    pub fn move_to(&mut self, id: A, position: Position) {
        self.registry.move_to(id, position);
    }

    pub fn resize(&mut self, id: A, size: Size, position: Option<Position>) {
        self.registry.resize(id, size, position);
    }

    pub fn snap(&mut self, id: A, zone: Option<SnapZone>) {
        self.cancel_gestures_for(id);
        let viewport = self.viewport;
        self.registry.snap(id, zone, &viewport);
    }

    pub fn focused(&self) -> Option<A> {
        self.registry.focused()
    }

    /// Taskbar button behaviour: bring back a minimized window, hide the
    /// focused one, raise any other.
    pub fn activate_taskbar(&mut self, id: A) {
        let Some(window) = self.registry.get(id) else {
            return;
        };
        if window.is_minimized() {
            self.restore(id);
        } else if self.focused() == Some(id) {
            self.minimize(id);
        } else {
            self.focus(id);
        }
    }

    /// Focus the next (or previous) visible window in taskbar order.
    pub fn cycle_focus(&mut self, forward: bool) {
        if let Some(next) = self.registry.next_visible(self.focused(), forward) {
            self.focus(next);
        }
    }

    // --- gestures -------------------------------------------------------

    /// Kind of the gesture in flight, if any.
    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.capture.active()
    }

    pub fn snap_preview(&self) -> Option<SnapZone> {
        self.snap_preview
    }

    /// Geometry of the ghost shown while a drag hovers a snap zone.
    pub fn snap_preview_bounds(&self) -> Option<Bounds> {
        self.snap_preview.map(|zone| self.viewport.snap_bounds(zone))
    }

    /// Start dragging `id` by its title bar.
    ///
    /// A maximized or snapped window is first returned to its floating size
    /// and centred horizontally under the pointer, keeping its vertical
    /// offset, so the drag continues from there.
    pub fn begin_drag(&mut self, id: A, pointer: Position) -> bool {
        if self.capture.is_captured() {
            return false;
        }
        let Some(window) = self.registry.get(id).cloned() else {
            return false;
        };
        if window.is_minimized() {
            return false;
        }
        self.registry.focus(id);
        let viewport = self.viewport;
        let registry = &mut self.registry;
        let started = self.drag.start(pointer, window.position(), || {
            let Some(restore) = window.layout().restore_bounds() else {
                return GestureStart::keep();
            };
            if window.is_snapped() {
                registry.snap(id, None, &viewport);
            } else {
                registry.maximize(id, &viewport);
            }
            let half_width = (restore.size.width / 2) as i32;
            let position = Position::new(pointer.x - half_width, window.position().y);
            registry.move_to(id, position);
            GestureStart::relocate(position)
        });
        if started.is_some() {
            self.drag_target = Some(id);
            self.snap_preview = None;
        }
        started.is_some()
    }

    /// Follow the pointer. Returns the window's new position.
    pub fn drag_to(&mut self, pointer: Position) -> Option<Position> {
        let id = self.drag_target?;
        let step = self.drag.update(pointer, &self.viewport)?;
        self.registry.move_to(id, step.position);
        if let PreviewChange::Changed(zone) = step.preview {
            self.snap_preview = zone;
        }
        Some(step.position)
    }

    /// Drop the window. A drop inside a snap zone snaps it there; the zone is
    /// returned.
    pub fn end_drag(&mut self, pointer: Position) -> Option<SnapZone> {
        let end = self.drag.end(pointer, &self.viewport)?;
        let id = self.drag_target.take()?;
        if let PreviewChange::Changed(zone) = end.preview {
            self.snap_preview = zone;
        }
        if let Some(zone) = end.drop_zone {
            self.snap(id, Some(zone));
        }
        end.drop_zone
    }

    /// Start resizing `id` from `edge`. Refused for maximized or snapped
    /// windows.
    pub fn begin_resize(&mut self, id: A, edge: ResizeEdge, pointer: Position) -> bool {
        if self.capture.is_captured() {
            return false;
        }
        match self.registry.get(id) {
            Some(window) if !window.is_minimized() => {}
            _ => return false,
        }
        self.registry.focus(id);
        let Some(window) = self.registry.get(id) else {
            return false;
        };
        let started = self.resize.start(pointer, edge, window);
        if started {
            self.resize_target = Some(id);
        }
        started
    }

    pub fn resize_to(&mut self, pointer: Position) -> Option<Bounds> {
        let id = self.resize_target?;
        let bounds = self.resize.update(pointer)?;
        self.registry.resize(id, bounds.size, Some(bounds.position));
        Some(bounds)
    }

    pub fn end_resize(&mut self) -> bool {
        self.resize_target = None;
        self.resize.end()
    }

    /// Abandon whatever gesture is in flight, leaving the window where the
    /// last update put it.
    pub fn cancel_gesture(&mut self) {
        let targets = [self.drag_target, self.resize_target];
        for id in targets.into_iter().flatten() {
            self.cancel_gestures_for(id);
        }
    }

    /// Abandon any gesture on `id`, releasing the pointer.
    fn cancel_gestures_for(&mut self, id: A) {
        if self.drag_target == Some(id) {
            self.drag_target = None;
            self.snap_preview = None;
            self.drag =
                DragController::with_snap_threshold(self.capture.clone(), self.snap_threshold);
        }
        if self.resize_target == Some(id) {
            self.resize_target = None;
            self.resize = ResizeController::new(self.capture.clone());
        }
    }
}

impl ShellController<AppId> {
    /// Desktop launchers in catalog order.
    pub fn desktop_icons(&self) -> Vec<DesktopIcon> {
        AppId::ALL
            .into_iter()
            .map(|app| DesktopIcon {
                app,
                icon: app.icon(),
                label: app.title(),
            })
            .collect()
    }

    pub fn activate_icon(&mut self, icon: DesktopIcon) {
        self.launch(icon.app);
    }
}
