use std::collections::BTreeMap;

use serde::Serialize;

use super::z_order::ZOrderPolicy;
use super::{AppDescriptor, LayoutMode, WindowState};
use crate::geometry::{Position, Size, SnapZone, Viewport};

/// Read-only view of the registry handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesktopSnapshot<A: AppDescriptor> {
    pub windows: BTreeMap<A, WindowState>,
    pub order: Vec<A>,
    pub highest_z_index: u32,
}

/// Authoritative map of open windows and every transition they go through.
///
/// Operations that name a window which is not open are silent no-ops: the
/// presentation layer may race ahead of state (a click landing on a window
/// that was closed a moment earlier) and that must never fail.
#[derive(Debug, Clone)]
pub struct WindowRegistry<A: AppDescriptor> {
    windows: BTreeMap<A, WindowState>,
    // taskbar order: creation order, unaffected by focus
    order: Vec<A>,
    highest_z_index: u32,
    z_policy: ZOrderPolicy,
}

impl<A: AppDescriptor> Default for WindowRegistry<A> {
    fn default() -> Self {
        Self::new(ZOrderPolicy::default())
    }
}

impl<A: AppDescriptor> WindowRegistry<A> {
    pub fn new(z_policy: ZOrderPolicy) -> Self {
        Self {
            windows: BTreeMap::new(),
            order: Vec::new(),
            highest_z_index: z_policy.base,
            z_policy,
        }
    }

    fn bump_z_index(&mut self) -> u32 {
        self.highest_z_index = self.z_policy.next_z_index(self.highest_z_index);
        self.highest_z_index
    }

    fn raise(&mut self, id: A) {
        if !self.windows.contains_key(&id) {
            return;
        }
        let z = self.bump_z_index();
        if let Some(window) = self.windows.get_mut(&id) {
            window.z_index = z;
        }
    }

    pub fn get(&self, id: A) -> Option<&WindowState> {
        self.windows.get(&id)
    }

    pub fn contains(&self, id: A) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Ids in taskbar order.
    pub fn order(&self) -> &[A] {
        &self.order
    }

    pub fn highest_z_index(&self) -> u32 {
        self.highest_z_index
    }

    pub fn z_policy(&self) -> ZOrderPolicy {
        self.z_policy
    }

    /// Open `id`, or bring it back if it is already open.
    pub fn open(&mut self, id: A) {
        if self.windows.contains_key(&id) {
            if let Some(window) = self.windows.get_mut(&id) {
                window.minimized = false;
            }
            self.raise(id);
            return;
        }
        let z = self.bump_z_index();
        let window = WindowState::new(id.window_spec(), z);
        tracing::debug!(window_id = ?id, z_index = z, "opened window");
        self.windows.insert(id, window);
        self.order.push(id);
    }

    pub fn close(&mut self, id: A) {
        if self.windows.remove(&id).is_none() {
            return;
        }
        tracing::debug!(window_id = ?id, "closed window");
        self.order.retain(|x| *x != id);
    }

    /// Hide a window. Its z-index is kept so it can still be compared with
    /// its siblings once restored.
    pub fn minimize(&mut self, id: A) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.minimized = true;
            tracing::trace!(window_id = ?id, "minimized window");
        }
    }

    /// Un-minimize and bring to front.
    pub fn restore(&mut self, id: A) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        window.minimized = false;
        self.raise(id);
    }

    /// Bring to front without touching anything else.
    pub fn focus(&mut self, id: A) {
        self.raise(id);
    }

    /// Toggle between the work area and the saved floating geometry.
    ///
    /// A window snapped to the top edge counts as maximized, so toggling it
    /// returns it to its floating geometry. Maximizing a side-snapped window
    /// keeps the geometry it had before the snap.
    pub fn maximize(&mut self, id: A, viewport: &Viewport) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if window.is_maximized() {
            if let Some(restore) = window.layout.restore_bounds() {
                window.set_bounds(restore);
            }
            window.layout = LayoutMode::Floating;
            tracing::trace!(window_id = ?id, "unmaximized window");
        } else {
            let restore = window
                .layout
                .restore_bounds()
                .unwrap_or_else(|| window.bounds());
            window.layout = LayoutMode::Maximized { restore };
            window.set_bounds(viewport.work_area());
            tracing::trace!(window_id = ?id, "maximized window");
        }
    }

    /// Overwrite the position verbatim. Clamping is the drag controller's job.
    pub fn move_to(&mut self, id: A, position: Position) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.position = position;
        }
    }

    /// Overwrite the size and, for handles that grow from the top or left
    /// edge, the origin.
    ///
    /// The size is not checked against the window's minimum; callers go
    /// through the resize controller, which never produces smaller sizes.
    pub fn resize(&mut self, id: A, size: Size, position: Option<Position>) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        window.size = size;
        if let Some(position) = position {
            window.position = position;
        }
    }

    /// Snap to a screen edge, or unsnap with `None`.
    ///
    /// Only a snap out of `Floating` records the geometry to return to, so
    /// moving from one zone to another and then unsnapping lands the window
    /// where it was before the first snap.
    pub fn snap(&mut self, id: A, zone: Option<SnapZone>, viewport: &Viewport) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        match zone {
            None => {
                if let LayoutMode::Snapped { restore, .. } = window.layout {
                    window.set_bounds(restore);
                    window.layout = LayoutMode::Floating;
                    tracing::trace!(window_id = ?id, "unsnapped window");
                }
            }
            Some(zone) => {
                let restore = window
                    .layout
                    .restore_bounds()
                    .unwrap_or_else(|| window.bounds());
                window.layout = LayoutMode::Snapped { zone, restore };
                window.set_bounds(viewport.snap_bounds(zone));
                tracing::trace!(window_id = ?id, ?zone, "snapped window");
            }
        }
    }

    /// Visible windows from bottom to top.
    pub fn stacking_order(&self) -> Vec<A> {
        let mut ids: Vec<(u32, usize, A)> = self
            .order
            .iter()
            .enumerate()
            .filter_map(|(idx, id)| {
                let window = self.windows.get(id)?;
                (!window.minimized).then_some((window.z_index, idx, *id))
            })
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, _, id)| id).collect()
    }

    /// The topmost visible window.
    pub fn focused(&self) -> Option<A> {
        self.stacking_order().last().copied()
    }

    /// The topmost visible window under `point`.
    pub fn topmost_at(&self, point: Position) -> Option<A> {
        self.stacking_order().into_iter().rev().find(|id| {
            self.windows
                .get(id)
                .is_some_and(|window| window.bounds().contains(point))
        })
    }

    /// The next visible window after `from` in taskbar order, wrapping.
    pub fn next_visible(&self, from: Option<A>, forward: bool) -> Option<A> {
        let visible: Vec<A> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.windows.get(id).is_some_and(|w| !w.minimized))
            .collect();
        if visible.is_empty() {
            return None;
        }
        let Some(idx) = from.and_then(|id| visible.iter().position(|x| *x == id)) else {
            return visible.first().copied();
        };
        let step = if forward { 1isize } else { -1isize };
        let next = (idx as isize + step).rem_euclid(visible.len() as isize) as usize;
        Some(visible[next])
    }

    pub fn snapshot(&self) -> DesktopSnapshot<A> {
        DesktopSnapshot {
            windows: self.windows.clone(),
            order: self.order.clone(),
            highest_z_index: self.highest_z_index,
        }
    }
}
