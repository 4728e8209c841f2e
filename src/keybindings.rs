use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::Action;
use crate::apps::AppId;
use crate::geometry::SnapZone;
use crate::shell::Overlay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Shift is ignored for character keys: terminals disagree on whether
    /// they report it.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let mods = match key.code {
            KeyCode::Char(_) | KeyCode::BackTab => key.modifiers - KeyModifiers::SHIFT,
            _ => key.modifiers,
        };
        key.code == self.code && mods == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) if self.mods.is_empty() => c.to_string(),
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(ToggleHelp, KeyCombo::plain(KeyCode::F(1)));
        kb.add(Dismiss, KeyCombo::plain(KeyCode::Esc));
        // Shell panels
        kb.add(
            ToggleOverlay(Overlay::StartMenu),
            KeyCombo::plain(KeyCode::Char('s')),
        );
        kb.add(
            ToggleOverlay(Overlay::NotificationCenter),
            KeyCombo::plain(KeyCode::Char('n')),
        );
        kb.add(
            ToggleOverlay(Overlay::QuickSettings),
            KeyCombo::plain(KeyCode::Char('q')),
        );
        kb.add(
            ToggleOverlay(Overlay::Widgets),
            KeyCombo::plain(KeyCode::Char('w')),
        );
        kb.add(
            ToggleOverlay(Overlay::Calendar),
            KeyCombo::plain(KeyCode::Char('c')),
        );
        for (digit, app) in ('1'..='9').zip(AppId::ALL) {
            kb.add(Launch(app), KeyCombo::plain(KeyCode::Char(digit)));
        }
        // Focus
        kb.add(FocusNext, KeyCombo::plain(KeyCode::Tab));
        kb.add(FocusPrev, KeyCombo::plain(KeyCode::BackTab));
        // Focused window
        kb.add(Minimize, KeyCombo::plain(KeyCode::Char('m')));
        kb.add(ToggleMaximize, KeyCombo::plain(KeyCode::Char('x')));
        kb.add(Snap(SnapZone::Left), KeyCombo::plain(KeyCode::Left));
        kb.add(Snap(SnapZone::Right), KeyCombo::plain(KeyCode::Right));
        kb.add(Snap(SnapZone::Top), KeyCombo::plain(KeyCode::Up));
        kb.add(Unsnap, KeyCombo::plain(KeyCode::Down));
        kb.add(
            Close,
            KeyCombo::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(action, _)| *action)
    }

    /// Rows for the help overlay, sorted by their key labels.
    pub fn help_entries(&self) -> Vec<(String, Action)> {
        let mut rows: Vec<(String, Action)> = self
            .map
            .iter()
            .map(|(action, list)| {
                let keys: Vec<String> = list.iter().map(KeyCombo::display).collect();
                (keys.join(", "), *action)
            })
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows
    }

    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_q_quits_but_plain_q_opens_quick_settings() {
        let kb = KeyBindings::default();
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ctrl_q), Some(Action::Quit));
        assert_eq!(
            kb.action_for_key(&q),
            Some(Action::ToggleOverlay(Overlay::QuickSettings))
        );
    }

    #[test]
    fn digits_launch_catalog_entries() {
        let kb = KeyBindings::default();
        let three = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&three), Some(Action::Launch(AppId::Terminal)));
        let nine = KeyEvent::new(KeyCode::Char('9'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&nine), None);
    }

    #[test]
    fn shifted_backtab_still_matches() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert!(kb.matches(Action::FocusPrev, &ev));
    }

    #[test]
    fn no_combo_is_bound_twice() {
        let kb = KeyBindings::default();
        let mut seen: Vec<KeyCombo> = Vec::new();
        for list in kb.map.values() {
            for combo in list {
                assert!(!seen.contains(combo), "{combo} bound twice");
                seen.push(combo.clone());
            }
        }
    }

    #[test]
    fn combos_render_for_help() {
        let kb = KeyBindings::default();
        assert_eq!(kb.combos_for(Action::Close), vec!["Ctrl+W".to_string()]);
        assert_eq!(kb.combos_for(Action::ToggleHelp), vec!["F1".to_string()]);
        assert!(
            kb.help_entries()
                .iter()
                .any(|(keys, action)| keys == "x" && *action == Action::ToggleMaximize)
        );
    }
}
