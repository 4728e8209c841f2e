use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Smooths over terminal differences before key events reach the bindings:
/// Shift+Tab arrives as `BackTab`, and only presses get through.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer;

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.kind != KeyEventKind::Press {
                    return None;
                }
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}
