use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A keypress as the prompt sees it.
///
/// Only the keys the prompt reacts to get their own variant; everything else
/// collapses to `Null` so handlers can ignore it in one arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Backspace,
    Esc,
    Up,
    Down,
    Char(char),
    Ctrl(char),
    Null,
}

impl From<KeyEvent> for Key {
    fn from(key_event: KeyEvent) -> Self {
        match key_event.code {
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Esc,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Char(c) if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Ctrl(c)
            }
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    #[test]
    fn maps_ctrl_modifier() {
        let event = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(Key::from(event), Key::Ctrl('n'));
    }

    #[test]
    fn maps_plain_characters() {
        let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(Key::from(event), Key::Char('a'));
    }

    #[test]
    fn unknown_keys_are_null() {
        let event = KeyEvent::new_with_kind(
            KeyCode::Home,
            KeyModifiers::NONE,
            KeyEventKind::Press,
        );
        assert_eq!(Key::from(event), Key::Null);
    }
}
