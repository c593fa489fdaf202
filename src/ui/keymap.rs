//! Translation from crossterm key events to the browser-style events the
//! typeahead understands.
use crossterm::event::{KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers};

use crate::typeahead::keys::{ARROW_DOWN, ARROW_UP, BACKSPACE, ENTER, ESCAPE, TAB, UNIDENTIFIED};
use crate::typeahead::KeyEvent;

const END: i32 = 35;
const HOME: i32 = 36;
const ARROW_LEFT: i32 = 37;
const ARROW_RIGHT: i32 = 39;

/// What the field does with a key when no handler prevented the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Insert(char),
    Backspace,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    Undo,
    Submit,
    NextField,
    Nothing,
}

/// One physical key press, ready for keydown, keypress and keyup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    pub event: KeyEvent,
    pub default_action: DefaultAction,
    /// Whether a keypress fires between keydown and keyup.
    pub fires_keypress: bool,
}

impl Keystroke {
    fn new(event: KeyEvent, default_action: DefaultAction) -> Self {
        Self {
            event,
            default_action,
            fires_keypress: false,
        }
    }

    fn with_keypress(mut self) -> Self {
        self.fires_keypress = true;
        self
    }
}

/// Returns `None` for releases and for keys the compose box has no use for.
pub fn translate(key: &TermKeyEvent) -> Option<Keystroke> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let stroke = match key.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'z' => Keystroke::new(KeyEvent::character('z').with_ctrl(), DefaultAction::Undo),
            _ => return None,
        },
        KeyCode::Char(c) => {
            let mut event = KeyEvent::character(c);
            if shift {
                event = event.with_shift();
            }
            Keystroke::new(event, DefaultAction::Insert(c)).with_keypress()
        }
        KeyCode::Enter => {
            Keystroke::new(KeyEvent::new(ENTER), DefaultAction::Submit).with_keypress()
        }
        KeyCode::Tab => Keystroke::new(KeyEvent::new(TAB), DefaultAction::NextField),
        KeyCode::BackTab => {
            Keystroke::new(KeyEvent::new(TAB).with_shift(), DefaultAction::NextField)
        }
        KeyCode::Esc => Keystroke::new(KeyEvent::new(ESCAPE), DefaultAction::Nothing),
        KeyCode::Backspace => Keystroke::new(KeyEvent::new(BACKSPACE), DefaultAction::Backspace),
        KeyCode::Up => Keystroke::new(KeyEvent::new(ARROW_UP), DefaultAction::CursorHome),
        KeyCode::Down => Keystroke::new(KeyEvent::new(ARROW_DOWN), DefaultAction::CursorEnd),
        KeyCode::Left => Keystroke::new(KeyEvent::new(ARROW_LEFT), DefaultAction::CursorLeft),
        KeyCode::Right => Keystroke::new(KeyEvent::new(ARROW_RIGHT), DefaultAction::CursorRight),
        KeyCode::Home => Keystroke::new(KeyEvent::new(HOME), DefaultAction::CursorHome),
        KeyCode::End => Keystroke::new(KeyEvent::new(END), DefaultAction::CursorEnd),
        _ => return None,
    };
    Some(stroke)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> TermKeyEvent {
        TermKeyEvent::new(code, modifiers)
    }

    #[test]
    fn printable_keys_insert_and_fire_keypress() {
        let stroke = translate(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(stroke.event.key_code, 'A' as i32);
        assert_eq!(stroke.event.key, Some('A'));
        assert!(stroke.event.shift);
        assert!(stroke.fires_keypress);
        assert_eq!(stroke.default_action, DefaultAction::Insert('A'));
    }

    #[test]
    fn punctuation_does_not_alias_arrow_codes() {
        for c in ['(', '&'] {
            let stroke = translate(&key(KeyCode::Char(c), KeyModifiers::SHIFT)).unwrap();
            assert_eq!(stroke.event.key_code, UNIDENTIFIED);
            assert_ne!(stroke.event.key_code, ARROW_DOWN);
            assert_ne!(stroke.event.key_code, ARROW_UP);
            assert_eq!(stroke.default_action, DefaultAction::Insert(c));
        }
    }

    #[test]
    fn navigation_keys_use_browser_codes() {
        let up = translate(&key(KeyCode::Up, KeyModifiers::NONE)).unwrap();
        assert_eq!(up.event.key_code, ARROW_UP);
        assert!(!up.fires_keypress);

        let enter = translate(&key(KeyCode::Enter, KeyModifiers::NONE)).unwrap();
        assert_eq!(enter.event.key_code, ENTER);
        assert_eq!(enter.default_action, DefaultAction::Submit);

        let back_tab = translate(&key(KeyCode::BackTab, KeyModifiers::SHIFT)).unwrap();
        assert_eq!(back_tab.event.key_code, TAB);
        assert!(back_tab.event.shift);
    }

    #[test]
    fn control_chords_other_than_undo_are_dropped() {
        let undo = translate(&key(KeyCode::Char('z'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(undo.default_action, DefaultAction::Undo);
        assert!(undo.event.ctrl);
        assert!(translate(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)).is_none());
        assert!(translate(&key(KeyCode::F(2), KeyModifiers::NONE)).is_none());
    }

    #[test]
    fn releases_are_ignored() {
        let mut release = key(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(translate(&release).is_none());
    }
}
