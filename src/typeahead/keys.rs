//! Key codes and keyboard event plumbing for the typeahead.
//!
//! Key codes follow the browser `keyCode` numbering so that hosts can forward
//! whatever their platform produces after a single translation step.

pub const BACKSPACE: i32 = 8;
pub const TAB: i32 = 9;
pub const ENTER: i32 = 13;
pub const SHIFT: i32 = 16;
pub const ESCAPE: i32 = 27;
pub const ARROW_UP: i32 = 38;
pub const ARROW_DOWN: i32 = 40;

/// Reported for characters with no dedicated physical key code.
pub const UNIDENTIFIED: i32 = 0;

/// Pseudo key code for an Enter that belongs to an IME composition.
pub const COMPOSING_ENTER: i32 = -13;

/// Keys whose keydown already performs navigation or commit work.
const NAVIGATION_KEYS: [i32; 5] = [ARROW_DOWN, ARROW_UP, TAB, ENTER, ESCAPE];

/// What the handlers decided about the browser-level fate of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFlow {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl EventFlow {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// A keyboard event as seen by the typeahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Raw key code.
    pub key_code: i32,
    /// The printable character, if any.
    pub key: Option<char>,
    /// Whether the key is part of an IME composition.
    pub is_composing: bool,
    pub shift: bool,
    pub ctrl: bool,
    flow: EventFlow,
}

impl KeyEvent {
    pub fn new(key_code: i32) -> Self {
        Self {
            key_code,
            key: None,
            is_composing: false,
            shift: false,
            ctrl: false,
            flow: EventFlow::default(),
        }
    }

    /// A printable key. Letters, digits and space carry their browser key
    /// codes; everything else is [`UNIDENTIFIED`] so punctuation such as `(`
    /// or `&` never reads as an arrow key.
    pub fn character(c: char) -> Self {
        let code = match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | ' ' => c.to_ascii_uppercase() as i32,
            _ => UNIDENTIFIED,
        };
        Self {
            key: Some(c),
            ..Self::new(code)
        }
    }

    pub fn composing(mut self) -> Self {
        self.is_composing = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// The key code used for dispatch. An Enter pressed to confirm an IME
    /// composition maps to [`COMPOSING_ENTER`] so it never commits a choice.
    pub fn pseudo_key_code(&self) -> i32 {
        if self.key_code == ENTER && self.is_composing {
            COMPOSING_ENTER
        } else {
            self.key_code
        }
    }

    pub fn prevent_default(&mut self) {
        self.flow.prevent_default();
    }

    pub fn stop_propagation(&mut self) {
        self.flow.stop_propagation();
    }

    pub fn default_prevented(&self) -> bool {
        self.flow.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.flow.propagation_stopped
    }

    pub fn flow(&self) -> EventFlow {
        self.flow
    }
}

/// Carries the keydown decision over to the keypress that follows it.
///
/// Some browsers fire both keydown and keypress for the same navigation key.
/// This exists only to cope with that duplication. Keypress consumes the
/// decision once; any further keypress before the next keydown only gets the
/// propagation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPressGate {
    /// Keypress runs navigation again.
    #[default]
    Forward,
    /// Keypress only applies the propagation policy.
    Suppress,
}

impl KeyPressGate {
    /// Set from keydown's pseudo key code.
    pub fn arm(&mut self, pseudo_key_code: i32) {
        *self = if NAVIGATION_KEYS.contains(&pseudo_key_code) {
            KeyPressGate::Forward
        } else {
            KeyPressGate::Suppress
        };
    }

    /// Read by keypress, exactly once.
    pub fn take(&mut self) -> KeyPressGate {
        std::mem::replace(self, KeyPressGate::Suppress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composing_enter_maps_to_sentinel() {
        let event = KeyEvent::new(ENTER).composing();
        assert_eq!(event.pseudo_key_code(), COMPOSING_ENTER);
        assert_eq!(KeyEvent::new(ENTER).pseudo_key_code(), ENTER);
    }

    #[test]
    fn composing_does_not_touch_other_keys() {
        let event = KeyEvent::new(ARROW_DOWN).composing();
        assert_eq!(event.pseudo_key_code(), ARROW_DOWN);
    }

    #[test]
    fn gate_is_consumed_once_and_then_suppresses() {
        let mut gate = KeyPressGate::default();
        gate.arm(KeyEvent::character('a').key_code);
        assert_eq!(gate.take(), KeyPressGate::Suppress);
        assert_eq!(gate.take(), KeyPressGate::Suppress);
        gate.arm(ARROW_DOWN);
        assert_eq!(gate.take(), KeyPressGate::Forward);
        assert_eq!(gate.take(), KeyPressGate::Suppress);
    }

    #[test]
    fn gate_forwards_navigation_keys() {
        let mut gate = KeyPressGate::default();
        for code in NAVIGATION_KEYS {
            gate.arm(code);
            assert_eq!(gate.take(), KeyPressGate::Forward);
        }
    }

    #[test]
    fn punctuation_never_shares_a_navigation_code() {
        for c in ['(', '&', '%', '\'', '.', 'é'] {
            let event = KeyEvent::character(c);
            assert_eq!(event.key_code, UNIDENTIFIED, "{c}");
            assert_eq!(event.key, Some(c));
        }
        assert_eq!(KeyEvent::character('q').key_code, 'Q' as i32);
        assert_eq!(KeyEvent::character('7').key_code, '7' as i32);
        assert_eq!(KeyEvent::character(' ').key_code, 32);
    }

    #[test]
    fn flow_flags_record_calls() {
        let mut event = KeyEvent::character('x');
        assert!(!event.default_prevented());
        event.prevent_default();
        event.stop_propagation();
        assert_eq!(
            event.flow(),
            EventFlow {
                default_prevented: true,
                propagation_stopped: true
            }
        );
    }
}
