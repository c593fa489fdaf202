use crossterm::event::{KeyEvent, MouseEvent};

use crate::compose::ComposeFocus;

#[derive(Debug)]
pub enum UIEvent {
    KeyPress(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The terminal window lost focus.
    FocusLost,
    /// A deferred blur on this field is due.
    BlurElapsed(ComposeFocus),
    Tick,
}
