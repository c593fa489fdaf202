//! Terminal host for the compose box.
//!
//! Crossterm input is translated into browser-style key events and fed to
//! whichever compose field has focus; menus are drawn where the typeahead
//! positioned them.
pub mod event;
pub mod keymap;
pub mod runner;
pub mod state;
pub mod terminal;

pub use event::UIEvent;
pub use keymap::{translate, DefaultAction, Keystroke};
pub use runner::run_tui;
pub use state::{SentMessage, UIMode, UIState};
pub use terminal::TerminalUI;
