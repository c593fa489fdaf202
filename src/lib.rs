//! Typeahead for a group-chat compose box, with a terminal host to drive it.
pub mod app;
pub mod compose;
pub mod logging;
pub mod typeahead;
pub mod ui;
