//! A reusable typeahead for text fields.
//!
//! A [`Typeahead`] reads the bound field, asks its [`Source`] for candidates,
//! filters and orders them, and renders the best few into a [`Menu`]. Arrow
//! keys and the pointer move the active entry; Enter, Tab, a click or a custom
//! trigger commit it back into the field through a minimal diff so that undo
//! restores exactly what the user typed.
//!
//! The widget knows nothing about a particular toolkit. Hosts implement
//! [`TextField`] for their input element, forward key and pointer events, and
//! draw [`Menu`] however they like.
pub mod diff;
pub mod error;
pub mod field;
pub mod keys;
pub mod matching;
pub mod menu;
pub mod navigator;
pub mod options;
pub mod position;
pub mod registry;
pub mod source;
pub mod widget;

pub use diff::{string_diff, StringDiff};
pub use error::{Result, TypeaheadError};
pub use field::{InputField, TextField};
pub use keys::{EventFlow, KeyEvent};
pub use matching::{default_matcher, default_sorter, Matcher, Sorter};
pub use menu::{Menu, MenuEntry};
pub use navigator::Navigator;
pub use options::{CommitCause, TypeaheadOptions, TypeaheadSettings};
pub use position::{FieldGeometry, MenuPosition, Rect};
pub use registry::TypeaheadRegistry;
pub use source::{Responder, Source, SourceReply};
pub use widget::{BlurEvent, BlurOutcome, Typeahead};
