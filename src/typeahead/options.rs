//! Per-instance configuration.
//!
//! Scalar settings live in [`TypeaheadSettings`], which can be loaded from a
//! JSON file. Behavior hooks live in [`TypeaheadOptions`] and are fixed once
//! the widget is created.
use std::fmt;

use serde::{Deserialize, Serialize};

use super::keys::KeyEvent;
use super::matching::{default_matcher, default_sorter, Matcher, Sorter};
use super::source::Source;

pub const DEFAULT_ITEMS: usize = 8;
pub const DEFAULT_MIN_LENGTH: usize = 1;
pub const DEFAULT_BLUR_DELAY_MS: u64 = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeaheadSettings {
    /// Maximum number of suggestions rendered.
    pub items: usize,
    /// Shortest query that triggers a lookup.
    pub min_length: usize,
    /// Stop propagation of every key, even whitelisted ones.
    pub stop_advance: bool,
    pub dropup: bool,
    /// Position against the viewport instead of the document.
    pub fixed: bool,
    /// Raw key codes allowed to reach parent handlers on Tab/Enter.
    pub advance_key_codes: Vec<i32>,
    /// Arrow navigation writes the highlighted value into the field.
    pub natural_search: bool,
    pub tab_is_enter: bool,
    /// Look up even when the query is empty or short.
    pub help_on_empty_strings: bool,
    /// Backspace down to an empty query hides instead of helping.
    pub hide_on_empty: bool,
    /// Key codes ignored by keyup, e.g. Shift in a topic field.
    pub ignored_key_codes: Vec<i32>,
    /// Host-provided parent of the menu; disables automatic positioning.
    pub parent_element: Option<String>,
    pub blur_delay_ms: u64,
    /// Height of one menu row, in the host's units.
    pub menu_row_height: f64,
}

impl Default for TypeaheadSettings {
    fn default() -> Self {
        Self {
            items: DEFAULT_ITEMS,
            min_length: DEFAULT_MIN_LENGTH,
            stop_advance: false,
            dropup: false,
            fixed: false,
            advance_key_codes: Vec::new(),
            natural_search: false,
            tab_is_enter: true,
            help_on_empty_strings: false,
            hide_on_empty: false,
            ignored_key_codes: Vec::new(),
            parent_element: None,
            blur_delay_ms: DEFAULT_BLUR_DELAY_MS,
            menu_row_height: 1.0,
        }
    }
}

/// Why a candidate is being written into the field.
#[derive(Debug, Clone, Copy)]
pub enum CommitCause<'a> {
    Key(&'a KeyEvent),
    Click,
    /// The automated predicate accepted the match without showing the menu.
    Automated,
    /// Arrow navigation with natural search on.
    Navigation,
}

pub type Highlighter<T> = Box<dyn Fn(&T) -> String>;
/// Returns the new field text for a chosen candidate, given the current query.
pub type Updater<T> = Box<dyn Fn(&T, &str, &CommitCause<'_>) -> String>;
pub type OptionLabel<T> = Box<dyn Fn(&[T], &T) -> Option<String>>;
pub type Hook = Box<dyn Fn()>;

pub struct TypeaheadOptions<T> {
    pub(crate) source: Source<T>,
    pub(crate) matcher: Box<dyn Matcher<T>>,
    pub(crate) sorter: Box<dyn Sorter<T>>,
    pub(crate) highlighter: Highlighter<T>,
    pub(crate) updater: Updater<T>,
    pub(crate) automated: Box<dyn Fn(&str) -> bool>,
    pub(crate) trigger_selection: Box<dyn Fn(&KeyEvent) -> bool>,
    pub(crate) header_html: Option<Box<dyn Fn() -> Option<String>>>,
    pub(crate) option_label: Option<OptionLabel<T>>,
    pub(crate) on_escape: Option<Hook>,
    pub(crate) close_input_field_on_hide: Option<Hook>,
    pub(crate) open_input_field_on_key_up: Option<Hook>,
    pub(crate) settings: TypeaheadSettings,
}

impl<T: AsRef<str> + 'static> TypeaheadOptions<T> {
    /// Options for string-like candidates: substring matching, bucketed
    /// sorting, and an updater that writes the candidate text verbatim.
    pub fn new<H>(source: impl Into<Source<T>>, highlighter: H) -> Self
    where
        H: Fn(&T) -> String + 'static,
    {
        Self::with_callbacks(
            source,
            default_matcher::<T>,
            default_sorter::<T>,
            highlighter,
            |item: &T, _query: &str, _cause: &CommitCause<'_>| item.as_ref().to_string(),
        )
    }
}

impl<T: 'static> TypeaheadOptions<T> {
    /// Options for arbitrary candidates, which have no default text form.
    pub fn with_callbacks<M, S, H, U>(
        source: impl Into<Source<T>>,
        matcher: M,
        sorter: S,
        highlighter: H,
        updater: U,
    ) -> Self
    where
        M: Matcher<T> + 'static,
        S: Sorter<T> + 'static,
        H: Fn(&T) -> String + 'static,
        U: Fn(&T, &str, &CommitCause<'_>) -> String + 'static,
    {
        Self {
            source: source.into(),
            matcher: Box::new(matcher),
            sorter: Box::new(sorter),
            highlighter: Box::new(highlighter),
            updater: Box::new(updater),
            automated: Box::new(|_| false),
            trigger_selection: Box::new(|_| false),
            header_html: None,
            option_label: None,
            on_escape: None,
            close_input_field_on_hide: None,
            open_input_field_on_key_up: None,
            settings: TypeaheadSettings::default(),
        }
    }

    pub fn matcher(mut self, matcher: impl Matcher<T> + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn sorter(mut self, sorter: impl Sorter<T> + 'static) -> Self {
        self.sorter = Box::new(sorter);
        self
    }

    pub fn updater(
        mut self,
        updater: impl Fn(&T, &str, &CommitCause<'_>) -> String + 'static,
    ) -> Self {
        self.updater = Box::new(updater);
        self
    }

    pub fn automated(mut self, automated: impl Fn(&str) -> bool + 'static) -> Self {
        self.automated = Box::new(automated);
        self
    }

    pub fn trigger_selection(mut self, trigger: impl Fn(&KeyEvent) -> bool + 'static) -> Self {
        self.trigger_selection = Box::new(trigger);
        self
    }

    pub fn header_html(mut self, header: impl Fn() -> Option<String> + 'static) -> Self {
        self.header_html = Some(Box::new(header));
        self
    }

    pub fn option_label(mut self, label: impl Fn(&[T], &T) -> Option<String> + 'static) -> Self {
        self.option_label = Some(Box::new(label));
        self
    }

    pub fn on_escape(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_escape = Some(Box::new(hook));
        self
    }

    pub fn close_input_field_on_hide(mut self, hook: impl Fn() + 'static) -> Self {
        self.close_input_field_on_hide = Some(Box::new(hook));
        self
    }

    pub fn open_input_field_on_key_up(mut self, hook: impl Fn() + 'static) -> Self {
        self.open_input_field_on_key_up = Some(Box::new(hook));
        self
    }

    pub fn settings(mut self, settings: TypeaheadSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn items(mut self, items: usize) -> Self {
        self.settings.items = items;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.settings.min_length = min_length;
        self
    }

    pub fn natural_search(mut self, on: bool) -> Self {
        self.settings.natural_search = on;
        self
    }

    pub fn help_on_empty_strings(mut self, on: bool) -> Self {
        self.settings.help_on_empty_strings = on;
        self
    }

    pub fn parent_element(mut self, parent: impl Into<String>) -> Self {
        self.settings.parent_element = Some(parent.into());
        self
    }

    pub fn current_settings(&self) -> &TypeaheadSettings {
        &self.settings
    }
}

impl<T> fmt::Debug for TypeaheadOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeaheadOptions")
            .field("source", &self.source)
            .field("settings", &self.settings)
            .field("header_html", &self.header_html.is_some())
            .field("option_label", &self.option_label.is_some())
            .field("on_escape", &self.on_escape.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: TypeaheadSettings =
            serde_json::from_str(r#"{ "items": 5, "dropup": true }"#).unwrap();
        assert_eq!(settings.items, 5);
        assert!(settings.dropup);
        assert_eq!(settings.min_length, DEFAULT_MIN_LENGTH);
        assert!(settings.tab_is_enter);
        assert_eq!(settings.blur_delay_ms, 150);
    }

    #[test]
    fn string_options_use_identity_updater() {
        let options = TypeaheadOptions::new(vec!["alpha".to_string()], |s: &String| s.clone());
        let item = "alpha".to_string();
        assert_eq!((options.updater)(&item, "al", &CommitCause::Click), "alpha");
        assert!(options.matcher.matches(&item, "LP"));
    }
}
