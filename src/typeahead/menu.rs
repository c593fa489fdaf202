//! The rendered suggestion panel.
use super::position::MenuPosition;

/// One rendered suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry<T> {
    /// The candidate this entry commits.
    pub value: T,
    /// Markup produced by the highlighter.
    pub html: String,
    /// Annotation from the option label callback; its presence marks the
    /// entry as labelled.
    pub option_label: Option<String>,
    /// Set while a hover is ignored because the pointer has not moved since
    /// the menu opened.
    pub pointer_disabled: bool,
}

impl<T> MenuEntry<T> {
    pub fn has_option_label(&self) -> bool {
        self.option_label.is_some()
    }
}

/// Container, header bar and list for one typeahead. The whole list is
/// replaced on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu<T> {
    entries: Vec<MenuEntry<T>>,
    header: Option<String>,
    visible: bool,
    hovered: bool,
    position: Option<MenuPosition>,
}

impl<T> Default for Menu<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            header: None,
            visible: false,
            hovered: false,
            position: None,
        }
    }
}

impl<T> Menu<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_entries(&mut self, entries: Vec<MenuEntry<T>>) {
        self.entries = entries;
    }

    pub fn set_header(&mut self, header: Option<String>) {
        self.header = header;
    }

    pub fn entries(&self) -> &[MenuEntry<T>] {
        &self.entries
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut MenuEntry<T>> {
        self.entries.get_mut(index)
    }

    pub fn entry(&self, index: usize) -> Option<&MenuEntry<T>> {
        self.entries.get(index)
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// `None` when the host places the container itself.
    pub fn position(&self) -> Option<MenuPosition> {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Option<MenuPosition>) {
        self.position = position;
    }

    /// Rows taken by the container: one per entry plus the header bar.
    pub fn row_count(&self) -> usize {
        self.entries.len() + usize::from(self.header.is_some())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.header = None;
        self.visible = false;
        self.hovered = false;
        self.position = None;
    }
}
