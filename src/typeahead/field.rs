//! The element a typeahead is bound to.
use super::error::{Result, TypeaheadError};
use super::position::FieldGeometry;

/// Host-side view of the bound text element.
///
/// Offsets are byte offsets into [`TextField::text`].
pub trait TextField {
    /// Rich-text style fields are read through their text content and are
    /// cleared after a commit; plain inputs get an undoable replacement.
    fn is_content_editable(&self) -> bool;

    fn text(&self) -> String;

    /// Overwrites the whole content without touching undo history.
    fn set_text(&mut self, text: &str);

    fn select_range(&mut self, start: usize, end: usize) -> Result<()>;

    /// Replaces the current selection, preserving the undo stack.
    fn insert_text(&mut self, text: &str);

    /// Notifies the field's change listeners.
    fn dispatch_change(&mut self);

    fn focus(&mut self);

    fn geometry(&self) -> FieldGeometry;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    value: String,
    selection: (usize, usize),
}

/// In-memory text field with selection, an undo stack, and a change log.
///
/// A content-editable field treats each change event as its listener would:
/// the text present at that moment is recorded as a committed entry (a pill
/// in the recipient box).
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: String,
    selection: (usize, usize),
    content_editable: bool,
    focused: bool,
    undo_stack: Vec<Snapshot>,
    changes: Vec<String>,
    geometry: FieldGeometry,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_editable() -> Self {
        Self {
            content_editable: true,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.value = text.to_string();
        self.selection = (text.len(), text.len());
        self
    }

    pub fn with_geometry(mut self, geometry: FieldGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn set_geometry(&mut self, geometry: FieldGeometry) {
        self.geometry = geometry;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.selection.1
    }

    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Text captured by change events, oldest first.
    pub fn changes(&self) -> &[String] {
        &self.changes
    }

    pub fn take_changes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.changes)
    }

    pub fn pop_change(&mut self) -> Option<String> {
        self.changes.pop()
    }

    /// Types one character at the cursor.
    pub fn type_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_text(c.encode_utf8(&mut buf));
    }

    /// Deletes the selection, or the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        let (start, end) = self.selection;
        if start != end {
            self.insert_text("");
            return true;
        }
        let Some((prev, _)) = self.value[..start].char_indices().next_back() else {
            return false;
        };
        self.selection = (prev, start);
        self.insert_text("");
        true
    }

    pub fn move_left(&mut self) {
        let cursor = self.cursor();
        let target = self.value[..cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.selection = (target, target);
    }

    pub fn move_right(&mut self) {
        let cursor = self.cursor();
        let target = self.value[cursor..]
            .chars()
            .next()
            .map(|c| cursor + c.len_utf8())
            .unwrap_or(cursor);
        self.selection = (target, target);
    }

    pub fn move_home(&mut self) {
        self.selection = (0, 0);
    }

    pub fn move_end(&mut self) {
        let len = self.value.len();
        self.selection = (len, len);
    }

    /// Reverts the most recent insertion.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                self.value = snapshot.value;
                self.selection = snapshot.selection;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.selection = (0, 0);
    }
}

impl TextField for InputField {
    fn is_content_editable(&self) -> bool {
        self.content_editable
    }

    fn text(&self) -> String {
        self.value.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.value = text.to_string();
        self.selection = (text.len(), text.len());
    }

    fn select_range(&mut self, start: usize, end: usize) -> Result<()> {
        let len = self.value.len();
        if start > end
            || end > len
            || !self.value.is_char_boundary(start)
            || !self.value.is_char_boundary(end)
        {
            return Err(TypeaheadError::InvalidRange { start, end, len });
        }
        self.selection = (start, end);
        Ok(())
    }

    fn insert_text(&mut self, text: &str) {
        self.undo_stack.push(Snapshot {
            value: self.value.clone(),
            selection: self.selection,
        });
        let (start, end) = self.selection;
        self.value.replace_range(start..end, text);
        let cursor = start + text.len();
        self.selection = (cursor, cursor);
    }

    fn dispatch_change(&mut self) {
        if self.content_editable && !self.value.is_empty() {
            self.changes.push(self.value.clone());
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn geometry(&self) -> FieldGeometry {
        self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace_follow_the_cursor() {
        let mut field = InputField::new();
        for c in "héllo".chars() {
            field.type_char(c);
        }
        assert_eq!(field.value(), "héllo");
        field.move_left();
        field.move_left();
        field.move_left();
        field.move_left();
        assert!(field.backspace());
        assert_eq!(field.value(), "éllo");
        assert_eq!(field.cursor(), 0);
        assert!(!field.backspace());
    }

    #[test]
    fn insert_replaces_selection_and_undo_restores_it() {
        let mut field = InputField::new().with_text("#ann is for updates");
        field.select_range(1, 4).unwrap();
        field.insert_text("**announce**");
        assert_eq!(field.value(), "#**announce** is for updates");
        assert_eq!(field.cursor(), 13);

        assert!(field.undo());
        assert_eq!(field.value(), "#ann is for updates");
        assert_eq!(field.selection(), (1, 4));
    }

    #[test]
    fn select_range_rejects_bad_offsets() {
        let mut field = InputField::new().with_text("é");
        assert_eq!(
            field.select_range(1, 2),
            Err(TypeaheadError::InvalidRange {
                start: 1,
                end: 2,
                len: 2
            })
        );
        assert!(field.select_range(0, 3).is_err());
        assert!(field.select_range(0, 2).is_ok());
    }

    #[test]
    fn change_events_on_content_editable_record_text() {
        let mut field = InputField::content_editable();
        field.set_text("alice@example.com");
        field.dispatch_change();
        field.set_text("");
        field.dispatch_change();
        assert_eq!(field.changes(), ["alice@example.com"]);

        let mut plain = InputField::new().with_text("x");
        plain.dispatch_change();
        assert!(plain.changes().is_empty());
    }
}
