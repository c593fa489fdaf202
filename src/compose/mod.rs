//! The compose box: a recipient pill field and a message body, each with a
//! typeahead.
mod candidates;
mod tokens;

pub use candidates::{message_options, recipient_options, ComposeCandidate, Directory};
pub use tokens::{current_token, Token, TokenKind};

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::typeahead::{
    BlurEvent, BlurOutcome, EventFlow, InputField, KeyEvent, MenuPosition, Result, TextField,
    Typeahead, TypeaheadRegistry, TypeaheadSettings,
};

pub const RECIPIENT_FIELD: &str = "private_message_recipient";
pub const MESSAGE_FIELD: &str = "compose-textarea";
/// Id of the compose box container; focus moving inside it keeps menus open.
pub const COMPOSE_PARENT: &str = "compose";

/// One menu row, flattened for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub text: String,
    pub label: Option<String>,
    pub active: bool,
}

/// Type-erased view of a typeahead over an [`InputField`], so the host can
/// drive whichever field has focus.
pub trait ComposeWidget {
    fn keydown(&mut self, event: &mut KeyEvent);
    fn keypress(&mut self, event: &mut KeyEvent);
    fn keyup(&mut self, event: &mut KeyEvent);
    fn click(&mut self);
    fn blur(&mut self, event: &BlurEvent) -> BlurOutcome;
    fn blur_elapsed(&mut self);
    fn resize(&mut self);
    fn menu_mouse_enter(&mut self);
    fn menu_mouse_leave(&mut self);
    fn item_mouse_move(&mut self, index: usize);
    fn item_click(&mut self, index: usize, flow: &mut EventFlow) -> Result<()>;
    fn pump_replies(&mut self) -> usize;
    fn field(&self) -> &InputField;
    fn field_mut(&mut self) -> &mut InputField;
    fn is_shown(&self) -> bool;
    fn header(&self) -> Option<String>;
    fn rows(&self) -> Vec<MenuRow>;
    fn position(&self) -> Option<MenuPosition>;
}

impl<T: Clone + 'static> ComposeWidget for Typeahead<T, InputField> {
    fn keydown(&mut self, event: &mut KeyEvent) {
        Typeahead::keydown(self, event)
    }

    fn keypress(&mut self, event: &mut KeyEvent) {
        Typeahead::keypress(self, event)
    }

    fn keyup(&mut self, event: &mut KeyEvent) {
        Typeahead::keyup(self, event)
    }

    fn click(&mut self) {
        Typeahead::click(self)
    }

    fn blur(&mut self, event: &BlurEvent) -> BlurOutcome {
        Typeahead::blur(self, event)
    }

    fn blur_elapsed(&mut self) {
        Typeahead::blur_elapsed(self)
    }

    fn resize(&mut self) {
        Typeahead::resize(self)
    }

    fn menu_mouse_enter(&mut self) {
        Typeahead::menu_mouse_enter(self)
    }

    fn menu_mouse_leave(&mut self) {
        Typeahead::menu_mouse_leave(self)
    }

    fn item_mouse_move(&mut self, index: usize) {
        Typeahead::item_mouse_move(self, index)
    }

    fn item_click(&mut self, index: usize, flow: &mut EventFlow) -> Result<()> {
        Typeahead::item_click(self, index, flow)
    }

    fn pump_replies(&mut self) -> usize {
        Typeahead::pump_replies(self)
    }

    fn field(&self) -> &InputField {
        Typeahead::field(self)
    }

    fn field_mut(&mut self) -> &mut InputField {
        Typeahead::field_mut(self)
    }

    fn is_shown(&self) -> bool {
        Typeahead::is_shown(self)
    }

    fn header(&self) -> Option<String> {
        self.menu().header().map(str::to_string)
    }

    fn rows(&self) -> Vec<MenuRow> {
        self.menu()
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| MenuRow {
                text: entry.html.clone(),
                label: entry.option_label.clone(),
                active: self.active_index() == Some(i),
            })
            .collect()
    }

    fn position(&self) -> Option<MenuPosition> {
        self.menu().position()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeFocus {
    Recipient,
    Message,
}

impl ComposeFocus {
    pub fn field_id(self) -> &'static str {
        match self {
            ComposeFocus::Recipient => RECIPIENT_FIELD,
            ComposeFocus::Message => MESSAGE_FIELD,
        }
    }
}

/// Both compose fields and which one has focus.
pub struct ComposeBox {
    recipients: TypeaheadRegistry<String, InputField>,
    messages: TypeaheadRegistry<ComposeCandidate, InputField>,
    focus: ComposeFocus,
}

impl ComposeBox {
    pub fn new(
        directory: Arc<Directory>,
        settings: TypeaheadSettings,
        stream_delay: Option<Duration>,
    ) -> Self {
        let mut recipients = TypeaheadRegistry::new();
        recipients.create_typeahead(
            RECIPIENT_FIELD,
            InputField::content_editable(),
            recipient_options(&directory, settings.clone()),
        );

        let mut messages = TypeaheadRegistry::new();
        messages.create_typeahead(
            MESSAGE_FIELD,
            InputField::new(),
            message_options(directory, settings, stream_delay),
        );

        let mut compose = Self {
            recipients,
            messages,
            focus: ComposeFocus::Recipient,
        };
        compose.focused_mut().field_mut().focus();
        compose
    }

    pub fn focus(&self) -> ComposeFocus {
        self.focus
    }

    pub fn widget(&self, focus: ComposeFocus) -> &dyn ComposeWidget {
        let id = focus.field_id();
        let widget = match focus {
            ComposeFocus::Recipient => self.recipients.get(id).map(|w| w as &dyn ComposeWidget),
            ComposeFocus::Message => self.messages.get(id).map(|w| w as &dyn ComposeWidget),
        };
        // Both fields are registered in `new` and never removed.
        widget.unwrap_or_else(|| unreachable!("compose field {id} is always attached"))
    }

    pub fn widget_mut(&mut self, focus: ComposeFocus) -> &mut dyn ComposeWidget {
        let id = focus.field_id();
        let widget = match focus {
            ComposeFocus::Recipient => self
                .recipients
                .get_mut(id)
                .map(|w| w as &mut dyn ComposeWidget),
            ComposeFocus::Message => self
                .messages
                .get_mut(id)
                .map(|w| w as &mut dyn ComposeWidget),
        };
        widget.unwrap_or_else(|| unreachable!("compose field {id} is always attached"))
    }

    pub fn focused(&self) -> &dyn ComposeWidget {
        self.widget(self.focus)
    }

    pub fn focused_mut(&mut self) -> &mut dyn ComposeWidget {
        self.widget_mut(self.focus)
    }

    /// Moves focus to the other field. The blur of the field being left is
    /// returned so the host can schedule its deferred half.
    pub fn toggle_focus(&mut self) -> (ComposeFocus, BlurOutcome) {
        let leaving = self.focus;
        let next = match leaving {
            ComposeFocus::Recipient => ComposeFocus::Message,
            ComposeFocus::Message => ComposeFocus::Recipient,
        };
        let outcome = {
            let widget = self.widget_mut(leaving);
            widget.field_mut().blur();
            widget.blur(&BlurEvent::to_path([next.field_id(), COMPOSE_PARENT]))
        };
        self.focus = next;
        self.focused_mut().field_mut().focus();
        debug!("focus moved to {}", next.field_id());
        (leaving, outcome)
    }

    /// Committed recipients, in order.
    pub fn recipients(&self) -> &[String] {
        self.widget(ComposeFocus::Recipient).field().changes()
    }

    pub fn remove_last_recipient(&mut self) -> Option<String> {
        self.widget_mut(ComposeFocus::Recipient)
            .field_mut()
            .pop_change()
    }

    /// Clears the recipient box and reopens its suggestions.
    pub fn clear_recipients(&mut self) -> Result<()> {
        let field = self.widget_mut(ComposeFocus::Recipient).field_mut();
        field.take_changes();
        field.clear();
        self.recipients.trigger_lookup(RECIPIENT_FIELD)
    }

    /// Takes the drafted message, leaving the body empty.
    pub fn take_message(&mut self) -> Option<(Vec<String>, String)> {
        let body = self.widget(ComposeFocus::Message).field().value().trim().to_string();
        if body.is_empty() {
            return None;
        }
        self.widget_mut(ComposeFocus::Message).field_mut().clear();
        Some((self.recipients().to_vec(), body))
    }

    pub fn pump_replies(&mut self) -> usize {
        self.widget_mut(ComposeFocus::Recipient).pump_replies()
            + self.widget_mut(ComposeFocus::Message).pump_replies()
    }

    pub fn resize(&mut self) {
        self.widget_mut(ComposeFocus::Recipient).resize();
        self.widget_mut(ComposeFocus::Message).resize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeahead::keys::{ARROW_DOWN, ENTER};

    fn compose() -> ComposeBox {
        ComposeBox::new(
            Arc::new(Directory::default()),
            TypeaheadSettings::default(),
            None,
        )
    }

    fn type_text(widget: &mut dyn ComposeWidget, text: &str) {
        for c in text.chars() {
            let mut down = KeyEvent::character(c);
            widget.keydown(&mut down);
            let mut press = KeyEvent::character(c);
            widget.keypress(&mut press);
            widget.field_mut().type_char(c);
            let mut up = KeyEvent::character(c);
            widget.keyup(&mut up);
        }
    }

    fn enter(widget: &mut dyn ComposeWidget) {
        let mut down = KeyEvent::new(ENTER);
        widget.keydown(&mut down);
        let mut up = KeyEvent::new(ENTER);
        widget.keyup(&mut up);
    }

    #[test]
    fn recipient_commits_become_pills() {
        let mut compose = compose();
        type_text(compose.focused_mut(), "car");
        enter(compose.focused_mut());

        assert_eq!(compose.recipients(), ["carol"]);
        assert_eq!(compose.focused().field().value(), "");
        assert!(!compose.focused().is_shown());
    }

    #[test]
    fn clearing_recipients_reopens_the_full_list() {
        let mut compose = compose();
        type_text(compose.focused_mut(), "bo");
        enter(compose.focused_mut());
        compose.clear_recipients().unwrap();

        assert!(compose.recipients().is_empty());
        assert!(compose.focused().is_shown());
        assert_eq!(compose.focused().rows().len(), 6);
    }

    #[test]
    fn message_field_completes_streams_and_sends() {
        let mut compose = compose();
        type_text(compose.focused_mut(), "da");
        enter(compose.focused_mut());
        compose.toggle_focus();
        assert_eq!(compose.focus(), ComposeFocus::Message);

        type_text(compose.focused_mut(), "see #de");
        let mut down = KeyEvent::new(ARROW_DOWN);
        compose.focused_mut().keydown(&mut down);
        let rows = compose.focused().rows();
        assert!(rows[1].active);
        enter(compose.focused_mut());
        assert_eq!(compose.focused().field().value(), "see #**devel** ");

        let (to, body) = compose.take_message().unwrap();
        assert_eq!(to, ["dave"]);
        assert_eq!(body, "see #**devel**");
        assert!(compose.take_message().is_none());
    }

    #[test]
    fn leaving_a_field_defers_its_blur() {
        let mut compose = compose();
        type_text(compose.focused_mut(), "a");
        assert!(compose.focused().is_shown());

        let (left, outcome) = compose.toggle_focus();
        assert_eq!(left, ComposeFocus::Recipient);
        assert_eq!(outcome, BlurOutcome::Deferred(Duration::from_millis(150)));

        compose.widget_mut(left).blur_elapsed();
        assert!(!compose.widget(left).is_shown());
    }

    #[test]
    fn removing_a_pill() {
        let mut compose = compose();
        type_text(compose.focused_mut(), "eve");
        enter(compose.focused_mut());
        assert_eq!(compose.remove_last_recipient().as_deref(), Some("eve"));
        assert!(compose.recipients().is_empty());
    }
}
