//! The typeahead widget: lookup pipeline, navigation, and commit.
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::diff::string_diff;
use super::error::{Result, TypeaheadError};
use super::field::TextField;
use super::keys::{
    EventFlow, KeyEvent, KeyPressGate, ARROW_DOWN, ARROW_UP, BACKSPACE, ENTER, ESCAPE, TAB,
};
use super::menu::{Menu, MenuEntry};
use super::navigator::Navigator;
use super::options::{CommitCause, TypeaheadOptions, TypeaheadSettings};
use super::position::menu_position;
use super::source::{Responder, Source, SourceReply};

/// Focus leaving the bound field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlurEvent {
    /// Ids from the newly focused element up to the root; empty when focus
    /// left the page.
    pub related_target_path: Vec<String>,
}

impl BlurEvent {
    pub fn to_outside() -> Self {
        Self::default()
    }

    pub fn to_path<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            related_target_path: path.into_iter().map(Into::into).collect(),
        }
    }
}

/// What a blur asks the host to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurOutcome {
    /// Focus moved within the configured parent; the menu stays.
    Kept,
    /// Call [`Typeahead::blur_elapsed`] after this delay.
    Deferred(Duration),
}

/// A typeahead bound to one text field.
pub struct Typeahead<T, F> {
    field: F,
    options: TypeaheadOptions<T>,
    query: String,
    shown: bool,
    menu: Menu<T>,
    navigator: Navigator,
    key_press_gate: KeyPressGate,
    lookup_seq: u64,
    reply_tx: mpsc::UnboundedSender<SourceReply<T>>,
    reply_rx: mpsc::UnboundedReceiver<SourceReply<T>>,
}

impl<T, F> Typeahead<T, F>
where
    T: Clone + 'static,
    F: TextField,
{
    pub fn new(field: F, options: TypeaheadOptions<T>) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            field,
            options,
            query: String::new(),
            shown: false,
            menu: Menu::new(),
            navigator: Navigator::new(),
            key_press_gate: KeyPressGate::default(),
            lookup_seq: 0,
            reply_tx,
            reply_rx,
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn menu(&self) -> &Menu<T> {
        &self.menu
    }

    pub fn active_index(&self) -> Option<usize> {
        self.navigator.active()
    }

    pub fn active_value(&self) -> Option<&T> {
        self.navigator
            .active()
            .and_then(|i| self.menu.entry(i))
            .map(|entry| &entry.value)
    }

    pub fn settings(&self) -> &TypeaheadSettings {
        &self.options.settings
    }

    pub fn lookup_seq(&self) -> u64 {
        self.lookup_seq
    }

    /// Reads the field and asks the source for candidates.
    ///
    /// `force_hide_on_empty` applies the length gate even when
    /// `help_on_empty_strings` is set.
    pub fn lookup(&mut self, force_hide_on_empty: bool) {
        // Every lookup supersedes replies still in flight, gated or not.
        self.lookup_seq += 1;
        self.query = self.field.text();
        let settings = &self.options.settings;

        let too_short =
            self.query.is_empty() || self.query.chars().count() < settings.min_length;
        if (!settings.help_on_empty_strings || force_hide_on_empty) && too_short {
            trace!("query {:?} below minimum length, skipping lookup", self.query);
            if self.shown {
                self.hide();
            }
            return;
        }

        let items = match &self.options.source {
            Source::Static(items) => Some(items.clone()),
            Source::Provider(provider) => {
                let responder =
                    Responder::new(self.lookup_seq, self.query.clone(), self.reply_tx.clone());
                provider(&self.query, responder)
            }
        };

        match items {
            Some(items) => self.process(items),
            None => {
                debug!(
                    "lookup {} for {:?} pending on async source",
                    self.lookup_seq, self.query
                );
                if self.shown {
                    self.hide();
                }
            }
        }
    }

    /// Filters, orders and presents candidates for the current query.
    pub fn process(&mut self, items: Vec<T>) {
        let matching: Vec<T> = items
            .into_iter()
            .filter(|item| self.options.matcher.matches(item, &self.query))
            .collect();
        let final_items = self.options.sorter.sort(matching.clone(), &self.query);

        let Some(first) = final_items.first() else {
            trace!("no candidates match {:?}", self.query);
            if self.shown {
                self.hide();
            }
            return;
        };

        if (self.options.automated)(&self.query) {
            debug!("automated selection for {:?}", self.query);
            let first = first.clone();
            if let Err(e) = self.commit(&first, CommitCause::Automated) {
                debug!("automated commit failed: {}", e);
            }
            self.hide();
            return;
        }

        let shown: Vec<T> = final_items
            .into_iter()
            .take(self.options.settings.items)
            .collect();
        self.render(shown, &matching);
        self.show();
    }

    /// Rebuilds the menu from scratch. The first entry becomes active.
    ///
    /// `matching` is the full match list, handed to the option label callback
    /// so labels can refer to matches that were cut off.
    pub fn render(&mut self, final_items: Vec<T>, matching: &[T]) {
        let entries: Vec<MenuEntry<T>> = final_items
            .into_iter()
            .map(|value| {
                let html = (self.options.highlighter)(&value);
                let option_label = self
                    .options
                    .option_label
                    .as_ref()
                    .and_then(|label| label(matching, &value))
                    .filter(|label| !label.is_empty());
                MenuEntry {
                    value,
                    html,
                    option_label,
                    pointer_disabled: false,
                }
            })
            .collect();

        self.navigator.reset(entries.len());
        self.menu.replace_entries(entries);

        let header = self
            .options
            .header_html
            .as_ref()
            .and_then(|header| header())
            .filter(|header| !header.is_empty());
        self.menu.set_header(header);
    }

    /// Positions and reveals the menu.
    pub fn show(&mut self) {
        let settings = &self.options.settings;
        let position = if settings.parent_element.is_some() {
            None
        } else {
            let height = self.menu.row_count() as f64 * settings.menu_row_height;
            Some(menu_position(
                &self.field.geometry(),
                height,
                settings.fixed,
                settings.dropup,
            ))
        };

        self.menu.set_position(position);
        self.menu.set_visible(true);
        self.shown = true;
        self.navigator.arm_mouse_guard();
    }

    pub fn hide(&mut self) {
        self.menu.set_visible(false);
        self.shown = false;
        if let Some(hook) = &self.options.close_input_field_on_hide {
            hook();
        }
    }

    /// Commits the active suggestion and hides the menu.
    ///
    /// With nothing active the field is left alone, the menu is still hidden,
    /// and [`TypeaheadError::NoActiveItem`] is returned.
    pub fn select(&mut self, cause: CommitCause<'_>) -> Result<()> {
        let result = match self.active_value().cloned() {
            Some(value) => self.commit(&value, cause),
            None => Err(TypeaheadError::NoActiveItem),
        };
        self.hide();
        result
    }

    fn commit(&mut self, value: &T, cause: CommitCause<'_>) -> Result<()> {
        let after = (self.options.updater)(value, &self.query, &cause);

        if self.field.is_content_editable() {
            // The change listener turns the text into markup; the raw text
            // must not stay behind.
            self.field.set_text(&after);
            self.field.dispatch_change();
            self.field.set_text("");
            debug!("committed {:?} into content-editable field", after);
            return Ok(());
        }

        let before = self.field.text();
        let diff = string_diff(&before, &after);
        if !diff.is_empty() {
            self.field.select_range(diff.start, diff.end_before)?;
            self.field.insert_text(&after[diff.start..diff.end_after]);
        }
        self.field.dispatch_change();
        debug!(
            "committed {:?}, replaced {}..{}",
            after, diff.start, diff.end_before
        );
        Ok(())
    }

    pub fn next(&mut self) {
        self.navigator.next();
        self.write_active_for_natural_search();
    }

    pub fn prev(&mut self) {
        self.navigator.prev();
        self.write_active_for_natural_search();
    }

    fn write_active_for_natural_search(&mut self) {
        if !self.options.settings.natural_search {
            return;
        }
        if let Some(value) = self.active_value().cloned() {
            let text = (self.options.updater)(&value, &self.query, &CommitCause::Navigation);
            self.field.set_text(&text);
        }
    }

    pub fn keydown(&mut self, event: &mut KeyEvent) {
        if (self.options.trigger_selection)(&*event) && self.shown {
            event.prevent_default();
            if let Err(e) = self.select(CommitCause::Key(&*event)) {
                debug!("custom trigger commit failed: {}", e);
            }
        }
        self.key_press_gate.arm(event.pseudo_key_code());
        self.navigate(event);
    }

    pub fn keypress(&mut self, event: &mut KeyEvent) {
        match self.key_press_gate.take() {
            KeyPressGate::Forward => self.navigate(event),
            KeyPressGate::Suppress => self.maybe_stop_advance(event),
        }
    }

    pub fn keyup(&mut self, event: &mut KeyEvent) {
        match event.pseudo_key_code() {
            ARROW_DOWN | ARROW_UP => {}
            TAB => {
                if !self.options.settings.tab_is_enter || !self.shown {
                    return;
                }
                self.select_from_key(event);
            }
            ENTER => {
                if !self.shown {
                    return;
                }
                self.select_from_key(event);
            }
            ESCAPE => {
                if !self.shown {
                    return;
                }
                self.hide();
                if let Some(hook) = &self.options.on_escape {
                    hook();
                }
            }
            _ => {
                if self
                    .options
                    .settings
                    .ignored_key_codes
                    .contains(&event.key_code)
                {
                    return;
                }
                if !self.shown {
                    if let Some(hook) = &self.options.open_input_field_on_key_up {
                        hook();
                    }
                }
                let force_hide_on_empty =
                    self.options.settings.hide_on_empty && event.key_code == BACKSPACE;
                self.lookup(force_hide_on_empty);
            }
        }

        self.maybe_stop_advance(event);
        event.prevent_default();
    }

    fn select_from_key(&mut self, event: &KeyEvent) {
        if let Err(e) = self.select(CommitCause::Key(event)) {
            debug!("commit on key {} failed: {}", event.key_code, e);
        }
    }

    /// Keyboard navigation shared by keydown and keypress.
    pub fn navigate(&mut self, event: &mut KeyEvent) {
        if !self.shown {
            return;
        }

        match event.pseudo_key_code() {
            TAB => {
                if self.options.settings.tab_is_enter {
                    event.prevent_default();
                }
            }
            ENTER | ESCAPE => event.prevent_default(),
            ARROW_UP => {
                event.prevent_default();
                self.prev();
            }
            ARROW_DOWN => {
                event.prevent_default();
                self.next();
            }
            _ => {}
        }

        self.maybe_stop_advance(event);
    }

    /// Stops propagation unless the raw key code is whitelisted and the key
    /// is a Tab or Enter that `stop_advance` does not hold back.
    pub fn maybe_stop_advance(&self, event: &mut KeyEvent) {
        let settings = &self.options.settings;
        let pseudo = event.pseudo_key_code();
        let passes_through = settings.advance_key_codes.contains(&event.key_code)
            && !settings.stop_advance
            && (pseudo == TAB || pseudo == ENTER);
        if !passes_through {
            event.stop_propagation();
        }
    }

    pub fn blur(&mut self, event: &BlurEvent) -> BlurOutcome {
        if let Some(parent) = &self.options.settings.parent_element {
            if event.related_target_path.iter().any(|id| id == parent) {
                trace!("focus moved inside {}, keeping menu", parent);
                return BlurOutcome::Kept;
            }
        }
        BlurOutcome::Deferred(Duration::from_millis(self.options.settings.blur_delay_ms))
    }

    /// Second half of a blur, run once the delay has passed.
    pub fn blur_elapsed(&mut self) {
        if !self.menu.is_hovered() {
            self.hide();
        } else if self.shown {
            self.field.focus();
        }
    }

    /// Clicking into the field refreshes the suggestions.
    pub fn click(&mut self) {
        self.lookup(false);
    }

    pub fn resize(&mut self) {
        if self.shown {
            self.show();
        }
    }

    pub fn menu_mouse_enter(&mut self) {
        self.menu.set_hovered(true);
    }

    pub fn menu_mouse_leave(&mut self) {
        self.menu.set_hovered(false);
    }

    /// Hovering an entry activates it, unless the pointer has not moved since
    /// the menu opened under it.
    pub fn item_mouse_enter(&mut self, index: usize) {
        let moved = self.navigator.mouse_moved_since_show();
        if let Some(entry) = self.menu.entry_mut(index) {
            entry.pointer_disabled = !moved;
        }
        if moved {
            self.navigator.activate(index);
        }
    }

    pub fn item_mouse_move(&mut self, index: usize) {
        if self.navigator.note_mouse_move() {
            self.item_mouse_enter(index);
        }
    }

    /// Activates and commits the clicked entry. The click never reaches the
    /// browser default or ancestor handlers.
    pub fn item_click(&mut self, index: usize, flow: &mut EventFlow) -> Result<()> {
        flow.stop_propagation();
        flow.prevent_default();
        self.navigator.activate(index);
        self.select(CommitCause::Click)
    }

    /// Applies one asynchronous reply if it answers the latest lookup.
    pub fn deliver(&mut self, reply: SourceReply<T>) -> bool {
        if reply.seq != self.lookup_seq {
            trace!(
                "discarding stale reply {} for {:?}, latest lookup is {}",
                reply.seq,
                reply.query,
                self.lookup_seq
            );
            return false;
        }
        self.process(reply.items);
        true
    }

    /// Applies every reply already received. Returns how many were current.
    pub fn pump_replies(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            if self.deliver(reply) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next reply and applies it if current.
    pub async fn next_reply(&mut self) -> bool {
        match self.reply_rx.recv().await {
            Some(reply) => self.deliver(reply),
            None => false,
        }
    }

    /// Tears the widget down and hands the field back. Providers still
    /// holding a responder find the channel closed.
    pub fn destroy(mut self) -> F {
        self.menu.clear();
        self.navigator.clear();
        self.shown = false;
        debug!("typeahead destroyed");
        self.field
    }
}
