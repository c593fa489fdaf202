use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info, Level};

use super::layout::{MenuHit, MenuLayout, MESSAGE_ROW, RECIPIENT_ROW};
use super::TerminalUI;
use crate::compose::ComposeFocus;
use crate::typeahead::{BlurEvent, BlurOutcome, EventFlow, TextField};
use crate::ui::keymap::{translate, DefaultAction, Keystroke};
use crate::ui::{UIEvent, UIMode};

impl TerminalUI {
    /// Applies one event to the UI. Rendering is left to the caller.
    pub fn handle_event(&mut self, event: UIEvent) {
        match event {
            UIEvent::KeyPress(key) => self.handle_key_event(key),
            UIEvent::Mouse(mouse) => self.handle_mouse_event(mouse),
            UIEvent::Resize(width, height) => {
                self.state.terminal_size = (width, height);
                self.sync_geometry();
                self.compose.resize();
            }
            UIEvent::FocusLost => {
                let focus = self.compose.focus();
                let widget = self.compose.widget_mut(focus);
                widget.field_mut().blur();
                let outcome = widget.blur(&BlurEvent::to_outside());
                self.schedule_blur(focus, outcome);
            }
            UIEvent::BlurElapsed(focus) => self.compose.widget_mut(focus).blur_elapsed(),
            UIEvent::Tick => {}
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::F(9), _) => {
                self.state.toggle_mode();
                return;
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.state.should_quit = true;
                return;
            }
            _ => {}
        }

        if self.state.mode == UIMode::Logs {
            self.handle_log_key(key);
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.switch_focus();
                return;
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                if self.compose.focus() != ComposeFocus::Recipient {
                    self.switch_focus();
                }
                if let Err(e) = self.compose.clear_recipients() {
                    debug!("Failed to reopen recipients: {}", e);
                }
                self.sync_geometry();
                return;
            }
            _ => {}
        }

        if let Some(stroke) = translate(&key) {
            self.sync_geometry();
            self.dispatch_keystroke(stroke);
            self.sync_geometry();
        }
    }

    fn handle_log_key(&mut self, key: KeyEvent) {
        let level = match key.code {
            KeyCode::Char('1') => Level::ERROR,
            KeyCode::Char('2') => Level::WARN,
            KeyCode::Char('3') => Level::INFO,
            KeyCode::Char('4') => Level::DEBUG,
            KeyCode::Char('5') => Level::TRACE,
            _ => return,
        };
        self.log_buffer.set_display_level(level);
    }

    /// Runs keydown, keypress and keyup the way a browser would. The default
    /// action happens between keypress and keyup unless a handler prevented
    /// it; keyup goes to whichever field has focus by then.
    pub(super) fn dispatch_keystroke(&mut self, stroke: Keystroke) {
        let Keystroke {
            event,
            default_action,
            fires_keypress,
        } = stroke;

        let mut down = event.clone();
        self.compose.focused_mut().keydown(&mut down);
        let mut prevented = down.default_prevented();

        if !prevented && fires_keypress {
            let mut press = event.clone();
            self.compose.focused_mut().keypress(&mut press);
            prevented = press.default_prevented();
        }

        if !prevented {
            self.apply_default_action(default_action);
        }

        let mut up = event;
        self.compose.focused_mut().keyup(&mut up);
    }

    fn apply_default_action(&mut self, action: DefaultAction) {
        let focus = self.compose.focus();
        match action {
            DefaultAction::Insert(c) => self.compose.focused_mut().field_mut().type_char(c),
            DefaultAction::Backspace => {
                let field = self.compose.focused_mut().field_mut();
                if !field.backspace() && focus == ComposeFocus::Recipient {
                    if let Some(name) = self.compose.remove_last_recipient() {
                        debug!("removed recipient {}", name);
                    }
                }
            }
            DefaultAction::CursorLeft => self.compose.focused_mut().field_mut().move_left(),
            DefaultAction::CursorRight => self.compose.focused_mut().field_mut().move_right(),
            DefaultAction::CursorHome => self.compose.focused_mut().field_mut().move_home(),
            DefaultAction::CursorEnd => self.compose.focused_mut().field_mut().move_end(),
            DefaultAction::Undo => {
                self.compose.focused_mut().field_mut().undo();
            }
            DefaultAction::Submit => match focus {
                ComposeFocus::Recipient => self.switch_focus(),
                ComposeFocus::Message => {
                    if let Some((recipients, body)) = self.compose.take_message() {
                        info!("sent message to {}", recipients.join(", "));
                        self.state.record_sent(recipients, body);
                    }
                }
            },
            DefaultAction::NextField => self.switch_focus(),
            DefaultAction::Nothing => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if self.state.mode != UIMode::Compose {
            return;
        }
        let (width, _) = self.state.terminal_size;
        let hit = MenuLayout::of(self.compose.focused(), width)
            .map_or(MenuHit::Outside, |menu| menu.hit(mouse.column, mouse.row));

        match mouse.kind {
            MouseEventKind::Moved => {
                let widget = self.compose.focused_mut();
                match hit {
                    MenuHit::Item(index) => {
                        widget.menu_mouse_enter();
                        widget.item_mouse_move(index);
                    }
                    MenuHit::Header => widget.menu_mouse_enter(),
                    MenuHit::Outside => widget.menu_mouse_leave(),
                }
            }
            MouseEventKind::Down(MouseButton::Left) => match hit {
                MenuHit::Item(index) => {
                    let mut flow = EventFlow::default();
                    let widget = self.compose.focused_mut();
                    if let Err(e) = widget.item_click(index, &mut flow) {
                        debug!("Menu click did not commit: {}", e);
                    }
                    widget.field_mut().focus();
                    self.sync_geometry();
                }
                MenuHit::Header => {}
                MenuHit::Outside => self.click_field(mouse.row),
            },
            _ => {}
        }
    }

    fn click_field(&mut self, row: u16) {
        let target = match row {
            RECIPIENT_ROW => ComposeFocus::Recipient,
            MESSAGE_ROW => ComposeFocus::Message,
            _ => return,
        };
        if target != self.compose.focus() {
            self.switch_focus();
        }
        self.compose.focused_mut().click();
    }

    fn switch_focus(&mut self) {
        let (left, outcome) = self.compose.toggle_focus();
        self.schedule_blur(left, outcome);
    }

    fn schedule_blur(&self, focus: ComposeFocus, outcome: BlurOutcome) {
        let BlurOutcome::Deferred(delay) = outcome else {
            return;
        };
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tx.send(UIEvent::BlurElapsed(focus)) {
                debug!("Failed to deliver blur: {}", e);
            }
        });
    }
}
