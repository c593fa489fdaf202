use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::layout::{
    field_geometry, message_input_left, recipient_input_left, MESSAGE_ROW, RECIPIENT_ROW,
};
use crate::compose::{ComposeBox, ComposeFocus};
use crate::logging::LogBuffer;
use crate::ui::{UIEvent, UIState};

pub struct TerminalUI {
    pub(super) state: UIState,
    pub(super) compose: ComposeBox,
    pub(super) log_buffer: Arc<LogBuffer>,
    pub(super) event_rx: mpsc::UnboundedReceiver<UIEvent>,
    pub(super) event_tx: mpsc::UnboundedSender<UIEvent>,
    pub(super) terminal_active: bool,
}

impl TerminalUI {
    /// Builds the UI without touching the terminal; [`TerminalUI::run`]
    /// takes it over.
    pub fn new(
        compose: ComposeBox,
        log_buffer: Arc<LogBuffer>,
        event_rx: mpsc::UnboundedReceiver<UIEvent>,
        event_tx: mpsc::UnboundedSender<UIEvent>,
    ) -> Self {
        let mut ui = Self {
            state: UIState::new(),
            compose,
            log_buffer,
            event_rx,
            event_tx,
            terminal_active: false,
        };
        ui.sync_geometry();
        ui
    }

    pub fn state(&self) -> &UIState {
        &self.state
    }

    pub fn compose(&self) -> &ComposeBox {
        &self.compose
    }

    pub fn compose_mut(&mut self) -> &mut ComposeBox {
        &mut self.compose
    }

    pub async fn run(&mut self) -> Result<()> {
        self.initialize_terminal()?;
        self.sync_geometry();
        self.render()?;

        debug!("Starting terminal UI loop");

        while let Some(event) = self.event_rx.recv().await {
            self.handle_event(event);
            if self.state.should_quit {
                break;
            }

            let applied = self.compose.pump_replies();
            if applied > 0 {
                debug!("applied {} async suggestion replies", applied);
            }

            if let Err(e) = self.render() {
                error!("Error rendering UI: {}", e);
            }
        }

        self.cleanup()
    }

    /// Tells each field where it is on screen, so menus open next to it.
    pub(super) fn sync_geometry(&mut self) {
        let (width, _) = self.state.terminal_size;
        let recipient_left = recipient_input_left(self.compose.recipients());
        self.compose
            .widget_mut(ComposeFocus::Recipient)
            .field_mut()
            .set_geometry(field_geometry(RECIPIENT_ROW, recipient_left, width));
        self.compose
            .widget_mut(ComposeFocus::Message)
            .field_mut()
            .set_geometry(field_geometry(MESSAGE_ROW, message_input_left(), width));
    }
}
