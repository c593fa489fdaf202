use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{TerminalUI, UIEvent};
use crate::compose::ComposeBox;
use crate::logging::LogBuffer;

/// How often the UI wakes up to apply async suggestions and redraw logs.
const TICK: Duration = Duration::from_millis(100);

pub async fn run_tui(compose: ComposeBox, log_buffer: Arc<LogBuffer>) -> Result<()> {
    info!("Starting compose box");

    let (ui_event_tx, ui_event_rx) = mpsc::unbounded_channel::<UIEvent>();

    // Terminal reader. Polling with a timeout lets it notice a closed channel.
    let input_tx = ui_event_tx.clone();
    tokio::task::spawn_blocking(move || loop {
        match event::poll(TICK) {
            Ok(true) => {}
            Ok(false) => {
                if input_tx.is_closed() {
                    break;
                }
                continue;
            }
            Err(e) => {
                debug!("Failed to poll terminal events: {}", e);
                break;
            }
        }

        let ui_event = match event::read() {
            Ok(Event::Key(key)) => UIEvent::KeyPress(key),
            Ok(Event::Mouse(mouse)) => UIEvent::Mouse(mouse),
            Ok(Event::Resize(width, height)) => UIEvent::Resize(width, height),
            Ok(Event::FocusLost) => UIEvent::FocusLost,
            Ok(_) => continue,
            Err(e) => {
                debug!("Failed to read terminal event: {}", e);
                break;
            }
        };
        if let Err(e) = input_tx.send(ui_event) {
            debug!("Failed to send terminal event: {}", e);
            break;
        }
    });

    let tick_tx = ui_event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        loop {
            interval.tick().await;
            if tick_tx.send(UIEvent::Tick).is_err() {
                break;
            }
        }
    });

    let mut terminal_ui = TerminalUI::new(compose, log_buffer, ui_event_rx, ui_event_tx);
    let result = terminal_ui.run().await;
    info!("Compose box closed");
    result
}
