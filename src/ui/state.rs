//! State shown by the terminal UI besides the compose box itself.
use chrono::{DateTime, Utc};

/// Represents the current mode of the user interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UIMode {
    /// Typing into the compose box.
    #[default]
    Compose,
    /// Viewing the application logs.
    Logs,
}

/// A message taken out of the compose box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub timestamp: DateTime<Utc>,
    pub recipients: Vec<String>,
    pub body: String,
}

#[derive(Debug)]
pub struct UIState {
    pub mode: UIMode,
    pub terminal_size: (u16, u16),
    pub sent: Vec<SentMessage>,
    pub should_quit: bool,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}

impl UIState {
    pub fn new() -> Self {
        Self {
            mode: UIMode::default(),
            terminal_size: (80, 24),
            sent: Vec::new(),
            should_quit: false,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            UIMode::Compose => UIMode::Logs,
            UIMode::Logs => UIMode::Compose,
        };
    }

    pub fn record_sent(&mut self, recipients: Vec<String>, body: String) {
        self.sent.push(SentMessage {
            timestamp: Utc::now(),
            recipients,
            body,
        });
    }
}
