//! This module provides a bounded store for log entries shown in the log pane.
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::Level;

/// Represents a single log entry with timestamp, level, module, and message.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    /// Last component of the module path the event came from.
    pub module: String,
    pub message: String,
}

/// A ring buffer of log entries.
///
/// Every entry is stored; the display level only decides what
/// [`LogBuffer::visible`] hands back to the UI.
pub struct LogBuffer {
    entries: Mutex<VecDeque<LogEntry>>,
    max_size: usize,
    display_level: Mutex<Level>,
}

impl LogBuffer {
    /// Creates a new `LogBuffer` holding at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_size)),
            max_size,
            display_level: Mutex::new(Level::DEBUG),
        }
    }

    /// Adds a new log entry, evicting the oldest one when full.
    pub fn add_entry(&self, entry: LogEntry) {
        let mut entries = lock(&self.entries);
        if entries.len() >= self.max_size {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn display_level(&self) -> Level {
        *lock(&self.display_level)
    }

    pub fn set_display_level(&self, level: Level) {
        *lock(&self.display_level) = level;
    }

    /// The newest `limit` entries at or above the display level, oldest first.
    pub fn visible(&self, limit: usize) -> Vec<LogEntry> {
        let level = self.display_level();
        let entries = lock(&self.entries);
        let mut visible: Vec<LogEntry> = entries
            .iter()
            .rev()
            .filter(|entry| entry.level <= level)
            .take(limit)
            .cloned()
            .collect();
        visible.reverse();
        visible
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
