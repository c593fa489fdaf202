//! This module provides a `tracing` layer that feeds the terminal log pane.
use std::fmt::Write as _;
use std::sync::Arc;

use chrono::Utc;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use super::{LogBuffer, LogEntry};

/// A `tracing` layer that records events into a [`LogBuffer`].
///
/// Nothing is written to stdout, which belongs to the terminal UI.
pub struct TuiLogCollector {
    buffer: Arc<LogBuffer>,
}

impl TuiLogCollector {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }

    /// Installs the collector behind `filter` as the global subscriber.
    ///
    /// # Errors
    ///
    /// Fails if a global subscriber is already set.
    pub fn init_subscriber(buffer: Arc<LogBuffer>, filter: EnvFilter) -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(filter)
            .with(TuiLogCollector::new(buffer))
            .try_init()
    }
}

impl<S> Layer<S> for TuiLogCollector
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        let module = metadata
            .module_path()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or_else(|| metadata.target())
            .to_string();

        self.buffer.add_entry(LogEntry {
            timestamp: Utc::now(),
            level: *metadata.level(),
            module,
            message,
        });
    }
}

/// Pulls the `message` field out of an event and appends the rest as
/// `name=value` pairs.
struct MessageVisitor<'a>(&'a mut String);

impl MessageVisitor<'_> {
    /// The message leads, whatever order fields arrive in.
    fn set_message(&mut self, message: String) {
        let rest = std::mem::replace(self.0, message);
        if !rest.is_empty() {
            self.0.push(' ');
            self.0.push_str(&rest);
        }
    }

    fn push_field(&mut self, name: &str, value: impl std::fmt::Display) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        let _ = write!(self.0, "{}={}", name, value);
    }
}

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.set_message(format!("{:?}", value));
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.set_message(value.to_string());
        } else {
            self.push_field(field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn events_land_in_the_buffer() {
        let buffer = Arc::new(LogBuffer::new(16));
        let subscriber = tracing_subscriber::registry().with(TuiLogCollector::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(seq = 3, "lookup fired");
            tracing::trace!("fine detail");
        });

        buffer.set_display_level(Level::TRACE);
        let entries = buffer.visible(16);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::INFO);
        assert_eq!(entries[0].message, "lookup fired seq=3");
        assert_eq!(entries[0].module, "tests");
        assert_eq!(entries[1].message, "fine detail");
    }

    #[test]
    fn filter_drops_events_below_threshold() {
        let buffer = Arc::new(LogBuffer::new(16));
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("warn"))
            .with(TuiLogCollector::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden");
            tracing::warn!("shown");
        });

        let entries = buffer.visible(16);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
    }
}
