//! Logging infrastructure: a `tracing` layer that records events into a
//! bounded buffer read by the terminal log pane.
pub mod buffer;
pub mod collector;

pub use buffer::{LogBuffer, LogEntry};
pub use collector::TuiLogCollector;
