//! Where candidates come from.
use std::fmt;

use tokio::sync::mpsc;
use tracing::trace;

/// Provider signature: answer synchronously by returning `Some`, or return
/// `None` and answer later through the [`Responder`].
pub type Provider<T> = Box<dyn Fn(&str, Responder<T>) -> Option<Vec<T>>>;

/// Candidate source configured on a typeahead.
pub enum Source<T> {
    /// A fixed list, used as-is for every lookup.
    Static(Vec<T>),
    /// A function queried on every lookup.
    Provider(Provider<T>),
}

impl<T> Source<T> {
    pub fn provider<F>(f: F) -> Self
    where
        F: Fn(&str, Responder<T>) -> Option<Vec<T>> + 'static,
    {
        Source::Provider(Box::new(f))
    }
}

impl<T> From<Vec<T>> for Source<T> {
    fn from(items: Vec<T>) -> Self {
        Source::Static(items)
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Static(items) => f.debug_tuple("Static").field(&items.len()).finish(),
            Source::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Results delivered after the lookup that requested them returned.
#[derive(Debug)]
pub struct SourceReply<T> {
    /// Sequence number of the lookup this answers.
    pub seq: u64,
    pub query: String,
    pub items: Vec<T>,
}

/// Handle given to a provider for answering a lookup later.
///
/// The responder is `Send` whenever the candidates are, so it can move into a
/// spawned task.
pub struct Responder<T> {
    seq: u64,
    query: String,
    tx: mpsc::UnboundedSender<SourceReply<T>>,
}

impl<T> Responder<T> {
    pub(crate) fn new(seq: u64, query: String, tx: mpsc::UnboundedSender<SourceReply<T>>) -> Self {
        Self { seq, query, tx }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sends the candidates back to the typeahead. A widget that has been
    /// destroyed simply drops them.
    pub fn respond(self, items: Vec<T>) {
        let reply = SourceReply {
            seq: self.seq,
            query: self.query,
            items,
        };
        if self.tx.send(reply).is_err() {
            trace!("typeahead gone, dropping reply for lookup {}", self.seq);
        }
    }
}

impl<T> fmt::Debug for Responder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("seq", &self.seq)
            .field("query", &self.query)
            .finish()
    }
}
