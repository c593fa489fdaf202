use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeaheadError {
    /// A commit was requested while no suggestion was active.
    #[error("no active suggestion to commit")]
    NoActiveItem,
    #[error("selection {start}..{end} is not a valid range in text of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("no typeahead attached to field `{0}`")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, TypeaheadError>;
