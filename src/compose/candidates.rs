//! Suggestion data for the compose box and the typeahead options built on it.
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tokens::{current_token, TokenKind};
use crate::typeahead::{
    default_matcher, default_sorter, CommitCause, Responder, Source, TypeaheadOptions,
    TypeaheadSettings,
};

/// Everything the compose box can suggest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Directory {
    pub users: Vec<String>,
    pub streams: Vec<String>,
    pub emoji: Vec<String>,
}

impl Default for Directory {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            users: owned(&["alice", "bob", "carol", "dave", "Alicia Keys", "eve"]),
            streams: owned(&["announce", "general", "design", "devel", "random"]),
            emoji: owned(&["smile", "smiley", "tada", "thumbs_up", "heart", "rocket"]),
        }
    }
}

impl Directory {
    pub fn names(&self, kind: TokenKind) -> &[String] {
        match kind {
            TokenKind::Mention => &self.users,
            TokenKind::Stream => &self.streams,
            TokenKind::Emoji => &self.emoji,
        }
    }

    fn candidates(&self, kind: TokenKind) -> Vec<ComposeCandidate> {
        self.names(kind)
            .iter()
            .map(|name| ComposeCandidate::new(kind, name.clone()))
            .collect()
    }
}

/// A user, stream, or emoji offered while typing a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeCandidate {
    pub kind: TokenKind,
    pub name: String,
}

impl ComposeCandidate {
    pub fn new(kind: TokenKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl AsRef<str> for ComposeCandidate {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

fn token_text(query: &str) -> &str {
    current_token(query).map(|t| t.text).unwrap_or("")
}

/// Options for the message body.
///
/// With `stream_delay` set, streams are answered asynchronously after that
/// delay, the way a server-backed lookup would; this needs a Tokio runtime.
pub fn message_options(
    directory: Arc<Directory>,
    settings: TypeaheadSettings,
    stream_delay: Option<Duration>,
) -> TypeaheadOptions<ComposeCandidate> {
    let source = Source::provider(
        move |query: &str, responder: Responder<ComposeCandidate>| {
            let token = current_token(query)?;
            let candidates = directory.candidates(token.kind);
            match (token.kind, stream_delay) {
                (TokenKind::Stream, Some(delay)) => {
                    debug!("fetching streams for {:?} in the background", token.text);
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        responder.respond(candidates);
                    });
                    None
                }
                _ => Some(candidates),
            }
        },
    );

    TypeaheadOptions::with_callbacks(
        source,
        |item: &ComposeCandidate, query: &str| match current_token(query) {
            Some(token) => token.kind == item.kind && default_matcher(item, token.text),
            None => false,
        },
        |items: Vec<ComposeCandidate>, query: &str| default_sorter(items, token_text(query)),
        |item: &ComposeCandidate| format!("{}{}", item.kind.sigil(), item.name),
        |item: &ComposeCandidate, query: &str, _cause: &CommitCause<'_>| {
            let prefix = current_token(query)
                .map(|token| &query[..token.start])
                .unwrap_or(query);
            format!("{}{} ", prefix, item.kind.completion(&item.name))
        },
    )
    .settings(settings)
    .option_label(|matching: &[ComposeCandidate], item: &ComposeCandidate| {
        let same_name = matching
            .iter()
            .filter(|other| other.name.eq_ignore_ascii_case(&item.name))
            .count();
        (item.kind == TokenKind::Mention && same_name > 1).then(|| "(duplicate name)".to_string())
    })
}

/// Options for the recipient pill box. An empty box lists everyone.
pub fn recipient_options(
    directory: &Directory,
    settings: TypeaheadSettings,
) -> TypeaheadOptions<String> {
    let total = directory.users.len();
    TypeaheadOptions::new(directory.users.clone(), |name: &String| name.clone())
        .settings(TypeaheadSettings {
            help_on_empty_strings: true,
            hide_on_empty: false,
            ..settings
        })
        .header_html(move || Some(format!("Recipients ({total} people)")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeahead::{InputField, KeyEvent, Typeahead};

    fn message_widget(text: &str) -> Typeahead<ComposeCandidate, InputField> {
        let options = message_options(
            Arc::new(Directory::default()),
            TypeaheadSettings::default(),
            None,
        );
        Typeahead::new(InputField::new().with_text(text), options)
    }

    fn names(widget: &Typeahead<ComposeCandidate, InputField>) -> Vec<&str> {
        widget
            .menu()
            .entries()
            .iter()
            .map(|e| e.value.name.as_str())
            .collect()
    }

    #[test]
    fn mentions_complete_into_markup() {
        let mut widget = message_widget("hi @ali");
        widget.lookup(false);
        assert_eq!(names(&widget), ["alice", "Alicia Keys"]);
        assert_eq!(widget.menu().entries()[0].html, "@alice");

        let mut up = KeyEvent::new(crate::typeahead::keys::ENTER);
        widget.keyup(&mut up);
        assert_eq!(widget.field().value(), "hi @**alice** ");

        assert!(widget.field_mut().undo());
        assert_eq!(widget.field().value(), "hi @ali");
    }

    #[test]
    fn only_matching_kind_is_offered() {
        let mut widget = message_widget("#de");
        widget.lookup(false);
        assert_eq!(names(&widget), ["design", "devel"]);
    }

    #[test]
    fn plain_text_shows_nothing() {
        let mut widget = message_widget("just typing");
        widget.lookup(false);
        assert!(!widget.is_shown());
    }

    #[test]
    fn emoji_prefix_matches_sort_first() {
        let mut widget = message_widget(":smi");
        widget.lookup(false);
        assert_eq!(names(&widget), ["smile", "smiley"]);
    }

    #[test]
    fn recipient_box_lists_everyone_when_empty() {
        let directory = Directory::default();
        let options = recipient_options(&directory, TypeaheadSettings::default());
        let mut widget = Typeahead::new(InputField::content_editable(), options);
        widget.lookup(false);
        assert_eq!(widget.menu().entries().len(), 6);
        assert_eq!(widget.menu().header(), Some("Recipients (6 people)"));
    }

    #[test]
    fn directory_loads_partially_from_json() {
        let directory: Directory = serde_json::from_str(r#"{ "users": ["zoe"] }"#).unwrap();
        assert_eq!(directory.users, ["zoe"]);
        assert!(!directory.streams.is_empty());
    }
}
