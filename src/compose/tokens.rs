//! Recognises the completable token at the end of a message draft.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `@name` → `@**name**`
    Mention,
    /// `#stream` → `#**stream**`
    Stream,
    /// `:smi` → `:smile:`
    Emoji,
}

impl TokenKind {
    pub fn sigil(self) -> char {
        match self {
            TokenKind::Mention => '@',
            TokenKind::Stream => '#',
            TokenKind::Emoji => ':',
        }
    }

    fn from_sigil(c: char) -> Option<Self> {
        match c {
            '@' => Some(TokenKind::Mention),
            '#' => Some(TokenKind::Stream),
            ':' => Some(TokenKind::Emoji),
            _ => None,
        }
    }

    /// Markup written into the draft for a chosen name.
    pub fn completion(self, name: &str) -> String {
        match self {
            TokenKind::Mention => format!("@**{name}**"),
            TokenKind::Stream => format!("#**{name}**"),
            TokenKind::Emoji => format!(":{name}:"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Text after the sigil.
    pub text: &'a str,
    /// Byte offset of the sigil.
    pub start: usize,
}

/// The token being typed at the end of `draft`, if it is completable.
///
/// A sigil only opens a token at the start of the draft or after whitespace,
/// so `user@host` and `a:b` are left alone. Emoji need at least one character
/// after the colon.
pub fn current_token(draft: &str) -> Option<Token<'_>> {
    let start = draft
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let word = &draft[start..];
    let sigil = word.chars().next()?;
    let kind = TokenKind::from_sigil(sigil)?;
    let text = &word[sigil.len_utf8()..];

    if kind == TokenKind::Emoji && text.is_empty() {
        return None;
    }
    if text.contains(|c: char| c == '*' || TokenKind::from_sigil(c).is_some()) {
        return None;
    }

    Some(Token { kind, text, start })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_trailing_mention() {
        let token = current_token("hello @ali").unwrap();
        assert_eq!(token.kind, TokenKind::Mention);
        assert_eq!(token.text, "ali");
        assert_eq!(token.start, 6);
    }

    #[test]
    fn bare_sigils() {
        assert_eq!(current_token("#").map(|t| t.kind), Some(TokenKind::Stream));
        assert_eq!(current_token("@").map(|t| t.text), Some(""));
        assert_eq!(current_token("see :"), None);
    }

    #[test]
    fn ignores_sigils_inside_words() {
        assert_eq!(current_token("mail user@host"), None);
        assert_eq!(current_token("ratio 1:2"), None);
        assert_eq!(current_token("plain words"), None);
        assert_eq!(current_token(""), None);
    }

    #[test]
    fn finished_completions_are_not_tokens() {
        assert_eq!(current_token("#**general**"), None);
        assert_eq!(current_token(":smile:"), None);
        assert_eq!(current_token("@**bob** "), None);
    }

    #[test]
    fn multibyte_prefix_keeps_offsets_valid() {
        let draft = "héllo\u{3000}:smi";
        let token = current_token(draft).unwrap();
        assert_eq!(&draft[token.start..], ":smi");
    }

    #[test]
    fn completions_use_chat_markup() {
        assert_eq!(TokenKind::Mention.completion("alice"), "@**alice**");
        assert_eq!(TokenKind::Stream.completion("announce"), "#**announce**");
        assert_eq!(TokenKind::Emoji.completion("tada"), ":tada:");
    }
}
