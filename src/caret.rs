//! Locating the token under the caret of a search field.

use crate::token::{Token, TokenKind};

/// What the user is editing at the caret position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFragment<'a> {
    /// Caret is in a plain term, used verbatim.
    Term(&'a Token),
    /// Caret is in a quoted term, used decoded.
    Quoted(&'a Token),
    /// Caret is on an operator, a group, a boost, whitespace or unparsed input. The
    /// whole field value stands in for the fragment.
    Whole,
}

impl<'a> ActiveFragment<'a> {
    pub fn of(token: Option<&'a Token>) -> Self {
        let Some(token) = token else {
            return ActiveFragment::Whole;
        };

        match token.kind {
            TokenKind::Term => ActiveFragment::Term(token),
            TokenKind::QuotedTerm { .. } => ActiveFragment::Quoted(token),
            _ => ActiveFragment::Whole,
        }
    }

    /// The editable token, if any.
    pub fn token(&self) -> Option<&'a Token> {
        match self {
            ActiveFragment::Term(token) | ActiveFragment::Quoted(token) => Some(token),
            ActiveFragment::Whole => None,
        }
    }

    /// Fragment text, falling back to `source` for [`ActiveFragment::Whole`].
    pub fn text(&self, source: &str) -> String {
        match self {
            ActiveFragment::Term(token) => token.value.clone(),
            ActiveFragment::Quoted(token) => token.decoded_value().unwrap_or_default(),
            ActiveFragment::Whole => source.to_string(),
        }
    }
}

/// First token whose span holds the caret.
///
/// The start of a span is exclusive and the end inclusive: a caret right before a
/// token's first char belongs to whatever precedes it, a caret right after its last
/// char still belongs to it.
pub fn find_active_token(tokens: &[Token], caret: usize) -> Option<&Token> {
    tokens
        .iter()
        .find(|token| token.index < caret && caret <= token.end())
}

/// Fragment being edited in `source` at `caret`, with the editable token it came from.
///
/// An empty source has no fragment at all.
pub fn resolve_fragment<'a>(
    source: &str,
    tokens: &'a [Token],
    caret: usize,
) -> Option<(String, Option<&'a Token>)> {
    if source.is_empty() {
        return None;
    }

    let active = ActiveFragment::of(find_active_token(tokens, caret));
    Some((active.text(source), active.token()))
}
