//! # Search Query Tokens
//!
//! Tokens produced by the [`Lexer`](crate::lexer::Lexer) for booru tag search queries.
//!
//! Every token remembers where it started in the source query (`index`, counted in
//! chars) and the exact text it matched (`value`). Nothing is normalized: the span
//! `[index, index + len)` of the source always reads back as `value`, which is what
//! lets a caller splice a replacement into the query without disturbing its neighbours.
//!
//! ## Token Kinds
//!
//! ```text
//! safe, solo AND (pony || -human) "quoted \"term\"" ^2
//! ^^^^^ term
//!     ^ and (comma)
//!            ^^^^^ and (word operator, with surrounding whitespace)
//!                 ^ group start
//!                      ^^^^ or
//!                          ^ not
//!                                ^ group end
//!                                  ^^^^^^^^^^^^^^^^^ quoted term
//!                                                    ^^ boost
//! ```
//!
//! ## Quoting
//!
//! Quoted terms escape `\` and `"` with a backslash. [`decode`] turns the raw inner
//! text of a quoted term back into the plain term, [`encode`] does the reverse:
//!
//! ```
//! use booru_query::token::{decode, encode};
//!
//! assert_eq!(encode(r#"say "hi""#), r#"say \"hi\""#);
//! assert_eq!(decode(r#"say \"hi\""#), r#"say "hi""#);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static ESCAPED_CHARACTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\([\\"])"#).expect("escape pattern is valid"));

static ESCAPABLE_CHARACTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\"]"#).expect("escapable pattern is valid"));

/// Kind of a search query token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Conjunction: a bare comma, or `AND` / `&&` surrounded by whitespace
    ///
    /// # Examples
    /// ```text
    /// safe, solo
    /// safe AND solo
    /// safe && solo
    /// ```
    And,

    /// Negation: a leading `!` or `-`, or the word `NOT` followed by whitespace
    ///
    /// # Examples
    /// ```text
    /// -explicit
    /// !explicit
    /// NOT explicit
    /// ```
    Not,

    /// Disjunction: `OR` / `||` surrounded by whitespace
    Or,

    /// Opening parenthesis of a group
    GroupStart,

    /// Closing parenthesis of a group
    GroupEnd,

    /// Relevance weight such as `^2`, `^-1` or `^+0.5`
    Boost,

    /// Double-quoted term
    ///
    /// `quoted_value` is the text between the quotes exactly as written, escapes
    /// included. Use [`Token::decoded_value`] for the plain term.
    ///
    /// # Examples
    /// ```text
    /// "artist:some \"nickname\""
    /// ```
    QuotedTerm { quoted_value: String },

    /// Free-form term text, possibly containing spaces and balanced parentheses
    ///
    /// # Examples
    /// ```text
    /// twilight sparkle
    /// artist:(unknown)
    /// ```
    Term,
}

impl TokenKind {
    /// Stable snake_case name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::And => "and",
            TokenKind::Not => "not",
            TokenKind::Or => "or",
            TokenKind::GroupStart => "group_start",
            TokenKind::GroupEnd => "group_end",
            TokenKind::Boost => "boost",
            TokenKind::QuotedTerm { .. } => "quoted_term",
            TokenKind::Term => "term",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified fragment of a search query together with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Offset of the first char of `value` in the source query, in chars.
    pub index: usize,
    /// Exact source text matched by this token.
    pub value: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(kind: TokenKind, index: usize, value: impl Into<String>) -> Self {
        Token {
            index,
            value: value.into(),
            kind,
        }
    }

    /// Length of the matched text in chars.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Offset just past the last char of the token.
    pub fn end(&self) -> usize {
        self.index + self.len()
    }

    /// Whether the user can edit this token as a single search term.
    pub fn is_term(&self) -> bool {
        matches!(self.kind, TokenKind::Term | TokenKind::QuotedTerm { .. })
    }

    /// Inner text of a quoted term with escapes removed.
    ///
    /// Returns `None` for every other kind of token.
    pub fn decoded_value(&self) -> Option<String> {
        match &self.kind {
            TokenKind::QuotedTerm { quoted_value } => Some(decode(quoted_value)),
            _ => None,
        }
    }

    /// Text the user is editing when the caret sits in this token.
    ///
    /// Plain terms are used verbatim, quoted terms are decoded. Operators, groups
    /// and boosts are not editable and give `None`.
    pub fn fragment(&self) -> Option<Cow<'_, str>> {
        match &self.kind {
            TokenKind::Term => Some(Cow::Borrowed(&self.value)),
            TokenKind::QuotedTerm { quoted_value } => Some(Cow::Owned(decode(quoted_value))),
            _ => None,
        }
    }

    /// Weight carried by a boost token, e.g. `^+2.5` gives `2.5`.
    pub fn boost_value(&self) -> Option<Decimal> {
        if self.kind != TokenKind::Boost {
            return None;
        }

        let weight = self.value.strip_prefix('^')?;
        let weight = weight.strip_prefix('+').unwrap_or(weight);

        Decimal::from_str(weight).ok()
    }
}

/// Remove quoted-term escaping: `\\` becomes `\` and `\"` becomes `"`.
///
/// Any other backslash is kept as written.
pub fn decode(value: &str) -> String {
    ESCAPED_CHARACTER.replace_all(value, "$1").into_owned()
}

/// Escape every `\` and `"` so the value can be placed between double quotes.
pub fn encode(value: &str) -> String {
    ESCAPABLE_CHARACTER.replace_all(value, r"\$0").into_owned()
}
