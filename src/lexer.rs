use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use crate::token::{Token, TokenKind};

// Every pattern is anchored and applied to the slice starting at the scan offset.
static NEGATION: LazyLock<Regex> = LazyLock::new(|| pattern(r"[!-]"));
static AND_OPERATOR: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+(?:AND|&&)\s+"));
static OR_OPERATOR: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+(?:OR|\|\|)\s+"));
static NOT_OPERATOR: LazyLock<Regex> = LazyLock::new(|| pattern(r"NOT\s+"));
static BOOST: LazyLock<Regex> = LazyLock::new(|| pattern(r"\^[+-]?[0-9]+(?:\.[0-9]+)?"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+"));
static QUOTED_TEXT: LazyLock<Regex> = LazyLock::new(|| pattern(r#""((?:\\.|[^\\"])+)""#));
static DIRTY_TEXT_STOP_WORD: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r",|\s+(?:AND|&&|OR|\|\|)\s+|\s+(?:\)|\^[+-]?[0-9]+(?:\.[0-9]+)?)")
});
static DIRTY_TEXT_CONTENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"\\.|[^()]"));

// Whitespace as the site's own query parser sees it. Excludes U+0085, includes U+FEFF.
const WHITESPACE_CLASS: &str =
    r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

/// Parentheses nested deeper than this inside a term end the term.
const MAX_TERM_GROUP_DEPTH: usize = 256;

const COMMA: char = ',';
const GROUP_OPEN: char = '(';
const GROUP_CLOSE: char = ')';

fn pattern(body: &str) -> Regex {
    let body = body.replace(r"\s", WHITESPACE_CLASS);
    Regex::new(&format!("^(?:{body})")).expect("lexer pattern is valid")
}

/// Match `pattern` exactly at byte `offset` of `source`.
fn match_at<'s>(pattern: &Regex, source: &'s str, offset: usize) -> Option<&'s str> {
    pattern.find(&source[offset..]).map(|m| m.as_str())
}

/// Tokenizer for booru search queries.
///
/// Follows the Philomena search grammar closely enough to find the term under the
/// caret. Input it cannot classify ends the token stream early instead of failing.
pub struct Lexer<'a> {
    source: &'a str,
    /// Byte offset of the scan.
    position: usize,
    /// Same offset counted in chars, used for token indices.
    char_position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            position: 0,
            char_position: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, matched: &str) {
        self.position += matched.len();
        self.char_position += matched.chars().count();
    }

    pub fn parse(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while self.position < self.source.len() {
            let Some((kind, matched)) = self.scan() else {
                debug!(
                    "stopped at char {}, ignoring {:?}",
                    self.char_position,
                    self.rest()
                );
                break;
            };

            if let Some(kind) = kind {
                let token = Token::new(kind, self.char_position, matched);
                trace!("{} at {}: {:?}", token.kind, token.index, token.value);
                tokens.push(token);
            }

            self.advance(matched);
        }

        tokens
    }

    /// Classify the text at the current position. Whitespace yields no kind.
    fn scan(&self) -> Option<(Option<TokenKind>, &'a str)> {
        let rest = self.rest();

        match self.current_char() {
            None => return None,
            Some(COMMA) => return Some((Some(TokenKind::And), &rest[..COMMA.len_utf8()])),
            Some(_) => {}
        }

        if let Some(m) = NEGATION.find(rest) {
            return Some((Some(TokenKind::Not), m.as_str()));
        }
        if let Some(m) = AND_OPERATOR.find(rest) {
            return Some((Some(TokenKind::And), m.as_str()));
        }
        if let Some(m) = OR_OPERATOR.find(rest) {
            return Some((Some(TokenKind::Or), m.as_str()));
        }
        if let Some(m) = NOT_OPERATOR.find(rest) {
            return Some((Some(TokenKind::Not), m.as_str()));
        }

        match self.current_char() {
            Some(GROUP_OPEN) => {
                return Some((Some(TokenKind::GroupStart), &rest[..GROUP_OPEN.len_utf8()]));
            }
            Some(GROUP_CLOSE) => {
                return Some((Some(TokenKind::GroupEnd), &rest[..GROUP_CLOSE.len_utf8()]));
            }
            _ => {}
        }

        if let Some(m) = BOOST.find(rest) {
            return Some((Some(TokenKind::Boost), m.as_str()));
        }
        if let Some(m) = WHITESPACE.find(rest) {
            return Some((None, m.as_str()));
        }
        if let Some(caps) = QUOTED_TEXT.captures(rest) {
            let quoted_value = caps[1].to_string();
            let whole = caps.get(0)?.as_str();
            return Some((Some(TokenKind::QuotedTerm { quoted_value }), whole));
        }

        let (end, _) = self.dirty_text_end(self.position, 0);
        if end > self.position {
            return Some((Some(TokenKind::Term), &self.source[self.position..end]));
        }

        None
    }

    /// Byte offset where free-form term text starting at `offset` ends.
    ///
    /// Balanced parentheses are taken in as part of the text. An unclosed `(` is taken
    /// in without a closer. A `(` nested past [`MAX_TERM_GROUP_DEPTH`] ends the whole
    /// term, which is reported by the returned flag.
    fn dirty_text_end(&self, mut offset: usize, depth: usize) -> (usize, bool) {
        let source = self.source;

        while offset < source.len() {
            if match_at(&DIRTY_TEXT_STOP_WORD, source, offset).is_some() {
                break;
            }

            if let Some(content) = match_at(&DIRTY_TEXT_CONTENT, source, offset) {
                offset += content.len();
                continue;
            }

            if source[offset..].starts_with(GROUP_OPEN) {
                if depth == MAX_TERM_GROUP_DEPTH {
                    debug!("term nesting deeper than {} at byte {}", MAX_TERM_GROUP_DEPTH, offset);
                    return (offset, true);
                }

                let (mut end, capped) =
                    self.dirty_text_end(offset + GROUP_OPEN.len_utf8(), depth + 1);
                if capped {
                    return (end, true);
                }
                if source[end..].starts_with(GROUP_CLOSE) {
                    end += GROUP_CLOSE.len_utf8();
                }
                offset = end;
                continue;
            }

            break;
        }

        (offset, false)
    }
}

/// Tokenize a search query.
pub fn parse(source: &str) -> Vec<Token> {
    Lexer::new(source).parse()
}

#[test]
fn test_word_operators_keep_whitespace() {
    let tokens = parse("a OR b");
    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Term, 0, "a"),
            Token::new(TokenKind::Or, 1, " OR "),
            Token::new(TokenKind::Term, 5, "b"),
        ]
    );
}

#[test]
fn test_indices_count_chars() {
    let tokens = parse("ポニー, café");
    assert_eq!(tokens[0], Token::new(TokenKind::Term, 0, "ポニー"));
    assert_eq!(tokens[1], Token::new(TokenKind::And, 3, ","));
    assert_eq!(tokens[2], Token::new(TokenKind::Term, 5, "café"));
}

#[test]
fn test_deep_parentheses_in_term_are_capped() {
    let source = format!("a{}", "(".repeat(20_000));
    let tokens = parse(&source);

    let nested = format!("a{}", "(".repeat(MAX_TERM_GROUP_DEPTH));
    assert_eq!(tokens[0], Token::new(TokenKind::Term, 0, nested));
    assert_eq!(tokens.len(), 1 + 20_000 - MAX_TERM_GROUP_DEPTH);
    assert!(tokens[1..].iter().all(|t| t.kind == TokenKind::GroupStart));
}

#[test]
fn test_whitespace_matches_site_parser() {
    assert_eq!(
        parse("a\u{85}AND\u{85}b"),
        vec![Token::new(TokenKind::Term, 0, "a\u{85}AND\u{85}b")]
    );
    assert_eq!(
        parse("a\u{FEFF}AND\u{FEFF}b"),
        vec![
            Token::new(TokenKind::Term, 0, "a"),
            Token::new(TokenKind::And, 1, "\u{FEFF}AND\u{FEFF}"),
            Token::new(TokenKind::Term, 6, "b"),
        ]
    );
}
