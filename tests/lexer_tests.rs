// tests/lexer_tests.rs

use booru_query::lexer::{Lexer, parse};
use booru_query::token::{Token, TokenKind, decode, encode};
use rust_decimal::Decimal;
use std::str::FromStr;

fn term(index: usize, value: &str) -> Token {
    Token::new(TokenKind::Term, index, value)
}

fn quoted(index: usize, value: &str, quoted_value: &str) -> Token {
    Token::new(
        TokenKind::QuotedTerm {
            quoted_value: quoted_value.to_string(),
        },
        index,
        value,
    )
}

fn token(kind: TokenKind, index: usize, value: &str) -> Token {
    Token::new(kind, index, value)
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        (",", TokenKind::And),
        ("-", TokenKind::Not),
        ("!", TokenKind::Not),
        ("(", TokenKind::GroupStart),
        (")", TokenKind::GroupEnd),
    ];

    for (input, expected) in test_cases {
        let tokens = parse(input);
        assert_eq!(tokens, vec![token(expected, 0, input)], "Failed for input: {}", input);
    }
}

#[test]
fn test_empty_and_blank_input() {
    assert!(parse("").is_empty());
    assert!(parse("   ").is_empty());
    assert!(parse("\t\n").is_empty());
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_word_operators_capture_surrounding_whitespace() {
    let test_cases = vec![
        ("a AND b", TokenKind::And, " AND "),
        ("a && b", TokenKind::And, " && "),
        ("a OR b", TokenKind::Or, " OR "),
        ("a || b", TokenKind::Or, " || "),
    ];

    for (input, kind, operator) in test_cases {
        assert_eq!(
            parse(input),
            vec![term(0, "a"), token(kind, 1, operator), term(6, "b")],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_wide_whitespace_around_operator() {
    assert_eq!(
        parse("a   AND  b"),
        vec![
            term(0, "a"),
            token(TokenKind::And, 1, "   AND  "),
            term(9, "b"),
        ]
    );
}

#[test]
fn test_word_operators_need_whitespace_on_both_sides() {
    let test_cases = vec!["aANDb", "a AND", "a ||b", "a OR"];

    for input in test_cases {
        assert_eq!(parse(input), vec![term(0, input)], "Failed for input: {}", input);
    }
}

#[test]
fn test_comma_splits_without_whitespace() {
    assert_eq!(
        parse("a,b"),
        vec![term(0, "a"), token(TokenKind::And, 1, ","), term(2, "b")]
    );
}

#[test]
fn test_negation_prefixes() {
    assert_eq!(
        parse("safe, -solo"),
        vec![
            term(0, "safe"),
            token(TokenKind::And, 4, ","),
            token(TokenKind::Not, 6, "-"),
            term(7, "solo"),
        ]
    );

    assert_eq!(
        parse("!pony"),
        vec![token(TokenKind::Not, 0, "!"), term(1, "pony")]
    );
}

#[test]
fn test_not_keyword_requires_trailing_whitespace() {
    assert_eq!(
        parse("NOT pony"),
        vec![token(TokenKind::Not, 0, "NOT "), term(4, "pony")]
    );
    assert_eq!(parse("NOTpony"), vec![term(0, "NOTpony")]);
}

#[test]
fn test_operators_inside_terms_are_text() {
    let test_cases = vec!["a NOT b", "foo-bar", "rock 'n' roll", "a&b"];

    for input in test_cases {
        assert_eq!(parse(input), vec![term(0, input)], "Failed for input: {}", input);
    }
}

// ============================================================================
// Terms
// ============================================================================

#[test]
fn test_terms_keep_inner_spaces() {
    assert_eq!(
        parse("twilight sparkle, pony"),
        vec![
            term(0, "twilight sparkle"),
            token(TokenKind::And, 16, ","),
            term(18, "pony"),
        ]
    );
}

#[test]
fn test_trailing_whitespace_stays_in_term() {
    assert_eq!(parse("foo "), vec![term(0, "foo ")]);
}

#[test]
fn test_escaped_parentheses_in_term() {
    assert_eq!(parse(r"a\(b"), vec![term(0, r"a\(b")]);
    assert_eq!(parse(r"smile\)"), vec![term(0, r"smile\)")]);
}

#[test]
fn test_non_ascii_terms_use_char_offsets() {
    assert_eq!(
        parse("ポニー AND café"),
        vec![
            term(0, "ポニー"),
            token(TokenKind::And, 3, " AND "),
            term(8, "café"),
        ]
    );
}

// ============================================================================
// Groups
// ============================================================================

#[test]
fn test_top_level_parentheses_are_groups() {
    assert_eq!(
        parse("(foo)"),
        vec![
            token(TokenKind::GroupStart, 0, "("),
            term(1, "foo"),
            token(TokenKind::GroupEnd, 4, ")"),
        ]
    );
}

#[test]
fn test_nested_groups() {
    assert_eq!(
        parse("((a))"),
        vec![
            token(TokenKind::GroupStart, 0, "("),
            token(TokenKind::GroupStart, 1, "("),
            term(2, "a"),
            token(TokenKind::GroupEnd, 3, ")"),
            token(TokenKind::GroupEnd, 4, ")"),
        ]
    );
}

#[test]
fn test_group_with_operators() {
    assert_eq!(
        parse("(a OR b), c"),
        vec![
            token(TokenKind::GroupStart, 0, "("),
            term(1, "a"),
            token(TokenKind::Or, 2, " OR "),
            term(6, "b"),
            token(TokenKind::GroupEnd, 7, ")"),
            token(TokenKind::And, 8, ","),
            term(10, "c"),
        ]
    );
}

#[test]
fn test_whitespace_before_group_end_stops_term() {
    assert_eq!(
        parse("foo )"),
        vec![term(0, "foo"), token(TokenKind::GroupEnd, 4, ")")]
    );
}

#[test]
fn test_parentheses_inside_term_are_absorbed() {
    let test_cases = vec!["artist:(foo)", "a:(b(c))", "artist:(foo"];

    for input in test_cases {
        assert_eq!(parse(input), vec![term(0, input)], "Failed for input: {}", input);
    }
}

#[test]
fn test_operator_inside_term_parentheses_ends_term() {
    assert_eq!(
        parse("a (b OR c) d"),
        vec![
            term(0, "a (b"),
            token(TokenKind::Or, 4, " OR "),
            term(8, "c"),
            token(TokenKind::GroupEnd, 9, ")"),
            term(11, "d"),
        ]
    );
}

// ============================================================================
// Boosts
// ============================================================================

#[test]
fn test_boost_after_whitespace() {
    let tokens = parse("tag ^2.5");
    assert_eq!(
        tokens,
        vec![term(0, "tag"), token(TokenKind::Boost, 4, "^2.5")]
    );
    assert_eq!(
        tokens[1].boost_value(),
        Some(Decimal::from_str("2.5").unwrap())
    );
}

#[test]
fn test_boost_glued_to_term_is_text() {
    assert_eq!(parse("tag^2.5"), vec![term(0, "tag^2.5")]);
}

#[test]
fn test_boost_forms() {
    let test_cases = vec![
        ("^2", "2"),
        ("^-1", "-1"),
        ("^+0.5", "0.5"),
        ("^10.25", "10.25"),
    ];

    for (input, weight) in test_cases {
        let tokens = parse(input);
        assert_eq!(tokens, vec![token(TokenKind::Boost, 0, input)], "Failed for input: {}", input);
        assert_eq!(tokens[0].boost_value(), Some(Decimal::from_str(weight).unwrap()));
    }
}

#[test]
fn test_caret_without_digits_is_text() {
    assert_eq!(parse("^"), vec![term(0, "^")]);
    assert_eq!(parse("^_^"), vec![term(0, "^_^")]);
}

#[test]
fn test_boost_value_only_for_boosts() {
    assert_eq!(parse("pony")[0].boost_value(), None);
}

// ============================================================================
// Quoted Terms
// ============================================================================

#[test]
fn test_quoted_term_with_escaped_quotes() {
    let input = r#""hello \"world\"""#;
    let tokens = parse(input);

    assert_eq!(tokens, vec![quoted(0, input, r#"hello \"world\""#)]);
    assert_eq!(tokens[0].decoded_value().as_deref(), Some(r#"hello "world""#));
}

#[test]
fn test_quoted_term_ends_at_first_unescaped_quote() {
    let tokens = parse(r#""a\\" b"#);

    assert_eq!(tokens, vec![quoted(0, r#""a\\""#, r"a\\"), term(6, "b")]);
    assert_eq!(tokens[0].decoded_value().as_deref(), Some(r"a\"));
}

#[test]
fn test_quoted_term_after_operator() {
    assert_eq!(
        parse(r#"safe, "a, b""#),
        vec![
            term(0, "safe"),
            token(TokenKind::And, 4, ","),
            quoted(6, r#""a, b""#, "a, b"),
        ]
    );
}

#[test]
fn test_unterminated_or_empty_quotes_are_terms() {
    let test_cases = vec![r#""abc"#, r#""""#];

    for input in test_cases {
        assert_eq!(parse(input), vec![term(0, input)], "Failed for input: {}", input);
    }
}

#[test]
fn test_decoded_value_only_for_quoted_terms() {
    assert_eq!(parse("pony")[0].decoded_value(), None);
}

// ============================================================================
// Escaping
// ============================================================================

#[test]
fn test_encode_escapes_backslashes_and_quotes() {
    let test_cases = vec![
        ("plain", "plain"),
        (r#"say "hi""#, r#"say \"hi\""#),
        (r"back\slash", r"back\\slash"),
        (r#"\""#, r#"\\\""#),
    ];

    for (input, expected) in test_cases {
        assert_eq!(encode(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_decode_keeps_unknown_escapes() {
    assert_eq!(decode(r"a\nb"), r"a\nb");
    assert_eq!(decode(r"\\\\"), r"\\");
    assert_eq!(decode(r#"\\\""#), r#"\""#);
}

#[test]
fn test_decode_reverses_encode() {
    let samples = vec!["", "pony", r#"""#, r"\", r#"\"\\""#, r#"artist:"x\y""#, "ポニー"];

    for sample in samples {
        assert_eq!(decode(&encode(sample)), sample, "Failed for input: {}", sample);
    }
}

// ============================================================================
// Stream Properties
// ============================================================================

const QUERIES: &[&str] = &[
    "safe, solo",
    "a AND b || (c, -d) ^2",
    r#"artist:(foo), "quoted \"x\"" OR NOT bar"#,
    "ポニー AND (café || 雪)",
    "  leading, trailing  ",
    "a (b OR c) d",
];

#[test]
fn test_spans_are_ordered_and_disjoint() {
    for query in QUERIES {
        let tokens = parse(query);
        for pair in tokens.windows(2) {
            assert!(
                pair[0].end() <= pair[1].index,
                "Overlapping tokens {:?} and {:?} in {}",
                pair[0],
                pair[1],
                query
            );
        }
    }
}

#[test]
fn test_spans_read_back_their_values() {
    for query in QUERIES {
        for token in parse(query) {
            let span: String = query.chars().skip(token.index).take(token.len()).collect();
            assert_eq!(span, token.value, "Failed for input: {}", query);
        }
    }
}

#[test]
fn test_parsing_is_repeatable() {
    for query in QUERIES {
        assert_eq!(parse(query), parse(query), "Failed for input: {}", query);
        assert_eq!(Lexer::new(query).parse(), parse(query));
    }
}
