//! JSON rendering of tokens for the command line and for embedding tools.
//!
//! ```
//! use booru_query::{lexer::parse, output::tokens_to_json};
//!
//! let json = tokens_to_json(&parse("safe, solo"));
//! assert_eq!(json[1]["kind"], "and");
//! assert_eq!(json[2]["index"], 6);
//! ```

use serde_json::{Value, json};

use crate::token::{Token, TokenKind};

pub fn token_to_json(token: &Token) -> Value {
    let mut object = json!({
        "kind": token.kind.name(),
        "index": token.index,
        "value": token.value,
    });

    match &token.kind {
        TokenKind::QuotedTerm { quoted_value } => {
            object["quoted_value"] = Value::String(quoted_value.clone());
            object["decoded_value"] = json!(token.decoded_value());
        }
        TokenKind::Boost => {
            // Decimal keeps the weight exact; render as a string.
            object["weight"] = json!(token.boost_value().map(|w| w.to_string()));
        }
        _ => {}
    }

    object
}

pub fn tokens_to_json(tokens: &[Token]) -> Value {
    Value::Array(tokens.iter().map(token_to_json).collect())
}
