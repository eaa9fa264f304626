//! Tokenize a query and report the token stream

use serde_json::Value;

use super::CliError;
use crate::lexer::Lexer;
use crate::output::tokens_to_json;

/// Options for the tokens command
#[derive(Debug, Clone, Default)]
pub struct TokensOptions {
    /// The search query to tokenize
    pub query: Option<String>,
}

/// Execute a tokens operation
pub fn execute_tokens(options: &TokensOptions) -> Result<Value, CliError> {
    let query = options.query.as_deref().ok_or(CliError::NoInput)?;
    let tokens = Lexer::new(query).parse();
    Ok(tokens_to_json(&tokens))
}
