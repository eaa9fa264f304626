pub mod caret;
pub mod cli;
pub mod lexer;
pub mod output;
pub mod session;
pub mod settings;
pub mod suggest;
pub mod token;

pub use caret::{ActiveFragment, find_active_token, resolve_fragment};
pub use lexer::{Lexer, parse};
pub use output::{token_to_json, tokens_to_json};
pub use session::{SearchSession, merge_suggestions, splice};
pub use settings::{SearchSettings, SettingsError, SuggestionsPosition};
pub use suggest::{PropertyType, suggest_properties};
pub use token::{Token, TokenKind, decode, encode};
