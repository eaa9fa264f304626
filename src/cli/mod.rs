//! CLI support for booru-query
//!
//! Provides programmatic access to the CLI commands so other tools can embed the
//! same tokenizing and completion behaviour.

mod complete;
mod tokens;

pub use complete::{
    ActiveOptions, CompletionOptions, ReplaceOptions, execute_active, execute_replace,
    execute_suggest,
};
pub use tokens::{TokensOptions, execute_tokens};

use std::io;

use crate::settings::SettingsError;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Search settings are malformed
    Settings(SettingsError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No query provided
    NoInput,
    /// No term under the caret to replace
    NoActiveTerm { caret: usize },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Settings(e) => write!(f, "Invalid settings: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No query provided. Pass it as an argument or pipe it to stdin."),
            CliError::NoActiveTerm { caret } => {
                write!(f, "No search term at caret position {}", caret)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Settings(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Settings(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Render JSON output, compact or pretty.
pub fn render_json(value: &serde_json::Value, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    Ok(rendered)
}
