//! Caret-aware commands: active token, property suggestions and replacement

use serde_json::{Value, json};

use super::CliError;
use crate::caret::{ActiveFragment, find_active_token};
use crate::lexer::parse;
use crate::output::token_to_json;
use crate::session::{SearchSession, merge_suggestions};
use crate::settings::{SUGGEST_PROPERTIES, SearchSettings};

/// Options for the active command
#[derive(Debug, Clone, Default)]
pub struct ActiveOptions {
    pub query: Option<String>,
    /// Caret offset in chars
    pub caret: usize,
}

/// Options for the suggest command
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub query: Option<String>,
    pub caret: usize,
    /// Stored search settings as JSON
    pub settings: Option<String>,
    /// The site's own autocomplete items, merged with property suggestions
    pub site: Vec<String>,
}

/// Options for the replace command
#[derive(Debug, Clone, Default)]
pub struct ReplaceOptions {
    pub query: Option<String>,
    pub caret: usize,
    /// Text to put in place of the term under the caret
    pub replacement: String,
}

/// Report the token under the caret and the fragment it stands for
pub fn execute_active(options: &ActiveOptions) -> Result<Value, CliError> {
    let query = options.query.as_deref().ok_or(CliError::NoInput)?;
    let tokens = parse(query);
    let token = find_active_token(&tokens, options.caret);
    let fragment = ActiveFragment::of(token);

    Ok(json!({
        "caret": options.caret,
        "token": token.map(token_to_json),
        "editable": fragment.token().is_some(),
        "fragment": fragment.text(query),
    }))
}

/// Suggest search properties for the term under the caret
///
/// Suggestions are switched on for the call unless the settings set
/// `suggestProperties` to `false`. The configured position places them before or
/// after the site's own items.
pub fn execute_suggest(options: &CompletionOptions) -> Result<Vec<String>, CliError> {
    let query = options.query.as_deref().ok_or(CliError::NoInput)?;

    let stored = options
        .settings
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()?;
    let mut settings = match &stored {
        Some(value) => SearchSettings::from_json(value)?,
        None => SearchSettings::default(),
    };
    settings.suggest_properties = stored
        .as_ref()
        .and_then(|value| value.get(SUGGEST_PROPERTIES))
        .and_then(Value::as_bool)
        .unwrap_or(true);

    let mut session = SearchSession::new(settings);
    let properties = session.suggestions(query, options.caret, options.caret);

    Ok(merge_suggestions(
        options.site.clone(),
        properties,
        settings.suggest_properties_position,
    ))
}

/// Replace the term under the caret and return the new query
pub fn execute_replace(options: &ReplaceOptions) -> Result<String, CliError> {
    let query = options.query.as_deref().ok_or(CliError::NoInput)?;

    let mut session = SearchSession::default();
    session.current_fragment(query, options.caret, options.caret);

    session
        .apply_suggestion(query, &options.replacement)
        .ok_or(CliError::NoActiveTerm {
            caret: options.caret,
        })
}
