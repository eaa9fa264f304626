//! Headless model of the site's search box.
//!
//! Mirrors what happens on every input event: the query is tokenized (once per distinct
//! value), the term under the caret is found and turned into suggestions, and an
//! accepted suggestion is spliced back over exactly that term.

use log::debug;

use crate::caret::resolve_fragment;
use crate::lexer::parse;
use crate::settings::{SearchSettings, SuggestionsPosition};
use crate::suggest::suggest_properties;
use crate::token::{Token, encode};

#[derive(Debug, Default)]
pub struct SearchSession {
    settings: SearchSettings,
    last_parsed: Option<String>,
    cached_tokens: Vec<Token>,
    /// Editable token found by the last fragment lookup.
    last_term: Option<Token>,
}

impl SearchSession {
    pub fn new(settings: SearchSettings) -> Self {
        SearchSession {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: SearchSettings) {
        self.settings = settings;
    }

    /// Tokens of `source`, re-parsed only when it differs from the previous call.
    pub fn tokens(&mut self, source: &str) -> &[Token] {
        if self.last_parsed.as_deref() != Some(source) {
            self.cached_tokens = parse(source);
            self.last_parsed = Some(source.to_string());
        }

        &self.cached_tokens
    }

    /// Token remembered by the last [`current_fragment`](Self::current_fragment) call.
    pub fn last_term(&self) -> Option<&Token> {
        self.last_term.as_ref()
    }

    /// Fragment the user is editing, given the field's selection range.
    ///
    /// Outside of any term the whole value is the fragment. An empty field has none.
    pub fn current_fragment(
        &mut self,
        source: &str,
        selection_start: usize,
        selection_end: usize,
    ) -> Option<String> {
        let caret = selection_start.min(selection_end);
        self.tokens(source);

        match resolve_fragment(source, &self.cached_tokens, caret) {
            Some((fragment, token)) => {
                self.last_term = token.cloned();
                Some(fragment)
            }
            None => {
                self.last_term = None;
                None
            }
        }
    }

    /// Property suggestions for the fragment at the selection. Empty while the feature
    /// is switched off.
    pub fn suggestions(
        &mut self,
        source: &str,
        selection_start: usize,
        selection_end: usize,
    ) -> Vec<String> {
        if !self.settings.suggest_properties {
            return Vec::new();
        }

        match self.current_fragment(source, selection_start, selection_end) {
            Some(fragment) => suggest_properties(&fragment),
            None => Vec::new(),
        }
    }

    /// Replace the last active term of `source` with `suggestion`.
    ///
    /// Suggestions containing a double quote are written as an encoded quoted term.
    /// Returns `None` when no term was active.
    pub fn apply_suggestion(&self, source: &str, suggestion: &str) -> Option<String> {
        let token = self.last_term.as_ref()?;

        let replacement = if suggestion.contains('"') {
            format!("\"{}\"", encode(suggestion))
        } else {
            suggestion.to_string()
        };

        debug!(
            "replacing {:?} at {} with {:?}",
            token.value, token.index, replacement
        );

        Some(splice(source, token.index, token.end(), &replacement))
    }
}

/// Replace chars `[start, end)` of `source`. Offsets past the end are clamped.
pub fn splice(source: &str, start: usize, end: usize, replacement: &str) -> String {
    let byte_offset = |chars: usize| {
        source
            .char_indices()
            .nth(chars)
            .map_or(source.len(), |(offset, _)| offset)
    };

    let start = byte_offset(start);
    let end = byte_offset(end).max(start);

    let mut result = String::with_capacity(source.len() + replacement.len());
    result.push_str(&source[..start]);
    result.push_str(replacement);
    result.push_str(&source[end..]);
    result
}

/// Place property suggestions before or after the site's own suggestions.
pub fn merge_suggestions(
    site: Vec<String>,
    properties: Vec<String>,
    position: SuggestionsPosition,
) -> Vec<String> {
    match position {
        SuggestionsPosition::Start => properties.into_iter().chain(site).collect(),
        SuggestionsPosition::End => site.into_iter().chain(properties).collect(),
    }
}
