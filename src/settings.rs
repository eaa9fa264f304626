//! Search settings as stored by the extension under the `search` key.

use std::fmt;

use serde_json::{Map, Value};

pub const SUGGEST_PROPERTIES: &str = "suggestProperties";
const SUGGEST_PROPERTIES_POSITION: &str = "suggestPropertiesPosition";

/// Where property suggestions go relative to the site's own autocomplete items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionsPosition {
    #[default]
    Start,
    End,
}

impl SuggestionsPosition {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchSettings {
    /// Offer search property names, operators and values while typing.
    pub suggest_properties: bool,
    pub suggest_properties_position: SuggestionsPosition,
}

/// Errors reading stored search settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The settings value is not a JSON object
    NotAnObject,
    /// A field holds a value of the wrong JSON type
    InvalidType { field: &'static str, expected: &'static str },
    /// Position is neither "start" nor "end"
    InvalidPosition(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NotAnObject => write!(f, "search settings must be a JSON object"),
            SettingsError::InvalidType { field, expected } => {
                write!(f, "setting '{}' must be a {}", field, expected)
            }
            SettingsError::InvalidPosition(p) => {
                write!(f, "invalid suggestions position '{}', expected 'start' or 'end'", p)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl SearchSettings {
    /// Read settings from their stored JSON form. Missing or null fields keep their
    /// defaults.
    pub fn from_json(value: &Value) -> Result<Self, SettingsError> {
        let object = value.as_object().ok_or(SettingsError::NotAnObject)?;
        let mut settings = SearchSettings::default();

        match object.get(SUGGEST_PROPERTIES) {
            None | Some(Value::Null) => {}
            Some(Value::Bool(enabled)) => settings.suggest_properties = *enabled,
            Some(_) => {
                return Err(SettingsError::InvalidType {
                    field: SUGGEST_PROPERTIES,
                    expected: "boolean",
                });
            }
        }

        match object.get(SUGGEST_PROPERTIES_POSITION) {
            None | Some(Value::Null) => {}
            Some(Value::String(position)) => {
                settings.suggest_properties_position = SuggestionsPosition::parse(position)
                    .ok_or_else(|| SettingsError::InvalidPosition(position.clone()))?;
            }
            Some(_) => {
                return Err(SettingsError::InvalidType {
                    field: SUGGEST_PROPERTIES_POSITION,
                    expected: "string",
                });
            }
        }

        Ok(settings)
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            SUGGEST_PROPERTIES.to_string(),
            Value::Bool(self.suggest_properties),
        );
        object.insert(
            SUGGEST_PROPERTIES_POSITION.to_string(),
            Value::String(self.suggest_properties_position.as_str().to_string()),
        );
        Value::Object(object)
    }
}
