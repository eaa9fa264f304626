//! Search property suggestions.
//!
//! Booru search understands `name:value` properties, optionally with a comparison
//! operator (`score.gte:100`). Given the fragment under the caret this module proposes
//! property names, operators or fixed values to complete it with.

use std::sync::LazyLock;

use regex::Regex;

static PROPERTY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<name>[a-z0-9_]+)(?<op_syntax>\.(?<op>[a-z]*))?(?<value_syntax>:(?<value>.*))?$")
        .expect("property pattern is valid")
});

/// Value type of a search property. Decides which operators and values apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Numeric,
    Date,
    Literal,
    /// `my:` queries about the current user
    Personal,
    Boolean,
}

impl PropertyType {
    pub fn operators(&self) -> &'static [&'static str] {
        match self {
            PropertyType::Numeric | PropertyType::Date => COMPARISON_OPERATORS,
            _ => &[],
        }
    }

    pub fn values(&self) -> &'static [&'static str] {
        match self {
            PropertyType::Personal => &["comments", "faves", "posts", "uploads", "upvotes", "watched"],
            PropertyType::Boolean => &["true", "false"],
            _ => &[],
        }
    }
}

const COMPARISON_OPERATORS: &[&str] = &["gt", "gte", "lt", "lte"];

/// Properties known to the image search, in suggestion order.
pub const PROPERTIES: &[(&str, PropertyType)] = &[
    ("animated", PropertyType::Boolean),
    ("aspect_ratio", PropertyType::Numeric),
    ("body_type_tag_count", PropertyType::Numeric),
    ("character_tag_count", PropertyType::Numeric),
    ("comment_count", PropertyType::Numeric),
    ("content_fanmade_tag_count", PropertyType::Numeric),
    ("content_official_tag_count", PropertyType::Numeric),
    ("created_at", PropertyType::Date),
    ("description", PropertyType::Literal),
    ("downvotes", PropertyType::Numeric),
    ("duration", PropertyType::Numeric),
    ("error_tag_count", PropertyType::Numeric),
    ("faved_by", PropertyType::Literal),
    ("faved_by_id", PropertyType::Numeric),
    ("faves", PropertyType::Numeric),
    ("file_name", PropertyType::Literal),
    ("first_seen_at", PropertyType::Date),
    ("height", PropertyType::Numeric),
    ("id", PropertyType::Numeric),
    ("oc_tag_count", PropertyType::Numeric),
    ("orig_sha512_hash", PropertyType::Literal),
    ("original_format", PropertyType::Literal),
    ("pixels", PropertyType::Numeric),
    ("rating_tag_count", PropertyType::Numeric),
    ("score", PropertyType::Numeric),
    ("sha512_hash", PropertyType::Literal),
    ("size", PropertyType::Numeric),
    ("source_count", PropertyType::Numeric),
    ("source_url", PropertyType::Literal),
    ("species_tag_count", PropertyType::Numeric),
    ("spoiler_tag_count", PropertyType::Numeric),
    ("tag_count", PropertyType::Numeric),
    ("updated_at", PropertyType::Date),
    ("uploader", PropertyType::Literal),
    ("uploader_id", PropertyType::Numeric),
    ("upvotes", PropertyType::Numeric),
    ("width", PropertyType::Numeric),
    ("wilson_score", PropertyType::Numeric),
    ("my", PropertyType::Personal),
];

pub fn property_type(name: &str) -> Option<PropertyType> {
    PROPERTIES
        .iter()
        .find(|(property, _)| *property == name)
        .map(|(_, kind)| *kind)
}

/// Suggestions completing `fragment`. Empty when the fragment does not look like the
/// start of a property.
pub fn suggest_properties(fragment: &str) -> Vec<String> {
    let Some(caps) = PROPERTY_HEADING.captures(fragment) else {
        return Vec::new();
    };

    let name = &caps["name"];
    let kind = property_type(name);
    let op_syntax = caps.name("op_syntax").map(|m| m.as_str());

    // name:value, or name.op:value
    if let Some(value) = caps.name("value") {
        let Some(kind) = kind else {
            return Vec::new();
        };

        return kind
            .values()
            .iter()
            .filter(|candidate| candidate.starts_with(value.as_str()))
            .map(|candidate| format!("{}{}:{}", name, op_syntax.unwrap_or(""), candidate))
            .collect();
    }

    // name.op
    if let Some(op) = caps.name("op") {
        let Some(kind) = kind else {
            return Vec::new();
        };

        return kind
            .operators()
            .iter()
            .filter(|candidate| candidate.starts_with(op.as_str()))
            .map(|candidate| format!("{}.{}:", name, candidate))
            .collect();
    }

    PROPERTIES
        .iter()
        .filter(|(property, _)| property.starts_with(name))
        .map(|(property, _)| property.to_string())
        .collect()
}
