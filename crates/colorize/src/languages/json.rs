//! JSON language support using tree-sitter-json.

use super::Language;
use crate::color::Color;

/// Returns the JSON language configuration.
pub fn json() -> Language {
    Language {
        name: "json",
        ts_language: tree_sitter_json::LANGUAGE.into(),
        classify,
    }
}

/// Map a tree-sitter-json node kind to its color.
pub fn classify(kind: &str) -> Option<Color> {
    let color = match kind {
        "document" => Color::Plain,
        "{" | "}" | "[" | "]" | "," | ":" | "\"" => Color::Symbol,
        "true" | "false" | "null" => Color::Keyword,
        "number" => Color::Number,
        "string" => Color::String,
        "escape_sequence" => Color::SpecialChar,
        "comment" => Color::Comment,
        "ERROR" => Color::Error,
        _ => return None,
    };
    Some(color)
}
