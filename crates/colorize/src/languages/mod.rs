//! Language definitions for colorizing.
//!
//! Each language pairs a tree-sitter grammar with the table that maps its
//! node kinds to color categories.

mod javascript;
mod json;

pub use javascript::javascript;
pub use json::json;

use tree_sitter::Language as TsLanguage;

use crate::color::Color;

/// Error looking up a language.
#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    /// No grammar is registered under this name
    #[error("Unknown language: {0}")]
    Unknown(String),
}

/// A language configuration for colorizing.
#[derive(Clone)]
pub struct Language {
    /// Language name (e.g., "javascript", "json")
    pub name: &'static str,
    /// Tree-sitter language grammar
    pub ts_language: TsLanguage,
    /// Node kind classifier; `None` means the node is transparent
    pub classify: fn(&str) -> Option<Color>,
}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language").field("name", &self.name).finish()
    }
}

/// Names accepted by [`by_name`].
pub const LANGUAGE_NAMES: &[&str] = &["javascript", "js", "json"];

/// Look up a built-in language by name (case-insensitive).
pub fn by_name(name: &str) -> Result<Language, LanguageError> {
    match name.to_ascii_lowercase().as_str() {
        "javascript" | "js" => Ok(javascript()),
        "json" => Ok(json()),
        _ => Err(LanguageError::Unknown(name.to_string())),
    }
}
