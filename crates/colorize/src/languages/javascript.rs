//! JavaScript language support using tree-sitter-javascript.

use super::Language;
use crate::color::Color;

const KEYWORDS: &[&str] = &[
    "class", "this", "else", "return", "var", "const", "let", "for", "while", "if", "try",
    "throw", "catch", "function", "next", "continue", "break", "of", "in", "new",
];

const SYMBOLS: &[&str] = &[
    "%", "(", ")", "[", "]", "{", "}", ",", "-", "+", ";", ".", "/", "=", "==", "===", "&&",
    "&", "|", "||", "<", "!=", "<=", ">=", "<=>", "=>", "\"", "'", "`", "${", "~", "^", "*",
    "**", "!",
];

/// Returns the JavaScript language configuration.
pub fn javascript() -> Language {
    Language {
        name: "javascript",
        ts_language: tree_sitter_javascript::LANGUAGE.into(),
        classify,
    }
}

/// Map a tree-sitter-javascript node kind to its color.
pub fn classify(kind: &str) -> Option<Color> {
    let color = match kind {
        "program" | "template_substitution" => Color::Plain,
        "number" => Color::Number,
        k if KEYWORDS.contains(&k) => Color::Keyword,
        k if SYMBOLS.contains(&k) => Color::Symbol,
        "string" | "template_string" => Color::String,
        "identifier" | "property_identifier" => Color::Identifier,
        "escape_sequence" => Color::SpecialChar,
        "ERROR" => Color::Error,
        "comment" => Color::Comment,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_categories() {
        assert_eq!(classify("program"), Some(Color::Plain));
        assert_eq!(classify("template_substitution"), Some(Color::Plain));
        assert_eq!(classify("number"), Some(Color::Number));
        assert_eq!(classify("function"), Some(Color::Keyword));
        assert_eq!(classify("=>"), Some(Color::Symbol));
        assert_eq!(classify("${"), Some(Color::Symbol));
        assert_eq!(classify("template_string"), Some(Color::String));
        assert_eq!(classify("property_identifier"), Some(Color::Identifier));
        assert_eq!(classify("escape_sequence"), Some(Color::SpecialChar));
        assert_eq!(classify("ERROR"), Some(Color::Error));
        assert_eq!(classify("comment"), Some(Color::Comment));
    }

    #[test]
    fn test_unknown_kinds_are_transparent() {
        assert_eq!(classify("expression_statement"), None);
        assert_eq!(classify("string_fragment"), None);
        assert_eq!(classify("variable_declarator"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_keywords_and_symbols_disjoint() {
        for kw in KEYWORDS {
            assert!(!SYMBOLS.contains(kw));
        }
    }
}
