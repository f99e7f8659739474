//! Source text to encoded lines.

use tree_sitter::Parser;

use crate::color::Lines;
use crate::encoder::{Encoder, Position};
use crate::languages::Language;
use crate::tree::{LineIndex, SourceNode, SyntaxNode};
use crate::walker::walk;

/// Error during colorizing.
#[derive(Debug, thiserror::Error)]
pub enum ColorizeError {
    /// The grammar could not be loaded into the parser
    #[error("Language error: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The parser produced no tree at all
    #[error("Parser produced no syntax tree")]
    NoTree,
}

/// Parses source text and encodes it into per-line color runs.
///
/// Holds a reusable tree-sitter parser; no state carries over between
/// calls to [`Colorizer::colorize`].
pub struct Colorizer {
    language: Language,
    parser: Parser,
}

impl Colorizer {
    /// Create a colorizer for the given language.
    pub fn new(language: Language) -> Result<Self, ColorizeError> {
        let mut parser = Parser::new();
        parser.set_language(&language.ts_language)?;
        Ok(Self { language, parser })
    }

    /// The language this colorizer parses.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Colorize `source`, returning one run list per line.
    pub fn colorize(&mut self, source: &str) -> Result<Lines, ColorizeError> {
        let tree = self.parser.parse(source, None).ok_or_else(|| {
            // A failed parse can leave the parser mid-document.
            self.parser.reset();
            ColorizeError::NoTree
        })?;

        let index = LineIndex::new(source);
        let root = SourceNode::new(tree.root_node(), &index);
        // The root spans first to last token; text outside it is still output.
        let widths = index.widths();
        let last_row = widths.len().saturating_sub(1);
        let end = Position::new(last_row, widths.get(last_row).copied().unwrap_or(0));
        let mut encoder = Encoder::new(Position::default(), widths);
        walk(root, self.language.classify, &mut encoder);
        encoder.advance_to(end);
        Ok(encoder.render())
    }
}
