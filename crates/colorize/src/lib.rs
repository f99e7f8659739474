//! # colorize
//!
//! Tree-sitter based run-length color encoding for editor syntax highlighting.
//!
//! Source text is parsed with tree-sitter, the tree is walked in document
//! order, and every line is encoded as a list of `(color, length)` runs. The
//! last run of each line has length [`EOL`], meaning "to the end of the
//! line". The run lists serialize to the compact JSON arrays consumed by the
//! vim plugin.
//!
//! ## Example
//!
//! ```rust
//! use colorize::{javascript, Color, Colorizer, Run};
//!
//! let mut colorizer = Colorizer::new(javascript()).unwrap();
//! let lines = colorizer.colorize("1+2").unwrap();
//!
//! assert_eq!(
//!     lines,
//!     vec![vec![
//!         Run::new(Color::Number, 1),
//!         Run::new(Color::Symbol, 1),
//!         Run::eol(Color::Number),
//!     ]]
//! );
//! ```

mod color;
pub mod encoder;
pub mod languages;
mod pipeline;
pub mod tree;
pub mod walker;

pub use color::{debug_line, debug_render, Color, Lines, Run, RunLength, EOL};
pub use encoder::{Encoder, Position};
pub use languages::{javascript, json, Language, LanguageError};
pub use pipeline::{ColorizeError, Colorizer};
pub use tree::SyntaxNode;
pub use walker::walk;
