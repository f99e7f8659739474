//! Read-only syntax tree interface and the tree-sitter adapter.

use tree_sitter::{Node, Point};

use crate::encoder::Position;

/// A node of an immutable syntax tree.
///
/// Children are ordered by start position and do not overlap; a parent's
/// range contains all of its children's ranges.
pub trait SyntaxNode: Sized {
    /// Grammar-specific kind label.
    fn kind(&self) -> &str;
    /// Start position (inclusive).
    fn start(&self) -> Position;
    /// End position (exclusive).
    fn end(&self) -> Position;
    /// Number of direct children.
    fn child_count(&self) -> usize;
    /// Direct child by index.
    fn child(&self, index: usize) -> Option<Self>;
}

/// Byte offsets of line starts, used to turn tree-sitter's byte columns
/// into character columns.
#[derive(Debug)]
pub struct LineIndex<'src> {
    source: &'src str,
    starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { source, starts }
    }

    /// Number of lines, counting a trailing empty line after a final `\n`.
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Width of every line in characters, excluding the `\n`.
    pub fn widths(&self) -> Vec<usize> {
        self.source
            .split('\n')
            .map(|line| line.chars().count())
            .collect()
    }

    /// Convert a tree-sitter point (byte column) to a character position.
    pub fn position(&self, point: Point) -> Position {
        let Some(&line_start) = self.starts.get(point.row) else {
            return Position::new(point.row, point.column);
        };
        let end = (line_start + point.column).min(self.source.len());
        // Count UTF-8 lead bytes so a column inside a character cannot panic.
        let column = self.source.as_bytes()[line_start..end]
            .iter()
            .filter(|&&b| (b & 0xC0) != 0x80)
            .count();
        Position::new(point.row, column)
    }
}

/// A tree-sitter node paired with the line index of its source text.
#[derive(Clone, Copy)]
pub struct SourceNode<'tree, 'src> {
    node: Node<'tree>,
    index: &'src LineIndex<'src>,
}

impl<'tree, 'src> SourceNode<'tree, 'src> {
    pub fn new(node: Node<'tree>, index: &'src LineIndex<'src>) -> Self {
        Self { node, index }
    }
}

impl SyntaxNode for SourceNode<'_, '_> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn start(&self) -> Position {
        self.index.position(self.node.start_position())
    }

    fn end(&self) -> Position {
        self.index.position(self.node.end_position())
    }

    fn child_count(&self) -> usize {
        self.node.child_count()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.node
            .child(index)
            .map(|node| SourceNode::new(node, self.index))
    }
}
