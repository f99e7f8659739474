//! Streaming run-length span encoder.
//!
//! The encoder consumes `start`/`end` events in document order and paints
//! every character between consecutive events with whatever color is on top
//! of its color stack at that moment. Because events follow tree structure,
//! a node's own span gets the node's color and the gaps between children get
//! the nearest open ancestor's color, with no interval arithmetic.

use crate::color::{Color, Lines, Run, RunLength};

/// Zero-based (row, column) document position, column counted in characters.
///
/// Ordering is lexicographic: row first, then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Color used for characters not covered by any open colored node.
const BASE_COLOR: Color = Color::Plain;

/// Stateful encoder producing per-line `(color, length)` runs.
#[derive(Debug)]
pub struct Encoder {
    cursor: Position,
    /// Open colors, innermost last. Index 0 is the base entry and is never popped.
    colors: Vec<Color>,
    /// Runs of the line under the cursor.
    line: Vec<Run>,
    lines: Lines,
    /// Width in characters of each source line.
    widths: Vec<usize>,
}

impl Encoder {
    /// Create an encoder whose cursor starts at `origin`.
    ///
    /// `widths` holds the character count of every source line; rows past
    /// the end are treated as empty.
    pub fn new(origin: Position, widths: Vec<usize>) -> Self {
        Self {
            cursor: origin,
            colors: vec![BASE_COLOR],
            line: Vec::new(),
            lines: Vec::new(),
            widths,
        }
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Number of open colors, not counting the base entry.
    pub fn depth(&self) -> usize {
        self.colors.len() - 1
    }

    fn top(&self) -> Color {
        self.colors.last().copied().unwrap_or(BASE_COLOR)
    }

    /// Open a colored region at `pos`.
    pub fn start(&mut self, color: Color, pos: Position) {
        self.advance_to(pos);
        self.colors.push(color);
    }

    /// Close the innermost colored region at `pos`.
    pub fn end(&mut self, pos: Position) {
        self.advance_to(pos);
        if self.colors.len() > 1 {
            self.colors.pop();
        }
    }

    /// Paint everything between the cursor and `pos` with the top color.
    ///
    /// Positions behind the cursor are ignored.
    pub fn advance_to(&mut self, pos: Position) {
        while pos.row > self.cursor.row {
            self.close_line();
            self.cursor.row += 1;
            self.cursor.column = 0;
        }
        if pos.row == self.cursor.row && pos.column > self.cursor.column {
            self.extend(RunLength::Chars(pos.column - self.cursor.column));
            self.cursor.column = pos.column;
        }
    }

    /// Append a run under the top color, merging into the previous run when
    /// the colors match. End-of-line runs are never extended.
    fn extend(&mut self, len: RunLength) {
        let color = self.top();
        match self.line.last_mut() {
            Some(last) if last.color == color && !last.is_eol() => {
                last.len = match (last.len, len) {
                    (RunLength::Chars(a), RunLength::Chars(b)) => RunLength::Chars(a + b),
                    _ => RunLength::Eol,
                };
            }
            _ => self.line.push(Run { color, len }),
        }
    }

    /// Terminate the current line with an end-of-line run.
    fn close_line(&mut self) {
        let width = self.widths.get(self.cursor.row).copied().unwrap_or(0);
        if self.cursor.column >= width {
            // Nothing left on the line: the last run already reaches its end.
            match self.line.last_mut() {
                Some(last) => last.len = RunLength::Eol,
                None => self.line.push(Run::eol(self.top())),
            }
        } else {
            self.extend(RunLength::Eol);
        }
        self.lines.push(std::mem::take(&mut self.line));
    }

    /// Finish encoding and return the runs of every line.
    ///
    /// A partially filled last line is closed; an empty one is dropped.
    pub fn render(mut self) -> Lines {
        if !self.line.is_empty() {
            self.close_line();
        }
        self.lines
    }
}
