//! Color categories and the run-length wire representation.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// Run-length value meaning "this run extends to the end of the line".
pub const EOL: usize = 0;

/// Semantic color category understood by the editor plugin.
///
/// The discriminants are the codes sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Plain = 1,
    Symbol = 2,
    Keyword = 3,
    Identifier = 4,
    SpecialChar = 5,
    String = 6,
    Number = 7,
    Error = 8,
    Comment = 9,
}

impl Color {
    /// Wire code for this color (1-9).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Single-character glyph used by the debug rendering.
    pub fn glyph(self) -> char {
        match self {
            Color::Plain => ' ',
            Color::Symbol => '*',
            Color::Keyword => 'k',
            Color::Identifier => 'i',
            Color::SpecialChar => 'c',
            Color::String => 's',
            Color::Number => 'n',
            Color::Error => 'e',
            Color::Comment => '!',
        }
    }

    /// Look up a color from its wire code.
    pub fn from_code(code: u8) -> Option<Color> {
        let color = match code {
            1 => Color::Plain,
            2 => Color::Symbol,
            3 => Color::Keyword,
            4 => Color::Identifier,
            5 => Color::SpecialChar,
            6 => Color::String,
            7 => Color::Number,
            8 => Color::Error,
            9 => Color::Comment,
            _ => return None,
        };
        Some(color)
    }
}

/// Length of a run: a character count, or "to end of line".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLength {
    Chars(usize),
    Eol,
}

impl RunLength {
    /// Wire value; `EOL` (0) for end-of-line runs.
    pub fn value(self) -> usize {
        match self {
            RunLength::Chars(n) => n,
            RunLength::Eol => EOL,
        }
    }
}

/// A maximal same-colored span within one line.
///
/// Serialized as the two-element array `[colorCode, runLength]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub color: Color,
    pub len: RunLength,
}

impl Run {
    pub fn new(color: Color, len: usize) -> Self {
        Self {
            color,
            len: RunLength::Chars(len),
        }
    }

    pub fn eol(color: Color) -> Self {
        Self {
            color,
            len: RunLength::Eol,
        }
    }

    pub fn is_eol(&self) -> bool {
        self.len == RunLength::Eol
    }
}

impl Serialize for Run {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.color.code())?;
        tuple.serialize_element(&self.len.value())?;
        tuple.end()
    }
}

/// Encoded output: one run list per source line.
pub type Lines = Vec<Vec<Run>>;

/// Render one encoded line as a glyph string, one glyph per character.
///
/// Each run prints its color glyph followed by `.` padding for the rest of
/// its length; end-of-line runs print `$`.
pub fn debug_line(line: &[Run]) -> String {
    let mut out = String::new();
    for run in line {
        out.push(run.color.glyph());
        match run.len {
            RunLength::Eol => out.push('$'),
            RunLength::Chars(n) if n > 1 => {
                out.extend(std::iter::repeat('.').take(n - 1));
            }
            RunLength::Chars(_) => {}
        }
    }
    out
}

/// Render all encoded lines with [`debug_line`], one per output line.
pub fn debug_render(lines: &[Vec<Run>]) -> String {
    lines
        .iter()
        .map(|line| debug_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}
