//! Line/column positions.
//!
//! Positions are stored zero-based and rendered one-based, so the value a
//! cursor carries internally is never confused with what a user reads in a
//! diagnostic.

use std::fmt;

/// Zero-based line and column of a codepoint boundary.
///
/// Columns count codepoints, not bytes: `"é"` advances the column by one
/// even though it occupies two bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    /// Zero-based line index.
    pub line_index: u32,
    /// Zero-based column index, in codepoints from the start of the line.
    pub column_index: u32,
}

impl LineCol {
    /// The first codepoint of the input.
    pub const START: LineCol = LineCol {
        line_index: 0,
        column_index: 0,
    };

    pub const fn new(line_index: u32, column_index: u32) -> Self {
        LineCol {
            line_index,
            column_index,
        }
    }

    /// One-based line number, as shown to users.
    #[inline]
    pub const fn line(self) -> u32 {
        self.line_index + 1
    }

    /// One-based column number, as shown to users.
    #[inline]
    pub const fn column(self) -> u32 {
        self.column_index + 1
    }

    /// Account for one consumed codepoint.
    #[inline]
    pub(crate) fn advance_char(&mut self, c: char) {
        if c == '\n' {
            self.line_index += 1;
            self.column_index = 0;
        } else {
            self.column_index += 1;
        }
    }

    /// Account for a consumed literal, walking through embedded newlines.
    ///
    /// Only the text after the last newline contributes to the column.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "line and column counts are bounded by u32 positions"
    )]
    pub(crate) fn advance_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        match memchr::memrchr(b'\n', bytes) {
            Some(last) => {
                self.line_index += memchr::memchr_iter(b'\n', bytes).count() as u32;
                self.column_index = s[last + 1..].chars().count() as u32;
            }
            None => self.column_index += s.chars().count() as u32,
        }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line(), self.column())
    }
}

/// Byte offset paired with its line/column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    /// Byte offset from the start of the buffer.
    pub offset: usize,
    pub loc: LineCol,
}
