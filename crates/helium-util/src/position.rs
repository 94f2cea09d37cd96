//! Source position tracking.
//!
//! A [`Position`] is a frozen snapshot of where in a source file something
//! begins: a 1-based line/column pair, the absolute byte offset of that
//! character, the absolute offset of the start of its line, and the name
//! of the file it came from. Tokens and AST nodes carry a `Position`
//! cloned from the cursor at the moment they were produced; the cursor
//! itself keeps advancing afterwards.

use std::fmt;

/// A single point in a source file, as seen by the lexer's cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
    /// Absolute byte offset of this character in the source.
    pub char_offset: u32,
    /// Absolute byte offset of the first character of `line`.
    pub line_offset: u32,
    /// Name of the source file (or `"<stdin>"`/similar) for diagnostics.
    pub origin: String,
}

impl Position {
    /// The position of the first character of a fresh source buffer.
    pub fn start(origin: impl Into<String>) -> Self {
        Self {
            line: 1,
            column: 1,
            char_offset: 0,
            line_offset: 0,
            origin: origin.into(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) in {}", self.line, self.column, self.origin)
    }
}
