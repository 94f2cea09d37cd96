//! Token and TokenKind definitions.

use helium_util::Position;

/// The closed set of token kinds the lexer can produce. `Whitespace` and
/// `Comment` are produced internally and skipped before a token is ever
/// handed back to the caller; `spec.md` invariant 1 requires the parser
/// never sees them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Symbol,
    Integer,
    Float,
    Bool,
    String,
    Null,
    Operator,
    Assign,
    Call,
    Function,
    Loop,
    If,
    Else,
    Return,
    Include,
    Separator,
    Colon,
    Dot,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftSquare,
    RightSquare,
    Newline,
    Whitespace,
    Comment,
    Eof,
}

/// A single lexical token: its literal text, kind, and frozen starting
/// position. `pos` is cloned from the cursor at the *start* of the token
/// and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    pub pos: Position,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind, pos: Position) -> Self {
        Self {
            value: value.into(),
            kind,
            pos,
        }
    }

    pub fn eof(pos: Position) -> Self {
        Self::new(String::new(), TokenKind::Eof, pos)
    }
}
