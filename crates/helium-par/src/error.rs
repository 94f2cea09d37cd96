//! Parse errors.

use helium_util::{IntoDiagnostic, Position};
use thiserror::Error;

/// Everything that can go wrong walking the token stream into an AST.
/// `spec.md` §7 names these four kinds exactly; each carries the position
/// of the offending token.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unexpected token '{found}'")]
    UnexpectedToken { found: String, pos: Position },

    #[error("premature end of file")]
    PrematureEof { pos: Position },

    #[error("invalid unary operator '{glyph}'")]
    InvalidUnary { glyph: String, pos: Position },

    #[error("include path must be a string literal")]
    NonStringInclude { pos: Position },
}

impl IntoDiagnostic for ParseError {
    fn pos(&self) -> &Position {
        match self {
            ParseError::UnexpectedToken { pos, .. }
            | ParseError::PrematureEof { pos }
            | ParseError::InvalidUnary { pos, .. }
            | ParseError::NonStringInclude { pos } => pos,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
