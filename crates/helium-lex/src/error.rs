//! Lexical errors.

use helium_util::{IntoDiagnostic, Position};

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character '{ch}'")]
    UnknownCharacter { ch: char, pos: Position },

    #[error("unterminated string literal")]
    UnterminatedString { pos: Position },
}

impl IntoDiagnostic for LexError {
    fn pos(&self) -> &Position {
        match self {
            LexError::UnknownCharacter { pos, .. } => pos,
            LexError::UnterminatedString { pos, .. } => pos,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
