//! Compile errors, plus the lex/parse errors that can surface while
//! `include` recurses back into the earlier pipeline stages.

use helium_lex::LexError;
use helium_par::ParseError;
use helium_util::{IntoDiagnostic, Position, SourceReadError};
use thiserror::Error;

/// `spec.md` §7's Compile row, plus the two earlier stages' errors
/// wrapped through so a single error type covers everything `include`
/// can fail with once it re-enters lex→parse→compile.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("undefined symbol '{name}'")]
    UndefinedSymbol { name: String, pos: Position },

    #[error("'{name}' is already declared in this scope")]
    DuplicateInScope { name: String, pos: Position },

    #[error("invalid numeric literal '{text}'")]
    InvalidNumericLiteral { text: String, pos: Position },

    #[error("include '{path}' failed: {source}")]
    IncludeReadFailure {
        path: String,
        pos: Position,
        #[source]
        source: SourceReadError,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl IntoDiagnostic for CompileError {
    fn pos(&self) -> &Position {
        match self {
            CompileError::UndefinedSymbol { pos, .. } => pos,
            CompileError::DuplicateInScope { pos, .. } => pos,
            CompileError::InvalidNumericLiteral { pos, .. } => pos,
            CompileError::IncludeReadFailure { pos, .. } => pos,
            CompileError::Lex(e) => e.pos(),
            CompileError::Parse(e) => e.pos(),
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
