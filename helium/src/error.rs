//! Top-level CLI error type. Wraps the three pipeline stages' own error
//! enums (each already implements [`IntoDiagnostic`]) plus the one error
//! class specific to driving the pipeline: failing to read the file the
//! user asked to compile.

use helium_compile::CompileError;
use helium_lex::LexError;
use helium_par::ParseError;
use helium_util::{Diagnostic, IntoDiagnostic, SourceReadError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeliumError {
    #[error(transparent)]
    SourceRead(#[from] SourceReadError),

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl HeliumError {
    /// A caret-pointer diagnostic when the failure traces to a source
    /// position, or `None` for a driver-level failure like a missing file.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            HeliumError::SourceRead(_) => None,
            HeliumError::Lex(e) => Some(e.into_diagnostic()),
            HeliumError::Parse(e) => Some(e.into_diagnostic()),
            HeliumError::Compile(e) => Some(e.into_diagnostic()),
        }
    }
}
