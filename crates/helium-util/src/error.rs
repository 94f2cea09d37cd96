//! Per-stage error types shared across the pipeline.
//!
//! Each stage gets one error enum carrying a [`Position`] and a message;
//! `spec.md` §7 only promises *that* these kinds exist and get formatted
//! identically, not that the stages share an error type, so each crate
//! keeps its own enum (`LexError` in `helium-lex`, `ParseError` in
//! `helium-par`, `CompileError` in `helium-compile`) while sharing the
//! [`IntoDiagnostic`] trait defined here to turn any of them into a
//! renderable [`crate::diagnostic::Diagnostic`].

use crate::diagnostic::Diagnostic;
use crate::position::Position;

/// Anything that carries one source position and one message can be
/// turned into a [`Diagnostic`] for rendering.
pub trait IntoDiagnostic {
    fn pos(&self) -> &Position;
    fn message(&self) -> String;

    fn into_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.message(), self.pos().clone())
    }
}

/// Error reading a file for `include` (or the top-level script).
#[derive(Debug, thiserror::Error)]
#[error("failed to read '{path}': {source}")]
pub struct SourceReadError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}
