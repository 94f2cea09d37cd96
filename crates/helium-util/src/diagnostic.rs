//! Diagnostic rendering.
//!
//! `spec.md` §7 mandates a single error-then-abort policy: there is no
//! diagnostic accumulation and no "try again" mode, so unlike the
//! teacher's [`Handler`] (which collects a vector of diagnostics across a
//! whole compilation), this `Handler` holds at most one. The first stage
//! to call `emit` wins; later calls are ignored, mirroring "the offending
//! stage ... terminates compilation".

use crate::position::Position;
use std::cell::RefCell;

/// One error: a message plus the position it occurred at.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub message: String,
    pub pos: Position,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, pos: Position) -> Self {
        Self {
            message: message.into(),
            pos,
        }
    }

    /// Render the user-visible form specified by `spec.md` §7:
    /// ```text
    /// [err] <message> (<line>, <col>) in <origin>:
    /// 	|
    /// 	| 0001 <line text>
    /// 	| ~~~~~^
    /// ```
    /// `source` is the full text of the file named by `self.pos.origin`;
    /// when it is unavailable (e.g. the file could not be read) the
    /// snippet lines are omitted.
    pub fn render(&self, source: Option<&str>) -> String {
        let mut out = format!(
            "[err] {} ({}, {}) in {}:\n",
            self.message, self.pos.line, self.pos.column, self.pos.origin
        );
        if let Some(source) = source {
            if let Some(line_text) = source_line(source, self.pos.line) {
                let col = self.pos.column.max(1) as usize;
                out.push_str("\t|\n");
                out.push_str(&format!("\t| {:04} {}\n", self.pos.line, line_text));
                out.push_str("\t| ");
                out.push_str(&"~".repeat(col.saturating_sub(1)));
                out.push_str("^\n");
            }
        }
        out
    }
}

/// Extract the text of 1-based `line` from `source`, without its
/// trailing newline.
fn source_line(source: &str, line: u32) -> Option<&str> {
    source.lines().nth((line as usize).checked_sub(1)?)
}

/// Collects at most one [`Diagnostic`] and remembers whether any stage
/// has already failed.
#[derive(Default)]
pub struct Handler {
    diagnostic: RefCell<Option<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `diagnostic` if this is the first error reported.
    pub fn emit(&self, diagnostic: Diagnostic) {
        let mut slot = self.diagnostic.borrow_mut();
        if slot.is_none() {
            *slot = Some(diagnostic);
        }
    }

    pub fn has_error(&self) -> bool {
        self.diagnostic.borrow().is_some()
    }

    pub fn take(&self) -> Option<Diagnostic> {
        self.diagnostic.borrow_mut().take()
    }
}
