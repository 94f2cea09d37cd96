//! helium-util - Shared foundation types for the Helium compiler pipeline.
//!
//! This crate holds the types every pipeline stage needs but none of them
//! own exclusively: source position tracking, the multi-file source
//! registry `include` re-enters the pipeline against, and single-shot
//! diagnostic rendering.

pub mod diagnostic;
pub mod error;
pub mod position;
pub mod source_map;

pub use diagnostic::{Diagnostic, Handler};
pub use error::{IntoDiagnostic, SourceReadError};
pub use position::Position;
pub use source_map::{SourceFile, SourceMap};
