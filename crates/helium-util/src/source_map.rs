//! Multi-file source registry.
//!
//! `include` re-enters the whole pipeline for another file; the
//! [`SourceMap`] gives each included file a stable name to show in
//! diagnostics without the compiler needing to thread file handles
//! through the recursive call.

use std::collections::HashMap;
use std::path::Path;

/// A single loaded source file: its origin name and full text.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub origin: String,
    pub text: String,
}

/// Registry of source files seen during one compilation, keyed by origin
/// name. Reading a file twice (e.g. two `include`s of the same path)
/// reuses the cached text rather than touching the filesystem again.
#[derive(Default)]
pub struct SourceMap {
    files: HashMap<String, SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register source text directly (used for the top-level script).
    pub fn insert(&mut self, origin: impl Into<String>, text: impl Into<String>) -> &SourceFile {
        let origin = origin.into();
        self.files.entry(origin.clone()).or_insert(SourceFile {
            origin,
            text: text.into(),
        })
    }

    /// Read `path` from disk and register it, returning the cached entry
    /// if it was already loaded under this exact path string.
    pub fn load(&mut self, path: &str) -> std::io::Result<&SourceFile> {
        if !self.files.contains_key(path) {
            let text = std::fs::read_to_string(Path::new(path))?;
            self.files.insert(
                path.to_string(),
                SourceFile {
                    origin: path.to_string(),
                    text,
                },
            );
        }
        Ok(&self.files[path])
    }

    pub fn get(&self, origin: &str) -> Option<&SourceFile> {
        self.files.get(origin)
    }
}
