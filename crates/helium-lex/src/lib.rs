//! helium-lex - Lexical scanner for the Helium core pipeline.
//!
//! Turns a source buffer into a finite, `Eof`-terminated stream of
//! [`Token`]s. See [`lexify`] for the contract-level entry point.

pub mod cursor;
pub mod error;
mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::{lexify, Lexer};
pub use token::{Token, TokenKind};
