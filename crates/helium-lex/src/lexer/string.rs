//! String literal lexing.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// Lexes a `"`-delimited string. The body is copied verbatim; there is
/// no escape processing, per `spec.md` §4.B.
pub fn lex_string(cursor: &mut Cursor) -> Result<Token, LexError> {
    let pos = cursor.snapshot();
    cursor.advance(); // opening quote

    let mut value = String::new();
    loop {
        if cursor.is_at_end() {
            return Err(LexError::UnterminatedString { pos });
        }
        match cursor.current_char() {
            '"' => {
                cursor.advance();
                break;
            }
            '\n' => return Err(LexError::UnterminatedString { pos }),
            c => {
                value.push(c);
                cursor.advance();
            }
        }
    }

    Ok(Token::new(value, TokenKind::String, pos))
}
