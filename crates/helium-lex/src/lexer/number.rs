//! Numeric literal lexing.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lexes an integer or float literal. A `.` is only consumed as a decimal
/// point when it is followed by a digit, so `1.add(x)`-style `.`-access on
/// a literal does not get swallowed into the number.
pub fn lex_number(cursor: &mut Cursor) -> Token {
    let pos = cursor.snapshot();
    let mut value = String::new();

    while cursor.current_char().is_ascii_digit() {
        value.push(cursor.current_char());
        cursor.advance();
    }

    let mut kind = TokenKind::Integer;
    if cursor.current_char() == '.' && cursor.peek_char(1).is_ascii_digit() {
        kind = TokenKind::Float;
        value.push(cursor.current_char());
        cursor.advance();
        while cursor.current_char().is_ascii_digit() {
            value.push(cursor.current_char());
            cursor.advance();
        }
    }

    Token::new(value, kind, pos)
}
