//! Operator and punctuation lexing.
//!
//! Multi-character operators are recognized by lookahead before the
//! single-character fallthrough, per `spec.md` §4.B: `<-`, `<=`, `>=`,
//! `==`, `!=`, `&&`, `||`.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

fn single(cursor: &mut Cursor, kind: TokenKind) -> Token {
    let pos = cursor.snapshot();
    let ch = cursor.current_char();
    cursor.advance();
    Token::new(ch.to_string(), kind, pos)
}

fn two_char(cursor: &mut Cursor, kind: TokenKind) -> Token {
    let pos = cursor.snapshot();
    let mut value = String::new();
    value.push(cursor.current_char());
    cursor.advance();
    value.push(cursor.current_char());
    cursor.advance();
    Token::new(value, kind, pos)
}

pub fn lex_plus(cursor: &mut Cursor) -> Token {
    single(cursor, TokenKind::Operator)
}

pub fn lex_minus(cursor: &mut Cursor) -> Token {
    single(cursor, TokenKind::Operator)
}

pub fn lex_star(cursor: &mut Cursor) -> Token {
    single(cursor, TokenKind::Operator)
}

pub fn lex_slash(cursor: &mut Cursor) -> Token {
    single(cursor, TokenKind::Operator)
}

pub fn lex_percent(cursor: &mut Cursor) -> Token {
    single(cursor, TokenKind::Operator)
}

pub fn lex_caret(cursor: &mut Cursor) -> Token {
    single(cursor, TokenKind::Operator)
}

pub fn lex_tilde(cursor: &mut Cursor) -> Token {
    single(cursor, TokenKind::Operator)
}

pub fn lex_bang(cursor: &mut Cursor) -> Token {
    if cursor.peek_char(1) == '=' {
        two_char(cursor, TokenKind::Operator)
    } else {
        single(cursor, TokenKind::Operator)
    }
}

/// `<` lexes to `<-` (Assign), `<=` (Operator), or a lone `<` (Operator).
pub fn lex_less(cursor: &mut Cursor) -> Token {
    match cursor.peek_char(1) {
        '-' => two_char(cursor, TokenKind::Assign),
        '=' => two_char(cursor, TokenKind::Operator),
        _ => single(cursor, TokenKind::Operator),
    }
}

pub fn lex_greater(cursor: &mut Cursor) -> Token {
    if cursor.peek_char(1) == '=' {
        two_char(cursor, TokenKind::Operator)
    } else {
        single(cursor, TokenKind::Operator)
    }
}

pub fn lex_ampersand(cursor: &mut Cursor) -> Token {
    if cursor.peek_char(1) == '&' {
        two_char(cursor, TokenKind::Operator)
    } else {
        single(cursor, TokenKind::Operator)
    }
}

pub fn lex_pipe(cursor: &mut Cursor) -> Token {
    if cursor.peek_char(1) == '|' {
        two_char(cursor, TokenKind::Operator)
    } else {
        single(cursor, TokenKind::Operator)
    }
}

/// `==` is the only valid use of a bare `=`; a lone `=` is not a token
/// this language defines.
pub fn lex_equals(cursor: &mut Cursor) -> Result<Token, LexError> {
    if cursor.peek_char(1) == '=' {
        Ok(two_char(cursor, TokenKind::Operator))
    } else {
        let pos = cursor.snapshot();
        let ch = cursor.current_char();
        Err(LexError::UnknownCharacter { ch, pos })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_less_disambiguates_assign_le_and_lt() {
        let mut cursor = Cursor::new("<-", "t.he");
        let tok = lex_less(&mut cursor);
        assert_eq!(tok.kind, TokenKind::Assign);
        assert_eq!(tok.value, "<-");

        let mut cursor = Cursor::new("<=", "t.he");
        let tok = lex_less(&mut cursor);
        assert_eq!(tok.kind, TokenKind::Operator);
        assert_eq!(tok.value, "<=");

        let mut cursor = Cursor::new("<x", "t.he");
        let tok = lex_less(&mut cursor);
        assert_eq!(tok.kind, TokenKind::Operator);
        assert_eq!(tok.value, "<");
    }

    #[test]
    fn lex_equals_requires_double() {
        let mut cursor = Cursor::new("==", "t.he");
        assert_eq!(lex_equals(&mut cursor).unwrap().value, "==");

        let mut cursor = Cursor::new("=x", "t.he");
        assert!(lex_equals(&mut cursor).is_err());
    }

    #[test]
    fn lex_ampersand_and_pipe_double_forms() {
        let mut cursor = Cursor::new("&&", "t.he");
        assert_eq!(lex_ampersand(&mut cursor).value, "&&");
        let mut cursor = Cursor::new("&x", "t.he");
        assert_eq!(lex_ampersand(&mut cursor).value, "&");

        let mut cursor = Cursor::new("||", "t.he");
        assert_eq!(lex_pipe(&mut cursor).value, "||");
        let mut cursor = Cursor::new("|x", "t.he");
        assert_eq!(lex_pipe(&mut cursor).value, "|");
    }
}
