//! Identifier and keyword lexing.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lexes an identifier starting at the cursor's current position,
/// classifying it as a keyword token if it matches a reserved word.
pub fn lex_identifier(cursor: &mut Cursor) -> Token {
    let pos = cursor.snapshot();
    let mut value = String::new();
    while is_ident_continue(cursor.current_char()) {
        value.push(cursor.current_char());
        cursor.advance();
    }

    let kind = match value.as_str() {
        "true" | "false" => TokenKind::Bool,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "loop" => TokenKind::Loop,
        "include" => TokenKind::Include,
        "fn" => TokenKind::Function,
        _ => TokenKind::Symbol,
    };

    Token::new(value, kind, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_their_kinds() {
        for (src, kind) in [
            ("true", TokenKind::Bool),
            ("false", TokenKind::Bool),
            ("null", TokenKind::Null),
            ("return", TokenKind::Return),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("loop", TokenKind::Loop),
            ("include", TokenKind::Include),
            ("fn", TokenKind::Function),
        ] {
            let mut cursor = Cursor::new(src, "t.he");
            let tok = lex_identifier(&mut cursor);
            assert_eq!(tok.kind, kind, "{src}");
            assert_eq!(tok.value, src);
        }
    }

    #[test]
    fn other_identifiers_are_symbols() {
        let mut cursor = Cursor::new("foo_bar2", "t.he");
        let tok = lex_identifier(&mut cursor);
        assert_eq!(tok.kind, TokenKind::Symbol);
        assert_eq!(tok.value, "foo_bar2");
    }
}
