//! Whitespace and comment skipping.
//!
//! Run before every token is lexed. `\n` is deliberately *not* consumed
//! here: it is a real token (`TokenKind::Newline`), handled by the core
//! dispatch, since the parser uses it as an implicit statement separator.

use crate::cursor::Cursor;

pub fn skip_whitespace_and_comments(cursor: &mut Cursor) {
    loop {
        match cursor.current_char() {
            ' ' | '\t' | '\r' => cursor.advance(),
            '#' => {
                while !cursor.is_at_end() && cursor.current_char() != '\n' {
                    cursor.advance();
                }
            }
            _ => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_spaces_tabs_and_line_comments() {
        let mut cursor = Cursor::new("   \t# a comment\nx", "t.he");
        skip_whitespace_and_comments(&mut cursor);
        assert_eq!(cursor.current_char(), '\n');
    }

    #[test]
    fn stops_at_newline_without_consuming_it() {
        let mut cursor = Cursor::new("\nx", "t.he");
        skip_whitespace_and_comments(&mut cursor);
        assert_eq!(cursor.current_char(), '\n');
    }
}
