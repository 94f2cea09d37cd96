//! Core lexer: the main token-dispatch loop.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::lexer::comment::skip_whitespace_and_comments;
use crate::lexer::identifier::{is_ident_start, lex_identifier};
use crate::lexer::number::lex_number;
use crate::lexer::operator as op;
use crate::lexer::string::lex_string;
use crate::token::{Token, TokenKind};

/// Turns a source buffer into tokens.
///
/// `Lexer` is an iterator-style pull API (`next_token`); [`lexify`] is the
/// contract-level entry point that drains it into a complete, `Eof`-
/// terminated sequence.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    emitted_eof: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, origin: impl Into<String>) -> Self {
        Self {
            cursor: Cursor::new(source, origin),
            emitted_eof: false,
        }
    }

    /// Returns the next token, or `None` once `Eof` has already been
    /// produced once.
    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        if self.emitted_eof {
            return None;
        }

        skip_whitespace_and_comments(&mut self.cursor);
        let pos = self.cursor.snapshot();

        if self.cursor.is_at_end() {
            self.emitted_eof = true;
            return Some(Ok(Token::eof(pos)));
        }

        let tok = match self.cursor.current_char() {
            '\n' => {
                self.cursor.advance();
                Ok(Token::new("\n", TokenKind::Newline, pos))
            }
            '(' => Ok(bracket(&mut self.cursor, TokenKind::LeftParen)),
            ')' => Ok(bracket(&mut self.cursor, TokenKind::RightParen)),
            '{' => Ok(bracket(&mut self.cursor, TokenKind::LeftBrace)),
            '}' => Ok(bracket(&mut self.cursor, TokenKind::RightBrace)),
            '[' => Ok(bracket(&mut self.cursor, TokenKind::LeftSquare)),
            ']' => Ok(bracket(&mut self.cursor, TokenKind::RightSquare)),
            ',' => Ok(bracket(&mut self.cursor, TokenKind::Separator)),
            ':' => Ok(bracket(&mut self.cursor, TokenKind::Colon)),
            '.' => Ok(bracket(&mut self.cursor, TokenKind::Dot)),
            '@' => Ok(bracket(&mut self.cursor, TokenKind::Call)),
            '$' => Ok(bracket(&mut self.cursor, TokenKind::Function)),
            '+' => Ok(op::lex_plus(&mut self.cursor)),
            '-' => Ok(op::lex_minus(&mut self.cursor)),
            '*' => Ok(op::lex_star(&mut self.cursor)),
            '/' => Ok(op::lex_slash(&mut self.cursor)),
            '%' => Ok(op::lex_percent(&mut self.cursor)),
            '^' => Ok(op::lex_caret(&mut self.cursor)),
            '~' => Ok(op::lex_tilde(&mut self.cursor)),
            '!' => Ok(op::lex_bang(&mut self.cursor)),
            '<' => Ok(op::lex_less(&mut self.cursor)),
            '>' => Ok(op::lex_greater(&mut self.cursor)),
            '&' => Ok(op::lex_ampersand(&mut self.cursor)),
            '|' => Ok(op::lex_pipe(&mut self.cursor)),
            '=' => op::lex_equals(&mut self.cursor),
            '"' => lex_string(&mut self.cursor),
            c if c.is_ascii_digit() => Ok(lex_number(&mut self.cursor)),
            c if is_ident_start(c) => Ok(lex_identifier(&mut self.cursor)),
            ch => Err(LexError::UnknownCharacter { ch, pos }),
        };

        Some(tok)
    }
}

fn bracket(cursor: &mut Cursor, kind: TokenKind) -> Token {
    let pos = cursor.snapshot();
    let ch = cursor.current_char();
    cursor.advance();
    Token::new(ch.to_string(), kind, pos)
}

/// Lex the full source buffer, returning the complete token sequence
/// terminated by exactly one `Eof`, or the first lex error encountered.
pub fn lexify(source: &str, origin: impl Into<String>) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source, origin);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next_token() {
        let is_eof = matches!(result, Ok(Token { kind: TokenKind::Eof, .. }));
        tokens.push(result?);
        if is_eof {
            break;
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexify_ends_with_single_eof() {
        let tokens = lexify("x <- 1", "t.he").unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn whitespace_and_comments_never_reach_output() {
        let tokens = lexify("x <- 1 # comment\n", "t.he").unwrap();
        assert!(tokens
            .iter()
            .all(|t| t.kind != TokenKind::Whitespace && t.kind != TokenKind::Comment));
    }

    #[test]
    fn token_offsets_are_non_decreasing() {
        let tokens = lexify("x <- 1 + 2\ny <- 3", "t.he").unwrap();
        let mut last = 0;
        for tok in &tokens {
            assert!(tok.pos.char_offset >= last);
            last = tok.pos.char_offset;
        }
    }

    #[test]
    fn unknown_character_aborts_with_position() {
        let err = lexify("x <- §", "t.he").unwrap_err();
        match err {
            LexError::UnknownCharacter { ch, pos } => {
                assert_eq!(ch, '§');
                assert_eq!(pos.column, 6);
            }
            other => panic!("expected UnknownCharacter, got {other:?}"),
        }
    }
}
