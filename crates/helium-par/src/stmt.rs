//! Statement parsing: assign, table-put, call, loop, branch, include, return.

use helium_ast::{AstKind, AstNode};
use helium_lex::TokenKind;

use crate::{error::ParseError, Parser};

impl Parser {
    /// `Statement := Assign | TablePut | Call | Loop | Branch | Include | Return`.
    /// Disambiguation on `Symbol` per `spec.md` §4.D: `[` or `.` next means
    /// `TablePut`, otherwise `Assign`.
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        match self.peek().kind {
            TokenKind::Symbol => {
                match self.lookahead1().kind {
                    TokenKind::LeftSquare | TokenKind::Dot => self.parse_table_put(),
                    _ => self.parse_assign(),
                }
            }
            TokenKind::Call => self.parse_call_expr(),
            TokenKind::Loop => self.parse_loop(),
            TokenKind::If => self.parse_branch(),
            TokenKind::Include => self.parse_include(),
            TokenKind::Return => self.parse_return(),
            _ => Err(self.unexpected()),
        }
    }

    /// `Assign := SYMBOL '<-' Expression`
    fn parse_assign(&mut self) -> Result<AstNode, ParseError> {
        let name = self.consume(TokenKind::Symbol)?;
        self.consume(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        Ok(AstNode::new(name.value, AstKind::Assign, name.pos, vec![value]))
    }

    /// `TablePut := SYMBOL ( '[' Expression ']' | '.' SYMBOL ) '<-' Expression`
    fn parse_table_put(&mut self) -> Result<AstNode, ParseError> {
        let name = self.consume(TokenKind::Symbol)?;
        let key = self.parse_table_key()?;
        self.consume(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        Ok(AstNode::new(name.value, AstKind::Put, name.pos, vec![key, value]))
    }

    /// `'[' Expression ']' | '.' SYMBOL`. The `.` form lowers to a string
    /// key node so `Put`/`Get` always key on an expression.
    pub(crate) fn parse_table_key(&mut self) -> Result<AstNode, ParseError> {
        if self.consume_optional(TokenKind::LeftSquare) {
            let key = self.parse_expression()?;
            self.consume(TokenKind::RightSquare)?;
            Ok(key)
        } else {
            self.consume(TokenKind::Dot)?;
            let field = self.consume(TokenKind::Symbol)?;
            Ok(AstNode::leaf(field.value, AstKind::String, field.pos))
        }
    }

    /// `Loop := 'loop' Expression '{' Block(RightBrace) '}'`
    fn parse_loop(&mut self) -> Result<AstNode, ParseError> {
        let kw = self.consume(TokenKind::Loop)?;
        let cond = self.parse_expression()?;
        self.skip_newlines();
        self.consume(TokenKind::LeftBrace)?;
        let body = self.parse_block(TokenKind::RightBrace)?;
        self.consume(TokenKind::RightBrace)?;
        Ok(AstNode::new("", AstKind::Loop, kw.pos, vec![cond, body]))
    }

    /// `Branch := 'if' Expression '{' Block '}' { 'else' ['if' Expression] '{' Block '}' }`.
    /// Each `else if` attaches a new `Branches` node as the last child of
    /// the preceding one, producing a right-leaning chain; a bare `else`
    /// terminates it with a one-child `"alt"` node.
    fn parse_branch(&mut self) -> Result<AstNode, ParseError> {
        let kw = self.consume(TokenKind::If)?;
        self.parse_conditional_arm(kw.pos)
    }

    fn parse_conditional_arm(&mut self, pos: helium_util::Position) -> Result<AstNode, ParseError> {
        let cond = self.parse_expression()?;
        self.skip_newlines();
        self.consume(TokenKind::LeftBrace)?;
        let body = self.parse_block(TokenKind::RightBrace)?;
        self.consume(TokenKind::RightBrace)?;
        let mut children = vec![cond, body];

        self.skip_newlines();
        if self.check(TokenKind::Else) {
            let else_tok = self.eat();
            if self.consume_optional(TokenKind::If) {
                children.push(self.parse_conditional_arm(else_tok.pos)?);
            } else {
                self.skip_newlines();
                self.consume(TokenKind::LeftBrace)?;
                let alt_body = self.parse_block(TokenKind::RightBrace)?;
                self.consume(TokenKind::RightBrace)?;
                children.push(AstNode::marker("alt", AstKind::Branches, else_tok.pos, vec![alt_body]));
            }
        }
        Ok(AstNode::marker("conditional", AstKind::Branches, pos, children))
    }

    /// `Include := 'include' STRING`
    fn parse_include(&mut self) -> Result<AstNode, ParseError> {
        let kw = self.consume(TokenKind::Include)?;
        if !self.check(TokenKind::String) {
            return Err(ParseError::NonStringInclude { pos: self.peek().pos.clone() });
        }
        let path = self.eat();
        Ok(AstNode::leaf(path.value, AstKind::Include, kw.pos))
    }

    /// `Return := 'return' Expression`
    fn parse_return(&mut self) -> Result<AstNode, ParseError> {
        let kw = self.consume(TokenKind::Return)?;
        let value = self.parse_expression()?;
        Ok(AstNode::marker("ret", AstKind::Return, kw.pos, vec![value]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(src: &str) -> AstNode {
        let tokens = helium_lex::lexify(src, "t.he").unwrap();
        let mut block = crate::parse(tokens).unwrap();
        assert_eq!(block.children.len(), 1);
        block.children.remove(0)
    }

    #[test]
    fn assign_has_name_in_value_and_one_child() {
        let node = parse_one("x <- 1");
        assert_eq!(node.kind, AstKind::Assign);
        assert_eq!(node.value, "x");
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn bracket_table_put_keys_on_expression() {
        let node = parse_one("t[\"a\"] <- 1");
        assert_eq!(node.kind, AstKind::Put);
        assert_eq!(node.value, "t");
        assert_eq!(node.children[0].kind, AstKind::String);
    }

    #[test]
    fn dot_table_put_lowers_field_to_string_key() {
        let node = parse_one("t.a <- 1");
        assert_eq!(node.kind, AstKind::Put);
        assert_eq!(node.children[0].kind, AstKind::String);
        assert_eq!(node.children[0].value, "a");
    }

    #[test]
    fn if_else_chain_is_right_leaning() {
        let node = parse_one("if x { y <- 1 } else if z { y <- 2 } else { y <- 3 }");
        assert_eq!(node.value, "conditional");
        assert_eq!(node.children.len(), 3);
        let else_if = &node.children[2];
        assert_eq!(else_if.value, "conditional");
        assert_eq!(else_if.children.len(), 3);
        let alt = &else_if.children[2];
        assert_eq!(alt.value, "alt");
        assert_eq!(alt.children.len(), 1);
    }

    #[test]
    fn bare_if_has_two_children() {
        let node = parse_one("if x { y <- 1 }");
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn include_requires_string_literal() {
        let tokens = helium_lex::lexify("include x", "t.he").unwrap();
        let err = crate::parse(tokens).unwrap_err();
        assert!(matches!(err, ParseError::NonStringInclude { .. }));
    }

    #[test]
    fn loop_has_condition_then_body() {
        let node = parse_one("loop x < 10 { x <- 1 }");
        assert_eq!(node.kind, AstKind::Loop);
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn return_wraps_single_expression() {
        let node = parse_one("return x + 1");
        assert_eq!(node.kind, AstKind::Return);
        assert_eq!(node.value, "ret");
        assert_eq!(node.children.len(), 1);
    }
}
