//! Expression parsing: shunting yard over `Primary` and `Operator`
//! tokens, plus everything that counts as a `Primary`.
//!
//! # Precedence (lower number binds looser)
//!
//! | Level | Operators |
//! |-------|-----------|
//! | 10 | `*` `/` `%` |
//! | 9  | `+` `-` |
//! | 8  | `<` `>` `<=` `>=` |
//! | 7  | `==` `!=` |
//! | 6  | `&` |
//! | 5  | `^` |
//! | 4  | `\|` |
//! | 3  | `&&` |
//! | 2  | `\|\|` |
//!
//! All binary operators are left-associative. Unary `-`, `+`, `!`, `~`
//! only apply in primary position (start of expression, or right after
//! another operator) and bind tighter than any binary operator.

use helium_ast::{AstKind, AstNode};
use helium_lex::TokenKind;

use crate::{error::ParseError, Parser};

/// Binding strength of a binary operator glyph, or `None` if the glyph
/// is not a binary operator (e.g. the unary-only `!`/`~`).
fn precedence(glyph: &str) -> Option<u8> {
    match glyph {
        "*" | "/" | "%" => Some(10),
        "+" | "-" => Some(9),
        "<" | ">" | "<=" | ">=" => Some(8),
        "==" | "!=" => Some(7),
        "&" => Some(6),
        "^" => Some(5),
        "|" => Some(4),
        "&&" => Some(3),
        "||" => Some(2),
        _ => None,
    }
}

fn is_unary_glyph(glyph: &str) -> bool {
    matches!(glyph, "-" | "+" | "!" | "~")
}

impl Parser {
    /// `Expression := shunting-yard over Primary and Operator tokens`.
    /// Two stacks, operands and operators; pop-and-apply while the
    /// operator stack's top has precedence ≥ the incoming operator's,
    /// then push the incoming operator and parse its right-hand primary.
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        let mut operands = vec![self.parse_unary_or_primary()?];
        let mut operators = Vec::new();

        while self.check(TokenKind::Operator) && precedence(&self.peek().value).is_some() {
            let op = self.eat();
            let incoming_prec = precedence(&op.value).unwrap();
            while let Some(top) = operators.last() {
                let top: &helium_lex::Token = top;
                if precedence(&top.value).unwrap() >= incoming_prec {
                    apply_top(&mut operands, operators.pop().unwrap());
                } else {
                    break;
                }
            }
            operators.push(op);
            operands.push(self.parse_unary_or_primary()?);
        }

        while let Some(op) = operators.pop() {
            apply_top(&mut operands, op);
        }

        Ok(operands.pop().expect("shunting yard always leaves exactly one operand"))
    }

    /// Unary operators are only valid in primary position; this is the
    /// only place that dispatches them, so the "primary position" rule
    /// falls out of the call structure rather than needing a flag.
    fn parse_unary_or_primary(&mut self) -> Result<AstNode, ParseError> {
        if self.check(TokenKind::Operator) {
            if is_unary_glyph(&self.peek().value) {
                let op = self.eat();
                let operand = self.parse_unary_or_primary()?;
                return Ok(AstNode::new(op.value, AstKind::UnaryExpr, op.pos, vec![operand]));
            }
            return Err(ParseError::InvalidUnary { glyph: self.peek().value.clone(), pos: self.peek().pos.clone() });
        }
        self.parse_primary()
    }

    /// `Primary := INTEGER | FLOAT | BOOL | STRING | NULL | TableInstance
    ///           | TableGet | Reference | FunctionDef | Call
    ///           | '(' Expression ')' | UnaryOp Primary`
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        match self.peek().kind {
            TokenKind::Integer => Ok(leaf_of(self.eat(), AstKind::Integer)),
            TokenKind::Float => Ok(leaf_of(self.eat(), AstKind::Float)),
            TokenKind::Bool => Ok(leaf_of(self.eat(), AstKind::Bool)),
            TokenKind::String => Ok(leaf_of(self.eat(), AstKind::String)),
            TokenKind::Null => {
                let tok = self.eat();
                Ok(AstNode::leaf("null", AstKind::Null, tok.pos))
            }
            TokenKind::LeftParen => {
                self.eat();
                let inner = self.parse_expression()?;
                self.consume(TokenKind::RightParen)?;
                Ok(inner)
            }
            TokenKind::Call => self.parse_call_expr(),
            TokenKind::Function => self.parse_function_def(),
            TokenKind::LeftBrace => self.parse_table_instance(),
            TokenKind::Symbol => {
                let name = self.eat();
                match self.peek().kind {
                    TokenKind::LeftSquare | TokenKind::Dot => {
                        let key = self.parse_table_key()?;
                        Ok(AstNode::new(name.value, AstKind::Get, name.pos, vec![key]))
                    }
                    _ => Ok(AstNode::leaf(name.value, AstKind::Reference, name.pos)),
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    /// `Call := '@' Expression '(' [Expression {',' Expression}] ')'`.
    /// Used both at statement position and inside an expression; the
    /// grammar makes no distinction, and neither does this parser. The
    /// open question in `spec.md` §9 is resolved as written there: the
    /// first child is the callee, the rest are arguments in order.
    pub(crate) fn parse_call_expr(&mut self) -> Result<AstNode, ParseError> {
        let at = self.consume(TokenKind::Call)?;
        let callee = self.parse_expression()?;
        self.consume(TokenKind::LeftParen)?;
        let mut children = vec![callee];
        if !self.check(TokenKind::RightParen) {
            children.push(self.parse_expression()?);
            while self.consume_optional(TokenKind::Separator) {
                children.push(self.parse_expression()?);
            }
        }
        self.consume(TokenKind::RightParen)?;
        Ok(AstNode::marker("args", AstKind::Call, at.pos, children))
    }

    /// `FunctionDef := '$' '(' [SYMBOL {',' SYMBOL}] ')' '{' Block '}'`
    fn parse_function_def(&mut self) -> Result<AstNode, ParseError> {
        let dollar = self.consume(TokenKind::Function)?;
        self.consume(TokenKind::LeftParen)?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            let p = self.consume(TokenKind::Symbol)?;
            params.push(AstNode::leaf(p.value, AstKind::Param, p.pos));
            while self.consume_optional(TokenKind::Separator) {
                let p = self.consume(TokenKind::Symbol)?;
                params.push(AstNode::leaf(p.value, AstKind::Param, p.pos));
            }
        }
        self.consume(TokenKind::RightParen)?;
        self.skip_newlines();
        self.consume(TokenKind::LeftBrace)?;
        let body = self.parse_block(TokenKind::RightBrace)?;
        self.consume(TokenKind::RightBrace)?;
        let params_node = AstNode::new("", AstKind::Params, dollar.pos.clone(), params);
        Ok(AstNode::new("", AstKind::Function, dollar.pos, vec![params_node, body]))
    }

    /// `TableInstance := '{' [KvPair {',' KvPair}] '}'`. Newlines are
    /// stripped around table entries, per `spec.md` §4.D.
    fn parse_table_instance(&mut self) -> Result<AstNode, ParseError> {
        let brace = self.consume(TokenKind::LeftBrace)?;
        self.skip_newlines();
        let mut pairs = Vec::new();
        if !self.check(TokenKind::RightBrace) {
            pairs.push(self.parse_kv_pair()?);
            self.skip_newlines();
            while self.consume_optional(TokenKind::Separator) {
                self.skip_newlines();
                pairs.push(self.parse_kv_pair()?);
                self.skip_newlines();
            }
        }
        self.consume(TokenKind::RightBrace)?;
        Ok(AstNode::new("", AstKind::Table, brace.pos, pairs))
    }

    /// `KvPair := Expression ':' Expression`
    fn parse_kv_pair(&mut self) -> Result<AstNode, ParseError> {
        let pos = self.peek().pos.clone();
        let key = self.parse_expression()?;
        self.consume(TokenKind::Colon)?;
        let value = self.parse_expression()?;
        Ok(AstNode::new("", AstKind::KvPair, pos, vec![key, value]))
    }
}

fn leaf_of(tok: helium_lex::Token, kind: AstKind) -> AstNode {
    AstNode::leaf(tok.value, kind, tok.pos)
}

fn apply_top(operands: &mut Vec<AstNode>, op: helium_lex::Token) {
    let rhs = operands.pop().expect("operator stack invariant: rhs present");
    let lhs = operands.pop().expect("operator stack invariant: lhs present");
    operands.push(AstNode::new(op.value, AstKind::BinaryExpr, op.pos, vec![lhs, rhs]));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_expr(src: &str) -> AstNode {
        let tokens = helium_lex::lexify(src, "t.he").unwrap();
        let mut parser = Parser::new(tokens);
        parser.parse_expression().unwrap()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let node = parse_expr("1 + 2 * 3");
        assert_eq!(node.value, "+");
        assert_eq!(node.children[1].value, "*");
    }

    #[test]
    fn same_precedence_is_left_associative() {
        let node = parse_expr("1 - 2 - 3");
        assert_eq!(node.value, "-");
        assert_eq!(node.children[0].value, "-");
        assert_eq!(node.children[0].children[0].value, "1");
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        let node = parse_expr("(1 + 2) * 3");
        assert_eq!(node.value, "*");
        assert_eq!(node.children[0].value, "+");
    }

    #[test]
    fn leading_minus_is_unary() {
        let node = parse_expr("-1 + 2");
        assert_eq!(node.value, "+");
        assert_eq!(node.children[0].kind, AstKind::UnaryExpr);
        assert_eq!(node.children[0].value, "-");
    }

    #[test]
    fn invalid_unary_glyph_errors() {
        let tokens = helium_lex::lexify("* 1", "t.he").unwrap();
        let mut parser = Parser::new(tokens);
        let err = parser.parse_expression().unwrap_err();
        assert!(matches!(err, ParseError::InvalidUnary { .. }));
    }

    #[test]
    fn bracket_get_on_symbol_yields_get_node() {
        let node = parse_expr("t[\"a\"]");
        assert_eq!(node.kind, AstKind::Get);
        assert_eq!(node.value, "t");
    }

    #[test]
    fn dot_get_lowers_to_string_key() {
        let node = parse_expr("t.a");
        assert_eq!(node.kind, AstKind::Get);
        assert_eq!(node.children[0].kind, AstKind::String);
        assert_eq!(node.children[0].value, "a");
    }

    #[test]
    fn table_literal_collects_kv_pairs_in_order() {
        let node = parse_expr("{ \"a\": 1, \"b\": 2 }");
        assert_eq!(node.kind, AstKind::Table);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].kind, AstKind::KvPair);
    }

    #[test]
    fn function_def_has_params_then_body() {
        let node = parse_expr("$(x, y) { return x }");
        assert_eq!(node.kind, AstKind::Function);
        assert_eq!(node.children[0].kind, AstKind::Params);
        assert_eq!(node.children[0].children.len(), 2);
        assert_eq!(node.children[1].kind, AstKind::Block);
    }

    #[test]
    fn call_first_child_is_callee_rest_are_args() {
        let node = parse_expr("@foo(1, 2)");
        assert_eq!(node.kind, AstKind::Call);
        assert_eq!(node.value, "args");
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[0].kind, AstKind::Reference);
    }

    #[test]
    fn call_with_no_arguments_has_only_callee() {
        let node = parse_expr("@foo()");
        assert_eq!(node.children.len(), 1);
    }
}
