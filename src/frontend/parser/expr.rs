//! Expression parsing
//!
//! Precedence, loosest first:
//!
//! | Level          | Operators                      | Associativity |
//! |----------------|--------------------------------|---------------|
//! | logical        | `&&` `\|\|` (one shared level) | right         |
//! | relational     | `<=` `<` `>=` `>` `==` `!=`    | none (single) |
//! | additive       | `+` `-`                        | right         |
//! | multiplicative | `*` `/` `%`                    | right         |
//! | index term     | `e[i]` `e.f`                   | left          |
//!
//! Right associativity falls out of recursing into the same level for the
//! right operand, so `1 - 2 - 3` is `1 - (2 - 3)`.

use super::ast::*;
use super::state::*;
use crate::frontend::tokens::*;
use crate::util::pair::Pair;
use std::collections::HashSet;

fn logical_op(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::And => Some(BinOp::And),
        TokenKind::Or => Some(BinOp::Or),
        _ => None,
    }
}

fn relational_op(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Le => Some(BinOp::Le),
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::Ge => Some(BinOp::Ge),
        TokenKind::Gt => Some(BinOp::Gt),
        TokenKind::Eq => Some(BinOp::Eq),
        TokenKind::Neq => Some(BinOp::Neq),
        _ => None,
    }
}

fn additive_op(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Star => Some(BinOp::Mul),
        TokenKind::Slash => Some(BinOp::Div),
        TokenKind::Percent => Some(BinOp::Rem),
        _ => None,
    }
}

impl<'a> ParserState<'a> {
    /// Parse an expression
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.check_not_eof()?;
        let start = self.mark();
        let lhs = self.parse_relational_expr()?;

        match self.current_kind().and_then(logical_op) {
            Some(op) => {
                self.bump();
                let rhs = self.parse_expr()?;
                Ok(self.binary(op, lhs, rhs, start))
            }
            None => Ok(lhs),
        }
    }

    /// Parse at most one comparison; `a < b < c` is not a single expression
    fn parse_relational_expr(&mut self) -> ParseResult<Expr> {
        let start = self.mark();
        let lhs = self.parse_additive_expr()?;

        match self.current_kind().and_then(relational_op) {
            Some(op) => {
                self.bump();
                let rhs = self.parse_additive_expr()?;
                Ok(self.binary(op, lhs, rhs, start))
            }
            None => Ok(lhs),
        }
    }

    fn parse_additive_expr(&mut self) -> ParseResult<Expr> {
        let start = self.mark();
        let lhs = self.parse_multiplicative_expr()?;

        match self.current_kind().and_then(additive_op) {
            Some(op) => {
                self.bump();
                let rhs = self.parse_additive_expr()?;
                Ok(self.binary(op, lhs, rhs, start))
            }
            None => Ok(lhs),
        }
    }

    fn parse_multiplicative_expr(&mut self) -> ParseResult<Expr> {
        let start = self.mark();
        let lhs = self.parse_index_term()?;

        match self.current_kind().and_then(multiplicative_op) {
            Some(op) => {
                self.bump();
                let rhs = self.parse_multiplicative_expr()?;
                Ok(self.binary(op, lhs, rhs, start))
            }
            None => Ok(lhs),
        }
    }

    /// Parse a term followed by any chain of `[index]` and `.field`
    fn parse_index_term(&mut self) -> ParseResult<Expr> {
        self.check_not_eof()?;
        let start = self.mark();
        let mut lhs = self.parse_term()?;

        loop {
            match self.current_kind() {
                Some(TokenKind::LBracket) => {
                    self.bump();
                    let index = self.parse_additive_expr()?;
                    self.expect(&TokenKind::RBracket)?;
                    lhs = Expr::IndexOf {
                        source: Box::new(lhs),
                        index: Box::new(index),
                        span: self.span_from(start),
                    };
                }
                Some(TokenKind::Dot) => {
                    self.bump();
                    let (field, _) = self.expect_identifier()?;
                    lhs = Expr::RecordAccess {
                        source: Box::new(lhs),
                        field,
                        span: self.span_from(start),
                    };
                }
                _ => break,
            }
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let token = self.check_not_eof()?;
        let span = token.span;

        let constant = match &token.kind {
            TokenKind::LParen => {
                self.bump();
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                return Ok(expr);
            }
            TokenKind::Identifier(_) if self.next_is_call() => {
                return self.parse_invoke().map(Expr::Invoke);
            }
            TokenKind::Identifier(name) => {
                self.bump();
                return Ok(Expr::Variable(name.clone(), span));
            }
            TokenKind::Minus => return self.parse_negation_expr(),
            TokenKind::Bar => return self.parse_length_of_expr(),
            TokenKind::LBracket => return self.parse_array_expr(),
            TokenKind::LBrace => return self.parse_record_constructor(),
            TokenKind::Not => {
                let start = self.mark();
                self.bump();
                let operand = self.parse_term()?;
                return Ok(Expr::Unary {
                    op: UnOp::Not,
                    operand: Box::new(operand),
                    span: self.span_from(start),
                });
            }
            TokenKind::KwNull => Constant::Null,
            TokenKind::KwTrue => Constant::Bool(true),
            TokenKind::KwFalse => Constant::Bool(false),
            TokenKind::IntLiteral(n) => Constant::Int(*n),
            TokenKind::CharLiteral(c) => Constant::Char(*c),
            TokenKind::StringLiteral(s) => Constant::String(s.clone()),
            other => {
                return Err(self.error_at(format!("unrecognised term (\"{}\")", other), span));
            }
        };

        self.bump();
        Ok(Expr::Constant(constant, span))
    }

    /// Is the cursor on `name (`?
    #[inline]
    pub(crate) fn next_is_call(&self) -> bool {
        matches!(
            (self.peek_nth(0).map(|t| &t.kind), self.peek_nth(1).map(|t| &t.kind)),
            (Some(TokenKind::Identifier(_)), Some(TokenKind::LParen))
        )
    }

    /// Parse invocation: `name(arg, ...)`
    pub(crate) fn parse_invoke(&mut self) -> ParseResult<Invoke> {
        let start = self.mark();
        let (name, _) = self.expect_identifier()?;
        self.expect(&TokenKind::LParen)?;

        let mut args = Vec::new();
        while !self.at_end() && !self.at(&TokenKind::RParen) {
            if !args.is_empty() {
                self.expect(&TokenKind::Comma)?;
            }
            args.push(self.parse_expr()?);
        }

        self.expect(&TokenKind::RParen)?;
        Ok(Invoke {
            name,
            args,
            span: self.span_from(start),
        })
    }

    /// Parse `-e`.
    ///
    /// A minus directly in front of an integer literal folds into a negative
    /// constant; anything else, parentheses included, becomes a negate node.
    fn parse_negation_expr(&mut self) -> ParseResult<Expr> {
        let start = self.mark();
        self.expect(&TokenKind::Minus)?;
        let literal = matches!(self.current_kind(), Some(TokenKind::IntLiteral(_)));
        let operand = self.parse_index_term()?;
        let span = self.span_from(start);

        match operand {
            Expr::Constant(Constant::Int(n), _) if literal => {
                Ok(Expr::Constant(Constant::Int(n.wrapping_neg()), span))
            }
            operand => Ok(Expr::Unary {
                op: UnOp::Neg,
                operand: Box::new(operand),
                span,
            }),
        }
    }

    /// Parse array length: `|e|`
    fn parse_length_of_expr(&mut self) -> ParseResult<Expr> {
        let start = self.mark();
        self.expect(&TokenKind::Bar)?;
        let operand = self.parse_index_term()?;
        self.expect(&TokenKind::Bar)?;
        Ok(Expr::Unary {
            op: UnOp::LengthOf,
            operand: Box::new(operand),
            span: self.span_from(start),
        })
    }

    /// Parse `[a, b, c]` or `[value; size]`.
    ///
    /// The token after the first element decides: `;` commits to a
    /// generator, anything else to an initialiser list.
    fn parse_array_expr(&mut self) -> ParseResult<Expr> {
        let start = self.mark();
        self.expect(&TokenKind::LBracket)?;

        let mut elements = Vec::new();
        if self.check_not_eof()?.kind != TokenKind::RBracket {
            let first = self.parse_expr()?;
            if self.check_not_eof()?.kind == TokenKind::Semicolon {
                self.bump();
                let size = self.parse_expr()?;
                self.expect(&TokenKind::RBracket)?;
                return Ok(Expr::ArrayGenerator {
                    value: Box::new(first),
                    size: Box::new(size),
                    span: self.span_from(start),
                });
            }

            elements.push(first);
            while self.check_not_eof()?.kind != TokenKind::RBracket {
                self.expect(&TokenKind::Comma)?;
                elements.push(self.parse_expr()?);
            }
        }

        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::ArrayInitialiser {
            elements,
            span: self.span_from(start),
        })
    }

    /// Parse record constructor: `{name: e, ...}` with unique names
    fn parse_record_constructor(&mut self) -> ParseResult<Expr> {
        let start = self.mark();
        self.expect(&TokenKind::LBrace)?;

        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        while self.check_not_eof()?.kind != TokenKind::RBrace {
            if !fields.is_empty() {
                self.expect(&TokenKind::Comma)?;
            }
            let (name, name_span) = self.expect_identifier()?;
            if !seen.insert(name.clone()) {
                return Err(self.error_at("duplicate record key", name_span));
            }
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_expr()?;
            fields.push(Pair::new(name, value));
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(Expr::RecordConstructor {
            fields,
            span: self.span_from(start),
        })
    }

    fn binary(
        &self,
        op: BinOp,
        lhs: Expr,
        rhs: Expr,
        start: usize,
    ) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span: self.span_from(start),
        }
    }
}
