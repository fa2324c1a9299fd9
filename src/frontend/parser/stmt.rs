//! Statement parsing

use super::ast::*;
use super::state::*;
use crate::frontend::tokens::*;
use indexmap::IndexMap;
use tracing::trace;

impl<'a> ParserState<'a> {
    /// Parse a block: `{ Stmt* }`
    pub(crate) fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(&TokenKind::LBrace)?;

        let mut stmts = Vec::new();
        while !self.at_end() && !self.at(&TokenKind::RBrace) {
            stmts.push(self.parse_stmt(true)?);
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(stmts)
    }

    /// Parse a statement
    ///
    /// # Arguments
    /// * `with_semicolon` - Whether simple statements must be terminated by
    ///   `;`. Only the increment of a for-loop is parsed without one.
    pub(crate) fn parse_stmt(
        &mut self,
        with_semicolon: bool,
    ) -> ParseResult<Stmt> {
        let token = self.check_not_eof()?;

        let stmt = match &token.kind {
            TokenKind::KwAssert => self.parse_assert_stmt()?,
            TokenKind::KwReturn => self.parse_return_stmt()?,
            TokenKind::KwPrint => self.parse_print_stmt()?,
            TokenKind::KwBreak => self.parse_keyword_stmt(&TokenKind::KwBreak, StmtKind::Break)?,
            TokenKind::KwContinue => {
                self.parse_keyword_stmt(&TokenKind::KwContinue, StmtKind::Continue)?
            }
            // compound statements carry their own terminators
            TokenKind::KwIf => return self.parse_if_stmt(),
            TokenKind::KwWhile => return self.parse_while_stmt(),
            TokenKind::KwDo => return self.parse_do_stmt(),
            TokenKind::KwFor => return self.parse_for_stmt(),
            TokenKind::KwSwitch => return self.parse_switch_stmt(),
            _ if self.next_is_call() => {
                let invoke = self.parse_invoke()?;
                Stmt {
                    span: invoke.span,
                    kind: StmtKind::Invoke(invoke),
                }
            }
            _ if self.is_type_ahead(0) => {
                let start = self.mark();
                let decl = self.parse_var_decl()?;
                Stmt {
                    kind: StmtKind::VariableDeclaration(decl),
                    span: self.span_from(start),
                }
            }
            _ => self.parse_invoke_or_assign_stmt()?,
        };

        if with_semicolon {
            self.expect(&TokenKind::Semicolon)?;
        }
        Ok(stmt)
    }

    /// Speculatively parse an expression; keep it if it is an invocation,
    /// otherwise rewind and parse an assignment.
    fn parse_invoke_or_assign_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        let checkpoint = self.checkpoint();

        if let Expr::Invoke(invoke) = self.parse_expr()? {
            return Ok(Stmt {
                kind: StmtKind::Invoke(invoke),
                span: self.span_from(start),
            });
        }

        trace!("not an invocation, reparsing as assignment");
        self.restore(checkpoint);
        self.parse_assign_stmt()
    }

    /// Parse assignment: `LVal = Expr`
    fn parse_assign_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        let lhs = self.parse_expr()?;
        if !lhs.is_lvalue() {
            return Err(self.error_at(format!("expecting lval, found {}.", lhs), lhs.span()));
        }
        self.expect(&TokenKind::Assign)?;
        let rhs = self.parse_expr()?;

        Ok(Stmt {
            kind: StmtKind::Assign { lhs, rhs },
            span: self.span_from(start),
        })
    }

    /// Parse variable declaration: `Type name [= Expr]`
    pub(crate) fn parse_var_decl(&mut self) -> ParseResult<VarDecl> {
        let ty = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;
        let initialiser = if self.skip(&TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(VarDecl {
            ty,
            name,
            initialiser,
        })
    }

    fn parse_assert_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        self.expect(&TokenKind::KwAssert)?;
        let expr = self.parse_expr()?;
        Ok(Stmt {
            kind: StmtKind::Assert(expr),
            span: self.span_from(start),
        })
    }

    fn parse_print_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        self.expect(&TokenKind::KwPrint)?;
        let expr = self.parse_expr()?;
        Ok(Stmt {
            kind: StmtKind::Print(expr),
            span: self.span_from(start),
        })
    }

    /// Parse return statement: `return [Expr]`
    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        self.expect(&TokenKind::KwReturn)?;
        let expr = if !self.at_end() && !self.at(&TokenKind::Semicolon) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Stmt {
            kind: StmtKind::Return(expr),
            span: self.span_from(start),
        })
    }

    /// `break` and `continue`
    fn parse_keyword_stmt(
        &mut self,
        keyword: &TokenKind,
        kind: StmtKind,
    ) -> ParseResult<Stmt> {
        let span = self.expect(keyword)?.span;
        Ok(Stmt { kind, span })
    }

    /// Parse if statement: `if (Expr) Block [else (IfStmt | Block)]`
    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        self.expect(&TokenKind::KwIf)?;
        self.expect(&TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let span = self.span_from(start);

        let true_branch = self.parse_block()?;
        let false_branch = if self.skip(&TokenKind::KwElse) {
            if self.at(&TokenKind::KwIf) {
                vec![self.parse_if_stmt()?]
            } else {
                self.parse_block()?
            }
        } else {
            Vec::new()
        };

        Ok(Stmt {
            kind: StmtKind::IfElse {
                condition,
                true_branch,
                false_branch,
            },
            span,
        })
    }

    /// Parse while statement: `while (Expr) Block`
    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        self.expect(&TokenKind::KwWhile)?;
        self.expect(&TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let span = self.span_from(start);
        let body = self.parse_block()?;

        Ok(Stmt {
            kind: StmtKind::While { condition, body },
            span,
        })
    }

    /// Parse do statement: `do Block while (Expr);`
    fn parse_do_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        self.expect(&TokenKind::KwDo)?;
        let body = self.parse_block()?;
        self.expect(&TokenKind::KwWhile)?;
        self.expect(&TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        self.expect(&TokenKind::Semicolon)?;

        Ok(Stmt {
            kind: StmtKind::DoWhile { body, condition },
            span: self.span_from(start),
        })
    }

    /// Parse for statement: `for (VarDecl; Expr; Stmt) Block`
    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        self.expect(&TokenKind::KwFor)?;
        self.expect(&TokenKind::LParen)?;
        let declaration = self.parse_var_decl()?;
        self.expect(&TokenKind::Semicolon)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::Semicolon)?;
        let increment = self.parse_stmt(false)?;
        self.expect(&TokenKind::RParen)?;
        let span = self.span_from(start);
        let body = self.parse_block()?;

        Ok(Stmt {
            kind: StmtKind::For {
                declaration,
                condition,
                increment: Box::new(increment),
                body,
            },
            span,
        })
    }

    /// Parse switch statement: `switch (Expr) { Case* }`
    fn parse_switch_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.mark();
        self.expect(&TokenKind::KwSwitch)?;
        self.expect(&TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let span = self.span_from(start);

        self.expect(&TokenKind::LBrace)?;
        let cases = self.parse_switch_cases()?;
        self.expect(&TokenKind::RBrace)?;

        Ok(Stmt {
            kind: StmtKind::Switch { expr, cases },
            span,
        })
    }

    /// Parse `case Constant: Stmt*` and `default: Stmt*` blocks
    fn parse_switch_cases(&mut self) -> ParseResult<Vec<Case>> {
        let mut cases = Vec::new();

        while !self.at_end() && !self.at(&TokenKind::RBrace) {
            let start = self.mark();
            let value = if self.skip(&TokenKind::KwCase) {
                let expr = self.parse_expr()?;
                Some(self.reduce_constant(expr)?)
            } else {
                self.expect(&TokenKind::KwDefault)?;
                None
            };
            self.expect(&TokenKind::Colon)?;
            let span = self.span_from(start);

            let mut body = Vec::new();
            while !self.at_end()
                && !self.at(&TokenKind::RBrace)
                && !self.at(&TokenKind::KwCase)
                && !self.at(&TokenKind::KwDefault)
            {
                body.push(self.parse_stmt(true)?);
            }

            cases.push(Case { value, body, span });
        }

        Ok(cases)
    }

    /// Reduce a case label to a literal constant tree
    pub(crate) fn reduce_constant(
        &self,
        expr: Expr,
    ) -> ParseResult<Constant> {
        match expr {
            Expr::Constant(constant, _) => Ok(constant),
            Expr::ArrayInitialiser { elements, .. } => elements
                .into_iter()
                .map(|element| self.reduce_constant(element))
                .collect::<ParseResult<Vec<_>>>()
                .map(Constant::Array),
            Expr::RecordConstructor { fields, .. } => {
                let mut values = IndexMap::with_capacity(fields.len());
                for field in fields {
                    let (name, value) = field.into_parts();
                    values.insert(name, self.reduce_constant(value)?);
                }
                Ok(Constant::Record(values))
            }
            other => Err(self.error_at("constant expression expected", other.span())),
        }
    }
}
