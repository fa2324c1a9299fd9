//! Top-level declaration parsing

use super::ast::*;
use super::state::*;
use crate::frontend::tokens::*;
use tracing::trace;

impl<'a> ParserState<'a> {
    /// Parse one top-level declaration
    pub(crate) fn parse_decl(&mut self) -> ParseResult<Decl> {
        match self.current_kind() {
            Some(TokenKind::KwType) => self.parse_type_decl().map(Decl::Type),
            Some(TokenKind::KwMacro) => self.parse_macro_decl().map(Decl::Macro),
            _ => self.parse_method_decl().map(Decl::Method),
        }
    }

    /// Parse type declaration: `type Name is Type`
    fn parse_type_decl(&mut self) -> ParseResult<TypeDecl> {
        let start = self.mark();
        self.expect(&TokenKind::KwType)?;
        let (name, _) = self.expect_identifier()?;
        self.expect(&TokenKind::KwIs)?;
        let ty = self.parse_type()?;

        // Registered only now: the declared type is unknown inside its own body
        self.declare_type(&name);
        trace!("declared type {}", name);

        Ok(TypeDecl {
            name,
            ty,
            span: self.span_from(start),
        })
    }

    /// Parse macro declaration: `macro name(a, b) is Expr`
    fn parse_macro_decl(&mut self) -> ParseResult<MacroDecl> {
        let start = self.mark();
        self.expect(&TokenKind::KwMacro)?;
        let (name, _) = self.expect_identifier()?;
        self.expect(&TokenKind::LParen)?;

        let mut params = Vec::new();
        while !self.at_end() && !self.at(&TokenKind::RParen) {
            if !params.is_empty() {
                self.expect(&TokenKind::Comma)?;
            }
            let (param, _) = self.expect_identifier()?;
            params.push(param);
        }

        self.expect(&TokenKind::RParen)?;
        self.expect(&TokenKind::KwIs)?;
        let body = self.parse_expr()?;

        self.declare_macro(&name);
        trace!("declared macro {}/{}", name, params.len());

        Ok(MacroDecl {
            name,
            params,
            body,
            span: self.span_from(start),
        })
    }

    /// Parse method declaration: `Type name(Type a, Type b) { Stmt* }`
    fn parse_method_decl(&mut self) -> ParseResult<MethodDecl> {
        let start = self.mark();
        let ret = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;
        self.expect(&TokenKind::LParen)?;

        let mut params = Vec::new();
        while !self.at_end() && !self.at(&TokenKind::RParen) {
            if !params.is_empty() {
                self.expect(&TokenKind::Comma)?;
            }
            let param_start = self.mark();
            let ty = self.parse_type()?;
            let (param, _) = self.expect_identifier()?;
            params.push(Parameter {
                ty,
                name: param,
                span: self.span_from(param_start),
            });
        }

        self.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(MethodDecl {
            name,
            ret,
            params,
            body,
            span: self.span_from(start),
        })
    }
}
