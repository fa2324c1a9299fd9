//! Type parsing and type lookahead

use super::ast::*;
use super::state::*;
use crate::frontend::tokens::*;
use crate::util::pair::Pair;
use std::collections::HashSet;

impl<'a> ParserState<'a> {
    /// Parse a type: a base type followed by any number of `[]`
    pub(crate) fn parse_type(&mut self) -> ParseResult<Type> {
        let start = self.mark();
        self.check_not_eof()?;
        let mut ty = self.parse_base_type()?;

        while self.at(&TokenKind::LBracket) {
            self.bump();
            self.expect(&TokenKind::RBracket)?;
            ty = Type::Array {
                element: Box::new(ty),
                span: self.span_from(start),
            };
        }

        Ok(ty)
    }

    /// Parse a type which may be the element of an array type
    fn parse_base_type(&mut self) -> ParseResult<Type> {
        let token = self.check_not_eof()?;
        let span = token.span;
        let ty = match &token.kind {
            TokenKind::KwInt => Type::Int(span),
            TokenKind::KwVoid => Type::Void(span),
            TokenKind::KwBool => Type::Bool(span),
            TokenKind::KwChar => Type::Char(span),
            TokenKind::KwString => Type::String(span),
            TokenKind::LBrace => return self.parse_record_type(),
            _ => {
                let (name, span) = self.expect_identifier()?;
                return Ok(Type::Named(name, span));
            }
        };
        self.bump();
        Ok(ty)
    }

    /// Parse record type: `{ Type name (, Type name)* }`
    ///
    /// Field names must be unique within the record.
    fn parse_record_type(&mut self) -> ParseResult<Type> {
        let start = self.mark();
        self.expect(&TokenKind::LBrace)?;

        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        while self.check_not_eof()?.kind != TokenKind::RBrace {
            if !fields.is_empty() {
                self.expect(&TokenKind::Comma)?;
            }
            let ty = self.parse_type()?;
            let (name, name_span) = self.expect_identifier()?;
            if !seen.insert(name.clone()) {
                return Err(self.error_at("duplicate field", name_span));
            }
            fields.push(Pair::new(ty, name));
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(Type::Record {
            fields,
            span: self.span_from(start),
        })
    }

    /// Check whether a type starts `offset` tokens ahead of the cursor.
    ///
    /// Only primitive type keywords and user types declared so far count;
    /// `{` and `[` are looked through.
    pub(crate) fn is_type_ahead(
        &self,
        offset: usize,
    ) -> bool {
        match self.peek_nth(offset).map(|t| &t.kind) {
            Some(kind) if kind.is_primitive_type() => true,
            Some(TokenKind::Identifier(name)) => self.context().is_type(name),
            Some(TokenKind::LBrace) | Some(TokenKind::LBracket) => self.is_type_ahead(offset + 1),
            _ => false,
        }
    }
}
