//! Parser state and token stream management

use super::SyntaxError;
use crate::frontend::tokens::*;
use crate::util::span::Span;
use std::collections::HashSet;

/// Result of every parsing routine; the first error aborts the file
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Names declared so far in the file.
///
/// Grows as declarations are parsed, so a type is only known to the
/// declaration/expression disambiguation after its `type` declaration.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    types: HashSet<String>,
    macros: HashSet<String>,
}

impl ParseContext {
    #[inline]
    pub fn is_type(
        &self,
        name: &str,
    ) -> bool {
        self.types.contains(name)
    }

    #[inline]
    pub fn is_macro(
        &self,
        name: &str,
    ) -> bool {
        self.macros.contains(name)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn macro_count(&self) -> usize {
        self.macros.len()
    }
}

/// Saved cursor position for speculative parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Parser state: an exclusive cursor over one file's tokens
#[derive(Debug)]
pub struct ParserState<'a> {
    /// File name for diagnostics
    filename: &'a str,
    /// Token stream
    tokens: &'a [Token],
    /// Current position in token stream
    pos: usize,
    /// Declared names
    context: ParseContext,
}

impl<'a> ParserState<'a> {
    /// Create a new parser state
    #[inline]
    pub fn new(
        filename: &'a str,
        tokens: &'a [Token],
    ) -> Self {
        Self {
            filename,
            tokens,
            pos: 0,
            context: ParseContext::default(),
        }
    }

    /// Check if at end of token stream
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Get current token
    #[inline]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Get current token kind
    #[inline]
    pub fn current_kind(&self) -> Option<&'a TokenKind> {
        self.current().map(|t| &t.kind)
    }

    /// Check whether the current token has the given kind
    #[inline]
    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        matches!(self.current(), Some(t) if &t.kind == kind)
    }

    /// Peek at nth token ahead
    #[inline]
    pub fn peek_nth(
        &self,
        n: usize,
    ) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    /// Advance to next token
    #[inline]
    pub fn bump(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    /// Skip a specific token
    #[inline]
    pub fn skip(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Current token, or an end-of-file error
    #[inline]
    pub fn check_not_eof(&self) -> ParseResult<&'a Token> {
        self.current().ok_or_else(|| self.eof_error())
    }

    /// Expect a specific token and consume it
    pub fn expect(
        &mut self,
        kind: &TokenKind,
    ) -> ParseResult<&'a Token> {
        let token = self.check_not_eof()?;
        if &token.kind != kind {
            let message = if kind.is_keyword() {
                format!("keyword {} expected.", kind)
            } else {
                format!("expecting '{}', found '{}'", kind, token.kind)
            };
            return Err(self.error_at(message, token.span));
        }
        self.bump();
        Ok(token)
    }

    /// Expect an identifier and consume it
    pub fn expect_identifier(&mut self) -> ParseResult<(String, Span)> {
        let token = self.check_not_eof()?;
        match &token.kind {
            TokenKind::Identifier(name) => {
                self.bump();
                Ok((name.clone(), token.span))
            }
            _ => Err(self.error_at("identifier expected", token.span)),
        }
    }

    /// Current token position, used as the start of a node
    #[inline]
    pub fn mark(&self) -> usize {
        self.pos
    }

    /// Span from the token at `start` through the last consumed token
    pub fn span_from(
        &self,
        start: usize,
    ) -> Span {
        let first = match self.tokens.get(start) {
            Some(token) => token.span,
            None => return self.last_span(),
        };
        if self.pos <= start {
            return first;
        }
        match self.tokens.get(self.pos - 1) {
            Some(last) => first.to(last.span),
            None => first,
        }
    }

    /// Save the cursor before a speculative parse
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Rewind to a saved cursor
    #[inline]
    pub fn restore(
        &mut self,
        checkpoint: Checkpoint,
    ) {
        self.pos = checkpoint.0;
    }

    #[inline]
    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    pub fn declare_type(
        &mut self,
        name: &str,
    ) {
        self.context.types.insert(name.to_string());
    }

    pub fn declare_macro(
        &mut self,
        name: &str,
    ) {
        self.context.macros.insert(name.to_string());
    }

    /// Build a syntax error for this file
    pub fn error_at(
        &self,
        message: impl Into<String>,
        span: Span,
    ) -> SyntaxError {
        SyntaxError::new(message, self.filename, span)
    }

    /// End-of-input error, located at the last token of the file
    pub fn eof_error(&self) -> SyntaxError {
        self.error_at("unexpected end-of-file", self.last_span())
    }

    fn last_span(&self) -> Span {
        self.tokens.last().map(|t| t.span).unwrap_or_else(Span::dummy)
    }
}
