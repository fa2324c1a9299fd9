//! Parser module
//!
//! Hand-written recursive-descent parser for WhileLang. Turns the token
//! stream of one file into a [`File`] of type, macro and method
//! declarations.
//!
//! Two grammar ambiguities are resolved here:
//! - declaration vs. expression statement, by a type lookahead that only
//!   knows primitive types and user types declared *earlier* in the file;
//! - invocation vs. assignment, by speculatively parsing an expression and
//!   rewinding the cursor when it is not an invocation.
//!
//! Parsing stops at the first [`SyntaxError`]; there is no recovery.

pub mod ast;
mod decl;
mod expr;
mod state;
mod stmt;
mod type_parser;

pub use state::{Checkpoint, ParseContext, ParseResult, ParserState};

use crate::frontend::tokens::Token;
use crate::util::span::Span;
use ast::*;
use thiserror::Error;
use tracing::debug;

/// Parse tokens into a file AST
///
/// # Arguments
/// * `filename` - Name used in diagnostics
/// * `tokens` - Token stream from the lexer
///
/// # Returns
/// The parsed file or the first syntax error
///
/// # Example
/// ```while
/// type Point is {int x, int y}
/// macro double(x) is x + x
/// int main() {
///     Point p = {x: 1, y: double(2)};
///     return p.y;
/// }
/// ```
pub fn parse(
    filename: &str,
    tokens: &[Token],
) -> Result<File, SyntaxError> {
    debug!("Parsing {} ({} tokens)", filename, tokens.len());
    let mut state = ParserState::new(filename, tokens);
    let mut decls = Vec::new();

    while !state.at_end() {
        decls.push(state.parse_decl()?);
    }

    debug!(
        "Parsed {} declarations ({} types, {} macros)",
        decls.len(),
        state.context().type_count(),
        state.context().macro_count()
    );
    Ok(File {
        filename: filename.to_string(),
        decls,
    })
}

/// Parse a single expression
///
/// No user types or macros are known, and trailing tokens are left
/// unconsumed.
pub fn parse_expression(
    filename: &str,
    tokens: &[Token],
) -> Result<Expr, SyntaxError> {
    let mut state = ParserState::new(filename, tokens);
    state.parse_expr()
}

/// The single error kind of the parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{filename}:{span}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub filename: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(
        message: impl Into<String>,
        filename: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            message: message.into(),
            filename: filename.into(),
            span,
        }
    }

    /// Start byte offset
    #[inline]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// End byte offset
    #[inline]
    pub fn end(&self) -> usize {
        self.span.end
    }
}

#[cfg(test)]
mod tests;
