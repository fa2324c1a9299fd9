//! Frontend pipeline
//!
//! Token stream in, expanded AST out:
//!
//! ```text
//! tokens ──► parser ──► raw File ──► macros ──► expanded File
//! ```
//!
//! Lexing, type checking and code generation live outside this crate.

use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub mod config;
pub mod macros;
pub mod parser;
pub mod tokens;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{ConfigError, FrontendConfig};
use parser::ast::File;
use parser::SyntaxError;
use tokens::Token;

/// Runs the parser and, if enabled, the macro expander over one file
#[derive(Debug, Default, Clone)]
pub struct Frontend {
    config: FrontendConfig,
}

impl Frontend {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_config(config: FrontendConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Parse and expand a token stream
    pub fn compile(
        &self,
        filename: &str,
        tokens: &[Token],
    ) -> Result<File, SyntaxError> {
        let file = parser::parse(filename, tokens)?;

        if !self.config.expand_macros {
            debug!("Macro expansion disabled, returning parsed file");
            return Ok(file);
        }

        debug!("Expanding macros (full traversal: {})", self.config.full_traversal);
        Ok(macros::expand_with(file, self.config.expand_options()))
    }

    /// Decode a JSON token stream, then compile it
    pub fn compile_json(
        &self,
        filename: &str,
        json: &str,
    ) -> Result<File, FrontendError> {
        let tokens: Vec<Token> = serde_json::from_str(json)?;
        debug!("Decoded {} tokens for {}", tokens.len(), filename);
        Ok(self.compile(filename, &tokens)?)
    }

    /// Read a JSON token file and compile it.
    ///
    /// The file name recorded in the AST is the path with any `.json`
    /// extension removed, so `prog.while.json` becomes `prog.while`.
    pub fn compile_file(
        &self,
        path: &Path,
    ) -> Result<File, FrontendError> {
        let json = std::fs::read_to_string(path)?;
        let filename = path.with_extension("");
        let filename = match path.extension() {
            Some(ext) if ext == "json" => filename.display().to_string(),
            _ => path.display().to_string(),
        };
        self.compile_json(&filename, &json)
    }
}

/// Frontend errors
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("malformed token stream: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrontendError {
    /// The syntax error, if that is what this is
    pub fn as_syntax_error(&self) -> Option<&SyntaxError> {
        match self {
            FrontendError::Syntax(e) => Some(e),
            _ => None,
        }
    }
}
