//! WhileLang compiler frontend
//!
//! Parses a pre-tokenized WhileLang file into an AST and expands its macros.
//!
//! # Example
//!
//! ```while
//! type Point is {int x, int y}
//! macro double(x) is x + x
//!
//! int main() {
//!     Point p = {x: 1, y: double(2)};
//!     return p.y;
//! }
//! ```
//!
//! Tokens come from an external lexer, either in memory or as a JSON array
//! of `{"kind": ..., "span": {"start": .., "end": ..}}` objects.

#![warn(rust_2018_idioms)]

pub mod frontend;
pub mod util;

pub use frontend::parser::ast::File;
pub use frontend::parser::SyntaxError;
pub use frontend::{Frontend, FrontendConfig, FrontendError};

use frontend::tokens::Token;
use std::path::Path;

/// Frontend version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frontend name
pub const NAME: &str = "wlc-frontend";

/// Parse and expand tokens with the default configuration
pub fn compile_tokens(
    filename: &str,
    tokens: &[Token],
) -> Result<File, SyntaxError> {
    Frontend::new().compile(filename, tokens)
}

/// Parse and expand a JSON token stream with the default configuration
pub fn compile_json(
    filename: &str,
    json: &str,
) -> Result<File, FrontendError> {
    Frontend::new().compile_json(filename, json)
}

/// Parse and expand a JSON token file with the default configuration
pub fn compile_token_file(path: &Path) -> Result<File, FrontendError> {
    Frontend::new().compile_file(path)
}
