//! Diagnostic rendering
//!
//! Turns a [`SyntaxError`] into the text shown to the user: a header, a
//! `file:line:col` locator and, when the source text is at hand, the
//! offending line with its span underlined.
//!
//! # Example
//!
//! ```
//! use wlc_frontend::frontend::parser::SyntaxError;
//! use wlc_frontend::util::diagnostic::{render_syntax_error, EmitterConfig};
//! use wlc_frontend::util::span::{SourceFile, Span};
//!
//! let source = SourceFile::new("a.while", "int x\n");
//! let error = SyntaxError::new("unexpected end-of-file", "a.while", Span::new(4, 5));
//! let text = render_syntax_error(&error, Some(&source), &EmitterConfig::plain());
//! assert!(text.starts_with("error: unexpected end-of-file\n --> a.while:1:5\n"));
//! ```

use crate::frontend::parser::SyntaxError;
use crate::util::span::SourceFile;
use owo_colors::OwoColorize;

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Emit ANSI colours
    pub use_colors: bool,
    /// Show the source line under the locator
    pub show_source: bool,
    /// Prefix the source line with its number
    pub show_line_numbers: bool,
    /// Underline character
    pub indicator: char,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            show_line_numbers: true,
            indicator: '^',
        }
    }
}

impl EmitterConfig {
    /// Default layout without colours
    pub fn plain() -> Self {
        Self {
            use_colors: false,
            ..Self::default()
        }
    }
}

/// Render `error` with the given configuration
pub fn render_syntax_error(
    error: &SyntaxError,
    source: Option<&SourceFile>,
    config: &EmitterConfig,
) -> String {
    TextEmitter::with_config(config.clone()).render(error, source)
}

/// Plain-text syntax error renderer
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    pub fn render(
        &self,
        error: &SyntaxError,
        source: Option<&SourceFile>,
    ) -> String {
        let mut output = self.render_header(error);
        output.push_str(&self.render_location(error, source));

        if self.config.show_source {
            if let Some(snippet) = source.and_then(|s| self.render_source_snippet(error, s)) {
                output.push_str(&snippet);
            }
        }

        output
    }

    fn render_header(
        &self,
        error: &SyntaxError,
    ) -> String {
        let label = if self.config.use_colors {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        };
        format!("{}: {}\n", label, error.message)
    }

    /// Line and column when the source is known, byte offsets otherwise
    fn render_location(
        &self,
        error: &SyntaxError,
        source: Option<&SourceFile>,
    ) -> String {
        match source {
            Some(source) => {
                let start = source.position_from_offset(error.start());
                format!(" --> {}:{}\n", error.filename, start)
            }
            None => format!(" --> {}:{}\n", error.filename, error.span),
        }
    }

    fn render_source_snippet(
        &self,
        error: &SyntaxError,
        source: &SourceFile,
    ) -> Option<String> {
        let start = source.position_from_offset(error.start());
        let end = source.position_from_offset(error.end());
        let line = source.line_text(start.line)?;

        let gutter = if self.config.show_line_numbers {
            format!("{:>4} | ", start.line)
        } else {
            "     | ".to_string()
        };
        let width = if end.line == start.line {
            end.column.saturating_sub(start.column).max(1)
        } else {
            line.len().saturating_sub(start.column - 1).max(1)
        };
        let mut indicators = self.config.indicator.to_string().repeat(width);
        if self.config.use_colors {
            indicators = indicators.red().to_string();
        }

        Some(format!(
            "{}{}\n     | {}{}\n",
            gutter,
            line,
            " ".repeat(start.column - 1),
            indicators
        ))
    }
}
