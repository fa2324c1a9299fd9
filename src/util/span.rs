//! Source location tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Line/column position resolved from a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from start of file
    pub offset: usize,
}

impl Position {
    /// Create a new position with offset
    #[inline]
    pub fn with_offset(
        line: usize,
        column: usize,
        offset: usize,
    ) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte-offset span of a token or node.
///
/// `end` is exclusive. Spans only feed diagnostics; two trees that differ
/// only in spans are semantically the same program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[inline]
    pub fn new(
        start: usize,
        end: usize,
    ) -> Self {
        Self { start, end }
    }

    /// Create a dummy span
    #[inline]
    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both `self` and `other`
    #[inline]
    pub fn to(
        self,
        other: Span,
    ) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Get the source text length
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Source file information
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name
    pub name: String,
    /// File content
    pub content: String,
    /// Byte offset at which each line starts
    line_offsets: Vec<usize>,
}

impl SourceFile {
    /// Create a new source file
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let mut line_offsets = vec![0];
        line_offsets.extend(
            content
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );

        Self {
            name: name.into(),
            content,
            line_offsets,
        }
    }

    /// Get position from byte offset
    pub fn position_from_offset(
        &self,
        offset: usize,
    ) -> Position {
        let offset = offset.min(self.content.len());
        let line = self.line_offsets.partition_point(|&o| o <= offset);
        let column = offset.saturating_sub(self.line_offsets[line.saturating_sub(1)]);
        Position::with_offset(line, column + 1, offset)
    }

    /// Text of the given 1-indexed line, without its trailing newline
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_offsets.get(line.checked_sub(1)?)?;
        let end = self
            .line_offsets
            .get(line)
            .copied()
            .unwrap_or(self.content.len());
        self.content
            .get(start..end)
            .map(|s| s.trim_end_matches(['\n', '\r']))
    }

    /// Get source text for a span
    pub fn source_text(
        &self,
        span: Span,
    ) -> Option<&str> {
        self.content.get(span.start..span.end)
    }
}

impl fmt::Display for SourceFile {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
