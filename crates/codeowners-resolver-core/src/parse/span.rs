//! Source locations inside a CODEOWNERS document.
//!
//! Spans are used for "jump to definition" style navigation: they let a
//! caller turn a parsed rule back into a selection in the original text.

use serde::Serialize;
use std::ops::Range;

/// A location span in the source document.
///
/// `line` and `column` are 1-based for human-readable output; `offset` is the
/// 0-based byte offset from the start of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Byte offset from the start of the input (0-based).
    pub offset: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based, in bytes).
    pub column: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a new span with the given position and length.
    pub fn new(offset: usize, line: usize, column: usize, length: usize) -> Self {
        Self {
            offset,
            line,
            column,
            length,
        }
    }

    /// Returns the end offset of this span.
    pub fn end_offset(&self) -> usize {
        self.offset + self.length
    }

    /// Returns the byte range of this span within the whole document.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end_offset()
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0, 1, 1, 0)
    }
}
