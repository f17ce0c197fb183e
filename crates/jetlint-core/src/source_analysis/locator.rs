// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Byte offset to line/column resolution.
//!
//! Tokens and AST nodes record plain byte offsets ([`Span`]); editors want
//! line/column pairs. [`SourceLocator`] bridges the two by building a table
//! of line-start offsets on first use and binary-searching it per query.
//!
//! Columns count **UTF-8 bytes** from the line start, like
//! [`Position`](crate::document)'s internal form. The document model converts
//! to UTF-16 code units at the editor boundary.

use std::cell::OnceCell;

use super::Span;

/// A position in a source buffer: 0-based line, UTF-8 byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (0-indexed).
    pub line: u32,
    /// Column offset in bytes from the start of the line (0-indexed).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A resolved source range: start and end [`Position`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    /// Position of the first byte.
    pub start: Position,
    /// Position one past the last byte.
    pub end: Position,
}

/// Resolves byte offsets in a source buffer to line/column positions.
///
/// The line table is built lazily on the first query and reused for the
/// locator's lifetime. Line terminators are `\n`, `\r\n` (one terminator),
/// lone `\r`, U+2028 (LINE SEPARATOR), and U+2029 (PARAGRAPH SEPARATOR).
///
/// # Examples
///
/// ```
/// use jetlint_core::source_analysis::{SourceLocator, Span};
///
/// let locator = SourceLocator::new("let x;\nlet y;");
/// let range = locator.range(Span::new(7, 12));
/// assert_eq!(range.start.line, 1);
/// assert_eq!(range.start.column, 0);
/// ```
#[derive(Debug)]
pub struct SourceLocator<'src> {
    source: &'src str,
    line_starts: OnceCell<Vec<u32>>,
}

impl<'src> SourceLocator<'src> {
    /// Creates a locator for the given source buffer.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self {
            source,
            line_starts: OnceCell::new(),
        }
    }

    /// Returns the source buffer this locator resolves into.
    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.source
    }

    /// Resolves a span to a pair of line/column positions.
    #[must_use]
    pub fn range(&self, span: Span) -> SourceRange {
        SourceRange {
            start: self.position(span.start()),
            end: self.position(span.end()),
        }
    }

    /// Resolves a single byte offset to a position.
    ///
    /// Offsets past the end of the buffer resolve to the end of the last line.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    pub fn position(&self, offset: u32) -> Position {
        let offset = offset.min(self.source.len() as u32);
        let starts = self.line_starts();
        // partition_point returns the count of line starts <= offset; the
        // offset belongs to the last such line.
        let line = starts.partition_point(|&start| start <= offset) - 1;
        Position::new(line as u32, offset - starts[line])
    }

    /// Returns the text of the given 0-based line, without its terminator.
    #[must_use]
    pub fn line_text(&self, line: u32) -> &'src str {
        let starts = self.line_starts();
        let Some(&start) = starts.get(line as usize) else {
            return "";
        };
        let rest = &self.source[start as usize..];
        let end = rest
            .char_indices()
            .find(|&(_, c)| is_line_terminator(c))
            .map_or(rest.len(), |(i, _)| i);
        &rest[..end]
    }

    fn line_starts(&self) -> &[u32] {
        self.line_starts.get_or_init(|| line_starts(self.source))
    }
}

/// Returns true for the characters JavaScript counts as line terminators.
#[must_use]
pub const fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "source files over 4GB are not supported"
)]
fn line_starts(source: &str) -> Vec<u32> {
    let mut starts = vec![0];
    let mut chars = source.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if !is_line_terminator(c) {
            continue;
        }
        // \r\n is a single terminator
        if c == '\r' {
            if let Some(&(_, '\n')) = chars.peek() {
                chars.next();
            }
        }
        let next = chars.peek().map_or(source.len(), |&(j, _)| j);
        starts.push(next as u32);
    }
    starts
}
