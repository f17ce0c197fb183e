// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Byte ranges into the document buffer.
//!
//! Each parse works over one immutable UTF-8 buffer, and everything the
//! pipeline produces — tokens, AST nodes, diagnostics — refers back into it
//! with a `Span`: a half-open `[start, end)` pair of byte offsets. Nothing
//! downstream stores line/column pairs; those are derived on demand by
//! [`SourceLocator`](super::SourceLocator) (byte columns) or the document
//! model (UTF-16 columns for editors).
//!
//! Two shapes of span are meaningful to the linter:
//!
//! - a **real** span covering the bytes of a token or expression, and
//! - an **empty placeholder** ([`Span::empty`]) marking where a missing
//!   operand was expected, so recovery nodes still have an anchor an editor
//!   can point at.
//!
//! Offsets are `u32`: a document past 4 GiB is outside this linter's world,
//! and half-sized spans keep tokens and AST nodes compact.

use std::ops::Range;

/// A half-open `[start, end)` byte range into the source buffer.
///
/// # Examples
///
/// ```
/// use jetlint_core::source_analysis::Span;
///
/// // `let x;let x;` — the second `x` is the redeclaration site.
/// let second_x = Span::new(10, 11);
/// assert_eq!(second_x.len(), 1);
/// assert!(Span::new(6, 12).contains(second_x));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Creates a span from start and end byte offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Creates an empty placeholder span at the given byte offset.
    ///
    /// Used for synthesized nodes such as missing operands, which sit at the
    /// position where the operand was expected:
    ///
    /// ```
    /// use jetlint_core::source_analysis::Span;
    ///
    /// // `2+` — the right operand would have started at offset 2.
    /// let placeholder = Span::empty(2);
    /// assert!(placeholder.is_empty());
    /// assert_eq!(placeholder.start(), 2);
    /// ```
    #[must_use]
    pub const fn empty(at: u32) -> Self {
        Self { start: at, end: at }
    }

    /// Returns a span with this span's start and a new end offset.
    ///
    /// The parser's postfix constructs grow this way: a call expression
    /// spans from its callee's first byte to the closing `)`.
    #[must_use]
    pub const fn to(self, end: u32) -> Self {
        Self {
            start: self.start,
            end,
        }
    }

    /// Returns the start byte offset.
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// Returns the end byte offset (exclusive).
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    /// Returns true for placeholder spans.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns true if `other` lies fully within `self`. This is the AST's
    /// nesting invariant: every child's span is contained in its parent's.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns the smallest span covering both `self` and `other`.
    ///
    /// How parent nodes derive their extent from their children; merging
    /// with a placeholder extends to the placeholder's position, so
    /// `binary(literal, ?)` still covers its operator.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Converts to a `Range<usize>` for slicing source text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start as usize, span.len() as usize).into()
    }
}
