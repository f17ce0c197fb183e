// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical error types.
//!
//! The lexer recovers from every error, so these are not `Err` values: each
//! [`LexError`] becomes a [`Diagnostic`] in the sink and lexing continues.
//! Keeping the kinds as an enum pins the stable code and message wording for
//! each case in one place, and the [`miette`] derive lets embedders render a
//! lexical finding with a labeled source snippet.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::diagnostic::{Diagnostic, DiagnosticCode};

use super::Span;

/// A lexical error encountered during tokenization.
///
/// # Examples
///
/// ```
/// use jetlint_core::source_analysis::{LexError, LexErrorKind, Span};
///
/// let error = LexError::new(LexErrorKind::UnclosedStringLiteral, Span::new(0, 4));
/// assert_eq!(error.to_string(), "unclosed string literal");
/// assert_eq!(error.to_diagnostic().code.as_str(), "E006");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("{kind}")]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub const fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Converts to the pipeline's diagnostic shape.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.kind.code(), self.kind.to_string(), self.span)
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A `/* … */` comment ran to end of file.
    #[error("unclosed block comment")]
    UnclosedBlockComment,

    /// A string literal hit a line terminator or end of file.
    #[error("unclosed string literal")]
    UnclosedStringLiteral,

    /// A regular expression literal hit a line terminator or end of file.
    #[error("unclosed regexp literal")]
    UnclosedRegexpLiteral,

    /// A template literal ran to end of file.
    #[error("unclosed template")]
    UnclosedTemplate,

    /// A malformed number literal, e.g. `0x` with no digits.
    #[error("invalid number literal")]
    InvalidNumberLiteral,

    /// A character that cannot start any token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
}

impl LexErrorKind {
    /// Returns the stable diagnostic code for this error kind.
    #[must_use]
    pub const fn code(self) -> DiagnosticCode {
        match self {
            Self::UnclosedBlockComment => DiagnosticCode::UnclosedBlockComment,
            Self::UnclosedStringLiteral => DiagnosticCode::UnclosedStringLiteral,
            Self::UnclosedRegexpLiteral => DiagnosticCode::UnclosedRegexpLiteral,
            Self::UnclosedTemplate => DiagnosticCode::UnclosedTemplate,
            Self::InvalidNumberLiteral => DiagnosticCode::InvalidNumberLiteral,
            Self::UnexpectedCharacter(_) => DiagnosticCode::UnexpectedCharacter,
        }
    }
}
