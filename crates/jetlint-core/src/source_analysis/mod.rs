// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexing and parsing for JavaScript source code.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] streams [`Token`]s under the parser's control: JavaScript's
//! `/` (regexp or division) and template literals make tokenization
//! grammar-dependent, so tokens are formed one ahead, lazily. The [`lex`]
//! convenience tokenizes a whole buffer with automatic regexp inference.
//!
//! ```
//! use jetlint_core::source_analysis::{lex, TokenKind};
//!
//! let tokens = lex("x = /re/g");
//! assert_eq!(*tokens[2].kind(), TokenKind::Regexp);
//! ```
//!
//! # Parsing
//!
//! [`Parser`] produces an [`Expression`](crate::ast::Expression) tree with
//! spans and drives a [`VariableVisitor`] with declaration/use events. It
//! always produces output: malformed input yields placeholder nodes plus
//! diagnostics in the [`DiagnosticSink`](crate::diagnostic::DiagnosticSink),
//! never an `Err`.
//!
//! ```
//! use jetlint_core::diagnostic::DiagnosticSink;
//! use jetlint_core::source_analysis::Parser;
//!
//! let mut sink = DiagnosticSink::new();
//! let ast = Parser::new("x = y + 1", &mut sink, &mut ()).parse_expression();
//! assert!(sink.is_empty());
//! ```

mod error;
mod lexer;
mod locator;
mod parser;
mod span;
mod token;


pub use error::{LexError, LexErrorKind};
pub use lexer::{Lexer, lex, lex_with_diagnostics};
pub use locator::{Position, SourceLocator, SourceRange, is_line_terminator};
pub use parser::{DeclarationKind, Parser, VariableVisitor};
pub use span::Span;
pub use token::{Token, TokenKind};
