// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Core linting pipeline for jetlint, an incremental JavaScript linter.
//!
//! Given a document of JavaScript source that is edited over time, the
//! pipeline produces diagnostics identifying likely bugs:
//!
//! ```text
//! Document ─ text ─▶ Lexer ─ tokens ─▶ Parser ─┬─ AST (spans)
//!                                              └─ variable events ─▶ Linter
//!                        diagnostics from every stage ─▶ DiagnosticSink
//! ```
//!
//! The typical entry point is [`Document`]: apply editor edits with
//! [`Document::replace_text`], then [`Document::lint`] re-runs the whole
//! pipeline and returns the diagnostics.
//!
//! ```
//! use jetlint_core::Document;
//!
//! let mut document = Document::new();
//! document.replace_text(0, 0, 0, 0, "let x;let x;");
//! let diagnostics = document.lint();
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].code.as_str(), "E034");
//! ```
//!
//! The stages are usable on their own: [`source_analysis`] for lexing and
//! parsing, [`analyse`] for scope analysis over the parser's variable
//! events, [`diagnostic`] for the shared diagnostic types.
//!
//! This crate is the core only. The editor-facing facade (handle-based API,
//! message catalogs, transport) lives elsewhere and consumes the [`Document`]
//! interface.

pub mod analyse;
pub mod ast;
pub mod diagnostic;
pub mod document;
pub mod source_analysis;

pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity};
pub use document::{Document, EditorDiagnostic, EditorSeverity};
