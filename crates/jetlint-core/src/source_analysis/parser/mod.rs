// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for JavaScript source code.
//!
//! The parser drives the streaming [`Lexer`] and produces two outputs: an
//! expression AST with precise spans, and a stream of variable events (see
//! [`VariableVisitor`]) that the scope analyzer consumes without re-walking
//! the tree.
//!
//! # Design Philosophy
//!
//! - **Error recovery is mandatory** - the parser MUST always produce a tree
//! - **Multiple errors** - report all problems, don't stop at the first
//! - **Precise spans** - every diagnostic points at an exact source location
//! - **Local recovery** - an unexpected token synthesizes a minimal node
//!   ([`Expression::Invalid`]) and parsing continues
//!
//! # Precedence
//!
//! Binary operator precedence uses Pratt parsing with a binding power table
//! (see [`binary_binding_power`] in [`expressions`]); consecutive operators
//! at one precedence level collapse into a single n-ary
//! [`Expression::Binary`] node.

use ecow::EcoString;

use crate::ast::{Expression, Identifier};
use crate::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink};

use super::{Lexer, Span, Token, TokenKind};

mod expressions;
mod statements;

#[cfg(test)]
mod expression_tests;
#[cfg(test)]
mod property_tests;

/// How a binding was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `let name`
    Let,
    /// `const name`
    Const,
    /// `var name`
    Var,
    /// `function name(…) {…}`
    Function,
    /// A function, arrow, or catch parameter.
    Parameter,
    /// `class Name {…}`
    Class,
    /// An imported binding.
    Import,
}

impl DeclarationKind {
    /// Returns `true` for kinds that bind in the innermost block scope
    /// (`let`, `const`, `class`, `import`) rather than the function scope.
    #[must_use]
    pub const fn is_block_scoped(self) -> bool {
        matches!(self, Self::Let | Self::Const | Self::Class | Self::Import)
    }
}

/// Receives variable events from the parser, in source order.
///
/// The statement parser emits an event for every declaration, use, and
/// assignment it encounters, bracketed by scope enter/exit notifications.
/// All methods default to no-ops so implementations override only what they
/// consume; the unit type `()` serves as the null visitor.
pub trait VariableVisitor {
    /// A name was declared.
    fn visit_declaration(&mut self, name: &Identifier, kind: DeclarationKind) {
        let _ = (name, kind);
    }

    /// A name was read.
    fn visit_use(&mut self, name: &Identifier) {
        let _ = name;
    }

    /// A name was written.
    fn visit_assignment(&mut self, name: &Identifier) {
        let _ = name;
    }

    /// A function body begins; `var` declarations attach here.
    fn enter_function_scope(&mut self) {}

    /// The matching end of [`enter_function_scope`](Self::enter_function_scope).
    fn exit_function_scope(&mut self) {}

    /// A block begins; only `let`/`const`/`class` declarations attach here.
    fn enter_block_scope(&mut self) {}

    /// The matching end of [`enter_block_scope`](Self::enter_block_scope).
    fn exit_block_scope(&mut self) {}
}

/// The null visitor: discards every event.
impl VariableVisitor for () {}

/// Maximum expression nesting before the parser gives up on a subtree.
///
/// Recursion through `stacker::maybe_grow` cannot overflow the stack, but an
/// adversarial input like ten thousand `(`s would still grow heap segments
/// without bound; the cap turns that into an E111 diagnostic.
const MAX_NESTING_DEPTH: u32 = 200;

/// The parser state.
pub struct Parser<'a, 'src> {
    lexer: Lexer<'src>,
    sink: &'a mut DiagnosticSink,
    pub(super) visitor: &'a mut dyn VariableVisitor,
    nesting_depth: u32,
    reported_depth_limit: bool,
    /// Set while parsing a `for` initializer, where `in` is the loop
    /// keyword rather than the relational operator.
    pub(super) no_in: bool,
}

impl<'a, 'src> Parser<'a, 'src> {
    /// Creates a parser over `source`.
    ///
    /// Diagnostics from both the lexer and the parser go to `sink`; variable
    /// events go to `visitor` (pass `&mut ()` to discard them).
    pub fn new(
        source: &'src str,
        sink: &'a mut DiagnosticSink,
        visitor: &'a mut dyn VariableVisitor,
    ) -> Self {
        Self {
            lexer: Lexer::new(source),
            sink,
            visitor,
            nesting_depth: 0,
            reported_depth_limit: false,
            no_in: false,
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token, lexing it on demand.
    pub(super) fn peek(&mut self) -> &Token {
        self.lexer.peek(self.sink)
    }

    /// Returns the token after the current one.
    pub(super) fn peek2(&mut self) -> &Token {
        self.lexer.peek2(self.sink)
    }

    /// Overrides the lexer's regex/division decision for the next token.
    pub(super) fn set_regexp_allowed(&mut self, allowed: bool) {
        self.lexer.set_regexp_allowed(allowed);
    }

    /// Makes the lexer report a synthetic `;` where ASI demands one.
    pub(super) fn insert_semicolon(&mut self) {
        self.lexer.insert_semicolon();
    }

    /// Re-enters template lexing at the current `}`.
    pub(super) fn skip_in_template(&mut self, template_start: u32) {
        self.lexer.skip_in_template(self.sink, template_start);
    }

    /// Returns a clone of the current token's kind.
    ///
    /// Cloning sidesteps holding a lexer borrow across parse decisions;
    /// [`TokenKind`] is cheap to clone (identifier text is an `EcoString`).
    pub(super) fn peek_kind(&mut self) -> TokenKind {
        self.peek().kind().clone()
    }

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> Token {
        self.lexer.skip(self.sink)
    }

    /// Consumes the current token if its kind equals `kind`.
    pub(super) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.peek().kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns `true` at the end of input.
    pub(super) fn is_at_end(&mut self) -> bool {
        self.peek().kind().is_eof()
    }

    /// Reports a diagnostic at the current token.
    pub(super) fn error_at_current(&mut self, code: DiagnosticCode, message: impl Into<EcoString>) {
        let span = self.peek().span();
        self.sink.push(Diagnostic::new(code, message, span));
    }

    /// Reports a diagnostic at the given span.
    pub(super) fn error_at(
        &mut self,
        code: DiagnosticCode,
        message: impl Into<EcoString>,
        span: Span,
    ) {
        self.sink.push(Diagnostic::new(code, message, span));
    }

    // ========================================================================
    // Nesting Guard
    // ========================================================================

    /// Enters one level of expression nesting.
    ///
    /// Past [`MAX_NESTING_DEPTH`], reports E111 (once) and returns an
    /// [`Expression::Invalid`] for the caller to bail out with. On `Err` the
    /// matching [`leave_nesting`](Self::leave_nesting) must not run.
    pub(super) fn enter_nesting(&mut self, span: Span) -> Result<(), Expression> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            if !self.reported_depth_limit {
                self.reported_depth_limit = true;
                self.error_at(
                    DiagnosticCode::DepthLimitExceeded,
                    "depth limit exceeded",
                    span,
                );
            }
            return Err(Expression::Invalid {
                span: Span::empty(span.start()),
            });
        }
        self.nesting_depth += 1;
        Ok(())
    }

    /// Leaves one level of expression nesting.
    pub(super) fn leave_nesting(&mut self) {
        self.nesting_depth -= 1;
    }

    // ========================================================================
    // Module Parsing
    // ========================================================================

    /// Parses a complete module: statements until end of file.
    ///
    /// The AST for statements is not materialized; their effect is the
    /// variable event stream plus diagnostics. Expression statements walk
    /// their expression for uses and are then dropped.
    pub fn parse_module(&mut self) {
        while !self.is_at_end() {
            let before = self.peek().span().start();
            self.parse_statement();
            // A statement that consumed nothing would loop forever; the
            // offending token cannot start a statement, so say that and move
            // past it.
            if !self.is_at_end() && self.peek().span().start() == before {
                let kind = self.peek_kind();
                self.error_at_current(
                    DiagnosticCode::UnexpectedToken,
                    format!("unexpected token: {kind}"),
                );
                self.advance();
            }
        }
    }
}
