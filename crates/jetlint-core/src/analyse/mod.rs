// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Scope analysis over the parser's variable event stream.
//!
//! The [`Linter`] implements
//! [`VariableVisitor`](crate::source_analysis::VariableVisitor) and is
//! driven by the parser in-line: it never re-walks the AST. It maintains a
//! [`ScopeStack`] and reports two findings:
//!
//! - **E034** (error): a redeclaration in the same scope where at least one
//!   of the two bindings is block-scoped. `var`-over-`var` is silent.
//! - **E057** (warning): a use that no scope ever declares, decided only
//!   when the global scope closes so hoisted declarations get their chance.
//!
//! A malformed program still gets best-effort analysis; the analyzer is
//! strictly additive over whatever events the parser produced.

pub mod scope;

use ecow::eco_format;

use crate::ast::Identifier;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::source_analysis::{DeclarationKind, VariableVisitor};

pub use scope::{Binding, PendingUse, Scope, ScopeKind, ScopeStack};

/// Consumes variable events and produces scope-level diagnostics.
///
/// # Examples
///
/// ```
/// use jetlint_core::analyse::Linter;
/// use jetlint_core::diagnostic::DiagnosticSink;
/// use jetlint_core::source_analysis::Parser;
///
/// let mut sink = DiagnosticSink::new();
/// let mut linter = Linter::new();
/// Parser::new("let x;let x;", &mut sink, &mut linter).parse_module();
/// let diagnostics = linter.finish();
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics[0].code.as_str(), "E034");
/// ```
#[derive(Debug, Default)]
pub struct Linter {
    scopes: ScopeStack,
    diagnostics: Vec<Diagnostic>,
}

impl Linter {
    /// Creates a linter with the global scope open.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: ScopeStack::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Closes the global scope and returns all scope diagnostics.
    ///
    /// Redeclaration errors were recorded as they happened; undeclared
    /// variable warnings are decided here. The result is sorted by span so
    /// scope findings read in source order.
    #[must_use]
    pub fn finish(self) -> Vec<Diagnostic> {
        let Self {
            scopes,
            mut diagnostics,
        } = self;
        let mut global = scopes.pop_global();
        for pending in global.take_pending_uses() {
            if global.declares(&pending.name) {
                continue;
            }
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::UseOfUndeclaredVariable,
                eco_format!("use of undeclared variable: {}", pending.name),
                pending.span,
            ));
        }
        diagnostics.sort_by_key(|diagnostic| (diagnostic.span.start(), diagnostic.span.end()));
        diagnostics
    }

    fn leave_scope(&mut self) {
        let mut scope = self.scopes.pop();
        let pending = scope.take_pending_uses();
        let unresolved: Vec<PendingUse> = pending
            .into_iter()
            .filter(|use_| !scope.declares(&use_.name))
            .collect();
        self.scopes.propagate_pending_uses(unresolved);
    }
}

impl VariableVisitor for Linter {
    fn visit_declaration(&mut self, name: &Identifier, kind: DeclarationKind) {
        if self.scopes.declare(&name.name, kind, name.span).is_some() {
            self.diagnostics.push(Diagnostic::error(
                DiagnosticCode::RedeclarationOfVariable,
                eco_format!("redeclaration of variable: {}", name.name),
                name.span,
            ));
        }
    }

    fn visit_use(&mut self, name: &Identifier) {
        self.scopes.record_use(&name.name, name.span);
    }

    fn visit_assignment(&mut self, name: &Identifier) {
        self.scopes.record_use(&name.name, name.span);
    }

    fn enter_function_scope(&mut self) {
        self.scopes.push(ScopeKind::Function);
    }

    fn exit_function_scope(&mut self) {
        self.leave_scope();
    }

    fn enter_block_scope(&mut self) {
        self.scopes.push(ScopeKind::Block);
    }

    fn exit_block_scope(&mut self) {
        self.leave_scope();
    }
}
