// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Scope tracking for variable analysis.
//!
//! Scopes nest in a stack. Two kinds exist: **function** scopes (opened by
//! function bodies and the global program) where `var`, `function`, and
//! parameter bindings attach, and **block** scopes (opened by `{…}`,
//! `catch`, `switch`, and `let`/`const` `for` heads) where only
//! block-scoped bindings attach.
//!
//! Each scope holds its declarations and the uses that no visible binding
//! satisfied yet. A pending use survives scope pops until some enclosing
//! scope declares the name; whatever is still pending when the global scope
//! closes is an undeclared-variable finding. Deferring resolution this way
//! is what makes hoisting work: `f(); function f() {}` resolves `f` when
//! the global scope closes, not at the call site.

use std::collections::HashMap;

use ecow::EcoString;

use crate::source_analysis::{DeclarationKind, Span};

/// The two scope kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// A function body (or the global program): hosts `var` bindings.
    Function,
    /// A `{…}` block: hosts only `let`/`const`/`class`/`import` bindings.
    Block,
}

/// One recorded binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// How the binding was declared.
    pub kind: DeclarationKind,
    /// Where the declared name appears.
    pub span: Span,
}

/// A use that no scope on the stack has satisfied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUse {
    /// The referenced name.
    pub name: EcoString,
    /// Where the reference appears.
    pub span: Span,
}

/// One level of the scope stack.
#[derive(Debug)]
pub struct Scope {
    kind: ScopeKind,
    declarations: HashMap<EcoString, Vec<Binding>>,
    pending_uses: Vec<PendingUse>,
}

impl Scope {
    fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            declarations: HashMap::new(),
            pending_uses: Vec::new(),
        }
    }

    /// Returns `true` if this scope declares `name`.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    /// Drains the uses this scope could not resolve.
    pub fn take_pending_uses(&mut self) -> Vec<PendingUse> {
        std::mem::take(&mut self.pending_uses)
    }
}

/// The stack of scopes for one program analysis.
///
/// Created with the global function scope already on the stack; pops below
/// that are an internal bug and panic.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// Creates a stack holding the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Function)],
        }
    }

    /// Enters a nested scope.
    pub fn push(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope::new(kind));
    }

    /// Leaves the innermost scope, returning it so the caller can resolve
    /// its pending uses.
    ///
    /// # Panics
    /// Panics when called on the global scope; the analyzer finishes that
    /// one through [`ScopeStack::pop_global`].
    pub fn pop(&mut self) -> Scope {
        assert!(self.scopes.len() > 1, "cannot pop the global scope");
        self.scopes.pop().expect("stack holds at least two scopes")
    }

    /// Consumes the stack, returning the global scope.
    ///
    /// # Panics
    /// Panics if nested scopes are still open, which means the parser's
    /// enter/exit events were unbalanced.
    #[must_use]
    pub fn pop_global(mut self) -> Scope {
        assert_eq!(
            self.scopes.len(),
            1,
            "nested scopes still open at end of analysis"
        );
        self.scopes.pop().expect("stack holds the global scope")
    }

    /// Declares `name` in the scope its kind attaches to: the innermost
    /// scope for block-scoped kinds, the innermost *function* scope for
    /// `var`, `function`, and parameters.
    ///
    /// Returns the span of a conflicting earlier binding if this
    /// declaration is a redeclaration: same target scope, and at least one
    /// of the two bindings block-scoped.
    pub fn declare(&mut self, name: &EcoString, kind: DeclarationKind, span: Span) -> Option<Span> {
        let index = if kind.is_block_scoped() {
            self.scopes.len() - 1
        } else {
            self.innermost_function_scope()
        };
        let bindings = self.scopes[index]
            .declarations
            .entry(name.clone())
            .or_default();
        let conflict = bindings
            .iter()
            .find(|existing| existing.kind.is_block_scoped() || kind.is_block_scoped())
            .map(|existing| existing.span);
        bindings.push(Binding { kind, span });
        conflict
    }

    /// Records a read or write of `name`. Resolves immediately against any
    /// scope on the stack; otherwise the use goes on the innermost scope's
    /// pending list to wait for a hoisted declaration.
    pub fn record_use(&mut self, name: &EcoString, span: Span) {
        if self.scopes.iter().rev().any(|scope| scope.declares(name)) {
            return;
        }
        let innermost = self
            .scopes
            .last_mut()
            .expect("stack holds at least the global scope");
        innermost.pending_uses.push(PendingUse {
            name: name.clone(),
            span,
        });
    }

    /// Moves still-unresolved uses of a popped scope into the new innermost
    /// scope.
    pub fn propagate_pending_uses(&mut self, unresolved: Vec<PendingUse>) {
        let innermost = self
            .scopes
            .last_mut()
            .expect("stack holds at least the global scope");
        innermost.pending_uses.extend(unresolved);
    }

    fn innermost_function_scope(&self) -> usize {
        self.scopes
            .iter()
            .rposition(|scope| scope.kind == ScopeKind::Function)
            .expect("stack holds the global function scope")
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
