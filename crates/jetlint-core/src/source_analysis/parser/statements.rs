// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing and the variable event stream.
//!
//! Statements are not kept as AST: their lasting effect is the sequence of
//! variable events ([`VariableVisitor`](super::VariableVisitor)) plus any
//! diagnostics. Expression statements parse their expression, walk it for
//! uses and assignments, and drop it.
//!
//! Scoping rules driven from here:
//!
//! - function declarations and bodies open a function scope (where `var`
//!   attaches);
//! - blocks, `catch` clauses, `switch` bodies, and `for` heads with
//!   `let`/`const` open a block scope;
//! - declaration events always precede the walk of their initializer, so
//!   the event stream stays in source order.

use crate::ast::{Expression, Identifier};
use crate::diagnostic::DiagnosticCode;
use crate::source_analysis::TokenKind;

use super::{DeclarationKind, Parser};

/// Whether a walked identifier is being read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
}

impl Parser<'_, '_> {
    // ========================================================================
    // Statement Dispatch
    // ========================================================================

    pub(super) fn parse_statement(&mut self) {
        match self.peek_kind() {
            TokenKind::Semicolon => {
                self.advance();
            }
            TokenKind::LeftBrace => self.parse_block_statement(),
            TokenKind::KwLet => self.parse_variable_declaration(DeclarationKind::Let),
            TokenKind::KwConst => self.parse_variable_declaration(DeclarationKind::Const),
            TokenKind::KwVar => self.parse_variable_declaration(DeclarationKind::Var),
            TokenKind::KwFunction => self.parse_function_declaration(),
            TokenKind::KwAsync if matches!(self.peek2().kind(), TokenKind::KwFunction) => {
                self.advance(); // async
                self.parse_function_declaration();
            }
            TokenKind::KwClass => self.parse_class_declaration(),
            TokenKind::KwImport
                if !matches!(
                    self.peek2().kind(),
                    TokenKind::LeftParen | TokenKind::Dot
                ) =>
            {
                self.parse_import_declaration();
            }
            TokenKind::Identifier(name) if name == "export" => self.parse_export_declaration(),
            TokenKind::KwIf => self.parse_if_statement(),
            TokenKind::KwWhile => self.parse_while_statement(),
            TokenKind::KwDo => self.parse_do_while_statement(),
            TokenKind::KwFor => self.parse_for_statement(),
            TokenKind::KwReturn => self.parse_return_statement(),
            TokenKind::KwThrow => self.parse_throw_statement(),
            TokenKind::KwTry => self.parse_try_statement(),
            TokenKind::KwSwitch => self.parse_switch_statement(),
            TokenKind::KwBreak | TokenKind::KwContinue => {
                self.advance();
                // An optional label on the same line; labels are not
                // variables, so no event.
                if let TokenKind::Identifier(_) = self.peek_kind() {
                    if !self.peek().has_newline_before() {
                        self.advance();
                    }
                }
                self.match_token(&TokenKind::Semicolon);
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) {
        let expression = self.parse_expression();
        self.walk_expression(&expression, Access::Read);
        self.match_token(&TokenKind::Semicolon);
    }

    /// Parses statements until `}` or end of file, with a progress guard so
    /// a statement that consumes nothing cannot hang the parser.
    fn parse_statement_list_until_brace(&mut self) {
        loop {
            if matches!(
                self.peek_kind(),
                TokenKind::RightBrace | TokenKind::EndOfFile
            ) {
                break;
            }
            let before = self.peek().span().start();
            self.parse_statement();
            if !self.is_at_end() && self.peek().span().start() == before {
                let kind = self.peek_kind();
                if matches!(kind, TokenKind::RightBrace) {
                    break;
                }
                self.error_at_current(
                    DiagnosticCode::UnexpectedToken,
                    format!("unexpected token: {kind}"),
                );
                self.advance();
            }
        }
    }

    fn parse_block_statement(&mut self) {
        self.advance(); // {
        self.visitor.enter_block_scope();
        self.parse_statement_list_until_brace();
        if !self.match_token(&TokenKind::RightBrace) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '}'");
        }
        self.visitor.exit_block_scope();
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_variable_declaration(&mut self, kind: DeclarationKind) {
        self.advance(); // let / const / var
        loop {
            let TokenKind::Identifier(name) = self.peek_kind() else {
                self.error_at_current(DiagnosticCode::UnexpectedToken, "expected variable name");
                break;
            };
            let token = self.advance();
            let ident = Identifier::new(name, token.span());
            self.visitor.visit_declaration(&ident, kind);

            if self.match_token(&TokenKind::Equal) {
                let init = self.parse_assignment_level();
                self.walk_expression(&init, Access::Read);
            }
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.match_token(&TokenKind::Semicolon);
    }

    /// Parses a function declaration after any `async` has been consumed.
    /// The name binds in the enclosing scope; parameters and body get their
    /// own function scope.
    fn parse_function_declaration(&mut self) {
        self.advance(); // function
        if let TokenKind::Identifier(name) = self.peek_kind() {
            let token = self.advance();
            let ident = Identifier::new(name, token.span());
            self.visitor
                .visit_declaration(&ident, DeclarationKind::Function);
        } else {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected function name");
        }
        self.visitor.enter_function_scope();
        self.parse_function_parameters();
        self.parse_function_body_block();
        self.visitor.exit_function_scope();
    }

    fn parse_class_declaration(&mut self) {
        self.advance(); // class
        if let TokenKind::Identifier(name) = self.peek_kind() {
            let token = self.advance();
            let ident = Identifier::new(name, token.span());
            self.visitor.visit_declaration(&ident, DeclarationKind::Class);
        } else {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected class name");
        }
        self.parse_extends_clause();
        self.skip_class_body();
    }

    /// Parses `extends <expr>` if present, emitting uses for the superclass
    /// expression. Assignment-level parsing stops before the class body's
    /// `{`, which only begins an object literal in operand position.
    pub(super) fn parse_extends_clause(&mut self) {
        if matches!(self.peek_kind(), TokenKind::Identifier(name) if name == "extends") {
            self.advance();
            let superclass = self.parse_assignment_level();
            self.walk_expression(&superclass, Access::Read);
        }
    }

    /// Skips a class body with balanced delimiters. Method semantics are not
    /// analyzed yet; templates inside are parsed for real so the lexer's
    /// template state stays consistent. Returns the offset past the `}`.
    pub(super) fn skip_class_body(&mut self) -> u32 {
        if !matches!(self.peek_kind(), TokenKind::LeftBrace) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '{'");
            return self.peek().span().start();
        }
        let open = self.advance();
        let mut depth = 1u32;
        loop {
            match self.peek_kind() {
                TokenKind::EndOfFile => {
                    self.error_at(
                        DiagnosticCode::UnexpectedToken,
                        "missing '}' for class body",
                        open.span(),
                    );
                    return self.peek().span().start();
                }
                TokenKind::LeftBrace => {
                    self.advance();
                    depth += 1;
                }
                TokenKind::RightBrace => {
                    let token = self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return token.span().end();
                    }
                }
                TokenKind::TemplateHead => {
                    let _ = self.parse_expression();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn parse_import_declaration(&mut self) {
        self.advance(); // import
        match self.peek_kind() {
            // `import 'module'` for side effects only
            TokenKind::String => {
                self.advance();
                self.match_token(&TokenKind::Semicolon);
                return;
            }
            TokenKind::Identifier(name) => {
                // Default import
                let token = self.advance();
                let ident = Identifier::new(name, token.span());
                self.visitor
                    .visit_declaration(&ident, DeclarationKind::Import);
                if self.match_token(&TokenKind::Comma) {
                    self.parse_import_bindings();
                }
            }
            _ => self.parse_import_bindings(),
        }
        self.parse_from_clause();
        self.match_token(&TokenKind::Semicolon);
    }

    /// Parses `{a, b as c}` or `* as ns` import bindings.
    fn parse_import_bindings(&mut self) {
        match self.peek_kind() {
            TokenKind::LeftBrace => {
                self.advance();
                loop {
                    let imported = match self.peek_kind() {
                        TokenKind::Identifier(name) => {
                            let token = self.advance();
                            Some(Identifier::new(name, token.span()))
                        }
                        kind => kind.keyword_text().map(|text| {
                            let token = self.advance();
                            Identifier::new(text, token.span())
                        }),
                    };
                    let Some(imported) = imported else { break };
                    let local = if matches!(self.peek_kind(), TokenKind::Identifier(name) if name == "as")
                    {
                        self.advance();
                        if let TokenKind::Identifier(name) = self.peek_kind() {
                            let token = self.advance();
                            Identifier::new(name, token.span())
                        } else {
                            self.error_at_current(
                                DiagnosticCode::UnexpectedToken,
                                "expected name after 'as'",
                            );
                            imported
                        }
                    } else {
                        imported
                    };
                    self.visitor
                        .visit_declaration(&local, DeclarationKind::Import);
                    if !self.match_token(&TokenKind::Comma) {
                        break;
                    }
                }
                if !self.match_token(&TokenKind::RightBrace) {
                    self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '}'");
                }
            }
            TokenKind::Star => {
                self.advance();
                if matches!(self.peek_kind(), TokenKind::Identifier(name) if name == "as") {
                    self.advance();
                }
                if let TokenKind::Identifier(name) = self.peek_kind() {
                    let token = self.advance();
                    let ident = Identifier::new(name, token.span());
                    self.visitor
                        .visit_declaration(&ident, DeclarationKind::Import);
                } else {
                    self.error_at_current(
                        DiagnosticCode::UnexpectedToken,
                        "expected namespace name",
                    );
                }
            }
            kind => {
                self.error_at_current(
                    DiagnosticCode::UnexpectedToken,
                    format!("unexpected token in import: {kind}"),
                );
            }
        }
    }

    fn parse_from_clause(&mut self) {
        if matches!(self.peek_kind(), TokenKind::Identifier(name) if name == "from") {
            self.advance();
            if !self.match_token(&TokenKind::String) {
                self.error_at_current(DiagnosticCode::UnexpectedToken, "expected module string");
            }
        }
    }

    fn parse_export_declaration(&mut self) {
        let export_token = self.advance(); // `export`
        match self.peek_kind() {
            TokenKind::KwDefault => {
                self.advance();
                self.parse_expression_statement();
            }
            TokenKind::KwLet
            | TokenKind::KwConst
            | TokenKind::KwVar
            | TokenKind::KwFunction
            | TokenKind::KwClass
            | TokenKind::KwAsync => self.parse_statement(),
            TokenKind::LeftBrace => {
                self.advance();
                let mut exported = Vec::new();
                while let TokenKind::Identifier(name) = self.peek_kind() {
                    let token = self.advance();
                    exported.push(Identifier::new(name, token.span()));
                    if matches!(self.peek_kind(), TokenKind::Identifier(n) if n == "as") {
                        self.advance();
                        self.advance(); // exported name; not a local reference
                    }
                    if !self.match_token(&TokenKind::Comma) {
                        break;
                    }
                }
                if !self.match_token(&TokenKind::RightBrace) {
                    self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '}'");
                }
                // `export {a} from 'm'` re-exports without touching local
                // names; a bare `export {a}` reads local bindings.
                let is_reexport =
                    matches!(self.peek_kind(), TokenKind::Identifier(name) if name == "from");
                self.parse_from_clause();
                if !is_reexport {
                    for ident in &exported {
                        self.visitor.visit_use(ident);
                    }
                }
                self.match_token(&TokenKind::Semicolon);
            }
            TokenKind::Star => {
                self.advance();
                if matches!(self.peek_kind(), TokenKind::Identifier(name) if name == "as") {
                    self.advance();
                    self.advance();
                }
                self.parse_from_clause();
                self.match_token(&TokenKind::Semicolon);
            }
            _ => {
                // Not an export form after all; `export` was a plain
                // identifier. Continue the expression statement from it.
                let base = Expression::Variable(Identifier::new("export", export_token.span()));
                self.walk_expression(&base, Access::Read);
                self.match_token(&TokenKind::Semicolon);
            }
        }
    }

    // ========================================================================
    // Control Flow
    // ========================================================================

    fn parse_parenthesized_condition(&mut self) {
        if !self.match_token(&TokenKind::LeftParen) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '('");
            return;
        }
        let condition = self.parse_expression();
        self.walk_expression(&condition, Access::Read);
        if !self.match_token(&TokenKind::RightParen) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ')'");
        }
    }

    fn parse_if_statement(&mut self) {
        self.advance(); // if
        self.parse_parenthesized_condition();
        self.parse_statement();
        if self.match_token(&TokenKind::KwElse) {
            self.parse_statement();
        }
    }

    fn parse_while_statement(&mut self) {
        self.advance(); // while
        self.parse_parenthesized_condition();
        self.parse_statement();
    }

    fn parse_do_while_statement(&mut self) {
        self.advance(); // do
        self.parse_statement();
        if self.match_token(&TokenKind::KwWhile) {
            self.parse_parenthesized_condition();
        } else {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected 'while'");
        }
        self.match_token(&TokenKind::Semicolon);
    }

    #[allow(
        clippy::too_many_lines,
        reason = "for/for-in/for-of share a head; splitting duplicates the recovery paths"
    )]
    fn parse_for_statement(&mut self) {
        self.advance(); // for
        if !self.match_token(&TokenKind::LeftParen) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '('");
        }

        match self.peek_kind() {
            kind @ (TokenKind::KwLet | TokenKind::KwConst | TokenKind::KwVar) => {
                let decl_kind = match kind {
                    TokenKind::KwLet => DeclarationKind::Let,
                    TokenKind::KwConst => DeclarationKind::Const,
                    _ => DeclarationKind::Var,
                };
                // let/const bindings live in a block scope that also wraps
                // the loop body.
                let scoped = decl_kind.is_block_scoped();
                if scoped {
                    self.visitor.enter_block_scope();
                }
                self.advance(); // let / const / var

                if let TokenKind::Identifier(name) = self.peek_kind() {
                    let token = self.advance();
                    let ident = Identifier::new(name, token.span());
                    self.visitor.visit_declaration(&ident, decl_kind);

                    if self.is_at_of_or_in() {
                        self.advance(); // of / in
                        let iterated = self.parse_expression();
                        self.walk_expression(&iterated, Access::Read);
                    } else {
                        // Plain C-style head: remaining declarators, then
                        // condition and update clauses.
                        if self.match_token(&TokenKind::Equal) {
                            let init = self.parse_no_in_assignment();
                            self.walk_expression(&init, Access::Read);
                        }
                        while self.match_token(&TokenKind::Comma) {
                            let TokenKind::Identifier(name) = self.peek_kind() else {
                                self.error_at_current(
                                    DiagnosticCode::UnexpectedToken,
                                    "expected variable name",
                                );
                                break;
                            };
                            let token = self.advance();
                            let ident = Identifier::new(name, token.span());
                            self.visitor.visit_declaration(&ident, decl_kind);
                            if self.match_token(&TokenKind::Equal) {
                                let init = self.parse_no_in_assignment();
                                self.walk_expression(&init, Access::Read);
                            }
                        }
                        self.parse_for_condition_and_update();
                    }
                } else {
                    self.error_at_current(
                        DiagnosticCode::UnexpectedToken,
                        "expected variable name",
                    );
                }

                if !self.match_token(&TokenKind::RightParen) {
                    self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ')'");
                }
                self.parse_statement();
                if scoped {
                    self.visitor.exit_block_scope();
                }
            }
            TokenKind::Semicolon => {
                self.advance();
                self.parse_for_condition_and_update_after_first_semicolon();
                if !self.match_token(&TokenKind::RightParen) {
                    self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ')'");
                }
                self.parse_statement();
            }
            _ => {
                let init = {
                    self.no_in = true;
                    let init = self.parse_expression();
                    self.no_in = false;
                    init
                };
                if self.is_at_of_or_in() {
                    self.advance(); // of / in
                    self.walk_expression(&init, Access::Write);
                    let iterated = self.parse_expression();
                    self.walk_expression(&iterated, Access::Read);
                } else {
                    self.walk_expression(&init, Access::Read);
                    self.parse_for_condition_and_update();
                }
                if !self.match_token(&TokenKind::RightParen) {
                    self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ')'");
                }
                self.parse_statement();
            }
        }
    }

    fn is_at_of_or_in(&mut self) -> bool {
        matches!(self.peek_kind(), TokenKind::KwIn)
            || matches!(self.peek_kind(), TokenKind::Identifier(name) if name == "of")
    }

    /// Parses an assignment-level initializer with `in` disabled, so
    /// `for (let k in o)` is not misread as a relational expression.
    fn parse_no_in_assignment(&mut self) -> Expression {
        self.no_in = true;
        let expr = self.parse_assignment_level();
        self.no_in = false;
        expr
    }

    fn parse_for_condition_and_update(&mut self) {
        if !self.match_token(&TokenKind::Semicolon) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ';'");
        }
        self.parse_for_condition_and_update_after_first_semicolon();
    }

    fn parse_for_condition_and_update_after_first_semicolon(&mut self) {
        if !matches!(self.peek_kind(), TokenKind::Semicolon) {
            let condition = self.parse_expression();
            self.walk_expression(&condition, Access::Read);
        }
        if !self.match_token(&TokenKind::Semicolon) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ';'");
        }
        if !matches!(self.peek_kind(), TokenKind::RightParen | TokenKind::EndOfFile) {
            let update = self.parse_expression();
            self.walk_expression(&update, Access::Read);
        }
    }

    fn parse_return_statement(&mut self) {
        self.advance(); // return
        // ASI: a line terminator after `return` ends the statement.
        if !matches!(
            self.peek_kind(),
            TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::EndOfFile
        ) && !self.peek().has_newline_before()
        {
            let value = self.parse_expression();
            self.walk_expression(&value, Access::Read);
        }
        self.match_token(&TokenKind::Semicolon);
    }

    fn parse_throw_statement(&mut self) {
        self.advance(); // throw
        if !matches!(
            self.peek_kind(),
            TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::EndOfFile
        ) {
            let value = self.parse_expression();
            self.walk_expression(&value, Access::Read);
        }
        self.match_token(&TokenKind::Semicolon);
    }

    fn parse_try_statement(&mut self) {
        self.advance(); // try
        if matches!(self.peek_kind(), TokenKind::LeftBrace) {
            self.parse_block_statement();
        } else {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '{'");
        }

        if self.match_token(&TokenKind::KwCatch) {
            // The catch binding lives in a scope wrapping the handler body.
            self.visitor.enter_block_scope();
            if self.match_token(&TokenKind::LeftParen) {
                let binding = self.parse_assignment_level();
                self.declare_parameter_pattern(&binding);
                if !self.match_token(&TokenKind::RightParen) {
                    self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ')'");
                }
            }
            if matches!(self.peek_kind(), TokenKind::LeftBrace) {
                self.parse_block_statement();
            } else {
                self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '{'");
            }
            self.visitor.exit_block_scope();
        }

        if self.match_token(&TokenKind::KwFinally) {
            if matches!(self.peek_kind(), TokenKind::LeftBrace) {
                self.parse_block_statement();
            } else {
                self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '{'");
            }
        }
    }

    fn parse_switch_statement(&mut self) {
        self.advance(); // switch
        self.parse_parenthesized_condition();
        if !self.match_token(&TokenKind::LeftBrace) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '{'");
            return;
        }
        self.visitor.enter_block_scope();
        loop {
            match self.peek_kind() {
                TokenKind::KwCase => {
                    self.advance();
                    let label = self.parse_expression();
                    self.walk_expression(&label, Access::Read);
                    if !self.match_token(&TokenKind::Colon) {
                        self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ':'");
                    }
                }
                TokenKind::KwDefault => {
                    self.advance();
                    if !self.match_token(&TokenKind::Colon) {
                        self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ':'");
                    }
                }
                TokenKind::RightBrace | TokenKind::EndOfFile => break,
                _ => {
                    let before = self.peek().span().start();
                    self.parse_statement();
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
        if !self.match_token(&TokenKind::RightBrace) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '}'");
        }
        self.visitor.exit_block_scope();
    }

    // ========================================================================
    // Functions: Parameters and Bodies
    // ========================================================================

    /// Parses `(param, …)` for a function whose scope is already entered,
    /// declaring every bound name.
    pub(super) fn parse_function_parameters(&mut self) {
        if !matches!(self.peek_kind(), TokenKind::LeftParen) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '('");
            return;
        }
        let open = self.advance();
        if !matches!(self.peek_kind(), TokenKind::RightParen) {
            loop {
                let parameter = self.parse_spread_or_assignment();
                if matches!(&parameter, Expression::Invalid { span } if span.is_empty()) {
                    let kind = self.peek_kind();
                    self.error_at_current(
                        DiagnosticCode::UnexpectedToken,
                        format!("unexpected token in parameter list: {kind}"),
                    );
                    break;
                }
                self.declare_parameter_pattern(&parameter);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
                if matches!(self.peek_kind(), TokenKind::RightParen) {
                    break; // trailing comma
                }
            }
        }
        if !self.match_token(&TokenKind::RightParen) {
            self.error_at(
                DiagnosticCode::UnmatchedParenthesis,
                "unmatched parenthesis",
                open.span(),
            );
        }
    }

    /// Parses a `{…}` function body in the already-entered function scope.
    /// Returns the offset just past the closing brace.
    pub(super) fn parse_function_body_block(&mut self) -> u32 {
        if !matches!(self.peek_kind(), TokenKind::LeftBrace) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '{'");
            return self.peek().span().start();
        }
        self.advance(); // {
        self.parse_statement_list_until_brace();
        if matches!(self.peek_kind(), TokenKind::RightBrace) {
            self.advance().span().end()
        } else {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '}'");
            self.peek().span().start()
        }
    }

    /// Declares every name bound by a parameter pattern: plain identifiers,
    /// defaults, rests, and array/object destructuring. Default values are
    /// walked for uses.
    pub(super) fn declare_parameter_pattern(&mut self, pattern: &Expression) {
        match pattern {
            Expression::Variable(name) => {
                self.visitor
                    .visit_declaration(name, DeclarationKind::Parameter);
            }
            Expression::Assignment { target, value, .. } => {
                self.declare_parameter_pattern(target);
                self.walk_expression(value, Access::Read);
            }
            Expression::Spread { operand, .. } => self.declare_parameter_pattern(operand),
            Expression::Array { elements, .. } => {
                for element in elements {
                    self.declare_parameter_pattern(element);
                }
            }
            Expression::Object { entries, .. } => {
                for entry in entries {
                    if let Some(property) = &entry.property {
                        // Computed keys are ordinary reads; literal keys
                        // walk as no-ops.
                        self.walk_expression(property, Access::Read);
                    }
                    self.declare_parameter_pattern(&entry.value);
                }
            }
            _ => {}
        }
    }

    // ========================================================================
    // Expression Walking
    // ========================================================================

    /// Walks an expression emitting `use` events for every read. Used by the
    /// expression parser for arrow bodies, which are analyzed inside their
    /// function scope at parse time.
    pub(super) fn walk_expression_reads(&mut self, expression: &Expression) {
        self.walk_expression(expression, Access::Read);
    }

    /// Emits variable events for an already-parsed expression, in source
    /// order. Function and arrow nodes are leaves here: their parameters and
    /// bodies were analyzed inside their own scope during parsing.
    fn walk_expression(&mut self, expression: &Expression, access: Access) {
        match expression {
            Expression::Variable(name) => match access {
                Access::Read => self.visitor.visit_use(name),
                Access::Write => self.visitor.visit_assignment(name),
            },
            Expression::Invalid { .. }
            | Expression::Literal { .. }
            | Expression::Super { .. }
            | Expression::Import { .. }
            | Expression::Function { .. }
            | Expression::NamedFunction { .. }
            | Expression::ArrowFunctionWithExpression { .. }
            | Expression::ArrowFunctionWithStatements { .. } => {}
            Expression::Unary { operand, .. }
            | Expression::RwUnaryPrefix { operand, .. }
            | Expression::RwUnarySuffix { operand, .. }
            | Expression::Await { operand, .. } => self.walk_expression(operand, Access::Read),
            Expression::Spread { operand, .. } => self.walk_expression(operand, access),
            Expression::Binary { children, .. } => {
                for child in children {
                    self.walk_expression(child, Access::Read);
                }
            }
            Expression::Assignment { target, value, .. }
            | Expression::UpdatingAssignment { target, value, .. } => {
                self.walk_expression(target, Access::Write);
                self.walk_expression(value, Access::Read);
            }
            Expression::Conditional {
                condition,
                consequent,
                alternate,
                ..
            } => {
                self.walk_expression(condition, Access::Read);
                self.walk_expression(consequent, Access::Read);
                self.walk_expression(alternate, Access::Read);
            }
            Expression::Dot { object, .. } => self.walk_expression(object, Access::Read),
            Expression::Index { object, index, .. } => {
                self.walk_expression(object, Access::Read);
                self.walk_expression(index, Access::Read);
            }
            Expression::Call {
                callee, arguments, ..
            }
            | Expression::New {
                callee, arguments, ..
            } => {
                self.walk_expression(callee, Access::Read);
                for argument in arguments {
                    self.walk_expression(argument, Access::Read);
                }
            }
            Expression::Array { elements, .. } => {
                // Context propagates so `[a, b] = xs` writes its elements.
                for element in elements {
                    self.walk_expression(element, access);
                }
            }
            Expression::Object { entries, .. } => {
                for entry in entries {
                    if let Some(property) = &entry.property {
                        self.walk_expression(property, Access::Read);
                    }
                    self.walk_expression(&entry.value, access);
                }
            }
            Expression::Template { substitutions, .. } => {
                for substitution in substitutions {
                    self.walk_expression(substitution, Access::Read);
                }
            }
        }
    }
}
