// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing.
//!
//! Pratt parsing (top-down operator precedence) drives binary expressions:
//! [`binary_binding_power`] assigns each operator a left and right binding
//! power, and consecutive operators at one precedence level collapse into a
//! single n-ary [`Expression::Binary`] node. Parenthesized subexpressions
//! produce fresh nodes, so `(x+y)+z` stays nested while `x+y+z` is flat.
//!
//! Recovery policy for malformed expressions:
//!
//! - An operator with a missing operand gets an E001 diagnostic at the
//!   operator and an [`Expression::Invalid`] child with an empty span where
//!   the operand belonged.
//! - Every unmatched `(` gets its own E002, innermost first.
//! - An assignment whose left side is not assignable gets E003 at the left
//!   side's span; the assignment node is still built.

use crate::ast::{Expression, FunctionAttributes, Identifier, ObjectEntry};
use crate::diagnostic::DiagnosticCode;
use crate::source_analysis::{Span, Token, TokenKind};

use super::Parser;

// ============================================================================
// Pratt Parsing for Binary Operator Precedence
// ============================================================================

/// Binding power for binary operators (Pratt parsing).
///
/// Higher values bind tighter. Left and right binding powers differ for
/// associativity:
/// - Left-associative: `left == right - 1` (e.g. `+`, `-`)
/// - Right-associative: `left == right + 1` (e.g. `**`)
#[derive(Debug, Clone, Copy)]
pub(super) struct BindingPower {
    /// How tightly this operator binds to its left operand.
    pub(super) left: u8,
    /// How tightly this operator binds to its right operand.
    pub(super) right: u8,
}

impl BindingPower {
    const fn left_assoc(precedence: u8) -> Self {
        Self {
            left: precedence,
            right: precedence + 1,
        }
    }

    const fn right_assoc(precedence: u8) -> Self {
        Self {
            left: precedence + 1,
            right: precedence,
        }
    }
}

/// Gets the binding power for a binary operator token.
///
/// Returns `None` for anything that is not a binary operator, which ends
/// binary expression parsing — useful for error recovery.
///
/// # Precedence Levels (from lowest to highest)
///
/// | Level | Operators | Associativity |
/// |-------|-----------|---------------|
/// | 10 | `\|\|` `??`          | Left |
/// | 12 | `&&`                 | Left |
/// | 14 | `\|`                 | Left |
/// | 16 | `^`                  | Left |
/// | 18 | `&`                  | Left |
/// | 20 | `==` `!=` `===` `!==`| Left |
/// | 22 | `<` `<=` `>` `>=` `in` `instanceof` | Left |
/// | 24 | `<<` `>>` `>>>`      | Left |
/// | 26 | `+` `-`              | Left |
/// | 28 | `*` `/` `%`          | Left |
/// | 30 | `**`                 | Right |
///
/// Comma, assignment, conditional, and unary operators are handled by their
/// own parse levels, not this table.
pub(super) fn binary_binding_power(kind: &TokenKind) -> Option<BindingPower> {
    let bp = match kind {
        TokenKind::PipePipe | TokenKind::QuestionQuestion => BindingPower::left_assoc(10),
        TokenKind::AmpersandAmpersand => BindingPower::left_assoc(12),
        TokenKind::Pipe => BindingPower::left_assoc(14),
        TokenKind::Circumflex => BindingPower::left_assoc(16),
        TokenKind::Ampersand => BindingPower::left_assoc(18),
        TokenKind::EqualEqual
        | TokenKind::EqualEqualEqual
        | TokenKind::BangEqual
        | TokenKind::BangEqualEqual => BindingPower::left_assoc(20),
        TokenKind::Less
        | TokenKind::LessEqual
        | TokenKind::Greater
        | TokenKind::GreaterEqual
        | TokenKind::KwIn
        | TokenKind::KwInstanceof => BindingPower::left_assoc(22),
        TokenKind::LessLess | TokenKind::GreaterGreater | TokenKind::GreaterGreaterGreater => {
            BindingPower::left_assoc(24)
        }
        TokenKind::Plus | TokenKind::Minus => BindingPower::left_assoc(26),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => BindingPower::left_assoc(28),
        TokenKind::StarStar => BindingPower::right_assoc(30),
        _ => return None,
    };
    Some(bp)
}

/// Returns `true` for the placeholder of an operand that was never there.
fn is_missing(expr: &Expression) -> bool {
    matches!(expr, Expression::Invalid { span } if span.is_empty())
}

impl Parser<'_, '_> {
    // ========================================================================
    // Entry Points
    // ========================================================================

    /// Parses a full expression, comma operator included.
    ///
    /// Always returns a tree; malformed input yields [`Expression::Invalid`]
    /// placeholders plus diagnostics in the sink.
    pub fn parse_expression(&mut self) -> Expression {
        let first = self.parse_spread_or_assignment();
        if !matches!(self.peek_kind(), TokenKind::Comma) {
            return first;
        }
        let mut children = vec![first];
        while matches!(self.peek_kind(), TokenKind::Comma) {
            let op = self.advance();
            let item = self.parse_spread_or_assignment();
            if is_missing(&item) {
                self.error_at(
                    DiagnosticCode::MissingOperandForOperator,
                    "missing operand for operator",
                    op.span(),
                );
            }
            children.push(item);
        }
        let span = children[0].span().merge(
            children
                .last()
                .expect("comma expression has at least two children")
                .span(),
        );
        Expression::Binary { children, span }
    }

    /// Parses one element of a comma-separated list: a spread or an
    /// assignment-level expression.
    pub(super) fn parse_spread_or_assignment(&mut self) -> Expression {
        if matches!(self.peek_kind(), TokenKind::DotDotDot) {
            let dots = self.advance();
            let operand = self.parse_assignment_level();
            if is_missing(&operand) {
                self.error_at(
                    DiagnosticCode::MissingOperandForOperator,
                    "missing operand for operator",
                    dots.span(),
                );
            }
            let span = dots.span().merge(operand.span());
            return Expression::Spread {
                operand: Box::new(operand),
                span,
            };
        }
        self.parse_assignment_level()
    }

    /// Parses at assignment precedence (no comma operator).
    ///
    /// Grows the stack on the heap when remaining space is low: 32 KiB red
    /// zone, 256 KiB segments. The nesting-depth guard caps recursion, so
    /// few segments are ever needed.
    pub(super) fn parse_assignment_level(&mut self) -> Expression {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            let here = self.peek().span();
            if let Err(error) = self.enter_nesting(here) {
                return error;
            }
            let result = self.parse_assignment_inner();
            self.leave_nesting();
            result
        })
    }

    fn parse_assignment_inner(&mut self) -> Expression {
        let left = self.parse_conditional_level();

        match self.peek_kind() {
            TokenKind::Equal => self.finish_assignment(left, /* updating: */ false),
            TokenKind::PlusEqual
            | TokenKind::MinusEqual
            | TokenKind::StarEqual
            | TokenKind::StarStarEqual
            | TokenKind::SlashEqual
            | TokenKind::PercentEqual
            | TokenKind::LessLessEqual
            | TokenKind::GreaterGreaterEqual
            | TokenKind::GreaterGreaterGreaterEqual
            | TokenKind::AmpersandEqual
            | TokenKind::PipeEqual
            | TokenKind::CircumflexEqual => self.finish_assignment(left, /* updating: */ true),
            // `a => b`: a single identifier is a complete parameter list.
            TokenKind::Arrow if matches!(left, Expression::Variable(_)) => {
                self.advance();
                let start = left.span().start();
                self.parse_arrow_body(vec![left], FunctionAttributes::Normal, start)
            }
            _ => left,
        }
    }

    fn finish_assignment(&mut self, target: Expression, updating: bool) -> Expression {
        let op = self.advance();
        let value = self.parse_assignment_level();
        if is_missing(&value) {
            self.error_at(
                DiagnosticCode::MissingOperandForOperator,
                "missing operand for operator",
                op.span(),
            );
        }
        if !target.is_assignment_target() {
            self.error_at(
                DiagnosticCode::InvalidExpressionLeftOfAssignment,
                "invalid expression left of assignment",
                target.span(),
            );
        }
        let span = target.span().merge(op.span()).merge(value.span());
        if updating {
            Expression::UpdatingAssignment {
                target: Box::new(target),
                value: Box::new(value),
                span,
            }
        } else {
            Expression::Assignment {
                target: Box::new(target),
                value: Box::new(value),
                span,
            }
        }
    }

    fn parse_conditional_level(&mut self) -> Expression {
        let condition = self.parse_binary_level(0);
        if !matches!(self.peek_kind(), TokenKind::Question) {
            return condition;
        }
        self.advance(); // ?
        let consequent = self.parse_assignment_level();
        if !self.match_token(&TokenKind::Colon) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected ':' in conditional");
        }
        let alternate = self.parse_assignment_level();
        let span = condition
            .span()
            .merge(consequent.span())
            .merge(alternate.span());
        Expression::Conditional {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            span,
        }
    }

    // ========================================================================
    // Binary Operators (Pratt)
    // ========================================================================

    /// Pratt parsing core. `min_bp` is the minimum left binding power an
    /// operator needs to be consumed at this level.
    fn parse_binary_level(&mut self, min_bp: u8) -> Expression {
        let mut left = self.parse_prefix_level();
        // Binding power of the n-ary run `left` currently heads, if this
        // loop built it. A node from a deeper call (parentheses) never
        // extends, which keeps `(x+y)+z` nested.
        let mut run_bp: Option<u8> = None;

        loop {
            let kind = self.peek_kind();
            if matches!(kind, TokenKind::KwIn) && self.no_in {
                break;
            }
            let Some(bp) = binary_binding_power(&kind) else {
                break;
            };
            if bp.left < min_bp {
                break;
            }

            let op = self.advance();
            if is_missing(&left) {
                self.error_at(
                    DiagnosticCode::MissingOperandForOperator,
                    "missing operand for operator",
                    op.span(),
                );
            }
            let right = self.parse_binary_level(bp.right);
            if is_missing(&right) {
                self.error_at(
                    DiagnosticCode::MissingOperandForOperator,
                    "missing operand for operator",
                    op.span(),
                );
            }

            if run_bp == Some(bp.left) {
                if let Expression::Binary { children, span } = &mut left {
                    *span = span.merge(right.span());
                    children.push(right);
                    continue;
                }
            }
            let span = left.span().merge(op.span()).merge(right.span());
            left = Expression::Binary {
                children: vec![left, right],
                span,
            };
            run_bp = Some(bp.left);
        }
        left
    }

    // ========================================================================
    // Unary Operators
    // ========================================================================

    fn parse_prefix_level(&mut self) -> Expression {
        match self.peek_kind() {
            TokenKind::Bang
            | TokenKind::Tilde
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::KwTypeof
            | TokenKind::KwVoid
            | TokenKind::KwDelete => {
                let op = self.advance();
                let operand = self.parse_prefix_operand(op.span());
                let span = op.span().merge(operand.span());
                Expression::Unary {
                    operand: Box::new(operand),
                    span,
                }
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = self.advance();
                let operand = self.parse_prefix_operand(op.span());
                let span = op.span().merge(operand.span());
                Expression::RwUnaryPrefix {
                    operand: Box::new(operand),
                    span,
                }
            }
            TokenKind::KwAwait => {
                let op = self.advance();
                let operand = self.parse_prefix_operand(op.span());
                let span = op.span().merge(operand.span());
                Expression::Await {
                    operand: Box::new(operand),
                    span,
                }
            }
            _ => self.parse_postfix_level(),
        }
    }

    /// Parses the operand of a prefix operator, diagnosing a missing one at
    /// the operator's span.
    fn parse_prefix_operand(&mut self, op_span: Span) -> Expression {
        if let Err(error) = self.enter_nesting(op_span) {
            return error;
        }
        let operand = self.parse_prefix_level();
        self.leave_nesting();
        if is_missing(&operand) {
            self.error_at(
                DiagnosticCode::MissingOperandForOperator,
                "missing operand for operator",
                op_span,
            );
        }
        operand
    }

    fn parse_postfix_level(&mut self) -> Expression {
        let mut expr = self.parse_member_expression(/* allow_call: */ true);
        while matches!(
            self.peek_kind(),
            TokenKind::PlusPlus | TokenKind::MinusMinus
        ) {
            // ASI: a line terminator detaches a would-be postfix operator
            // from its operand; a semicolon is due instead, and the operator
            // starts the next statement as a prefix.
            if self.peek().has_newline_before() {
                self.insert_semicolon();
                break;
            }
            let op = self.advance();
            // After a postfix `++` a `/` is division; token kinds alone
            // would infer a regexp (as after prefix `++`).
            self.set_regexp_allowed(false);
            let span = expr.span().merge(op.span());
            expr = Expression::RwUnarySuffix {
                operand: Box::new(expr),
                span,
            };
        }
        expr
    }

    // ========================================================================
    // Member Access, Calls, `new`
    // ========================================================================

    /// Parses a primary expression followed by `.name`, `[index]`, and (when
    /// `allow_call` holds) `(args)` chains. `new X` parses its callee with
    /// calls disabled so the argument list binds to the `new`.
    fn parse_member_expression(&mut self, allow_call: bool) -> Expression {
        let mut expr = self.parse_primary();
        loop {
            match self.peek_kind() {
                TokenKind::LeftParen if allow_call => {
                    let (arguments, end) = self.parse_arguments();
                    let span = expr.span().to(end);
                    expr = Expression::Call {
                        callee: Box::new(expr),
                        arguments,
                        span,
                    };
                }
                TokenKind::Dot => {
                    let dot = self.advance();
                    let property = self.parse_property_name(dot.span());
                    let span = expr.span().merge(property.span);
                    expr = Expression::Dot {
                        object: Box::new(expr),
                        property,
                        span,
                    };
                }
                TokenKind::LeftBracket => {
                    let open = self.advance();
                    let index = self.parse_expression();
                    let end = if matches!(self.peek_kind(), TokenKind::RightBracket) {
                        self.advance().span().end()
                    } else {
                        self.error_at(
                            DiagnosticCode::UnmatchedIndexingBracket,
                            "unmatched indexing bracket",
                            open.span(),
                        );
                        index.span().end().max(open.span().end())
                    };
                    let span = expr.span().to(end);
                    expr = Expression::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                        span,
                    };
                }
                _ => break,
            }
        }
        expr
    }

    /// Parses the name after a `.`; reserved words are allowed
    /// (`promise.catch`).
    fn parse_property_name(&mut self, dot_span: Span) -> Identifier {
        match self.peek_kind() {
            TokenKind::Identifier(name) => {
                let token = self.advance();
                Identifier::new(name, token.span())
            }
            kind => {
                if let Some(text) = kind.keyword_text() {
                    let token = self.advance();
                    Identifier::new(text, token.span())
                } else {
                    self.error_at(
                        DiagnosticCode::MissingPropertyName,
                        "missing property name after '.'",
                        dot_span,
                    );
                    Identifier::new("", Span::empty(dot_span.end()))
                }
            }
        }
    }

    /// Parses a parenthesized argument list. Returns the arguments and the
    /// byte offset just past the `)` (or the best recovery point).
    fn parse_arguments(&mut self) -> (Vec<Expression>, u32) {
        let open = self.advance();
        let mut arguments = Vec::new();
        if !matches!(self.peek_kind(), TokenKind::RightParen) {
            loop {
                arguments.push(self.parse_spread_or_assignment());
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
                if matches!(self.peek_kind(), TokenKind::RightParen) {
                    break; // trailing comma
                }
            }
        }
        if matches!(self.peek_kind(), TokenKind::RightParen) {
            let close = self.advance();
            (arguments, close.span().end())
        } else {
            self.error_at(
                DiagnosticCode::UnmatchedParenthesis,
                "unmatched parenthesis",
                open.span(),
            );
            let end = arguments
                .last()
                .map_or(open.span().end(), |last| last.span().end());
            (arguments, end)
        }
    }

    fn parse_new_expression(&mut self) -> Expression {
        let new_token = self.advance();
        let callee = self.parse_member_expression(/* allow_call: */ false);
        if is_missing(&callee) {
            self.error_at(
                DiagnosticCode::MissingOperandForOperator,
                "missing operand for operator",
                new_token.span(),
            );
        }
        let (arguments, end) = if matches!(self.peek_kind(), TokenKind::LeftParen) {
            self.parse_arguments()
        } else {
            (Vec::new(), callee.span().end().max(new_token.span().end()))
        };
        Expression::New {
            callee: Box::new(callee),
            arguments,
            span: new_token.span().to(end),
        }
    }

    // ========================================================================
    // Primary Expressions
    // ========================================================================

    /// Parses a primary expression. An unfitting token is NOT consumed: the
    /// caller decides whether a missing operand is an error here.
    fn parse_primary(&mut self) -> Expression {
        match self.peek_kind() {
            TokenKind::Number
            | TokenKind::String
            | TokenKind::Regexp
            | TokenKind::CompleteTemplate
            | TokenKind::KwTrue
            | TokenKind::KwFalse
            | TokenKind::KwNull
            | TokenKind::KwThis => {
                let token = self.advance();
                Expression::Literal { span: token.span() }
            }
            TokenKind::Identifier(name) => {
                let token = self.advance();
                Expression::Variable(Identifier::new(name, token.span()))
            }
            TokenKind::TemplateHead => self.parse_template(),
            TokenKind::LeftParen => self.parse_parenthesized(),
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::LeftBrace => self.parse_object_literal(),
            TokenKind::KwFunction => {
                let start = self.peek().span().start();
                self.parse_function_expression(FunctionAttributes::Normal, start)
            }
            TokenKind::KwAsync => {
                let async_token = self.advance();
                self.parse_async_tail(&async_token)
            }
            TokenKind::KwClass => self.parse_class_expression(),
            TokenKind::KwNew => self.parse_new_expression(),
            TokenKind::KwSuper => {
                let token = self.advance();
                Expression::Super { span: token.span() }
            }
            TokenKind::KwImport => {
                let token = self.advance();
                Expression::Import { span: token.span() }
            }
            _ => Expression::Invalid {
                span: Span::empty(self.peek().span().start()),
            },
        }
    }

    /// Parses `(…)`: either a grouped expression or an arrow parameter list,
    /// decided by whether `=>` follows the `)`.
    ///
    /// The contents parse as a comma-separated item list, which serves both
    /// readings: items become arrow parameters, or are rebuilt into the
    /// grouped expression (one item stays itself, so `(x)` keeps `x`'s
    /// span; several become one n-ary comma node).
    fn parse_parenthesized(&mut self) -> Expression {
        let open = self.advance();
        let mut items = Vec::new();
        if !matches!(self.peek_kind(), TokenKind::RightParen) {
            loop {
                items.push(self.parse_spread_or_assignment());
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
                if matches!(self.peek_kind(), TokenKind::RightParen) {
                    break; // trailing comma, legal in parameter lists
                }
            }
        }

        let close = if matches!(self.peek_kind(), TokenKind::RightParen) {
            Some(self.advance())
        } else {
            self.error_at(
                DiagnosticCode::UnmatchedParenthesis,
                "unmatched parenthesis",
                open.span(),
            );
            None
        };

        if close.is_some() && matches!(self.peek_kind(), TokenKind::Arrow) {
            self.advance();
            return self.parse_arrow_body(items, FunctionAttributes::Normal, open.span().start());
        }

        match items.len() {
            0 => {
                let close_end = close.map_or(open.span().end(), |c| c.span().end());
                let span = open.span().to(close_end);
                self.error_at(
                    DiagnosticCode::MissingExpressionBetweenParentheses,
                    "missing expression between parentheses",
                    span,
                );
                Expression::Invalid { span }
            }
            1 => items.pop().expect("length was checked"),
            _ => {
                let span = items[0]
                    .span()
                    .merge(items.last().expect("length was checked").span());
                Expression::Binary {
                    children: items,
                    span,
                }
            }
        }
    }

    /// Parses an arrow function after its `=>` has been consumed.
    ///
    /// The whole scope lifecycle runs here, at parse time: enter the function
    /// scope, declare the parameters, analyze the body, leave. Enclosing
    /// expression walks treat the finished node as a leaf.
    pub(super) fn parse_arrow_body(
        &mut self,
        parameters: Vec<Expression>,
        attributes: FunctionAttributes,
        start: u32,
    ) -> Expression {
        self.visitor.enter_function_scope();
        for parameter in &parameters {
            self.declare_parameter_pattern(parameter);
        }

        if matches!(self.peek_kind(), TokenKind::LeftBrace) {
            let end = self.parse_function_body_block();
            self.visitor.exit_function_scope();
            return Expression::ArrowFunctionWithStatements {
                parameters,
                attributes,
                span: Span::new(start, end),
            };
        }

        let body = self.parse_assignment_level();
        if is_missing(&body) {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected arrow function body");
        }
        self.walk_expression_reads(&body);
        self.visitor.exit_function_scope();
        let span = Span::new(start, body.span().end().max(start));
        Expression::ArrowFunctionWithExpression {
            parameters,
            body: Box::new(body),
            attributes,
            span,
        }
    }

    /// Parses what follows a consumed `async` token: `async function`,
    /// `async (…) => …`, `async x => …`, a call `async(…)`, or just the
    /// contextual identifier `async`.
    pub(super) fn parse_async_tail(&mut self, async_token: &Token) -> Expression {
        let start = async_token.span().start();
        // A line terminator after `async` detaches it (ASI-adjacent rule):
        // `async` then parameters must be on one line.
        let newline_next = self.peek().has_newline_before();
        match self.peek_kind() {
            TokenKind::KwFunction if !newline_next => {
                self.parse_function_expression(FunctionAttributes::Async, start)
            }
            TokenKind::Identifier(_) if !newline_next && self.peek2_is_arrow() => {
                let token = self.advance();
                let TokenKind::Identifier(name) = token.kind().clone() else {
                    unreachable!("identifier was peeked");
                };
                let parameter = Expression::Variable(Identifier::new(name, token.span()));
                self.advance(); // =>
                self.parse_arrow_body(vec![parameter], FunctionAttributes::Async, start)
            }
            TokenKind::LeftParen if !newline_next => {
                let (arguments, end) = self.parse_arguments();
                if matches!(self.peek_kind(), TokenKind::Arrow) {
                    self.advance();
                    return self.parse_arrow_body(arguments, FunctionAttributes::Async, start);
                }
                let callee = Expression::Variable(Identifier::new("async", async_token.span()));
                Expression::Call {
                    callee: Box::new(callee),
                    arguments,
                    span: Span::new(start, end),
                }
            }
            _ => Expression::Variable(Identifier::new("async", async_token.span())),
        }
    }

    fn peek2_is_arrow(&mut self) -> bool {
        matches!(self.peek2().kind(), TokenKind::Arrow)
    }

    /// Parses a function expression; `start` is the offset of `function` or
    /// of a preceding `async`. The name of a named function expression is
    /// visible only inside the function itself.
    fn parse_function_expression(
        &mut self,
        attributes: FunctionAttributes,
        start: u32,
    ) -> Expression {
        self.advance(); // function
        let name = if let TokenKind::Identifier(name) = self.peek_kind() {
            let token = self.advance();
            Some(Identifier::new(name, token.span()))
        } else {
            None
        };

        self.visitor.enter_function_scope();
        if let Some(name) = &name {
            self.visitor
                .visit_declaration(name, super::DeclarationKind::Function);
        }
        self.parse_function_parameters();
        let end = self.parse_function_body_block();
        self.visitor.exit_function_scope();

        let span = Span::new(start, end);
        match name {
            Some(name) => Expression::NamedFunction {
                name,
                attributes,
                span,
            },
            None => Expression::Function { attributes, span },
        }
    }

    /// Parses a class expression. Classes carry no expression semantics the
    /// linter models yet, so the body is skipped and the whole expression is
    /// a literal-shaped leaf.
    fn parse_class_expression(&mut self) -> Expression {
        let class_token = self.advance();
        if let TokenKind::Identifier(_) = self.peek_kind() {
            self.advance();
        }
        self.parse_extends_clause();
        let end = self.skip_class_body();
        Expression::Literal {
            span: class_token.span().to(end),
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Parses a template with substitutions, the head token being current.
    fn parse_template(&mut self) -> Expression {
        let head = self.advance();
        let start = head.span().start();
        let mut substitutions = Vec::new();
        let mut end = head.span().end();

        loop {
            substitutions.push(self.parse_expression());
            if !matches!(self.peek_kind(), TokenKind::RightBrace) {
                self.error_at_current(
                    DiagnosticCode::UnexpectedToken,
                    "expected '}' in template substitution",
                );
                break;
            }
            self.skip_in_template(start);
            match self.peek_kind() {
                TokenKind::TemplateMiddle => {
                    end = self.advance().span().end();
                }
                _ => {
                    // TemplateTail, possibly synthesized at end of file.
                    end = self.advance().span().end();
                    break;
                }
            }
        }

        Expression::Template {
            substitutions,
            span: head.span().to(end),
        }
    }

    fn parse_array_literal(&mut self) -> Expression {
        let open = self.advance();
        let mut elements = Vec::new();
        loop {
            if self.match_token(&TokenKind::Comma) {
                continue; // elision or separator
            }
            if matches!(
                self.peek_kind(),
                TokenKind::RightBracket | TokenKind::EndOfFile
            ) {
                break;
            }
            let element = self.parse_spread_or_assignment();
            if is_missing(&element) {
                let kind = self.peek_kind();
                self.error_at_current(
                    DiagnosticCode::UnexpectedToken,
                    format!("unexpected token in array literal: {kind}"),
                );
                self.advance();
                continue;
            }
            elements.push(element);
            if !matches!(self.peek_kind(), TokenKind::Comma) {
                break;
            }
        }
        let end = if matches!(self.peek_kind(), TokenKind::RightBracket) {
            self.advance().span().end()
        } else {
            self.error_at(
                DiagnosticCode::UnmatchedIndexingBracket,
                "unmatched indexing bracket",
                open.span(),
            );
            elements
                .last()
                .map_or(open.span().end(), |last| last.span().end())
        };
        Expression::Array {
            elements,
            span: open.span().to(end),
        }
    }

    fn parse_object_literal(&mut self) -> Expression {
        let open = self.advance();
        let mut entries = Vec::new();
        loop {
            if matches!(
                self.peek_kind(),
                TokenKind::RightBrace | TokenKind::EndOfFile
            ) {
                break;
            }
            if let Some(entry) = self.parse_object_entry() {
                entries.push(entry);
            } else {
                break;
            }
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        let end = if matches!(self.peek_kind(), TokenKind::RightBrace) {
            self.advance().span().end()
        } else {
            self.error_at_current(DiagnosticCode::UnexpectedToken, "expected '}' in object literal");
            entries
                .last()
                .map_or(open.span().end(), |last| last.value.span().end())
        };
        Expression::Object {
            entries,
            span: open.span().to(end),
        }
    }

    /// Parses one object literal entry, or `None` on an unrecoverable token.
    fn parse_object_entry(&mut self) -> Option<ObjectEntry> {
        // Spread entry: `{...other}`
        if matches!(self.peek_kind(), TokenKind::DotDotDot) {
            let dots = self.advance();
            let operand = self.parse_assignment_level();
            let span = dots.span().merge(operand.span());
            return Some(ObjectEntry {
                property: None,
                value: Expression::Spread {
                    operand: Box::new(operand),
                    span,
                },
            });
        }

        // The key: a (possibly reserved) name, a literal, or `[computed]`.
        let (property, shorthand_name) = match self.peek_kind() {
            TokenKind::Identifier(name) => {
                let token = self.advance();
                (
                    Expression::Literal { span: token.span() },
                    Some(Identifier::new(name, token.span())),
                )
            }
            TokenKind::String | TokenKind::Number => {
                let token = self.advance();
                (Expression::Literal { span: token.span() }, None)
            }
            TokenKind::LeftBracket => {
                self.advance();
                let computed = self.parse_assignment_level();
                if !self.match_token(&TokenKind::RightBracket) {
                    self.error_at_current(
                        DiagnosticCode::UnmatchedIndexingBracket,
                        "unmatched indexing bracket",
                    );
                }
                (computed, None)
            }
            kind => {
                if let Some(text) = kind.keyword_text() {
                    let token = self.advance();
                    (
                        Expression::Literal { span: token.span() },
                        Some(Identifier::new(text, token.span())),
                    )
                } else {
                    self.error_at_current(
                        DiagnosticCode::UnexpectedToken,
                        format!("unexpected token in object literal: {kind}"),
                    );
                    return None;
                }
            }
        };

        match self.peek_kind() {
            TokenKind::Colon => {
                self.advance();
                let value = self.parse_assignment_level();
                Some(ObjectEntry {
                    property: Some(property),
                    value,
                })
            }
            // Shorthand with default: `{key = value}` desugars to an
            // assignment so destructuring defaults read back naturally.
            TokenKind::Equal if shorthand_name.is_some() => {
                let op = self.advance();
                let init = self.parse_assignment_level();
                let name = shorthand_name.expect("guarded by match arm");
                let span = name.span.merge(op.span()).merge(init.span());
                Some(ObjectEntry {
                    property: Some(property),
                    value: Expression::Assignment {
                        target: Box::new(Expression::Variable(name)),
                        value: Box::new(init),
                        span,
                    },
                })
            }
            _ => match shorthand_name {
                Some(name) => Some(ObjectEntry {
                    property: Some(property),
                    value: Expression::Variable(name),
                }),
                None => {
                    self.error_at_current(
                        DiagnosticCode::UnexpectedToken,
                        "expected ':' after object literal key",
                    );
                    Some(ObjectEntry {
                        property: Some(property),
                        value: Expression::Invalid {
                            span: Span::empty(self.peek().span().start()),
                        },
                    })
                }
            },
        }
    }
}
