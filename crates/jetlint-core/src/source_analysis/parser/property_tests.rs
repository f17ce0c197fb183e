// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the parser.
//!
//! These verify parser invariants over generated inputs:
//!
//! 1. **Parser never panics** — arbitrary input always produces a tree
//! 2. **Spans are contained** — every node's span lies within the document,
//!    and children lie within their parents (placeholders may sit on the
//!    boundary)
//! 3. **Parsing is deterministic** — same input, same tree, same diagnostics
//! 4. **Parenthesization is shape-neutral** — `(e)` summarizes like `e`
//! 5. **Valid programs stay clean** — known-good fragments produce no
//!    diagnostics

use proptest::prelude::*;

use crate::ast::Expression;
use crate::diagnostic::DiagnosticSink;
use crate::source_analysis::{Parser, Span};

use super::expression_tests::summarize;

/// Known-valid expressions that must parse without diagnostics.
const VALID_EXPRESSIONS: &[&str] = &[
    "x",
    "42",
    "'str'",
    "x + y * z",
    "a ? b : c",
    "f(x, y)",
    "obj.prop.deeper",
    "xs[i + 1]",
    "x = y = z",
    "x += 1",
    "-x + +y",
    "typeof x === 'string'",
    "new Date(y, m, d)",
    "[1, 2, 3]",
    "{a: 1, b: 2}",
    "(a, b) => a + b",
    "async () => x",
    "function(){}",
    "`a${b}c${d}e`",
    "/re/gi.test(s)",
    "await promise",
    "...rest",
    "x++ + ++y",
    "a && b || c ?? d",
];

/// Statement programs that must lint without diagnostics.
const VALID_PROGRAMS: &[&str] = &[
    "let x = 1; x;",
    "const f = (a) => a; f(2);",
    "function g(n) { return n + 1; }\ng(1);",
    "var total = 0;\nfor (let i = 0; i < 10; i += 1) { total += i; }",
    "if (true) { let y = 2; y; } else {}",
    "try { throw 1; } catch (e) { e; }",
    "import { join } from 'path';\njoin('a', 'b');",
    "while (false) {}\ndo {} while (false);",
    "switch (1) { case 1: break; default: break; }",
];

fn valid_expression() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_EXPRESSIONS).prop_map(std::string::ToString::to_string)
}

fn valid_program() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_PROGRAMS).prop_map(std::string::ToString::to_string)
}

fn parse_expression_with_diagnostics(source: &str) -> (Expression, Vec<crate::Diagnostic>) {
    let mut sink = DiagnosticSink::new();
    let ast = Parser::new(source, &mut sink, &mut ()).parse_expression();
    (ast, sink.into_vec())
}

/// Asserts every node's span is inside `document` and inside its parent's.
/// Empty placeholder spans may sit on the parent's boundary.
fn check_span_containment(expression: &Expression, parent: Span, document_len: u32) {
    let span = expression.span();
    assert!(span.start() <= span.end(), "inverted span {span:?}");
    assert!(
        span.end() <= document_len,
        "span {span:?} escapes document of length {document_len}"
    );
    assert!(
        parent.contains(span) || span.is_empty(),
        "child span {span:?} escapes parent {parent:?}"
    );
    for child in children_of(expression) {
        check_span_containment(child, span, document_len);
    }
}

fn children_of(expression: &Expression) -> Vec<&Expression> {
    match expression {
        Expression::Invalid { .. }
        | Expression::Literal { .. }
        | Expression::Variable(_)
        | Expression::Function { .. }
        | Expression::NamedFunction { .. }
        | Expression::Super { .. }
        | Expression::Import { .. } => Vec::new(),
        Expression::Unary { operand, .. }
        | Expression::RwUnaryPrefix { operand, .. }
        | Expression::RwUnarySuffix { operand, .. }
        | Expression::Spread { operand, .. }
        | Expression::Await { operand, .. } => vec![operand],
        Expression::Binary { children, .. } => children.iter().collect(),
        Expression::Assignment { target, value, .. }
        | Expression::UpdatingAssignment { target, value, .. } => vec![target, value],
        Expression::Conditional {
            condition,
            consequent,
            alternate,
            ..
        } => vec![condition, consequent, alternate],
        Expression::Dot { object, .. } => vec![object],
        Expression::Index { object, index, .. } => vec![object, index],
        Expression::Call {
            callee, arguments, ..
        }
        | Expression::New {
            callee, arguments, ..
        } => std::iter::once(&**callee).chain(arguments).collect(),
        Expression::Array { elements, .. } => elements.iter().collect(),
        Expression::Object { entries, .. } => entries
            .iter()
            .flat_map(|entry| entry.property.iter().chain(std::iter::once(&entry.value)))
            .collect(),
        Expression::Template { substitutions, .. } => substitutions.iter().collect(),
        Expression::ArrowFunctionWithExpression {
            parameters, body, ..
        } => parameters.iter().chain(std::iter::once(&**body)).collect(),
        Expression::ArrowFunctionWithStatements { parameters, .. } => parameters.iter().collect(),
    }
}

/// Default is 512 cases; override via `PROPTEST_CASES` env var for nightly
/// runs.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: the full pipeline never panics on arbitrary input.
    #[test]
    fn pipeline_never_panics(input in "\\PC{0,400}") {
        let mut document = crate::Document::new();
        document.replace_text(0, 0, 0, 0, &input);
        let _diagnostics = document.lint();
    }

    /// Property 1b: expression parsing never panics on arbitrary input.
    #[test]
    fn parse_expression_never_panics(input in "\\PC{0,400}") {
        let _ = parse_expression_with_diagnostics(&input);
    }

    /// Property 2: spans stay within the document and nest with the tree.
    #[test]
    fn spans_are_contained(input in "\\PC{0,400}") {
        let (ast, _) = parse_expression_with_diagnostics(&input);
        let len = u32::try_from(input.len()).unwrap_or(u32::MAX);
        check_span_containment(&ast, Span::new(0, len), len);
    }

    /// Property 3: parsing is deterministic — same tree, same diagnostics
    /// at the same spans.
    #[test]
    fn parsing_is_deterministic(input in "\\PC{0,400}") {
        let (first_ast, first_diags) = parse_expression_with_diagnostics(&input);
        let (second_ast, second_diags) = parse_expression_with_diagnostics(&input);
        prop_assert_eq!(&first_ast, &second_ast);
        prop_assert_eq!(first_diags, second_diags);
    }

    /// Property 4: wrapping a valid expression in parentheses does not
    /// change its shape.
    #[test]
    fn parenthesization_preserves_shape(expression in valid_expression()) {
        // A spread cannot be parenthesized; skip that one sample.
        if expression.starts_with("...") {
            return Ok(());
        }
        let (bare, bare_diags) = parse_expression_with_diagnostics(&expression);
        let wrapped_source = format!("({expression})");
        let (wrapped, wrapped_diags) = parse_expression_with_diagnostics(&wrapped_source);
        prop_assert_eq!(summarize(&bare), summarize(&wrapped));
        prop_assert_eq!(bare_diags.len(), wrapped_diags.len());
    }

    /// Property 5a: known-valid expressions produce no diagnostics.
    #[test]
    fn valid_expressions_are_clean(expression in valid_expression()) {
        let (_, diagnostics) = parse_expression_with_diagnostics(&expression);
        prop_assert!(
            diagnostics.is_empty(),
            "{:?} produced {:?}",
            expression,
            diagnostics
        );
    }

    /// Property 5b: known-valid programs lint without diagnostics.
    #[test]
    fn valid_programs_are_clean(program in valid_program()) {
        let mut document = crate::Document::new();
        document.replace_text(0, 0, 0, 0, &program);
        let diagnostics = document.lint();
        prop_assert!(
            diagnostics.is_empty(),
            "{:?} produced {:?}",
            program,
            diagnostics
        );
    }

    /// Property 6: linting is idempotent — replacing a document's text with
    /// the same bytes reproduces the same diagnostics.
    #[test]
    fn identical_edit_preserves_diagnostics(input in "\\PC{0,200}") {
        let mut document = crate::Document::new();
        document.replace_text(0, 0, 0, 0, &input);
        let first: Vec<_> = document.lint().to_vec();
        document.replace_text(0, 0, u32::MAX, u32::MAX, &input);
        let second: Vec<_> = document.lint().to_vec();
        prop_assert_eq!(first, second);
    }
}
