// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Behavioral tests for the expression parser.
//!
//! `summarize` renders an AST as a compact string (`binary(var x, literal)`)
//! so shape assertions stay readable. It pattern-matches every
//! [`Expression`] variant on purpose: a new variant must decide its summary
//! here before these tests compile again.

use crate::ast::{Expression, FunctionAttributes};
use crate::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink};
use crate::source_analysis::{Span, TokenKind};

use super::Parser;

fn parse(source: &str) -> (Expression, Vec<Diagnostic>) {
    let mut sink = DiagnosticSink::new();
    let ast = Parser::new(source, &mut sink, &mut ()).parse_expression();
    (ast, sink.into_vec())
}

fn parse_ok(source: &str) -> Expression {
    let (ast, diagnostics) = parse(source);
    assert!(
        diagnostics.is_empty(),
        "expected no diagnostics for {source:?}, got: {diagnostics:?}"
    );
    ast
}

fn summary(source: &str) -> String {
    summarize(&parse_ok(source))
}

fn attributes_prefix(attributes: FunctionAttributes) -> &'static str {
    match attributes {
        FunctionAttributes::Normal => "",
        FunctionAttributes::Async => "async",
    }
}

fn summarize_all(expressions: &[Expression]) -> String {
    expressions
        .iter()
        .map(summarize)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(super) fn summarize(expression: &Expression) -> String {
    match expression {
        Expression::Invalid { .. } => "?".to_string(),
        Expression::Literal { .. } => "literal".to_string(),
        Expression::Variable(identifier) => format!("var {}", identifier.name),
        Expression::Unary { operand, .. } => format!("unary({})", summarize(operand)),
        Expression::RwUnaryPrefix { operand, .. } => format!("rwunary({})", summarize(operand)),
        Expression::RwUnarySuffix { operand, .. } => {
            format!("rwunarysuffix({})", summarize(operand))
        }
        Expression::Binary { children, .. } => format!("binary({})", summarize_all(children)),
        Expression::Assignment { target, value, .. } => {
            format!("assign({}, {})", summarize(target), summarize(value))
        }
        Expression::UpdatingAssignment { target, value, .. } => {
            format!("upassign({}, {})", summarize(target), summarize(value))
        }
        Expression::Conditional {
            condition,
            consequent,
            alternate,
            ..
        } => format!(
            "cond({}, {}, {})",
            summarize(condition),
            summarize(consequent),
            summarize(alternate)
        ),
        Expression::Dot {
            object, property, ..
        } => format!("dot({}, {})", summarize(object), property.name),
        Expression::Index { object, index, .. } => {
            format!("index({}, {})", summarize(object), summarize(index))
        }
        Expression::Call {
            callee, arguments, ..
        } => {
            let mut parts = vec![summarize(callee)];
            parts.extend(arguments.iter().map(|argument| summarize(argument)));
            format!("call({})", parts.join(", "))
        }
        Expression::New {
            callee, arguments, ..
        } => {
            let mut parts = vec![summarize(callee)];
            parts.extend(arguments.iter().map(|argument| summarize(argument)));
            format!("new({})", parts.join(", "))
        }
        Expression::Array { elements, .. } => format!("array({})", summarize_all(elements)),
        Expression::Object { entries, .. } => {
            let parts: Vec<String> = entries
                .iter()
                .flat_map(|entry| {
                    [
                        entry
                            .property
                            .as_ref()
                            .map_or_else(|| "(null)".to_string(), summarize),
                        summarize(&entry.value),
                    ]
                })
                .collect();
            format!("object({})", parts.join(", "))
        }
        Expression::Spread { operand, .. } => format!("spread({})", summarize(operand)),
        Expression::Template { substitutions, .. } => {
            format!("template({})", summarize_all(substitutions))
        }
        Expression::Await { operand, .. } => format!("await({})", summarize(operand)),
        Expression::Function { .. } => "function".to_string(),
        Expression::NamedFunction { name, .. } => format!("function {}", name.name),
        Expression::ArrowFunctionWithExpression {
            parameters,
            body,
            attributes,
            ..
        } => {
            let mut parts: Vec<String> = parameters.iter().map(summarize).collect();
            parts.push(summarize(body));
            format!(
                "{}arrowexpr({})",
                attributes_prefix(*attributes),
                parts.join(", ")
            )
        }
        Expression::ArrowFunctionWithStatements {
            parameters,
            attributes,
            ..
        } => format!(
            "{}arrowblock({})",
            attributes_prefix(*attributes),
            summarize_all(parameters)
        ),
        Expression::Super { .. } => "super".to_string(),
        Expression::Import { .. } => "import".to_string(),
    }
}

// ============================================================================
// Single tokens
// ============================================================================

#[test]
fn parse_single_token_expression() {
    let ast = parse_ok("x");
    assert_eq!(summarize(&ast), "var x");
    assert_eq!(ast.span(), Span::new(0, 1));

    for (source, end) in [
        ("42", 2),
        ("'hello'", 7),
        ("null", 4),
        ("true", 4),
        ("false", 5),
        ("this", 4),
        ("/regexp/", 8),
    ] {
        let ast = parse_ok(source);
        assert_eq!(summarize(&ast), "literal", "source: {source}");
        assert_eq!(ast.span(), Span::new(0, end), "source: {source}");
    }
}

// ============================================================================
// Math and logical operators
// ============================================================================

#[test]
fn parse_math_expression() {
    let ast = parse_ok("-x");
    assert_eq!(summarize(&ast), "unary(var x)");
    assert_eq!(ast.span(), Span::new(0, 2));

    assert_eq!(summary("+x"), "unary(var x)");

    let ast = parse_ok("x+y");
    assert_eq!(summarize(&ast), "binary(var x, var y)");
    assert_eq!(ast.span(), Span::new(0, 3));

    assert_eq!(summary("x+y-z"), "binary(var x, var y, var z)");
    assert_eq!(summary("2-4+1"), "binary(literal, literal, literal)");
    assert_eq!(summary("-x+y"), "binary(unary(var x), var y)");

    for source in [
        "2+2", "2-2", "2*2", "2/2", "2%2", "2**2", "2^2", "2&2", "2|2", "2<<2", "2>>2", "2>>>2",
    ] {
        assert_eq!(summary(source), "binary(literal, literal)", "source: {source}");
    }
}

#[test]
fn parse_broken_math_expression() {
    let (ast, diagnostics) = parse("2+");
    assert_eq!(summarize(&ast), "binary(literal, ?)");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::MissingOperandForOperator);
    assert_eq!(diagnostics[0].span, Span::new(1, 2));

    let (ast, diagnostics) = parse("^2");
    assert_eq!(summarize(&ast), "binary(?, literal)");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::MissingOperandForOperator);
    assert_eq!(diagnostics[0].span, Span::new(0, 1));

    let (ast, diagnostics) = parse("2 * * 2");
    assert_eq!(summarize(&ast), "binary(literal, ?, literal)");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::MissingOperandForOperator);
    assert_eq!(diagnostics[0].span, Span::new(2, 3));

    let (ast, diagnostics) = parse("2 & & & 2");
    assert_eq!(summarize(&ast), "binary(literal, ?, ?, literal)");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].code, DiagnosticCode::MissingOperandForOperator);
    assert_eq!(diagnostics[0].span, Span::new(2, 3));
    assert_eq!(diagnostics[1].code, DiagnosticCode::MissingOperandForOperator);
    assert_eq!(diagnostics[1].span, Span::new(4, 5));

    let (ast, diagnostics) = parse("(2*)");
    assert_eq!(summarize(&ast), "binary(literal, ?)");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::MissingOperandForOperator);
    assert_eq!(diagnostics[0].span, Span::new(2, 3));

    let (ast, diagnostics) = parse("2 * (3 + 4");
    assert_eq!(summarize(&ast), "binary(literal, binary(literal, literal))");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnmatchedParenthesis);
    assert_eq!(diagnostics[0].span, Span::new(4, 5));

    let (ast, diagnostics) = parse("2 * (3 + (4");
    assert_eq!(summarize(&ast), "binary(literal, binary(literal, literal))");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnmatchedParenthesis);
    assert_eq!(diagnostics[0].span, Span::new(9, 10));
    assert_eq!(diagnostics[1].code, DiagnosticCode::UnmatchedParenthesis);
    assert_eq!(diagnostics[1].span, Span::new(4, 5));
}

#[test]
fn parse_logical_expression() {
    for source in [
        "2==2", "2===2", "2!=2", "2!==2", "2>2", "2<2", "2>=2", "2<=2", "2&&2", "2||2", "2??2",
    ] {
        assert_eq!(summary(source), "binary(literal, literal)", "source: {source}");
    }

    assert_eq!(summary("!x"), "unary(var x)");
}

#[test]
fn parse_keyword_binary_operators() {
    assert_eq!(summary("prop in object"), "binary(var prop, var object)");
    assert_eq!(
        summary("object instanceof Class"),
        "binary(var object, var Class)"
    );
}

#[test]
fn parse_typeof_unary_operator() {
    assert_eq!(summary("typeof o"), "unary(var o)");
    assert_eq!(summary("typeof o === 'number'"), "binary(unary(var o), literal)");
}

#[test]
fn delete_unary_operator() {
    assert_eq!(summary("delete variable"), "unary(var variable)");
    assert_eq!(
        summary("delete variable.property"),
        "unary(dot(var variable, property))"
    );
}

#[test]
fn void_unary_operator() {
    assert_eq!(summary("void 0"), "unary(literal)");
}

#[test]
fn spread() {
    let ast = parse_ok("...args");
    assert_eq!(summarize(&ast), "spread(var args)");
    assert_eq!(ast.span(), Span::new(0, 7));
}

// ============================================================================
// Conditional
// ============================================================================

#[test]
fn conditional_expression() {
    let ast = parse_ok("x?y:z");
    assert_eq!(summarize(&ast), "cond(var x, var y, var z)");
    assert_eq!(ast.span(), Span::new(0, 5));

    assert_eq!(
        summary("x+x?y+y:z+z"),
        "cond(binary(var x, var x), binary(var y, var y), binary(var z, var z))"
    );

    assert_eq!(
        summary("a ? b : c ? d : e"),
        "cond(var a, var b, cond(var c, var d, var e))"
    );
}

// ============================================================================
// Calls and member access
// ============================================================================

#[test]
fn parse_function_call() {
    let ast = parse_ok("f()");
    assert_eq!(summarize(&ast), "call(var f)");
    assert_eq!(ast.span(), Span::new(0, 3));

    assert_eq!(summary("f(x)"), "call(var f, var x)");
    assert_eq!(summary("f(x,y)"), "call(var f, var x, var y)");
}

#[test]
fn parse_dot_expressions() {
    let ast = parse_ok("x.prop");
    assert_eq!(summarize(&ast), "dot(var x, prop)");
    assert_eq!(ast.span(), Span::new(0, 6));

    assert_eq!(summary("x.p1.p2"), "dot(dot(var x, p1), p2)");

    for keyword in ["catch", "class", "default", "get", "try"] {
        let source = format!("promise.{keyword}");
        let ast = parse_ok(&source);
        assert_eq!(summarize(&ast), format!("dot(var promise, {keyword})"));
    }
}

#[test]
fn parse_indexing_expression() {
    let ast = parse_ok("xs[i]");
    assert_eq!(summarize(&ast), "index(var xs, var i)");
    assert_eq!(ast.span(), Span::new(0, 5));
}

#[test]
fn parse_parenthesized_expression() {
    let ast = parse_ok("(x)");
    assert_eq!(summarize(&ast), "var x");
    assert_eq!(ast.span(), Span::new(1, 2));

    assert_eq!(summary("x+(y)"), "binary(var x, var y)");
    assert_eq!(summary("x+(y+z)"), "binary(var x, binary(var y, var z))");
    assert_eq!(summary("(x+y)+z"), "binary(binary(var x, var y), var z)");
    assert_eq!(
        summary("x+(y+z)+w"),
        "binary(var x, binary(var y, var z), var w)"
    );
}

#[test]
fn parse_await_expression() {
    let ast = parse_ok("await myPromise");
    assert_eq!(summarize(&ast), "await(var myPromise)");
    assert_eq!(ast.span(), Span::new(0, 15));
}

#[test]
fn parse_new_expression() {
    let ast = parse_ok("new Date");
    assert_eq!(summarize(&ast), "new(var Date)");
    assert_eq!(ast.span(), Span::new(0, 8));

    let ast = parse_ok("new Date()");
    assert_eq!(summarize(&ast), "new(var Date)");
    assert_eq!(ast.span(), Span::new(0, 10));

    assert_eq!(summary("new Date(y,m,d)"), "new(var Date, var y, var m, var d)");
    assert_eq!(summary("new new X()"), "new(new(var X))");
}

#[test]
fn super_expression() {
    assert_eq!(summary("super()"), "call(super)");
    assert_eq!(summary("super.method()"), "call(dot(super, method))");
}

#[test]
fn import_expression() {
    assert_eq!(summary("import(url)"), "call(import, var url)");
    assert_eq!(summary("import.meta"), "dot(import, meta)");
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn parse_assignment() {
    let ast = parse_ok("x=y");
    assert_eq!(summarize(&ast), "assign(var x, var y)");
    assert_eq!(ast.span(), Span::new(0, 3));

    assert_eq!(summary("x.p=z"), "assign(dot(var x, p), var z)");
    assert_eq!(summary("f().p=x"), "assign(dot(call(var f), p), var x)");
    assert_eq!(summary("x=y=z"), "assign(var x, assign(var y, var z))");
    assert_eq!(summary("x,y=z,w"), "binary(var x, assign(var y, var z), var w)");
}

#[test]
fn parse_updating_assignment() {
    for op in [
        "*=", "/=", "%=", "+=", "-=", "<<=", ">>=", ">>>=", "&=", "^=", "|=", "**=",
    ] {
        let source = format!("x {op} y");
        let ast = parse_ok(&source);
        assert_eq!(summarize(&ast), "upassign(var x, var y)", "op: {op}");
        assert_eq!(ast.span(), Span::new(0, source.len() as u32), "op: {op}");
    }
}

#[test]
fn parse_invalid_assignment() {
    let (ast, diagnostics) = parse("x+y=z");
    assert_eq!(summarize(&ast), "assign(binary(var x, var y), var z)");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].code,
        DiagnosticCode::InvalidExpressionLeftOfAssignment
    );
    assert_eq!(diagnostics[0].span, Span::new(0, 3));

    for source in ["f()=x", "-x=y", "42=y", "(x=y)=z"] {
        let (_, diagnostics) = parse(source);
        assert_eq!(diagnostics.len(), 1, "source: {source}");
        assert_eq!(
            diagnostics[0].code,
            DiagnosticCode::InvalidExpressionLeftOfAssignment,
            "source: {source}"
        );
    }
}

// ============================================================================
// Increment / decrement
// ============================================================================

#[test]
fn parse_prefix_plusplus_minusminus() {
    let ast = parse_ok("++x");
    assert_eq!(summarize(&ast), "rwunary(var x)");
    assert_eq!(ast.span(), Span::new(0, 3));

    let ast = parse_ok("--y");
    assert_eq!(summarize(&ast), "rwunary(var y)");
    assert_eq!(ast.span(), Span::new(0, 3));
}

#[test]
fn parse_suffix_plusplus_minusminus() {
    let ast = parse_ok("x++");
    assert_eq!(summarize(&ast), "rwunarysuffix(var x)");
    assert_eq!(ast.span(), Span::new(0, 3));
}

#[test]
fn suffix_plusplus_minusminus_disallows_line_break() {
    let mut sink = DiagnosticSink::new();
    let mut unit = ();
    let mut parser = Parser::new("x\n++\ny", &mut sink, &mut unit);

    let first = parser.parse_expression();
    assert_eq!(summarize(&first), "var x");

    // A semicolon should be inserted (ASI).
    assert!(
        matches!(parser.peek().kind(), TokenKind::Semicolon),
        "expected inserted semicolon, got {:?}",
        parser.peek().kind()
    );
    parser.advance();

    let second = parser.parse_expression();
    assert_eq!(summarize(&second), "rwunary(var y)");

    assert!(sink.is_empty(), "unexpected diagnostics: {:?}", sink.as_slice());
}

// ============================================================================
// Templates
// ============================================================================

#[test]
fn parse_template() {
    let ast = parse_ok("`hello`");
    assert_eq!(summarize(&ast), "literal");
    assert_eq!(ast.span(), Span::new(0, 7));

    let ast = parse_ok("`hello${world}`");
    assert_eq!(summarize(&ast), "template(var world)");
    assert_eq!(ast.span(), Span::new(0, 15));

    let ast = parse_ok("`${one}${two}${three}`");
    assert_eq!(summarize(&ast), "template(var one, var two, var three)");
    assert_eq!(ast.span(), Span::new(0, 22));
}

// ============================================================================
// Array and object literals
// ============================================================================

#[test]
fn array_literal() {
    let ast = parse_ok("[]");
    assert_eq!(summarize(&ast), "array()");
    assert_eq!(ast.span(), Span::new(0, 2));

    assert_eq!(summary("[x]"), "array(var x)");
    assert_eq!(summary("[x, y]"), "array(var x, var y)");
    assert_eq!(summary("[,,x,,y,,]"), "array(var x, var y)");
}

#[test]
fn object_literal() {
    let ast = parse_ok("{}");
    assert_eq!(summarize(&ast), "object()");
    assert_eq!(ast.span(), Span::new(0, 2));

    assert_eq!(summary("{key: value}"), "object(literal, var value)");
    assert_eq!(
        summary("{key1: value1, key2: value2}"),
        "object(literal, var value1, literal, var value2)"
    );
    assert_eq!(summary("{'key': value}"), "object(literal, var value)");
    assert_eq!(summary("{[key]: value}"), "object(var key, var value)");
    assert_eq!(
        summary("{key1: value1, thing2, key3: value3}"),
        "object(literal, var value1, literal, var thing2, literal, var value3)"
    );
    assert_eq!(
        summary("{key: variable = value}"),
        "object(literal, assign(var variable, var value))"
    );
    assert_eq!(
        summary("{key = value}"),
        "object(literal, assign(var key, var value))"
    );
}

#[test]
fn object_literal_shorthand_spans() {
    let ast = parse_ok("{thing}");
    let Expression::Object { entries, .. } = &ast else {
        panic!("expected object literal, got {ast:?}");
    };
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    let property = entry.property.as_ref().expect("shorthand has a property");
    assert_eq!(summarize(property), "literal");
    assert_eq!(property.span(), Span::new(1, 6));
    assert_eq!(summarize(&entry.value), "var thing");
    assert_eq!(entry.value.span(), Span::new(1, 6));
}

#[test]
fn object_literal_spread_entry() {
    let ast = parse_ok("{...other, k: v}");
    let Expression::Object { entries, .. } = &ast else {
        panic!("expected object literal, got {ast:?}");
    };
    assert_eq!(entries.len(), 2);
    assert!(entries[0].property.is_none());
    assert_eq!(summarize(&entries[0].value), "spread(var other)");
    assert_eq!(
        summarize(entries[1].property.as_ref().expect("keyed entry")),
        "literal"
    );
    assert_eq!(summarize(&entries[1].value), "var v");
}

#[test]
fn object_literal_reserved_word_keys() {
    assert_eq!(summary("{class: x}"), "object(literal, var x)");
    assert_eq!(summary("{default: x, in: y}"), "object(literal, var x, literal, var y)");
}

// ============================================================================
// Comma
// ============================================================================

#[test]
fn parse_comma_expression() {
    let ast = parse_ok("x,y,z");
    assert_eq!(summarize(&ast), "binary(var x, var y, var z)");
    assert_eq!(ast.span(), Span::new(0, 5));

    assert_eq!(
        summary("(x+(y,z)+w)"),
        "binary(var x, binary(var y, var z), var w)"
    );

    // The `+` run nests inside the comma node: same precedence flattens,
    // different precedences keep their structure.
    assert_eq!(
        summary("`${2+2, four}`"),
        "template(binary(binary(literal, literal), var four))"
    );
}

// ============================================================================
// Function expressions
// ============================================================================

#[test]
fn parse_function_expression() {
    let ast = parse_ok("function(){}");
    let Expression::Function { attributes, span } = ast else {
        panic!("expected function expression, got {ast:?}");
    };
    assert_eq!(attributes, FunctionAttributes::Normal);
    assert_eq!(span, Span::new(0, 12));

    assert_eq!(summary("function(x, y){}"), "function");
    assert_eq!(summary("function(){}()"), "call(function)");

    let ast = parse_ok("function f(){}");
    assert_eq!(summarize(&ast), "function f");
    let Expression::NamedFunction { attributes, .. } = ast else {
        panic!("expected named function");
    };
    assert_eq!(attributes, FunctionAttributes::Normal);
}

#[test]
fn async_function_expression() {
    let ast = parse_ok("async function(){}");
    let Expression::Function { attributes, span } = ast else {
        panic!("expected function expression, got {ast:?}");
    };
    assert_eq!(attributes, FunctionAttributes::Async);
    assert_eq!(span, Span::new(0, 18));

    let ast = parse_ok("async function f(){}");
    let Expression::NamedFunction {
        attributes, span, ..
    } = ast
    else {
        panic!("expected named function expression");
    };
    assert_eq!(attributes, FunctionAttributes::Async);
    assert_eq!(span, Span::new(0, 20));
}

// ============================================================================
// Arrow functions
// ============================================================================

#[test]
fn arrow_function_with_expression() {
    let ast = parse_ok("() => a");
    assert_eq!(summarize(&ast), "arrowexpr(var a)");
    assert_eq!(ast.span(), Span::new(0, 7));

    let ast = parse_ok("a => b");
    assert_eq!(summarize(&ast), "arrowexpr(var a, var b)");
    assert_eq!(ast.span(), Span::new(0, 6));

    let ast = parse_ok("(a) => b");
    assert_eq!(summarize(&ast), "arrowexpr(var a, var b)");
    assert_eq!(ast.span(), Span::new(0, 8));

    assert_eq!(summary("(a, b) => c"), "arrowexpr(var a, var b, var c)");

    assert_eq!(summary("() => a, b"), "binary(arrowexpr(var a), var b)");
    assert_eq!(summary("a => b, c"), "binary(arrowexpr(var a, var b), var c)");
}

#[test]
fn arrow_function_with_statements() {
    let ast = parse_ok("() => { a; }");
    let Expression::ArrowFunctionWithStatements {
        parameters,
        attributes,
        span,
    } = &ast
    else {
        panic!("expected arrow with statements, got {ast:?}");
    };
    assert!(parameters.is_empty());
    assert_eq!(*attributes, FunctionAttributes::Normal);
    assert_eq!(*span, Span::new(0, 12));

    let ast = parse_ok("a => { b; }");
    assert_eq!(summarize(&ast), "arrowblock(var a)");
    assert_eq!(ast.span(), Span::new(0, 11));
}

#[test]
fn arrow_function_with_destructuring_parameters() {
    assert_eq!(
        summary("({a, b}) => c"),
        "arrowexpr(object(literal, var a, literal, var b), var c)"
    );
    assert_eq!(summary("([a, b]) => c"), "arrowexpr(array(var a, var b), var c)");
}

#[test]
fn arrow_function_with_default_and_rest_parameters() {
    assert_eq!(
        summary("(a = 1, ...rest) => a"),
        "arrowexpr(assign(var a, literal), spread(var rest), var a)"
    );
}

#[test]
fn async_arrow_function() {
    let ast = parse_ok("async () => { a; }");
    let Expression::ArrowFunctionWithStatements {
        parameters,
        attributes,
        span,
    } = &ast
    else {
        panic!("expected arrow with statements, got {ast:?}");
    };
    assert!(parameters.is_empty());
    assert_eq!(*attributes, FunctionAttributes::Async);
    assert_eq!(*span, Span::new(0, 18));

    assert_eq!(summary("async x => { y; }"), "asyncarrowblock(var x)");
    assert_eq!(
        summary("async (x, y, z) => { w; }"),
        "asyncarrowblock(var x, var y, var z)"
    );

    let ast = parse_ok("async () => a");
    assert_eq!(summarize(&ast), "asyncarrowexpr(var a)");
    assert_eq!(ast.span(), Span::new(0, 13));

    assert_eq!(summary("async x => y"), "asyncarrowexpr(var x, var y)");
    assert_eq!(
        summary("async (x, y, z) => w"),
        "asyncarrowexpr(var x, var y, var z, var w)"
    );
}

#[test]
fn async_without_arrow_is_a_plain_call() {
    assert_eq!(summary("async(x)"), "call(var async, var x)");
    assert_eq!(summary("async()"), "call(var async)");
}

// ============================================================================
// Mixed expressions
// ============================================================================

#[test]
fn parse_mixed_expression() {
    assert_eq!(summary("a+f()"), "binary(var a, call(var f))");
    assert_eq!(
        summary("a+f(x+y,-z-w)+b"),
        "binary(var a, call(var f, binary(var x, var y), binary(unary(var z), var w)), var b)"
    );
    assert_eq!(summary("(x+y).z"), "dot(binary(var x, var y), z)");
    assert_eq!(
        summary("/hello/.test(string)"),
        "call(dot(literal, test), var string)"
    );
    assert_eq!(
        summary("!/hello/.test(string)"),
        "unary(call(dot(literal, test), var string))"
    );
    assert_eq!(
        summary("{a: new A(), b: new B()}"),
        "object(literal, new(var A), literal, new(var B))"
    );
}

// ============================================================================
// Recovery details
// ============================================================================

#[test]
fn missing_operand_placeholder_is_empty_and_placed() {
    let (ast, _) = parse("2+");
    let Expression::Binary { children, .. } = &ast else {
        panic!("expected binary, got {ast:?}");
    };
    assert_eq!(children[1].span(), Span::new(2, 2));

    let (ast, _) = parse("^2");
    let Expression::Binary { children, .. } = &ast else {
        panic!("expected binary, got {ast:?}");
    };
    assert_eq!(children[0].span(), Span::new(0, 0));
}

#[test]
fn empty_parentheses_without_arrow() {
    let (ast, diagnostics) = parse("()");
    assert_eq!(summarize(&ast), "?");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].code,
        DiagnosticCode::MissingExpressionBetweenParentheses
    );
}

#[test]
fn unmatched_call_parenthesis() {
    let (ast, diagnostics) = parse("f(x");
    assert_eq!(summarize(&ast), "call(var f, var x)");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnmatchedParenthesis);
    assert_eq!(diagnostics[0].span, Span::new(1, 2));
}

#[test]
fn missing_property_name() {
    let (ast, diagnostics) = parse("obj.");
    assert_eq!(summarize(&ast), "dot(var obj, )");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::MissingPropertyName);
}

#[test]
fn deeply_nested_parentheses_hit_the_depth_limit() {
    let source = "(".repeat(500) + "x" + &")".repeat(500);
    let (_, diagnostics) = parse(&source);
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::DepthLimitExceeded),
        "expected a depth limit diagnostic"
    );
}
