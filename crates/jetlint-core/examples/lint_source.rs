// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Example demonstrating the document linting API.
//!
//! This example creates a document, applies a few edits the way an editor
//! would, and prints the resulting diagnostics.

use jetlint_core::{Document, EditorSeverity};

fn print_diagnostics(document: &Document) {
    let diagnostics = document.editor_diagnostics();
    if diagnostics.is_empty() {
        println!("   Diagnostics: None ✓");
        return;
    }
    println!("   Diagnostics: {} finding(s)", diagnostics.len());
    for diagnostic in &diagnostics {
        let severity = match diagnostic.severity {
            EditorSeverity::Error => "error",
            EditorSeverity::Warning => "warning",
        };
        println!(
            "     - {}:{} {} [{}] {}",
            diagnostic.start_line,
            diagnostic.start_character,
            severity,
            diagnostic.code,
            diagnostic.message
        );
    }
}

fn main() {
    println!("jetlint Document Example\n");
    println!("========================\n");

    let mut document = Document::new();

    // Example 1: lint valid code
    println!("1. Valid Code");
    println!("   Source: let x = 42; x + 1;");
    document.replace_text(0, 0, 0, 0, "let x = 42; x + 1;");
    document.lint();
    print_diagnostics(&document);
    println!();

    // Example 2: a redeclaration shows up after an edit
    println!("2. Redeclaration After Edit");
    println!("   Prepending: let x;");
    document.replace_text(0, 0, 0, 0, "let x;");
    document.lint();
    print_diagnostics(&document);
    println!();

    // Example 3: syntax errors and scope warnings together
    println!("3. Broken Code");
    println!("   Source: 2 * (3 + (4\\nundeclaredVariable;");
    document.replace_text(0, 0, u32::MAX, 0, "2 * (3 + (4\nundeclaredVariable;");
    document.lint();
    print_diagnostics(&document);
    println!();

    println!("Document Example Complete!");
}
