// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for pipeline crash safety.
//!
//! Feeds arbitrary byte sequences through the full pipeline (edit, lex,
//! parse, scope analysis) and asserts it never panics. The pipeline must
//! handle all input gracefully, producing diagnostics rather than failing.
//!
//! Invalid UTF-8 bytes are converted via lossy conversion (U+FFFD
//! replacement) so the lexer still gets exercised with unusual character
//! sequences.

#![no_main]

use jetlint_core::Document;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    let mut document = Document::new();
    document.replace_text(0, 0, 0, 0, &source);

    // Success = no panic. Diagnostics are expected, not failures.
    let _diagnostics = document.lint();
    let _editor = document.editor_diagnostics();
});
