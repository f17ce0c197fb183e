// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for lexer crash safety and span sanity.
//!
//! The lexer must never panic, and every token span must stay inside the
//! input and keep source order.

#![no_main]

use jetlint_core::source_analysis::lex_with_diagnostics;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    let (tokens, _diagnostics) = lex_with_diagnostics(&source);

    let mut previous_end = 0u32;
    for token in &tokens {
        let span = token.span();
        assert!(span.start() <= span.end());
        assert!(span.end() as usize <= source.len());
        assert!(span.start() >= previous_end, "tokens out of order");
        previous_end = span.end();
    }
});
