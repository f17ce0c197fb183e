// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The document model: editable text plus its current diagnostics.
//!
//! A [`Document`] holds the source as a sequence of lines and accepts the
//! kind of range edit editors produce: replace the half-open range
//! `[(start_line, start_character), (end_line, end_character))` with new
//! text. **Character offsets at this boundary are UTF-16 code units**, the
//! convention editor protocols use; internally everything is UTF-8 bytes
//! and the document converts at the edge. Out-of-range positions are
//! clamped, mirroring how editors treat ranges touching a document's end.
//!
//! [`Document::lint`] re-runs the whole pipeline (lex, parse, scope
//! analysis) over the current text. There is no incremental re-parse: the
//! previous run's tree and diagnostics are dropped wholesale and rebuilt,
//! which keeps every run deterministic in the document content alone.
//!
//! A document is single-threaded; lint N documents in parallel by creating
//! N documents.

use crate::analyse::Linter;
use crate::diagnostic::{Diagnostic, DiagnosticSink, Severity};
use crate::source_analysis::Parser;

/// Severity in the editor's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EditorSeverity {
    /// A likely bug.
    Error = 1,
    /// A suspicious construct.
    Warning = 2,
}

/// A diagnostic resolved to editor coordinates: 0-based lines, UTF-16
/// code-unit characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDiagnostic {
    /// Human-readable message.
    pub message: String,
    /// Stable `E####` code.
    pub code: &'static str,
    /// Severity in editor numbering (error=1, warning=2).
    pub severity: EditorSeverity,
    /// Line of the first character (0-based).
    pub start_line: u32,
    /// UTF-16 column of the first character.
    pub start_character: u32,
    /// Line one past the last character.
    pub end_line: u32,
    /// UTF-16 column one past the last character.
    pub end_character: u32,
}

/// An editable JavaScript document with lint results.
///
/// # Examples
///
/// ```
/// use jetlint_core::Document;
///
/// let mut document = Document::new();
/// document.replace_text(0, 0, 0, 0, "let x;");
/// assert!(document.lint().is_empty());
///
/// // Prepend a second declaration of `x`.
/// document.replace_text(0, 0, 0, 0, "let x;");
/// assert_eq!(document.lint().len(), 1);
/// ```
#[derive(Debug)]
pub struct Document {
    /// Current content, one entry per line, without terminators.
    lines: Vec<String>,
    /// Diagnostics from the most recent [`Document::lint`].
    diagnostics: Vec<Diagnostic>,
    /// The exact text the current diagnostics refer to.
    linted_text: String,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            diagnostics: Vec::new(),
            linted_text: String::new(),
        }
    }

    /// Returns the current document text, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replaces the half-open range `[(start_line, start_character),
    /// (end_line, end_character))` with `new_text`.
    ///
    /// Character offsets count UTF-16 code units. Positions beyond the
    /// document clamp to its end; an offset landing inside a surrogate pair
    /// clamps to the following character boundary. `new_text` may contain
    /// any mix of `\r\n`, `\n`, and `\r` line breaks.
    pub fn replace_text(
        &mut self,
        start_line: u32,
        start_character: u32,
        end_line: u32,
        end_character: u32,
        new_text: &str,
    ) {
        let start = self.clamp_position(start_line, start_character);
        let end = self.clamp_position(end_line, end_character);
        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        let mut inserted = split_lines(new_text);
        let suffix = self.lines[end.0][end.1..].to_string();
        let prefix = &self.lines[start.0][..start.1];
        let first = format!("{prefix}{}", inserted[0]);
        inserted[0] = first;
        inserted
            .last_mut()
            .expect("split_lines returns at least one line")
            .push_str(&suffix);
        self.lines.splice(start.0..=end.0, inserted);
    }

    /// Re-runs the full pipeline over the current text and returns the
    /// diagnostics, parser findings first, scope findings appended in
    /// source order. The slice stays valid until the next edit or lint.
    pub fn lint(&mut self) -> &[Diagnostic] {
        let text = self.lines.join("\n");
        let mut sink = DiagnosticSink::new();
        let mut linter = Linter::new();
        {
            let mut parser = Parser::new(&text, &mut sink, &mut linter);
            parser.parse_module();
        }
        for diagnostic in linter.finish() {
            sink.push(diagnostic);
        }
        self.diagnostics = sink.into_vec();
        self.linted_text = text;
        &self.diagnostics
    }

    /// Returns the diagnostics of the most recent [`Document::lint`].
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Resolves the current diagnostics to editor coordinates (0-based
    /// lines, UTF-16 characters).
    #[must_use]
    pub fn editor_diagnostics(&self) -> Vec<EditorDiagnostic> {
        let lines: Vec<&str> = self.linted_text.split('\n').collect();
        let mut starts = Vec::with_capacity(lines.len());
        let mut offset = 0u32;
        for line in &lines {
            starts.push(offset);
            offset = offset
                .saturating_add(u32::try_from(line.len()).unwrap_or(u32::MAX))
                .saturating_add(1);
        }

        let position = |offset: u32| -> (u32, u32) {
            let line = starts.partition_point(|&start| start <= offset) - 1;
            let byte_column = (offset - starts[line]).min(
                u32::try_from(lines[line].len()).unwrap_or(u32::MAX),
            );
            (
                u32::try_from(line).unwrap_or(u32::MAX),
                utf16_column(lines[line], byte_column),
            )
        };

        self.diagnostics
            .iter()
            .map(|diagnostic| {
                let (start_line, start_character) = position(diagnostic.span.start());
                let (end_line, end_character) = position(diagnostic.span.end());
                EditorDiagnostic {
                    message: diagnostic.message.to_string(),
                    code: diagnostic.code.as_str(),
                    severity: match diagnostic.severity {
                        Severity::Error => EditorSeverity::Error,
                        Severity::Warning => EditorSeverity::Warning,
                    },
                    start_line,
                    start_character,
                    end_line,
                    end_character,
                }
            })
            .collect()
    }

    /// Clamps an editor position to (line index, byte offset in line).
    fn clamp_position(&self, line: u32, character: u32) -> (usize, usize) {
        let line = line as usize;
        if line >= self.lines.len() {
            let last = self.lines.len() - 1;
            return (last, self.lines[last].len());
        }
        (line, utf16_to_byte(&self.lines[line], character))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits text into lines at `\r\n`, `\n`, or `\r`. Always returns at least
/// one (possibly empty) line.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = vec![String::new()];
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(String::new());
            }
            '\n' => lines.push(String::new()),
            _ => lines
                .last_mut()
                .expect("lines starts non-empty")
                .push(c),
        }
    }
    lines
}

/// Converts a UTF-16 code-unit offset into a byte offset in `line`,
/// clamping to the line's end and to character boundaries.
fn utf16_to_byte(line: &str, utf16_offset: u32) -> usize {
    let mut units = 0u32;
    for (index, c) in line.char_indices() {
        if units >= utf16_offset {
            return index;
        }
        units += u32::try_from(c.len_utf16()).unwrap_or(u32::MAX);
    }
    line.len()
}

/// Converts a byte offset in `line` into a UTF-16 code-unit column.
fn utf16_column(line: &str, byte_offset: u32) -> u32 {
    let mut units = 0u32;
    for (index, c) in line.char_indices() {
        if index >= byte_offset as usize {
            break;
        }
        units += u32::try_from(c.len_utf16()).unwrap_or(u32::MAX);
    }
    units
}
