// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for JavaScript source code.
//!
//! The lexer is hand-written, single-pass, and streaming: the parser drives
//! it through [`Lexer::peek`] and [`Lexer::skip`]. JavaScript cannot be
//! tokenized independently of the grammar (`/` is a regular expression in
//! operand position and a division elsewhere, and template literals re-enter
//! string mode after each `${…}` substitution), so tokens are formed lazily,
//! one ahead, under whatever context the parser has established.
//!
//! # Design Principles
//!
//! - **Error recovery**: malformed input yields a diagnostic in the
//!   [`DiagnosticSink`] plus a synthetic token of the best-fitting kind;
//!   lexing always continues.
//! - **Precise spans**: every token carries its exact byte range.
//! - **ASI support**: each token records whether a line terminator preceded
//!   it; the parser consults this for semicolon insertion decisions.
//!
//! # The `/` ambiguity
//!
//! After most tokens the next `/` is unambiguous from the previous token's
//! kind alone ([`TokenKind::regexp_allowed_after`]), and [`Lexer::skip`]
//! updates the flag automatically. The one exception is postfix `++`/`--`
//! (where `/` must be division, unlike prefix `++`), which only the parser
//! can recognize; it overrides with [`Lexer::set_regexp_allowed`] before the
//! next token is formed. The lexer never scans past a `/` speculatively.

use crate::diagnostic::{Diagnostic, DiagnosticSink};

use super::error::{LexError, LexErrorKind};
use super::{Span, Token, TokenKind};

/// Records a lexical error as a sink diagnostic; lexing continues.
fn report(sink: &mut DiagnosticSink, kind: LexErrorKind, span: Span) {
    sink.push(LexError::new(kind, span).to_diagnostic());
}

/// A streaming lexer over a UTF-8 source buffer.
///
/// # Examples
///
/// ```
/// use jetlint_core::source_analysis::{lex, TokenKind};
///
/// let tokens = lex("x + 1");
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(*tokens[1].kind(), TokenKind::Plus);
/// ```
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    /// Byte position of the next unexamined character.
    pos: usize,
    /// The lazily formed current token.
    current: Option<Token>,
    /// One-token lookahead buffer for [`Lexer::peek2`].
    next: Option<Token>,
    /// Whether a line terminator was seen since the last token.
    newline_pending: bool,
    /// Whether a `/` at the current position starts a regular expression.
    regexp_allowed: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer at the start of `source`. A regular expression is
    /// legal in the initial position.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            current: None,
            next: None,
            newline_pending: false,
            regexp_allowed: true,
        }
    }

    /// Returns the current token, forming it on first call.
    pub fn peek(&mut self, sink: &mut DiagnosticSink) -> &Token {
        if self.current.is_none() {
            let token = self.lex_token(sink);
            self.current = Some(token);
        }
        self.current.as_ref().expect("current token was just formed")
    }

    /// Returns the token after the current one.
    ///
    /// The second token is formed under the regex/division inference the
    /// current token's kind implies; parser overrides do not reach it. Used
    /// for the few two-token grammar decisions (`async function`,
    /// `async x =>`, `import(` versus an import declaration).
    pub fn peek2(&mut self, sink: &mut DiagnosticSink) -> &Token {
        if self.current.is_none() {
            let token = self.lex_token(sink);
            self.current = Some(token);
        }
        if self.next.is_none() {
            let saved = self.regexp_allowed;
            self.regexp_allowed = self
                .current
                .as_ref()
                .expect("current token was just formed")
                .kind()
                .regexp_allowed_after();
            let token = self.lex_token(sink);
            self.next = Some(token);
            self.regexp_allowed = saved;
        }
        self.next.as_ref().expect("next token was just formed")
    }

    /// Consumes and returns the current token.
    ///
    /// Updates the regex/division flag from the consumed token's kind; the
    /// parser may override before the next [`peek`](Self::peek).
    pub fn skip(&mut self, sink: &mut DiagnosticSink) -> Token {
        if self.current.is_none() {
            let token = self.lex_token(sink);
            self.current = Some(token);
        }
        let token = self.current.take().expect("current token was just formed");
        self.current = self.next.take();
        self.regexp_allowed = token.kind().regexp_allowed_after();
        token
    }

    /// Overrides the regex/division decision for the next token.
    ///
    /// If that token was already formed under the other assumption, it is
    /// pushed back and re-lexed.
    pub fn set_regexp_allowed(&mut self, allowed: bool) {
        if let Some(token) = self.current.take() {
            self.next = None;
            self.pos = token.span().start() as usize;
            self.newline_pending = token.has_newline_before();
        }
        self.regexp_allowed = allowed;
    }

    /// Replaces the current token with a synthetic semicolon, pushing the
    /// real token back for re-lexing. Implements the parser's Automatic
    /// Semicolon Insertion decisions.
    pub fn insert_semicolon(&mut self) {
        let token = self
            .current
            .take()
            .expect("insert_semicolon requires a formed token");
        self.next = None;
        self.pos = token.span().start() as usize;
        self.newline_pending = token.has_newline_before();
        self.current = Some(Token::new(
            TokenKind::Semicolon,
            Span::empty(token.span().start()),
            token.has_newline_before(),
        ));
    }

    /// Re-enters template mode after a `${…}` substitution.
    ///
    /// The current token must be the `}` that closed the substitution. It is
    /// re-lexed as the start of a template continuation, producing
    /// [`TokenKind::TemplateMiddle`] or [`TokenKind::TemplateTail`].
    /// `template_start` is the offset of the template's opening backtick,
    /// used to span an unclosed-template diagnostic.
    pub fn skip_in_template(&mut self, sink: &mut DiagnosticSink, template_start: u32) {
        if self.current.is_none() {
            let token = self.lex_token(sink);
            self.current = Some(token);
        }
        let brace = self.current.take().expect("current token was just formed");
        self.next = None;
        debug_assert!(
            matches!(brace.kind(), TokenKind::RightBrace),
            "skip_in_template called on {:?}",
            brace.kind()
        );
        self.pos = brace.span().start() as usize;
        let start = self.position();
        self.advance(); // the `}`
        let kind = self.lex_template_continuation(sink, template_start);
        let token = Token::new(kind, self.span_from(start), false);
        self.current = Some(token);
    }

    // ========================================================================
    // Character scanning
    // ========================================================================

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Consumes the next character if it equals `expected`.
    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn position(&self) -> u32 {
        self.pos as u32
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.position())
    }

    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    /// Skips whitespace and comments, recording line terminators for ASI.
    fn skip_trivia(&mut self, sink: &mut DiagnosticSink) {
        loop {
            match self.peek_char() {
                Some(c) if super::is_line_terminator(c) => {
                    self.advance();
                    self.newline_pending = true;
                }
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_char_n(1) == Some('/') => {
                    self.advance_while(|c| !super::is_line_terminator(c));
                }
                Some('/') if self.peek_char_n(1) == Some('*') => {
                    self.skip_block_comment(sink);
                }
                _ => break,
            }
        }
    }

    fn skip_block_comment(&mut self, sink: &mut DiagnosticSink) {
        let start = self.position();
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.peek_char() {
                None => {
                    report(sink, LexErrorKind::UnclosedBlockComment, self.span_from(start));
                    break;
                }
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(c) => {
                    if super::is_line_terminator(c) {
                        self.newline_pending = true;
                    }
                    self.advance();
                }
            }
        }
    }

    // ========================================================================
    // Token formation
    // ========================================================================

    fn lex_token(&mut self, sink: &mut DiagnosticSink) -> Token {
        let mut newline_before = false;
        let (start, kind) = loop {
            self.skip_trivia(sink);
            newline_before |= std::mem::take(&mut self.newline_pending);
            let start = self.position();
            match self.peek_char() {
                None => break (start, TokenKind::EndOfFile),
                Some(c) if is_token_start(c) => {
                    break (start, self.lex_token_kind(c, start, sink));
                }
                Some(c) => {
                    self.advance();
                    report(sink, LexErrorKind::UnexpectedCharacter(c), self.span_from(start));
                }
            }
        };
        Token::new(kind, self.span_from(start), newline_before)
    }

    #[expect(
        clippy::too_many_lines,
        reason = "one arm per punctuator family; splitting obscures the dispatch"
    )]
    fn lex_token_kind(&mut self, c: char, start: u32, sink: &mut DiagnosticSink) -> TokenKind {
        match c {
            c if is_identifier_start(c) => self.lex_identifier_or_keyword(start),
            '0'..='9' => self.lex_number(start, sink),
            '\'' | '"' => self.lex_string(start, sink),
            '`' => self.lex_template(start, sink),

            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            '[' => {
                self.advance();
                TokenKind::LeftBracket
            }
            ']' => {
                self.advance();
                TokenKind::RightBracket
            }
            '{' => {
                self.advance();
                TokenKind::LeftBrace
            }
            '}' => {
                self.advance();
                TokenKind::RightBrace
            }
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            ':' => {
                self.advance();
                TokenKind::Colon
            }
            '~' => {
                self.advance();
                TokenKind::Tilde
            }

            '.' => {
                if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) {
                    return self.lex_number(start, sink);
                }
                self.advance();
                if self.peek_char() == Some('.') && self.peek_char_n(1) == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::DotDotDot
                } else {
                    TokenKind::Dot
                }
            }

            '+' => {
                self.advance();
                if self.advance_if('+') {
                    TokenKind::PlusPlus
                } else if self.advance_if('=') {
                    TokenKind::PlusEqual
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                self.advance();
                if self.advance_if('-') {
                    TokenKind::MinusMinus
                } else if self.advance_if('=') {
                    TokenKind::MinusEqual
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                self.advance();
                if self.advance_if('*') {
                    if self.advance_if('=') {
                        TokenKind::StarStarEqual
                    } else {
                        TokenKind::StarStar
                    }
                } else if self.advance_if('=') {
                    TokenKind::StarEqual
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.regexp_allowed {
                    return self.lex_regexp(start, sink);
                }
                self.advance();
                if self.advance_if('=') {
                    TokenKind::SlashEqual
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                self.advance();
                if self.advance_if('=') {
                    TokenKind::PercentEqual
                } else {
                    TokenKind::Percent
                }
            }
            '&' => {
                self.advance();
                if self.advance_if('&') {
                    TokenKind::AmpersandAmpersand
                } else if self.advance_if('=') {
                    TokenKind::AmpersandEqual
                } else {
                    TokenKind::Ampersand
                }
            }
            '|' => {
                self.advance();
                if self.advance_if('|') {
                    TokenKind::PipePipe
                } else if self.advance_if('=') {
                    TokenKind::PipeEqual
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                self.advance();
                if self.advance_if('=') {
                    TokenKind::CircumflexEqual
                } else {
                    TokenKind::Circumflex
                }
            }
            '!' => {
                self.advance();
                if self.advance_if('=') {
                    if self.advance_if('=') {
                        TokenKind::BangEqualEqual
                    } else {
                        TokenKind::BangEqual
                    }
                } else {
                    TokenKind::Bang
                }
            }
            '=' => {
                self.advance();
                if self.advance_if('=') {
                    if self.advance_if('=') {
                        TokenKind::EqualEqualEqual
                    } else {
                        TokenKind::EqualEqual
                    }
                } else if self.advance_if('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Equal
                }
            }
            '<' => {
                self.advance();
                if self.advance_if('<') {
                    if self.advance_if('=') {
                        TokenKind::LessLessEqual
                    } else {
                        TokenKind::LessLess
                    }
                } else if self.advance_if('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                self.advance();
                if self.advance_if('>') {
                    if self.advance_if('>') {
                        if self.advance_if('=') {
                            TokenKind::GreaterGreaterGreaterEqual
                        } else {
                            TokenKind::GreaterGreaterGreater
                        }
                    } else if self.advance_if('=') {
                        TokenKind::GreaterGreaterEqual
                    } else {
                        TokenKind::GreaterGreater
                    }
                } else if self.advance_if('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '?' => {
                self.advance();
                if self.advance_if('?') {
                    TokenKind::QuestionQuestion
                } else {
                    TokenKind::Question
                }
            }

            _ => unreachable!("is_token_start admitted a character with no dispatch arm"),
        }
    }

    fn lex_identifier_or_keyword(&mut self, start: u32) -> TokenKind {
        self.advance();
        self.advance_while(is_identifier_part);
        let text = self.text_for(self.span_from(start));
        TokenKind::keyword_from_str(text)
            .unwrap_or_else(|| TokenKind::Identifier(text.into()))
    }

    /// Lexes a numeric literal: decimal, hex (`0x`), octal (`0o`), binary
    /// (`0b`), legacy octal (`0` + digits), floats, exponents, and a
    /// trailing `n` for BigInt.
    fn lex_number(&mut self, start: u32, sink: &mut DiagnosticSink) -> TokenKind {
        if self.peek_char() == Some('0')
            && matches!(
                self.peek_char_n(1),
                Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')
            )
        {
            self.advance(); // 0
            let radix_char = self.advance().expect("radix prefix was peeked");
            let is_digit: fn(char) -> bool = match radix_char {
                'x' | 'X' => |c| c.is_ascii_hexdigit(),
                'o' | 'O' => |c| matches!(c, '0'..='7'),
                _ => |c| matches!(c, '0' | '1'),
            };
            let digits_start = self.position();
            self.advance_while(is_digit);
            if self.position() == digits_start {
                report(sink, LexErrorKind::InvalidNumberLiteral, self.span_from(start));
            }
            self.advance_if('n');
            return TokenKind::Number;
        }

        // Integer part (also covers legacy octal: consumed as plain digits).
        self.advance_while(|c| c.is_ascii_digit());

        let mut is_integer = true;
        if self.peek_char() == Some('.') {
            is_integer = false;
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_integer = false;
            self.advance();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            let exp_start = self.position();
            self.advance_while(|c| c.is_ascii_digit());
            if self.position() == exp_start {
                report(sink, LexErrorKind::InvalidNumberLiteral, self.span_from(start));
            }
        }

        if self.advance_if('n') && !is_integer {
            // BigInt suffix is only valid on integer literals.
            report(sink, LexErrorKind::InvalidNumberLiteral, self.span_from(start));
        }

        TokenKind::Number
    }

    /// Lexes a `'…'` or `"…"` string. An unterminated string is diagnosed
    /// and ends at the line terminator (which is not consumed).
    fn lex_string(&mut self, start: u32, sink: &mut DiagnosticSink) -> TokenKind {
        let quote = self.advance().expect("quote was peeked");
        loop {
            match self.peek_char() {
                None => {
                    report(sink, LexErrorKind::UnclosedStringLiteral, self.span_from(start));
                    break;
                }
                Some(c) if super::is_line_terminator(c) => {
                    report(sink, LexErrorKind::UnclosedStringLiteral, self.span_from(start));
                    break;
                }
                Some('\\') => {
                    self.advance();
                    // An escaped line terminator is a legal continuation.
                    self.advance();
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        TokenKind::String
    }

    /// Lexes from an opening backtick: either a complete template or a
    /// template head ending in `${`.
    fn lex_template(&mut self, start: u32, sink: &mut DiagnosticSink) -> TokenKind {
        self.advance(); // `
        match self.scan_template_body(sink, start) {
            TemplateEnd::Backtick => TokenKind::CompleteTemplate,
            TemplateEnd::Substitution => TokenKind::TemplateHead,
            TemplateEnd::Eof => TokenKind::CompleteTemplate,
        }
    }

    fn lex_template_continuation(
        &mut self,
        sink: &mut DiagnosticSink,
        template_start: u32,
    ) -> TokenKind {
        match self.scan_template_body(sink, template_start) {
            TemplateEnd::Backtick => TokenKind::TemplateTail,
            TemplateEnd::Substitution => TokenKind::TemplateMiddle,
            TemplateEnd::Eof => TokenKind::TemplateTail,
        }
    }

    /// Scans template text until a closing backtick, a `${`, or end of file.
    fn scan_template_body(
        &mut self,
        sink: &mut DiagnosticSink,
        template_start: u32,
    ) -> TemplateEnd {
        loop {
            match self.peek_char() {
                None => {
                    report(sink, LexErrorKind::UnclosedTemplate, self.span_from(template_start));
                    return TemplateEnd::Eof;
                }
                Some('`') => {
                    self.advance();
                    return TemplateEnd::Backtick;
                }
                Some('$') if self.peek_char_n(1) == Some('{') => {
                    self.advance();
                    self.advance();
                    return TemplateEnd::Substitution;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Lexes a regular expression literal, including flags. The leading `/`
    /// has already been classified by [`Self::regexp_allowed`].
    fn lex_regexp(&mut self, start: u32, sink: &mut DiagnosticSink) -> TokenKind {
        self.advance(); // /
        let mut in_class = false;
        loop {
            match self.peek_char() {
                None => {
                    report(sink, LexErrorKind::UnclosedRegexpLiteral, self.span_from(start));
                    return TokenKind::Regexp;
                }
                Some(c) if super::is_line_terminator(c) => {
                    report(sink, LexErrorKind::UnclosedRegexpLiteral, self.span_from(start));
                    return TokenKind::Regexp;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('[') => {
                    in_class = true;
                    self.advance();
                }
                Some(']') => {
                    in_class = false;
                    self.advance();
                }
                Some('/') if !in_class => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        self.advance_while(is_identifier_part); // flags
        TokenKind::Regexp
    }
}

/// Where a template chunk ended.
enum TemplateEnd {
    Backtick,
    Substitution,
    Eof,
}

/// Characters that can begin a token. Anything else is a stray character,
/// diagnosed and skipped before token formation.
fn is_token_start(c: char) -> bool {
    is_identifier_start(c)
        || c.is_ascii_digit()
        || matches!(
            c,
            '\'' | '"'
                | '`'
                | '('
                | ')'
                | '['
                | ']'
                | '{'
                | '}'
                | ';'
                | ','
                | ':'
                | '~'
                | '.'
                | '+'
                | '-'
                | '*'
                | '/'
                | '%'
                | '&'
                | '|'
                | '^'
                | '!'
                | '='
                | '<'
                | '>'
                | '?'
        )
}

fn is_identifier_start(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '_' | '$') || (!c.is_ascii() && c.is_alphabetic())
}

fn is_identifier_part(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '$')
        || (!c.is_ascii() && c.is_alphanumeric())
}

/// Tokenizes a whole buffer, excluding the end-of-file marker.
///
/// Regex/division positions are inferred from the preceding token; this
/// matches the parser's behavior everywhere except after a postfix
/// `++`/`--`. Diagnostics are discarded — use [`lex_with_diagnostics`] to
/// keep them.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    lex_with_diagnostics(source).0
}

/// Tokenizes a whole buffer, returning tokens and lexical diagnostics.
///
/// Stands in for the parser as the lexer's driver: it keeps one stack frame
/// per unfinished template, recording the brace depth at its `${`, so the
/// `}` that closes a substitution re-enters template mode while ordinary
/// block braces pass through.
#[must_use]
pub fn lex_with_diagnostics(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    struct TemplateFrame {
        brace_depth: u32,
        template_start: u32,
    }

    let mut lexer = Lexer::new(source);
    let mut sink = DiagnosticSink::new();
    let mut tokens = Vec::new();
    let mut frames: Vec<TemplateFrame> = Vec::new();
    let mut brace_depth = 0u32;

    loop {
        match lexer.peek(&mut sink).kind() {
            TokenKind::EndOfFile => break,
            TokenKind::TemplateHead => {
                let token = lexer.skip(&mut sink);
                frames.push(TemplateFrame {
                    brace_depth,
                    template_start: token.span().start(),
                });
                tokens.push(token);
            }
            TokenKind::LeftBrace => {
                brace_depth += 1;
                tokens.push(lexer.skip(&mut sink));
            }
            TokenKind::RightBrace => {
                let closes_substitution = frames
                    .last()
                    .is_some_and(|frame| frame.brace_depth == brace_depth);
                if closes_substitution {
                    let start = frames
                        .last()
                        .expect("frame presence was just checked")
                        .template_start;
                    lexer.skip_in_template(&mut sink, start);
                    let token = lexer.skip(&mut sink);
                    if matches!(token.kind(), TokenKind::TemplateTail) {
                        frames.pop();
                    }
                    tokens.push(token);
                } else {
                    brace_depth = brace_depth.saturating_sub(1);
                    tokens.push(lexer.skip(&mut sink));
                }
            }
            _ => tokens.push(lexer.skip(&mut sink)),
        }
    }
    (tokens, sink.into_vec())
}
