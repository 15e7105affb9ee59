//! Scanner state machine.
//!
//! Produces one token per `scan()` call. Whitespace, comments and
//! preprocessor lines are skipped as trivia; each token remembers where its
//! leading trivia started so the parser can recover comments later.

use std::sync::Arc;

use stamp_common::diagnostics::diagnostic_codes;

use crate::char_codes::{is_digit, is_identifier_part, is_identifier_start, is_line_break};
use crate::{SyntaxKind, text_to_keyword};

/// A scanned token. Text is recovered by slicing the source with `start..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Start of the token text
    pub start: u32,
    /// End of the token text (exclusive)
    pub end: u32,
    /// Start of the leading trivia (equal to `start` when there is none)
    pub full_start: u32,
    pub has_preceding_line_break: bool,
}

impl Token {
    /// Get the token text from source.
    #[inline]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start as usize..self.end as usize).unwrap_or("")
    }
}

/// A lexical problem (unterminated literal, stray character).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

/// Tokenizer over a single source text.
pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    preceding_line_break: bool,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        ScannerState {
            text: text.into(),
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            preceding_line_break: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_start(&self) -> usize {
        self.token_start
    }

    pub fn get_token_end(&self) -> usize {
        self.pos
    }

    pub fn get_token_full_start(&self) -> usize {
        self.full_start
    }

    pub fn get_token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    /// The current token as a `Token` value.
    pub fn current(&self) -> Token {
        Token {
            kind: self.token,
            start: self.token_start as u32,
            end: self.pos as u32,
            full_start: self.full_start as u32,
            has_preceding_line_break: self.preceding_line_break,
        }
    }

    /// Scan the whole text, ending with an `EndOfFileToken`.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<ScannerDiagnostic>) {
        let mut tokens = Vec::with_capacity(self.text.len() / 4 + 1);
        loop {
            let kind = self.scan();
            tokens.push(self.current());
            if kind == SyntaxKind::EndOfFileToken {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    // =========================================================================
    // Character access
    // =========================================================================

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn is_at_line_start(&self, pos: usize) -> bool {
        self.text.as_bytes()[..pos]
            .iter()
            .rev()
            .take_while(|&&b| b != b'\n')
            .all(|&b| b == b' ' || b == b'\t' || b == b'\r')
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            if is_line_break(ch) {
                self.preceding_line_break = true;
                self.pos += ch.len_utf8();
            } else if ch.is_whitespace() || ch == '\u{FEFF}' {
                self.pos += ch.len_utf8();
            } else if ch == '/' && self.byte_at(self.pos + 1) == Some(b'/') {
                self.skip_to_line_end();
            } else if ch == '/' && self.byte_at(self.pos + 1) == Some(b'*') {
                let start = self.pos;
                match self.text[self.pos + 2..].find("*/") {
                    Some(offset) => {
                        let end = self.pos + 2 + offset + 2;
                        if self.text[start..end].contains('\n') {
                            self.preceding_line_break = true;
                        }
                        self.pos = end;
                    }
                    None => {
                        self.pos = self.text.len();
                        self.error(
                            start,
                            2,
                            "'*/' expected.",
                            diagnostic_codes::UNTERMINATED_COMMENT,
                        );
                    }
                }
            } else if ch == '#' && self.is_at_line_start(self.pos) {
                self.skip_to_line_end();
            } else {
                break;
            }
        }
    }

    fn skip_to_line_end(&mut self) {
        let rest = &self.text.as_bytes()[self.pos..];
        self.pos += memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.preceding_line_break = false;
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.current_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '"' => self.scan_string(),
            '$' | '@' if self.at_string_start() => self.scan_string(),
            '@' if self.char_at(self.pos + 1).is_some_and(is_identifier_start) => {
                self.pos += 1;
                self.scan_identifier()
            }
            '\'' => self.scan_char_literal(),
            c if is_digit(c) => self.scan_number(),
            '.' if self.char_at(self.pos + 1).is_some_and(is_digit) => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            _ => self.scan_punctuation(ch),
        };
        self.token
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        if self.text[self.token_start..start].is_empty() {
            text_to_keyword(&self.text[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
        } else {
            // `@class` is always an identifier.
            SyntaxKind::Identifier
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        let is_radix = bytes[self.pos] == b'0'
            && matches!(self.byte_at(self.pos + 1), Some(b'x' | b'X' | b'b' | b'B'));
        if is_radix {
            self.pos += 2;
            while self
                .byte_at(self.pos)
                .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
            {
                self.pos += 1;
            }
            return SyntaxKind::NumericLiteral;
        }
        while self
            .byte_at(self.pos)
            .is_some_and(|b| b.is_ascii_digit() || b == b'_')
        {
            self.pos += 1;
        }
        if self.byte_at(self.pos) == Some(b'.')
            && self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit())
        {
            self.pos += 1;
            while self
                .byte_at(self.pos)
                .is_some_and(|b| b.is_ascii_digit() || b == b'_')
            {
                self.pos += 1;
            }
        }
        if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
            let mut lookahead = self.pos + 1;
            if matches!(self.byte_at(lookahead), Some(b'+' | b'-')) {
                lookahead += 1;
            }
            if self.byte_at(lookahead).is_some_and(|b| b.is_ascii_digit()) {
                self.pos = lookahead;
                while self.byte_at(self.pos).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        // Suffixes: u, l, ul, f, d, m
        while self
            .byte_at(self.pos)
            .is_some_and(|b| matches!(b, b'u' | b'U' | b'l' | b'L' | b'f' | b'F' | b'd' | b'D' | b'm' | b'M'))
        {
            self.pos += 1;
        }
        SyntaxKind::NumericLiteral
    }

    /// Whether `pos` starts a string literal, including `$`/`@` prefixes.
    fn at_string_start(&self) -> bool {
        let bytes = self.text.as_bytes();
        let mut cursor = self.pos;
        while cursor < bytes.len() && (bytes[cursor] == b'$' || bytes[cursor] == b'@') {
            cursor += 1;
        }
        cursor > self.pos && bytes.get(cursor) == Some(&b'"')
    }

    /// Scan any string literal form: regular, verbatim, interpolated, raw.
    fn scan_string(&mut self) -> SyntaxKind {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let mut dollars = 0usize;
        let mut verbatim = false;
        while let Some(&b) = bytes.get(self.pos) {
            match b {
                b'$' => dollars += 1,
                b'@' => verbatim = true,
                _ => break,
            }
            self.pos += 1;
        }

        let quote_run = bytes[self.pos..].iter().take_while(|&&b| b == b'"').count();
        if quote_run >= 3 {
            return self.scan_raw_string(start, quote_run);
        }
        if quote_run == 2 && !verbatim {
            // Empty string `""`
            self.pos += 2;
            return SyntaxKind::StringLiteral;
        }

        self.pos += 1;
        loop {
            let Some(ch) = self.current_char() else {
                self.error(
                    start,
                    self.pos - start,
                    "Unterminated string literal.",
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                );
                break;
            };
            match ch {
                '"' if verbatim && self.byte_at(self.pos + 1) == Some(b'"') => self.pos += 2,
                '"' => {
                    self.pos += 1;
                    break;
                }
                '\\' if !verbatim => {
                    self.pos += 1;
                    if let Some(escaped) = self.current_char() {
                        self.pos += escaped.len_utf8();
                    }
                }
                '\n' | '\r' if !verbatim => {
                    self.error(
                        start,
                        self.pos - start,
                        "Unterminated string literal.",
                        diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                    );
                    break;
                }
                '{' if dollars > 0 => {
                    if self.byte_at(self.pos + 1) == Some(b'{') {
                        self.pos += 2;
                    } else {
                        self.pos += 1;
                        self.skip_interpolation_hole();
                    }
                }
                _ => self.pos += ch.len_utf8(),
            }
        }
        SyntaxKind::StringLiteral
    }

    fn scan_raw_string(&mut self, start: usize, quote_run: usize) -> SyntaxKind {
        self.pos += quote_run;
        let closing = "\"".repeat(quote_run);
        match self.text[self.pos..].find(closing.as_str()) {
            Some(offset) => {
                self.pos += offset + quote_run;
                // A longer run closes at its end.
                while self.byte_at(self.pos) == Some(b'"') {
                    self.pos += 1;
                }
            }
            None => {
                self.pos = self.text.len();
                self.error(
                    start,
                    self.pos - start,
                    "Unterminated string literal.",
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                );
            }
        }
        SyntaxKind::StringLiteral
    }

    /// Skip an interpolation hole up to and including its closing `}`.
    fn skip_interpolation_hole(&mut self) {
        let mut depth = 1usize;
        while let Some(ch) = self.current_char() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return;
                    }
                }
                '"' => {
                    self.scan_string();
                    continue;
                }
                '$' | '@' if self.at_string_start() => {
                    self.scan_string();
                    continue;
                }
                '\'' => {
                    self.scan_char_literal();
                    continue;
                }
                _ => {}
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_char_literal(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.current_char() {
                Some('\'') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    self.pos += 1;
                    if let Some(escaped) = self.current_char() {
                        self.pos += escaped.len_utf8();
                    }
                }
                Some(ch) if !is_line_break(ch) => self.pos += ch.len_utf8(),
                _ => {
                    self.error(
                        start,
                        self.pos - start,
                        "Unterminated string literal.",
                        diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                    );
                    break;
                }
            }
        }
        SyntaxKind::CharacterLiteral
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        let next = self.byte_at(self.pos + 1);
        let (kind, len) = match (ch, next) {
            ('{', _) => (SyntaxKind::OpenBraceToken, 1),
            ('}', _) => (SyntaxKind::CloseBraceToken, 1),
            ('(', _) => (SyntaxKind::OpenParenToken, 1),
            (')', _) => (SyntaxKind::CloseParenToken, 1),
            ('[', _) => (SyntaxKind::OpenBracketToken, 1),
            (']', _) => (SyntaxKind::CloseBracketToken, 1),
            ('.', _) => (SyntaxKind::DotToken, 1),
            (',', _) => (SyntaxKind::CommaToken, 1),
            (';', _) => (SyntaxKind::SemicolonToken, 1),
            (':', Some(b':')) => (SyntaxKind::ColonColonToken, 2),
            (':', _) => (SyntaxKind::ColonToken, 1),
            ('?', Some(b'?')) => (SyntaxKind::QuestionQuestionToken, 2),
            ('?', Some(b'.')) => (SyntaxKind::QuestionDotToken, 2),
            ('?', _) => (SyntaxKind::QuestionToken, 1),
            ('<', Some(b'=' | b'<')) => (SyntaxKind::OperatorToken, 2),
            ('<', _) => (SyntaxKind::LessThanToken, 1),
            // `>` is never merged so `List<List<int>>` closes twice.
            ('>', _) => (SyntaxKind::GreaterThanToken, 1),
            ('=', Some(b'=')) => (SyntaxKind::EqualsEqualsToken, 2),
            ('=', Some(b'>')) => (SyntaxKind::EqualsGreaterThanToken, 2),
            ('=', _) => (SyntaxKind::EqualsToken, 1),
            ('!', Some(b'=')) => (SyntaxKind::ExclamationEqualsToken, 2),
            ('!', _) => (SyntaxKind::ExclamationToken, 1),
            ('+', Some(b'+' | b'=')) => (SyntaxKind::OperatorToken, 2),
            ('+', _) => (SyntaxKind::PlusToken, 1),
            ('-', Some(b'-' | b'=' | b'>')) => (SyntaxKind::OperatorToken, 2),
            ('-', _) => (SyntaxKind::MinusToken, 1),
            ('*', Some(b'=')) => (SyntaxKind::OperatorToken, 2),
            ('*', _) => (SyntaxKind::AsteriskToken, 1),
            ('/', Some(b'=')) => (SyntaxKind::OperatorToken, 2),
            ('/', _) => (SyntaxKind::SlashToken, 1),
            ('%', Some(b'=')) => (SyntaxKind::OperatorToken, 2),
            ('%', _) => (SyntaxKind::PercentToken, 1),
            ('&', Some(b'&' | b'=')) => (SyntaxKind::OperatorToken, 2),
            ('&', _) => (SyntaxKind::AmpersandToken, 1),
            ('|', Some(b'|' | b'=')) => (SyntaxKind::OperatorToken, 2),
            ('|', _) => (SyntaxKind::BarToken, 1),
            ('^', Some(b'=')) => (SyntaxKind::OperatorToken, 2),
            ('^', _) => (SyntaxKind::CaretToken, 1),
            ('~', _) => (SyntaxKind::TildeToken, 1),
            ('#', _) => (SyntaxKind::HashToken, 1),
            _ => {
                let len = ch.len_utf8();
                self.error(
                    self.pos,
                    len,
                    "Invalid character.",
                    diagnostic_codes::INVALID_CHARACTER,
                );
                (SyntaxKind::Unknown, len)
            }
        };
        self.pos += len;
        kind
    }
}
