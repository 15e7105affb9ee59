//! Parser state - token cursor, diagnostics, trivia and verbatim helpers.

use std::sync::Arc;

use stamp_common::diagnostics::{Diagnostic, diagnostic_codes};
use stamp_common::trivia::{get_trivia_ranges, trailing_comment_end, trivia_lines};
use stamp_common::{Span, limits};
use stamp_scanner::{ScannerState, SyntaxKind, Token, punctuation_to_text, token_closes_group, token_opens_group};

use crate::syntax::{Verbatim, VerbatimLine};

/// Recursive-descent parser over a pre-scanned token stream.
pub struct ParserState {
    pub(crate) file_name: String,
    pub(crate) source: Arc<str>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) parse_diagnostics: Vec<Diagnostic>,
    pub(crate) declaration_depth: u32,
    pub(crate) type_depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let scanner = ScannerState::new(source_text);
        let source = scanner.source_text_arc();
        let (tokens, scanner_diagnostics) = scanner.tokenize();
        let parse_diagnostics = scanner_diagnostics
            .into_iter()
            .map(|diag| {
                Diagnostic::error(
                    file_name.clone(),
                    diag.pos as u32,
                    diag.length as u32,
                    diag.message.to_string(),
                    diag.code,
                )
            })
            .collect();
        ParserState {
            file_name,
            source,
            tokens,
            pos: 0,
            parse_diagnostics,
            declaration_depth: 0,
            type_depth: 0,
        }
    }

    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.parse_diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.parse_diagnostics
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> Token {
        self.nth(0)
    }

    /// The token `n` positions ahead; past the end this is the EOF token.
    #[inline]
    pub(crate) fn nth(&self, n: usize) -> Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[idx]
    }

    #[inline]
    pub(crate) fn kind(&self) -> SyntaxKind {
        self.token().kind
    }

    #[inline]
    pub(crate) fn nth_kind(&self, n: usize) -> SyntaxKind {
        self.nth(n).kind
    }

    #[inline]
    pub(crate) fn is(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        self.is(SyntaxKind::EndOfFileToken)
    }

    pub(crate) fn token_text(&self, token: Token) -> &str {
        token.text(&self.source)
    }

    pub(crate) fn text(&self) -> &str {
        self.token_text(self.token())
    }

    /// Whether the current token is the contextual keyword `word`.
    pub(crate) fn is_contextual(&self, word: &str) -> bool {
        self.is(SyntaxKind::Identifier) && self.text() == word
    }

    pub(crate) fn nth_is_contextual(&self, n: usize, word: &str) -> bool {
        let token = self.nth(n);
        token.kind == SyntaxKind::Identifier && self.token_text(token) == word
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.token();
        if token.kind != SyntaxKind::EndOfFileToken {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report `'x' expected.` at the current token.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let expected = punctuation_to_text(kind).unwrap_or("token");
        self.error_at_current(diagnostic_codes::EXPECTED_TOKEN, &[expected]);
        false
    }

    /// Consume an identifier and return its text.
    pub(crate) fn expect_identifier(&mut self) -> Option<String> {
        if self.is(SyntaxKind::Identifier) {
            let token = self.advance();
            return Some(self.token_text(token).to_string());
        }
        self.error_at_current(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
        None
    }

    /// The last consumed token.
    pub(crate) fn previous(&self) -> Token {
        self.tokens[self.pos.saturating_sub(1)]
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at_current(&mut self, code: u32, args: &[&str]) {
        let token = self.token();
        self.error_at(token.start, token.end - token.start, code, args);
    }

    pub(crate) fn error_at(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        // One diagnostic per position keeps recovery loops quiet.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start && last.code == code)
        {
            return;
        }
        let diag = Diagnostic::from_code(&self.file_name, start, length, code, args);
        tracing::trace!(file = %self.file_name, start, code, message = %diag.message_text, "parse diagnostic");
        self.parse_diagnostics.push(diag);
    }

    pub(crate) fn enter_declaration(&mut self) -> bool {
        if self.declaration_depth >= limits::MAX_DECLARATION_DEPTH {
            self.error_at_current(diagnostic_codes::NESTING_TOO_DEEP, &[]);
            return false;
        }
        self.declaration_depth += 1;
        true
    }

    pub(crate) fn exit_declaration(&mut self) {
        self.declaration_depth = self.declaration_depth.saturating_sub(1);
    }

    // =========================================================================
    // Skipping
    // =========================================================================

    /// Skip a balanced group starting at an opening bracket, including its closer.
    pub(crate) fn skip_balanced(&mut self) {
        let open = self.token();
        if !token_opens_group(open.kind) {
            self.advance();
            return;
        }
        let mut stack = vec![open.kind];
        self.advance();
        while let Some(&top) = stack.last() {
            let kind = self.kind();
            if kind == SyntaxKind::EndOfFileToken {
                let text = punctuation_to_text(top).unwrap_or("{");
                self.error_at(open.start, 1, diagnostic_codes::UNBALANCED_BRACES, &[text]);
                return;
            }
            if token_opens_group(kind) {
                stack.push(kind);
            } else if token_closes_group(kind) {
                stack.pop();
            }
            self.advance();
        }
    }

    /// Skip to the end of a member or statement.
    ///
    /// Ends after a `;` at depth zero, or after a `{ ... }` block at depth
    /// zero unless an `=`/`=>` was seen first (then only `;` ends it).
    /// Stops without consuming at an unmatched closer.
    pub(crate) fn skip_member(&mut self) {
        let mut depth = 0u32;
        let mut saw_assignment = false;
        loop {
            let kind = self.kind();
            match kind {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.advance();
                    return;
                }
                SyntaxKind::EqualsToken | SyntaxKind::EqualsGreaterThanToken if depth == 0 => {
                    saw_assignment = true;
                }
                k if token_opens_group(k) => depth += 1,
                k if token_closes_group(k) => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    if depth == 0 && k == SyntaxKind::CloseBraceToken && !saw_assignment {
                        self.advance();
                        // `{ ... };` keeps its stray semicolon with the member.
                        self.eat(SyntaxKind::SemicolonToken);
                        return;
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }

    // =========================================================================
    // Trivia and verbatim text
    // =========================================================================

    /// Comment and directive lines that lead the token at `idx`.
    ///
    /// Trivia on the same line as the previous token belongs to that token.
    pub(crate) fn leading_trivia_at(&self, idx: usize) -> Vec<String> {
        let token = self.tokens[idx.min(self.tokens.len() - 1)];
        let mut start = token.full_start as usize;
        if idx > 0 {
            let region = &self.source[start..token.start as usize];
            match region.find('\n') {
                Some(newline) => start += newline + 1,
                None => return Vec::new(),
            }
        }
        let ranges = get_trivia_ranges(&self.source, start as u32, token.start);
        trivia_lines(&self.source, &ranges)
    }

    pub(crate) fn leading_trivia(&self) -> Vec<String> {
        self.leading_trivia_at(self.pos)
    }

    /// Verbatim text from the token at `first` through the token before `end_idx`,
    /// plus any comment trailing on the last line.
    pub(crate) fn verbatim(&self, first: usize, end_idx: usize) -> (Verbatim, Span) {
        if end_idx <= first {
            return (Verbatim::default(), Span::at(self.tokens[first].start));
        }
        let start = self.tokens[first].start;
        let end = trailing_comment_end(&self.source, self.tokens[end_idx - 1].end);
        let multiline_strings: Vec<Span> = self.tokens[first..end_idx]
            .iter()
            .filter(|t| {
                t.kind == SyntaxKind::StringLiteral && self.token_text(**t).contains('\n')
            })
            .map(|t| Span::new(t.start, t.end))
            .collect();
        let verbatim = self.dedent(start, end, &multiline_strings);
        (verbatim, Span::new(start, end))
    }

    /// Split `source[start..end]` into lines, removing the indentation of
    /// the line `start` sits on from every following line.
    fn dedent(&self, start: u32, end: u32, multiline_strings: &[Span]) -> Verbatim {
        let source = &self.source;
        let line_start = source[..start as usize].rfind('\n').map_or(0, |nl| nl + 1);
        let indent_prefix = &source[line_start..start as usize];
        let base_indent = if indent_prefix.chars().all(|c| c == ' ' || c == '\t') {
            indent_prefix.chars().count()
        } else {
            0
        };

        let text = &source[start as usize..end as usize];
        let mut lines = Vec::new();
        let mut offset = start;
        for (i, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            let inside_string = multiline_strings
                .iter()
                .any(|s| s.start < offset && offset < s.end);
            let rendered = if i == 0 || inside_string {
                line.to_string()
            } else {
                let strip = line
                    .chars()
                    .take(base_indent)
                    .take_while(|c| *c == ' ' || *c == '\t')
                    .count();
                line.chars().skip(strip).collect::<String>().trim_end().to_string()
            };
            lines.push(VerbatimLine {
                text: rendered,
                reindent: !inside_string,
            });
            offset += raw_line.len() as u32 + 1;
        }
        Verbatim { lines }
    }

    /// Source text of the token range, exactly as written.
    pub(crate) fn exact_text(&self, first: usize, end_idx: usize) -> String {
        if end_idx <= first {
            return String::new();
        }
        let start = self.tokens[first].start as usize;
        let end = self.tokens[end_idx - 1].end as usize;
        self.source[start..end].to_string()
    }
}
