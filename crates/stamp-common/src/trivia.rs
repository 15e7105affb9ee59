//! Trivia Preservation
//!
//! Comments and preprocessor directives are not part of the declaration
//! tree, so they are extracted from the text between tokens and attached to
//! the following declaration as leading trivia lines.

use serde::{Deserialize, Serialize};

/// What a trivia range holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriviaKind {
    /// `// ...` (including `///` doc comments)
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `#nullable enable`, `#region ...` and friends
    Directive,
}

/// A range of non-whitespace trivia in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset, exclusive)
    pub end: u32,
    pub kind: TriviaKind,
    /// Whether a line break separates this range from whatever precedes it
    pub has_preceding_line_break: bool,
}

impl TriviaRange {
    /// Get the trivia text from source.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}

/// Whether `pos` is preceded only by spaces/tabs on its line.
pub fn is_at_line_start(source: &str, pos: usize) -> bool {
    source.as_bytes()[..pos.min(source.len())]
        .iter()
        .rev()
        .take_while(|&&b| b != b'\n')
        .all(|&b| b == b' ' || b == b'\t' || b == b'\r')
}

/// Extract the comment and directive ranges in `source[start..end]`.
///
/// The region is expected to hold trivia only (the text between two tokens).
pub fn get_trivia_ranges(source: &str, start: u32, end: u32) -> Vec<TriviaRange> {
    let bytes = source.as_bytes();
    let end = (end as usize).min(bytes.len());
    let mut pos = start as usize;
    let mut ranges = Vec::new();
    let mut line_start = is_at_line_start(source, pos);
    let mut saw_line_break = false;

    while pos < end {
        let ch = bytes[pos];
        match ch {
            b'\n' => {
                line_start = true;
                saw_line_break = true;
                pos += 1;
            }
            b' ' | b'\t' | b'\r' | b'\x0C' | b'\x0B' => pos += 1,
            b'#' if line_start => {
                let range_start = pos;
                while pos < end && bytes[pos] != b'\n' && bytes[pos] != b'\r' {
                    pos += 1;
                }
                ranges.push(TriviaRange {
                    pos: range_start as u32,
                    end: pos as u32,
                    kind: TriviaKind::Directive,
                    has_preceding_line_break: saw_line_break,
                });
                line_start = false;
            }
            b'/' if pos + 1 < end && bytes[pos + 1] == b'/' => {
                let range_start = pos;
                while pos < end && bytes[pos] != b'\n' && bytes[pos] != b'\r' {
                    pos += 1;
                }
                ranges.push(TriviaRange {
                    pos: range_start as u32,
                    end: pos as u32,
                    kind: TriviaKind::LineComment,
                    has_preceding_line_break: saw_line_break,
                });
                line_start = false;
            }
            b'/' if pos + 1 < end && bytes[pos + 1] == b'*' => {
                let range_start = pos;
                pos += 2;
                let mut closed = false;
                while pos + 1 < end {
                    if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
                        pos += 2;
                        closed = true;
                        break;
                    }
                    pos += 1;
                }
                if !closed {
                    pos = end; // Unclosed comment - go to end
                }
                ranges.push(TriviaRange {
                    pos: range_start as u32,
                    end: pos as u32,
                    kind: TriviaKind::BlockComment,
                    has_preceding_line_break: saw_line_break,
                });
                line_start = false;
            }
            _ => {
                // Not trivia; callers only hand us inter-token regions.
                pos += 1;
                line_start = false;
            }
        }
    }

    ranges
}

/// Render trivia ranges as output lines with their original indentation removed.
///
/// Continuation lines of block comments that start with `*` keep one leading
/// space so doc-style blocks stay aligned.
pub fn trivia_lines(source: &str, ranges: &[TriviaRange]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for range in ranges {
        let text = range.get_text(source);
        let mut first = true;
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let rendered = if !first && trimmed.starts_with('*') {
                format!(" {trimmed}")
            } else {
                trimmed.to_string()
            };
            if first && !range.has_preceding_line_break && !lines.is_empty() {
                // Same-line follow-up (e.g. `/* a */ // b`).
                if let Some(last) = lines.last_mut() {
                    last.push(' ');
                    last.push_str(&rendered);
                }
            } else {
                lines.push(rendered);
            }
            first = false;
        }
    }
    lines
}

/// Extend `pos` over same-line whitespace and comments that trail a token.
///
/// Returns the end of the last trailing comment, or `pos` if there is none.
/// A trailing block comment that spans lines is not absorbed.
pub fn trailing_comment_end(source: &str, pos: u32) -> u32 {
    let bytes = source.as_bytes();
    let mut cursor = pos as usize;
    let mut result = pos as usize;
    loop {
        while cursor < bytes.len() && (bytes[cursor] == b' ' || bytes[cursor] == b'\t') {
            cursor += 1;
        }
        if cursor + 1 >= bytes.len() || bytes[cursor] != b'/' {
            break;
        }
        match bytes[cursor + 1] {
            b'/' => {
                while cursor < bytes.len() && bytes[cursor] != b'\n' && bytes[cursor] != b'\r' {
                    cursor += 1;
                }
                result = cursor;
                break;
            }
            b'*' => {
                let Some(close) = source[cursor + 2..].find("*/") else {
                    break;
                };
                let close_end = cursor + 2 + close + 2;
                if source[cursor..close_end].contains('\n') {
                    break;
                }
                cursor = close_end;
                result = cursor;
            }
            _ => break,
        }
    }
    result as u32
}
