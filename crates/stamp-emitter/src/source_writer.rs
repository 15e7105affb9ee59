//! Indentation-aware output buffer.

use crate::options::{NewLineKind, PrinterOptions};

/// Accumulates output text line by line.
///
/// Indentation is written lazily before the first text of a line, so empty
/// lines never carry trailing whitespace.
#[derive(Debug)]
pub struct SourceWriter {
    output: String,
    indent_level: u32,
    indent_unit: String,
    new_line: NewLineKind,
    line_start: bool,
    column: usize,
}

impl SourceWriter {
    pub fn new(options: &PrinterOptions) -> Self {
        SourceWriter {
            output: String::new(),
            indent_level: 0,
            indent_unit: " ".repeat(options.indent_size as usize),
            new_line: options.new_line,
            line_start: true,
            column: 0,
        }
    }

    /// Write `text` on the current line, indenting first if the line is empty.
    /// `text` must not contain line breaks.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(&self.indent_unit);
            }
            self.column = self.indent_width();
            self.line_start = false;
        }
        self.output.push_str(text);
        self.column += text.chars().count();
    }

    /// Write `text` without indentation.
    pub fn write_raw(&mut self, text: &str) {
        self.output.push_str(text);
        self.column += text.chars().count();
        self.line_start = false;
    }

    pub fn write_line(&mut self) {
        self.output.push_str(self.new_line.as_str());
        self.line_start = true;
        self.column = 0;
    }

    /// Write `text` as a whole indented line.
    pub fn write_text_line(&mut self, text: &str) {
        self.write(text);
        self.write_line();
    }

    /// End the current line if anything has been written on it.
    pub fn ensure_line_start(&mut self) {
        if !self.line_start {
            self.write_line();
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    /// Width of the indentation at the current level, in columns.
    pub fn indent_width(&self) -> usize {
        self.indent_level as usize * self.indent_unit.len()
    }

    /// Column the next write lands on.
    pub fn column(&self) -> usize {
        if self.line_start {
            self.indent_width()
        } else {
            self.column
        }
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }
}
