//! Diagnostic types and message lookup for the scanner and parser.

use serde::Serialize;

use crate::position::LineMap;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 2,
}

/// A problem found while reading a source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a diagnostic from a message table entry, filling in `args`.
    #[must_use]
    pub fn from_code(file: &str, start: u32, length: u32, code: u32, args: &[&str]) -> Self {
        let entry = get_diagnostic_message(code);
        let template = entry.map_or("{0}", |m| m.message);
        Self {
            file: file.to_string(),
            start,
            length,
            message_text: format_message(template, args),
            category: entry.map_or(DiagnosticCategory::Error, |m| m.category),
            code,
        }
    }

    /// `file(line,col): error STAMP1002: message`, one-based like compiler output.
    #[must_use]
    pub fn render(&self, line_map: &LineMap) -> String {
        let pos = line_map.position_of(self.start);
        let category = match self.category {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Message => "message",
        };
        format!(
            "{}({},{}): {} STAMP{}: {}",
            self.file,
            pos.line + 1,
            pos.character + 1,
            category,
            self.code,
            self.message_text
        )
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const UNTERMINATED_COMMENT: u32 = 1010;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const EXPECTED_TOKEN: u32 = 1005;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const UNEXPECTED_TOKEN: u32 = 1012;
    pub const DECLARATION_EXPECTED: u32 = 1128;
    pub const UNBALANCED_BRACES: u32 = 1109;
    pub const NESTING_TOO_DEEP: u32 = 1200;
}

use diagnostic_codes as codes;

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: "Unterminated string literal.",
    },
    DiagnosticMessage {
        code: codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Identifier expected.",
    },
    DiagnosticMessage {
        code: codes::EXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: "'{0}' expected.",
    },
    DiagnosticMessage {
        code: codes::UNTERMINATED_COMMENT,
        category: DiagnosticCategory::Error,
        message: "'*/' expected.",
    },
    DiagnosticMessage {
        code: codes::UNEXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: "Unexpected token '{0}'.",
    },
    DiagnosticMessage {
        code: codes::UNBALANCED_BRACES,
        category: DiagnosticCategory::Error,
        message: "Unbalanced '{0}' before end of file.",
    },
    DiagnosticMessage {
        code: codes::TYPE_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Type expected.",
    },
    DiagnosticMessage {
        code: codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: "Invalid character.",
    },
    DiagnosticMessage {
        code: codes::DECLARATION_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Declaration or statement expected.",
    },
    DiagnosticMessage {
        code: codes::NESTING_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: "Declarations are nested too deeply.",
    },
];

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}
