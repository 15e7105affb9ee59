//! C# scanner/tokenizer for the stamp mapping generator.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `char_codes` - Character classification utilities

pub mod char_codes;

mod syntax_kind;
pub use syntax_kind::*;

mod scanner;
pub use scanner::{ScannerDiagnostic, ScannerState, Token};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
