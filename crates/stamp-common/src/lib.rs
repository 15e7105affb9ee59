//! Common types and utilities for the stamp mapping generator.
//!
//! This crate provides foundational types used across all stamp crates:
//! - Source spans (`Span`)
//! - Line/column positions (`LineMap`, `Position`)
//! - Trivia extraction (comments and preprocessor directives)
//! - Diagnostics and their message table
//! - Parser and binder limits

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Comment and directive ranges between tokens
pub mod trivia;
pub use trivia::{TriviaKind, TriviaRange};

// Diagnostics reported by the scanner and parser
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits
pub mod limits;

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;

#[cfg(test)]
#[path = "tests/trivia_tests.rs"]
mod trivia_tests;
