//! Declaration parser.
//!
//! `ParserState` walks the scanner's token stream once. Using directives,
//! namespaces, types, properties and fields become syntax nodes; method
//! bodies, attributes and other members are skipped as balanced token runs
//! and kept as verbatim text.

mod state;
mod state_declarations;
mod state_members;
mod state_types;

pub use state::ParserState;

use crate::syntax::CompilationUnit;
use stamp_common::Diagnostic;

/// Parse `text` as the compilation unit `file_name`.
pub fn parse(file_name: impl Into<String>, text: impl Into<String>) -> (CompilationUnit, Vec<Diagnostic>) {
    let mut parser = ParserState::new(file_name.into(), text.into());
    let unit = parser.parse_source_file();
    (unit, parser.into_diagnostics())
}
