//! C# declaration parser for the stamp mapping generator.
//!
//! The parser understands the declaration skeleton of a compilation unit
//! (using directives, namespaces, types, properties, fields) and keeps every
//! other construct as verbatim text so the unit can be re-printed faithfully.

pub mod syntax;
pub use syntax::*;

pub mod parser;
pub use parser::{ParserState, parse};
