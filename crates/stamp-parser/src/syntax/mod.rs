//! Syntax tree for a C# compilation unit.
//!
//! Declarations the generator reasons about (usings, namespaces, types,
//! properties, fields) are parsed structurally. Everything else is a
//! `Verbatim` block carrying its original text, already dedented.

mod decls;
mod modifiers;
mod types;

pub use decls::*;
pub use modifiers::ModifierFlags;
pub use types::{NameSegment, TupleElement, TypeSyntax};
