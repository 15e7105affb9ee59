//! Project-wide symbol store for the stamp mapping generator.
//!
//! The store parses every source file of a project (plus the draft document
//! being edited), records each declared type under its fully qualified name,
//! and resolves type references written in source to those symbols.
//!
//! One store is built per generation pass and dropped afterwards; nothing is
//! cached across passes.

mod predefined;
pub use predefined::{keyword_for_system_type, system_type_for_keyword};

pub mod source;
pub use source::{
    DirectorySourceProvider, InMemorySourceProvider, SourceProvider, SourceText, has_source_extension,
};

mod symbols;
pub use symbols::{FileId, SourceFile, TypeDeclaration, TypeId, TypeSymbol};

mod scope;
pub use scope::{AliasImport, ImportLayer, ResolutionScope};

mod store;
pub use store::{StoreError, SymbolStore};

mod state_binding;
mod state_resolution;
