//! Symbol arena entries.

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde::Serialize;
use stamp_common::Diagnostic;
use stamp_parser::{CompilationUnit, TypeDecl, TypeKind};

use crate::scope::ResolutionScope;

/// Index of a source file in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileId(pub u32);

/// Index of a type symbol in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

/// A parsed project file.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub unit: CompilationUnit,
    /// The in-memory document being rewritten
    pub is_draft: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// One declaration of a type. Partial types have several.
#[derive(Clone, Debug)]
pub struct TypeDeclaration {
    pub file: FileId,
    /// Scope that names inside this declaration (members, base list) resolve in
    pub scope: ResolutionScope,
    pub decl: TypeDecl,
}

/// A declared type.
#[derive(Clone, Debug)]
pub struct TypeSymbol {
    pub id: TypeId,
    pub name: String,
    pub arity: usize,
    /// Declaring namespace, dotted; empty for the global namespace
    pub namespace: String,
    pub containing_type: Option<TypeId>,
    pub kind: TypeKind,
    /// Type parameter names of the first declaration
    pub type_parameters: Vec<String>,
    /// Metadata-style key: `Ns.Outer`1.Inner`
    pub qualified_name: String,
    /// Display form: `Ns.Outer<T>.Inner`
    pub display_name: String,
    pub declarations: Vec<TypeDeclaration>,
    /// Nested types by metadata name (`Inner`, `Node`1`)
    pub nested_types: FxHashMap<String, TypeId>,
}

impl TypeSymbol {
    /// `Name` or ``Name`N`` for generic types.
    pub fn metadata_name(&self) -> String {
        metadata_name(&self.name, self.arity)
    }

    pub fn is_partial(&self) -> bool {
        self.declarations.len() > 1
    }
}

pub(crate) fn metadata_name(name: &str, arity: usize) -> String {
    if arity == 0 {
        name.to_string()
    } else {
        format!("{name}`{arity}")
    }
}

pub(crate) fn join_qualified(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
