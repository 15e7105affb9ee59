//! The symbol store: every parsed file of one project snapshot and the
//! types they declare.

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use stamp_common::Diagnostic;
use stamp_parser::{CompilationUnit, NamespaceMember};
use thiserror::Error;
use tracing::{debug, info, info_span};

use crate::scope::{ImportLayer, ResolutionScope};
use crate::source::{SourceProvider, SourceText};
use crate::symbols::{FileId, SourceFile, TypeId, TypeSymbol};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("project root `{}` is not a directory", .0.display())]
    RootNotFound(PathBuf),
    #[error("failed to read the project tree under `{}`", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Parsed project files and the type symbols they declare.
///
/// Built fresh for each generation pass.
#[derive(Debug, Default)]
pub struct SymbolStore {
    pub(crate) files: Vec<SourceFile>,
    pub(crate) symbols: Vec<TypeSymbol>,
    /// Types by metadata-style fully qualified name
    pub(crate) by_name: FxHashMap<String, TypeId>,
    /// Every declared namespace, including the prefixes of dotted names
    pub(crate) namespaces: FxHashSet<String>,
    /// `global using` directives from every file
    pub(crate) project_imports: ImportLayer,
    pub(crate) draft: Option<FileId>,
}

impl SymbolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and bind every file from `provider`.
    ///
    /// The `draft` document is bound first. A provider file at the same path
    /// is skipped, so the draft text wins over what is on disk.
    pub fn build(
        provider: &dyn SourceProvider,
        draft: Option<&SourceText>,
    ) -> Result<SymbolStore, StoreError> {
        let _span = info_span!("build_symbol_store").entered();
        let mut store = SymbolStore::new();
        if let Some(draft) = draft {
            store.add_source(draft, true);
        }
        for source in provider.sources()? {
            if draft.is_some_and(|draft| draft.is_same_document(&source.path)) {
                debug!(path = %source.path.display(), "on-disk copy of the draft skipped");
                continue;
            }
            store.add_source(&source, false);
        }
        info!(
            files = store.files.len(),
            types = store.symbols.len(),
            "symbol store ready"
        );
        Ok(store)
    }

    /// Parse `source` and bind its declarations.
    pub fn add_source(&mut self, source: &SourceText, is_draft: bool) -> FileId {
        let file_name = source.path.display().to_string();
        let (unit, diagnostics) = stamp_parser::parse(file_name, source.text.as_str());
        if !diagnostics.is_empty() {
            debug!(
                path = %source.path.display(),
                count = diagnostics.len(),
                "source parsed with diagnostics"
            );
        }
        self.add_unit(source.path.clone(), unit, diagnostics, is_draft)
    }

    /// Bind an already parsed compilation unit.
    pub fn add_unit(
        &mut self,
        path: PathBuf,
        unit: CompilationUnit,
        diagnostics: Vec<Diagnostic>,
        is_draft: bool,
    ) -> FileId {
        let file = FileId(self.files.len() as u32);
        self.files.push(SourceFile {
            path,
            unit: CompilationUnit::default(),
            is_draft,
            diagnostics,
        });
        self.bind_unit(file, &unit);
        self.files[file.0 as usize].unit = unit;
        if is_draft && self.draft.is_none() {
            self.draft = Some(file);
        }
        file
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0 as usize]
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// The file bound from `path`, compared as given.
    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.files
            .iter()
            .position(|file| file.path == path)
            .map(|idx| FileId(idx as u32))
    }

    pub fn draft_file(&self) -> Option<FileId> {
        self.draft
    }

    pub fn symbol(&self, id: TypeId) -> &TypeSymbol {
        &self.symbols[id.0 as usize]
    }

    pub fn symbols(&self) -> &[TypeSymbol] {
        &self.symbols
    }

    pub fn type_count(&self) -> usize {
        self.symbols.len()
    }

    /// Look up a type by metadata-style fully qualified name (`Ns.Outer`1.Inner`).
    pub fn lookup(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_name.get(qualified_name).copied()
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    /// Project-wide `global using` directives.
    pub fn project_imports(&self) -> &ImportLayer {
        &self.project_imports
    }

    /// Parse diagnostics of every file.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| file.diagnostics.iter())
    }

    /// The scope of code directly inside the namespace path `path` of `file`.
    ///
    /// `path` lists namespace declaration names from the outermost in, as
    /// `CompilationUnit::all_usings` reports them.
    pub fn scope_for(&self, file: FileId, path: &[String]) -> ResolutionScope {
        let unit = &self.file(file).unit;
        let mut scope = ResolutionScope::for_unit(file, &unit.usings);
        let mut members = unit.members.as_slice();
        for name in path {
            let namespace = members.iter().find_map(|member| match member {
                NamespaceMember::Namespace(ns) if &ns.name == name => Some(ns),
                _ => None,
            });
            let Some(namespace) = namespace else {
                break;
            };
            scope = scope.enter_namespace(&namespace.name, &namespace.usings);
            members = &namespace.members;
        }
        scope
    }
}
