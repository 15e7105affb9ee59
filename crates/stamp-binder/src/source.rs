//! Project source loading.
//!
//! A `SourceProvider` yields the text of every source file that takes part
//! in symbol resolution. The directory provider walks a project tree on disk;
//! the in-memory provider serves tests and hosts that already hold the text.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::store::StoreError;

/// Directories that never hold project sources.
const SKIPPED_DIRECTORIES: &[&str] = &["bin", "obj", "node_modules"];

/// One source document: its path and full text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
}

impl SourceText {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        SourceText {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Whether this is the same document as `other`, comparing canonical
    /// paths when both exist on disk.
    pub fn is_same_document(&self, other: &Path) -> bool {
        same_path(&self.path, other)
    }
}

/// Source of the files that make up a project.
pub trait SourceProvider {
    /// Every source file of the project in a deterministic order.
    fn sources(&self) -> Result<Vec<SourceText>, StoreError>;
}

/// Every `*.cs` file below a root directory.
///
/// Hidden directories and build output directories are skipped. Files that
/// cannot be read are logged and left out.
#[derive(Clone, Debug)]
pub struct DirectorySourceProvider {
    root: PathBuf,
}

impl DirectorySourceProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySourceProvider { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths of every source file, sorted.
    pub fn source_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::RootNotFound(self.root.clone()));
        }

        let mut paths = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_directory(entry));
        for entry in walker {
            let entry = entry.map_err(|source| StoreError::Walk {
                root: self.root.clone(),
                source,
            })?;
            if entry.file_type().is_file() && has_source_extension(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        paths.sort();
        debug!(root = %self.root.display(), files = paths.len(), "discovered project sources");
        Ok(paths)
    }
}

impl SourceProvider for DirectorySourceProvider {
    fn sources(&self) -> Result<Vec<SourceText>, StoreError> {
        let mut sources = Vec::new();
        for path in self.source_paths()? {
            match fs::read_to_string(&path) {
                Ok(text) => sources.push(SourceText { path, text }),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable source file");
                }
            }
        }
        Ok(sources)
    }
}

/// A fixed set of documents held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySourceProvider {
    sources: Vec<SourceText>,
}

impl InMemorySourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.add_file(path, text);
        self
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.sources.push(SourceText::new(path, text));
    }
}

impl SourceProvider for InMemorySourceProvider {
    fn sources(&self) -> Result<Vec<SourceText>, StoreError> {
        let mut sources = self.sources.clone();
        sources.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(sources)
    }
}

fn is_skipped_directory(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name.as_ref())
}

/// Whether `path` has the `.cs` extension, in any letter case.
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cs"))
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
