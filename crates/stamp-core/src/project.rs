//! Host-side checks that run before the pipeline: the document kind and the
//! project the document belongs to.

use std::fs;
use std::path::{Path, PathBuf};

use stamp_binder::has_source_extension;
use tracing::{debug, trace};

use crate::error::RewriteError;

const SOLUTION_EXTENSION: &str = "sln";
const PROJECT_EXTENSION: &str = "csproj";

/// Refuse anything but a `.cs` document.
pub fn ensure_csharp_document(path: &Path) -> Result<(), RewriteError> {
    if has_source_extension(path) {
        Ok(())
    } else {
        Err(RewriteError::DocumentKind(path.to_path_buf()))
    }
}

/// The project directory of `document`: the nearest enclosing directory
/// holding a `.sln` file, else the nearest holding a `.csproj` file.
pub fn find_project_root(document: &Path) -> Result<PathBuf, RewriteError> {
    let start = document
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

    for extension in [SOLUTION_EXTENSION, PROJECT_EXTENSION] {
        if let Some(root) = start
            .ancestors()
            .find(|dir| contains_file_with_extension(dir, extension))
        {
            debug!(root = %root.display(), marker = extension, "project root found");
            return Ok(root.to_path_buf());
        }
    }
    Err(RewriteError::ProjectContextMissing(document.to_path_buf()))
}

fn contains_file_with_extension(dir: &Path, extension: &str) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        trace!(dir = %dir.display(), "directory not readable");
        return false;
    };
    entries.flatten().any(|entry| {
        let path = entry.path();
        path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
    })
}
