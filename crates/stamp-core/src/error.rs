use std::path::PathBuf;

use stamp_binder::StoreError;
use thiserror::Error;

use crate::stage::RewriteStage;

/// Why the rewrite could not produce a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SynthesisFailure {
    #[error("the document declares no top-level class to hold the generated methods")]
    NoHostClass,
    #[error("the document was not bound into the symbol store")]
    DocumentNotBound,
}

/// Fatal errors of a generation pass. Unresolved types are not errors; they
/// produce methods without member assignments.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The document is not a `.cs` file. Raised before any work is done.
    #[error("`{}` is not a C# source document", .0.display())]
    DocumentKind(PathBuf),

    /// No directory could be identified as the document's project.
    #[error(
        "no project found for `{}`: no enclosing directory holds a .sln or .csproj file",
        .0.display()
    )]
    ProjectContextMissing(PathBuf),

    #[error("cannot generate mappings for `{}` ({stage}): {reason}", document.display())]
    SynthesisFailure {
        document: PathBuf,
        stage: RewriteStage,
        reason: SynthesisFailure,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RewriteError {
    /// Whether the pipeline was refused before it parsed anything.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            RewriteError::DocumentKind(_) | RewriteError::ProjectContextMissing(_)
        )
    }
}
