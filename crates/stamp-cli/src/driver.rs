//! One `stamp` invocation: locate the project, rewrite the document, and
//! decide where the result goes.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stamp_core::{
    DirectorySourceProvider, DocumentRewriter, LineMap, SourceText, ensure_csharp_document,
    find_project_root,
};
use tracing::{debug, info};

use crate::args::CliArgs;

/// What a successful run produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The rewritten document, for stdout
    Document(String),
    /// The `--explain` report as JSON, for stdout
    Report(String),
    /// The document was replaced on disk
    Written { path: PathBuf, generated: usize },
}

#[derive(Debug)]
pub struct RunResult {
    pub outcome: Outcome,
    /// Parse problems in the document, rendered `file(line,col): ...`
    pub warnings: Vec<String>,
}

/// Run the pipeline for `args`. Relative paths are taken from `cwd`;
/// `input` is read only with `--stdin`.
pub fn run(args: &CliArgs, cwd: &Path, input: impl Read) -> Result<RunResult> {
    let document = absolute(cwd, &args.file);
    ensure_csharp_document(&document)?;

    let project_root = match &args.project {
        Some(project) => absolute(cwd, project),
        None => find_project_root(&document)?,
    };
    debug!(
        document = %document.display(),
        project = %project_root.display(),
        "resolved invocation paths"
    );

    let text = read_document(args, &document, input)?;
    let line_map = LineMap::build(&text);
    let provider = DirectorySourceProvider::new(&project_root);
    let rewriter = DocumentRewriter::new(&provider, args.rewrite_options());
    let output = rewriter
        .rewrite(&SourceText::new(&document, text))
        .with_context(|| format!("failed to generate mappings for {}", document.display()))?;
    let warnings = output
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.render(&line_map))
        .collect();

    let outcome = if args.explain {
        let report = serde_json::to_string_pretty(&output.report)
            .context("failed to serialize the mapping report")?;
        Outcome::Report(report)
    } else if args.write {
        fs::write(&document, &output.text)
            .with_context(|| format!("failed to write {}", document.display()))?;
        info!(path = %document.display(), "document replaced");
        Outcome::Written {
            generated: output.generated_count(),
            path: document,
        }
    } else {
        Outcome::Document(output.text)
    };
    Ok(RunResult { outcome, warnings })
}

fn read_document(args: &CliArgs, document: &Path, mut input: impl Read) -> Result<String> {
    if args.stdin {
        let mut text = String::new();
        input
            .read_to_string(&mut text)
            .context("failed to read the document from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(document).with_context(|| format!("failed to read {}", document.display()))
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
