//! The generation pass: one draft document in, its rewritten text out.
//!
//! ```text
//! Parsed -> SpecsExtracted -> MethodsSynthesized -> TreeRewritten -> Serialized
//! ```
//!
//! The symbol store is built fresh for every pass from the project sources
//! plus the draft. The draft's parsed unit is cloned before any change, so a
//! failure leaves nothing half-written.

use std::path::{Path, PathBuf};

use stamp_binder::{DirectorySourceProvider, SourceProvider, SourceText, SymbolStore};
use stamp_common::Diagnostic;
use stamp_emitter::{IRMethod, MethodSynthesizer, OutputDocument, Printer};
use stamp_mapper::{Extraction, MappingReport, MappingSpecExtractor, is_mapping_trigger};
use stamp_parser::{CompilationUnit, NamespaceMember};
use tracing::{debug, info, info_span, warn};

use crate::error::{RewriteError, SynthesisFailure};
use crate::host::{find_host_class, promote_to_static};
use crate::imports::merge_imports;
use crate::options::RewriteOptions;
use crate::project::ensure_csharp_document;
use crate::stage::{RewriteStage, StageTracker};

/// Result of a successful pass.
#[derive(Clone, Debug)]
pub struct RewriteOutput {
    /// Replacement text for the whole document
    pub text: String,
    /// The specifications behind the generated methods
    pub report: MappingReport,
    /// Name of the class that received the methods, if any were generated
    pub host: Option<String>,
    /// Problems found while parsing the draft; declarations around them
    /// were kept as text
    pub diagnostics: Vec<Diagnostic>,
}

impl RewriteOutput {
    pub fn generated_count(&self) -> usize {
        self.report.specifications.len()
    }
}

pub struct DocumentRewriter<'p> {
    provider: &'p dyn SourceProvider,
    options: RewriteOptions,
}

impl<'p> DocumentRewriter<'p> {
    pub fn new(provider: &'p dyn SourceProvider, options: RewriteOptions) -> Self {
        DocumentRewriter { provider, options }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrite `draft` against the project the provider serves.
    pub fn rewrite(&self, draft: &SourceText) -> Result<RewriteOutput, RewriteError> {
        let _span = info_span!("rewrite", path = %draft.path.display()).entered();
        ensure_csharp_document(&draft.path)?;
        let mut stages = StageTracker::default();

        let store = SymbolStore::build(self.provider, Some(draft))?;
        let file = store
            .draft_file()
            .ok_or_else(|| failure(&draft.path, &stages, SynthesisFailure::DocumentNotBound))?;
        stages.enter(RewriteStage::Parsed);
        let diagnostics = store.file(file).diagnostics.clone();
        if !diagnostics.is_empty() {
            warn!(count = diagnostics.len(), "draft parsed with diagnostics");
        }

        let extraction = MappingSpecExtractor::new(&store).extract(file);
        stages.enter(RewriteStage::SpecsExtracted);
        let report = MappingReport::new(draft.path.display().to_string(), &extraction);

        let unit = store.file(file).unit.clone();
        if extraction.is_empty() {
            debug!("no mapping triggers; document re-serialized as is");
            let text = Printer::print_document(
                &OutputDocument::unchanged(unit),
                &self.options.printer,
            );
            stages.enter(RewriteStage::Serialized);
            return Ok(RewriteOutput {
                text,
                report,
                host: None,
                diagnostics,
            });
        }

        let synthesizer = MethodSynthesizer::new(self.options.printer.body_style);
        let methods: Vec<IRMethod> = extraction
            .specifications
            .iter()
            .map(|spec| synthesizer.synthesize(spec))
            .collect();
        stages.enter(RewriteStage::MethodsSynthesized);

        let document = self.rewrite_tree(unit, methods, &extraction, &draft.path, &stages)?;
        stages.enter(RewriteStage::TreeRewritten);

        let text = Printer::print_document(&document, &self.options.printer);
        stages.enter(RewriteStage::Serialized);

        let host = document.host_type().map(|decl| decl.name.clone());
        info!(
            generated = document.methods.len(),
            host = host.as_deref().unwrap_or_default(),
            "mappings generated"
        );
        Ok(RewriteOutput {
            text,
            report,
            host,
            diagnostics,
        })
    }

    fn rewrite_tree(
        &self,
        mut unit: CompilationUnit,
        methods: Vec<IRMethod>,
        extraction: &Extraction,
        path: &Path,
        stages: &StageTracker,
    ) -> Result<OutputDocument, RewriteError> {
        let removed = remove_triggers(&mut unit);
        debug!(removed, "mapping triggers removed");

        let host = find_host_class(&unit)
            .ok_or_else(|| failure(path, stages, SynthesisFailure::NoHostClass))?;
        if let Some(decl) = host.resolve_mut(&mut unit) {
            promote_to_static(decl);
        }

        let required = extraction.required_namespaces();
        unit.usings = merge_imports(&unit.usings, required.iter().map(String::as_str));

        Ok(OutputDocument {
            unit,
            host: Some(host),
            methods,
        })
    }
}

/// Rewrite `document`, whose current text is `text`, against every source
/// file under `project_root`.
pub fn generate(
    document: &Path,
    text: impl Into<String>,
    project_root: impl Into<PathBuf>,
    options: RewriteOptions,
) -> Result<RewriteOutput, RewriteError> {
    let provider = DirectorySourceProvider::new(project_root);
    let draft = SourceText::new(document, text);
    DocumentRewriter::new(&provider, options).rewrite(&draft)
}

/// Drop every trigger directive from the unit and its namespaces. Returns
/// how many were removed.
pub(crate) fn remove_triggers(unit: &mut CompilationUnit) -> usize {
    let before = unit.usings.len();
    unit.usings.retain(|using| !is_mapping_trigger(using));
    before - unit.usings.len() + remove_namespace_triggers(&mut unit.members)
}

fn remove_namespace_triggers(members: &mut [NamespaceMember]) -> usize {
    let mut removed = 0;
    for member in members {
        if let NamespaceMember::Namespace(ns) = member {
            let before = ns.usings.len();
            ns.usings.retain(|using| !is_mapping_trigger(using));
            removed += before - ns.usings.len();
            removed += remove_namespace_triggers(&mut ns.members);
        }
    }
    removed
}

fn failure(document: &Path, stages: &StageTracker, reason: SynthesisFailure) -> RewriteError {
    debug!(reached = ?stages.current(), %reason, "rewrite aborted");
    RewriteError::SynthesisFailure {
        document: document.to_path_buf(),
        stage: stages.pending(),
        reason,
    }
}
