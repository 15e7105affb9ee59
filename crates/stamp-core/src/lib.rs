//! The stamp mapping generator.
//!
//! `DocumentRewriter` turns every `using Name = (Source, Destination);`
//! directive of a C# document into a generated extension method
//! `Destination Name(this Source source)` that copies the matching members,
//! and returns the rewritten document text.
//!
//! ```text
//! stamp-binder   SymbolStore         project sources -> type symbols
//! stamp-mapper   MemberCollector     readable / writable members
//!                MappingSpecExtractor triggers -> MappingSpecification
//! stamp-emitter  MethodSynthesizer   specification -> method IR
//!                Printer             unit + methods -> text
//! stamp-core     DocumentRewriter    orchestration
//! ```

pub use stamp_binder as binder;
pub use stamp_emitter as emitter;
pub use stamp_mapper as mapper;
pub use stamp_parser as parser;

pub use stamp_binder::{
    DirectorySourceProvider, InMemorySourceProvider, SourceProvider, SourceText,
};
pub use stamp_common::{Diagnostic, LineMap};
pub use stamp_emitter::{BodyStyle, NewLineKind, PrinterOptions};
pub use stamp_mapper::MappingReport;

// Error taxonomy of a generation pass
mod error;
pub use error::{RewriteError, SynthesisFailure};

mod stage;
pub use stage::RewriteStage;

mod options;
pub use options::RewriteOptions;

// Document kind and project root detection
pub mod project;
pub use project::{ensure_csharp_document, find_project_root};

mod host;
pub use host::{find_host_class, promote_to_static};

mod imports;
pub use imports::merge_imports;

mod rewriter;
pub use rewriter::{DocumentRewriter, RewriteOutput, generate};

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod host_tests;

#[cfg(test)]
#[path = "tests/imports_tests.rs"]
mod imports_tests;
