//! Code generation for the stamp mapping generator.
//!
//! Mapping specifications are lowered to a small IR of C# methods
//! (`MethodSynthesizer`), which `IRPrinter` renders. `Printer` re-serializes a
//! whole compilation unit with the generated methods placed in their host
//! class.

pub mod options;
pub use options::{BodyStyle, NewLineKind, PrinterOptions};

pub mod source_writer;
pub use source_writer::SourceWriter;

pub mod ir;
pub use ir::{IRBody, IRInitializer, IRMethod, IRNode, IRParam};

mod ir_printer;
pub use ir_printer::IRPrinter;

mod synthesizer;
pub use synthesizer::{MethodSynthesizer, SOURCE_PARAMETER};

mod document;
pub use document::{HostPath, OutputDocument};

mod printer;
pub use printer::Printer;

#[cfg(test)]
#[path = "tests/source_writer_tests.rs"]
mod source_writer_tests;
