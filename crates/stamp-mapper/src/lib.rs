//! Mapping analysis for the stamp mapping generator.
//!
//! - `MemberCollector` walks a type and its base classes and yields the
//!   members code in the same project can read or assign.
//! - `MappingSpecExtractor` finds the `using Name = (Source, Destination);`
//!   triggers of a document and pairs the readable members of the source
//!   with the writable members of the destination.

mod members;
pub use members::{Capability, MemberDescriptor, MemberSet, Readable, Writable};

mod descriptor;
pub use descriptor::TypeDescriptor;

mod collector;
pub use collector::MemberCollector;

mod extractor;
pub use extractor::{
    Extraction, MappingSpecExtractor, MappingSpecification, Trigger, TypeReference,
    is_mapping_trigger, trigger_pair,
};

mod report;
pub use report::{MappingReport, MemberReport, SpecificationReport, TypeReport};
