//! Mapping trigger recognition.
//!
//! A trigger is a using alias whose target is a tuple of exactly two
//! unnamed types: `using ToDto = (Models.Person, Dtos.PersonDto);`. The
//! alias names the generated method, the first element is the source type
//! and the second the destination type.

use indexmap::IndexSet;
use stamp_binder::{FileId, ResolutionScope, SymbolStore, TypeId};
use stamp_common::Span;
use stamp_parser::{TypeSyntax, UsingDirective};
use tracing::{debug, debug_span, warn};

use crate::collector::MemberCollector;
use crate::descriptor::TypeDescriptor;
use crate::members::{MemberDescriptor, MemberSet, Readable, Writable};

/// The source and destination types of a trigger, or `None` when the
/// directive does not have the trigger shape.
pub fn trigger_pair(using: &UsingDirective) -> Option<(&TypeSyntax, &TypeSyntax)> {
    if using.alias.is_none() || using.is_static {
        return None;
    }
    match &using.target {
        TypeSyntax::Tuple(elements)
            if elements.len() == 2 && elements.iter().all(|e| e.name.is_none()) =>
        {
            Some((&elements[0].ty, &elements[1].ty))
        }
        _ => None,
    }
}

pub fn is_mapping_trigger(using: &UsingDirective) -> bool {
    trigger_pair(using).is_some()
}

/// A trigger directive found in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    pub alias: String,
    /// Enclosing namespace declaration names, outermost first; empty at unit level
    pub namespace_path: Vec<String>,
    pub span: Span,
}

/// A type named in a trigger, as written and as resolved.
#[derive(Clone, Debug)]
pub struct TypeReference {
    pub written: TypeSyntax,
    /// The reference with its namespace qualifier removed, as emitted in code
    pub emitted: String,
    /// Comparable display form (`Foo.Bar`, `int`)
    pub display_name: String,
    /// Namespace to import so that `emitted` names the type
    pub namespace_hint: Option<String>,
    pub descriptor: TypeDescriptor,
}

impl TypeReference {
    pub fn resolve(store: &SymbolStore, written: &TypeSyntax, scope: &ResolutionScope) -> Self {
        let descriptor = TypeDescriptor::resolve(store, written, scope);
        let display_name = store.display_type(written, scope);
        let (emitted, namespace_hint) = match descriptor.id {
            Some(id) => emitted_for_symbol(store, id, written),
            None => emitted_as_written(written),
        };
        TypeReference {
            written: written.clone(),
            emitted,
            display_name,
            namespace_hint,
            descriptor,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.descriptor.is_resolved()
    }
}

/// Number of type names from the outermost containing type down to `id`.
fn type_chain_len(store: &SymbolStore, id: TypeId) -> usize {
    let mut len = 1;
    let mut current = store.symbol(id).containing_type;
    while let Some(outer) = current {
        len += 1;
        current = store.symbol(outer).containing_type;
    }
    len
}

fn emitted_for_symbol(
    store: &SymbolStore,
    id: TypeId,
    written: &TypeSyntax,
) -> (String, Option<String>) {
    match written {
        TypeSyntax::Nullable(inner) => {
            let (emitted, hint) = emitted_for_symbol(store, id, inner);
            (format!("{emitted}?"), hint)
        }
        TypeSyntax::Named { alias, segments } => {
            let chain = type_chain_len(store, id);
            if segments.len() > chain {
                let namespace = store.symbol(id).namespace.clone();
                let stripped = written.strip_leading_segments(segments.len() - chain);
                let hint = (!namespace.is_empty()).then_some(namespace);
                (stripped.to_string(), hint)
            } else if alias.is_some() {
                let namespace = store.symbol(id).namespace.clone();
                let stripped = written.strip_leading_segments(0);
                (stripped.to_string(), (!namespace.is_empty()).then_some(namespace))
            } else {
                (written.to_string(), None)
            }
        }
        other => (other.to_string(), None),
    }
}

fn emitted_as_written(written: &TypeSyntax) -> (String, Option<String>) {
    match written {
        TypeSyntax::Nullable(inner) => {
            let (emitted, hint) = emitted_as_written(inner);
            (format!("{emitted}?"), hint)
        }
        TypeSyntax::Named { segments, .. } if segments.len() > 1 => (
            written.strip_leading_segments(segments.len() - 1).to_string(),
            written.qualifier(),
        ),
        TypeSyntax::Named { .. } => (written.strip_leading_segments(0).to_string(), None),
        other => (other.to_string(), None),
    }
}

/// One method to generate.
#[derive(Clone, Debug)]
pub struct MappingSpecification {
    pub method_name: String,
    pub source: TypeReference,
    pub destination: TypeReference,
    /// Members readable on the source and writable on the destination,
    /// unordered; the synthesizer sorts them
    pub members: IndexSet<MemberDescriptor>,
    /// Namespaces the generated code needs imported
    pub required_namespaces: IndexSet<String>,
    pub trigger: Trigger,
}

/// Everything found in one document.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    /// In trigger order
    pub specifications: Vec<MappingSpecification>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }

    pub fn triggers(&self) -> impl Iterator<Item = &Trigger> {
        self.specifications.iter().map(|spec| &spec.trigger)
    }

    /// Every required namespace, first occurrence order, without duplicates.
    pub fn required_namespaces(&self) -> IndexSet<String> {
        self.specifications
            .iter()
            .flat_map(|spec| spec.required_namespaces.iter().cloned())
            .collect()
    }
}

pub struct MappingSpecExtractor<'a> {
    store: &'a SymbolStore,
    collector: MemberCollector<'a>,
}

impl<'a> MappingSpecExtractor<'a> {
    pub fn new(store: &'a SymbolStore) -> Self {
        MappingSpecExtractor {
            store,
            collector: MemberCollector::new(store),
        }
    }

    /// Build a specification for every trigger in `file`, in document order.
    pub fn extract(&self, file: FileId) -> Extraction {
        let source_file = self.store.file(file);
        let _span = debug_span!("extract_specs", path = %source_file.path.display()).entered();

        let mut specifications = Vec::new();
        for (path, using) in source_file.unit.all_usings() {
            let Some((source, destination)) = trigger_pair(using) else {
                continue;
            };
            let Some(alias) = using.alias.clone() else {
                continue;
            };
            let scope = self.store.scope_for(file, &path);
            let trigger = Trigger {
                alias,
                namespace_path: path,
                span: using.span,
            };
            specifications.push(self.specification(trigger, source, destination, &scope));
        }

        debug!(count = specifications.len(), "mapping triggers found");
        Extraction { specifications }
    }

    fn specification(
        &self,
        trigger: Trigger,
        source: &TypeSyntax,
        destination: &TypeSyntax,
        scope: &ResolutionScope,
    ) -> MappingSpecification {
        let source = TypeReference::resolve(self.store, source, scope);
        let destination = TypeReference::resolve(self.store, destination, scope);
        for reference in [&source, &destination] {
            if !reference.is_resolved() {
                warn!(
                    method = %trigger.alias,
                    type_ref = %reference.written,
                    "type not found in project; no members on this side"
                );
            }
        }

        let readable: MemberSet<Readable> = self.collector.collect(&source.descriptor);
        let writable: MemberSet<Writable> = self.collector.collect(&destination.descriptor);
        let members = readable.intersect(&writable);

        let required_namespaces: IndexSet<String> = [&source, &destination]
            .into_iter()
            .filter_map(|reference| reference.namespace_hint.clone())
            .collect();

        debug!(
            method = %trigger.alias,
            source = %source.display_name,
            destination = %destination.display_name,
            readable = readable.len(),
            writable = writable.len(),
            matched = members.len(),
            "mapping specification"
        );

        MappingSpecification {
            method_name: trigger.alias.clone(),
            source,
            destination,
            members,
            required_namespaces,
            trigger,
        }
    }
}
