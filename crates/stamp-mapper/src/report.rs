//! Serializable summary of the mappings found in a document.

use serde::Serialize;

use crate::extractor::{Extraction, MappingSpecification, TypeReference};

#[derive(Clone, Debug, Serialize)]
pub struct MappingReport {
    pub document: String,
    pub specifications: Vec<SpecificationReport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpecificationReport {
    pub method: String,
    pub source: TypeReport,
    pub destination: TypeReport,
    /// Matched members sorted by name
    pub members: Vec<MemberReport>,
    pub required_namespaces: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypeReport {
    pub written: String,
    pub display: String,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_hint: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MemberReport {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl MappingReport {
    pub fn new(document: impl Into<String>, extraction: &Extraction) -> Self {
        MappingReport {
            document: document.into(),
            specifications: extraction
                .specifications
                .iter()
                .map(SpecificationReport::from)
                .collect(),
        }
    }
}

impl From<&MappingSpecification> for SpecificationReport {
    fn from(spec: &MappingSpecification) -> Self {
        let mut members: Vec<MemberReport> = spec
            .members
            .iter()
            .map(|m| MemberReport {
                name: m.name.clone(),
                ty: m.ty.clone(),
            })
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.ty.cmp(&b.ty)));
        SpecificationReport {
            method: spec.method_name.clone(),
            source: TypeReport::from(&spec.source),
            destination: TypeReport::from(&spec.destination),
            members,
            required_namespaces: spec.required_namespaces.iter().cloned().collect(),
        }
    }
}

impl From<&TypeReference> for TypeReport {
    fn from(reference: &TypeReference) -> Self {
        TypeReport {
            written: reference.written.to_string(),
            display: reference.display_name.clone(),
            resolved: reference.is_resolved(),
            qualified_name: reference
                .is_resolved()
                .then(|| reference.descriptor.qualified_name.clone()),
            namespace_hint: reference.namespace_hint.clone(),
        }
    }
}
