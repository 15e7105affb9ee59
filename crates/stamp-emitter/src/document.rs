use stamp_parser::{CompilationUnit, NamespaceMember, TypeDecl};

use crate::ir::IRMethod;

/// Member indices from the compilation unit down to a type declaration:
/// each entry indexes the `members` of the unit or of the namespace reached
/// so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostPath(pub Vec<usize>);

impl HostPath {
    pub fn resolve<'u>(&self, unit: &'u CompilationUnit) -> Option<&'u TypeDecl> {
        let (last, namespaces) = self.0.split_last()?;
        let mut members = unit.members.as_slice();
        for &idx in namespaces {
            match members.get(idx)? {
                NamespaceMember::Namespace(ns) => members = &ns.members,
                _ => return None,
            }
        }
        match members.get(*last)? {
            NamespaceMember::Type(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn resolve_mut<'u>(&self, unit: &'u mut CompilationUnit) -> Option<&'u mut TypeDecl> {
        let (last, namespaces) = self.0.split_last()?;
        let mut members: &'u mut Vec<NamespaceMember> = &mut unit.members;
        for &idx in namespaces {
            members = match members.get_mut(idx)? {
                NamespaceMember::Namespace(ns) => &mut ns.members,
                _ => return None,
            };
        }
        match members.get_mut(*last)? {
            NamespaceMember::Type(decl) => Some(decl),
            _ => None,
        }
    }
}

/// A rewritten document ready to print: the unit plus the generated methods
/// and the class that receives them.
#[derive(Clone, Debug, Default)]
pub struct OutputDocument {
    pub unit: CompilationUnit,
    /// Host class of `methods`; `None` when nothing was generated
    pub host: Option<HostPath>,
    /// In trigger order
    pub methods: Vec<IRMethod>,
}

impl OutputDocument {
    /// A document printed without generated members.
    pub fn unchanged(unit: CompilationUnit) -> Self {
        OutputDocument {
            unit,
            host: None,
            methods: Vec::new(),
        }
    }

    pub fn host_type(&self) -> Option<&TypeDecl> {
        self.host.as_ref().and_then(|path| path.resolve(&self.unit))
    }
}
