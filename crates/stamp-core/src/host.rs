//! The class that receives generated methods.

use stamp_emitter::HostPath;
use stamp_parser::{CompilationUnit, NamespaceMember, TypeDecl, TypeKind};
use tracing::debug;

const STATIC: &str = "static";
const PARTIAL: &str = "partial";
/// Modifiers `static` cannot be combined with.
const SUBSUMED_BY_STATIC: &[&str] = &["abstract", "sealed"];

/// The first class of `unit` in document order, ignoring nested types.
pub fn find_host_class(unit: &CompilationUnit) -> Option<HostPath> {
    let mut path = Vec::new();
    find_in(&unit.members, &mut path).then_some(HostPath(path))
}

fn find_in(members: &[NamespaceMember], path: &mut Vec<usize>) -> bool {
    for (idx, member) in members.iter().enumerate() {
        path.push(idx);
        let found = match member {
            NamespaceMember::Type(decl) => decl.kind == TypeKind::Class,
            NamespaceMember::Namespace(ns) => find_in(&ns.members, path),
            NamespaceMember::Raw(_) => false,
        };
        if found {
            return true;
        }
        path.pop();
    }
    false
}

/// Make `decl` a static class. Returns false when it already was.
pub fn promote_to_static(decl: &mut TypeDecl) -> bool {
    if decl.modifiers.iter().any(|m| m == STATIC) {
        return false;
    }
    decl.modifiers
        .retain(|m| !SUBSUMED_BY_STATIC.contains(&m.as_str()));
    let at = decl
        .modifiers
        .iter()
        .position(|m| m == PARTIAL)
        .unwrap_or(decl.modifiers.len());
    decl.modifiers.insert(at, STATIC.to_string());
    debug!(class = %decl.name, modifiers = ?decl.modifiers, "host class promoted to static");
    true
}
