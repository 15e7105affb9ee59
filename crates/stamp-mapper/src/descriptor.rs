use stamp_binder::{ResolutionScope, SymbolStore, TypeId};
use stamp_parser::TypeSyntax;

/// A type named by a mapping trigger, resolved against the project.
///
/// An unresolved descriptor has no symbol and no base type; collecting its
/// members yields an empty set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub id: Option<TypeId>,
    /// Metadata-style fully qualified name, or the written text when unresolved
    pub qualified_name: String,
    /// Declaring namespace; the written qualifier when unresolved
    pub namespace: String,
    pub base: Option<TypeId>,
}

impl TypeDescriptor {
    pub fn resolve(store: &SymbolStore, ty: &TypeSyntax, scope: &ResolutionScope) -> Self {
        match store.resolve(ty, scope) {
            Some(id) => TypeDescriptor::for_symbol(store, id),
            None => TypeDescriptor::unresolved(ty),
        }
    }

    pub fn for_symbol(store: &SymbolStore, id: TypeId) -> Self {
        let symbol = store.symbol(id);
        TypeDescriptor {
            id: Some(id),
            qualified_name: symbol.qualified_name.clone(),
            namespace: symbol.namespace.clone(),
            base: store.base_type(id),
        }
    }

    pub fn unresolved(ty: &TypeSyntax) -> Self {
        TypeDescriptor {
            id: None,
            qualified_name: ty.to_string(),
            namespace: ty.qualifier().unwrap_or_default(),
            base: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}
