//! Member collection over a type and its base classes.
//!
//! Members of the type itself come first, then each base class in turn.
//! A member declared in a derived type hides every inherited member with the
//! same name, whatever its type. Only project-accessible instance members
//! are collected.

use rustc_hash::FxHashSet;
use stamp_binder::{SymbolStore, TypeDeclaration, TypeId};
use stamp_common::limits::MAX_INHERITANCE_DEPTH;
use stamp_parser::{
    AccessorKind, FieldDecl, MemberDecl, MemberKind, ModifierFlags, PropertyDecl, TypeKind,
};
use tracing::{debug, trace, warn};

use crate::descriptor::TypeDescriptor;
use crate::members::{Capability, MemberDescriptor, MemberSet};

pub struct MemberCollector<'a> {
    store: &'a SymbolStore,
}

impl<'a> MemberCollector<'a> {
    pub fn new(store: &'a SymbolStore) -> Self {
        MemberCollector { store }
    }

    /// Members of `ty` and its base classes that have capability `C`.
    pub fn collect<C: Capability>(&self, ty: &TypeDescriptor) -> MemberSet<C> {
        match ty.id {
            Some(id) => self.collect_from(id),
            None => MemberSet::new(),
        }
    }

    pub fn collect_from<C: Capability>(&self, id: TypeId) -> MemberSet<C> {
        let mut members = MemberSet::new();
        let mut hidden: FxHashSet<String> = FxHashSet::default();
        let mut visited: FxHashSet<TypeId> = FxHashSet::default();
        let mut current = Some(id);
        let mut depth = 0u32;

        while let Some(type_id) = current {
            if !visited.insert(type_id) {
                warn!(
                    type_name = %self.store.symbol(type_id).qualified_name,
                    "cyclic base class chain; member walk stopped"
                );
                break;
            }
            if depth > MAX_INHERITANCE_DEPTH {
                warn!(
                    type_name = %self.store.symbol(id).qualified_name,
                    "base class chain too deep; member walk stopped"
                );
                break;
            }

            let declared = self.declared_members(type_id);
            for member in &declared {
                if !hidden.contains(&member.name) && members.insert(member.clone()) {
                    trace!(member = %member, capability = C::NAME, "collected member");
                }
            }
            hidden.extend(declared.into_iter().map(|m| m.name));

            current = self.store.base_type(type_id);
            depth += 1;
        }

        debug!(
            type_name = %self.store.symbol(id).qualified_name,
            capability = C::NAME,
            count = members.len(),
            levels = depth,
            "members collected"
        );
        members
    }

    /// Accessible instance members declared directly on `id`, across all of
    /// its partial declarations, with both capability flags computed.
    pub fn declared_members(&self, id: TypeId) -> Vec<MemberDescriptor> {
        let symbol = self.store.symbol(id);
        let mut result = Vec::new();
        for declaration in &symbol.declarations {
            self.push_declaration_members(declaration, &mut result);
        }
        result
    }

    fn push_declaration_members(&self, declaration: &TypeDeclaration, out: &mut Vec<MemberDescriptor>) {
        let decl = &declaration.decl;
        let default_public = decl.kind == TypeKind::Interface;

        if matches!(decl.kind, TypeKind::Record | TypeKind::RecordStruct)
            && let Some(parameters) = &decl.parameters
        {
            for parameter in parameters {
                let ty = self.store.display_type(&parameter.ty, &declaration.scope);
                out.push(MemberDescriptor::new(parameter.name.as_str(), ty).with_access(true, true));
            }
        }

        for member in decl.members() {
            let MemberDecl::Member(member) = member else {
                continue;
            };
            match &member.kind {
                MemberKind::Property(property) => {
                    if let Some((readable, writable)) = property_access(property, default_public) {
                        let ty = self.store.display_type(&property.ty, &declaration.scope);
                        out.push(
                            MemberDescriptor::new(property.name.as_str(), ty)
                                .with_access(readable, writable),
                        );
                    }
                }
                MemberKind::Field(field) => {
                    if let Some((readable, writable)) = field_access(field, default_public) {
                        let ty = self.store.display_type(&field.ty, &declaration.scope);
                        for name in &field.names {
                            out.push(
                                MemberDescriptor::new(name.as_str(), ty.as_str())
                                    .with_access(readable, writable),
                            );
                        }
                    }
                }
                MemberKind::Other(_) => {}
            }
        }
    }
}

/// `(readable, writable)` for an accessible instance property.
fn property_access(property: &PropertyDecl, default_public: bool) -> Option<(bool, bool)> {
    let flags = property.modifier_flags();
    if flags.contains(ModifierFlags::STATIC) || !flags.is_project_accessible(default_public) {
        return None;
    }
    let accessor_visible = |kind: AccessorKind| {
        property.accessor(kind).is_some_and(|accessor| {
            let accessor_flags = ModifierFlags::from_modifiers(&accessor.modifiers);
            (accessor_flags & ModifierFlags::ACCESSIBILITY).is_empty()
                || accessor_flags.is_project_accessible(false)
        })
    };
    let readable = property.is_expression_bodied || accessor_visible(AccessorKind::Get);
    let writable = accessor_visible(AccessorKind::Set) || accessor_visible(AccessorKind::Init);
    Some((readable, writable))
}

/// `(readable, writable)` for an accessible instance field.
fn field_access(field: &FieldDecl, default_public: bool) -> Option<(bool, bool)> {
    let flags = field.modifier_flags();
    if flags.intersects(ModifierFlags::STATIC | ModifierFlags::CONST)
        || !flags.is_project_accessible(default_public)
    {
        return None;
    }
    Some((true, !flags.contains(ModifierFlags::READONLY)))
}
