//! Declaration binding: records every type declaration of a unit in the store.

use rustc_hash::FxHashMap;
use stamp_parser::{CompilationUnit, MemberDecl, NamespaceMember, TypeDecl};
use tracing::{debug, trace};

use crate::scope::ResolutionScope;
use crate::store::SymbolStore;
use crate::symbols::{FileId, TypeDeclaration, TypeId, TypeSymbol, join_qualified, metadata_name};

impl SymbolStore {
    pub(crate) fn bind_unit(&mut self, file: FileId, unit: &CompilationUnit) {
        for using in unit.usings.iter().filter(|u| u.is_global) {
            self.project_imports.add_project_directive(using);
        }
        let scope = ResolutionScope::for_unit(file, &unit.usings);
        self.bind_namespace_members(file, &unit.members, &scope);
    }

    fn bind_namespace_members(
        &mut self,
        file: FileId,
        members: &[NamespaceMember],
        scope: &ResolutionScope,
    ) {
        for member in members {
            match member {
                NamespaceMember::Namespace(ns) => {
                    let inner = scope.enter_namespace(&ns.name, &ns.usings);
                    self.declare_namespace(&inner.namespace);
                    self.bind_namespace_members(file, &ns.members, &inner);
                }
                NamespaceMember::Type(decl) => {
                    self.bind_type(file, decl, scope, None);
                }
                NamespaceMember::Raw(_) => {}
            }
        }
    }

    fn declare_namespace(&mut self, namespace: &str) {
        let mut current = namespace;
        while !current.is_empty() && self.namespaces.insert(current.to_string()) {
            current = match current.rfind('.') {
                Some(dot) => &current[..dot],
                None => "",
            };
        }
    }

    fn bind_type(
        &mut self,
        file: FileId,
        decl: &TypeDecl,
        scope: &ResolutionScope,
        containing: Option<TypeId>,
    ) -> TypeId {
        let metadata = metadata_name(&decl.name, decl.arity());
        let qualified_name = match containing {
            Some(outer) => join_qualified(&self.symbol(outer).qualified_name, &metadata),
            None => join_qualified(&scope.namespace, &metadata),
        };

        let id = match self.by_name.get(&qualified_name) {
            Some(&existing) => {
                debug!(type_name = %qualified_name, "merging partial declaration");
                existing
            }
            None => self.create_symbol(decl, scope, containing, qualified_name),
        };

        let body_scope = scope.enter_type(id);
        self.symbols[id.0 as usize]
            .declarations
            .push(TypeDeclaration {
                file,
                scope: body_scope.clone(),
                decl: decl.clone(),
            });

        for member in decl.members() {
            if let MemberDecl::Type(nested) = member {
                let nested_id = self.bind_type(file, nested, &body_scope, Some(id));
                self.symbols[id.0 as usize]
                    .nested_types
                    .insert(metadata_name(&nested.name, nested.arity()), nested_id);
            }
        }
        id
    }

    fn create_symbol(
        &mut self,
        decl: &TypeDecl,
        scope: &ResolutionScope,
        containing: Option<TypeId>,
        qualified_name: String,
    ) -> TypeId {
        let id = TypeId(self.symbols.len() as u32);
        let type_parameters: Vec<String> = decl
            .type_parameters
            .iter()
            .filter_map(|p| p.split_whitespace().last())
            .map(str::to_string)
            .collect();

        let (namespace, outer_display) = match containing {
            Some(outer) => {
                let outer = self.symbol(outer);
                (outer.namespace.clone(), outer.display_name.clone())
            }
            None => (scope.namespace.clone(), scope.namespace.clone()),
        };
        let mut display_name = join_qualified(&outer_display, &decl.name);
        if !type_parameters.is_empty() {
            display_name.push('<');
            display_name.push_str(&type_parameters.join(", "));
            display_name.push('>');
        }

        trace!(type_name = %qualified_name, kind = ?decl.kind, "declared type");
        self.by_name.insert(qualified_name.clone(), id);
        self.symbols.push(TypeSymbol {
            id,
            name: decl.name.clone(),
            arity: decl.arity(),
            namespace,
            containing_type: containing,
            kind: decl.kind,
            type_parameters,
            qualified_name,
            display_name,
            declarations: Vec::new(),
            nested_types: FxHashMap::default(),
        });
        id
    }
}
