//! Type name resolution and display.
//!
//! A simple name is looked up in order: using aliases, containing types,
//! enclosing namespaces (innermost first), the global namespace, namespaces
//! imported by the file, then project-wide `global using` namespaces. The
//! first match wins.

use stamp_common::limits::MAX_ALIAS_RESOLUTION_DEPTH;
use stamp_parser::{NameSegment, TypeSyntax};
use tracing::{trace, warn};

use crate::predefined::keyword_for_system_type;
use crate::scope::{AliasImport, ResolutionScope};
use crate::store::SymbolStore;
use crate::symbols::{TypeId, join_qualified, metadata_name};

/// Metadata key for a run of name segments: `Outer`1.Inner`.
fn segments_key(segments: &[NameSegment]) -> String {
    segments
        .iter()
        .map(|s| metadata_name(&s.name, s.arity()))
        .collect::<Vec<_>>()
        .join(".")
}

impl SymbolStore {
    /// Resolve a type reference written in `scope` to a project type.
    ///
    /// Predefined types, tuples, arrays and names declared outside the
    /// project resolve to `None`. `T?` resolves like `T`.
    pub fn resolve(&self, ty: &TypeSyntax, scope: &ResolutionScope) -> Option<TypeId> {
        let resolved = self.resolve_with_depth(ty, scope, 0);
        trace!(type_ref = %ty, resolved = ?resolved.map(|id| &self.symbol(id).qualified_name), "resolve");
        resolved
    }

    fn resolve_with_depth(
        &self,
        ty: &TypeSyntax,
        scope: &ResolutionScope,
        depth: u32,
    ) -> Option<TypeId> {
        if depth > MAX_ALIAS_RESOLUTION_DEPTH {
            warn!(type_ref = %ty, "alias chain too deep; treating the name as unresolved");
            return None;
        }
        match ty {
            TypeSyntax::Nullable(inner) => self.resolve_with_depth(inner, scope, depth),
            // `global::` and extern aliases name the root namespace.
            TypeSyntax::Named {
                alias: Some(_),
                segments,
            } => self.lookup(&segments_key(segments)),
            TypeSyntax::Named {
                alias: None,
                segments,
            } => self.resolve_named(segments, scope, depth),
            _ => None,
        }
    }

    fn resolve_named(
        &self,
        segments: &[NameSegment],
        scope: &ResolutionScope,
        depth: u32,
    ) -> Option<TypeId> {
        let (head, rest) = segments.split_first()?;
        if rest.is_empty() {
            return self.resolve_simple(head, scope, depth);
        }

        let key = segments_key(segments);
        if let Some(id) = self.lookup(&key) {
            return Some(id);
        }
        for namespace in scope.enclosing_namespaces() {
            if let Some(id) = self.lookup(&join_qualified(namespace, &key)) {
                return Some(id);
            }
        }

        let rest_key = segments_key(rest);
        if head.type_arguments.is_empty()
            && let Some((layer, alias)) = self.find_alias(&head.name, scope)
        {
            let alias_scope = self.alias_scope(scope, layer);
            let prefix = match self.resolve_with_depth(&alias.target, &alias_scope, depth + 1) {
                Some(target) => self.symbol(target).qualified_name.clone(),
                None => alias.target.to_string(),
            };
            if let Some(id) = self.lookup(&join_qualified(&prefix, &rest_key)) {
                return Some(id);
            }
        }

        for namespace in self.imported_namespaces(scope) {
            if let Some(id) = self.lookup(&join_qualified(&namespace, &key)) {
                return Some(id);
            }
        }

        // `Outer.Inner` where `Outer` is itself in scope.
        let outer = self.resolve_simple(head, scope, depth)?;
        self.lookup(&join_qualified(&self.symbol(outer).qualified_name, &rest_key))
    }

    fn resolve_simple(
        &self,
        segment: &NameSegment,
        scope: &ResolutionScope,
        depth: u32,
    ) -> Option<TypeId> {
        let key = metadata_name(&segment.name, segment.arity());

        if segment.type_arguments.is_empty()
            && let Some((layer, alias)) = self.find_alias(&segment.name, scope)
        {
            let alias_scope = self.alias_scope(scope, layer);
            return self.resolve_with_depth(&alias.target, &alias_scope, depth + 1);
        }

        let mut containing = scope.containing_type;
        while let Some(id) = containing {
            let symbol = self.symbol(id);
            if let Some(&nested) = symbol.nested_types.get(&key) {
                return Some(nested);
            }
            containing = symbol.containing_type;
        }

        for namespace in scope.enclosing_namespaces() {
            if let Some(id) = self.lookup(&join_qualified(namespace, &key)) {
                return Some(id);
            }
        }
        if let Some(id) = self.lookup(&key) {
            return Some(id);
        }
        for namespace in self.imported_namespaces(scope) {
            if let Some(id) = self.lookup(&join_qualified(&namespace, &key)) {
                return Some(id);
            }
        }
        None
    }

    /// The alias named `name` visible in `scope`, with the index of the
    /// import layer declaring it (`None` for a project-wide alias).
    fn find_alias<'a>(
        &'a self,
        name: &str,
        scope: &'a ResolutionScope,
    ) -> Option<(Option<usize>, &'a AliasImport)> {
        scope
            .imports
            .iter()
            .enumerate()
            .find_map(|(idx, layer)| layer.alias(name).map(|alias| (Some(idx), alias)))
            .or_else(|| self.project_imports.alias(name).map(|alias| (None, alias)))
    }

    fn alias_scope(&self, scope: &ResolutionScope, layer: Option<usize>) -> ResolutionScope {
        match layer {
            Some(layer) => scope.alias_target_scope(layer),
            None => ResolutionScope {
                file: scope.file,
                ..ResolutionScope::global()
            },
        }
    }

    /// Namespaces imported into `scope`, innermost layer first, then the
    /// project-wide ones. Relative using targets are resolved against the
    /// namespace the directive appears in.
    fn imported_namespaces(&self, scope: &ResolutionScope) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        for layer in &scope.imports {
            let layer_scope = ResolutionScope {
                namespace: layer.namespace.clone(),
                ..ResolutionScope::global()
            };
            for written in &layer.namespaces {
                let resolved = self.resolve_namespace_name(written, &layer_scope);
                if !result.contains(&resolved) {
                    result.push(resolved);
                }
            }
        }
        for written in &self.project_imports.namespaces {
            let resolved = self.resolve_namespace_name(written, &ResolutionScope::global());
            if !result.contains(&resolved) {
                result.push(resolved);
            }
        }
        result
    }

    fn resolve_namespace_name(&self, written: &str, scope: &ResolutionScope) -> String {
        let written = written.strip_prefix("global::").unwrap_or(written);
        for namespace in scope.enclosing_namespaces() {
            let candidate = join_qualified(namespace, written);
            if self.namespaces.contains(&candidate) {
                return candidate;
            }
        }
        written.to_string()
    }

    /// Whether `namespace` is imported into `scope`.
    pub fn imports_namespace(&self, scope: &ResolutionScope, namespace: &str) -> bool {
        self.imported_namespaces(scope).iter().any(|ns| ns == namespace)
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Render a type reference the way member types are compared: project
    /// types fully qualified, framework primitives by keyword, other names
    /// as written.
    pub fn display_type(&self, ty: &TypeSyntax, scope: &ResolutionScope) -> String {
        match ty {
            TypeSyntax::Predefined(keyword) => keyword.clone(),
            TypeSyntax::Named { alias, segments } => {
                self.display_named(ty, alias.as_deref(), segments, scope)
            }
            TypeSyntax::Nullable(inner) => format!("{}?", self.display_type(inner, scope)),
            TypeSyntax::Pointer(inner) => format!("{}*", self.display_type(inner, scope)),
            TypeSyntax::Array { element, rank } => format!(
                "{}[{}]",
                self.display_type(element, scope),
                ",".repeat(rank.saturating_sub(1) as usize)
            ),
            TypeSyntax::Tuple(elements) => {
                let parts: Vec<String> = elements
                    .iter()
                    .map(|element| {
                        let ty = self.display_type(&element.ty, scope);
                        match &element.name {
                            Some(name) => format!("{ty} {name}"),
                            None => ty,
                        }
                    })
                    .collect();
                format!("({})", parts.join(", "))
            }
        }
    }

    fn display_named(
        &self,
        ty: &TypeSyntax,
        alias: Option<&str>,
        segments: &[NameSegment],
        scope: &ResolutionScope,
    ) -> String {
        if let Some(id) = self.resolve(ty, scope) {
            return self.display_symbol(id, segments, scope);
        }

        if segments.iter().all(|s| s.type_arguments.is_empty()) {
            let dotted = segments
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(".");
            if let Some(keyword) = keyword_for_system_type(&dotted) {
                return keyword.to_string();
            }
            if segments.len() == 1
                && self.imports_namespace(scope, "System")
                && let Some(keyword) = keyword_for_system_type(&format!("System.{dotted}"))
            {
                return keyword.to_string();
            }
        }

        let mut out = String::new();
        if let Some(alias) = alias {
            out.push_str(alias);
            out.push_str("::");
        }
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&segment.name);
            self.push_type_arguments(&mut out, &segment.type_arguments, scope);
        }
        out
    }

    /// `Ns.Outer<A>.Inner`, taking type arguments from the written segments
    /// that line up with the end of the containing-type chain.
    fn display_symbol(&self, id: TypeId, written: &[NameSegment], scope: &ResolutionScope) -> String {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(type_id) = current {
            chain.push(type_id);
            current = self.symbol(type_id).containing_type;
        }
        chain.reverse();

        let mut out = self.symbol(chain[0]).namespace.clone();
        let offset = chain.len() as isize - written.len() as isize;
        for (i, &type_id) in chain.iter().enumerate() {
            let symbol = self.symbol(type_id);
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(&symbol.name);

            let written_segment = usize::try_from(i as isize - offset)
                .ok()
                .and_then(|idx| written.get(idx))
                .filter(|segment| segment.arity() == symbol.arity);
            match written_segment {
                Some(segment) => self.push_type_arguments(&mut out, &segment.type_arguments, scope),
                None if !symbol.type_parameters.is_empty() => {
                    out.push('<');
                    out.push_str(&symbol.type_parameters.join(", "));
                    out.push('>');
                }
                None => {}
            }
        }
        out
    }

    fn push_type_arguments(&self, out: &mut String, arguments: &[TypeSyntax], scope: &ResolutionScope) {
        if arguments.is_empty() {
            return;
        }
        let rendered: Vec<String> = arguments
            .iter()
            .map(|arg| self.display_type(arg, scope))
            .collect();
        out.push('<');
        out.push_str(&rendered.join(", "));
        out.push('>');
    }

    // =========================================================================
    // Inheritance
    // =========================================================================

    /// The base class of a class or record, if it is declared in the project.
    ///
    /// Interfaces in the base list are not base types. The base list
    /// resolves outside the type body, so a type never names itself.
    pub fn base_type(&self, id: TypeId) -> Option<TypeId> {
        let symbol = self.symbol(id);
        if !symbol.kind.can_be_base_class() {
            return None;
        }
        for declaration in &symbol.declarations {
            let scope = ResolutionScope {
                containing_type: symbol.containing_type,
                ..declaration.scope.clone()
            };
            for base in &declaration.decl.base_types {
                let Some(base_id) = self.resolve(&base.ty, &scope) else {
                    continue;
                };
                if base_id != id && self.symbol(base_id).kind.can_be_base_class() {
                    return Some(base_id);
                }
            }
        }
        None
    }
}
