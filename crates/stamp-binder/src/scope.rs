//! Lexical context for name lookup.

use stamp_parser::{TypeSyntax, UsingDirective};

use crate::symbols::{FileId, TypeId};

/// `using Name = Target;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasImport {
    pub name: String,
    pub target: TypeSyntax,
}

/// The using directives of one compilation unit or namespace body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportLayer {
    /// Namespace the directives appear in; empty at unit level
    pub namespace: String,
    pub aliases: Vec<AliasImport>,
    /// Imported namespaces as written
    pub namespaces: Vec<String>,
}

impl ImportLayer {
    pub fn new(namespace: impl Into<String>) -> Self {
        ImportLayer {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// Record a directive. `global using` directives are left to the
    /// project-wide layer; `using static` brings no type names into scope
    /// that the generator needs.
    pub fn add_directive(&mut self, using: &UsingDirective) {
        if using.is_global || using.is_static {
            return;
        }
        self.add_project_directive(using);
    }

    /// Record a directive regardless of its `global` flag.
    pub fn add_project_directive(&mut self, using: &UsingDirective) {
        if using.is_static {
            return;
        }
        match &using.alias {
            Some(alias) => self.aliases.push(AliasImport {
                name: alias.clone(),
                target: using.target.clone(),
            }),
            None => {
                let target = using.target_text();
                if !self.namespaces.contains(&target) {
                    self.namespaces.push(target);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.namespaces.is_empty()
    }

    pub fn alias(&self, name: &str) -> Option<&AliasImport> {
        self.aliases.iter().find(|alias| alias.name == name)
    }
}

/// Where a type reference appears: file, enclosing namespace, containing
/// type and the using directives in effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionScope {
    pub file: Option<FileId>,
    /// Enclosing namespace, dotted; empty for the global namespace
    pub namespace: String,
    pub containing_type: Option<TypeId>,
    /// Import layers from the innermost namespace body out to the unit
    pub imports: Vec<ImportLayer>,
}

impl ResolutionScope {
    /// The global namespace with no imports.
    pub fn global() -> Self {
        Self::default()
    }

    /// The top level of a compilation unit.
    pub fn for_unit(file: FileId, usings: &[UsingDirective]) -> Self {
        let mut layer = ImportLayer::new("");
        for using in usings {
            layer.add_directive(using);
        }
        ResolutionScope {
            file: Some(file),
            namespace: String::new(),
            containing_type: None,
            imports: vec![layer],
        }
    }

    /// A scope nested in `namespace` with its own using directives.
    pub fn enter_namespace(&self, name: &str, usings: &[UsingDirective]) -> Self {
        let namespace = if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.namespace)
        };
        let mut layer = ImportLayer::new(namespace.clone());
        for using in usings {
            layer.add_directive(using);
        }
        let mut imports = Vec::with_capacity(self.imports.len() + 1);
        imports.push(layer);
        imports.extend(self.imports.iter().cloned());
        ResolutionScope {
            file: self.file,
            namespace,
            containing_type: None,
            imports,
        }
    }

    /// The scope inside the body of type `id`.
    pub fn enter_type(&self, id: TypeId) -> Self {
        ResolutionScope {
            containing_type: Some(id),
            ..self.clone()
        }
    }

    /// The scope an alias declared in `imports[layer]` resolves its target in:
    /// that layer and everything outside it, without containing types.
    pub(crate) fn alias_target_scope(&self, layer: usize) -> Self {
        let namespace = self
            .imports
            .get(layer)
            .map(|l| l.namespace.clone())
            .unwrap_or_default();
        ResolutionScope {
            file: self.file,
            namespace,
            containing_type: None,
            imports: self.imports.get(layer..).map(<[_]>::to_vec).unwrap_or_default(),
        }
    }

    /// Enclosing namespaces from innermost to outermost, excluding the global namespace.
    pub fn enclosing_namespaces(&self) -> Vec<&str> {
        let mut result = Vec::new();
        let mut current = self.namespace.as_str();
        while !current.is_empty() {
            result.push(current);
            current = match current.rfind('.') {
                Some(dot) => &current[..dot],
                None => "",
            };
        }
        result
    }
}
