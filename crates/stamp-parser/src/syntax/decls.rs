//! Declaration nodes.

use stamp_common::Span;

use super::modifiers::ModifierFlags;
use super::types::TypeSyntax;

/// One line of verbatim text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerbatimLine {
    pub text: String,
    /// False for lines that start inside a multi-line string literal; those
    /// are printed exactly as written.
    pub reindent: bool,
}

/// Source text kept as written, dedented relative to its first token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verbatim {
    pub lines: Vec<VerbatimLine>,
}

impl Verbatim {
    /// Verbatim text from plain lines, all re-indentable.
    pub fn from_lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Verbatim {
            lines: lines
                .into_iter()
                .map(|text| VerbatimLine {
                    text: text.into(),
                    reindent: true,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.text.trim().is_empty())
    }

    /// The text joined with `\n`, without indentation.
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A declaration the parser keeps only as text (extern aliases, assembly
/// attributes, delegates, top-level statements).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDecl {
    pub leading_trivia: Vec<String>,
    pub text: Verbatim,
    pub span: Span,
}

/// `using System;`, `global using static Foo;`, `using Map = (A, B);`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsingDirective {
    pub leading_trivia: Vec<String>,
    pub is_global: bool,
    pub is_static: bool,
    pub alias: Option<String>,
    pub target: TypeSyntax,
    pub span: Span,
}

impl UsingDirective {
    /// A plain `using Namespace;` directive.
    pub fn namespace(name: &str) -> UsingDirective {
        UsingDirective {
            leading_trivia: Vec::new(),
            is_global: false,
            is_static: false,
            alias: None,
            target: TypeSyntax::name(name),
            span: Span::default(),
        }
    }

    /// Whether this imports a namespace (no alias, not `static`).
    pub fn is_plain(&self) -> bool {
        self.alias.is_none() && !self.is_static
    }

    /// The target as written, e.g. `System.Collections.Generic`.
    pub fn target_text(&self) -> String {
        self.target.to_string()
    }
}

/// The compilation unit: one parsed `.cs` document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    pub file_name: String,
    pub externs: Vec<RawDecl>,
    pub usings: Vec<UsingDirective>,
    pub attributes: Vec<RawDecl>,
    pub members: Vec<NamespaceMember>,
    /// Comments and directives after the last declaration
    pub trailing_trivia: Vec<String>,
    pub span: Span,
}

impl CompilationUnit {
    /// Every using directive in document order, with the namespace path that encloses it.
    pub fn all_usings(&self) -> Vec<(Vec<String>, &UsingDirective)> {
        let mut result: Vec<(Vec<String>, &UsingDirective)> =
            self.usings.iter().map(|u| (Vec::new(), u)).collect();
        collect_namespace_usings(&self.members, &mut Vec::new(), &mut result);
        result
    }

    /// Iterate the type declarations that are not nested in other types,
    /// depth-first in document order, with their enclosing namespace path.
    pub fn top_level_types(&self) -> Vec<(Vec<String>, &TypeDecl)> {
        let mut result = Vec::new();
        collect_top_level_types(&self.members, &mut Vec::new(), &mut result);
        result
    }
}

fn collect_namespace_usings<'a>(
    members: &'a [NamespaceMember],
    path: &mut Vec<String>,
    out: &mut Vec<(Vec<String>, &'a UsingDirective)>,
) {
    for member in members {
        if let NamespaceMember::Namespace(ns) = member {
            path.push(ns.name.clone());
            out.extend(ns.usings.iter().map(|u| (path.clone(), u)));
            collect_namespace_usings(&ns.members, path, out);
            path.pop();
        }
    }
}

fn collect_top_level_types<'a>(
    members: &'a [NamespaceMember],
    path: &mut Vec<String>,
    out: &mut Vec<(Vec<String>, &'a TypeDecl)>,
) {
    for member in members {
        match member {
            NamespaceMember::Namespace(ns) => {
                path.push(ns.name.clone());
                collect_top_level_types(&ns.members, path, out);
                path.pop();
            }
            NamespaceMember::Type(ty) => out.push((path.clone(), ty)),
            NamespaceMember::Raw(_) => {}
        }
    }
}

/// Members of a compilation unit or namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamespaceMember {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    Raw(RawDecl),
}

/// `namespace A.B { ... }` or file-scoped `namespace A.B;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub leading_trivia: Vec<String>,
    /// Dotted name as written
    pub name: String,
    pub is_file_scoped: bool,
    pub externs: Vec<RawDecl>,
    pub usings: Vec<UsingDirective>,
    pub members: Vec<NamespaceMember>,
    pub closing_trivia: Vec<String>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    /// `record` or `record class`
    Record,
    RecordStruct,
}

impl TypeKind {
    /// Whether a type of this kind can appear as a base class.
    pub const fn can_be_base_class(self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Record)
    }
}

/// A parameter of a record or primary constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub ty: TypeSyntax,
    pub name: String,
    /// Default value text as written
    pub default: Option<String>,
}

/// An entry of a base list: `Base`, `IFoo<T>`, or a record base `Base(X, Y)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseType {
    pub ty: TypeSyntax,
    /// Argument list text of a record base, including parentheses
    pub arguments: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeBody {
    Members(Vec<MemberDecl>),
    /// Enum members, kept as written
    Enum(Verbatim),
    /// `record Point(int X, int Y);`
    None,
}

/// A class, struct, interface, enum or record declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub leading_trivia: Vec<String>,
    /// Attribute lists as written, one entry per `[...]`
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub kind: TypeKind,
    /// Declaring keyword(s) as written: `class`, `record struct`, ...
    pub keyword: String,
    pub name: String,
    pub type_parameters: Vec<String>,
    pub parameters: Option<Vec<Parameter>>,
    pub base_types: Vec<BaseType>,
    pub constraints: Vec<String>,
    pub body: TypeBody,
    pub closing_trivia: Vec<String>,
    pub span: Span,
}

impl TypeDecl {
    pub fn modifier_flags(&self) -> ModifierFlags {
        ModifierFlags::from_modifiers(&self.modifiers)
    }

    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    pub fn members(&self) -> &[MemberDecl] {
        match &self.body {
            TypeBody::Members(members) => members,
            _ => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Get,
    Set,
    Init,
    Add,
    Remove,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accessor {
    pub kind: AccessorKind,
    pub modifiers: Vec<String>,
}

/// `public string Name { get; private set; } = "";`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDecl {
    pub modifiers: Vec<String>,
    pub ty: TypeSyntax,
    pub name: String,
    pub accessors: Vec<Accessor>,
    /// `public int X => _x;`
    pub is_expression_bodied: bool,
    pub has_initializer: bool,
}

impl PropertyDecl {
    pub fn modifier_flags(&self) -> ModifierFlags {
        ModifierFlags::from_modifiers(&self.modifiers)
    }

    pub fn accessor(&self, kind: AccessorKind) -> Option<&Accessor> {
        self.accessors.iter().find(|a| a.kind == kind)
    }
}

/// `public int A, B = 2;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub modifiers: Vec<String>,
    pub ty: TypeSyntax,
    pub names: Vec<String>,
}

impl FieldDecl {
    pub fn modifier_flags(&self) -> ModifierFlags {
        ModifierFlags::from_modifiers(&self.modifiers)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OtherMemberKind {
    Method,
    Constructor,
    Destructor,
    Operator,
    Indexer,
    Event,
    Delegate,
    /// Explicit interface implementation (`int IFoo.Bar { get; }`)
    ExplicitImplementation,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Property(PropertyDecl),
    Field(FieldDecl),
    Other(OtherMemberKind),
}

/// A member of a class, struct, interface or record body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberDecl {
    /// A nested type, printed structurally
    Type(TypeDecl),
    /// Any other member; printed from its verbatim text
    Member(Member),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub leading_trivia: Vec<String>,
    pub kind: MemberKind,
    pub text: Verbatim,
    pub span: Span,
}
