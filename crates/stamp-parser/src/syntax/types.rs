//! Type syntax: the written form of a type reference.

use std::fmt;

use smallvec::SmallVec;

/// One `.`-separated segment of a type name, with its type arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NameSegment {
    pub name: String,
    pub type_arguments: Vec<TypeSyntax>,
}

impl NameSegment {
    pub fn new(name: impl Into<String>) -> Self {
        NameSegment {
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    pub fn arity(&self) -> usize {
        self.type_arguments.len()
    }
}

/// An element of a tuple type: `(int Id, string)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub ty: TypeSyntax,
    pub name: Option<String>,
}

/// A type reference as written in source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeSyntax {
    /// `int`, `string`, `object`, ...
    Predefined(String),
    /// `Foo.Bar<Baz>`, optionally alias-qualified (`global::Foo`)
    Named {
        alias: Option<String>,
        segments: SmallVec<[NameSegment; 2]>,
    },
    /// `T[]`, `T[,]`; `rank` is the number of dimensions
    Array { element: Box<TypeSyntax>, rank: u32 },
    /// `T?`
    Nullable(Box<TypeSyntax>),
    /// `T*`
    Pointer(Box<TypeSyntax>),
    /// `(A, B name)`
    Tuple(Vec<TupleElement>),
}

impl TypeSyntax {
    /// A simple or dotted name without type arguments: `TypeSyntax::name("Foo.Bar")`.
    pub fn name(dotted: &str) -> TypeSyntax {
        TypeSyntax::Named {
            alias: None,
            segments: dotted.split('.').map(NameSegment::new).collect(),
        }
    }

    /// Name segments of a named type; empty for other forms.
    pub fn segments(&self) -> &[NameSegment] {
        match self {
            TypeSyntax::Named { segments, .. } => segments,
            _ => &[],
        }
    }

    /// Whether this is a `global::`-style alias-qualified name.
    pub fn alias(&self) -> Option<&str> {
        match self {
            TypeSyntax::Named { alias, .. } => alias.as_deref(),
            _ => None,
        }
    }

    /// The dotted prefix of a named type (`Foo.Bar` for `Foo.Bar.Baz<T>`).
    pub fn qualifier(&self) -> Option<String> {
        let segments = self.segments();
        if segments.len() < 2 {
            return None;
        }
        Some(
            segments[..segments.len() - 1]
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join("."),
        )
    }

    /// The same named type with its first `count` segments and any alias removed.
    ///
    /// Non-named types are returned unchanged.
    pub fn strip_leading_segments(&self, count: usize) -> TypeSyntax {
        match self {
            TypeSyntax::Named { segments, .. } if count < segments.len() => TypeSyntax::Named {
                alias: None,
                segments: segments[count..].iter().cloned().collect(),
            },
            TypeSyntax::Named { segments, .. } => TypeSyntax::Named {
                alias: None,
                segments: segments.last().cloned().into_iter().collect(),
            },
            other => other.clone(),
        }
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, TypeSyntax::Tuple(_))
    }
}

impl fmt::Display for NameSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Predefined(keyword) => f.write_str(keyword),
            TypeSyntax::Named { alias, segments } => {
                if let Some(alias) = alias {
                    write!(f, "{alias}::")?;
                }
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{segment}")?;
                }
                Ok(())
            }
            TypeSyntax::Array { element, rank } => {
                write!(f, "{element}[")?;
                for _ in 1..*rank {
                    f.write_str(",")?;
                }
                f.write_str("]")
            }
            TypeSyntax::Nullable(inner) => write!(f, "{inner}?"),
            TypeSyntax::Pointer(inner) => write!(f, "{inner}*"),
            TypeSyntax::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element.ty)?;
                    if let Some(name) = &element.name {
                        write!(f, " {name}")?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}
