//! IR for generated C# code.
//!
//! The synthesizer builds these nodes instead of strings; `IRPrinter` walks
//! them and owns every formatting decision (line splitting, indentation,
//! body style).

/// An expression or statement in a generated method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IRNode {
    /// `source`
    Identifier(String),

    /// `object.member`
    MemberAccess { object: Box<Self>, member: String },

    /// `new Type(args) { A = x, B = y }`
    ObjectCreation {
        type_name: String,
        arguments: Vec<Self>,
        initializers: Vec<IRInitializer>,
    },

    /// `return expr;`
    ReturnStatement(Option<Box<Self>>),

    /// `expr;`
    ExpressionStatement(Box<Self>),
}

/// One `Member = value` entry of an object initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRInitializer {
    pub member: String,
    pub value: IRNode,
}

/// A method parameter: `this Person source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRParam {
    pub modifiers: Vec<String>,
    pub type_name: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IRBody {
    /// `=> expr;`
    Expression(IRNode),
    /// `{ statements }`
    Block(Vec<IRNode>),
}

/// A generated method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRMethod {
    pub modifiers: Vec<String>,
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<IRParam>,
    pub body: IRBody,
}

// =========================================================================
// Builder helpers for IR construction
// =========================================================================

impl IRNode {
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn member(object: Self, member: impl Into<String>) -> Self {
        Self::MemberAccess {
            object: Box::new(object),
            member: member.into(),
        }
    }

    /// `new Type { ... }` without constructor arguments.
    pub fn new_object(type_name: impl Into<String>, initializers: Vec<IRInitializer>) -> Self {
        Self::ObjectCreation {
            type_name: type_name.into(),
            arguments: Vec::new(),
            initializers,
        }
    }

    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    pub fn expr_stmt(expr: Self) -> Self {
        Self::ExpressionStatement(Box::new(expr))
    }
}

impl IRInitializer {
    pub fn new(member: impl Into<String>, value: IRNode) -> Self {
        IRInitializer {
            member: member.into(),
            value,
        }
    }
}

impl IRParam {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        IRParam {
            modifiers: Vec::new(),
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// The receiver of an extension method.
    pub fn this(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        IRParam {
            modifiers: vec!["this".to_string()],
            ..IRParam::new(type_name, name)
        }
    }
}
