//! Centralized limits for the parser and binder.
//!
//! These prevent stack overflow or runaway loops on pathological input.

/// Maximum nesting of namespaces and type declarations the parser descends into.
///
/// ```csharp
/// namespace A { class B { class C { class D { /* ... 64 levels ... */ } } } }
/// ```
pub const MAX_DECLARATION_DEPTH: u32 = 64;

/// Maximum nesting of type syntax (`List<List<List<...>>>`, nested tuples).
pub const MAX_TYPE_SYNTAX_DEPTH: u32 = 128;

/// Maximum number of base types followed while flattening an inheritance chain.
///
/// Inheritance graphs are acyclic in well-formed projects; this bounds the
/// walk for malformed ones together with the visited set.
pub const MAX_INHERITANCE_DEPTH: u32 = 256;

/// Maximum alias indirections followed during name lookup (`using A = B;` chains).
pub const MAX_ALIAS_RESOLUTION_DEPTH: u32 = 16;
