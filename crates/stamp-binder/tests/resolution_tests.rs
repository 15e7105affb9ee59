//! Tests for type name resolution and display.

use std::path::Path;

use stamp_binder::{FileId, InMemorySourceProvider, ResolutionScope, SymbolStore};
use stamp_parser::{ParserState, TypeSyntax};

fn store_from(files: &[(&str, &str)]) -> SymbolStore {
    let mut provider = InMemorySourceProvider::new();
    for (path, text) in files {
        provider.add_file(*path, *text);
    }
    SymbolStore::build(&provider, None).expect("in-memory build never fails")
}

/// Parse a type as written in source.
fn ty(text: &str) -> TypeSyntax {
    let source = format!("using __T = {text};");
    let mut parser = ParserState::new("type.cs".to_string(), source);
    let unit = parser.parse_source_file();
    unit.usings[0].target.clone()
}

fn file(store: &SymbolStore, path: &str) -> FileId {
    store.file_id(Path::new(path)).expect("file bound")
}

fn resolved_name(store: &SymbolStore, text: &str, scope: &ResolutionScope) -> Option<String> {
    store
        .resolve(&ty(text), scope)
        .map(|id| store.symbol(id).qualified_name.clone())
}

const MODELS: &str = r"
namespace Foo
{
    public class Bar { }
    public class Shared { }
}
namespace Baz
{
    public class Qux { }
    public class Shared { }
}
public class Shared { }
";

#[test]
fn test_qualified_names_resolve_from_anywhere() {
    let store = store_from(&[("Models.cs", MODELS)]);
    let scope = ResolutionScope::global();
    assert_eq!(resolved_name(&store, "Foo.Bar", &scope).as_deref(), Some("Foo.Bar"));
    assert_eq!(
        resolved_name(&store, "global::Baz.Qux", &scope).as_deref(),
        Some("Baz.Qux")
    );
    assert_eq!(resolved_name(&store, "Missing.Type", &scope), None);
    assert_eq!(resolved_name(&store, "int", &scope), None);
}

#[test]
fn test_simple_names_through_usings() {
    let store = store_from(&[
        ("Models.cs", MODELS),
        ("Mapper.cs", "using Foo;\nusing Baz;\nclass Mapper { }"),
    ]);
    let scope = store.scope_for(file(&store, "Mapper.cs"), &[]);
    assert_eq!(resolved_name(&store, "Bar", &scope).as_deref(), Some("Foo.Bar"));
    assert_eq!(resolved_name(&store, "Qux", &scope).as_deref(), Some("Baz.Qux"));
    // The global namespace is searched before imported namespaces.
    assert_eq!(resolved_name(&store, "Shared", &scope).as_deref(), Some("Shared"));
}

#[test]
fn test_enclosing_namespace_wins_over_usings() {
    let store = store_from(&[
        ("Models.cs", MODELS),
        (
            "Mapper.cs",
            "using Foo;\nnamespace Baz.Mapping { class Mapper { } }",
        ),
    ]);
    let scope = store.scope_for(file(&store, "Mapper.cs"), &["Baz.Mapping".to_string()]);
    assert_eq!(
        resolved_name(&store, "Shared", &scope).as_deref(),
        Some("Baz.Shared")
    );
    // Relative qualified name through the enclosing namespace.
    let store = store_from(&[
        ("Inner.cs", "namespace App.Models { class Person { } }"),
        ("Mapper.cs", "namespace App { class Mapper { } }"),
    ]);
    let scope = store.scope_for(file(&store, "Mapper.cs"), &["App".to_string()]);
    assert_eq!(
        resolved_name(&store, "Models.Person", &scope).as_deref(),
        Some("App.Models.Person")
    );
}

#[test]
fn test_aliases_are_searched_first() {
    let store = store_from(&[
        ("Models.cs", MODELS),
        (
            "Mapper.cs",
            "using Shared = Foo.Bar;\nusing B = Baz;\nclass Mapper { }",
        ),
    ]);
    let scope = store.scope_for(file(&store, "Mapper.cs"), &[]);
    assert_eq!(resolved_name(&store, "Shared", &scope).as_deref(), Some("Foo.Bar"));
    assert_eq!(resolved_name(&store, "B.Qux", &scope).as_deref(), Some("Baz.Qux"));
}

#[test]
fn test_self_referencing_alias_terminates() {
    let store = store_from(&[("Loop.cs", "using A = B;\nusing B = A;\nclass X { }")]);
    let scope = store.scope_for(file(&store, "Loop.cs"), &[]);
    assert_eq!(resolved_name(&store, "A", &scope), None);
}

#[test]
fn test_containing_type_and_nested_lookup() {
    let store = store_from(&[(
        "Outer.cs",
        r"
namespace N
{
    class Outer
    {
        class Inner { }
    }
}
",
    )]);
    let outer = store.lookup("N.Outer").expect("outer");
    let scope = store.symbol(outer).declarations[0].scope.clone();
    assert_eq!(scope.containing_type, Some(outer));
    assert_eq!(resolved_name(&store, "Inner", &scope).as_deref(), Some("N.Outer.Inner"));

    let global = store.scope_for(file(&store, "Outer.cs"), &["N".to_string()]);
    assert_eq!(resolved_name(&store, "Inner", &global), None);
    assert_eq!(
        resolved_name(&store, "Outer.Inner", &global).as_deref(),
        Some("N.Outer.Inner")
    );
}

#[test]
fn test_global_usings_apply_to_every_file() {
    let store = store_from(&[
        ("Models.cs", MODELS),
        ("Usings.cs", "global using Foo;"),
        ("Mapper.cs", "class Mapper { }"),
    ]);
    let scope = store.scope_for(file(&store, "Mapper.cs"), &[]);
    assert_eq!(resolved_name(&store, "Bar", &scope).as_deref(), Some("Foo.Bar"));
}

#[test]
fn test_display_type_forms() {
    let store = store_from(&[
        ("Models.cs", MODELS),
        (
            "Generic.cs",
            "namespace G { public class Box<T> { public class Item { } } }",
        ),
        ("Mapper.cs", "using System;\nusing Foo;\nusing G;\nclass Mapper { }"),
    ]);
    let scope = store.scope_for(file(&store, "Mapper.cs"), &[]);
    let display = |text: &str| store.display_type(&ty(text), &scope);

    assert_eq!(display("int"), "int");
    assert_eq!(display("System.Int32"), "int");
    assert_eq!(display("String"), "string");
    assert_eq!(display("Bar"), "Foo.Bar");
    assert_eq!(display("Bar?"), "Foo.Bar?");
    assert_eq!(display("Bar[]"), "Foo.Bar[]");
    assert_eq!(display("Box<Bar>"), "G.Box<Foo.Bar>");
    assert_eq!(display("Box<int>.Item"), "G.Box<int>.Item");
    assert_eq!(display("List<Bar>"), "List<Foo.Bar>");
    assert_eq!(display("(int Id, Bar)"), "(int Id, Foo.Bar)");
    assert_eq!(display("Guid"), "Guid");
}

#[test]
fn test_base_type_follows_classes_only() {
    let store = store_from(&[(
        "Hierarchy.cs",
        r"
namespace H
{
    interface IEntity { }
    class Entity : IEntity { }
    class Person : Entity, IEntity { }
    record Named(string Name) : Base(Name);
    record Base(string Name);
    struct Value : IEntity { }
}
",
    )]);
    let id = |name: &str| store.lookup(name).expect(name);
    assert_eq!(store.base_type(id("H.Person")), Some(id("H.Entity")));
    assert_eq!(store.base_type(id("H.Entity")), None);
    assert_eq!(store.base_type(id("H.Named")), Some(id("H.Base")));
    assert_eq!(store.base_type(id("H.Value")), None);
    assert_eq!(store.base_type(id("H.IEntity")), None);
}
