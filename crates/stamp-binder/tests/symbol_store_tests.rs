//! Tests for declaration binding in the symbol store.

use stamp_binder::{FileId, InMemorySourceProvider, SourceText, SymbolStore};
use stamp_parser::TypeKind;

fn store_from(files: &[(&str, &str)]) -> SymbolStore {
    let mut provider = InMemorySourceProvider::new();
    for (path, text) in files {
        provider.add_file(*path, *text);
    }
    SymbolStore::build(&provider, None).expect("in-memory build never fails")
}

#[test]
fn test_types_are_keyed_by_qualified_name() {
    let store = store_from(&[
        (
            "Models/Person.cs",
            "namespace App.Models { public class Person { } }",
        ),
        ("Global.cs", "public class Root { }"),
        (
            "Scoped.cs",
            "namespace App.Services;\npublic interface IClock { }\n",
        ),
    ]);
    assert_eq!(store.type_count(), 3);

    let person = store.lookup("App.Models.Person").expect("Person bound");
    let symbol = store.symbol(person);
    assert_eq!(symbol.name, "Person");
    assert_eq!(symbol.namespace, "App.Models");
    assert_eq!(symbol.kind, TypeKind::Class);
    assert_eq!(symbol.display_name, "App.Models.Person");

    let root = store.lookup("Root").expect("global type bound");
    assert_eq!(store.symbol(root).namespace, "");

    let clock = store.lookup("App.Services.IClock").expect("file-scoped namespace");
    assert_eq!(store.symbol(clock).kind, TypeKind::Interface);

    assert!(store.has_namespace("App"));
    assert!(store.has_namespace("App.Models"));
    assert!(!store.has_namespace("Models"));
}

#[test]
fn test_nested_namespaces_compose() {
    let store = store_from(&[(
        "A.cs",
        "namespace Outer { namespace Inner.Deep { class T { } } }",
    )]);
    assert!(store.lookup("Outer.Inner.Deep.T").is_some());
    assert!(store.has_namespace("Outer.Inner"));
}

#[test]
fn test_generic_and_nested_types() {
    let store = store_from(&[(
        "Tree.cs",
        r"
namespace Data
{
    public class Tree<T>
    {
        public class Node { }
    }
    public class Tree { }
}
",
    )]);
    let generic = store.lookup("Data.Tree`1").expect("generic type keyed by arity");
    let plain = store.lookup("Data.Tree").expect("non-generic overload");
    assert_ne!(generic, plain);
    assert_eq!(store.symbol(generic).display_name, "Data.Tree<T>");
    assert_eq!(store.symbol(generic).metadata_name(), "Tree`1");

    let node = store.lookup("Data.Tree`1.Node").expect("nested type");
    let node_symbol = store.symbol(node);
    assert_eq!(node_symbol.containing_type, Some(generic));
    assert_eq!(node_symbol.namespace, "Data");
    assert_eq!(node_symbol.display_name, "Data.Tree<T>.Node");
    assert_eq!(store.symbol(generic).nested_types.get("Node"), Some(&node));
}

#[test]
fn test_partial_declarations_merge() {
    let store = store_from(&[
        (
            "Part1.cs",
            "namespace N { public partial class Split { public int A { get; set; } } }",
        ),
        (
            "Part2.cs",
            "namespace N { public partial class Split { public int B { get; set; } } }",
        ),
    ]);
    let id = store.lookup("N.Split").expect("merged type");
    let symbol = store.symbol(id);
    assert!(symbol.is_partial());
    assert_eq!(symbol.declarations.len(), 2);
    assert_ne!(symbol.declarations[0].file, symbol.declarations[1].file);
    assert_eq!(store.type_count(), 1);
}

#[test]
fn test_draft_is_bound_first_and_replaces_disk_copy() {
    let provider = InMemorySourceProvider::new()
        .with_file("Mapper.cs", "namespace Old { class Mapper { } }")
        .with_file("Other.cs", "namespace N { class Other { } }");
    let draft = SourceText::new("Mapper.cs", "namespace New { class Mapper { } }");
    let store = SymbolStore::build(&provider, Some(&draft)).expect("build");

    let draft_file = store.draft_file().expect("draft recorded");
    assert!(store.file(draft_file).is_draft);
    assert_eq!(store.files().len(), 2);
    assert!(store.lookup("New.Mapper").is_some());
    assert!(store.lookup("Old.Mapper").is_none());
    assert!(store.lookup("N.Other").is_some());
}

#[test]
fn test_global_usings_are_collected_project_wide() {
    let store = store_from(&[
        ("GlobalUsings.cs", "global using App.Models;\nglobal using Json = System.Text.Json;\n"),
        ("Other.cs", "using System;\nclass X { }"),
    ]);
    let imports = store.project_imports();
    assert_eq!(imports.namespaces, vec!["App.Models".to_string()]);
    assert_eq!(imports.aliases.len(), 1);
    assert_eq!(imports.aliases[0].name, "Json");
}

#[test]
fn test_parse_diagnostics_are_kept_per_file() {
    let store = store_from(&[("Broken.cs", "namespace N { class A { }")]);
    assert!(store.diagnostics().next().is_some());
    assert!(store.lookup("N.A").is_some());
}

#[test]
fn test_scope_for_namespace_path() {
    let store = store_from(&[(
        "Mapper.cs",
        r"
using System;
namespace App
{
    using App.Models;
    namespace Mapping
    {
        using Extra;
    }
}
",
    )]);
    let file = FileId(0);
    let scope = store.scope_for(file, &["App".to_string(), "Mapping".to_string()]);
    assert_eq!(scope.namespace, "App.Mapping");
    assert_eq!(scope.imports.len(), 3);
    assert_eq!(scope.imports[0].namespaces, vec!["Extra".to_string()]);
    assert_eq!(scope.imports[1].namespaces, vec!["App.Models".to_string()]);
    assert_eq!(scope.imports[2].namespaces, vec!["System".to_string()]);
    assert_eq!(
        scope.enclosing_namespaces(),
        vec!["App.Mapping", "App"]
    );
}
