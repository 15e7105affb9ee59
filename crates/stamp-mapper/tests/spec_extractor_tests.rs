//! Tests for mapping trigger recognition and specification building.

use stamp_binder::{InMemorySourceProvider, SourceText, SymbolStore};
use stamp_mapper::{MappingReport, MappingSpecExtractor, is_mapping_trigger};
use stamp_parser::parse;

const MODELS: &str = r"
namespace Foo
{
    public class Bar
    {
        public int Id { get; }
        public string Name { get; }
        public string Nickname { get; }
    }
}
namespace Baz
{
    public class Qux
    {
        public int Id { get; set; }
        public string Name { get; set; }
        public bool Extra { get; set; }
    }
}
";

fn store_with_draft(draft: &str) -> SymbolStore {
    let provider = InMemorySourceProvider::new().with_file("Models.cs", MODELS);
    let draft = SourceText::new("Mappers.cs", draft);
    SymbolStore::build(&provider, Some(&draft)).expect("in-memory build never fails")
}

fn member_names(spec: &stamp_mapper::MappingSpecification) -> Vec<&str> {
    let mut names: Vec<&str> = spec.members.iter().map(|m| m.name.as_str()).collect();
    names.sort_unstable();
    names
}

#[test]
fn test_trigger_shape() {
    let (unit, _) = parse(
        "Triggers.cs",
        r"
using System;
using Map = (Foo.Bar, Baz.Qux);
using Named = (Foo.Bar First, Baz.Qux Second);
using Triple = (Foo.Bar, Baz.Qux, int);
using Plain = Foo.Bar;
using static System.Math;
",
    );
    let flags: Vec<bool> = unit.usings.iter().map(is_mapping_trigger).collect();
    assert_eq!(flags, vec![false, true, false, false, false, false]);
}

#[test]
fn test_scenario_intersects_readable_and_writable_members() {
    let store = store_with_draft(
        r"
using Map = (Foo.Bar, Baz.Qux);

public class Mappers { }
",
    );
    let file = store.draft_file().expect("draft bound");
    let extraction = MappingSpecExtractor::new(&store).extract(file);
    assert_eq!(extraction.specifications.len(), 1);

    let spec = &extraction.specifications[0];
    assert_eq!(spec.method_name, "Map");
    assert_eq!(spec.source.emitted, "Bar");
    assert_eq!(spec.destination.emitted, "Qux");
    assert_eq!(spec.source.display_name, "Foo.Bar");
    assert_eq!(member_names(spec), vec!["Id", "Name"]);
    let namespaces: Vec<&str> = spec.required_namespaces.iter().map(String::as_str).collect();
    assert_eq!(namespaces, vec!["Foo", "Baz"]);
}

#[test]
fn test_unresolved_destination_yields_no_members() {
    let store = store_with_draft(
        r"
using Broken = (Foo.Bar, Nowhere.Unresolved);

public class Mappers { }
",
    );
    let file = store.draft_file().expect("draft bound");
    let extraction = MappingSpecExtractor::new(&store).extract(file);
    let spec = &extraction.specifications[0];
    assert!(spec.source.is_resolved());
    assert!(!spec.destination.is_resolved());
    assert!(spec.members.is_empty());
    assert_eq!(spec.destination.emitted, "Unresolved");
    assert_eq!(spec.destination.namespace_hint.as_deref(), Some("Nowhere"));
}

#[test]
fn test_triggers_in_namespaces_resolve_in_their_scope() {
    let store = store_with_draft(
        r"
using First = (Foo.Bar, Baz.Qux);

namespace Foo
{
    using Second = (Bar, Baz.Qux);

    public static class Mappers { }
}
",
    );
    let file = store.draft_file().expect("draft bound");
    let extraction = MappingSpecExtractor::new(&store).extract(file);
    let names: Vec<&str> = extraction.triggers().map(|t| t.alias.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);

    let second = &extraction.specifications[1];
    assert_eq!(second.trigger.namespace_path, vec!["Foo".to_string()]);
    assert!(second.source.is_resolved());
    assert_eq!(second.source.namespace_hint, None);
    assert_eq!(member_names(second), vec!["Id", "Name"]);

    let all: Vec<String> = extraction.required_namespaces().into_iter().collect();
    assert_eq!(all, vec!["Foo".to_string(), "Baz".to_string()]);
}

#[test]
fn test_partially_qualified_name_imports_declaring_namespace() {
    let provider = InMemorySourceProvider::new().with_file(
        "Deep.cs",
        r"
namespace App.Models { public class Person { public int Id { get; set; } } }
namespace App.Dtos { public class PersonDto { public int Id { get; set; } } }
",
    );
    let draft = SourceText::new(
        "App/Mappers.cs",
        r"
namespace App
{
    using ToDto = (Models.Person, global::App.Dtos.PersonDto);
    public class Mappers { }
}
",
    );
    let store = SymbolStore::build(&provider, Some(&draft)).expect("build");
    let file = store.draft_file().expect("draft bound");
    let extraction = MappingSpecExtractor::new(&store).extract(file);
    let spec = &extraction.specifications[0];
    assert_eq!(spec.source.emitted, "Person");
    assert_eq!(spec.source.namespace_hint.as_deref(), Some("App.Models"));
    assert_eq!(spec.destination.emitted, "PersonDto");
    assert_eq!(spec.destination.namespace_hint.as_deref(), Some("App.Dtos"));
    assert_eq!(member_names(spec), vec!["Id"]);
}

#[test]
fn test_generic_and_nested_types_keep_written_form() {
    let provider = InMemorySourceProvider::new().with_file(
        "Generic.cs",
        r"
namespace G
{
    public class Page<T> { public int Count { get; set; } }
    public class Outer { public class Inner { public int Count { get; set; } } }
}
",
    );
    let draft = SourceText::new(
        "Mappers.cs",
        "using Flatten = (G.Page<int>, G.Outer.Inner);\npublic class Mappers { }\n",
    );
    let store = SymbolStore::build(&provider, Some(&draft)).expect("build");
    let file = store.draft_file().expect("draft bound");
    let spec = &MappingSpecExtractor::new(&store).extract(file).specifications[0];
    assert_eq!(spec.source.emitted, "Page<int>");
    assert_eq!(spec.destination.emitted, "Outer.Inner");
    assert_eq!(spec.destination.display_name, "G.Outer.Inner");
    assert_eq!(member_names(spec), vec!["Count"]);
}

#[test]
fn test_document_without_triggers() {
    let store = store_with_draft("using System;\npublic class Mappers { }\n");
    let file = store.draft_file().expect("draft bound");
    let extraction = MappingSpecExtractor::new(&store).extract(file);
    assert!(extraction.is_empty());
}

#[test]
fn test_report_serializes_sorted_members() {
    let store = store_with_draft("using Map = (Foo.Bar, Baz.Qux);\npublic class Mappers { }\n");
    let file = store.draft_file().expect("draft bound");
    let extraction = MappingSpecExtractor::new(&store).extract(file);
    let report = MappingReport::new("Mappers.cs", &extraction);
    let json = serde_json::to_value(&report).expect("report serializes");

    let spec = &json["specifications"][0];
    assert_eq!(spec["method"], "Map");
    assert_eq!(spec["source"]["resolved"], true);
    assert_eq!(spec["destination"]["qualified_name"], "Baz.Qux");
    assert_eq!(spec["members"][0]["name"], "Id");
    assert_eq!(spec["members"][0]["type"], "int");
    assert_eq!(spec["members"][1]["name"], "Name");
    assert_eq!(spec["required_namespaces"][1], "Baz");
}
