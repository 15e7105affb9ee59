//! Tests for member collection across declarations and base classes.

use stamp_binder::{InMemorySourceProvider, SymbolStore};
use stamp_mapper::{
    MemberCollector, MemberDescriptor, MemberSet, Readable, TypeDescriptor, Writable,
};
use stamp_parser::TypeSyntax;

fn store_from(files: &[(&str, &str)]) -> SymbolStore {
    let mut provider = InMemorySourceProvider::new();
    for (path, text) in files {
        provider.add_file(*path, *text);
    }
    SymbolStore::build(&provider, None).expect("in-memory build never fails")
}

fn descriptor(store: &SymbolStore, qualified_name: &str) -> TypeDescriptor {
    let id = store.lookup(qualified_name).expect("type declared");
    TypeDescriptor::for_symbol(store, id)
}

fn pairs<C: stamp_mapper::Capability>(set: &MemberSet<C>) -> Vec<(String, String)> {
    set.iter().map(|m| (m.name.clone(), m.ty.clone())).collect()
}

fn pair(name: &str, ty: &str) -> (String, String) {
    (name.to_string(), ty.to_string())
}

#[test]
fn test_readable_and_writable_filters() {
    let store = store_from(&[(
        "Model.cs",
        r#"
namespace M
{
    public class Person
    {
        public int Id { get; set; }
        public string Name { get; private set; }
        public string Secret { private get; set; }
        public int Age { get; init; }
        public string Display => Name;
        public bool Flag { set { } }
        public readonly long Version;
        public double Score;
        public const int Max = 10;
        public static int Count { get; set; }
        private int _hidden;
        public void Touch() { }
    }
}
"#,
    )]);
    let person = descriptor(&store, "M.Person");
    let collector = MemberCollector::new(&store);

    let readable: MemberSet<Readable> = collector.collect(&person);
    assert_eq!(
        pairs(&readable),
        vec![
            pair("Id", "int"),
            pair("Name", "string"),
            pair("Age", "int"),
            pair("Display", "string"),
            pair("Version", "long"),
            pair("Score", "double"),
        ]
    );

    let writable: MemberSet<Writable> = collector.collect(&person);
    assert_eq!(
        pairs(&writable),
        vec![
            pair("Id", "int"),
            pair("Secret", "string"),
            pair("Age", "int"),
            pair("Flag", "bool"),
            pair("Score", "double"),
        ]
    );
}

#[test]
fn test_accessibility_levels() {
    let store = store_from(&[(
        "Access.cs",
        r"
public class Access
{
    int Implicit { get; set; }
    private int Private { get; set; }
    protected int Protected { get; set; }
    private protected int PrivateProtected { get; set; }
    internal int Internal { get; set; }
    protected internal int ProtectedInternal { get; set; }
    public int Public { get; set; }
}
public interface IShape
{
    int Sides { get; set; }
}
",
    )]);
    let collector = MemberCollector::new(&store);

    let access: MemberSet<Readable> = collector.collect(&descriptor(&store, "Access"));
    let names: Vec<&str> = access.names().collect();
    assert_eq!(names, vec!["Internal", "ProtectedInternal", "Public"]);

    let shape: MemberSet<Writable> = collector.collect(&descriptor(&store, "IShape"));
    assert_eq!(pairs(&shape), vec![pair("Sides", "int")]);
}

#[test]
fn test_base_class_members_follow_direct_members() {
    let store = store_from(&[
        (
            "Base.cs",
            r"
namespace Core
{
    public abstract class Entity
    {
        public int W { get; set; }
        public System.Guid Key { get; set; }
    }
}
",
        ),
        (
            "Derived.cs",
            r"
using Core;

namespace App
{
    public class Order : Entity, System.IComparable
    {
        public decimal Total { get; set; }
    }
}
",
        ),
    ]);
    let order = descriptor(&store, "App.Order");
    assert_eq!(order.base, store.lookup("Core.Entity"));

    let writable: MemberSet<Writable> = MemberCollector::new(&store).collect(&order);
    assert_eq!(
        pairs(&writable),
        vec![pair("Total", "decimal"), pair("W", "int"), pair("Key", "System.Guid")]
    );
}

#[test]
fn test_derived_member_hides_inherited_member_of_any_type() {
    let store = store_from(&[(
        "Shadow.cs",
        r"
public class Animal
{
    public int Id { get; set; }
    public string Name { get; set; }
}
public class Dog : Animal
{
    public new string Id { get; set; }
}
",
    )]);
    let readable: MemberSet<Readable> =
        MemberCollector::new(&store).collect(&descriptor(&store, "Dog"));
    assert_eq!(pairs(&readable), vec![pair("Id", "string"), pair("Name", "string")]);
}

#[test]
fn test_inaccessible_derived_member_does_not_hide() {
    let store = store_from(&[(
        "Hide.cs",
        r"
public class Animal { public int Id { get; set; } }
public class Cat : Animal { private string Id { get; set; } }
",
    )]);
    let readable: MemberSet<Readable> =
        MemberCollector::new(&store).collect(&descriptor(&store, "Cat"));
    assert_eq!(pairs(&readable), vec![pair("Id", "int")]);
}

#[test]
fn test_record_positional_parameters_are_members() {
    let store = store_from(&[(
        "Records.cs",
        r#"
namespace R
{
    public record Point(int X, int Y)
    {
        public string Label { get; init; } = "";
    }
    public record struct Size(double Width, double Height);
}
"#,
    )]);
    let collector = MemberCollector::new(&store);
    let point: MemberSet<Writable> = collector.collect(&descriptor(&store, "R.Point"));
    assert_eq!(
        pairs(&point),
        vec![pair("X", "int"), pair("Y", "int"), pair("Label", "string")]
    );
    let size: MemberSet<Readable> = collector.collect(&descriptor(&store, "R.Size"));
    assert_eq!(size.len(), 2);
}

#[test]
fn test_partial_declarations_contribute_members() {
    let store = store_from(&[
        ("A.cs", "namespace P { public partial class Split { public int A { get; set; } } }"),
        ("B.cs", "namespace P { public partial class Split { public int B { get; set; } } }"),
    ]);
    let readable: MemberSet<Readable> =
        MemberCollector::new(&store).collect(&descriptor(&store, "P.Split"));
    assert_eq!(pairs(&readable), vec![pair("A", "int"), pair("B", "int")]);
}

#[test]
fn test_member_types_use_display_form() {
    let store = store_from(&[(
        "Types.cs",
        r"
using System;
using System.Collections.Generic;

namespace T
{
    public class Tag { }
    public class Holder
    {
        public Int32 Count { get; set; }
        public List<Tag> Tags { get; set; }
        public Tag? Primary { get; set; }
        public (int, string) Pair { get; set; }
    }
}
",
    )]);
    let readable: MemberSet<Readable> =
        MemberCollector::new(&store).collect(&descriptor(&store, "T.Holder"));
    assert_eq!(
        pairs(&readable),
        vec![
            pair("Count", "int"),
            pair("Tags", "List<T.Tag>"),
            pair("Primary", "T.Tag?"),
            pair("Pair", "(int, string)"),
        ]
    );
}

#[test]
fn test_unresolved_type_has_no_members() {
    let store = store_from(&[("Empty.cs", "class Host { }")]);
    let missing = TypeDescriptor::unresolved(&TypeSyntax::name("Elsewhere.Missing"));
    assert!(!missing.is_resolved());
    assert_eq!(missing.namespace, "Elsewhere");
    let readable: MemberSet<Readable> = MemberCollector::new(&store).collect(&missing);
    assert!(readable.is_empty());
}

#[test]
fn test_cyclic_hierarchy_terminates() {
    let store = store_from(&[(
        "Cycle.cs",
        r"
public class A : B { public int X { get; set; } }
public class B : A { public int Y { get; set; } }
",
    )]);
    let readable: MemberSet<Readable> =
        MemberCollector::new(&store).collect(&descriptor(&store, "A"));
    assert_eq!(pairs(&readable), vec![pair("X", "int"), pair("Y", "int")]);
}

#[test]
fn test_declared_members_reports_both_flags() {
    let store = store_from(&[(
        "Flags.cs",
        "public class F { public int Both { get; set; } public int Get { get; } }",
    )]);
    let id = store.lookup("F").expect("declared");
    let declared = MemberCollector::new(&store).declared_members(id);
    let both = &declared[0];
    assert_eq!(*both, MemberDescriptor::new("Both", "int"));
    assert!(both.readable && both.writable);
    assert!(declared[1].readable && !declared[1].writable);
}
