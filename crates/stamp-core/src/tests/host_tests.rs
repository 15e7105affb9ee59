use crate::host::{find_host_class, promote_to_static};
use stamp_emitter::HostPath;
use stamp_parser::{TypeDecl, parse};

fn class_modifiers(source: &str) -> Vec<String> {
    let (unit, _) = parse("Host.cs", source);
    let path = find_host_class(&unit).expect("host class");
    let mut unit = unit;
    let decl: &mut TypeDecl = path.resolve_mut(&mut unit).expect("resolvable path");
    promote_to_static(decl);
    decl.modifiers.clone()
}

#[test]
fn test_host_is_first_class_in_document_order() {
    let (unit, _) = parse(
        "Host.cs",
        "interface IFoo { }\nstruct S { }\nnamespace A\n{\n    enum E { X }\n    class First { class Nested { } }\n}\nclass Second { }\n",
    );
    let path = find_host_class(&unit);
    assert_eq!(path, Some(HostPath(vec![2, 1])));
    assert_eq!(
        path.and_then(|p| p.resolve(&unit).map(|decl| decl.name.clone())),
        Some("First".to_string())
    );
}

#[test]
fn test_records_are_not_hosts() {
    let (unit, _) = parse("Host.cs", "record R(int X);\nclass C { }\n");
    assert_eq!(find_host_class(&unit), Some(HostPath(vec![1])));
}

#[test]
fn test_no_class_means_no_host() {
    let (unit, _) = parse("Host.cs", "namespace N { interface I { } }\n");
    assert_eq!(find_host_class(&unit), None);
}

#[test]
fn test_static_is_added_after_access_modifiers() {
    assert_eq!(class_modifiers("public class M { }"), ["public", "static"]);
    assert_eq!(class_modifiers("class M { }"), ["static"]);
}

#[test]
fn test_static_goes_before_partial() {
    assert_eq!(
        class_modifiers("internal partial class M { }"),
        ["internal", "static", "partial"]
    );
}

#[test]
fn test_abstract_and_sealed_are_dropped() {
    assert_eq!(class_modifiers("public sealed class M { }"), ["public", "static"]);
    assert_eq!(
        class_modifiers("public abstract partial class M { }"),
        ["public", "static", "partial"]
    );
}

#[test]
fn test_static_class_is_left_alone() {
    let (mut unit, _) = parse("Host.cs", "public static partial class M { }");
    let path = find_host_class(&unit).expect("host class");
    let decl = path.resolve_mut(&mut unit).expect("resolvable path");
    assert!(!promote_to_static(decl));
    assert_eq!(decl.modifiers, ["public", "static", "partial"]);
}
