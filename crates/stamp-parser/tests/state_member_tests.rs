//! Tests for type member parsing.

use stamp_parser::{
    AccessorKind, Member, MemberDecl, MemberKind, OtherMemberKind, ParserState, PropertyDecl,
    TypeDecl,
};

fn parse_class_members(body: &str) -> Vec<MemberDecl> {
    let source = format!("class C\n{{\n{body}\n}}\n");
    let mut parser = ParserState::new("test.cs".to_string(), source);
    let unit = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let types = unit.top_level_types();
    types[0].1.members().to_vec()
}

fn members(decls: &[MemberDecl]) -> Vec<&Member> {
    decls
        .iter()
        .filter_map(|d| match d {
            MemberDecl::Member(m) => Some(m),
            MemberDecl::Type(_) => None,
        })
        .collect()
}

fn property(member: &Member) -> &PropertyDecl {
    match &member.kind {
        MemberKind::Property(p) => p,
        other => panic!("expected property, got {other:?}"),
    }
}

#[test]
fn test_auto_properties() {
    let decls = parse_class_members(
        r#"
    public string Name { get; set; } = "";
    public int Age { get; private set; }
    public int Id { get; init; }
    internal bool Flag { get; }
"#,
    );
    let members = members(&decls);
    assert_eq!(members.len(), 4);

    let name = property(members[0]);
    assert_eq!(name.name, "Name");
    assert_eq!(name.ty.to_string(), "string");
    assert!(name.has_initializer);
    assert!(name.accessor(AccessorKind::Get).is_some());
    assert!(name.accessor(AccessorKind::Set).is_some());

    let age = property(members[1]);
    let setter = age.accessor(AccessorKind::Set).expect("setter");
    assert_eq!(setter.modifiers, vec!["private"]);

    let id = property(members[2]);
    assert!(id.accessor(AccessorKind::Init).is_some());
    assert!(id.accessor(AccessorKind::Set).is_none());

    let flag = property(members[3]);
    assert_eq!(flag.modifiers, vec!["internal"]);
    assert_eq!(flag.accessors.len(), 1);
}

#[test]
fn test_expression_bodied_and_full_accessors() {
    let decls = parse_class_members(
        r"
    public string FullName => First + Last;
    public int Count
    {
        get { return _count; }
        set => _count = value;
    }
",
    );
    let members = members(&decls);
    assert_eq!(members.len(), 2);
    let full_name = property(members[0]);
    assert!(full_name.is_expression_bodied);
    assert!(full_name.accessors.is_empty());

    let count = property(members[1]);
    assert_eq!(count.accessors.len(), 2);
    assert_eq!(
        members[1].text.to_text(),
        "public int Count\n{\n    get { return _count; }\n    set => _count = value;\n}"
    );
}

#[test]
fn test_fields_with_multiple_declarators() {
    let decls = parse_class_members(
        r"
    public int A, B = 2;
    private readonly Dictionary<int, string> _map = new Dictionary<int, string>(), _other;
    public const int Max = 10;
",
    );
    let members = members(&decls);
    assert_eq!(members.len(), 3);

    let MemberKind::Field(first) = &members[0].kind else {
        panic!("expected field");
    };
    assert_eq!(first.names, vec!["A", "B"]);

    let MemberKind::Field(map) = &members[1].kind else {
        panic!("expected field");
    };
    assert_eq!(map.ty.to_string(), "Dictionary<int, string>");
    assert_eq!(map.names, vec!["_map", "_other"]);

    let MemberKind::Field(max) = &members[2].kind else {
        panic!("expected field");
    };
    assert_eq!(max.modifiers, vec!["public", "const"]);
}

#[test]
fn test_other_members_are_classified() {
    let decls = parse_class_members(
        r"
    public C(int x) : this() { }
    ~C() { }
    public void Run<T>(T value) where T : class { if (value == null) { return; } }
    public abstract int Compute();
    public static C operator +(C a, C b) => a;
    public static implicit operator int(C c) => 0;
    public int this[int index] => index;
    public event EventHandler Changed;
    public delegate void Handler(object sender);
    int IComparable.CompareTo(object other) => 0;
",
    );
    let kinds: Vec<MemberKind> = members(&decls).iter().map(|m| m.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            MemberKind::Other(OtherMemberKind::Constructor),
            MemberKind::Other(OtherMemberKind::Destructor),
            MemberKind::Other(OtherMemberKind::Method),
            MemberKind::Other(OtherMemberKind::Method),
            MemberKind::Other(OtherMemberKind::Operator),
            MemberKind::Other(OtherMemberKind::Operator),
            MemberKind::Other(OtherMemberKind::Indexer),
            MemberKind::Other(OtherMemberKind::Event),
            MemberKind::Other(OtherMemberKind::Delegate),
            MemberKind::Other(OtherMemberKind::ExplicitImplementation),
        ]
    );
}

#[test]
fn test_method_body_is_kept_verbatim_and_dedented() {
    let decls = parse_class_members(
        r"
    // Doubles the value.
    public int Twice(int x)
    {
        return x * 2; // simple
    }
",
    );
    let members = members(&decls);
    assert_eq!(members[0].leading_trivia, vec!["// Doubles the value."]);
    assert_eq!(
        members[0].text.to_text(),
        "public int Twice(int x)\n{\n    return x * 2; // simple\n}"
    );
}

#[test]
fn test_nested_types_are_structural() {
    let decls = parse_class_members(
        r"
    public class Inner
    {
        public int Value { get; set; }
    }
    private enum Mode { On, Off }
",
    );
    let nested: Vec<&TypeDecl> = decls
        .iter()
        .filter_map(|d| match d {
            MemberDecl::Type(t) => Some(t),
            MemberDecl::Member(_) => None,
        })
        .collect();
    assert_eq!(nested.len(), 2);
    assert_eq!(nested[0].name, "Inner");
    assert_eq!(nested[0].members().len(), 1);
    assert_eq!(nested[1].name, "Mode");
}

#[test]
fn test_multiline_raw_string_lines_are_not_reindented() {
    let decls = parse_class_members(
        "    public string Sql = @\"select *\n  from t\";\n",
    );
    let members = members(&decls);
    let lines = &members[0].text.lines;
    assert_eq!(lines.len(), 2);
    assert!(lines[0].reindent);
    assert!(!lines[1].reindent);
    assert_eq!(lines[1].text, "  from t\";");
}

#[test]
fn test_required_and_attributed_members() {
    let decls = parse_class_members(
        r#"
    [JsonPropertyName("name")]
    public required string Name { get; init; }
"#,
    );
    let members = members(&decls);
    let name = property(members[0]);
    assert_eq!(name.modifiers, vec!["public", "required"]);
    assert!(members[0].text.to_text().starts_with("[JsonPropertyName"));
}

#[test]
fn test_unknown_member_recovers() {
    let source = "class C\n{\n    public int A { get; }\n    ??? garbage;\n    public int B { get; }\n}\n";
    let mut parser = ParserState::new("test.cs".to_string(), source.to_string());
    let unit = parser.parse_source_file();
    let types = unit.top_level_types();
    let names: Vec<String> = types[0]
        .1
        .members()
        .iter()
        .filter_map(|d| match d {
            MemberDecl::Member(Member {
                kind: MemberKind::Property(p),
                ..
            }) => Some(p.name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}
