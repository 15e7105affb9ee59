//! Tests for lowering mapping specifications to methods.

use stamp_binder::{InMemorySourceProvider, SourceText, SymbolStore};
use stamp_emitter::{
    BodyStyle, IRBody, IRNode, IRPrinter, MethodSynthesizer, PrinterOptions, SOURCE_PARAMETER,
};
use stamp_mapper::{MappingSpecExtractor, MappingSpecification};

const MODELS: &str = r"
namespace Foo
{
    public class Bar
    {
        public string Zeta { get; set; }
        public int Id { get; set; }
        public string Alpha { get; set; }
        public string Name { get; set; }
    }
}
namespace Baz
{
    public class Qux
    {
        public string Name { get; set; }
        public string Alpha { get; set; }
        public int Id { get; set; }
        public string Zeta { get; set; }
    }
}
";

fn specifications(draft: &str) -> Vec<MappingSpecification> {
    let provider = InMemorySourceProvider::new().with_file("Models.cs", MODELS);
    let draft = SourceText::new("Mappers.cs", draft);
    let store = SymbolStore::build(&provider, Some(&draft)).expect("build");
    let file = store.draft_file().expect("draft bound");
    MappingSpecExtractor::new(&store).extract(file).specifications
}

#[test]
fn test_members_are_assigned_in_name_order() {
    let specs = specifications("using Map = (Foo.Bar, Baz.Qux);\nclass Mappers { }\n");
    let method = MethodSynthesizer::default().synthesize(&specs[0]);

    assert_eq!(method.name, "Map");
    assert_eq!(method.return_type, "Qux");
    assert_eq!(method.modifiers, vec!["public", "static"]);
    assert_eq!(method.parameters[0].modifiers, vec!["this"]);
    assert_eq!(method.parameters[0].type_name, "Bar");
    assert_eq!(method.parameters[0].name, SOURCE_PARAMETER);

    let IRBody::Expression(IRNode::ObjectCreation { initializers, .. }) = &method.body else {
        panic!("expected an expression body, got {:?}", method.body);
    };
    let order: Vec<&str> = initializers.iter().map(|i| i.member.as_str()).collect();
    assert_eq!(order, vec!["Alpha", "Id", "Name", "Zeta"]);
}

#[test]
fn test_synthesis_is_deterministic() {
    let draft = "using Map = (Foo.Bar, Baz.Qux);\nclass Mappers { }\n";
    let options = PrinterOptions::default();
    let first = IRPrinter::method_to_string(
        &MethodSynthesizer::default().synthesize(&specifications(draft)[0]),
        &options,
    );
    let second = IRPrinter::method_to_string(
        &MethodSynthesizer::default().synthesize(&specifications(draft)[0]),
        &options,
    );
    assert_eq!(first, second);
}

#[test]
fn test_block_style_returns_the_new_object() {
    let specs = specifications("using Map = (Foo.Bar, Baz.Qux);\nclass Mappers { }\n");
    let method = MethodSynthesizer::new(BodyStyle::Block).synthesize(&specs[0]);
    let IRBody::Block(statements) = &method.body else {
        panic!("expected a block body");
    };
    assert!(matches!(statements.as_slice(), [IRNode::ReturnStatement(Some(_))]));
}

#[test]
fn test_unresolved_destination_prints_empty_construction() {
    let specs = specifications("using Map = (Foo.Bar, Missing.Unresolved);\nclass Mappers { }\n");
    let method = MethodSynthesizer::default().synthesize(&specs[0]);
    assert_eq!(
        IRPrinter::method_to_string(&method, &PrinterOptions::default()),
        "public static Unresolved Map(this Bar source) => new Unresolved();\n"
    );
}
