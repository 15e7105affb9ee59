use clap::Parser;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;

use crate::args::CliArgs;
use crate::driver::{Outcome, run};

const DRAFT: &str = "using ToDto = (Shop.Order, Shop.OrderDto);\n\nnamespace Shop.Mapping\n{\n    public class Mappers\n    {\n    }\n}\n";

/// A project with a solution file and two model types.
fn create_test_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("Shop.sln"), "").unwrap();
    fs::create_dir_all(root.join("src/Models")).unwrap();
    fs::create_dir_all(root.join("src/Mapping")).unwrap();
    fs::write(
        root.join("src/Models/Order.cs"),
        "namespace Shop;\n\npublic class Order\n{\n    public int Id { get; set; }\n    public decimal Total { get; }\n}\n\npublic class OrderDto\n{\n    public int Id { get; set; }\n    public decimal Total { get; set; }\n}\n",
    )
    .unwrap();
    fs::write(root.join("src/Mapping/Mappers.cs"), DRAFT).unwrap();
    dir
}

fn parse_args(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("stamp").chain(args.iter().copied())).unwrap()
}

const EXPECTED: &str = "using Shop;\n\nnamespace Shop.Mapping\n{\n    public static class Mappers\n    {\n        public static OrderDto ToDto(this Order source) => new OrderDto { Id = source.Id, Total = source.Total };\n    }\n}\n";

#[test]
fn test_prints_rewritten_document() {
    let dir = create_test_project();
    let args = parse_args(&["src/Mapping/Mappers.cs"]);
    let result = run(&args, dir.path(), io::empty()).unwrap();
    assert_eq!(result.outcome, Outcome::Document(EXPECTED.to_string()));
    assert!(result.warnings.is_empty());
    // Printing leaves the file alone.
    assert_eq!(
        fs::read_to_string(dir.path().join("src/Mapping/Mappers.cs")).unwrap(),
        DRAFT
    );
}

#[test]
fn test_write_replaces_the_document() {
    let dir = create_test_project();
    let args = parse_args(&["--write", "src/Mapping/Mappers.cs"]);
    let result = run(&args, dir.path(), io::empty()).unwrap();
    let path = dir.path().join("src/Mapping/Mappers.cs");
    assert_eq!(
        result.outcome,
        Outcome::Written {
            path: path.clone(),
            generated: 1
        }
    );
    assert_eq!(fs::read_to_string(path).unwrap(), EXPECTED);
}

#[test]
fn test_stdin_draft_replaces_saved_text() {
    let dir = create_test_project();
    let args = parse_args(&["--stdin", "src/Mapping/Mappers.cs"]);
    let unsaved = "using Copy = (Shop.Order, Shop.Order);\nclass Scratch { }\n";
    let outcome = run(&args, dir.path(), unsaved.as_bytes()).unwrap().outcome;
    let Outcome::Document(text) = outcome else {
        panic!("expected a document, got {outcome:?}");
    };
    // Total has no setter, so only Id is copied.
    assert!(text.contains("public static Order Copy(this Order source) => new Order { Id = source.Id };"));
    assert!(text.contains("static class Scratch"));
}

#[test]
fn test_explain_prints_json_report() {
    let dir = create_test_project();
    let args = parse_args(&["--explain", "src/Mapping/Mappers.cs"]);
    let Outcome::Report(json) = run(&args, dir.path(), io::empty()).unwrap().outcome else {
        panic!("expected a report");
    };
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    let spec = &report["specifications"][0];
    assert_eq!(spec["method"], "ToDto");
    assert_eq!(spec["destination"]["qualified_name"], "Shop.OrderDto");
    assert_eq!(spec["members"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_explicit_project_directory() {
    let dir = create_test_project();
    fs::remove_file(dir.path().join("Shop.sln")).unwrap();
    let args = parse_args(&["--project", "src", "src/Mapping/Mappers.cs"]);
    let outcome = run(&args, dir.path(), io::empty()).unwrap().outcome;
    assert_eq!(outcome, Outcome::Document(EXPECTED.to_string()));
}

#[test]
fn test_parse_problems_become_warnings() {
    let dir = create_test_project();
    let args = parse_args(&["--stdin", "src/Mapping/Mappers.cs"]);
    let broken = format!("{DRAFT}}}\n");
    let result = run(&args, dir.path(), broken.as_bytes()).unwrap();
    assert_eq!(result.warnings.len(), 1, "{:?}", result.warnings);
    assert!(
        result.warnings[0].ends_with("(9,1): error STAMP1012: Unexpected token '}'."),
        "{}",
        result.warnings[0]
    );
    let Outcome::Document(text) = result.outcome else {
        panic!("expected a document");
    };
    assert!(text.contains("public static OrderDto ToDto(this Order source)"));
}

#[test]
fn test_non_csharp_document_is_rejected_before_reading() {
    let dir = create_test_project();
    let args = parse_args(&["notes.txt"]);
    let error = run(&args, dir.path(), io::empty()).unwrap_err();
    assert!(error.to_string().contains("is not a C# source document"));
}

#[test]
fn test_missing_document_reports_path() {
    let dir = create_test_project();
    let args = parse_args(&["src/Mapping/Missing.cs"]);
    let error = run(&args, dir.path(), io::empty()).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("failed to read"), "{message}");
    assert!(message.contains(&Path::new("src/Mapping/Missing.cs").display().to_string()));
}
