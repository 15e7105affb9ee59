use clap::Parser;
use std::path::Path;

use crate::args::{Body, CliArgs, NewLine};
use crate::tracing_config::LogFormat;
use stamp_core::{BodyStyle, NewLineKind, PrinterOptions};

#[test]
fn test_defaults() {
    let args = CliArgs::try_parse_from(["stamp", "Mappers.cs"]).unwrap();
    assert_eq!(args.file, Path::new("Mappers.cs"));
    assert!(args.project.is_none());
    assert!(!args.write && !args.stdin && !args.explain);
    assert_eq!(args.rewrite_options().printer, PrinterOptions::default());
}

#[test]
fn test_formatting_flags_override_defaults() {
    let args = CliArgs::try_parse_from([
        "stamp",
        "Mappers.cs",
        "--new-line",
        "CRLF",
        "--indent-size",
        "2",
        "--body-style",
        "block",
        "--max-line-width",
        "80",
    ])
    .unwrap();
    assert_eq!(args.new_line, Some(NewLine::Crlf));
    assert_eq!(args.body_style, Some(Body::Block));

    let printer = args.rewrite_options().printer;
    assert_eq!(printer.new_line, NewLineKind::CarriageReturnLineFeed);
    assert_eq!(printer.indent_size, 2);
    assert_eq!(printer.body_style, BodyStyle::Block);
    assert_eq!(printer.max_line_width, 80);
}

#[test]
fn test_out_of_range_values_are_rejected() {
    assert!(CliArgs::try_parse_from(["stamp", "M.cs", "--indent-size", "0"]).is_err());
    assert!(CliArgs::try_parse_from(["stamp", "M.cs", "--max-line-width", "10"]).is_err());
    assert!(CliArgs::try_parse_from(["stamp", "M.cs", "--body-style", "lambda"]).is_err());
}

#[test]
fn test_write_conflicts_with_explain() {
    assert!(CliArgs::try_parse_from(["stamp", "M.cs", "--write", "--explain"]).is_err());
    assert!(CliArgs::try_parse_from(["stamp", "M.cs", "-w", "--stdin", "-p", "proj"]).is_ok());
}

#[test]
fn test_document_is_required() {
    assert!(CliArgs::try_parse_from(["stamp"]).is_err());
}

#[test]
fn test_log_format_names() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse("fancy"), LogFormat::Text);
}
