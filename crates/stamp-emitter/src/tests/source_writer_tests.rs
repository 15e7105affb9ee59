use crate::options::{NewLineKind, PrinterOptions};
use crate::source_writer::SourceWriter;

#[test]
fn test_indentation_is_applied_lazily() {
    let mut writer = SourceWriter::new(&PrinterOptions::default());
    writer.write_text_line("class A");
    writer.write_text_line("{");
    writer.increase_indent();
    writer.write_line();
    writer.write("int X;");
    assert_eq!(writer.column(), 10);
    writer.write_line();
    writer.decrease_indent();
    writer.write_text_line("}");
    assert_eq!(writer.into_string(), "class A\n{\n\n    int X;\n}\n");
}

#[test]
fn test_crlf_and_custom_indent() {
    let options = PrinterOptions {
        new_line: NewLineKind::CarriageReturnLineFeed,
        indent_size: 2,
        ..PrinterOptions::default()
    };
    let mut writer = SourceWriter::new(&options);
    writer.increase_indent();
    writer.write_text_line("a");
    writer.write_raw("  raw");
    writer.ensure_line_start();
    writer.ensure_line_start();
    assert_eq!(writer.get_output(), "  a\r\n  raw\r\n");
}

#[test]
fn test_decrease_indent_saturates() {
    let mut writer = SourceWriter::new(&PrinterOptions::default());
    writer.decrease_indent();
    assert_eq!(writer.indent_level(), 0);
    assert_eq!(writer.column(), 0);
    assert!(writer.is_empty());
}
