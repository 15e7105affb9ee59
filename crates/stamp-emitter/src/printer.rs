//! Document printer.
//!
//! Re-serializes a compilation unit with normalized structure: one using
//! directive per line, blank lines between declarations, braces on their own
//! lines and uniform indentation. Members the parser kept as verbatim text
//! are re-indented but otherwise written as they were.

use stamp_parser::{
    BaseType, CompilationUnit, MemberDecl, NamespaceDecl, NamespaceMember, Parameter, RawDecl,
    TypeBody, TypeDecl, UsingDirective, Verbatim,
};
use tracing::debug;

use crate::document::OutputDocument;
use crate::ir::IRMethod;
use crate::ir_printer::IRPrinter;
use crate::options::PrinterOptions;
use crate::source_writer::SourceWriter;

/// Tracks whether a blank line is due before the next item of a list.
#[derive(Default)]
struct Separator {
    previous_compact: Option<bool>,
}

impl Separator {
    /// Write a blank line unless this is the first item or both this and
    /// the previous item are compact single lines.
    fn next(&mut self, writer: &mut SourceWriter, compact: bool) {
        if let Some(previous) = self.previous_compact
            && !(previous && compact)
        {
            writer.write_line();
        }
        self.previous_compact = Some(compact);
    }

    fn started(&self) -> bool {
        self.previous_compact.is_some()
    }
}

pub struct Printer<'a> {
    document: &'a OutputDocument,
    options: PrinterOptions,
    writer: SourceWriter,
}

impl<'a> Printer<'a> {
    pub fn new(document: &'a OutputDocument, options: &PrinterOptions) -> Self {
        Printer {
            document,
            options: options.clone(),
            writer: SourceWriter::new(options),
        }
    }

    /// Print `document` to a string.
    pub fn print_document(document: &OutputDocument, options: &PrinterOptions) -> String {
        Printer::new(document, options).print()
    }

    pub fn print(mut self) -> String {
        let document = self.document;
        let host = document.host.as_ref().map(|path| path.0.as_slice());
        self.print_unit(&document.unit, host);
        debug!(
            bytes = self.writer.get_output().len(),
            generated = self.document.methods.len(),
            "document printed"
        );
        self.writer.into_string()
    }

    // =========================================================================
    // Compilation unit and namespaces
    // =========================================================================

    fn print_unit(&mut self, unit: &CompilationUnit, host: Option<&[usize]>) {
        let mut separator = Separator::default();
        self.print_header_groups(&unit.externs, &unit.usings, &mut separator);
        if !unit.attributes.is_empty() {
            separator.next(&mut self.writer, false);
            for attribute in &unit.attributes {
                self.print_raw(attribute);
            }
        }
        self.print_namespace_members(&unit.members, host, &mut separator);
        self.print_trivia(&unit.trailing_trivia);
    }

    /// Extern aliases then using directives, each group as one block.
    fn print_header_groups(
        &mut self,
        externs: &[RawDecl],
        usings: &[UsingDirective],
        separator: &mut Separator,
    ) {
        if !externs.is_empty() {
            separator.next(&mut self.writer, false);
            for extern_alias in externs {
                self.print_raw(extern_alias);
            }
        }
        if !usings.is_empty() {
            separator.next(&mut self.writer, false);
            for using in usings {
                self.print_using(using);
            }
        }
    }

    fn print_namespace_members(
        &mut self,
        members: &[NamespaceMember],
        host: Option<&[usize]>,
        separator: &mut Separator,
    ) {
        let document = self.document;
        for (idx, member) in members.iter().enumerate() {
            let inner_host = host
                .and_then(|path| path.split_first())
                .filter(|(first, _)| **first == idx)
                .map(|(_, rest)| rest);
            match member {
                NamespaceMember::Namespace(ns) => {
                    separator.next(&mut self.writer, false);
                    self.print_namespace(ns, inner_host);
                }
                NamespaceMember::Type(decl) => {
                    separator.next(&mut self.writer, false);
                    let generated = inner_host
                        .filter(|rest| rest.is_empty())
                        .map(|_| document.methods.as_slice());
                    self.print_type(decl, generated);
                }
                NamespaceMember::Raw(raw) => {
                    separator.next(&mut self.writer, is_compact(&raw.leading_trivia, &raw.text));
                    self.print_raw(raw);
                }
            }
        }
    }

    fn print_namespace(&mut self, ns: &NamespaceDecl, host: Option<&[usize]>) {
        self.print_trivia(&ns.leading_trivia);
        if ns.is_file_scoped {
            self.writer.write_text_line(&format!("namespace {};", ns.name));
            let mut separator = Separator::default();
            separator.next(&mut self.writer, false);
            self.print_header_groups(&ns.externs, &ns.usings, &mut separator);
            self.print_namespace_members(&ns.members, host, &mut separator);
            self.print_trivia(&ns.closing_trivia);
            return;
        }

        self.writer.write_text_line(&format!("namespace {}", ns.name));
        self.writer.write_text_line("{");
        self.writer.increase_indent();
        let mut separator = Separator::default();
        self.print_header_groups(&ns.externs, &ns.usings, &mut separator);
        self.print_namespace_members(&ns.members, host, &mut separator);
        self.print_trivia(&ns.closing_trivia);
        self.writer.decrease_indent();
        self.writer.write_text_line("}");
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn print_type(&mut self, decl: &TypeDecl, generated: Option<&[IRMethod]>) {
        self.print_trivia(&decl.leading_trivia);
        for attribute in &decl.attributes {
            self.writer.write_text_line(attribute);
        }
        let header = type_header(decl);
        let generated = generated.unwrap_or_default();

        if matches!(decl.body, TypeBody::None) && generated.is_empty() {
            match decl.constraints.split_last() {
                None => self.writer.write_text_line(&format!("{header};")),
                Some((last, rest)) => {
                    self.writer.write_text_line(&header);
                    self.writer.increase_indent();
                    for constraint in rest {
                        self.writer.write_text_line(constraint);
                    }
                    self.writer.write_text_line(&format!("{last};"));
                    self.writer.decrease_indent();
                }
            }
            return;
        }

        self.writer.write_text_line(&header);
        self.print_constraints(&decl.constraints);
        self.writer.write_text_line("{");
        self.writer.increase_indent();
        match &decl.body {
            TypeBody::Enum(text) => {
                self.print_verbatim(text);
                self.print_trivia(&decl.closing_trivia);
            }
            TypeBody::Members(members) => {
                let mut separator = Separator::default();
                for member in members {
                    match member {
                        MemberDecl::Type(nested) => {
                            separator.next(&mut self.writer, false);
                            self.print_type(nested, None);
                        }
                        MemberDecl::Member(member) => {
                            separator.next(
                                &mut self.writer,
                                is_compact(&member.leading_trivia, &member.text),
                            );
                            self.print_trivia(&member.leading_trivia);
                            self.print_verbatim(&member.text);
                        }
                    }
                }
                self.print_trivia(&decl.closing_trivia);
                self.print_generated(generated, separator.started() || !decl.closing_trivia.is_empty());
            }
            TypeBody::None => self.print_generated(generated, false),
        }
        self.writer.decrease_indent();
        self.writer.write_text_line("}");
    }

    fn print_generated(&mut self, methods: &[IRMethod], after_members: bool) {
        for (i, method) in methods.iter().enumerate() {
            if i > 0 || after_members {
                self.writer.write_line();
            }
            IRPrinter::new(&mut self.writer, self.options.max_line_width).emit_method(method);
        }
    }

    fn print_constraints(&mut self, constraints: &[String]) {
        self.writer.increase_indent();
        for constraint in constraints {
            self.writer.write_text_line(constraint);
        }
        self.writer.decrease_indent();
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    fn print_using(&mut self, using: &UsingDirective) {
        self.print_trivia(&using.leading_trivia);
        self.writer.write_text_line(&using_text(using));
    }

    fn print_raw(&mut self, raw: &RawDecl) {
        self.print_trivia(&raw.leading_trivia);
        self.print_verbatim(&raw.text);
    }

    fn print_trivia(&mut self, lines: &[String]) {
        for line in lines {
            self.writer.write_text_line(line);
        }
    }

    fn print_verbatim(&mut self, text: &Verbatim) {
        for line in &text.lines {
            if line.reindent {
                self.writer.write_text_line(&line.text);
            } else {
                self.writer.write_raw(&line.text);
                self.writer.write_line();
            }
        }
    }
}

/// `global using static X;`, `using Alias = Target;`
fn using_text(using: &UsingDirective) -> String {
    let mut text = String::new();
    if using.is_global {
        text.push_str("global ");
    }
    text.push_str("using ");
    if using.is_static {
        text.push_str("static ");
    }
    if let Some(alias) = &using.alias {
        text.push_str(alias);
        text.push_str(" = ");
    }
    text.push_str(&using.target_text());
    text.push(';');
    text
}

fn is_compact(leading_trivia: &[String], text: &Verbatim) -> bool {
    leading_trivia.is_empty() && text.lines.len() == 1
}

fn type_header(decl: &TypeDecl) -> String {
    let mut header = String::new();
    for modifier in &decl.modifiers {
        header.push_str(modifier);
        header.push(' ');
    }
    header.push_str(&decl.keyword);
    header.push(' ');
    header.push_str(&decl.name);
    if !decl.type_parameters.is_empty() {
        header.push('<');
        header.push_str(&decl.type_parameters.join(", "));
        header.push('>');
    }
    if let Some(parameters) = &decl.parameters {
        header.push('(');
        let rendered: Vec<String> = parameters.iter().map(parameter_text).collect();
        header.push_str(&rendered.join(", "));
        header.push(')');
    }
    if !decl.base_types.is_empty() {
        header.push_str(" : ");
        let rendered: Vec<String> = decl.base_types.iter().map(base_type_text).collect();
        header.push_str(&rendered.join(", "));
    }
    header
}

fn parameter_text(parameter: &Parameter) -> String {
    let mut text = String::new();
    for attribute in &parameter.attributes {
        text.push_str(attribute);
        text.push(' ');
    }
    for modifier in &parameter.modifiers {
        text.push_str(modifier);
        text.push(' ');
    }
    text.push_str(&parameter.ty.to_string());
    text.push(' ');
    text.push_str(&parameter.name);
    if let Some(default) = &parameter.default {
        text.push_str(" = ");
        text.push_str(default);
    }
    text
}

fn base_type_text(base: &BaseType) -> String {
    match &base.arguments {
        Some(arguments) => format!("{}{arguments}", base.ty),
        None => base.ty.to_string(),
    }
}
