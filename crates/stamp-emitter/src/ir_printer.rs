//! IR printer - renders generated methods as C# source.

use crate::ir::{IRBody, IRMethod, IRNode, IRParam};
use crate::options::PrinterOptions;
use crate::source_writer::SourceWriter;

/// Writes IR methods into a `SourceWriter` at its current indentation.
pub struct IRPrinter<'w> {
    writer: &'w mut SourceWriter,
    max_line_width: usize,
}

impl<'w> IRPrinter<'w> {
    pub fn new(writer: &'w mut SourceWriter, max_line_width: usize) -> Self {
        IRPrinter {
            writer,
            max_line_width,
        }
    }

    /// Render a node on a single line.
    pub fn emit_to_string(node: &IRNode) -> String {
        let mut out = String::new();
        push_inline(&mut out, node);
        out
    }

    /// Render a method at indentation level zero.
    pub fn method_to_string(method: &IRMethod, options: &PrinterOptions) -> String {
        let mut writer = SourceWriter::new(options);
        IRPrinter::new(&mut writer, options.max_line_width).emit_method(method);
        writer.into_string()
    }

    pub fn emit_method(&mut self, method: &IRMethod) {
        let header = method_header(method);
        match &method.body {
            IRBody::Expression(expr) => {
                let line = format!("{header} => {};", Self::emit_to_string(expr));
                if self.fits(&line) || !is_splittable(expr) {
                    self.writer.write_text_line(&line);
                } else {
                    self.writer.write(&header);
                    self.writer.write(" => ");
                    self.emit_multiline(expr);
                    self.writer.write(";");
                    self.writer.write_line();
                }
            }
            IRBody::Block(statements) => {
                self.writer.write_text_line(&header);
                self.writer.write_text_line("{");
                self.writer.increase_indent();
                for statement in statements {
                    self.emit_statement(statement);
                }
                self.writer.decrease_indent();
                self.writer.write_text_line("}");
            }
        }
    }

    fn emit_statement(&mut self, statement: &IRNode) {
        let line = Self::emit_to_string(statement);
        if self.fits(&line) {
            self.writer.write_text_line(&line);
            return;
        }
        match statement {
            IRNode::ReturnStatement(Some(expr)) if is_splittable(expr) => {
                self.writer.write("return ");
                self.emit_multiline(expr);
                self.writer.write(";");
                self.writer.write_line();
            }
            IRNode::ExpressionStatement(expr) if is_splittable(expr) => {
                self.emit_multiline(expr);
                self.writer.write(";");
                self.writer.write_line();
            }
            _ => self.writer.write_text_line(&line),
        }
    }

    /// An object creation with one initializer entry per line. The closing
    /// brace is left open on its line for the caller's terminator.
    fn emit_multiline(&mut self, expr: &IRNode) {
        let IRNode::ObjectCreation {
            type_name,
            arguments,
            initializers,
        } = expr
        else {
            self.writer.write(&Self::emit_to_string(expr));
            return;
        };

        let mut head = format!("new {type_name}");
        if !arguments.is_empty() {
            push_arguments(&mut head, arguments);
        }
        self.writer.write(&head);
        self.writer.write_line();
        self.writer.write_text_line("{");
        self.writer.increase_indent();
        for (i, initializer) in initializers.iter().enumerate() {
            self.writer.write(&initializer.member);
            self.writer.write(" = ");
            self.writer.write(&Self::emit_to_string(&initializer.value));
            if i + 1 < initializers.len() {
                self.writer.write(",");
            }
            self.writer.write_line();
        }
        self.writer.decrease_indent();
        self.writer.write("}");
    }

    fn fits(&self, line: &str) -> bool {
        self.writer.column() + line.chars().count() <= self.max_line_width
    }
}

fn is_splittable(expr: &IRNode) -> bool {
    matches!(expr, IRNode::ObjectCreation { initializers, .. } if !initializers.is_empty())
}

fn method_header(method: &IRMethod) -> String {
    let mut header = String::new();
    for modifier in &method.modifiers {
        header.push_str(modifier);
        header.push(' ');
    }
    header.push_str(&method.return_type);
    header.push(' ');
    header.push_str(&method.name);
    header.push('(');
    for (i, parameter) in method.parameters.iter().enumerate() {
        if i > 0 {
            header.push_str(", ");
        }
        push_parameter(&mut header, parameter);
    }
    header.push(')');
    header
}

fn push_parameter(out: &mut String, parameter: &IRParam) {
    for modifier in &parameter.modifiers {
        out.push_str(modifier);
        out.push(' ');
    }
    out.push_str(&parameter.type_name);
    out.push(' ');
    out.push_str(&parameter.name);
}

fn push_arguments(out: &mut String, arguments: &[IRNode]) {
    out.push('(');
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_inline(out, argument);
    }
    out.push(')');
}

fn push_inline(out: &mut String, node: &IRNode) {
    match node {
        IRNode::Identifier(name) => out.push_str(name),
        IRNode::MemberAccess { object, member } => {
            push_inline(out, object);
            out.push('.');
            out.push_str(member);
        }
        IRNode::ObjectCreation {
            type_name,
            arguments,
            initializers,
        } => {
            out.push_str("new ");
            out.push_str(type_name);
            if !arguments.is_empty() || initializers.is_empty() {
                push_arguments(out, arguments);
            }
            if !initializers.is_empty() {
                out.push_str(" { ");
                for (i, initializer) in initializers.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&initializer.member);
                    out.push_str(" = ");
                    push_inline(out, &initializer.value);
                }
                out.push_str(" }");
            }
        }
        IRNode::ReturnStatement(expr) => {
            out.push_str("return");
            if let Some(expr) = expr {
                out.push(' ');
                push_inline(out, expr);
            }
            out.push(';');
        }
        IRNode::ExpressionStatement(expr) => {
            push_inline(out, expr);
            out.push(';');
        }
    }
}
