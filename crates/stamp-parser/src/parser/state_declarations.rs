//! Compilation unit, namespace, using directive and type declaration parsing.

use stamp_common::Span;
use stamp_common::diagnostics::diagnostic_codes;
use stamp_scanner::{SyntaxKind, token_is_identifier_or_keyword, token_is_modifier};

use super::state::ParserState;
use crate::syntax::{
    BaseType, CompilationUnit, NamespaceDecl, NamespaceMember, Parameter, RawDecl, TypeBody,
    TypeDecl, TypeKind, UsingDirective,
};

/// Contextual keywords that act as modifiers when another name follows.
const CONTEXTUAL_MODIFIERS: &[&str] = &["partial", "file", "required", "async", "scoped"];

/// Everything a compilation unit or namespace body can hold.
#[derive(Default)]
struct NamespaceContents {
    externs: Vec<RawDecl>,
    usings: Vec<UsingDirective>,
    attributes: Vec<RawDecl>,
    members: Vec<NamespaceMember>,
}

impl ParserState {
    /// Parse the whole token stream as one compilation unit.
    pub fn parse_source_file(&mut self) -> CompilationUnit {
        let _span = tracing::debug_span!("parse_source_file", file = %self.file_name).entered();
        let contents = self.parse_namespace_contents(false);
        let trailing_trivia = self.leading_trivia();
        tracing::debug!(
            usings = contents.usings.len(),
            members = contents.members.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed compilation unit"
        );
        CompilationUnit {
            file_name: self.file_name.clone(),
            externs: contents.externs,
            usings: contents.usings,
            attributes: contents.attributes,
            members: contents.members,
            trailing_trivia,
            span: Span::new(0, self.source.len() as u32),
        }
    }

    /// Parse namespace members until end of file, or until `}` when `in_block`.
    fn parse_namespace_contents(&mut self, in_block: bool) -> NamespaceContents {
        let mut contents = NamespaceContents::default();
        loop {
            if self.at_eof() {
                if in_block {
                    self.error_at_current(diagnostic_codes::EXPECTED_TOKEN, &["}"]);
                }
                break;
            }
            if self.is(SyntaxKind::CloseBraceToken) {
                if in_block {
                    break;
                }
                self.error_at_current(diagnostic_codes::UNEXPECTED_TOKEN, &["}"]);
                self.advance();
                continue;
            }

            let start = self.pos;
            if self.is(SyntaxKind::ExternKeyword) && self.nth_is_contextual(1, "alias") {
                if let Some(raw) = self.parse_raw_declaration() {
                    contents.externs.push(raw);
                }
            } else if self.is_using_directive_start() {
                match self.try_parse_using_directive() {
                    Some(using) => contents.usings.push(using),
                    None => {
                        if let Some(raw) = self.parse_raw_declaration() {
                            contents.members.push(NamespaceMember::Raw(raw));
                        }
                    }
                }
            } else if self.is_global_attribute_start() {
                if let Some(raw) = self.parse_raw_declaration() {
                    contents.attributes.push(raw);
                }
            } else if self.is(SyntaxKind::NamespaceKeyword) && self.enter_declaration() {
                let namespace = self.parse_namespace_declaration();
                self.exit_declaration();
                contents.members.push(NamespaceMember::Namespace(namespace));
            } else if self.is_type_declaration_start() && self.enter_declaration() {
                let decl = self.parse_type_declaration();
                self.exit_declaration();
                contents.members.push(NamespaceMember::Type(decl));
            } else if let Some(raw) = self.parse_raw_declaration() {
                contents.members.push(NamespaceMember::Raw(raw));
            }

            if self.pos == start {
                self.error_at_current(diagnostic_codes::DECLARATION_EXPECTED, &[]);
                self.advance();
            }
        }
        contents
    }

    /// Skip one declaration or statement and keep it as text.
    pub(crate) fn parse_raw_declaration(&mut self) -> Option<RawDecl> {
        let first = self.pos;
        let leading_trivia = self.leading_trivia();
        if self.is_global_attribute_start() {
            self.skip_balanced();
        } else {
            self.skip_member();
        }
        if self.pos == first {
            return None;
        }
        let (text, span) = self.verbatim(first, self.pos);
        Some(RawDecl {
            leading_trivia,
            text,
            span,
        })
    }

    /// `[assembly: ...]` or `[module: ...]`
    fn is_global_attribute_start(&self) -> bool {
        self.is(SyntaxKind::OpenBracketToken)
            && (self.nth_is_contextual(1, "assembly") || self.nth_is_contextual(1, "module"))
            && self.nth_kind(2) == SyntaxKind::ColonToken
    }

    // =========================================================================
    // Using directives
    // =========================================================================

    fn is_using_directive_start(&self) -> bool {
        self.is(SyntaxKind::UsingKeyword)
            || (self.is_contextual("global") && self.nth_kind(1) == SyntaxKind::UsingKeyword)
    }

    /// Parse `[global] using [static] [Alias =] Target;`.
    ///
    /// Returns `None` with the position restored for `using` statements.
    fn try_parse_using_directive(&mut self) -> Option<UsingDirective> {
        let saved = self.pos;
        let leading_trivia = self.leading_trivia();
        let start = self.token().start;

        let is_global = self.is_contextual("global");
        if is_global {
            self.advance();
        }
        self.advance();
        let is_static = self.eat(SyntaxKind::StaticKeyword);

        let mut alias = None;
        if self.is(SyntaxKind::Identifier) && self.nth_kind(1) == SyntaxKind::EqualsToken {
            let token = self.advance();
            alias = Some(self.token_text(token).to_string());
            self.advance();
        }

        let target = self.try_parse_type();
        match target {
            Some(target) if self.is(SyntaxKind::SemicolonToken) => {
                let end = self.advance().end;
                Some(UsingDirective {
                    leading_trivia,
                    is_global,
                    is_static,
                    alias,
                    target,
                    span: Span::new(start, end),
                })
            }
            _ => {
                self.pos = saved;
                None
            }
        }
    }

    // =========================================================================
    // Namespaces
    // =========================================================================

    fn parse_namespace_declaration(&mut self) -> NamespaceDecl {
        let leading_trivia = self.leading_trivia();
        let start = self.advance().start;
        let name = self.parse_dotted_name();

        let is_file_scoped = self.eat(SyntaxKind::SemicolonToken);
        let mut contents = NamespaceContents::default();
        let mut closing_trivia = Vec::new();
        if is_file_scoped {
            contents = self.parse_namespace_contents(false);
        } else if self.expect(SyntaxKind::OpenBraceToken) {
            contents = self.parse_namespace_contents(true);
            closing_trivia = self.leading_trivia();
            self.expect(SyntaxKind::CloseBraceToken);
            self.eat(SyntaxKind::SemicolonToken);
        }
        // Assembly attributes are only legal at the top level; keep them as members.
        contents
            .members
            .extend(contents.attributes.into_iter().map(NamespaceMember::Raw));
        NamespaceDecl {
            leading_trivia,
            name,
            is_file_scoped,
            externs: contents.externs,
            usings: contents.usings,
            members: contents.members,
            closing_trivia,
            span: Span::new(start, self.previous().end),
        }
    }

    fn parse_dotted_name(&mut self) -> String {
        let mut parts = Vec::new();
        loop {
            match self.expect_identifier() {
                Some(part) => parts.push(part),
                None => break,
            }
            if !self.eat(SyntaxKind::DotToken) {
                break;
            }
        }
        parts.join(".")
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    /// Whether the token at `offset` is a contextual modifier applied to a following name.
    pub(crate) fn is_contextual_modifier_at(&self, offset: usize) -> bool {
        let token = self.nth(offset);
        token.kind == SyntaxKind::Identifier
            && CONTEXTUAL_MODIFIERS.contains(&self.token_text(token))
            && token_is_identifier_or_keyword(self.nth_kind(offset + 1))
    }

    /// Offset of the first token after a balanced group starting at `offset`.
    pub(crate) fn skip_group_ahead(&self, offset: usize) -> usize {
        let mut depth = 0usize;
        let mut i = offset;
        loop {
            match self.nth_kind(i) {
                SyntaxKind::EndOfFileToken => return i,
                SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBraceToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// Offset of the first token after leading attribute lists and modifiers.
    pub(crate) fn skip_attributes_and_modifiers_ahead(&self) -> usize {
        let mut i = 0;
        loop {
            let kind = self.nth_kind(i);
            if kind == SyntaxKind::OpenBracketToken {
                i = self.skip_group_ahead(i);
            } else if token_is_modifier(kind) || self.is_contextual_modifier_at(i) {
                i += 1;
            } else {
                return i;
            }
        }
    }

    /// Whether a class, struct, interface, enum or record declaration starts here.
    pub(crate) fn is_type_declaration_start(&self) -> bool {
        let i = self.skip_attributes_and_modifiers_ahead();
        match self.nth_kind(i) {
            SyntaxKind::ClassKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::EnumKeyword => true,
            SyntaxKind::Identifier => {
                self.nth_is_contextual(i, "record")
                    && matches!(
                        self.nth_kind(i + 1),
                        SyntaxKind::Identifier | SyntaxKind::ClassKeyword | SyntaxKind::StructKeyword
                    )
            }
            _ => false,
        }
    }

    /// Attribute lists as written, one entry per `[...]`.
    pub(crate) fn parse_attribute_lists(&mut self) -> Vec<String> {
        let mut attributes = Vec::new();
        while self.is(SyntaxKind::OpenBracketToken) {
            let first = self.pos;
            self.skip_balanced();
            attributes.push(self.single_line_text(first, self.pos));
        }
        attributes
    }

    /// Modifier keywords as written, including contextual ones.
    pub(crate) fn parse_modifiers(&mut self) -> Vec<String> {
        let mut modifiers = Vec::new();
        while token_is_modifier(self.kind()) || self.is_contextual_modifier_at(0) {
            let token = self.advance();
            modifiers.push(self.token_text(token).to_string());
        }
        modifiers
    }

    /// Parse a type declaration; the caller has checked `is_type_declaration_start`.
    pub(crate) fn parse_type_declaration(&mut self) -> TypeDecl {
        let leading_trivia = self.leading_trivia();
        let start = self.token().start;
        let attributes = self.parse_attribute_lists();
        let modifiers = self.parse_modifiers();

        let (kind, keyword) = self.parse_type_keyword();
        let name = self.expect_identifier().unwrap_or_default();
        let _span = tracing::trace_span!("type_declaration", %name).entered();

        let type_parameters = if self.is(SyntaxKind::LessThanToken) {
            self.parse_type_parameter_list()
        } else {
            Vec::new()
        };
        let parameters = if self.is(SyntaxKind::OpenParenToken) {
            Some(self.parse_parameter_list())
        } else {
            None
        };
        let base_types = if self.eat(SyntaxKind::ColonToken) {
            self.parse_base_list()
        } else {
            Vec::new()
        };
        let constraints = self.parse_constraint_clauses();

        let mut closing_trivia = Vec::new();
        let body = match self.kind() {
            SyntaxKind::OpenBraceToken if kind == TypeKind::Enum => {
                let (body, trivia) = self.parse_enum_body();
                closing_trivia = trivia;
                body
            }
            SyntaxKind::OpenBraceToken => {
                self.advance();
                let members = self.parse_type_members();
                closing_trivia = self.leading_trivia();
                self.expect(SyntaxKind::CloseBraceToken);
                TypeBody::Members(members)
            }
            SyntaxKind::SemicolonToken => TypeBody::None,
            _ => {
                self.error_at_current(diagnostic_codes::EXPECTED_TOKEN, &["{"]);
                TypeBody::None
            }
        };
        self.eat(SyntaxKind::SemicolonToken);

        TypeDecl {
            leading_trivia,
            attributes,
            modifiers,
            kind,
            keyword,
            name,
            type_parameters,
            parameters,
            base_types,
            constraints,
            body,
            closing_trivia,
            span: Span::new(start, self.previous().end),
        }
    }

    fn parse_type_keyword(&mut self) -> (TypeKind, String) {
        let kind = match self.kind() {
            SyntaxKind::ClassKeyword => TypeKind::Class,
            SyntaxKind::StructKeyword => TypeKind::Struct,
            SyntaxKind::InterfaceKeyword => TypeKind::Interface,
            SyntaxKind::EnumKeyword => TypeKind::Enum,
            _ => {
                self.advance();
                return match self.kind() {
                    SyntaxKind::ClassKeyword => {
                        self.advance();
                        (TypeKind::Record, "record class".to_string())
                    }
                    SyntaxKind::StructKeyword => {
                        self.advance();
                        (TypeKind::RecordStruct, "record struct".to_string())
                    }
                    _ => (TypeKind::Record, "record".to_string()),
                };
            }
        };
        let token = self.advance();
        (kind, self.token_text(token).to_string())
    }

    /// `<in T, out U, [A] V>`, each entry as written.
    fn parse_type_parameter_list(&mut self) -> Vec<String> {
        self.advance();
        let mut parameters = Vec::new();
        let mut first = self.pos;
        loop {
            match self.kind() {
                SyntaxKind::CommaToken => {
                    parameters.push(self.single_line_text(first, self.pos));
                    self.advance();
                    first = self.pos;
                }
                SyntaxKind::GreaterThanToken => {
                    parameters.push(self.single_line_text(first, self.pos));
                    self.advance();
                    break;
                }
                SyntaxKind::OpenBracketToken => self.skip_balanced(),
                SyntaxKind::Identifier | SyntaxKind::InKeyword | SyntaxKind::OutKeyword => {
                    self.advance();
                }
                _ => {
                    self.error_at_current(diagnostic_codes::EXPECTED_TOKEN, &[">"]);
                    break;
                }
            }
        }
        parameters.retain(|p| !p.is_empty());
        parameters
    }

    /// `(int X, [property: Json] string Y = "")`
    pub(crate) fn parse_parameter_list(&mut self) -> Vec<Parameter> {
        self.advance();
        let mut parameters = Vec::new();
        while !self.is(SyntaxKind::CloseParenToken) && !self.at_eof() {
            let start = self.pos;
            let attributes = self.parse_attribute_lists();
            let mut modifiers = Vec::new();
            while matches!(
                self.kind(),
                SyntaxKind::ThisKeyword
                    | SyntaxKind::RefKeyword
                    | SyntaxKind::OutKeyword
                    | SyntaxKind::InKeyword
                    | SyntaxKind::ParamsKeyword
                    | SyntaxKind::ReadOnlyKeyword
            ) || self.is_contextual_modifier_at(0)
            {
                let token = self.advance();
                modifiers.push(self.token_text(token).to_string());
            }
            let ty = self.parse_type();
            let name = self.expect_identifier();
            let default = if self.eat(SyntaxKind::EqualsToken) {
                let first = self.pos;
                self.skip_until_list_separator();
                Some(self.single_line_text(first, self.pos))
            } else {
                None
            };
            if let (Some(ty), Some(name)) = (ty, name) {
                parameters.push(Parameter {
                    attributes,
                    modifiers,
                    ty,
                    name,
                    default,
                });
            } else {
                self.skip_until_list_separator();
            }
            if !self.eat(SyntaxKind::CommaToken) && self.pos == start {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParenToken);
        parameters
    }

    /// Advance to the next `,` or closing `)` at depth zero.
    fn skip_until_list_separator(&mut self) {
        loop {
            match self.kind() {
                SyntaxKind::CommaToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => self.skip_balanced(),
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn parse_base_list(&mut self) -> Vec<BaseType> {
        let mut base_types = Vec::new();
        loop {
            let Some(ty) = self.parse_type() else {
                break;
            };
            let arguments = if self.is(SyntaxKind::OpenParenToken) {
                let first = self.pos;
                self.skip_balanced();
                Some(self.single_line_text(first, self.pos))
            } else {
                None
            };
            base_types.push(BaseType { ty, arguments });
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        base_types
    }

    /// `where T : class, new()` clauses, each collapsed onto one line.
    fn parse_constraint_clauses(&mut self) -> Vec<String> {
        let mut constraints = Vec::new();
        while self.is_contextual("where") && self.nth_kind(1) == SyntaxKind::Identifier {
            let first = self.pos;
            self.advance();
            while !matches!(
                self.kind(),
                SyntaxKind::OpenBraceToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::EqualsGreaterThanToken
                    | SyntaxKind::EndOfFileToken
            ) && !self.is_contextual("where")
            {
                if self.is(SyntaxKind::OpenParenToken) {
                    self.skip_balanced();
                } else {
                    self.advance();
                }
            }
            constraints.push(self.single_line_text(first, self.pos));
        }
        constraints
    }

    fn parse_enum_body(&mut self) -> (TypeBody, Vec<String>) {
        let open = self.pos;
        self.skip_balanced();
        if self.previous().kind != SyntaxKind::CloseBraceToken {
            let (text, _) = self.verbatim(open + 1, self.pos);
            return (TypeBody::Enum(text), Vec::new());
        }
        let close = self.pos - 1;
        let closing_trivia = self.leading_trivia_at(close);
        let (text, _) = self.verbatim(open + 1, close);
        (TypeBody::Enum(text), closing_trivia)
    }

    /// Token text with each source line trimmed and lines joined by a space.
    pub(crate) fn single_line_text(&self, first: usize, end_idx: usize) -> String {
        let text = self.exact_text(first, end_idx);
        if !text.contains('\n') {
            return text;
        }
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
