//! Type member parsing.
//!
//! Properties and fields are parsed far enough to know their type, name and
//! accessors. Every member also keeps its full source text so it can be
//! printed unchanged.

use stamp_common::diagnostics::diagnostic_codes;
use stamp_scanner::SyntaxKind;

use super::state::ParserState;
use crate::syntax::{
    Accessor, AccessorKind, FieldDecl, Member, MemberDecl, MemberKind, OtherMemberKind,
    PropertyDecl, TypeSyntax,
};

impl ParserState {
    /// Parse members until the closing `}` of a type body.
    pub(crate) fn parse_type_members(&mut self) -> Vec<MemberDecl> {
        let mut members = Vec::new();
        while !self.is(SyntaxKind::CloseBraceToken) && !self.at_eof() {
            let start = self.pos;
            if self.is_type_declaration_start() && self.enter_declaration() {
                let decl = self.parse_type_declaration();
                self.exit_declaration();
                members.push(MemberDecl::Type(decl));
            } else if let Some(member) = self.parse_member() {
                members.push(MemberDecl::Member(member));
            }
            if self.pos == start {
                let text = self.text().to_string();
                self.error_at_current(diagnostic_codes::UNEXPECTED_TOKEN, &[text.as_str()]);
                self.advance();
            }
        }
        members
    }

    fn parse_member(&mut self) -> Option<Member> {
        let first = self.pos;
        let leading_trivia = self.leading_trivia();
        self.parse_attribute_lists();
        let modifiers = self.parse_modifiers();
        let kind = self.parse_member_kind(modifiers);
        if self.pos == first {
            return None;
        }
        let (text, span) = self.verbatim(first, self.pos);
        Some(Member {
            leading_trivia,
            kind,
            text,
            span,
        })
    }

    /// Classify the member at the cursor and consume the rest of it.
    fn parse_member_kind(&mut self, modifiers: Vec<String>) -> MemberKind {
        let other = match self.kind() {
            SyntaxKind::DelegateKeyword => Some(OtherMemberKind::Delegate),
            SyntaxKind::EventKeyword => Some(OtherMemberKind::Event),
            SyntaxKind::TildeToken => Some(OtherMemberKind::Destructor),
            SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword => {
                Some(OtherMemberKind::Operator)
            }
            SyntaxKind::Identifier if self.nth_kind(1) == SyntaxKind::OpenParenToken => {
                Some(OtherMemberKind::Constructor)
            }
            _ => None,
        };
        if let Some(other) = other {
            self.skip_member();
            return MemberKind::Other(other);
        }

        let Some(ty) = self.try_parse_type() else {
            self.skip_member();
            return MemberKind::Other(OtherMemberKind::Unknown);
        };

        let other = match self.kind() {
            SyntaxKind::OperatorKeyword => OtherMemberKind::Operator,
            SyntaxKind::ThisKeyword => OtherMemberKind::Indexer,
            SyntaxKind::Identifier => match self.nth_kind(1) {
                SyntaxKind::OpenBraceToken | SyntaxKind::EqualsGreaterThanToken => {
                    return self.parse_property(modifiers, ty);
                }
                SyntaxKind::EqualsToken | SyntaxKind::CommaToken | SyntaxKind::SemicolonToken => {
                    return self.parse_field(modifiers, ty);
                }
                SyntaxKind::DotToken | SyntaxKind::ColonColonToken => {
                    OtherMemberKind::ExplicitImplementation
                }
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => OtherMemberKind::Method,
                _ => OtherMemberKind::Unknown,
            },
            _ => OtherMemberKind::Unknown,
        };
        self.skip_member();
        MemberKind::Other(other)
    }

    fn parse_property(&mut self, modifiers: Vec<String>, ty: TypeSyntax) -> MemberKind {
        let name_token = self.advance();
        let name = self.token_text(name_token).to_string();
        let mut property = PropertyDecl {
            modifiers,
            ty,
            name,
            accessors: Vec::new(),
            is_expression_bodied: false,
            has_initializer: false,
        };

        if self.is(SyntaxKind::EqualsGreaterThanToken) {
            property.is_expression_bodied = true;
            self.skip_member();
            return MemberKind::Property(property);
        }

        let open = self.pos;
        self.advance();
        while !self.is(SyntaxKind::CloseBraceToken) && !self.at_eof() {
            let start = self.pos;
            self.parse_attribute_lists();
            let mut accessor_modifiers = Vec::new();
            while matches!(
                self.kind(),
                SyntaxKind::PublicKeyword
                    | SyntaxKind::PrivateKeyword
                    | SyntaxKind::ProtectedKeyword
                    | SyntaxKind::InternalKeyword
                    | SyntaxKind::ReadOnlyKeyword
            ) {
                let token = self.advance();
                accessor_modifiers.push(self.token_text(token).to_string());
            }
            let kind = match self.text() {
                "get" => Some(AccessorKind::Get),
                "set" => Some(AccessorKind::Set),
                "init" => Some(AccessorKind::Init),
                "add" => Some(AccessorKind::Add),
                "remove" => Some(AccessorKind::Remove),
                _ => None,
            };
            match kind {
                Some(kind) if self.is(SyntaxKind::Identifier) => {
                    self.advance();
                    property.accessors.push(Accessor {
                        kind,
                        modifiers: accessor_modifiers,
                    });
                }
                _ => {
                    self.error_at_current(diagnostic_codes::EXPECTED_TOKEN, &["get"]);
                }
            }
            match self.kind() {
                SyntaxKind::SemicolonToken => {
                    self.advance();
                }
                SyntaxKind::OpenBraceToken => self.skip_balanced(),
                SyntaxKind::EqualsGreaterThanToken => self.skip_member(),
                _ => {}
            }
            if self.pos == start {
                self.pos = open;
                self.skip_balanced();
                return MemberKind::Property(property);
            }
        }
        if !self.eat(SyntaxKind::CloseBraceToken) {
            return MemberKind::Property(property);
        }

        if self.is(SyntaxKind::EqualsToken) {
            property.has_initializer = true;
            self.skip_member();
        }
        MemberKind::Property(property)
    }

    fn parse_field(&mut self, modifiers: Vec<String>, ty: TypeSyntax) -> MemberKind {
        let mut names = Vec::new();
        loop {
            let token = self.advance();
            names.push(self.token_text(token).to_string());
            if self.is(SyntaxKind::EqualsToken) {
                self.skip_field_initializer();
            }
            if self.is(SyntaxKind::CommaToken) && self.nth_kind(1) == SyntaxKind::Identifier {
                self.advance();
                continue;
            }
            break;
        }
        if !self.eat(SyntaxKind::SemicolonToken) {
            self.error_at_current(diagnostic_codes::EXPECTED_TOKEN, &[";"]);
            self.skip_member();
        }
        MemberKind::Field(FieldDecl {
            modifiers,
            ty,
            names,
        })
    }

    /// Skip `= value` up to the `;` or the `,` that starts the next declarator.
    ///
    /// Commas inside generic argument lists (`new Dictionary<int, string>()`)
    /// do not end the initializer.
    fn skip_field_initializer(&mut self) {
        self.advance();
        loop {
            match self.kind() {
                SyntaxKind::SemicolonToken | SyntaxKind::EndOfFileToken => return,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => return,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => self.skip_balanced(),
                SyntaxKind::CommaToken
                    if self.nth_kind(1) == SyntaxKind::Identifier
                        && matches!(
                            self.nth_kind(2),
                            SyntaxKind::EqualsToken
                                | SyntaxKind::CommaToken
                                | SyntaxKind::SemicolonToken
                        ) =>
                {
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}
