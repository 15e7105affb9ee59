//! Type syntax parsing.

use smallvec::SmallVec;
use stamp_common::diagnostics::diagnostic_codes;
use stamp_common::limits;
use stamp_scanner::{SyntaxKind, token_is_predefined_type};

use super::state::ParserState;
use crate::syntax::{NameSegment, TupleElement, TypeSyntax};

impl ParserState {
    /// Parse a type, reporting `Type expected.` if none is present.
    pub(crate) fn parse_type(&mut self) -> Option<TypeSyntax> {
        let result = self.try_parse_type();
        if result.is_none() {
            self.error_at_current(diagnostic_codes::TYPE_EXPECTED, &[]);
        }
        result
    }

    /// Parse a type speculatively; on failure the position is restored and
    /// nothing is reported.
    pub(crate) fn try_parse_type(&mut self) -> Option<TypeSyntax> {
        let saved = self.pos;
        let result = self.parse_type_worker();
        if result.is_none() {
            self.pos = saved;
        }
        result
    }

    fn parse_type_worker(&mut self) -> Option<TypeSyntax> {
        if self.type_depth >= limits::MAX_TYPE_SYNTAX_DEPTH {
            return None;
        }
        self.type_depth += 1;
        let result = self.parse_type_with_suffixes();
        self.type_depth -= 1;
        result
    }

    fn parse_type_with_suffixes(&mut self) -> Option<TypeSyntax> {
        let mut ty = self.parse_non_array_type()?;
        loop {
            match self.kind() {
                SyntaxKind::QuestionToken => {
                    self.advance();
                    ty = TypeSyntax::Nullable(Box::new(ty));
                }
                SyntaxKind::AsteriskToken => {
                    self.advance();
                    ty = TypeSyntax::Pointer(Box::new(ty));
                }
                SyntaxKind::OpenBracketToken => {
                    let Some(rank) = self.array_rank_ahead() else {
                        break;
                    };
                    // `[` + commas + `]`
                    for _ in 0..rank + 1 {
                        self.advance();
                    }
                    ty = TypeSyntax::Array {
                        element: Box::new(ty),
                        rank,
                    };
                }
                _ => break,
            }
        }
        Some(ty)
    }

    /// If the tokens at the cursor are `[`, `,`*, `]`, the array rank.
    fn array_rank_ahead(&self) -> Option<u32> {
        let mut offset = 1;
        while self.nth_kind(offset) == SyntaxKind::CommaToken {
            offset += 1;
        }
        (self.nth_kind(offset) == SyntaxKind::CloseBracketToken).then_some(offset as u32)
    }

    fn parse_non_array_type(&mut self) -> Option<TypeSyntax> {
        let kind = self.kind();
        if kind == SyntaxKind::OpenParenToken {
            return self.parse_tuple_type();
        }
        if token_is_predefined_type(kind) {
            let token = self.advance();
            return Some(TypeSyntax::Predefined(self.token_text(token).to_string()));
        }
        if kind == SyntaxKind::Identifier {
            return self.parse_named_type();
        }
        None
    }

    fn parse_tuple_type(&mut self) -> Option<TypeSyntax> {
        self.advance();
        let mut elements = Vec::new();
        loop {
            let ty = self.parse_type_worker()?;
            let name = if self.is(SyntaxKind::Identifier) {
                let token = self.advance();
                Some(self.token_text(token).to_string())
            } else {
                None
            };
            elements.push(TupleElement { ty, name });
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        if !self.eat(SyntaxKind::CloseParenToken) || elements.len() < 2 {
            return None;
        }
        Some(TypeSyntax::Tuple(elements))
    }

    fn parse_named_type(&mut self) -> Option<TypeSyntax> {
        let mut alias = None;
        if self.nth_kind(1) == SyntaxKind::ColonColonToken {
            let token = self.advance();
            alias = Some(self.token_text(token).to_string());
            self.advance();
            if !self.is(SyntaxKind::Identifier) {
                return None;
            }
        }

        let mut segments: SmallVec<[NameSegment; 2]> = SmallVec::new();
        loop {
            let token = self.advance();
            let mut segment = NameSegment::new(self.token_text(token));
            if self.is(SyntaxKind::LessThanToken) {
                segment.type_arguments = self.parse_type_arguments()?;
            }
            segments.push(segment);
            if self.is(SyntaxKind::DotToken) && self.nth_kind(1) == SyntaxKind::Identifier {
                self.advance();
                continue;
            }
            break;
        }
        Some(TypeSyntax::Named { alias, segments })
    }

    fn parse_type_arguments(&mut self) -> Option<Vec<TypeSyntax>> {
        self.advance();
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.parse_type_worker()?);
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.eat(SyntaxKind::GreaterThanToken).then_some(arguments)
    }
}
