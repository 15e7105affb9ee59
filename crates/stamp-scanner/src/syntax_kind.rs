//! Token kinds and keyword tables.

use serde::Serialize;

/// Kinds of tokens produced by the scanner.
///
/// Contextual keywords (`record`, `get`, `set`, `init`, `global`, `partial`,
/// `where`, ...) scan as `Identifier`; the parser checks their text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,
    // Literals
    NumericLiteral,
    StringLiteral,
    CharacterLiteral,
    Identifier,
    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    CommaToken,
    SemicolonToken,
    ColonToken,
    ColonColonToken,
    QuestionToken,
    QuestionQuestionToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    EqualsEqualsToken,
    EqualsGreaterThanToken,
    ExclamationToken,
    ExclamationEqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    TildeToken,
    HashToken,
    /// Compound operators the declaration parser never inspects (`&&`, `+=`, `<<`, ...)
    OperatorToken,
    // Reserved keywords
    AbstractKeyword,
    AsKeyword,
    BaseKeyword,
    BoolKeyword,
    BreakKeyword,
    ByteKeyword,
    CaseKeyword,
    CatchKeyword,
    CharKeyword,
    CheckedKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DecimalKeyword,
    DefaultKeyword,
    DelegateKeyword,
    DoKeyword,
    DoubleKeyword,
    ElseKeyword,
    EnumKeyword,
    EventKeyword,
    ExplicitKeyword,
    ExternKeyword,
    FalseKeyword,
    FinallyKeyword,
    FixedKeyword,
    FloatKeyword,
    ForKeyword,
    ForEachKeyword,
    GotoKeyword,
    IfKeyword,
    ImplicitKeyword,
    InKeyword,
    IntKeyword,
    InterfaceKeyword,
    InternalKeyword,
    IsKeyword,
    LockKeyword,
    LongKeyword,
    NamespaceKeyword,
    NewKeyword,
    NullKeyword,
    ObjectKeyword,
    OperatorKeyword,
    OutKeyword,
    OverrideKeyword,
    ParamsKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadOnlyKeyword,
    RefKeyword,
    ReturnKeyword,
    SByteKeyword,
    SealedKeyword,
    ShortKeyword,
    SizeOfKeyword,
    StackAllocKeyword,
    StaticKeyword,
    StringKeyword,
    StructKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    UIntKeyword,
    ULongKeyword,
    UncheckedKeyword,
    UnsafeKeyword,
    UShortKeyword,
    UsingKeyword,
    VirtualKeyword,
    VoidKeyword,
    VolatileKeyword,
    WhileKeyword,
}

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("abstract", SyntaxKind::AbstractKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("base", SyntaxKind::BaseKeyword),
    ("bool", SyntaxKind::BoolKeyword),
    ("break", SyntaxKind::BreakKeyword),
    ("byte", SyntaxKind::ByteKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("char", SyntaxKind::CharKeyword),
    ("checked", SyntaxKind::CheckedKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("decimal", SyntaxKind::DecimalKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("delegate", SyntaxKind::DelegateKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("double", SyntaxKind::DoubleKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("event", SyntaxKind::EventKeyword),
    ("explicit", SyntaxKind::ExplicitKeyword),
    ("extern", SyntaxKind::ExternKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("finally", SyntaxKind::FinallyKeyword),
    ("fixed", SyntaxKind::FixedKeyword),
    ("float", SyntaxKind::FloatKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("foreach", SyntaxKind::ForEachKeyword),
    ("goto", SyntaxKind::GotoKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("implicit", SyntaxKind::ImplicitKeyword),
    ("in", SyntaxKind::InKeyword),
    ("int", SyntaxKind::IntKeyword),
    ("interface", SyntaxKind::InterfaceKeyword),
    ("internal", SyntaxKind::InternalKeyword),
    ("is", SyntaxKind::IsKeyword),
    ("lock", SyntaxKind::LockKeyword),
    ("long", SyntaxKind::LongKeyword),
    ("namespace", SyntaxKind::NamespaceKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("operator", SyntaxKind::OperatorKeyword),
    ("out", SyntaxKind::OutKeyword),
    ("override", SyntaxKind::OverrideKeyword),
    ("params", SyntaxKind::ParamsKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("readonly", SyntaxKind::ReadOnlyKeyword),
    ("ref", SyntaxKind::RefKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("sbyte", SyntaxKind::SByteKeyword),
    ("sealed", SyntaxKind::SealedKeyword),
    ("short", SyntaxKind::ShortKeyword),
    ("sizeof", SyntaxKind::SizeOfKeyword),
    ("stackalloc", SyntaxKind::StackAllocKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("struct", SyntaxKind::StructKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("throw", SyntaxKind::ThrowKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("uint", SyntaxKind::UIntKeyword),
    ("ulong", SyntaxKind::ULongKeyword),
    ("unchecked", SyntaxKind::UncheckedKeyword),
    ("unsafe", SyntaxKind::UnsafeKeyword),
    ("ushort", SyntaxKind::UShortKeyword),
    ("using", SyntaxKind::UsingKeyword),
    ("virtual", SyntaxKind::VirtualKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("volatile", SyntaxKind::VolatileKeyword),
    ("while", SyntaxKind::WhileKeyword),
];

/// Look up a reserved keyword by its text.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    KEYWORDS
        .binary_search_by(|(kw, _)| kw.cmp(&text))
        .ok()
        .map(|idx| KEYWORDS[idx].1)
}

/// Text of a reserved keyword, or `None` for other kinds.
pub fn keyword_to_text(kind: SyntaxKind) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|(text, _)| *text)
}

/// Text of a punctuation token, or `None` for other kinds.
pub const fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    Some(match kind {
        SyntaxKind::OpenBraceToken => "{",
        SyntaxKind::CloseBraceToken => "}",
        SyntaxKind::OpenParenToken => "(",
        SyntaxKind::CloseParenToken => ")",
        SyntaxKind::OpenBracketToken => "[",
        SyntaxKind::CloseBracketToken => "]",
        SyntaxKind::DotToken => ".",
        SyntaxKind::CommaToken => ",",
        SyntaxKind::SemicolonToken => ";",
        SyntaxKind::ColonToken => ":",
        SyntaxKind::ColonColonToken => "::",
        SyntaxKind::QuestionToken => "?",
        SyntaxKind::QuestionQuestionToken => "??",
        SyntaxKind::QuestionDotToken => "?.",
        SyntaxKind::LessThanToken => "<",
        SyntaxKind::GreaterThanToken => ">",
        SyntaxKind::EqualsToken => "=",
        SyntaxKind::EqualsEqualsToken => "==",
        SyntaxKind::EqualsGreaterThanToken => "=>",
        SyntaxKind::ExclamationToken => "!",
        SyntaxKind::ExclamationEqualsToken => "!=",
        SyntaxKind::PlusToken => "+",
        SyntaxKind::MinusToken => "-",
        SyntaxKind::AsteriskToken => "*",
        SyntaxKind::SlashToken => "/",
        SyntaxKind::PercentToken => "%",
        SyntaxKind::AmpersandToken => "&",
        SyntaxKind::BarToken => "|",
        SyntaxKind::CaretToken => "^",
        SyntaxKind::TildeToken => "~",
        SyntaxKind::HashToken => "#",
        _ => return None,
    })
}

pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    (kind as u16) >= (SyntaxKind::AbstractKeyword as u16)
        && (kind as u16) <= (SyntaxKind::WhileKeyword as u16)
}

pub fn token_is_identifier_or_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || token_is_keyword(kind)
}

pub fn token_is_punctuation(kind: SyntaxKind) -> bool {
    (kind as u16) >= (SyntaxKind::OpenBraceToken as u16)
        && (kind as u16) <= (SyntaxKind::OperatorToken as u16)
}

pub const fn token_is_literal(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral | SyntaxKind::CharacterLiteral
    )
}

/// Keywords that name built-in types (`int`, `string`, `object`, ...).
pub const fn token_is_predefined_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::BoolKeyword
            | SyntaxKind::ByteKeyword
            | SyntaxKind::SByteKeyword
            | SyntaxKind::CharKeyword
            | SyntaxKind::DecimalKeyword
            | SyntaxKind::DoubleKeyword
            | SyntaxKind::FloatKeyword
            | SyntaxKind::IntKeyword
            | SyntaxKind::UIntKeyword
            | SyntaxKind::LongKeyword
            | SyntaxKind::ULongKeyword
            | SyntaxKind::ShortKeyword
            | SyntaxKind::UShortKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::VoidKeyword
    )
}

/// Keywords that can appear as declaration modifiers.
pub const fn token_is_modifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::InternalKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::SealedKeyword
            | SyntaxKind::VirtualKeyword
            | SyntaxKind::OverrideKeyword
            | SyntaxKind::ReadOnlyKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::ExternKeyword
            | SyntaxKind::UnsafeKeyword
            | SyntaxKind::VolatileKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::RefKeyword
            | SyntaxKind::FixedKeyword
    )
}

/// Kinds that open a bracketed group.
pub const fn token_opens_group(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenBraceToken | SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken
    )
}

/// Kinds that close a bracketed group.
pub const fn token_closes_group(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CloseBraceToken | SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken
    )
}
