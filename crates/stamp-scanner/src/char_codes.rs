//! Character classification for C# identifiers and trivia.

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

#[inline]
pub const fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}' | '\u{0085}')
}

#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{FEFF}')
        || (!is_line_break(ch) && ch.is_whitespace())
}

#[inline]
pub const fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}
