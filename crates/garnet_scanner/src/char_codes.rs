//! Character classes used by the scanner and lexer.

pub const LINE_FEED: char = '\n';
pub const BACKSLASH: char = '\\';

/// Runes that may follow `$` on their own to form a special global
/// (`$:`, `$!`, `$0`, `$~`, ...).
pub const SPECIAL_GLOBAL_CHARS: &str = "!@&`'+~=/\\,;.<>_*$?:\"0";

/// Letters accepted after `%` to select the literal type.
pub const PERCENT_LITERAL_TYPES: &str = "qQwWrx";

/// Regular expression option letters.
pub const REGEX_OPTIONS: &str = "imxounse";

/// Operator method names that may follow `:` to form a symbol, longest first
/// so the lexer can match greedily.
pub const OPERATOR_SYMBOLS: &[&str] = &[
    "[]=", "<=>", "===", "[]", "==", "=~", "!=", "!~", "**", "+@", "-@", "<<", ">>", "<=", ">=",
    "!", "+", "-", "*", "/", "%", "<", ">", "&", "|", "^", "~",
];

/// Check if a character is a line terminator.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    ch == LINE_FEED
}

/// Check if a character is whitespace (not line break). A carriage return
/// counts as whitespace so `\r\n` endings behave like `\n`.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\r'
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{00A0}' // no-break space
            | '\u{FEFF}' // BOM
    )
}

/// Whitespace of any kind, including line breaks.
#[inline]
pub fn is_white_space(ch: char) -> bool {
    is_white_space_single_line(ch) || is_line_break(ch)
}

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && unicode_xid::UnicodeXID::is_xid_start(ch))
}

/// Check if a character can be part of an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric() || (!ch.is_ascii() && unicode_xid::UnicodeXID::is_xid_continue(ch))
}

/// An identifier starting with this character names a constant.
#[inline]
pub fn is_constant_start(ch: char) -> bool {
    ch.is_ascii_uppercase() || (!ch.is_ascii() && ch.is_uppercase())
}

/// Printable ASCII, the range a `?x` character literal covers.
#[inline]
pub fn is_printable_ascii(ch: char) -> bool {
    matches!(ch, '!'..='~')
}

/// The closing delimiter for a percent-literal opener. Brackets pair up;
/// other punctuation closes with itself.
pub fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        '|' | '!' | '/' => Some(open),
        _ => None,
    }
}
