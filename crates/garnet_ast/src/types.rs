//! Flag types attached to tokens.

bitflags::bitflags! {
    /// Spacing facts the lexer records on every token. The parser uses them
    /// for the whitespace-sensitive rules (`foo [1]` vs `foo[1]`, `foo -1`
    /// vs `foo - 1`, `foo *args` vs `foo * args`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u8 {
        const NONE                  = 0;
        /// Spaces or tabs directly before the token.
        const PRECEDING_WHITESPACE  = 1 << 0;
        /// A swallowed line break before the token (inside brackets or after
        /// a line continuation).
        const PRECEDING_LINE_BREAK  = 1 << 1;
        /// Whitespace, a line break or end of input directly after the token.
        const TRAILING_WHITESPACE   = 1 << 2;
    }
}

impl TokenFlags {
    /// Whether the token is separated from what precedes it.
    #[inline]
    pub fn is_spaced_before(self) -> bool {
        self.intersects(TokenFlags::PRECEDING_WHITESPACE | TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// `-x`, `*x`, `&x`, `[x` written as a prefix: space before, none after.
    #[inline]
    pub fn is_prefix_position(self) -> bool {
        self.is_spaced_before() && !self.contains(TokenFlags::TRAILING_WHITESPACE)
    }
}
