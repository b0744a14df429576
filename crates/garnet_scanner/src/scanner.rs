//! The rune-level scanner.
//!
//! A cursor over the source text with a read mark. The lexer consumes runes
//! with [`Scanner::next`], steps back once with [`Scanner::backup`] and cuts
//! tokens with [`Scanner::emit`], whose text is exactly the source between
//! the mark and the cursor.

use crate::token::Token;
use garnet_ast::syntax_kind::SyntaxKind;
use garnet_core::text::{TextPos, TextSpan};

/// Cursor over one source buffer. One scanner per parse.
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    source: &'src str,
    /// Read mark: start of the pending token.
    start: usize,
    /// Byte offset of the cursor.
    pos: usize,
    /// Byte width of the rune returned by the most recent `next`.
    width: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            pos: 0,
            width: 0,
        }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Byte offset of the read mark.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Unconsumed text after the cursor.
    #[inline]
    pub fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    /// Text between the read mark and the cursor.
    #[inline]
    pub fn pending(&self) -> &'src str {
        &self.source[self.start..self.pos]
    }

    /// Consume and return one rune; `None` at end of input.
    pub fn next(&mut self) -> Option<char> {
        match self.rest().chars().next() {
            Some(ch) => {
                self.width = ch.len_utf8();
                self.pos += self.width;
                Some(ch)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// Undo the most recent `next`. A second call without an intervening
    /// `next` does nothing.
    pub fn backup(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    /// Look at the next rune without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Look `n` runes past the next one (`peek_nth(0) == peek()`).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Discard the pending text.
    #[inline]
    pub fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Consume the next rune if it is one of `valid`.
    pub fn accept(&mut self, valid: &str) -> bool {
        match self.next() {
            Some(ch) if valid.contains(ch) => true,
            Some(_) => {
                self.backup();
                false
            }
            None => false,
        }
    }

    /// Consume a maximal run of runes from `valid`, returning how many.
    pub fn accept_run(&mut self, valid: &str) -> usize {
        let mut count = 0;
        while self.accept(valid) {
            count += 1;
        }
        count
    }

    /// Consume runes while `pred` holds, returning how many.
    pub fn accept_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.next();
            count += 1;
        }
        count
    }

    /// Consume `text` if the input continues with it.
    pub fn accept_str(&mut self, text: &str) -> bool {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            self.width = 0;
            true
        } else {
            false
        }
    }

    /// Span of the pending text.
    #[inline]
    pub fn pending_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.start as TextPos, self.pos as TextPos)
    }

    /// Cut a token from the pending text and advance the mark.
    pub fn emit(&mut self, kind: SyntaxKind) -> Token {
        let token = Token::new(kind, self.pending(), self.pending_span());
        self.ignore();
        token
    }

    /// Cut a token covering the pending span but carrying `text`. Used when
    /// the token value is not a contiguous slice (heredoc bodies, labels).
    pub fn emit_text(&mut self, kind: SyntaxKind, text: impl Into<String>) -> Token {
        let token = Token::new(kind, text, self.pending_span());
        self.ignore();
        token
    }

    /// Move the cursor and the mark to `pos`.
    pub fn jump_to(&mut self, pos: usize) {
        self.pos = pos.min(self.source.len());
        self.start = self.pos;
        self.width = 0;
    }

    /// Advance to the next line feed without consuming it.
    pub fn skip_to_line_end(&mut self) {
        self.pos = line_end_from(self.source, self.pos);
        self.width = 0;
    }
}

/// Offset of the first `\n` at or after `from`, or the end of `text`.
pub(crate) fn line_end_from(text: &str, from: usize) -> usize {
    memchr::memchr(b'\n', &text.as_bytes()[from..]).map_or(text.len(), |i| from + i)
}
