//! Tokens produced by the lexer.

use garnet_ast::syntax_kind::SyntaxKind;
use garnet_ast::types::TokenFlags;
use garnet_core::text::TextSpan;

/// A lexical token. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// The matched text. For delimited literals this is the body without
    /// delimiters; for heredocs it is the body read from the following lines.
    pub text: String,
    pub span: TextSpan,
    pub flags: TokenFlags,
    /// Option letters after a regular expression (`/x/im` gives `"im"`).
    pub suffix: String,
}

impl Token {
    pub fn new(kind: SyntaxKind, text: impl Into<String>, span: TextSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            flags: TokenFlags::NONE,
            suffix: String::new(),
        }
    }

    /// Whether this token ends the stream.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, SyntaxKind::EndOfFileToken | SyntaxKind::Unknown)
    }

    #[inline]
    pub fn has_preceding_whitespace(&self) -> bool {
        self.flags.is_spaced_before()
    }

    #[inline]
    pub fn has_trailing_whitespace(&self) -> bool {
        self.flags.contains(TokenFlags::TRAILING_WHITESPACE)
    }

    /// Text for diagnostics: the fixed spelling of keywords and punctuation,
    /// otherwise the matched text.
    pub fn display_text(&self) -> &str {
        match self.kind {
            SyntaxKind::EndOfFileToken => "end of input",
            SyntaxKind::NewLineToken => "newline",
            _ => self.kind.text().unwrap_or(&self.text),
        }
    }
}
