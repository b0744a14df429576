//! The token channel between the lexer and the parser.

use crate::lexer::Lexer;
use crate::token::Token;
use garnet_diagnostics::Diagnostic;

/// Pull-based token stream. Tokens arrive in source order; the stream ends
/// after the end-of-file token or after a single `Unknown` error token.
pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    done: bool,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            done: false,
        }
    }

    /// The lexical error that ended the stream, if any.
    pub fn take_error(&mut self) -> Option<Diagnostic> {
        self.lexer.take_error()
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.lexer.next_token()?;
        self.done = token.is_terminal();
        Some(token)
    }
}

impl std::iter::FusedIterator for TokenStream<'_> {}

/// Lex a whole source. The returned tokens end with the end-of-file token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Diagnostic> {
    let mut stream = TokenStream::new(source);
    let tokens: Vec<Token> = stream.by_ref().collect();
    match stream.take_error() {
        Some(diagnostic) => Err(diagnostic),
        None => Ok(tokens),
    }
}
