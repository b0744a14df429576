//! garnet_scanner: Rune scanner and lexer for Ruby source text.
//!
//! The [`Scanner`] is a cursor over the source; the [`Lexer`] drives it as a
//! state machine and produces [`Token`]s, which the parser pulls one at a
//! time through a [`TokenStream`]. Lexing is lazy: a token is only produced
//! when the consumer asks for it.

pub mod char_codes;
mod lexer;
mod scanner;
mod stream;
mod token;

pub use lexer::{LexState, Lexer};
pub use scanner::Scanner;
pub use stream::{tokenize, TokenStream};
pub use token::Token;
