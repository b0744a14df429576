//! garnet_parser: Recursive descent parser for Ruby source.
//!
//! Pulls tokens from the lazy lexer one at a time and builds the closed
//! [`Node`] tree. A parse either yields the whole program or the first
//! error; independent sources can be parsed in parallel with
//! [`parse_batch`].

mod options;
mod parser;
mod precedence;
mod stack;
mod utilities;

pub use garnet_ast::node::{Node, Program};
pub use garnet_diagnostics::ParseError;
pub use options::ParseOptions;
pub use parser::Parser;
pub use precedence::{binary_operator_precedence, OperatorPrecedence};

use rayon::prelude::*;

/// Parse a source buffer with default options.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    parse_with_options(source, &ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Program, ParseError> {
    Parser::new(source, options).parse_program()
}

/// Parse independent sources in parallel. Results keep the input order.
pub fn parse_batch(sources: &[&str]) -> Vec<Result<Program, ParseError>> {
    sources.par_iter().map(|source| parse(source)).collect()
}
