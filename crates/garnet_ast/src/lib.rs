//! garnet_ast: Abstract syntax tree and token kinds for the garnet front end.
//!
//! The node model is a closed enum handed wholesale to the runtime; the
//! token kinds and flags are shared between the lexer and the parser.

pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::AstVisitor;
