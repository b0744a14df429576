//! Parser utility functions.

use garnet_ast::node::Node;
use garnet_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start a value, as used for the optional
/// operand of `return`, `yield`, `break` and `next`. Statement modifiers
/// (`if`, `unless`, `while`, `until`, `rescue`) never do.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::ConstantIdentifier
                | SyntaxKind::InstanceVariable
                | SyntaxKind::ClassVariable
                | SyntaxKind::GlobalVariable
                | SyntaxKind::Label
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::ColonColonToken
                | SyntaxKind::MinusGreaterThanToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
                | SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::NilKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::SelfKeyword
                | SyntaxKind::FileKeyword
                | SyntaxKind::LineKeyword
                | SyntaxKind::NotKeyword
                | SyntaxKind::BeginKeyword
                | SyntaxKind::CaseKeyword
                | SyntaxKind::DefKeyword
        )
}

/// Operator tokens that may name a method (`def <=>`, `5.!`, `alias + add`).
pub fn is_operator_method_name(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::AsteriskToken
            | SyntaxKind::AsteriskAsteriskToken
            | SyntaxKind::SlashToken
            | SyntaxKind::PercentToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::LessThanEqualsGreaterThanToken
            | SyntaxKind::EqualsEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsTildeToken
            | SyntaxKind::ExclamationTildeToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::BarToken
            | SyntaxKind::CaretToken
            | SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
    )
}

/// Whether a node may appear on the left of a multiple assignment.
pub fn is_multiple_assignment_target(node: &Node) -> bool {
    match node {
        Node::BareReference(_)
        | Node::InstanceVariable(_)
        | Node::ClassVariable(_)
        | Node::GlobalVariable(_)
        | Node::Constant(_)
        | Node::StarSplat(_) => true,
        Node::Call(call) => call.block.is_none() && call.target.is_some() && (call.name == "[]" || call.args.is_empty()),
        _ => false,
    }
}
