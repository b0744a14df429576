//! Operator precedence for binary operators.

use garnet_ast::syntax_kind::SyntaxKind;

/// Binary operator precedence levels, lowest to highest. Assignment,
/// ternary, weak logical operators, `not` and ranges bind looser than all of
/// these and are handled by dedicated parse functions; `**` binds tighter
/// than unary minus and is handled next to the unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    LogicalOr = 1,
    LogicalAnd = 2,
    /// `==`, `===`, `!=`, `=~`, `!~`, `<=>`
    Equality = 3,
    Relational = 4,
    /// `|` and `^`
    BitwiseOr = 5,
    BitwiseAnd = 6,
    Shift = 7,
    Additive = 8,
    Multiplicative = 9,
}

/// Get the binary operator precedence for a given token kind.
pub fn binary_operator_precedence(kind: SyntaxKind) -> Option<OperatorPrecedence> {
    let precedence = match kind {
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsTildeToken
        | SyntaxKind::ExclamationTildeToken
        | SyntaxKind::LessThanEqualsGreaterThanToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken => OperatorPrecedence::Relational,
        SyntaxKind::BarToken | SyntaxKind::CaretToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::LessThanLessThanToken | SyntaxKind::GreaterThanGreaterThanToken => {
            OperatorPrecedence::Shift
        }
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        _ => return None,
    };
    Some(precedence)
}
