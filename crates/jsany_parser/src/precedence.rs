//! Operator precedence for binary operators.

use jsany_ast::TokenKind;

/// Binary operator precedence levels, lowest binding first. Assignment,
/// conditional and comma are parsed by dedicated rules above these levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    LogicalOr = 1,
    LogicalAnd = 2,
    BitwiseOr = 3,
    BitwiseXor = 4,
    BitwiseAnd = 5,
    Equality = 6,
    Relational = 7,
    Shift = 8,
    Additive = 9,
    Multiplicative = 10,
    Invalid = 255,
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: TokenKind) -> OperatorPrecedence {
    match kind {
        TokenKind::BarBarToken => OperatorPrecedence::LogicalOr,
        TokenKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        TokenKind::BarToken => OperatorPrecedence::BitwiseOr,
        TokenKind::CaretToken => OperatorPrecedence::BitwiseXor,
        TokenKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        TokenKind::EqualsEqualsToken
        | TokenKind::ExclamationEqualsToken
        | TokenKind::EqualsEqualsEqualsToken
        | TokenKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        TokenKind::LessThanToken
        | TokenKind::GreaterThanToken
        | TokenKind::LessThanEqualsToken
        | TokenKind::GreaterThanEqualsToken
        | TokenKind::InstanceOfKeyword
        | TokenKind::InKeyword => OperatorPrecedence::Relational,
        TokenKind::LessThanLessThanToken
        | TokenKind::GreaterThanGreaterThanToken
        | TokenKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        TokenKind::PlusToken | TokenKind::MinusToken => OperatorPrecedence::Additive,
        TokenKind::AsteriskToken | TokenKind::SlashToken | TokenKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        _ => OperatorPrecedence::Invalid,
    }
}

/// Whether `kind` is a prefix unary operator.
pub fn is_prefix_unary_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::PlusPlusToken
            | TokenKind::MinusMinusToken
            | TokenKind::DeleteKeyword
            | TokenKind::VoidKeyword
            | TokenKind::TypeOfKeyword
            | TokenKind::PlusToken
            | TokenKind::MinusToken
            | TokenKind::TildeToken
            | TokenKind::ExclamationToken
    )
}
