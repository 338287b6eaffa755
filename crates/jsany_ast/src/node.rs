//! AST node definitions.
//!
//! The tree is a pair of closed sum types, [`Expression`] and [`Statement`].
//! Children are arena references and arena slices, so every node is `Copy`
//! and the whole tree is released with its arena.

use crate::token_kind::TokenKind;

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

/// The parsed top-level statement sequence of one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Program<'a> {
    pub statements: NodeList<'a, Statement<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expression<'a> {
    /// Numeric literal, kept as written.
    NumericLiteral(&'a str),
    /// String literal without delimiters, escapes kept verbatim.
    StringLiteral(&'a str),
    BooleanLiteral(bool),
    RegularExpressionLiteral(RegularExpressionLiteral<'a>),
    ArrayLiteral(NodeList<'a, Expression<'a>>),
    ObjectLiteral(NodeList<'a, Property<'a>>),
    NullLiteral,
    UndefinedLiteral,
    This,
    Identifier(&'a str),
    Grouped(&'a Expression<'a>),
    Binary(BinaryExpression<'a>),
    Assignment(AssignmentExpression<'a>),
    Unary(UnaryExpression<'a>),
    Postfix(PostfixExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    New(NewExpression<'a>),
    Member(MemberExpression<'a>),
    Call(CallExpression<'a>),
    Function(FunctionExpression<'a>),
}

impl<'a> Expression<'a> {
    /// Whether this expression may appear on the left of `=` and its
    /// compound forms: an identifier or a member access, possibly grouped.
    pub fn is_valid_assignment_target(&self) -> bool {
        match self {
            Expression::Identifier(_) | Expression::Member(_) => true,
            Expression::Grouped(inner) => inner.is_valid_assignment_target(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularExpressionLiteral<'a> {
    pub pattern: &'a str,
    pub flags: &'a str,
}

/// An object literal entry. Keys are not required to be unique.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Property<'a> {
    pub key: &'a str,
    pub value: &'a Expression<'a>,
}

/// A binary operation. The comma operator is a `Binary` with `CommaToken`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpression<'a> {
    pub left: &'a Expression<'a>,
    pub operator: TokenKind,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignmentExpression<'a> {
    pub left: &'a Expression<'a>,
    pub operator: TokenKind,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpression<'a> {
    pub operator: TokenKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostfixExpression<'a> {
    pub operator: TokenKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionalExpression<'a> {
    pub condition: &'a Expression<'a>,
    pub when_true: &'a Expression<'a>,
    pub when_false: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewExpression<'a> {
    pub callee: &'a Expression<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

/// `object.property` (`computed == false`, property is an `Identifier`) or
/// `object[property]` (`computed == true`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberExpression<'a> {
    pub object: &'a Expression<'a>,
    pub property: &'a Expression<'a>,
    pub computed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpression<'a> {
    pub callee: &'a Expression<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionExpression<'a> {
    pub name: Option<&'a str>,
    pub params: NodeList<'a, &'a str>,
    pub body: NodeList<'a, Statement<'a>>,
}

impl<'a> FunctionExpression<'a> {
    /// The name used for the runtime function object.
    pub fn display_name(&self) -> &'a str {
        self.name.unwrap_or("Anonymous")
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statement<'a> {
    Block(NodeList<'a, Statement<'a>>),
    VariableDeclaration(VariableDeclaration<'a>),
    /// `var a = 1, b = 2`: two or more declarators in one statement.
    VariableDeclarationList(NodeList<'a, VariableDeclaration<'a>>),
    Expression(&'a Expression<'a>),
    If(IfStatement<'a>),
    While(WhileStatement<'a>),
    DoWhile(DoWhileStatement<'a>),
    For(ForStatement<'a>),
    ForIn(ForInStatement<'a>),
    Continue(Option<&'a str>),
    Break(Option<&'a str>),
    Return(OptionalNode<'a, Expression<'a>>),
    With(WithStatement<'a>),
    Switch(SwitchStatement<'a>),
    Labeled(LabeledStatement<'a>),
    Throw(&'a Expression<'a>),
    Try(TryStatement<'a>),
    Debugger,
    Empty,
    FunctionDeclaration(FunctionDeclaration<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableDeclaration<'a> {
    pub name: &'a str,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStatement<'a> {
    pub test: &'a Expression<'a>,
    pub consequent: &'a Statement<'a>,
    pub alternate: OptionalNode<'a, Statement<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStatement<'a> {
    pub test: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoWhileStatement<'a> {
    pub body: &'a Statement<'a>,
    pub test: &'a Expression<'a>,
}

/// Classic `for (init; test; update)`. `init` is a `VariableDeclaration` or
/// an `Expression` statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForStatement<'a> {
    pub init: OptionalNode<'a, Statement<'a>>,
    pub test: OptionalNode<'a, Expression<'a>>,
    pub update: OptionalNode<'a, Expression<'a>>,
    pub body: &'a Statement<'a>,
}

/// `for (left in right)`. `left` is a `VariableDeclaration` without an
/// initializer or an `Expression` statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForInStatement<'a> {
    pub left: &'a Statement<'a>,
    pub right: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithStatement<'a> {
    pub object: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchStatement<'a> {
    pub discriminant: &'a Expression<'a>,
    pub cases: NodeList<'a, SwitchCase<'a>>,
    pub line: u32,
}

/// One `case test:` clause, or `default:` when `test` is `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchCase<'a> {
    pub test: OptionalNode<'a, Expression<'a>>,
    pub consequent: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledStatement<'a> {
    pub label: &'a str,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TryStatement<'a> {
    pub block: NodeList<'a, Statement<'a>>,
    pub catch_param: Option<&'a str>,
    pub catch_body: Option<NodeList<'a, Statement<'a>>>,
    pub finally_body: Option<NodeList<'a, Statement<'a>>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionDeclaration<'a> {
    pub name: &'a str,
    pub params: NodeList<'a, &'a str>,
    pub body: NodeList<'a, Statement<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_targets() {
        let a = Expression::Identifier("a");
        let b = Expression::Identifier("b");
        let member = Expression::Member(MemberExpression {
            object: &a,
            property: &b,
            computed: false,
        });
        assert!(a.is_valid_assignment_target());
        assert!(member.is_valid_assignment_target());
        assert!(Expression::Grouped(&member).is_valid_assignment_target());
        assert!(!Expression::NumericLiteral("1").is_valid_assignment_target());
        let call = Expression::Call(CallExpression { callee: &a, arguments: &[] });
        assert!(!call.is_valid_assignment_target());
    }

    #[test]
    fn test_function_display_name() {
        let anonymous = FunctionExpression { name: None, params: &[], body: &[] };
        assert_eq!(anonymous.display_name(), "Anonymous");
        let named = FunctionExpression { name: Some("f"), ..anonymous };
        assert_eq!(named.display_name(), "f");
    }
}
