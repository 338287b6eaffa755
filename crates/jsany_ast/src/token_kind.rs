//! TokenKind enum - the closed set of lexical categories.
//!
//! Kinds are grouped into contiguous ranges (punctuation, operators by
//! spelling length, reserved words, literals). The range bounds are exposed
//! as associated constants rather than variants, so they can never be
//! produced as tokens.

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // ========================================================================
    // Sentinels and structure
    // ========================================================================
    EndOfInput = 0,
    Illegal,
    EndOfLine,

    // ========================================================================
    // Punctuation
    // ========================================================================
    DotToken,
    ColonToken,
    SemicolonToken,
    CommaToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    OpenBraceToken,
    CloseBraceToken,
    QuestionToken,
    BacktickToken,

    // ========================================================================
    // One-character operators
    // ========================================================================
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    LessThanToken,
    GreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    TildeToken,
    EqualsToken,
    ExclamationToken,

    // ========================================================================
    // Two-character operators
    // ========================================================================
    EqualsEqualsToken,
    ExclamationEqualsToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    GreaterThanGreaterThanToken,
    LessThanLessThanToken,
    AmpersandAmpersandToken,
    BarBarToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    PercentEqualsToken,
    SlashEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AsteriskAsteriskToken,

    // ========================================================================
    // Three-character operators
    // ========================================================================
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    GreaterThanGreaterThanGreaterThanToken,
    GreaterThanGreaterThanEqualsToken,
    LessThanLessThanEqualsToken,

    // ========================================================================
    // Four-character operators
    // ========================================================================
    GreaterThanGreaterThanGreaterThanEqualsToken,

    // ========================================================================
    // Reserved words
    // ========================================================================
    DeleteKeyword,
    TypeOfKeyword,
    DebuggerKeyword,
    InstanceOfKeyword,
    VoidKeyword,
    BreakKeyword,
    ContinueKeyword,
    CaseKeyword,
    DefaultKeyword,
    InKeyword,
    NewKeyword,
    ThisKeyword,
    ThrowKeyword,
    WithKeyword,
    ClassKeyword,
    ReturnKeyword,

    // Keywords that open a construct with its own block
    CatchKeyword,
    DoKeyword,
    ElseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    SwitchKeyword,
    TryKeyword,
    WhileKeyword,

    // Strict-mode reserved words
    VarKeyword,
    LetKeyword,
    StaticKeyword,
    YieldKeyword,
    ImplementsKeyword,
    InterfaceKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,

    // ========================================================================
    // Literals
    // ========================================================================
    UndefinedKeyword,
    NullKeyword,
    FalseKeyword,
    TrueKeyword,
    NumericLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    Identifier,
}

impl TokenKind {
    pub const FIRST_PUNCTUATION: TokenKind = TokenKind::DotToken;
    pub const LAST_PUNCTUATION: TokenKind = TokenKind::BacktickToken;
    pub const FIRST_OPERATOR: TokenKind = TokenKind::PlusToken;
    pub const LAST_OPERATOR: TokenKind = TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken;
    pub const FIRST_KEYWORD: TokenKind = TokenKind::DeleteKeyword;
    pub const LAST_KEYWORD: TokenKind = TokenKind::TrueKeyword;
    pub const FIRST_SCOPED_KEYWORD: TokenKind = TokenKind::CatchKeyword;
    pub const LAST_SCOPED_KEYWORD: TokenKind = TokenKind::WhileKeyword;
    pub const FIRST_STRICT_RESERVED: TokenKind = TokenKind::VarKeyword;
    pub const LAST_STRICT_RESERVED: TokenKind = TokenKind::PublicKeyword;
    pub const FIRST_LITERAL: TokenKind = TokenKind::UndefinedKeyword;
    pub const LAST_LITERAL: TokenKind = TokenKind::RegularExpressionLiteral;

    #[inline]
    fn in_range(self, first: TokenKind, last: TokenKind) -> bool {
        let v = self as u8;
        v >= first as u8 && v <= last as u8
    }

    /// Whether this kind is a structural punctuation token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    /// Whether this kind is an operator of any length.
    #[inline]
    pub fn is_operator(self) -> bool {
        self.in_range(Self::FIRST_OPERATOR, Self::LAST_OPERATOR)
    }

    /// Whether this kind is a reserved word, including `true`/`false`/`null`/`undefined`.
    #[inline]
    pub fn is_keyword(self) -> bool {
        self.in_range(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Whether this keyword introduces a construct with its own block.
    #[inline]
    pub fn is_scoped_keyword(self) -> bool {
        self.in_range(Self::FIRST_SCOPED_KEYWORD, Self::LAST_SCOPED_KEYWORD)
    }

    /// Whether this kind is reserved only in strict mode code.
    #[inline]
    pub fn is_strict_reserved(self) -> bool {
        self.in_range(Self::FIRST_STRICT_RESERVED, Self::LAST_STRICT_RESERVED)
    }

    /// Whether this kind is a literal (number, string, regexp, boolean, null, undefined).
    #[inline]
    pub fn is_literal(self) -> bool {
        self.in_range(Self::FIRST_LITERAL, Self::LAST_LITERAL)
    }

    /// Whether this kind is `=` or a compound assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self == TokenKind::EqualsToken || self.compound_assignment_base().is_some()
    }

    /// For a compound assignment operator, the binary operator it applies.
    pub fn compound_assignment_base(self) -> Option<TokenKind> {
        match self {
            TokenKind::PlusEqualsToken => Some(TokenKind::PlusToken),
            TokenKind::MinusEqualsToken => Some(TokenKind::MinusToken),
            TokenKind::AsteriskEqualsToken => Some(TokenKind::AsteriskToken),
            TokenKind::SlashEqualsToken => Some(TokenKind::SlashToken),
            TokenKind::PercentEqualsToken => Some(TokenKind::PercentToken),
            TokenKind::AmpersandEqualsToken => Some(TokenKind::AmpersandToken),
            TokenKind::BarEqualsToken => Some(TokenKind::BarToken),
            TokenKind::CaretEqualsToken => Some(TokenKind::CaretToken),
            TokenKind::GreaterThanGreaterThanEqualsToken => Some(TokenKind::GreaterThanGreaterThanToken),
            TokenKind::LessThanLessThanEqualsToken => Some(TokenKind::LessThanLessThanToken),
            TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken => {
                Some(TokenKind::GreaterThanGreaterThanGreaterThanToken)
            }
            _ => None,
        }
    }

    /// Whether a token of this kind can end an operand, so that a following
    /// `/` is a division rather than the start of a regular expression.
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::NumericLiteral
                | TokenKind::StringLiteral
                | TokenKind::RegularExpressionLiteral
                | TokenKind::TrueKeyword
                | TokenKind::FalseKeyword
                | TokenKind::NullKeyword
                | TokenKind::UndefinedKeyword
                | TokenKind::ThisKeyword
                | TokenKind::CloseParenToken
                | TokenKind::CloseBracketToken
                | TokenKind::CloseBraceToken
                | TokenKind::PlusPlusToken
                | TokenKind::MinusMinusToken
        )
    }

    /// The canonical spelling of a fixed-text token, or a description for
    /// tokens whose text varies.
    pub fn text(self) -> &'static str {
        match self {
            TokenKind::EndOfInput => "end of input",
            TokenKind::Illegal => "illegal character",
            TokenKind::EndOfLine => "end of line",
            TokenKind::DotToken => ".",
            TokenKind::ColonToken => ":",
            TokenKind::SemicolonToken => ";",
            TokenKind::CommaToken => ",",
            TokenKind::OpenParenToken => "(",
            TokenKind::CloseParenToken => ")",
            TokenKind::OpenBracketToken => "[",
            TokenKind::CloseBracketToken => "]",
            TokenKind::OpenBraceToken => "{",
            TokenKind::CloseBraceToken => "}",
            TokenKind::QuestionToken => "?",
            TokenKind::BacktickToken => "`",
            TokenKind::PlusToken => "+",
            TokenKind::MinusToken => "-",
            TokenKind::AsteriskToken => "*",
            TokenKind::SlashToken => "/",
            TokenKind::PercentToken => "%",
            TokenKind::LessThanToken => "<",
            TokenKind::GreaterThanToken => ">",
            TokenKind::AmpersandToken => "&",
            TokenKind::BarToken => "|",
            TokenKind::CaretToken => "^",
            TokenKind::TildeToken => "~",
            TokenKind::EqualsToken => "=",
            TokenKind::ExclamationToken => "!",
            TokenKind::EqualsEqualsToken => "==",
            TokenKind::ExclamationEqualsToken => "!=",
            TokenKind::PlusPlusToken => "++",
            TokenKind::MinusMinusToken => "--",
            TokenKind::LessThanEqualsToken => "<=",
            TokenKind::GreaterThanEqualsToken => ">=",
            TokenKind::GreaterThanGreaterThanToken => ">>",
            TokenKind::LessThanLessThanToken => "<<",
            TokenKind::AmpersandAmpersandToken => "&&",
            TokenKind::BarBarToken => "||",
            TokenKind::PlusEqualsToken => "+=",
            TokenKind::MinusEqualsToken => "-=",
            TokenKind::AsteriskEqualsToken => "*=",
            TokenKind::PercentEqualsToken => "%=",
            TokenKind::SlashEqualsToken => "/=",
            TokenKind::AmpersandEqualsToken => "&=",
            TokenKind::BarEqualsToken => "|=",
            TokenKind::CaretEqualsToken => "^=",
            TokenKind::AsteriskAsteriskToken => "**",
            TokenKind::EqualsEqualsEqualsToken => "===",
            TokenKind::ExclamationEqualsEqualsToken => "!==",
            TokenKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            TokenKind::GreaterThanGreaterThanEqualsToken => ">>=",
            TokenKind::LessThanLessThanEqualsToken => "<<=",
            TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            TokenKind::NumericLiteral => "number",
            TokenKind::StringLiteral => "string",
            TokenKind::RegularExpressionLiteral => "regular expression",
            TokenKind::Identifier => "identifier",
            keyword => keyword.keyword_text().unwrap_or("token"),
        }
    }

    /// The spelling of a reserved word.
    pub fn keyword_text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::DeleteKeyword => "delete",
            TokenKind::TypeOfKeyword => "typeof",
            TokenKind::DebuggerKeyword => "debugger",
            TokenKind::InstanceOfKeyword => "instanceof",
            TokenKind::VoidKeyword => "void",
            TokenKind::BreakKeyword => "break",
            TokenKind::ContinueKeyword => "continue",
            TokenKind::CaseKeyword => "case",
            TokenKind::DefaultKeyword => "default",
            TokenKind::InKeyword => "in",
            TokenKind::NewKeyword => "new",
            TokenKind::ThisKeyword => "this",
            TokenKind::ThrowKeyword => "throw",
            TokenKind::WithKeyword => "with",
            TokenKind::ClassKeyword => "class",
            TokenKind::ReturnKeyword => "return",
            TokenKind::CatchKeyword => "catch",
            TokenKind::DoKeyword => "do",
            TokenKind::ElseKeyword => "else",
            TokenKind::FinallyKeyword => "finally",
            TokenKind::ForKeyword => "for",
            TokenKind::FunctionKeyword => "function",
            TokenKind::IfKeyword => "if",
            TokenKind::SwitchKeyword => "switch",
            TokenKind::TryKeyword => "try",
            TokenKind::WhileKeyword => "while",
            TokenKind::VarKeyword => "var",
            TokenKind::LetKeyword => "let",
            TokenKind::StaticKeyword => "static",
            TokenKind::YieldKeyword => "yield",
            TokenKind::ImplementsKeyword => "implements",
            TokenKind::InterfaceKeyword => "interface",
            TokenKind::PackageKeyword => "package",
            TokenKind::PrivateKeyword => "private",
            TokenKind::ProtectedKeyword => "protected",
            TokenKind::PublicKeyword => "public",
            TokenKind::UndefinedKeyword => "undefined",
            TokenKind::NullKeyword => "null",
            TokenKind::FalseKeyword => "false",
            TokenKind::TrueKeyword => "true",
            _ => return None,
        };
        Some(text)
    }

    /// Look up a reserved word from its spelling.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        match text {
            "delete" => Some(TokenKind::DeleteKeyword),
            "typeof" => Some(TokenKind::TypeOfKeyword),
            "debugger" => Some(TokenKind::DebuggerKeyword),
            "instanceof" => Some(TokenKind::InstanceOfKeyword),
            "void" => Some(TokenKind::VoidKeyword),
            "break" => Some(TokenKind::BreakKeyword),
            "continue" => Some(TokenKind::ContinueKeyword),
            "case" => Some(TokenKind::CaseKeyword),
            "default" => Some(TokenKind::DefaultKeyword),
            "in" => Some(TokenKind::InKeyword),
            "new" => Some(TokenKind::NewKeyword),
            "this" => Some(TokenKind::ThisKeyword),
            "throw" => Some(TokenKind::ThrowKeyword),
            "with" => Some(TokenKind::WithKeyword),
            "class" => Some(TokenKind::ClassKeyword),
            "return" => Some(TokenKind::ReturnKeyword),
            "catch" => Some(TokenKind::CatchKeyword),
            "do" => Some(TokenKind::DoKeyword),
            "else" => Some(TokenKind::ElseKeyword),
            "finally" => Some(TokenKind::FinallyKeyword),
            "for" => Some(TokenKind::ForKeyword),
            "function" => Some(TokenKind::FunctionKeyword),
            "if" => Some(TokenKind::IfKeyword),
            "switch" => Some(TokenKind::SwitchKeyword),
            "try" => Some(TokenKind::TryKeyword),
            "while" => Some(TokenKind::WhileKeyword),
            "var" => Some(TokenKind::VarKeyword),
            "let" => Some(TokenKind::LetKeyword),
            "static" => Some(TokenKind::StaticKeyword),
            "yield" => Some(TokenKind::YieldKeyword),
            "implements" => Some(TokenKind::ImplementsKeyword),
            "interface" => Some(TokenKind::InterfaceKeyword),
            "package" => Some(TokenKind::PackageKeyword),
            "private" => Some(TokenKind::PrivateKeyword),
            "protected" => Some(TokenKind::ProtectedKeyword),
            "public" => Some(TokenKind::PublicKeyword),
            "undefined" => Some(TokenKind::UndefinedKeyword),
            "null" => Some(TokenKind::NullKeyword),
            "false" => Some(TokenKind::FalseKeyword),
            "true" => Some(TokenKind::TrueKeyword),
            _ => None,
        }
    }
}

/// Every fixed-spelling symbol token, longest spelling first. Scanning this
/// table in order and taking the first match is longest-match tokenization.
pub const OPERATOR_TABLE: &[TokenKind] = &[
    // Four characters
    TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken,
    // Three characters
    TokenKind::EqualsEqualsEqualsToken,
    TokenKind::ExclamationEqualsEqualsToken,
    TokenKind::GreaterThanGreaterThanGreaterThanToken,
    TokenKind::GreaterThanGreaterThanEqualsToken,
    TokenKind::LessThanLessThanEqualsToken,
    // Two characters
    TokenKind::EqualsEqualsToken,
    TokenKind::ExclamationEqualsToken,
    TokenKind::PlusPlusToken,
    TokenKind::MinusMinusToken,
    TokenKind::LessThanEqualsToken,
    TokenKind::GreaterThanEqualsToken,
    TokenKind::GreaterThanGreaterThanToken,
    TokenKind::LessThanLessThanToken,
    TokenKind::AmpersandAmpersandToken,
    TokenKind::BarBarToken,
    TokenKind::PlusEqualsToken,
    TokenKind::MinusEqualsToken,
    TokenKind::AsteriskEqualsToken,
    TokenKind::PercentEqualsToken,
    TokenKind::SlashEqualsToken,
    TokenKind::AmpersandEqualsToken,
    TokenKind::BarEqualsToken,
    TokenKind::CaretEqualsToken,
    TokenKind::AsteriskAsteriskToken,
    // One character
    TokenKind::DotToken,
    TokenKind::ColonToken,
    TokenKind::SemicolonToken,
    TokenKind::CommaToken,
    TokenKind::OpenParenToken,
    TokenKind::CloseParenToken,
    TokenKind::OpenBracketToken,
    TokenKind::CloseBracketToken,
    TokenKind::OpenBraceToken,
    TokenKind::CloseBraceToken,
    TokenKind::QuestionToken,
    TokenKind::BacktickToken,
    TokenKind::PlusToken,
    TokenKind::MinusToken,
    TokenKind::AsteriskToken,
    TokenKind::SlashToken,
    TokenKind::PercentToken,
    TokenKind::LessThanToken,
    TokenKind::GreaterThanToken,
    TokenKind::AmpersandToken,
    TokenKind::BarToken,
    TokenKind::CaretToken,
    TokenKind::TildeToken,
    TokenKind::EqualsToken,
    TokenKind::ExclamationToken,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_table_is_longest_first() {
        let lengths: Vec<usize> = OPERATOR_TABLE.iter().map(|k| k.text().len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_keyword_round_trip() {
        for kind in [TokenKind::VarKeyword, TokenKind::InstanceOfKeyword, TokenKind::TrueKeyword] {
            let text = kind.keyword_text().unwrap();
            assert_eq!(TokenKind::from_keyword(text), Some(kind));
        }
        assert_eq!(TokenKind::from_keyword("foo"), None);
    }

    #[test]
    fn test_ranges() {
        assert!(TokenKind::ForKeyword.is_scoped_keyword());
        assert!(!TokenKind::ReturnKeyword.is_scoped_keyword());
        assert!(TokenKind::VarKeyword.is_strict_reserved());
        assert!(TokenKind::NullKeyword.is_literal());
        assert!(TokenKind::NullKeyword.is_keyword());
        assert!(!TokenKind::Identifier.is_literal());
        assert!(TokenKind::CaretEqualsToken.is_operator());
        assert!(TokenKind::SemicolonToken.is_punctuation());
    }

    #[test]
    fn test_compound_assignment_base() {
        assert!(TokenKind::EqualsToken.is_assignment_operator());
        assert_eq!(
            TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken.compound_assignment_base(),
            Some(TokenKind::GreaterThanGreaterThanGreaterThanToken)
        );
        assert!(!TokenKind::EqualsEqualsToken.is_assignment_operator());
    }
}
