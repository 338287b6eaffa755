//! Scanner integration tests.
//!
//! Verifies that the scanner correctly tokenizes the supported JavaScript subset.

use jsany_ast::TokenKind;
use jsany_scanner::{tokenize, Scanner, SlashMode, Token};

/// Helper: scan all tokens from source and return as (kind, text) pairs.
fn scan_all(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source).into_iter().map(|t| (t.kind, t.text)).collect()
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: scan with the slash always opening a regular expression.
fn scan_kinds_always_regex(source: &str) -> Vec<TokenKind> {
    Scanner::new(source)
        .with_slash_mode(SlashMode::AlwaysRegex)
        .tokenize()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_empty_source() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_whitespace_only() {
    assert!(tokenize("   \t  ").is_empty());
}

// ============================================================================
// End of line
// ============================================================================

#[test]
fn test_newline_run_is_one_token() {
    let tokens = tokenize("a\n\n\r\n  \nb");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Identifier, TokenKind::EndOfLine, TokenKind::Identifier]
    );
    assert_eq!(tokens[1].text, "\n");
    assert_eq!(tokens[1].line, 1);
    assert_eq!(tokens[2].line, 5);
}

#[test]
fn test_comment_only_lines_join_the_run() {
    assert_eq!(
        scan_kinds("a\n// note\n/* more */\nb"),
        vec![TokenKind::Identifier, TokenKind::EndOfLine, TokenKind::Identifier]
    );
}

#[test]
fn test_line_comment_keeps_newline() {
    assert_eq!(
        scan_kinds("x // trailing\ny"),
        vec![TokenKind::Identifier, TokenKind::EndOfLine, TokenKind::Identifier]
    );
}

#[test]
fn test_lone_carriage_return_is_whitespace() {
    assert_eq!(scan_kinds("a\rb"), vec![TokenKind::Identifier, TokenKind::Identifier]);
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_line_and_column() {
    let tokens = tokenize("var x;\n  foo(1);");
    let foo = tokens.iter().find(|t| t.text == "foo").unwrap();
    assert_eq!(foo.line, 2);
    assert_eq!(foo.column, 2);
    let one = tokens.iter().find(|t| t.text == "1").unwrap();
    assert_eq!(one.column, 6);
}

#[test]
fn test_columns_are_monotonic_within_a_line() {
    let tokens = tokenize("a = b + c * d;");
    assert!(tokens.windows(2).all(|w| w[0].column < w[1].column));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_literals() {
    let tokens = scan_all("'hello' \"world\"");
    assert_eq!(tokens[0], (TokenKind::StringLiteral, "hello".to_string()));
    assert_eq!(tokens[1], (TokenKind::StringLiteral, "world".to_string()));
}

#[test]
fn test_string_escaped_delimiter() {
    let tokens = scan_all(r"'it\'s'");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].1, r"it\'s");
}

#[test]
fn test_string_escaped_backslash_before_quote() {
    // `\\` is a complete escape, so the following quote terminates the string.
    let tokens = scan_all(r"'a\\' + b");
    assert_eq!(tokens[0], (TokenKind::StringLiteral, r"a\\".to_string()));
    assert_eq!(tokens[1].0, TokenKind::PlusToken);
}

#[test]
fn test_string_cross_quote_is_escaped() {
    let tokens = scan_all(r#"'say "hi"'"#);
    assert_eq!(tokens[0].1, r#"say \"hi\""#);
    let tokens = scan_all(r#""it's""#);
    assert_eq!(tokens[0].1, r"it\'s");
}

#[test]
fn test_unterminated_string_runs_to_end() {
    let tokens = scan_all("'abc");
    assert_eq!(tokens, vec![(TokenKind::StringLiteral, "abc".to_string())]);
}

#[test]
fn test_unicode_string_content() {
    let tokens = scan_all("'héllo wörld'");
    assert_eq!(tokens[0].1, "héllo wörld");
}

// ============================================================================
// Identifiers and keywords
// ============================================================================

#[test]
fn test_identifiers() {
    let tokens = scan_all("foo _bar $baz a1 café");
    assert!(tokens.iter().all(|(k, _)| *k == TokenKind::Identifier));
    assert_eq!(tokens[4].1, "café");
}

#[test]
fn test_keywords() {
    assert_eq!(
        scan_kinds("var function if else for in instanceof typeof"),
        vec![
            TokenKind::VarKeyword,
            TokenKind::FunctionKeyword,
            TokenKind::IfKeyword,
            TokenKind::ElseKeyword,
            TokenKind::ForKeyword,
            TokenKind::InKeyword,
            TokenKind::InstanceOfKeyword,
            TokenKind::TypeOfKeyword,
        ]
    );
}

#[test]
fn test_literal_keywords() {
    assert_eq!(
        scan_kinds("true false null undefined this"),
        vec![
            TokenKind::TrueKeyword,
            TokenKind::FalseKeyword,
            TokenKind::NullKeyword,
            TokenKind::UndefinedKeyword,
            TokenKind::ThisKeyword,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(scan_kinds("variable iffy"), vec![TokenKind::Identifier, TokenKind::Identifier]);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numeric_literals() {
    for source in ["42", "3.14", ".5", "0xFF", "1e10", "1.5e-3", "2E+8"] {
        let tokens = scan_all(source);
        assert_eq!(tokens.len(), 1, "source: {}", source);
        assert_eq!(tokens[0].0, TokenKind::NumericLiteral);
        assert_eq!(tokens[0].1, source);
    }
}

#[test]
fn test_minus_after_number_is_an_operator() {
    assert_eq!(
        scan_kinds("1-2"),
        vec![TokenKind::NumericLiteral, TokenKind::MinusToken, TokenKind::NumericLiteral]
    );
}

#[test]
fn test_hex_with_e_does_not_take_sign() {
    assert_eq!(
        scan_kinds("0x1e-1"),
        vec![TokenKind::NumericLiteral, TokenKind::MinusToken, TokenKind::NumericLiteral]
    );
}

#[test]
fn test_number_scan_is_permissive() {
    let tokens = scan_all("1.2.3abc");
    assert_eq!(tokens, vec![(TokenKind::NumericLiteral, "1.2.3abc".to_string())]);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_longest_match_unsigned_shift_assign() {
    let tokens = scan_all(">>>=");
    assert_eq!(
        tokens,
        vec![(TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken, ">>>=".to_string())]
    );
}

#[test]
fn test_longest_match_ladder() {
    assert_eq!(
        scan_kinds("a >>= b >> c > d >>> e"),
        vec![
            TokenKind::Identifier,
            TokenKind::GreaterThanGreaterThanEqualsToken,
            TokenKind::Identifier,
            TokenKind::GreaterThanGreaterThanToken,
            TokenKind::Identifier,
            TokenKind::GreaterThanToken,
            TokenKind::Identifier,
            TokenKind::GreaterThanGreaterThanGreaterThanToken,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_equality_operators() {
    assert_eq!(
        scan_kinds("== != === !== = !"),
        vec![
            TokenKind::EqualsEqualsToken,
            TokenKind::ExclamationEqualsToken,
            TokenKind::EqualsEqualsEqualsToken,
            TokenKind::ExclamationEqualsEqualsToken,
            TokenKind::EqualsToken,
            TokenKind::ExclamationToken,
        ]
    );
}

#[test]
fn test_compound_assignment_operators() {
    assert_eq!(
        scan_kinds("+= -= *= %= &= |= ^= <<="),
        vec![
            TokenKind::PlusEqualsToken,
            TokenKind::MinusEqualsToken,
            TokenKind::AsteriskEqualsToken,
            TokenKind::PercentEqualsToken,
            TokenKind::AmpersandEqualsToken,
            TokenKind::BarEqualsToken,
            TokenKind::CaretEqualsToken,
            TokenKind::LessThanLessThanEqualsToken,
        ]
    );
}

#[test]
fn test_increment_decrement() {
    assert_eq!(
        scan_kinds("i++ --j"),
        vec![
            TokenKind::Identifier,
            TokenKind::PlusPlusToken,
            TokenKind::MinusMinusToken,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_illegal_character() {
    let tokens = scan_all("a # b");
    assert_eq!(tokens[1], (TokenKind::Illegal, "#".to_string()));
    assert_eq!(tokens[2].0, TokenKind::Identifier);
}

// ============================================================================
// Regular expressions vs. division
// ============================================================================

#[test]
fn test_regex_literal() {
    let tokens = scan_all("x = /ab+c/gi;");
    assert_eq!(tokens[2], (TokenKind::RegularExpressionLiteral, "/ab+c/gi".to_string()));
    assert_eq!(tokens[3].0, TokenKind::SemicolonToken);
}

#[test]
fn test_regex_with_escaped_slash_and_class() {
    let tokens = scan_all(r"r = /a\/b[/]c/;");
    assert_eq!(tokens[2].1, r"/a\/b[/]c/");
}

#[test]
fn test_division_after_operand() {
    assert_eq!(
        scan_kinds("a / b / 2"),
        vec![
            TokenKind::Identifier,
            TokenKind::SlashToken,
            TokenKind::Identifier,
            TokenKind::SlashToken,
            TokenKind::NumericLiteral,
        ]
    );
    assert_eq!(
        scan_kinds("(a) /= 2"),
        vec![
            TokenKind::OpenParenToken,
            TokenKind::Identifier,
            TokenKind::CloseParenToken,
            TokenKind::SlashEqualsToken,
            TokenKind::NumericLiteral,
        ]
    );
}

#[test]
fn test_always_regex_mode() {
    assert_eq!(
        scan_kinds_always_regex("a / b"),
        vec![TokenKind::Identifier, TokenKind::RegularExpressionLiteral]
    );
    // A trailing slash has nothing to open.
    assert_eq!(
        scan_kinds_always_regex("a /"),
        vec![TokenKind::Identifier, TokenKind::SlashToken]
    );
}

#[test]
fn test_comments_win_over_regex() {
    assert_eq!(scan_kinds("// x\n/* y */"), vec![TokenKind::EndOfLine]);
}

// ============================================================================
// Whole programs
// ============================================================================

#[test]
fn test_end_to_end_program_token_count() {
    let tokens: Vec<Token> = tokenize("var x = 1 + 2;\nif (x) { return x; }");
    assert_eq!(tokens.len(), 17);
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::EndOfLine).count(), 1);
    assert_eq!(tokens[7].kind, TokenKind::EndOfLine);
    assert_eq!(tokens[8].kind, TokenKind::IfKeyword);
    assert_eq!(tokens[8].line, 2);
}
