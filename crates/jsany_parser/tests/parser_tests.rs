//! Parser integration tests.
//!
//! Verifies that the parser builds the expected trees from JavaScript source
//! and rejects what the subset does not accept.

use jsany_core::CompilerArena;
use jsany_diagnostics::{messages, ParseError};
use jsany_parser::parse;
use jsany_printer::print_program;
use jsany_scanner::tokenize;

/// Helper: parse source text and return the number of top-level statements.
fn parse_count(source: &str) -> usize {
    let arena = CompilerArena::new();
    let tokens = tokenize(source);
    let program = parse(&arena, &tokens).unwrap_or_else(|e| panic!("{}: {}", source, e));
    program.statements.len()
}

/// Helper: assert that parsing produces the expected number of top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    assert_eq!(parse_count(source), expected, "source: {}", source);
}

/// Helper: parse and dump the tree, without the leading `Program` line.
fn tree(source: &str) -> String {
    let arena = CompilerArena::new();
    let tokens = tokenize(source);
    let program = parse(&arena, &tokens).unwrap_or_else(|e| panic!("{}: {}", source, e));
    let dump = print_program(&program);
    dump.strip_prefix("Program\n").unwrap_or(&dump).to_string()
}

/// Helper: parse source that must fail.
fn parse_error(source: &str) -> ParseError {
    let arena = CompilerArena::new();
    let tokens = tokenize(source);
    match parse(&arena, &tokens) {
        Ok(_) => panic!("expected a parse error for: {}", source),
        Err(e) => e,
    }
}

// ============================================================================
// Statement counts and automatic semicolons
// ============================================================================

#[test]
fn test_empty_program() {
    assert_statement_count("", 0);
    assert_statement_count("\n\n// only a comment\n", 0);
}

#[test]
fn test_semicolon_separated() {
    assert_statement_count("a; b; c", 3);
}

#[test]
fn test_newline_separated() {
    assert_statement_count("var x = 1\nvar y = 2\nx + y", 3);
}

#[test]
fn test_trailing_newline_adds_nothing() {
    assert_statement_count("x = 1;\n", 1);
}

#[test]
fn test_missing_semicolon_on_same_line() {
    let err = parse_error("a b");
    assert_eq!(err.rule, "ExpressionStmt");
    assert_eq!(err.message, "Expected ';' after expression.");
    assert_eq!(err.found, "b");
}

#[test]
fn test_postfix_does_not_cross_line_break() {
    assert_eq!(
        tree("x\n++y"),
        "  ExprStmt\n    Identifier(x)\n  ExprStmt\n    Unary(++)\n      Identifier(y)\n"
    );
    assert_eq!(tree("x++;"), "  ExprStmt\n    Postfix(++)\n      Identifier(x)\n");
}

#[test]
fn test_return_before_line_break() {
    assert_eq!(
        tree("function f() { return\nx; }"),
        "  FunctionDecl(f)\n    Params()\n    Body\n      Return\n      ExprStmt\n        Identifier(x)\n"
    );
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(
        tree("1 + 2 * 3;"),
        "  ExprStmt\n    Binary(+)\n      Number(1)\n      Binary(*)\n        Number(2)\n        Number(3)\n"
    );
}

#[test]
fn test_binary_is_left_associative() {
    assert_eq!(
        tree("a - b - c;"),
        "  ExprStmt\n    Binary(-)\n      Binary(-)\n        Identifier(a)\n        Identifier(b)\n      Identifier(c)\n"
    );
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(
        tree("a = b += c;"),
        "  ExprStmt\n    Assign(=)\n      Identifier(a)\n      Assign(+=)\n        Identifier(b)\n        Identifier(c)\n"
    );
}

#[test]
fn test_logical_operators() {
    assert_eq!(
        tree("a || b && c;"),
        "  ExprStmt\n    Binary(||)\n      Identifier(a)\n      Binary(&&)\n        Identifier(b)\n        Identifier(c)\n"
    );
}

#[test]
fn test_comma_operator() {
    assert_eq!(
        tree("a, b;"),
        "  ExprStmt\n    Binary(,)\n      Identifier(a)\n      Identifier(b)\n"
    );
}

#[test]
fn test_conditional() {
    assert_eq!(
        tree("x = a ? 1 : 2;"),
        "  ExprStmt\n    Assign(=)\n      Identifier(x)\n      Conditional\n        Identifier(a)\n        Number(1)\n        Number(2)\n"
    );
}

#[test]
fn test_unary_operators() {
    assert_eq!(
        tree("typeof !-x;"),
        "  ExprStmt\n    Unary(typeof)\n      Unary(!)\n        Unary(-)\n          Identifier(x)\n"
    );
}

#[test]
fn test_relational_keywords() {
    assert_eq!(
        tree("a instanceof B;"),
        "  ExprStmt\n    Binary(instanceof)\n      Identifier(a)\n      Identifier(B)\n"
    );
}

#[test]
fn test_member_assignment_is_valid() {
    assert_statement_count("a.b = 2;", 1);
    assert_statement_count("a[0] = 2;", 1);
    assert_statement_count("(a) = 1;", 1);
}

#[test]
fn test_invalid_assignment_target() {
    let err = parse_error("1 = 2;");
    assert_eq!(err.code, messages::INVALID_ASSIGNMENT_TARGET.code);
    assert_eq!(err.found, "=");
    assert_eq!(parse_error("f() = 1;").code, messages::INVALID_ASSIGNMENT_TARGET.code);
    assert_eq!(parse_error("a + b = 1;").code, messages::INVALID_ASSIGNMENT_TARGET.code);
}

#[test]
fn test_member_property_may_be_keyword() {
    assert_eq!(
        tree("a.default;"),
        "  ExprStmt\n    Member(.)\n      Identifier(a)\n      Identifier(default)\n"
    );
}

#[test]
fn test_call_chain() {
    assert_eq!(
        tree("a.b(1)[c];"),
        "  ExprStmt\n    Member([])\n      Call\n        Member(.)\n          Identifier(a)\n          Identifier(b)\n        Arguments\n          Number(1)\n      Identifier(c)\n"
    );
}

#[test]
fn test_new_without_arguments() {
    assert_eq!(tree("new Foo;"), "  ExprStmt\n    New\n      Identifier(Foo)\n      Arguments\n");
}

#[test]
fn test_nested_new() {
    assert_eq!(
        tree("new new X()();"),
        "  ExprStmt\n    New\n      New\n        Identifier(X)\n        Arguments\n      Arguments\n"
    );
}

#[test]
fn test_array_holes_and_trailing_comma() {
    assert_eq!(
        tree("[1,,2,];"),
        "  ExprStmt\n    Array\n      Number(1)\n      Undefined\n      Number(2)\n"
    );
    assert_eq!(tree("[];"), "  ExprStmt\n    Array\n");
}

#[test]
fn test_object_keys() {
    assert_eq!(
        tree("x = {default: 1, 'a b': 2, 3: c};"),
        "  ExprStmt\n    Assign(=)\n      Identifier(x)\n      Object\n        Property(default)\n          Number(1)\n        Property(a b)\n          Number(2)\n        Property(3)\n          Identifier(c)\n"
    );
}

#[test]
fn test_object_bad_key() {
    let err = parse_error("x = {(a): 1};");
    assert_eq!(err.code, messages::EXPECTED_PROPERTY_NAME.code);
    assert_eq!(err.rule, "ObjectExpr");
}

#[test]
fn test_regular_expression_literal() {
    assert_eq!(tree("var r = /ab+c/gi;"), "  VarDecl(r)\n    RegExp(/ab+c/gi)\n");
}

#[test]
fn test_function_expressions() {
    assert_eq!(
        tree("var f = function (a) { return a; };"),
        "  VarDecl(f)\n    Function(Anonymous)\n      Params(a)\n      Body\n        Return\n          Identifier(a)\n"
    );
    assert_eq!(
        tree("g(function named() {});"),
        "  ExprStmt\n    Call\n      Identifier(g)\n      Arguments\n        Function(named)\n          Params()\n          Body\n"
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        tree("[true, false, null, undefined, this, 'hi'];"),
        "  ExprStmt\n    Array\n      Boolean(true)\n      Boolean(false)\n      Null\n      Undefined\n      This\n      String(\"hi\")\n"
    );
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_variable_declarations() {
    assert_eq!(tree("var x;"), "  VarDecl(x)\n");
    assert_eq!(
        tree("var a = 1, b;"),
        "  VarDeclList\n    VarDecl(a)\n      Number(1)\n    VarDecl(b)\n"
    );
}

#[test]
fn test_if_else_chain() {
    assert_statement_count("if (a) b(); else if (c) d(); else e();", 1);
    assert_eq!(
        tree("if (a)\n  b;\nelse\n  c;"),
        "  IfStmt\n    Identifier(a)\n    Then\n      ExprStmt\n        Identifier(b)\n    Else\n      ExprStmt\n        Identifier(c)\n"
    );
}

#[test]
fn test_loops() {
    assert_statement_count("while (i < 10) i++;", 1);
    assert_statement_count("do x++; while (x < 5) y();", 2);
    assert_statement_count("for (;;) {}", 1);
}

#[test]
fn test_classic_for() {
    assert_eq!(
        tree("for (var i = 0; i < n; i++) ;"),
        "  For\n    VarDecl(i)\n      Number(0)\n    Binary(<)\n      Identifier(i)\n      Identifier(n)\n    Postfix(++)\n      Identifier(i)\n    Empty\n"
    );
}

#[test]
fn test_for_with_parenthesized_in() {
    let dump = tree("for (var i = ('a' in o) ? 1 : 0; i < 1; i++) {}");
    assert!(dump.starts_with("  For\n"), "{}", dump);
}

#[test]
fn test_for_in_with_var() {
    assert_eq!(
        tree("for (var k in obj) {}"),
        "  ForIn\n    VarDecl(k)\n    Identifier(obj)\n    Block\n"
    );
}

#[test]
fn test_for_in_with_member_target() {
    assert_eq!(
        tree("for (o.k in obj);"),
        "  ForIn\n    ExprStmt\n      Member(.)\n        Identifier(o)\n        Identifier(k)\n    Identifier(obj)\n    Empty\n"
    );
}

#[test]
fn test_labels_and_jumps() {
    assert_eq!(
        tree("outer: for (;;) { break outer; continue; }"),
        "  Labeled(outer)\n    For\n      null\n      null\n      null\n      Block\n        Break(outer)\n        Continue\n"
    );
}

#[test]
fn test_break_label_must_be_on_same_line() {
    assert_eq!(
        tree("while (a) { break\nfoo; }"),
        "  While\n    Identifier(a)\n    Block\n      Break\n      ExprStmt\n        Identifier(foo)\n"
    );
}

#[test]
fn test_throw() {
    assert_eq!(tree("throw new Error('x');"), "  Throw\n    New\n      Identifier(Error)\n      Arguments\n        String(\"x\")\n");
    assert_eq!(tree("throw;"), "  Throw\n    Undefined\n");
}

#[test]
fn test_switch() {
    assert_eq!(
        tree("switch (x) { case 1: a(); break; default: b(); }"),
        "  Switch\n    Identifier(x)\n    Case\n      Number(1)\n      ExprStmt\n        Call\n          Identifier(a)\n          Arguments\n      Break\n    Default\n      ExprStmt\n        Call\n          Identifier(b)\n          Arguments\n"
    );
}

#[test]
fn test_switch_with_two_defaults() {
    let err = parse_error("switch (x) { default: a; default: b; }");
    assert_eq!(err.code, messages::MULTIPLE_DEFAULT_CLAUSES.code);
}

#[test]
fn test_try_forms() {
    assert_statement_count("try { a(); } catch (e) { b(e); }", 1);
    assert_statement_count("try { a(); } finally { c(); }", 1);
    assert_statement_count("try { a(); } catch (e) {} finally {}", 1);
}

#[test]
fn test_try_without_handler() {
    let err = parse_error("try { a(); }");
    assert_eq!(err.code, messages::TRY_WITHOUT_CATCH_OR_FINALLY.code);
    assert_eq!(err.found, "end of input");
}

#[test]
fn test_catch_requires_identifier() {
    let err = parse_error("try {} catch () {}");
    assert_eq!(err.code, messages::EXPECTED_IDENTIFIER_0.code);
    assert_eq!(err.found, ")");
}

#[test]
fn test_debugger_and_empty() {
    assert_eq!(tree("debugger;;"), "  Debugger\n  Empty\n");
}

// ============================================================================
// Rejected input
// ============================================================================

#[test]
fn test_with_is_rejected() {
    let err = parse_error("with (o) { x; }");
    assert_eq!(err.code, messages::WITH_NOT_SUPPORTED.code);
    assert_eq!(err.rule, "WithStmt");
    assert_eq!(err.found, "with");
}

#[test]
fn test_class_is_rejected() {
    assert_eq!(parse_error("class A {}").code, messages::CLASSES_NOT_SUPPORTED.code);
}

#[test]
fn test_template_literal_is_rejected() {
    assert_eq!(parse_error("x = `a`;").code, messages::TEMPLATE_LITERALS_NOT_SUPPORTED.code);
}

#[test]
fn test_illegal_character() {
    let err = parse_error("a = #;");
    assert_eq!(err.message, "Invalid character '#'.");
}

#[test]
fn test_error_location_and_display() {
    let err = parse_error("if (x { }");
    assert_eq!(err.rule, "IfStmt");
    assert_eq!((err.line, err.column), (1, 6));
    assert_eq!(
        err.to_string(),
        "[IfStmt] Expected ')' after if condition. at line 1 col 6. Found '{'"
    );
}

#[test]
fn test_error_on_second_line() {
    let err = parse_error("var a = 1;\nvar = 2;");
    assert_eq!((err.line, err.column), (2, 4));
    assert_eq!(err.found, "=");
}

#[test]
fn test_unexpected_end_of_input() {
    let err = parse_error("var x =");
    assert_eq!(err.code, messages::EXPECTED_EXPRESSION.code);
    assert_eq!(err.found, "end of input");
    let err = parse_error("function f() {");
    assert_eq!(err.found, "end of input");
}

#[test]
fn test_deep_parentheses_within_limit() {
    let source = format!("{}x{};", "(".repeat(40), ")".repeat(40));
    assert_statement_count(&source, 1);
}

/// `open` and `close` wrapped `levels` times around `1` on the right of `x =`.
fn nested_source(open: &str, close: &str, levels: usize) -> String {
    format!("x = {}1{};", open.repeat(levels), close.repeat(levels))
}

#[test]
fn test_nesting_near_limit_parses() {
    for (open, close) in [("(", ")"), ("[", "]"), ("{a: ", "}"), ("f(", ")"), ("a[", "]")] {
        assert_statement_count(&nested_source(open, close, 45), 1);
    }
    assert_statement_count(&format!("x = {}1;", "!".repeat(95)), 1);
}

#[test]
fn test_nesting_past_limit_is_an_error() {
    for (open, close) in [("(", ")"), ("[", "]"), ("{a: ", "}"), ("f(", ")"), ("a[", "]")] {
        let err = parse_error(&nested_source(open, close, 60));
        assert_eq!(err.code, messages::MAXIMUM_NESTING_DEPTH_EXCEEDED.code, "{}", open);
    }
    let err = parse_error(&nested_source("(", ")", 10_000));
    assert_eq!(err.code, messages::MAXIMUM_NESTING_DEPTH_EXCEEDED.code);
    let blocks = format!("{}{}", "{".repeat(150), "}".repeat(150));
    assert_eq!(parse_error(&blocks).code, messages::MAXIMUM_NESTING_DEPTH_EXCEEDED.code);
}

#[test]
fn test_long_chains_are_left_nested() {
    let source = format!("x = {};", vec!["y"; 1_000].join(" * "));
    let dump = tree(&source);
    assert_eq!(dump.matches("Binary(*)").count(), 999);
    let source = format!("a{};", ".b()".repeat(500));
    let dump = tree(&source);
    assert_eq!(dump.matches("Call").count(), 500);
    assert_eq!(dump.matches("Member(.)").count(), 500);
}
