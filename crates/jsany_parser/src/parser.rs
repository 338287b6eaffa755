//! The parser implementation.
//!
//! A recursive descent parser over a finished token vector. The cursor is an
//! index into that vector; end-of-line tokens are skipped by every lookahead
//! except the few places where a line break is significant (automatic
//! semicolon insertion, restricted productions and postfix operators).

use jsany_ast::*;
use jsany_core::{ArenaVec, CompilerArena};
use jsany_diagnostics::messages;
use jsany_diagnostics::{DiagnosticMessage, ParseError};
use jsany_scanner::Token;

use crate::precedence::{get_binary_operator_precedence, is_prefix_unary_operator, OperatorPrecedence};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
///
/// A parenthesized, bracketed or braced level costs two units: the group and
/// the expression inside it. Sized so the descent fits a 2 MiB thread in
/// unoptimized builds.
const MAX_RECURSION_DEPTH: u32 = 100;

/// Parse a token vector into a program.
pub fn parse<'a>(arena: &'a CompilerArena, tokens: &[Token]) -> Result<Program<'a>, ParseError> {
    Parser::new(arena, tokens).parse_program()
}

/// The parser produces a [`Program`] from scanned tokens.
pub struct Parser<'a, 't> {
    arena: &'a CompilerArena,
    tokens: &'t [Token],
    /// Index of the next unconsumed token.
    pos: usize,
    /// Reported whenever the cursor runs past the last token.
    end_of_input: Token,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

type ParseResult<T> = Result<T, ParseError>;

impl<'a, 't> Parser<'a, 't> {
    pub fn new(arena: &'a CompilerArena, tokens: &'t [Token]) -> Self {
        let end_of_input = match tokens.last() {
            Some(last) => Token::end_of_input(
                last.line,
                last.column + last.span.length,
                last.span.end(),
            ),
            None => Token::end_of_input(1, 0, 0),
        };
        Self {
            arena,
            tokens,
            pos: 0,
            end_of_input,
            recursion_depth: 0,
        }
    }

    /// Parse the whole token vector. Stops at the first grammar violation.
    pub fn parse_program(mut self) -> ParseResult<Program<'a>> {
        let mut statements = self.new_list();
        while !self.at(TokenKind::EndOfInput) {
            statements.push(self.parse_statement()?);
        }
        Ok(Program {
            statements: statements.into_bump_slice(),
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    /// The token under the cursor, end-of-line tokens included.
    #[inline]
    fn token(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.end_of_input)
    }

    fn skip_line_breaks(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind == TokenKind::EndOfLine {
            self.pos += 1;
        }
    }

    /// The kind of the next significant token.
    #[inline]
    fn current_token(&mut self) -> TokenKind {
        self.skip_line_breaks();
        self.token().kind
    }

    #[inline]
    fn at(&mut self, kind: TokenKind) -> bool {
        self.current_token() == kind
    }

    /// Consume the next significant token.
    fn next_token(&mut self) {
        self.skip_line_breaks();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Copy the text of the next significant token into the arena.
    fn token_text(&mut self) -> &'a str {
        self.skip_line_breaks();
        let arena = self.arena;
        arena.alloc_str(&self.token().text)
    }

    fn preceded_by_line_break(&self) -> bool {
        self.pos > 0
            && self
                .tokens
                .get(self.pos - 1)
                .is_some_and(|t| t.kind == TokenKind::EndOfLine)
    }

    /// Whether the statement may end here: an explicit `;`, a closing brace,
    /// the end of input, or a line break before the next token.
    fn can_parse_semicolon(&mut self) -> bool {
        match self.current_token() {
            TokenKind::SemicolonToken | TokenKind::CloseBraceToken | TokenKind::EndOfInput => true,
            _ => self.preceded_by_line_break(),
        }
    }

    /// For `return`, `throw`, `break` and `continue`: a line break directly
    /// after the keyword ends the statement.
    fn at_restricted_end(&self) -> bool {
        matches!(
            self.token().kind,
            TokenKind::EndOfLine
                | TokenKind::SemicolonToken
                | TokenKind::CloseBraceToken
                | TokenKind::EndOfInput
        )
    }

    fn parse_expected_semicolon(&mut self, rule: &'static str, context: &str) -> ParseResult<()> {
        if self.at(TokenKind::SemicolonToken) {
            self.next_token();
            return Ok(());
        }
        if self.can_parse_semicolon() {
            Ok(())
        } else {
            Err(self.expected(rule, TokenKind::SemicolonToken, context))
        }
    }

    fn expect_token(&mut self, kind: TokenKind, rule: &'static str, context: &str) -> ParseResult<()> {
        if self.at(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(self.expected(rule, kind, context))
        }
    }

    fn optional_token(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    fn expect_identifier(&mut self, rule: &'static str, context: &str) -> ParseResult<&'a str> {
        if self.at(TokenKind::Identifier) {
            let name = self.token_text();
            self.next_token();
            Ok(name)
        } else {
            Err(self.error(rule, &messages::EXPECTED_IDENTIFIER_0, &[context]))
        }
    }

    // ========================================================================
    // Errors and allocation
    // ========================================================================

    fn error(&mut self, rule: &'static str, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        self.skip_line_breaks();
        let token = self.token();
        ParseError {
            rule,
            code: message.code,
            message: message.format(args),
            line: token.line,
            column: token.column,
            found: token.display_text().to_string(),
            span: token.span,
        }
    }

    fn expected(&mut self, rule: &'static str, kind: TokenKind, context: &str) -> ParseError {
        self.error(rule, &messages::EXPECTED_0_1, &[kind.text(), context])
    }

    #[inline]
    fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    fn new_list<T>(&self) -> ArenaVec<'a, T> {
        self.arena.vec()
    }

    /// Run `f` one nesting level deeper, failing once the limit is reached.
    fn nested<T>(&mut self, rule: &'static str, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            self.recursion_depth -= 1;
            return Err(self.error(rule, &messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]));
        }
        let result = f(self);
        self.recursion_depth -= 1;
        result
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.nested("Statement", |p| p.parse_statement_worker())
    }

    fn parse_statement_worker(&mut self) -> ParseResult<Statement<'a>> {
        match self.current_token() {
            TokenKind::OpenBraceToken => Ok(Statement::Block(self.parse_block("BlockStmt")?)),
            TokenKind::VarKeyword => {
                let declaration = self.parse_variable_declaration()?;
                self.parse_expected_semicolon("VarDecl", "after variable declaration")?;
                Ok(declaration)
            }
            TokenKind::SemicolonToken => {
                self.next_token();
                Ok(Statement::Empty)
            }
            TokenKind::IfKeyword => self.parse_if_statement(),
            TokenKind::DoKeyword => self.parse_do_statement(),
            TokenKind::WhileKeyword => self.parse_while_statement(),
            TokenKind::ForKeyword => self.parse_for_or_for_in_statement(),
            TokenKind::ContinueKeyword => {
                self.next_token();
                let label = self.parse_jump_label();
                self.parse_expected_semicolon("ContinueStmt", "after 'continue'")?;
                Ok(Statement::Continue(label))
            }
            TokenKind::BreakKeyword => {
                self.next_token();
                let label = self.parse_jump_label();
                self.parse_expected_semicolon("BreakStmt", "after 'break'")?;
                Ok(Statement::Break(label))
            }
            TokenKind::ReturnKeyword => self.parse_return_statement(),
            TokenKind::WithKeyword => Err(self.error("WithStmt", &messages::WITH_NOT_SUPPORTED, &[])),
            TokenKind::SwitchKeyword => self.parse_switch_statement(),
            TokenKind::ThrowKeyword => self.parse_throw_statement(),
            TokenKind::TryKeyword => self.parse_try_statement(),
            TokenKind::DebuggerKeyword => {
                self.next_token();
                self.parse_expected_semicolon("DebuggerStmt", "after 'debugger'")?;
                Ok(Statement::Debugger)
            }
            TokenKind::FunctionKeyword => self.parse_function_declaration(),
            TokenKind::ClassKeyword => Err(self.error("Statement", &messages::CLASSES_NOT_SUPPORTED, &[])),
            TokenKind::Identifier if self.is_labeled_statement() => self.parse_labeled_statement(),
            _ => {
                let expression = self.parse_expression()?;
                self.parse_expected_semicolon("ExpressionStmt", "after expression")?;
                Ok(Statement::Expression(self.alloc(expression)))
            }
        }
    }

    /// `{ statement* }`
    fn parse_block(&mut self, rule: &'static str) -> ParseResult<NodeList<'a, Statement<'a>>> {
        self.expect_token(TokenKind::OpenBraceToken, rule, "to open block")?;
        let mut statements = self.new_list();
        loop {
            match self.current_token() {
                TokenKind::CloseBraceToken => break,
                TokenKind::EndOfInput => {
                    return Err(self.expected(rule, TokenKind::CloseBraceToken, "to close block"))
                }
                _ => statements.push(self.parse_statement()?),
            }
        }
        self.next_token();
        Ok(statements.into_bump_slice())
    }

    /// `var name [= expr] (, name [= expr])*` without the terminating semicolon.
    fn parse_variable_declaration(&mut self) -> ParseResult<Statement<'a>> {
        self.next_token();
        let first = self.parse_variable_declarator()?;
        if !self.at(TokenKind::CommaToken) {
            return Ok(Statement::VariableDeclaration(first));
        }
        let mut declarations = self.new_list();
        declarations.push(first);
        while self.optional_token(TokenKind::CommaToken) {
            declarations.push(self.parse_variable_declarator()?);
        }
        Ok(Statement::VariableDeclarationList(declarations.into_bump_slice()))
    }

    fn parse_variable_declarator(&mut self) -> ParseResult<VariableDeclaration<'a>> {
        let name = self.expect_identifier("VarDecl", "after 'var'")?;
        let initializer = if self.optional_token(TokenKind::EqualsToken) {
            let node = self.parse_assignment_expression()?;
            Some(self.alloc(node))
        } else {
            None
        };
        Ok(VariableDeclaration { name, initializer })
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.next_token();
        self.expect_token(TokenKind::OpenParenToken, "IfStmt", "after 'if'")?;
        let test = self.parse_expression()?;
        self.expect_token(TokenKind::CloseParenToken, "IfStmt", "after if condition")?;
        let consequent = self.parse_statement()?;
        let alternate = if self.optional_token(TokenKind::ElseKeyword) {
            let node = self.parse_statement()?;
            Some(self.alloc(node))
        } else {
            None
        };
        Ok(Statement::If(IfStatement {
            test: self.alloc(test),
            consequent: self.alloc(consequent),
            alternate,
        }))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.next_token();
        self.expect_token(TokenKind::OpenParenToken, "WhileStmt", "after 'while'")?;
        let test = self.parse_expression()?;
        self.expect_token(TokenKind::CloseParenToken, "WhileStmt", "after while condition")?;
        let body = self.parse_statement()?;
        Ok(Statement::While(WhileStatement {
            test: self.alloc(test),
            body: self.alloc(body),
        }))
    }

    fn parse_do_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.next_token();
        let body = self.parse_statement()?;
        self.expect_token(TokenKind::WhileKeyword, "DoWhileStmt", "after do-while body")?;
        self.expect_token(TokenKind::OpenParenToken, "DoWhileStmt", "after 'while'")?;
        let test = self.parse_expression()?;
        self.expect_token(TokenKind::CloseParenToken, "DoWhileStmt", "after do-while condition")?;
        self.optional_token(TokenKind::SemicolonToken);
        Ok(Statement::DoWhile(DoWhileStatement {
            body: self.alloc(body),
            test: self.alloc(test),
        }))
    }

    fn parse_for_or_for_in_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.next_token();
        self.expect_token(TokenKind::OpenParenToken, "ForStmt", "after 'for'")?;
        if self.is_for_in_header() {
            self.parse_for_in_rest()
        } else {
            self.parse_for_rest()
        }
    }

    /// Look ahead through the loop header for an `in` at nesting depth zero
    /// before the first `;`. The cursor is restored afterwards.
    fn is_for_in_header(&mut self) -> bool {
        let saved = self.pos;
        let mut depth = 0usize;
        let found = loop {
            match self.current_token() {
                TokenKind::EndOfInput => break false,
                TokenKind::OpenParenToken | TokenKind::OpenBracketToken | TokenKind::OpenBraceToken => {
                    depth += 1
                }
                TokenKind::CloseParenToken | TokenKind::CloseBracketToken | TokenKind::CloseBraceToken => {
                    if depth == 0 {
                        break false;
                    }
                    depth -= 1;
                }
                TokenKind::SemicolonToken if depth == 0 => break false,
                TokenKind::InKeyword if depth == 0 => break true,
                _ => {}
            }
            self.next_token();
        };
        self.pos = saved;
        found
    }

    fn parse_for_in_rest(&mut self) -> ParseResult<Statement<'a>> {
        let left = if self.optional_token(TokenKind::VarKeyword) {
            let name = self.expect_identifier("ForInStmt", "after 'var'")?;
            Statement::VariableDeclaration(VariableDeclaration { name, initializer: None })
        } else {
            let target = self.parse_left_hand_side_expression()?;
            if !target.is_valid_assignment_target() {
                return Err(self.error("ForInStmt", &messages::INVALID_ASSIGNMENT_TARGET, &[]));
            }
            Statement::Expression(self.alloc(target))
        };
        self.expect_token(TokenKind::InKeyword, "ForInStmt", "after for-in variable")?;
        let right = self.parse_expression()?;
        self.expect_token(TokenKind::CloseParenToken, "ForInStmt", "after for-in object")?;
        let body = self.parse_statement()?;
        Ok(Statement::ForIn(ForInStatement {
            left: self.alloc(left),
            right: self.alloc(right),
            body: self.alloc(body),
        }))
    }

    fn parse_for_rest(&mut self) -> ParseResult<Statement<'a>> {
        let init = match self.current_token() {
            TokenKind::SemicolonToken => None,
            TokenKind::VarKeyword => {
                let node = self.parse_variable_declaration()?;
                Some(self.alloc(node))
            }
            _ => {
                let expression = self.parse_expression()?;
                Some(self.alloc(Statement::Expression(self.alloc(expression))))
            }
        };
        self.expect_token(TokenKind::SemicolonToken, "ForStmt", "after for-loop initializer")?;
        let test = if self.at(TokenKind::SemicolonToken) {
            None
        } else {
            let node = self.parse_expression()?;
            Some(self.alloc(node))
        };
        self.expect_token(TokenKind::SemicolonToken, "ForStmt", "after for-loop condition")?;
        let update = if self.at(TokenKind::CloseParenToken) {
            None
        } else {
            let node = self.parse_expression()?;
            Some(self.alloc(node))
        };
        self.expect_token(TokenKind::CloseParenToken, "ForStmt", "after for-loop update")?;
        let body = self.parse_statement()?;
        Ok(Statement::For(ForStatement {
            init,
            test,
            update,
            body: self.alloc(body),
        }))
    }

    /// The optional label of `break`/`continue`, which must be on the same line.
    fn parse_jump_label(&mut self) -> Option<&'a str> {
        if self.token().kind == TokenKind::Identifier {
            let label = self.token_text();
            self.next_token();
            Some(label)
        } else {
            None
        }
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.next_token();
        let argument = if self.at_restricted_end() {
            None
        } else {
            let node = self.parse_expression()?;
            Some(self.alloc(node))
        };
        self.parse_expected_semicolon("ReturnStmt", "after return value")?;
        Ok(Statement::Return(argument))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.next_token();
        let argument = if self.at_restricted_end() {
            Expression::UndefinedLiteral
        } else {
            self.parse_expression()?
        };
        self.parse_expected_semicolon("ThrowStmt", "after thrown value")?;
        Ok(Statement::Throw(self.alloc(argument)))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.skip_line_breaks();
        let line = self.token().line;
        self.next_token();
        self.expect_token(TokenKind::OpenParenToken, "SwitchStmt", "after 'switch'")?;
        let discriminant = self.parse_expression()?;
        self.expect_token(TokenKind::CloseParenToken, "SwitchStmt", "after switch discriminant")?;
        self.expect_token(TokenKind::OpenBraceToken, "SwitchStmt", "to open switch body")?;

        let mut cases = self.new_list();
        let mut seen_default = false;
        loop {
            let test = match self.current_token() {
                TokenKind::CloseBraceToken => break,
                TokenKind::CaseKeyword => {
                    self.next_token();
                    let node = self.parse_expression()?;
                    Some(self.alloc(node))
                }
                TokenKind::DefaultKeyword => {
                    if seen_default {
                        return Err(self.error("SwitchStmt", &messages::MULTIPLE_DEFAULT_CLAUSES, &[]));
                    }
                    seen_default = true;
                    self.next_token();
                    None
                }
                _ => return Err(self.expected("SwitchStmt", TokenKind::CaseKeyword, "in switch body")),
            };
            self.expect_token(TokenKind::ColonToken, "SwitchStmt", "after case label")?;
            let mut consequent = self.new_list();
            while !matches!(
                self.current_token(),
                TokenKind::CaseKeyword
                    | TokenKind::DefaultKeyword
                    | TokenKind::CloseBraceToken
                    | TokenKind::EndOfInput
            ) {
                consequent.push(self.parse_statement()?);
            }
            cases.push(SwitchCase {
                test,
                consequent: consequent.into_bump_slice(),
            });
        }
        self.next_token();
        Ok(Statement::Switch(SwitchStatement {
            discriminant: self.alloc(discriminant),
            cases: cases.into_bump_slice(),
            line,
        }))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.next_token();
        let block = self.parse_block("TryStmt")?;

        let mut catch_param = None;
        let mut catch_body = None;
        if self.optional_token(TokenKind::CatchKeyword) {
            self.expect_token(TokenKind::OpenParenToken, "TryStmt", "after 'catch'")?;
            catch_param = Some(self.expect_identifier("TryStmt", "in catch clause")?);
            self.expect_token(TokenKind::CloseParenToken, "TryStmt", "after catch parameter")?;
            catch_body = Some(self.parse_block("TryStmt")?);
        }
        let finally_body = if self.optional_token(TokenKind::FinallyKeyword) {
            Some(self.parse_block("TryStmt")?)
        } else {
            None
        };
        if catch_body.is_none() && finally_body.is_none() {
            return Err(self.error("TryStmt", &messages::TRY_WITHOUT_CATCH_OR_FINALLY, &[]));
        }
        Ok(Statement::Try(TryStatement {
            block,
            catch_param,
            catch_body,
            finally_body,
        }))
    }

    fn is_labeled_statement(&mut self) -> bool {
        let saved = self.pos;
        self.next_token();
        let is_label = self.at(TokenKind::ColonToken);
        self.pos = saved;
        is_label
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<Statement<'a>> {
        let label = self.token_text();
        self.next_token();
        self.expect_token(TokenKind::ColonToken, "LabeledStmt", "after label")?;
        let body = self.parse_statement()?;
        Ok(Statement::Labeled(LabeledStatement {
            label,
            body: self.alloc(body),
        }))
    }

    fn parse_function_declaration(&mut self) -> ParseResult<Statement<'a>> {
        self.next_token();
        let name = self.expect_identifier("FunctionDecl", "after 'function'")?;
        let (params, body) = self.parse_function_rest("FunctionDecl")?;
        Ok(Statement::FunctionDeclaration(FunctionDeclaration { name, params, body }))
    }

    /// `( params ) { body }`, shared by declarations and expressions.
    fn parse_function_rest(
        &mut self,
        rule: &'static str,
    ) -> ParseResult<(NodeList<'a, &'a str>, NodeList<'a, Statement<'a>>)> {
        self.expect_token(TokenKind::OpenParenToken, rule, "before parameter list")?;
        let mut params = self.new_list();
        if !self.at(TokenKind::CloseParenToken) {
            loop {
                params.push(self.expect_identifier(rule, "in parameter list")?);
                if !self.optional_token(TokenKind::CommaToken) {
                    break;
                }
            }
        }
        self.expect_token(TokenKind::CloseParenToken, rule, "after parameter list")?;
        let body = self.parse_block(rule)?;
        Ok((params.into_bump_slice(), body))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Comma level: `a, b, c` is a left-nested `Binary` with `CommaToken`.
    fn parse_expression(&mut self) -> ParseResult<Expression<'a>> {
        let mut expression = self.parse_assignment_expression()?;
        while self.optional_token(TokenKind::CommaToken) {
            let right = self.parse_assignment_expression()?;
            expression = Expression::Binary(BinaryExpression {
                left: self.alloc(expression),
                operator: TokenKind::CommaToken,
                right: self.alloc(right),
            });
        }
        Ok(expression)
    }

    fn parse_assignment_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.nested("Assignment", |p| p.parse_assignment_expression_worker())
    }

    fn parse_assignment_expression_worker(&mut self) -> ParseResult<Expression<'a>> {
        let left = self.parse_conditional_expression()?;
        let operator = self.current_token();
        if !operator.is_assignment_operator() {
            return Ok(left);
        }
        if !left.is_valid_assignment_target() {
            return Err(self.error("Assignment", &messages::INVALID_ASSIGNMENT_TARGET, &[]));
        }
        self.next_token();
        let right = self.parse_assignment_expression()?;
        Ok(Expression::Assignment(AssignmentExpression {
            left: self.alloc(left),
            operator,
            right: self.alloc(right),
        }))
    }

    fn parse_conditional_expression(&mut self) -> ParseResult<Expression<'a>> {
        let condition = self.parse_binary_expression(OperatorPrecedence::Lowest)?;
        if !self.optional_token(TokenKind::QuestionToken) {
            return Ok(condition);
        }
        let when_true = self.parse_assignment_expression()?;
        self.expect_token(TokenKind::ColonToken, "Conditional", "in conditional expression")?;
        let when_false = self.parse_assignment_expression()?;
        Ok(Expression::Conditional(ConditionalExpression {
            condition: self.alloc(condition),
            when_true: self.alloc(when_true),
            when_false: self.alloc(when_false),
        }))
    }

    /// Precedence climbing over the left-associative binary levels.
    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> ParseResult<Expression<'a>> {
        let mut left = self.parse_unary_expression()?;

        loop {
            let operator = self.current_token();
            let precedence = get_binary_operator_precedence(operator);
            if precedence == OperatorPrecedence::Invalid || precedence <= min_precedence {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence)?;
            left = Expression::Binary(BinaryExpression {
                left: self.alloc(left),
                operator,
                right: self.alloc(right),
            });
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expression<'a>> {
        let operator = self.current_token();
        if !is_prefix_unary_operator(operator) {
            return self.parse_postfix_expression();
        }
        self.nested("Unary", |p| {
            p.next_token();
            let operand = p.parse_unary_expression()?;
            Ok(Expression::Unary(UnaryExpression {
                operator,
                operand: p.alloc(operand),
            }))
        })
    }

    fn parse_postfix_expression(&mut self) -> ParseResult<Expression<'a>> {
        let expression = self.parse_left_hand_side_expression()?;
        // `a\n++b` is `a; ++b;`
        if self.can_parse_semicolon() {
            return Ok(expression);
        }
        let operator = self.current_token();
        if matches!(operator, TokenKind::PlusPlusToken | TokenKind::MinusMinusToken) {
            self.next_token();
            return Ok(Expression::Postfix(PostfixExpression {
                operator,
                operand: self.alloc(expression),
            }));
        }
        Ok(expression)
    }

    /// Member accesses and calls following a `new` or primary expression.
    fn parse_left_hand_side_expression(&mut self) -> ParseResult<Expression<'a>> {
        let mut expression = self.parse_new_or_member_expression()?;
        loop {
            expression = match self.current_token() {
                TokenKind::DotToken | TokenKind::OpenBracketToken => self.parse_member_rest(expression)?,
                TokenKind::OpenParenToken => {
                    let arguments = self.nested("Call", |p| p.parse_arguments("Call"))?;
                    Expression::Call(CallExpression {
                        callee: self.alloc(expression),
                        arguments,
                    })
                }
                _ => break,
            };
        }
        Ok(expression)
    }

    /// `new callee(args)` or a primary expression, followed by member
    /// accesses only. Calls are left to the left-hand-side loop so that the
    /// first argument list binds to `new`.
    fn parse_new_or_member_expression(&mut self) -> ParseResult<Expression<'a>> {
        let mut expression = if self.at(TokenKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        while matches!(self.current_token(), TokenKind::DotToken | TokenKind::OpenBracketToken) {
            expression = self.parse_member_rest(expression)?;
        }
        Ok(expression)
    }

    fn parse_new_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.next_token();
        let callee = self.nested("NewExpr", |p| p.parse_new_or_member_expression())?;
        let arguments: NodeList<'a, Expression<'a>> = if self.at(TokenKind::OpenParenToken) {
            self.nested("NewExpr", |p| p.parse_arguments("NewExpr"))?
        } else {
            &[]
        };
        Ok(Expression::New(NewExpression {
            callee: self.alloc(callee),
            arguments,
        }))
    }

    /// One `.name` or `[expr]` suffix.
    fn parse_member_rest(&mut self, object: Expression<'a>) -> ParseResult<Expression<'a>> {
        if self.optional_token(TokenKind::OpenBracketToken) {
            let property = self.nested("Member", |p| p.parse_expression())?;
            self.expect_token(TokenKind::CloseBracketToken, "Member", "after computed property")?;
            return Ok(Expression::Member(MemberExpression {
                object: self.alloc(object),
                property: self.alloc(property),
                computed: true,
            }));
        }
        self.next_token();
        let kind = self.current_token();
        if kind != TokenKind::Identifier && !kind.is_keyword() {
            return Err(self.error("Member", &messages::EXPECTED_IDENTIFIER_0, &["after '.'"]));
        }
        let name = self.token_text();
        self.next_token();
        Ok(Expression::Member(MemberExpression {
            object: self.alloc(object),
            property: self.alloc(Expression::Identifier(name)),
            computed: false,
        }))
    }

    /// `( [assignment (, assignment)* [,]] )`
    fn parse_arguments(&mut self, rule: &'static str) -> ParseResult<NodeList<'a, Expression<'a>>> {
        self.expect_token(TokenKind::OpenParenToken, rule, "before arguments")?;
        let mut arguments = self.new_list();
        while !self.at(TokenKind::CloseParenToken) {
            arguments.push(self.parse_assignment_expression()?);
            if !self.optional_token(TokenKind::CommaToken) {
                break;
            }
        }
        self.expect_token(TokenKind::CloseParenToken, rule, "after arguments")?;
        Ok(arguments.into_bump_slice())
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expression<'a>> {
        let kind = self.current_token();
        let expression = match kind {
            TokenKind::NumericLiteral => Expression::NumericLiteral(self.token_text()),
            TokenKind::StringLiteral => Expression::StringLiteral(self.token_text()),
            TokenKind::RegularExpressionLiteral => {
                Expression::RegularExpressionLiteral(split_regular_expression(self.token_text()))
            }
            TokenKind::TrueKeyword => Expression::BooleanLiteral(true),
            TokenKind::FalseKeyword => Expression::BooleanLiteral(false),
            TokenKind::NullKeyword => Expression::NullLiteral,
            TokenKind::UndefinedKeyword => Expression::UndefinedLiteral,
            TokenKind::ThisKeyword => Expression::This,
            TokenKind::Identifier => Expression::Identifier(self.token_text()),
            TokenKind::OpenParenToken => return self.nested("Primary", |p| p.parse_parenthesized_expression()),
            TokenKind::OpenBracketToken => return self.nested("ArrayExpr", |p| p.parse_array_literal()),
            TokenKind::OpenBraceToken => return self.nested("ObjectExpr", |p| p.parse_object_literal()),
            TokenKind::FunctionKeyword => return self.parse_function_expression(),
            TokenKind::BacktickToken => {
                return Err(self.error("Primary", &messages::TEMPLATE_LITERALS_NOT_SUPPORTED, &[]))
            }
            TokenKind::Illegal => {
                let text = self.token_text();
                return Err(self.error("Primary", &messages::INVALID_CHARACTER_0, &[text]));
            }
            _ => return Err(self.error("Primary", &messages::EXPECTED_EXPRESSION, &[])),
        };
        self.next_token();
        Ok(expression)
    }

    fn parse_parenthesized_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.next_token();
        let inner = self.parse_expression()?;
        self.expect_token(TokenKind::CloseParenToken, "Primary", "after parenthesized expression")?;
        Ok(Expression::Grouped(self.alloc(inner)))
    }

    /// Holes (`[1,,2]`) become `undefined`; a trailing comma is allowed.
    fn parse_array_literal(&mut self) -> ParseResult<Expression<'a>> {
        self.next_token();
        let mut elements = self.new_list();
        loop {
            match self.current_token() {
                TokenKind::CloseBracketToken => break,
                TokenKind::CommaToken => {
                    elements.push(Expression::UndefinedLiteral);
                    self.next_token();
                }
                _ => {
                    elements.push(self.parse_assignment_expression()?);
                    if !self.optional_token(TokenKind::CommaToken) {
                        break;
                    }
                }
            }
        }
        self.expect_token(TokenKind::CloseBracketToken, "ArrayExpr", "after array elements")?;
        Ok(Expression::ArrayLiteral(elements.into_bump_slice()))
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expression<'a>> {
        self.next_token();
        let mut properties = self.new_list();
        while !self.at(TokenKind::CloseBraceToken) {
            let kind = self.current_token();
            let is_property_name = matches!(
                kind,
                TokenKind::Identifier | TokenKind::StringLiteral | TokenKind::NumericLiteral
            ) || kind.is_keyword();
            if !is_property_name {
                return Err(self.error("ObjectExpr", &messages::EXPECTED_PROPERTY_NAME, &[]));
            }
            let key = self.token_text();
            self.next_token();
            self.expect_token(TokenKind::ColonToken, "ObjectExpr", "after property name")?;
            let value = self.parse_assignment_expression()?;
            properties.push(Property {
                key,
                value: self.alloc(value),
            });
            if !self.optional_token(TokenKind::CommaToken) {
                break;
            }
        }
        self.expect_token(TokenKind::CloseBraceToken, "ObjectExpr", "after object properties")?;
        Ok(Expression::ObjectLiteral(properties.into_bump_slice()))
    }

    fn parse_function_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.next_token();
        let name = if self.at(TokenKind::Identifier) {
            let name = self.token_text();
            self.next_token();
            Some(name)
        } else {
            None
        };
        let (params, body) = self.parse_function_rest("FunctionExpr")?;
        Ok(Expression::Function(FunctionExpression { name, params, body }))
    }
}

/// Split `/pattern/flags` at its last slash. An unterminated literal keeps
/// everything after the opening slash as its pattern.
fn split_regular_expression(text: &str) -> RegularExpressionLiteral<'_> {
    let body = text.strip_prefix('/').unwrap_or(text);
    match body.rfind('/') {
        Some(end) => RegularExpressionLiteral {
            pattern: &body[..end],
            flags: &body[end + 1..],
        },
        None => RegularExpressionLiteral { pattern: body, flags: "" },
    }
}
