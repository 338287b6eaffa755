//! jsany_printer: AST to text output.
//!
//! Renders a parsed program as an indented tree, one node per line. Used by
//! `jsany --emit-ast` and by tests that compare tree shapes.
//!
//! ```text
//! Program
//!   VarDecl(x)
//!     Binary(+)
//!       Number(1)
//!       Number(2)
//! ```

use jsany_ast::*;

/// Options for the printer.
pub struct PrinterOptions {
    /// Indentation string, repeated once per tree level.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "  ".to_string(),
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// Print a program with default options.
pub fn print_program(program: &Program<'_>) -> String {
    AstPrinter::new().print_program(program)
}

/// The printer converts AST nodes to an indented tree.
pub struct AstPrinter {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
        }
    }

    /// Print a whole program to a string.
    pub fn print_program(&mut self, program: &Program<'_>) -> String {
        self.output.clear();
        self.indent_level = 0;
        self.write("Program");
        self.nested(|p| p.print_statements(program.statements));
        self.finish()
    }

    /// Print a single expression subtree.
    pub fn print_expression_tree(&mut self, expression: &Expression<'_>) -> String {
        self.output.clear();
        self.indent_level = 0;
        self.print_expression(expression);
        self.finish()
    }

    fn finish(&mut self) -> String {
        if !self.options.trailing_newline && self.output.ends_with(&self.options.new_line) {
            let len = self.output.len() - self.options.new_line.len();
            self.output.truncate(len);
        }
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statements(&mut self, statements: &[Statement<'_>]) {
        for statement in statements {
            self.print_statement(statement);
        }
    }

    fn print_statement(&mut self, statement: &Statement<'_>) {
        match statement {
            Statement::Block(body) => {
                self.write("Block");
                self.nested(|p| p.print_statements(body));
            }
            Statement::VariableDeclaration(declaration) => self.print_variable_declaration(declaration),
            Statement::VariableDeclarationList(declarations) => {
                self.write("VarDeclList");
                self.nested(|p| {
                    for declaration in declarations.iter() {
                        p.print_variable_declaration(declaration);
                    }
                });
            }
            Statement::Expression(expression) => {
                self.write("ExprStmt");
                self.nested(|p| p.print_expression(expression));
            }
            Statement::If(n) => {
                self.write("IfStmt");
                self.nested(|p| {
                    p.print_expression(n.test);
                    p.write("Then");
                    p.nested(|p| p.print_statement(n.consequent));
                    if let Some(alternate) = n.alternate {
                        p.write("Else");
                        p.nested(|p| p.print_statement(alternate));
                    }
                });
            }
            Statement::While(n) => {
                self.write("While");
                self.nested(|p| {
                    p.print_expression(n.test);
                    p.print_statement(n.body);
                });
            }
            Statement::DoWhile(n) => {
                self.write("DoWhile");
                self.nested(|p| {
                    p.print_statement(n.body);
                    p.print_expression(n.test);
                });
            }
            Statement::For(n) => {
                self.write("For");
                self.nested(|p| {
                    match n.init {
                        Some(init) => p.print_statement(init),
                        None => p.write("null"),
                    }
                    p.print_optional_expression(n.test);
                    p.print_optional_expression(n.update);
                    p.print_statement(n.body);
                });
            }
            Statement::ForIn(n) => {
                self.write("ForIn");
                self.nested(|p| {
                    p.print_statement(n.left);
                    p.print_expression(n.right);
                    p.print_statement(n.body);
                });
            }
            Statement::Continue(label) => self.write_labeled("Continue", *label),
            Statement::Break(label) => self.write_labeled("Break", *label),
            Statement::Return(argument) => {
                self.write("Return");
                if let Some(argument) = argument {
                    self.nested(|p| p.print_expression(argument));
                }
            }
            Statement::With(n) => {
                self.write("With");
                self.nested(|p| {
                    p.print_expression(n.object);
                    p.print_statement(n.body);
                });
            }
            Statement::Switch(n) => {
                self.write("Switch");
                self.nested(|p| {
                    p.print_expression(n.discriminant);
                    for case in n.cases.iter() {
                        match case.test {
                            Some(test) => {
                                p.write("Case");
                                p.nested(|p| {
                                    p.print_expression(test);
                                    p.print_statements(case.consequent);
                                });
                            }
                            None => {
                                p.write("Default");
                                p.nested(|p| p.print_statements(case.consequent));
                            }
                        }
                    }
                });
            }
            Statement::Labeled(n) => {
                self.write(&format!("Labeled({})", n.label));
                self.nested(|p| p.print_statement(n.body));
            }
            Statement::Throw(argument) => {
                self.write("Throw");
                self.nested(|p| p.print_expression(argument));
            }
            Statement::Try(n) => {
                self.write("Try");
                self.nested(|p| {
                    p.write("Block");
                    p.nested(|p| p.print_statements(n.block));
                    if let Some(body) = n.catch_body {
                        p.write(&format!("Catch({})", n.catch_param.unwrap_or("")));
                        p.nested(|p| p.print_statements(body));
                    }
                    if let Some(body) = n.finally_body {
                        p.write("Finally");
                        p.nested(|p| p.print_statements(body));
                    }
                });
            }
            Statement::Debugger => self.write("Debugger"),
            Statement::Empty => self.write("Empty"),
            Statement::FunctionDeclaration(n) => {
                self.write(&format!("FunctionDecl({})", n.name));
                self.nested(|p| p.print_function_parts(n.params, n.body));
            }
        }
    }

    fn print_variable_declaration(&mut self, declaration: &VariableDeclaration<'_>) {
        self.write(&format!("VarDecl({})", declaration.name));
        if let Some(initializer) = declaration.initializer {
            self.nested(|p| p.print_expression(initializer));
        }
    }

    fn print_function_parts(&mut self, params: &[&str], body: &[Statement<'_>]) {
        self.write(&format!("Params({})", params.join(", ")));
        self.write("Body");
        self.nested(|p| p.print_statements(body));
    }

    fn write_labeled(&mut self, name: &str, label: Option<&str>) {
        match label {
            Some(label) => self.write(&format!("{}({})", name, label)),
            None => self.write(name),
        }
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_optional_expression(&mut self, expression: Option<&Expression<'_>>) {
        match expression {
            Some(expression) => self.print_expression(expression),
            None => self.write("null"),
        }
    }

    fn print_expression(&mut self, expression: &Expression<'_>) {
        match expression {
            Expression::NumericLiteral(text) => self.write(&format!("Number({})", text)),
            Expression::StringLiteral(text) => self.write(&format!("String(\"{}\")", text)),
            Expression::BooleanLiteral(value) => self.write(&format!("Boolean({})", value)),
            Expression::RegularExpressionLiteral(n) => {
                self.write(&format!("RegExp(/{}/{})", n.pattern, n.flags))
            }
            Expression::ArrayLiteral(elements) => {
                self.write("Array");
                self.nested(|p| {
                    for element in elements.iter() {
                        p.print_expression(element);
                    }
                });
            }
            Expression::ObjectLiteral(properties) => {
                self.write("Object");
                self.nested(|p| {
                    for property in properties.iter() {
                        p.write(&format!("Property({})", property.key));
                        p.nested(|p| p.print_expression(property.value));
                    }
                });
            }
            Expression::NullLiteral => self.write("Null"),
            Expression::UndefinedLiteral => self.write("Undefined"),
            Expression::This => self.write("This"),
            Expression::Identifier(name) => self.write(&format!("Identifier({})", name)),
            Expression::Grouped(inner) => {
                self.write("Grouped");
                self.nested(|p| p.print_expression(inner));
            }
            Expression::Binary(_) | Expression::Member(_) | Expression::Call(_) => self.print_chain(expression),
            Expression::Assignment(n) => {
                self.write(&format!("Assign({})", n.operator.text()));
                self.nested(|p| {
                    p.print_expression(n.left);
                    p.print_expression(n.right);
                });
            }
            Expression::Unary(n) => {
                self.write(&format!("Unary({})", n.operator.text()));
                self.nested(|p| p.print_expression(n.operand));
            }
            Expression::Postfix(n) => {
                self.write(&format!("Postfix({})", n.operator.text()));
                self.nested(|p| p.print_expression(n.operand));
            }
            Expression::Conditional(n) => {
                self.write("Conditional");
                self.nested(|p| {
                    p.print_expression(n.condition);
                    p.print_expression(n.when_true);
                    p.print_expression(n.when_false);
                });
            }
            Expression::New(n) => {
                self.write("New");
                self.nested(|p| {
                    p.print_expression(n.callee);
                    p.print_arguments(n.arguments);
                });
            }
            Expression::Function(n) => {
                self.write(&format!("Function({})", n.display_name()));
                self.nested(|p| p.print_function_parts(n.params, n.body));
            }
        }
    }

    /// Left-nested binary, member and call chains. Each link's header is
    /// written on the way down; its second child is printed on the way back
    /// up, one level shallower than the previous one.
    fn print_chain<'e, 'a>(&mut self, expression: &'e Expression<'a>) {
        let mut pending: Vec<Second<'e, 'a>> = Vec::new();
        let mut current = expression;
        loop {
            current = match current {
                Expression::Binary(n) => {
                    self.write(&format!("Binary({})", n.operator.text()));
                    pending.push(Second::Expression(n.right));
                    n.left
                }
                Expression::Member(n) => {
                    self.write(if n.computed { "Member([])" } else { "Member(.)" });
                    pending.push(Second::Expression(n.property));
                    n.object
                }
                Expression::Call(n) => {
                    self.write("Call");
                    pending.push(Second::Arguments(n.arguments));
                    n.callee
                }
                _ => break,
            };
            self.indent_level += 1;
        }
        self.print_expression(current);
        while let Some(second) = pending.pop() {
            match second {
                Second::Expression(expression) => self.print_expression(expression),
                Second::Arguments(arguments) => self.print_arguments(arguments),
            }
            self.indent_level -= 1;
        }
    }

    fn print_arguments(&mut self, arguments: &[Expression<'_>]) {
        self.write("Arguments");
        self.nested(|p| {
            for argument in arguments {
                p.print_expression(argument);
            }
        });
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    /// Write one tree line at the current depth.
    fn write(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.write_newline();
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent_level += 1;
        f(self);
        self.indent_level -= 1;
    }
}

/// The child printed after the left-hand side of a chain link.
enum Second<'e, 'a> {
    Expression(&'e Expression<'a>),
    Arguments(&'e [Expression<'a>]),
}
