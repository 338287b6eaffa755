//! Tree-walking C++ code generation over the `JS::Any` runtime.
//!
//! Expressions lower to inline value-constructing C++ expressions. Statements
//! lower to indented C++ statements and record every declared name in the
//! enclosing function scope, which is emitted as one `JS::Any a, b;` line at
//! the top of that scope.

use indexmap::{IndexMap, IndexSet};
use jsany_ast::*;
use jsany_diagnostics::GenerateError;
use rustc_hash::FxBuildHasher;

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;
type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Headers of the runtime every translation unit includes.
pub const RUNTIME_INCLUDES: &[&str] = &[
    "types/JsAny.hpp",
    "global/global.hpp",
    "types/objects/Types.hpp",
    "customOperators/CustomOperators.hpp",
];

const FUNCTION_PROLOGUE: &str =
    "JS::Any(JS::InternalObject::create<JS::Function>([&](const JS::Any &thisArg, const JS::Any &arguments) -> JS::Any {\n";

/// What a generation call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// A complete translation unit with includes and `int main()`.
    #[default]
    Program,
    /// The hoisted declaration line and the bare statements, unindented.
    Statements,
}

/// Options for the code generator.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// One level of indentation.
    pub indent: String,
    pub emit_mode: EmitMode,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            emit_mode: EmitMode::Program,
        }
    }
}

/// Generated statements together with the names they declare.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub code: String,
    /// Declared names in first-declaration order, without duplicates.
    pub hoisted: Vec<String>,
}

/// Names declared in one function scope.
#[derive(Default)]
struct Scope<'a> {
    hoisted: FxIndexSet<&'a str>,
    /// Parameters are already bound and never hoisted.
    params: &'a [&'a str],
}

impl<'a> Scope<'a> {
    fn declare(&mut self, name: &'a str) {
        if !self.params.contains(&name) {
            self.hoisted.insert(name);
        }
    }

    fn declaration_line(&self) -> Option<String> {
        if self.hoisted.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.hoisted.iter().copied().collect();
        Some(format!("JS::Any {};", names.join(", ")))
    }
}

/// The code generator walks a finished AST and produces C++ source text.
pub struct CodeGenerator {
    options: GeneratorOptions,
    /// Suffix of the next for-in temporary set.
    temp_counter: u32,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl CodeGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            temp_counter: 0,
        }
    }

    /// Start for-in temporary numbering at `start`, continuing a previous
    /// generator's sequence.
    pub fn with_counter_start(mut self, start: u32) -> Self {
        self.temp_counter = start;
        self
    }

    /// The suffix the next for-in statement will use.
    pub fn next_counter(&self) -> u32 {
        self.temp_counter
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate output in the configured [`EmitMode`].
    pub fn generate(&mut self, statements: &[Statement<'_>]) -> GenerateResult<String> {
        match self.options.emit_mode {
            EmitMode::Program => self.generate_program(statements),
            EmitMode::Statements => {
                let fragment = self.generate_statements(statements, 0)?;
                let mut out = String::new();
                if !fragment.hoisted.is_empty() {
                    out.push_str(&format!("JS::Any {};\n", fragment.hoisted.join(", ")));
                }
                out.push_str(&fragment.code);
                Ok(out)
            }
        }
    }

    /// Generate a complete translation unit wrapping `statements` in `main`.
    pub fn generate_program(&mut self, statements: &[Statement<'_>]) -> GenerateResult<String> {
        let mut scope = Scope::default();
        let mut body = String::new();
        self.emit_scope_body(statements, 1, &mut scope, &mut body)?;

        let mut out = String::with_capacity(body.len() + 256);
        for include in RUNTIME_INCLUDES {
            out.push_str(&format!("#include \"{}\"\n", include));
        }
        out.push_str("\nint main() {\n");
        if let Some(line) = scope.declaration_line() {
            self.write_line(&mut out, 1, &line);
        }
        out.push_str(&body);
        self.write_line(&mut out, 1, "return 0;");
        out.push_str("}\n");
        Ok(out)
    }

    /// Generate `statements` at `level` without any wrapper.
    pub fn generate_statements(&mut self, statements: &[Statement<'_>], level: usize) -> GenerateResult<Fragment> {
        let mut scope = Scope::default();
        let mut code = String::new();
        self.emit_scope_body(statements, level, &mut scope, &mut code)?;
        Ok(Fragment {
            code,
            hoisted: scope.hoisted.iter().map(|name| name.to_string()).collect(),
        })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Function declarations that are direct children of a scope are
    /// assigned before the scope's other statements run.
    fn emit_scope_body<'a>(
        &mut self,
        statements: &[Statement<'a>],
        level: usize,
        scope: &mut Scope<'a>,
        out: &mut String,
    ) -> GenerateResult<()> {
        for statement in statements {
            if let Statement::FunctionDeclaration(_) = statement {
                self.emit_statement(statement, level, scope, out)?;
            }
        }
        for statement in statements {
            if !matches!(statement, Statement::FunctionDeclaration(_)) {
                self.emit_statement(statement, level, scope, out)?;
            }
        }
        Ok(())
    }

    fn emit_statement<'a>(
        &mut self,
        statement: &Statement<'a>,
        level: usize,
        scope: &mut Scope<'a>,
        out: &mut String,
    ) -> GenerateResult<()> {
        match statement {
            Statement::Block(body) => {
                self.write_line(out, level, "{");
                for statement in body.iter() {
                    self.emit_statement(statement, level + 1, scope, out)?;
                }
                self.write_line(out, level, "}");
            }
            Statement::VariableDeclaration(declaration) => {
                self.emit_variable_declaration(declaration, level, scope, out)?
            }
            Statement::VariableDeclarationList(declarations) => {
                for declaration in declarations.iter() {
                    self.emit_variable_declaration(declaration, level, scope, out)?;
                }
            }
            Statement::Expression(expression) => {
                self.write_indent(out, level);
                self.emit_expression(expression, level, out)?;
                out.push_str(";\n");
            }
            Statement::If(n) => {
                self.write_indent(out, level);
                self.emit_if(n, level, scope, out)?;
                out.push('\n');
            }
            Statement::While(n) => {
                self.write_indent(out, level);
                out.push_str("while (");
                self.emit_expression(n.test, level, out)?;
                out.push_str(") ");
                self.emit_body(n.body, level, scope, out)?;
                out.push('\n');
            }
            Statement::DoWhile(n) => {
                self.write_indent(out, level);
                out.push_str("do ");
                self.emit_body(n.body, level, scope, out)?;
                out.push_str(" while (");
                self.emit_expression(n.test, level, out)?;
                out.push_str(");\n");
            }
            Statement::For(n) => self.emit_for(n, level, scope, out)?,
            Statement::ForIn(n) => self.emit_for_in(n, level, scope, out)?,
            Statement::Continue(label) => self.emit_jump("continue", *label, level, out),
            Statement::Break(label) => self.emit_jump("break", *label, level, out),
            Statement::Return(argument) => {
                self.write_indent(out, level);
                match argument {
                    Some(argument) => {
                        out.push_str("return ");
                        self.emit_expression(argument, level, out)?;
                        out.push_str(";\n");
                    }
                    None => out.push_str("return JS::Any();\n"),
                }
            }
            Statement::With(n) => {
                return Err(GenerateError::Unsupported {
                    construct: "with",
                    line: n.line,
                })
            }
            Statement::Switch(n) => {
                return Err(GenerateError::Unsupported {
                    construct: "switch",
                    line: n.line,
                })
            }
            Statement::Labeled(n) => {
                self.write_line(out, level, &format!("{}:", n.label));
                self.emit_statement(n.body, level, scope, out)?;
            }
            Statement::Throw(argument) => {
                self.write_indent(out, level);
                out.push_str("throw ");
                self.emit_expression(argument, level, out)?;
                out.push_str(";\n");
            }
            Statement::Try(n) => self.emit_try(n, level, scope, out)?,
            Statement::Debugger => self.write_line(out, level, "/* debugger statement (no-op) */"),
            Statement::Empty => {}
            Statement::FunctionDeclaration(n) => {
                scope.declare(n.name);
                self.write_indent(out, level);
                out.push_str(n.name);
                out.push_str(" = ");
                self.emit_function(n.name, n.params, n.body, level, out)?;
                out.push_str(";\n");
            }
        }
        Ok(())
    }

    fn emit_variable_declaration<'a>(
        &mut self,
        declaration: &VariableDeclaration<'a>,
        level: usize,
        scope: &mut Scope<'a>,
        out: &mut String,
    ) -> GenerateResult<()> {
        scope.declare(declaration.name);
        if let Some(initializer) = declaration.initializer {
            self.write_indent(out, level);
            out.push_str(declaration.name);
            out.push_str(" = ");
            self.emit_expression(initializer, level, out)?;
            out.push_str(";\n");
        }
        Ok(())
    }

    /// A braced body for `if`/loops. Non-block bodies get braces too. No
    /// trailing newline, so callers can continue the line.
    fn emit_body<'a>(
        &mut self,
        body: &Statement<'a>,
        level: usize,
        scope: &mut Scope<'a>,
        out: &mut String,
    ) -> GenerateResult<()> {
        out.push_str("{\n");
        match body {
            Statement::Block(statements) => {
                for statement in statements.iter() {
                    self.emit_statement(statement, level + 1, scope, out)?;
                }
            }
            other => self.emit_statement(other, level + 1, scope, out)?,
        }
        self.write_indent(out, level);
        out.push('}');
        Ok(())
    }

    fn emit_if<'a>(
        &mut self,
        n: &IfStatement<'a>,
        level: usize,
        scope: &mut Scope<'a>,
        out: &mut String,
    ) -> GenerateResult<()> {
        out.push_str("if (");
        self.emit_expression(n.test, level, out)?;
        out.push_str(") ");
        self.emit_body(n.consequent, level, scope, out)?;
        if let Some(alternate) = n.alternate {
            out.push_str(" else ");
            match alternate {
                Statement::If(chained) => self.emit_if(chained, level, scope, out)?,
                other => self.emit_body(other, level, scope, out)?,
            }
        }
        Ok(())
    }

    fn emit_for<'a>(
        &mut self,
        n: &ForStatement<'a>,
        level: usize,
        scope: &mut Scope<'a>,
        out: &mut String,
    ) -> GenerateResult<()> {
        let mut init = String::new();
        match n.init {
            Some(Statement::VariableDeclaration(declaration)) => {
                self.emit_loop_declarations(std::slice::from_ref(declaration), level, scope, &mut init)?
            }
            Some(Statement::VariableDeclarationList(declarations)) => {
                self.emit_loop_declarations(declarations, level, scope, &mut init)?
            }
            Some(Statement::Expression(expression)) => self.emit_expression(expression, level, &mut init)?,
            _ => {}
        }

        self.write_indent(out, level);
        out.push_str("for (");
        out.push_str(&init);
        out.push(';');
        if let Some(test) = n.test {
            out.push(' ');
            self.emit_expression(test, level, out)?;
        }
        out.push(';');
        if let Some(update) = n.update {
            out.push(' ');
            self.emit_expression(update, level, out)?;
        }
        out.push_str(") ");
        self.emit_body(n.body, level, scope, out)?;
        out.push('\n');
        Ok(())
    }

    /// `a = 1, b = 2` for a loop header; declarations without an initializer
    /// are only hoisted.
    fn emit_loop_declarations<'a>(
        &mut self,
        declarations: &[VariableDeclaration<'a>],
        level: usize,
        scope: &mut Scope<'a>,
        out: &mut String,
    ) -> GenerateResult<()> {
        let mut first = true;
        for declaration in declarations {
            scope.declare(declaration.name);
            if let Some(initializer) = declaration.initializer {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                out.push_str(declaration.name);
                out.push_str(" = ");
                self.emit_expression(initializer, level, out)?;
            }
        }
        Ok(())
    }

    /// Lowers `for (left in right) body` into a key snapshot, a length and
    /// an index-counted loop that rebinds `left` each iteration.
    fn emit_for_in<'a>(
        &mut self,
        n: &ForInStatement<'a>,
        level: usize,
        scope: &mut Scope<'a>,
        out: &mut String,
    ) -> GenerateResult<()> {
        let suffix = self.temp_counter;
        self.temp_counter += 1;
        let keys = format!("_forin_keys{}", suffix);
        let len = format!("_forin_len{}", suffix);
        let index = format!("_forin_i{}", suffix);

        let mut target = String::new();
        match n.left {
            Statement::VariableDeclaration(declaration) => {
                scope.declare(declaration.name);
                target.push_str(declaration.name);
            }
            Statement::Expression(expression) => self.emit_expression(expression, level + 2, &mut target)?,
            _ => {}
        }

        self.write_line(out, level, "{");
        self.write_indent(out, level + 1);
        out.push_str(&format!(
            "JS::Any {} = JS::Object::keys(Object, JS::Arguments::CreateArgumentsObject(std::vector<JS::Any>{{",
            keys
        ));
        self.emit_expression(n.right, level + 1, out)?;
        out.push_str("}));\n");
        self.write_line(
            out,
            level + 1,
            &format!(
                "size_t {} = static_cast<size_t>(std::get<double>({}[u\"length\"].getValue()));",
                len, keys
            ),
        );
        self.write_line(
            out,
            level + 1,
            &format!("for (size_t {i} = 0; {i} < {len}; {i}++) {{", i = index, len = len),
        );
        self.write_line(
            out,
            level + 2,
            &format!("{} = {}[std::to_string({})];", target, keys, index),
        );
        match n.body {
            Statement::Block(statements) => {
                for statement in statements.iter() {
                    self.emit_statement(statement, level + 2, scope, out)?;
                }
            }
            other => self.emit_statement(other, level + 2, scope, out)?,
        }
        self.write_line(out, level + 1, "}");
        self.write_line(out, level, "}");
        Ok(())
    }

    fn emit_jump(&self, keyword: &str, label: Option<&str>, level: usize, out: &mut String) {
        match label {
            Some(label) => self.write_line(out, level, &format!("{} /* label: {} */;", keyword, label)),
            None => self.write_line(out, level, &format!("{};", keyword)),
        }
    }

    /// `finally` is not lowered to guaranteed execution: its statements are
    /// inlined after the try/catch.
    fn emit_try<'a>(
        &mut self,
        n: &TryStatement<'a>,
        level: usize,
        scope: &mut Scope<'a>,
        out: &mut String,
    ) -> GenerateResult<()> {
        self.write_line(out, level, "try {");
        for statement in n.block.iter() {
            self.emit_statement(statement, level + 1, scope, out)?;
        }
        self.write_indent(out, level);
        match (n.catch_param, n.catch_body) {
            (Some(param), Some(body)) => {
                out.push_str(&format!("}} catch (JS::Any& {}) {{\n", param));
                for statement in body.iter() {
                    self.emit_statement(statement, level + 1, scope, out)?;
                }
                self.write_line(out, level, "}");
            }
            _ => out.push_str("} catch (...) { throw; }\n"),
        }
        if let Some(body) = n.finally_body {
            self.write_line(out, level, "// finally");
            for statement in body.iter() {
                self.emit_statement(statement, level, scope, out)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn emit_expression<'a>(&mut self, expression: &Expression<'a>, level: usize, out: &mut String) -> GenerateResult<()> {
        match expression {
            Expression::NumericLiteral(text) => out.push_str(&format!("JS::Any({})", text)),
            Expression::StringLiteral(text) => out.push_str(&format!("JS::Any(u\"{}\")", text)),
            Expression::BooleanLiteral(value) => out.push_str(&format!("JS::Any({})", value)),
            Expression::RegularExpressionLiteral(n) => out.push_str(&format!(
                "JS::Any(JS::InternalObject::create<JS::RegExp>(JS::Any(u\"{}\"), JS::Any(u\"{}\")))",
                escape_string(n.pattern),
                escape_string(n.flags)
            )),
            Expression::ArrayLiteral(elements) => {
                out.push_str("JS::Any(JS::InternalObject::create<JS::Array>(std::vector<JS::Any>{");
                if !elements.is_empty() {
                    out.push('\n');
                    for (i, element) in elements.iter().enumerate() {
                        if i > 0 {
                            out.push_str(",\n");
                        }
                        self.write_indent(out, level + 1);
                        self.emit_expression(element, level + 1, out)?;
                    }
                    out.push('\n');
                    self.write_indent(out, level);
                }
                out.push_str("}))");
            }
            Expression::ObjectLiteral(properties) => {
                // Later duplicates overwrite the value but keep the first position.
                let mut entries: FxIndexMap<&str, &Expression<'a>> = FxIndexMap::default();
                for property in properties.iter() {
                    entries.insert(property.key, property.value);
                }
                out.push_str(
                    "JS::Any(JS::InternalObject::create<JS::Object>(std::unordered_map<std::u16string, JS::Any>{",
                );
                if !entries.is_empty() {
                    out.push('\n');
                    for (i, (key, value)) in entries.iter().enumerate() {
                        if i > 0 {
                            out.push_str(",\n");
                        }
                        self.write_indent(out, level + 1);
                        out.push_str(&format!("{{u\"{}\", ", key));
                        self.emit_expression(value, level + 1, out)?;
                        out.push('}');
                    }
                    out.push('\n');
                    self.write_indent(out, level);
                }
                out.push_str("}))");
            }
            Expression::NullLiteral => out.push_str("JS::Any(nullptr)"),
            Expression::UndefinedLiteral => out.push_str("JS::Any()"),
            Expression::This => out.push_str("thisArg"),
            Expression::Identifier(name) => out.push_str(name),
            Expression::Grouped(inner) => {
                out.push('(');
                self.emit_expression(inner, level, out)?;
                out.push(')');
            }
            Expression::Binary(_) | Expression::Member(_) | Expression::Call(_) => {
                self.emit_chain(expression, level, out)?
            }
            Expression::Assignment(n) => {
                self.emit_expression(n.left, level, out)?;
                out.push_str(" = ");
                match n.operator.compound_assignment_base() {
                    Some(base) => {
                        self.emit_expression(n.left, level, out)?;
                        out.push(' ');
                        out.push_str(binary_operator_text(base));
                        out.push(' ');
                        let needs_parens = matches!(
                            n.right,
                            Expression::Binary(_) | Expression::Assignment(_) | Expression::Conditional(_)
                        );
                        if needs_parens {
                            out.push('(');
                        }
                        self.emit_expression(n.right, level, out)?;
                        if needs_parens {
                            out.push(')');
                        }
                    }
                    None => self.emit_expression(n.right, level, out)?,
                }
            }
            Expression::Unary(n) => {
                let function = match n.operator {
                    TokenKind::TypeOfKeyword => Some("typeOf"),
                    TokenKind::DeleteKeyword => Some("del"),
                    TokenKind::VoidKeyword => Some("Void"),
                    _ => None,
                };
                match function {
                    Some(function) => {
                        out.push_str(function);
                        out.push('(');
                        self.emit_expression(n.operand, level, out)?;
                        out.push(')');
                    }
                    None => {
                        let mut operand = String::new();
                        self.emit_expression(n.operand, level, &mut operand)?;
                        let operator = n.operator.text();
                        out.push_str(operator);
                        // `- -x` must not become `--x`.
                        if operand.starts_with(['+', '-']) && operator.ends_with(['+', '-']) {
                            out.push(' ');
                        }
                        out.push_str(&operand);
                    }
                }
            }
            Expression::Postfix(n) => {
                self.emit_expression(n.operand, level, out)?;
                out.push_str(n.operator.text());
            }
            Expression::Conditional(n) => {
                self.emit_expression(n.condition, level, out)?;
                out.push_str(" ? ");
                self.emit_expression(n.when_true, level, out)?;
                out.push_str(" : ");
                self.emit_expression(n.when_false, level, out)?;
            }
            Expression::New(n) => {
                out.push_str("NEW(");
                self.emit_expression(n.callee, level, out)?;
                for argument in n.arguments.iter() {
                    out.push_str(", ");
                    self.emit_expression(argument, level, out)?;
                }
                out.push(')');
            }
            Expression::Function(n) => self.emit_function(n.display_name(), n.params, n.body, level, out)?,
        }
        Ok(())
    }

    /// Binary operators, member accesses and calls nest to the left without
    /// limit, so the chain is unwound into a stack of suffixes and the
    /// innermost operand is emitted first.
    fn emit_chain<'e, 'a>(&mut self, expression: &'e Expression<'a>, level: usize, out: &mut String) -> GenerateResult<()> {
        let mut suffixes = Vec::new();
        let mut current = expression;
        loop {
            current = match current {
                Expression::Binary(n) => {
                    suffixes.push(ChainSuffix::Operator(n.operator, n.right));
                    n.left
                }
                Expression::Member(n) => {
                    suffixes.push(ChainSuffix::Property(n));
                    n.object
                }
                Expression::Call(n) => {
                    suffixes.push(ChainSuffix::Arguments(n.arguments));
                    n.callee
                }
                _ => break,
            };
        }
        self.emit_expression(current, level, out)?;

        for suffix in suffixes.iter().rev() {
            match *suffix {
                ChainSuffix::Operator(TokenKind::CommaToken, right) => {
                    out.push_str(", ");
                    self.emit_expression(right, level, out)?;
                }
                ChainSuffix::Operator(operator, right) => {
                    out.push(' ');
                    out.push_str(binary_operator_text(operator));
                    out.push(' ');
                    self.emit_expression(right, level, out)?;
                }
                ChainSuffix::Property(n) => match (n.computed, n.property) {
                    (false, Expression::Identifier(name)) => out.push_str(&format!("[u\"{}\"]", name)),
                    (_, property) => {
                        out.push('[');
                        self.emit_expression(property, level, out)?;
                        out.push(']');
                    }
                },
                ChainSuffix::Arguments(arguments) => {
                    out.push('(');
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.emit_expression(argument, level, out)?;
                    }
                    out.push(')');
                }
            }
        }
        Ok(())
    }

    /// A `JS::Function` closure taking `thisArg` and `arguments`. Parameters
    /// are bound by position and an implicit `return JS::Any();` ends the body.
    fn emit_function<'a>(
        &mut self,
        name: &str,
        params: &'a [&'a str],
        body: &[Statement<'a>],
        level: usize,
        out: &mut String,
    ) -> GenerateResult<()> {
        let mut scope = Scope {
            params,
            ..Scope::default()
        };
        let mut inner = String::new();
        self.emit_scope_body(body, level + 1, &mut scope, &mut inner)?;

        out.push_str(FUNCTION_PROLOGUE);
        if let Some(line) = scope.declaration_line() {
            self.write_line(out, level + 1, &line);
        }
        for (i, param) in params.iter().enumerate() {
            self.write_line(out, level + 1, &format!("JS::Any {} = arguments[u\"{}\"];", param, i));
        }
        out.push_str(&inner);
        self.write_line(out, level + 1, "return JS::Any();");
        self.write_indent(out, level);
        out.push_str(&format!("}}, {}, u\"{}\"))", params.len(), name));
        Ok(())
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    fn write_indent(&self, out: &mut String, level: usize) {
        for _ in 0..level {
            out.push_str(&self.options.indent);
        }
    }

    fn write_line(&self, out: &mut String, level: usize, text: &str) {
        self.write_indent(out, level);
        out.push_str(text);
        out.push('\n');
    }
}

/// What follows the left operand of one link in a left-nested chain.
#[derive(Clone, Copy)]
enum ChainSuffix<'e, 'a> {
    Operator(TokenKind, &'e Expression<'a>),
    Property(&'e MemberExpression<'a>),
    Arguments(&'e [Expression<'a>]),
}

/// The C++ spelling of a binary operator. Operators whose native C++
/// meaning differs from JavaScript go through runtime functions.
///
/// `in` and `instanceof` have no C++ counterpart and pass through as written,
/// so output that uses them does not compile against [`RUNTIME_INCLUDES`].
fn binary_operator_text(operator: TokenKind) -> &'static str {
    match operator {
        TokenKind::EqualsEqualsEqualsToken => "strictEq",
        TokenKind::ExclamationEqualsEqualsToken => "strictNeq",
        TokenKind::GreaterThanGreaterThanGreaterThanToken => "URightShift",
        other => other.text(),
    }
}

/// Escape `\` and `"` for a C++ string literal.
fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
