//! jsany_diagnostics: Error types and the diagnostic message catalog.
//!
//! Parsing fails fast with a single [`ParseError`]; code generation can fail
//! with a [`GenerateError`] for constructs it refuses to lower. Both are
//! turned into [`Diagnostic`] records when the pipeline reports them.

use jsany_core::text::TextSpan;
use std::fmt;
use thiserror::Error;

/// A diagnostic message template with a code.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    /// The diagnostic error code (e.g., 1002).
    pub code: u32,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// Resolve the template with the given arguments.
    pub fn format(&self, args: &[&str]) -> String {
        format_message(self.message, args)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

// ============================================================================
// Errors
// ============================================================================

/// A grammar violation. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{rule}] {message} at line {line} col {column}. Found '{found}'")]
pub struct ParseError {
    /// The grammar rule that raised the error, e.g. `IfStmt`.
    pub rule: &'static str,
    /// Catalog code of the message.
    pub code: u32,
    /// The resolved message text.
    pub message: String,
    /// 1-based line of the offending token.
    pub line: u32,
    /// Column of the offending token, relative to its line start.
    pub column: u32,
    /// Text of the offending token, or `end of input`.
    pub found: String,
    /// Byte span of the offending token.
    pub span: TextSpan,
}

/// A construct the code generator refuses to lower.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("'{construct}' statements are not supported by the code generator (line {line})")]
    Unsupported { construct: &'static str, line: u32 },
}

impl GenerateError {
    pub fn code(&self) -> u32 {
        match self {
            GenerateError::Unsupported { .. } => messages::UNSUPPORTED_CONSTRUCT_0.code,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            GenerateError::Unsupported { line, .. } => *line,
        }
    }
}

// ============================================================================
// Reported diagnostics
// ============================================================================

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// 1-based line and line-relative column, if known.
    pub location: Option<(u32, u32)>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic error code.
    pub code: u32,
}

impl Diagnostic {
    /// Create a diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            location: None,
            message_text: message.format(args),
            code: message.code,
        }
    }

    /// Attach the file the diagnostic belongs to.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn from_parse_error(error: &ParseError) -> Self {
        Self {
            file: None,
            location: Some((error.line, error.column)),
            message_text: format!("{}. Found '{}'", error.message.trim_end_matches('.'), error.found),
            code: error.code,
        }
    }

    pub fn from_generate_error(error: &GenerateError) -> Self {
        Self {
            file: None,
            location: Some((error.line(), 0)),
            message_text: error.to_string(),
            code: error.code(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some((line, column)) = self.location {
                write!(f, "({},{})", line, column)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "error JS{}: {}", self.code, self.message_text)
    }
}

/// A collection of diagnostics accumulated across translation units.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Sort diagnostics by file, then by position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.location.unwrap_or((0, 0)).cmp(&b.location.unwrap_or((0, 0))))
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Parser errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1001, "Unexpected token.");
    pub const EXPECTED_0_1: DiagnosticMessage = diag!(1002, "Expected '{0}' {1}.");
    pub const EXPECTED_EXPRESSION: DiagnosticMessage = diag!(1003, "Expected expression.");
    pub const EXPECTED_IDENTIFIER_0: DiagnosticMessage = diag!(1004, "Expected identifier {0}.");
    pub const EXPECTED_PROPERTY_NAME: DiagnosticMessage = diag!(1005, "Expected property name.");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(1006, "Invalid left-hand side in assignment.");
    pub const WITH_NOT_SUPPORTED: DiagnosticMessage = diag!(1007, "'with' statements are not supported in strict mode.");
    pub const TRY_WITHOUT_CATCH_OR_FINALLY: DiagnosticMessage = diag!(1008, "Expected 'catch' or 'finally' after 'try' block.");
    pub const MULTIPLE_DEFAULT_CLAUSES: DiagnosticMessage = diag!(1009, "More than one 'default' clause in switch statement.");
    pub const INVALID_CHARACTER_0: DiagnosticMessage = diag!(1010, "Invalid character '{0}'.");
    pub const CLASSES_NOT_SUPPORTED: DiagnosticMessage = diag!(1011, "Class declarations are not supported.");
    pub const TEMPLATE_LITERALS_NOT_SUPPORTED: DiagnosticMessage = diag!(1012, "Template literals are not supported.");
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(1013, "Maximum nesting depth exceeded.");

    // ========================================================================
    // Code generator errors (2000-2099)
    // ========================================================================
    pub const UNSUPPORTED_CONSTRUCT_0: DiagnosticMessage = diag!(2001, "'{0}' statements are not supported by the code generator.");

    // ========================================================================
    // Driver errors (5000-5099)
    // ========================================================================
    pub const CANNOT_READ_FILE_0_1: DiagnosticMessage = diag!(5001, "Cannot read file '{0}': {1}.");
    pub const FILE_0_IS_NOT_VALID_UTF8: DiagnosticMessage = diag!(5002, "File '{0}' is not valid UTF-8.");
}
