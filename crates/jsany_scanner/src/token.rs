//! Tokens produced by the scanner.

use jsany_ast::TokenKind;
use jsany_core::text::TextSpan;

/// A classified, located lexical unit of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token text. String literals are stored without their delimiters;
    /// an end-of-line token stores `"\n"`.
    pub text: String,
    /// 1-based line of the first character.
    pub line: u32,
    /// Byte offset of the first character from the start of its line.
    pub column: u32,
    /// Byte range of the token in the source.
    pub span: TextSpan,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32, span: TextSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
            span,
        }
    }

    /// The synthetic end-of-input token placed at `pos`.
    pub fn end_of_input(line: u32, column: u32, pos: u32) -> Self {
        Self::new(TokenKind::EndOfInput, "", line, column, TextSpan::empty(pos))
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The text used when reporting this token in a diagnostic.
    pub fn display_text(&self) -> &str {
        match self.kind {
            TokenKind::EndOfInput => "end of input",
            TokenKind::EndOfLine => "end of line",
            _ => &self.text,
        }
    }
}
