//! The scanner/lexer.
//!
//! Scanning never fails. Unterminated comments, strings and regular
//! expressions run to the end of their input, and a character that starts
//! no token becomes an `Illegal` token for the parser to reject.

use crate::token::Token;
use jsany_ast::token_kind::{TokenKind, OPERATOR_TABLE};
use jsany_core::text::TextSpan;

/// How a `/` that does not open a comment is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlashMode {
    /// Division after a token that ends an operand, regular expression otherwise.
    #[default]
    Contextual,
    /// Always a regular expression, unless the `/` is the last character.
    AlwaysRegex,
}

/// Tokenize `source` with the default settings.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).tokenize()
}

/// The scanner converts source text into tokens.
pub struct Scanner<'s> {
    /// The source text being scanned.
    text: &'s str,
    bytes: &'s [u8],
    /// Current byte position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    /// 1-based line of `pos`.
    line: u32,
    /// Byte offset where the current line starts.
    line_start: usize,
    slash_mode: SlashMode,
    /// Kind of the last token that was not an end-of-line.
    last_significant: Option<TokenKind>,
}

impl<'s> Scanner<'s> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'s str) -> Self {
        let mut scanner = Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            token_start: 0,
            line: 1,
            line_start: 0,
            slash_mode: SlashMode::default(),
            last_significant: None,
        };
        if text.starts_with('\u{FEFF}') {
            scanner.pos = '\u{FEFF}'.len_utf8();
            scanner.line_start = scanner.pos;
        }
        scanner
    }

    pub fn with_slash_mode(mut self, mode: SlashMode) -> Self {
        self.slash_mode = mode;
        self
    }

    /// Scan the whole input. The result holds no end-of-input token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.text.len() / 4 + 1);
        loop {
            let token = self.next_token();
            if token.is(TokenKind::EndOfInput) {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    // ========================================================================
    // Character access
    // ========================================================================

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn new_line_at(&mut self, pos: usize) {
        self.line += 1;
        self.line_start = pos;
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    fn skip_trivia(&mut self) {
        while let Some(b) = self.byte_at(0) {
            match b {
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'\r' if self.byte_at(1) != Some(b'\n') => self.pos += 1,
                b'/' if self.byte_at(1) == Some(b'/') => self.skip_line_comment(),
                b'/' if self.byte_at(1) == Some(b'*') => self.skip_block_comment(),
                0xC2 if self.byte_at(1) == Some(0xA0) => self.pos += 2,
                _ => return,
            }
        }
    }

    /// Skip to the newline ending a `//` comment. The newline itself is kept
    /// so it still produces an end-of-line token.
    fn skip_line_comment(&mut self) {
        let rest = &self.bytes[self.pos..];
        self.pos = match memchr::memchr(b'\n', rest) {
            Some(i) if i > 0 && rest[i - 1] == b'\r' => self.pos + i - 1,
            Some(i) => self.pos + i,
            None => self.bytes.len(),
        };
    }

    fn skip_block_comment(&mut self) {
        let body_start = self.pos + 2;
        let body = &self.bytes[body_start..];
        let end = match memchr::memmem::find(body, b"*/") {
            Some(i) => body_start + i + 2,
            None => self.bytes.len(),
        };
        let comment = &self.bytes[body_start..end.min(self.bytes.len())];
        let newlines = memchr::memchr_iter(b'\n', comment).count() as u32;
        if newlines > 0 {
            if let Some(last) = memchr::memrchr(b'\n', comment) {
                self.line += newlines;
                self.line_start = body_start + last + 1;
            }
        }
        self.pos = end;
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the next token. Returns an `EndOfInput` token once the text is
    /// exhausted, and keeps returning it.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.token_start = self.pos;
        let line = self.line;
        let column = (self.token_start - self.line_start) as u32;

        let Some(b) = self.byte_at(0) else {
            return Token::end_of_input(line, column, self.pos as u32);
        };

        let (kind, text) = match b {
            b';' => {
                self.pos += 1;
                (TokenKind::SemicolonToken, ";".to_string())
            }
            b'\n' | b'\r' => {
                self.scan_line_breaks();
                (TokenKind::EndOfLine, "\n".to_string())
            }
            b'\'' | b'"' => (TokenKind::StringLiteral, self.scan_string(b)),
            b'0'..=b'9' => (TokenKind::NumericLiteral, self.scan_number()),
            b'.' if matches!(self.byte_at(1), Some(b'0'..=b'9')) => {
                (TokenKind::NumericLiteral, self.scan_number())
            }
            b'/' if self.slash_starts_regex() => {
                (TokenKind::RegularExpressionLiteral, self.scan_regex())
            }
            _ => match self.current_char() {
                Some(ch) if is_identifier_start(ch) => self.scan_identifier(),
                _ => self.scan_operator(),
            },
        };

        if kind != TokenKind::EndOfLine {
            self.last_significant = Some(kind);
        }
        let span = TextSpan::from_bounds(self.token_start as u32, self.pos as u32);
        Token::new(kind, text, line, column, span)
    }

    /// Consume a run of newlines, together with blank and comment-only lines
    /// between them.
    fn scan_line_breaks(&mut self) {
        loop {
            match (self.byte_at(0), self.byte_at(1)) {
                (Some(b'\n'), _) => self.pos += 1,
                (Some(b'\r'), Some(b'\n')) => self.pos += 2,
                _ => break,
            }
            self.new_line_at(self.pos);
            self.skip_trivia();
        }
    }

    /// Scan a quoted string. The stored value drops the delimiters, keeps
    /// escape sequences verbatim and backslash-escapes the other quote style.
    fn scan_string(&mut self, quote: u8) -> String {
        let other_quote = if quote == b'"' { '\'' } else { '"' };
        self.pos += 1;
        let mut value = String::new();
        while let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
            match ch {
                '\\' => {
                    value.push('\\');
                    if let Some(escaped) = self.current_char() {
                        self.pos += escaped.len_utf8();
                        value.push(escaped);
                        if escaped == '\n' {
                            self.new_line_at(self.pos);
                        }
                    }
                }
                c if c as u32 == quote as u32 => return value,
                c if c == other_quote => {
                    value.push('\\');
                    value.push(c);
                }
                '\n' => {
                    value.push('\n');
                    self.new_line_at(self.pos);
                }
                c => value.push(c),
            }
        }
        value
    }

    /// Scan a numeric literal. Letters, digits and dots are taken greedily;
    /// a sign is only part of the literal directly after a decimal exponent
    /// marker.
    fn scan_number(&mut self) -> String {
        let is_hex = self.byte_at(0) == Some(b'0') && matches!(self.byte_at(1), Some(b'x' | b'X'));
        while let Some(b) = self.byte_at(0) {
            if b.is_ascii_alphanumeric() || b == b'.' || b == b'_' {
                self.pos += 1;
            } else if (b == b'+' || b == b'-')
                && !is_hex
                && matches!(self.bytes.get(self.pos - 1), Some(b'e' | b'E'))
            {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.text[self.token_start..self.pos].to_string()
    }

    fn slash_starts_regex(&self) -> bool {
        match self.byte_at(1) {
            Some(b'/') | Some(b'*') => false,
            None => false,
            Some(_) => match self.slash_mode {
                SlashMode::AlwaysRegex => true,
                SlashMode::Contextual => !self.last_significant.is_some_and(TokenKind::ends_operand),
            },
        }
    }

    /// Scan `/body/flags`. A `/` inside a character class does not close the
    /// literal; a newline or the end of input does.
    fn scan_regex(&mut self) -> String {
        self.pos += 1;
        let mut in_class = false;
        while let Some(b) = self.byte_at(0) {
            match b {
                b'\n' | b'\r' => break,
                b'\\' => {
                    self.pos += 1;
                    if !matches!(self.byte_at(0), None | Some(b'\n') | Some(b'\r')) {
                        self.pos += 1;
                    }
                }
                b'[' => {
                    in_class = true;
                    self.pos += 1;
                }
                b']' => {
                    in_class = false;
                    self.pos += 1;
                }
                b'/' if !in_class => {
                    self.pos += 1;
                    while self.byte_at(0).is_some_and(|f| f.is_ascii_alphabetic()) {
                        self.pos += 1;
                    }
                    break;
                }
                _ => self.pos += 1,
            }
        }
        // An escape can leave `pos` inside a multi-byte character.
        while !self.text.is_char_boundary(self.pos) {
            self.pos += 1;
        }
        self.text[self.token_start..self.pos].to_string()
    }

    fn scan_identifier(&mut self) -> (TokenKind, String) {
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        let text = &self.text[self.token_start..self.pos];
        let kind = TokenKind::from_keyword(text).unwrap_or(TokenKind::Identifier);
        (kind, text.to_string())
    }

    /// Longest-match scan over the operator table, falling back to a
    /// single-character `Illegal` token.
    fn scan_operator(&mut self) -> (TokenKind, String) {
        let rest = &self.text[self.pos..];
        for &kind in OPERATOR_TABLE {
            let spelling = kind.text();
            if rest.starts_with(spelling) {
                self.pos += spelling.len();
                return (kind, spelling.to_string());
            }
        }
        let ch = self.current_char().unwrap_or('\u{FFFD}');
        self.pos += ch.len_utf8().max(1);
        (TokenKind::Illegal, ch.to_string())
    }
}

/// Check if a character can start an identifier.
fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphabetic() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_start(ch))
}

/// Check if a character can be part of an identifier.
fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphanumeric() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_continue(ch))
}
