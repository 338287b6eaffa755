//! Byte spans into source text.
//!
//! Tokens and parse errors carry a [`TextSpan`] so diagnostics can point at
//! the exact bytes of the offending token.

use std::fmt;

/// `length` bytes of source starting at byte offset `start`.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextSpan {
    pub start: u32,
    pub length: u32,
}

impl TextSpan {
    #[inline]
    pub fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// The span between a token's first byte and the scanner cursor.
    #[inline]
    pub fn from_bounds(start: u32, end: u32) -> Self {
        debug_assert!(end >= start);
        Self::new(start, end - start)
    }

    /// A zero-length span, used for the end-of-input token.
    #[inline]
    pub fn empty(pos: u32) -> Self {
        Self::new(pos, 0)
    }

    /// One past the last byte.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.length
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds() {
        let span = TextSpan::from_bounds(5, 15);
        assert_eq!(span, TextSpan::new(5, 10));
        assert_eq!(span.end(), 15);
    }

    #[test]
    fn test_empty_span_at_end_of_input() {
        let span = TextSpan::empty(7);
        assert_eq!(span.length, 0);
        assert_eq!(span.end(), 7);
        assert_eq!(format!("{:?}", span), "7..7");
    }
}
