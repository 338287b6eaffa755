//! jsany_scanner: Tokenizer for the supported JavaScript subset.
//!
//! Turns source text into a fully materialized token vector with line and
//! column provenance. Handles:
//! - comment and whitespace elision
//! - newline runs as significant end-of-line tokens
//! - string, number, identifier and keyword scanning
//! - regular expression literals vs. division
//! - longest-match operator scanning

mod scanner;
mod token;

pub use scanner::{tokenize, Scanner, SlashMode};
pub use token::Token;
