//! jsany_parser: Recursive descent parser for the supported JavaScript subset.
//!
//! Consumes the scanner's token vector and builds an arena-allocated AST.
//! Parsing is fail-fast: the first grammar violation aborts with a
//! [`ParseError`](jsany_diagnostics::ParseError).

mod parser;
mod precedence;

pub use parser::{parse, Parser};
