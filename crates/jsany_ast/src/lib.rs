//! jsany_ast: Token kinds and AST definitions for the jsany transpiler.
//!
//! Defines the closed `TokenKind` enumeration shared by the scanner and the
//! parser, and the arena-allocated expression and statement nodes.

pub mod node;
pub mod token_kind;

// Re-export key types
pub use node::*;
pub use token_kind::{TokenKind, OPERATOR_TABLE};
