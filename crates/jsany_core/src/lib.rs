//! jsany_core: Core utilities for the jsany transpiler.
//!
//! Provides the arena that backs every AST and the text span type used
//! for token and diagnostic locations.

pub mod arena;
pub mod text;

// Re-export commonly used types
pub use arena::{ArenaVec, CompilerArena};
pub use text::TextSpan;
