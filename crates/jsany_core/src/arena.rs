//! Arena allocation for the transpiler.
//!
//! Every AST node, node list and identifier string is allocated from a bump
//! arena. Nodes hold only references into the arena, so nothing in it needs
//! to be dropped individually.

use bumpalo::Bump;

/// A growable vector whose storage lives in a [`CompilerArena`].
pub type ArenaVec<'a, T> = bumpalo::collections::Vec<'a, T>;

/// Owns the storage of one parsed translation unit. The tree borrows from
/// it and is freed all at once when the arena drops.
#[derive(Default)]
pub struct CompilerArena {
    bump: Bump,
}

impl CompilerArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Copy token text into the arena so the tree outlives the token vector.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Start an empty arena-backed vector. Finish it with
    /// `into_bump_slice()` to get a `&[T]` tied to the arena.
    #[inline]
    pub fn vec<T>(&self) -> ArenaVec<'_, T> {
        ArenaVec::new_in(&self.bump)
    }
}
