//! Node storage.
//!
//! Nodes live in an index-addressed arena; slots freed by merges go onto a
//! free list and are handed back out by later splits.

mod arena;
mod freelist;

pub use arena::NodeArena;
pub use freelist::FreeList;
