//! B-tree implementation.
//!
//! This module provides an in-memory B-tree that supports:
//! - Point lookups (search, search_key)
//! - Insertions (insert)
//! - Deletions (remove)
//! - Debug printing, snapshot export and invariant verification

mod traverse;
mod tree;
mod verify;

pub use traverse::TreeSnapshot;
pub use tree::{BTree, Location};
