//! # In-memory B-tree
//!
//! An ordered container of keys under a caller-supplied strict weak order,
//! kept height-balanced by top-down node splitting on insert and top-down
//! borrowing/merging on remove.
//!
//! ## Architecture
//!
//! - **Types** (`types`): minimum-degree config and node identifiers
//! - **Ordering** (`order`): comparator and key-printer capabilities
//! - **Node Layer** (`node`): key/child record with in-node primitives
//! - **Storage** (`storage`): slot arena owning every node, with slot reuse
//! - **B-Tree Layer** (`btree`): search, insert, remove, printing and verification
//!
//! ## Usage
//!
//! ```rust
//! use btree_memory::{BTree, TreeError};
//!
//! let mut tree = BTree::natural(2)?;
//!
//! for key in [30, 10, 20] {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.search(&20).is_some());
//! assert_eq!(tree.search_key(&10)?, &10);
//!
//! assert_eq!(tree.remove(&20)?, 20);
//! assert_eq!(tree.remove(&20), Err(TreeError::KeyNotFound));
//! # Ok::<(), TreeError>(())
//! ```

pub mod btree;
pub mod error;
pub mod node;
pub mod order;
pub mod storage;
pub mod types;

pub use error::{Result, TreeError};
pub use types::{NodeId, TreeConfig, MIN_DEGREE};

// Re-export main public API
pub use btree::{BTree, Location, TreeSnapshot};
pub use order::{DisplayKeys, KeyOrder, KeyPrinter, NaturalOrder, PrintFn};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;

/// Tree statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    /// Number of keys stored
    pub len: usize,
    /// Number of levels (a lone root is 1)
    pub height: usize,
    /// Number of live nodes
    pub node_count: usize,
    /// Minimum degree of the tree
    pub min_degree: usize,
}

/// Thread-safe handle to a [`BTree`]
///
/// The tree itself assumes exclusive access for the duration of each call.
/// This handle provides that by taking a read lock for lookups and a write
/// lock for mutations. Clones share the same tree.
pub struct SharedTree<K, C = NaturalOrder, P = PrintFn<K>> {
    tree: Arc<RwLock<BTree<K, C, P>>>,
}

impl<K, C, P> Clone for SharedTree<K, C, P> {
    fn clone(&self) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
        }
    }
}

impl<K, C: KeyOrder<K>, P> SharedTree<K, C, P> {
    /// Wrap a tree for shared use
    pub fn new(tree: BTree<K, C, P>) -> Self {
        Self {
            tree: Arc::new(RwLock::new(tree)),
        }
    }

    /// Insert a key
    pub fn insert(&self, key: K) {
        self.tree.write().insert(key);
    }

    /// Remove the first key equivalent to `key`
    pub fn remove(&self, key: &K) -> Result<K> {
        self.tree.write().remove(key)
    }

    /// Check if an equivalent key exists
    pub fn contains(&self, key: &K) -> bool {
        self.tree.read().contains(key)
    }

    /// Return a copy of the stored key equivalent to `key`
    pub fn get(&self, key: &K) -> Result<K>
    where
        K: Clone,
    {
        self.tree.read().search_key(key).cloned()
    }

    /// Number of keys in the tree
    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    /// Check if the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }

    /// Get statistics about the tree
    pub fn stats(&self) -> TreeStats {
        self.tree.read().stats()
    }

    /// Export the tree structure for visualization
    pub fn snapshot(&self) -> TreeSnapshot<K>
    where
        K: Clone,
    {
        self.tree.read().snapshot()
    }

    /// Check every structural invariant
    pub fn verify(&self) -> Result<()> {
        self.tree.read().verify()
    }

    /// Print the tree to stdout
    pub fn print(&self) -> io::Result<()>
    where
        P: KeyPrinter<K>,
    {
        self.tree.read().print()
    }

    /// Run `f` with shared access to the tree
    pub fn with_read<R>(&self, f: impl FnOnce(&BTree<K, C, P>) -> R) -> R {
        f(&self.tree.read())
    }

    /// Run `f` with exclusive access to the tree
    pub fn with_write<R>(&self, f: impl FnOnce(&mut BTree<K, C, P>) -> R) -> R {
        f(&mut self.tree.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_basic_operations() -> Result<()> {
        let tree = SharedTree::new(BTree::natural(2)?);

        tree.insert(1);
        tree.insert(2);
        assert!(tree.contains(&1));
        assert_eq!(tree.get(&2)?, 2);
        assert_eq!(tree.len(), 2);

        assert_eq!(tree.remove(&1)?, 1);
        assert!(!tree.contains(&1));
        assert_eq!(tree.remove(&1), Err(TreeError::KeyNotFound));
        assert_eq!(tree.get(&1), Err(TreeError::KeyNotFound));

        Ok(())
    }

    #[test]
    fn test_stats() -> Result<()> {
        let tree = SharedTree::new(BTree::natural(2)?);
        for key in 1..=7 {
            tree.insert(key);
        }

        let stats = tree.stats();
        assert_eq!(stats.len, 7);
        assert_eq!(stats.height, 2);
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.min_degree, 2);

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains(r#""nodeCount":4"#));
        Ok(())
    }

    #[test]
    fn test_concurrent_writers() -> Result<()> {
        let tree = SharedTree::new(BTree::natural(3)?);

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let tree = tree.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        tree.insert(worker * 1000 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tree.len(), 1000);
        tree.verify()?;
        tree.with_read(|inner| {
            let keys: Vec<i32> = inner.keys().into_iter().copied().collect();
            assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        });
        Ok(())
    }

    #[test]
    fn test_with_write() -> Result<()> {
        let tree = SharedTree::new(BTree::natural(2)?);
        let removed = tree.with_write(|inner| {
            inner.insert(5);
            inner.insert(6);
            inner.remove(&5)
        })?;
        assert_eq!(removed, 5);
        assert_eq!(tree.snapshot().keys, vec![6]);
        Ok(())
    }
}
