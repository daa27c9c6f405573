//! B-tree core implementation.
//!
//! This module provides the main BTree struct with operations for:
//! - search / search_key: Point lookups
//! - insert: Top-down insertion that splits full nodes on the way down
//! - remove: Top-down deletion that tops up minimal nodes on the way down
//!
//! Both mutations are single-pass: a node is never descended into unless it
//! can absorb the change (a split for insert, a lost key for remove) without
//! pushing work back up to its parent.

use crate::error::{Result, TreeError};
use crate::node::Node;
use crate::order::{KeyOrder, KeyPrinter, NaturalOrder, PrintFn};
use crate::storage::NodeArena;
use crate::types::{NodeId, TreeConfig};
use crate::TreeStats;
use tracing::{debug, trace};

/// Position of a key inside the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Node holding the key
    pub node: NodeId,
    /// Index into that node's keys
    pub index: usize,
}

/// What a rebalancing step did to the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rebalance {
    /// The old root was emptied by a merge and the merged child replaced it
    RootChanged,
    /// Keys moved between the parent and its children
    Modified,
    /// The child already had enough keys
    Unchanged,
}

/// An in-memory B-tree over keys ordered by `C`.
///
/// `P` renders keys for [`BTree::print`]; trees built without a printer
/// print nothing.
///
/// The tree does no locking. Share it across threads through
/// [`SharedTree`](crate::SharedTree) or another external lock.
pub struct BTree<K, C = NaturalOrder, P = PrintFn<K>> {
    /// Owner of every node
    pub(super) nodes: NodeArena<K>,
    /// Root node; an empty leaf when the tree is empty
    pub(super) root: NodeId,
    pub(super) config: TreeConfig,
    pub(super) order: C,
    pub(super) printer: Option<P>,
    /// Number of keys stored
    pub(super) len: usize,
}

impl<K: Ord> BTree<K> {
    /// Create a tree ordered by `K`'s own `Ord`
    pub fn natural(min_degree: usize) -> Result<Self> {
        Self::new(min_degree, NaturalOrder)
    }
}

impl<K, C: KeyOrder<K>> BTree<K, C> {
    /// Create an empty tree with minimum degree `min_degree` and no printer.
    ///
    /// Fails with [`TreeError::InvalidDegree`] if `min_degree < 2`.
    pub fn new(min_degree: usize, order: C) -> Result<Self> {
        Self::with_config(TreeConfig::new(min_degree), order, None)
    }
}

impl<K, C: KeyOrder<K>, P: KeyPrinter<K>> BTree<K, C, P> {
    /// Create an empty tree whose [`print`](BTree::print) renders keys with `printer`
    pub fn with_printer(min_degree: usize, order: C, printer: P) -> Result<Self> {
        Self::with_config(TreeConfig::new(min_degree), order, Some(printer))
    }
}

impl<K, C: KeyOrder<K>, P> BTree<K, C, P> {
    /// Create an empty tree from a config
    pub fn with_config(config: TreeConfig, order: C, printer: Option<P>) -> Result<Self> {
        config.validate()?;

        let mut nodes = NodeArena::new();
        let root = nodes.allocate(Node::new_leaf());

        Ok(Self {
            nodes,
            root,
            config,
            order,
            printer,
            len: 0,
        })
    }

    /// Get the tree configuration
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Get the minimum degree
    pub fn min_degree(&self) -> usize {
        self.config.min_degree
    }

    /// Number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the root node ID
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by ID
    pub fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id)
    }

    /// Key stored at a location returned by [`search`](BTree::search)
    pub fn key_at(&self, location: Location) -> Option<&K> {
        self.nodes.get(location.node)?.key(location.index)
    }

    /// Number of levels; a lone root is height 1
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = &self.nodes[self.root];
        while !current.is_leaf() {
            current = &self.nodes[current.child(0)];
            height += 1;
        }
        height
    }

    /// Get statistics about the tree
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            len: self.len,
            height: self.height(),
            node_count: self.nodes.live_count(),
            min_degree: self.config.min_degree,
        }
    }

    /// Find the first key equivalent to `key` on the top-down path.
    ///
    /// When several equivalent keys are stored, the one nearest the root on
    /// the search path is reported.
    pub fn search(&self, key: &K) -> Option<Location> {
        let mut current = self.root;

        loop {
            let node = &self.nodes[current];
            let index = node.lower_bound(key, &self.order);

            if node.matches(index, key, &self.order) {
                return Some(Location {
                    node: current,
                    index,
                });
            }
            if node.is_leaf() {
                return None;
            }
            current = node.child(index);
        }
    }

    /// Return the stored key equivalent to `key`.
    ///
    /// Useful when the ordering looks at only part of `K`: the stored key
    /// carries whatever else the caller inserted with it.
    pub fn search_key(&self, key: &K) -> Result<&K> {
        self.search(key)
            .and_then(|location| self.key_at(location))
            .ok_or(TreeError::KeyNotFound)
    }

    /// Check if an equivalent key is stored
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Insert a key.
    ///
    /// Equivalent keys already present are kept; the new key is placed after
    /// them in leaf order.
    pub fn insert(&mut self, key: K) {
        let max_keys = self.config.max_keys();

        // The only way the tree grows taller.
        if self.nodes[self.root].len() == max_keys {
            let old_root = self.root;
            self.root = self.nodes.allocate(Node::new_root_above(old_root));
            self.split_child(self.root, 0);
            debug!(root = %self.root, height = self.height(), "root split");
        }

        let mut current = self.root;
        while !self.nodes[current].is_leaf() {
            let mut index = self.nodes[current].upper_bound(&key, &self.order);
            let child = self.nodes[current].child(index);

            if self.nodes[child].len() == max_keys {
                self.split_child(current, index);
                let promoted = &self.nodes[current].keys()[index];
                if self.order.less_than(promoted, &key) {
                    index += 1;
                }
            }
            current = self.nodes[current].child(index);
        }

        self.nodes[current].insert_key(key, &self.order);
        self.len += 1;
    }

    /// Remove the first key equivalent to `key` and return it.
    ///
    /// Fails with [`TreeError::KeyNotFound`] without touching the tree if no
    /// such key is stored.
    pub fn remove(&mut self, key: &K) -> Result<K> {
        if self.search(key).is_none() {
            return Err(TreeError::KeyNotFound);
        }

        let min_degree = self.config.min_degree;
        let mut current = self.root;

        loop {
            let node = &self.nodes[current];
            let index = node.lower_bound(key, &self.order);

            if node.matches(index, key, &self.order) {
                if node.is_leaf() {
                    let removed = self.nodes[current].delete_key(index);
                    self.len -= 1;
                    return Ok(removed);
                }

                let left = node.child(index);
                let right = node.child(index + 1);

                if self.nodes[left].len() >= min_degree {
                    let predecessor = self.take_predecessor(left);
                    let removed = self.nodes[current].replace_key(index, predecessor);
                    self.len -= 1;
                    return Ok(removed);
                }

                if self.nodes[right].len() >= min_degree {
                    let successor = self.take_successor(right);
                    let removed = self.nodes[current].replace_key(index, successor);
                    self.len -= 1;
                    return Ok(removed);
                }

                // Both neighbours are minimal: pull the key down into the
                // merged child and keep deleting from there.
                self.merge_children(current, index);
                current = left;
                continue;
            }

            if node.is_leaf() {
                return Err(TreeError::KeyNotFound);
            }

            current = match self.fix_child_size(current, index) {
                Rebalance::RootChanged => self.root,
                Rebalance::Modified | Rebalance::Unchanged => {
                    let node = &self.nodes[current];
                    node.child(node.lower_bound(key, &self.order))
                }
            };
        }
    }

    /// Remove and return the largest key under `subtree`.
    ///
    /// `subtree` must already hold at least `t` keys.
    fn take_predecessor(&mut self, subtree: NodeId) -> K {
        let mut current = subtree;
        while !self.nodes[current].is_leaf() {
            let last = self.nodes[current].len();
            self.fix_child_size(current, last);
            current = self.nodes[current].last_child();
        }
        self.nodes[current].pop_back().0
    }

    /// Remove and return the smallest key under `subtree`.
    ///
    /// `subtree` must already hold at least `t` keys.
    fn take_successor(&mut self, subtree: NodeId) -> K {
        let mut current = subtree;
        while !self.nodes[current].is_leaf() {
            self.fix_child_size(current, 0);
            current = self.nodes[current].child(0);
        }
        self.nodes[current].pop_front().0
    }

    /// Split the full child at `index` of `parent`.
    ///
    /// The child keeps its lower half, its median moves up into `parent` at
    /// `index`, and a new sibling holding the upper half becomes
    /// `children[index + 1]`. `parent` must not be full.
    fn split_child(&mut self, parent: NodeId, index: usize) {
        let full = self.nodes[parent].child(index);
        let (median, sibling) = self.nodes[full].split_upper(self.config.min_degree);
        let sibling = self.nodes.allocate(sibling);
        self.nodes[parent].adopt_split(index, median, sibling);
        trace!(node = %full, sibling = %sibling, parent = %parent, "split");
    }

    /// Merge `children[index + 1]` of `parent` into `children[index]`,
    /// pulling the separating key down between them.
    ///
    /// If that empties `parent` it must have been the root, and the merged
    /// child takes its place.
    fn merge_children(&mut self, parent: NodeId, index: usize) -> Rebalance {
        let left = self.nodes[parent].child(index);
        let (separator, right) = self.nodes[parent].detach_separator(index);
        let right_node = self.nodes.release(right);
        self.nodes[left].absorb(separator, right_node);
        trace!(node = %left, absorbed = %right, parent = %parent, "merge");

        if self.nodes[parent].is_empty() {
            debug_assert_eq!(parent, self.root, "non-root node emptied by merge");
            self.nodes.release(parent);
            self.root = left;
            debug!(root = %left, height = self.height(), "root collapsed");
            return Rebalance::RootChanged;
        }

        Rebalance::Modified
    }

    /// Make sure `children[index]` of `parent` holds at least `t` keys before
    /// a deletion descends into it.
    ///
    /// Borrows through the parent from a sibling with a key to spare (left
    /// first), otherwise merges with a sibling (left if there is one).
    fn fix_child_size(&mut self, parent: NodeId, index: usize) -> Rebalance {
        let min_degree = self.config.min_degree;
        let node = &self.nodes[parent];
        let child = node.child(index);

        if self.nodes[child].len() >= min_degree {
            return Rebalance::Unchanged;
        }

        if index > 0 && self.nodes[node.child(index - 1)].len() >= min_degree {
            self.borrow_from_left(parent, index);
            return Rebalance::Modified;
        }

        if index < node.len() && self.nodes[node.child(index + 1)].len() >= min_degree {
            self.borrow_from_right(parent, index);
            return Rebalance::Modified;
        }

        if index > 0 {
            self.merge_children(parent, index - 1)
        } else {
            self.merge_children(parent, index)
        }
    }

    /// Rotate the left sibling's last key up into `parent` and the old
    /// separator down to the front of `children[index]`
    fn borrow_from_left(&mut self, parent: NodeId, index: usize) {
        let child = self.nodes[parent].child(index);
        let sibling = self.nodes[parent].child(index - 1);

        let (key, grandchild) = self.nodes[sibling].pop_back();
        let separator = self.nodes[parent].replace_key(index - 1, key);
        self.nodes[child].push_front(separator, grandchild);
        trace!(node = %child, from = %sibling, "borrow left");
    }

    /// Rotate the right sibling's first key up into `parent` and the old
    /// separator down to the back of `children[index]`
    fn borrow_from_right(&mut self, parent: NodeId, index: usize) {
        let child = self.nodes[parent].child(index);
        let sibling = self.nodes[parent].child(index + 1);

        let (key, grandchild) = self.nodes[sibling].pop_front();
        let separator = self.nodes[parent].replace_key(index, key);
        self.nodes[child].push_back(separator, grandchild);
        trace!(node = %child, from = %sibling, "borrow right");
    }
}
