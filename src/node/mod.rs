//! Node record and in-node primitives.
//!
//! A node holds an ordered run of keys and, when internal, one more child id
//! than it has keys. All keys under `children[i]` sort no later than
//! `keys[i]`, which sorts no later than everything under `children[i + 1]`.
//!
//! Nothing here knows about the minimum degree except [`Node::split_upper`];
//! occupancy bounds are the tree's job.

use crate::order::KeyOrder;
use crate::types::NodeId;

/// A B-tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K> {
    keys: Vec<K>,
    children: Vec<NodeId>,
    leaf: bool,
}

impl<K> Node<K> {
    /// Create an empty leaf
    pub fn new_leaf() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
            leaf: true,
        }
    }

    /// Create an internal node with no keys and a single child.
    ///
    /// Only used while growing the root, immediately before that child is split.
    pub fn new_root_above(child: NodeId) -> Self {
        Self {
            keys: Vec::new(),
            children: vec![child],
            leaf: false,
        }
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the node holds no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn key(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    /// Child at `index`. Panics if out of range.
    pub fn child(&self, index: usize) -> NodeId {
        self.children[index]
    }

    /// Rightmost child (the subtree holding the node's largest keys)
    pub fn last_child(&self) -> NodeId {
        self.children[self.keys.len()]
    }

    /// Index of the first key not less than `key`.
    ///
    /// This is both where an equivalent key would sit and which child a lookup
    /// descends into when the key is not in this node.
    pub fn lower_bound<C: KeyOrder<K>>(&self, key: &K, order: &C) -> usize {
        self.keys.partition_point(|probe| order.less_than(probe, key))
    }

    /// Index of the first key greater than `key`.
    ///
    /// Insertion places new keys here, after any equivalent keys already present.
    pub fn upper_bound<C: KeyOrder<K>>(&self, key: &K, order: &C) -> usize {
        self.keys.partition_point(|probe| !order.less_than(key, probe))
    }

    /// Returns true if `keys[index]` exists and is equivalent to `key`
    pub fn matches<C: KeyOrder<K>>(&self, index: usize, key: &K, order: &C) -> bool {
        self.keys
            .get(index)
            .is_some_and(|stored| order.equivalent(stored, key))
    }

    /// Insert a key into a leaf in order
    pub fn insert_key<C: KeyOrder<K>>(&mut self, key: K, order: &C) -> usize {
        let index = self.upper_bound(&key, order);
        self.keys.insert(index, key);
        index
    }

    /// Delete the key at `index` from a leaf, shifting later keys left
    pub fn delete_key(&mut self, index: usize) -> K {
        self.keys.remove(index)
    }

    /// Replace the key at `index`, returning the old one
    pub fn replace_key(&mut self, index: usize, key: K) -> K {
        std::mem::replace(&mut self.keys[index], key)
    }

    /// Split a full node (`2t - 1` keys) in place.
    ///
    /// This node keeps its lower `t - 1` keys (and lower `t` children). Returns
    /// the median key and a new sibling holding the upper `t - 1` keys (and
    /// upper `t` children).
    pub fn split_upper(&mut self, min_degree: usize) -> (K, Node<K>) {
        let mut upper = self.keys.split_off(min_degree - 1);
        let median = upper.remove(0);
        let children = if self.leaf {
            Vec::new()
        } else {
            self.children.split_off(min_degree)
        };

        let sibling = Node {
            keys: upper,
            children,
            leaf: self.leaf,
        };
        (median, sibling)
    }

    /// Link a freshly split sibling into this node at `index`.
    ///
    /// `median` becomes `keys[index]` and `sibling` becomes `children[index + 1]`.
    pub fn adopt_split(&mut self, index: usize, median: K, sibling: NodeId) {
        self.keys.insert(index, median);
        self.children.insert(index + 1, sibling);
    }

    /// Remove `keys[index]` and `children[index + 1]`, the separator and right
    /// half of a pair about to be merged
    pub fn detach_separator(&mut self, index: usize) -> (K, NodeId) {
        let separator = self.keys.remove(index);
        let right = self.children.remove(index + 1);
        (separator, right)
    }

    /// Append `separator` and then everything in `right`
    pub fn absorb(&mut self, separator: K, right: Node<K>) {
        self.keys.push(separator);
        self.keys.extend(right.keys);
        self.children.extend(right.children);
    }

    /// Remove the last key and, if internal, the last child
    pub fn pop_back(&mut self) -> (K, Option<NodeId>) {
        let key = self.keys.remove(self.keys.len() - 1);
        (key, self.children.pop())
    }

    /// Remove the first key and, if internal, the first child
    pub fn pop_front(&mut self) -> (K, Option<NodeId>) {
        let key = self.keys.remove(0);
        let child = if self.leaf {
            None
        } else {
            Some(self.children.remove(0))
        };
        (key, child)
    }

    /// Prepend a key and, if internal, a child
    pub fn push_front(&mut self, key: K, child: Option<NodeId>) {
        self.keys.insert(0, key);
        if let Some(child) = child {
            self.children.insert(0, child);
        }
    }

    /// Append a key and, if internal, a child
    pub fn push_back(&mut self, key: K, child: Option<NodeId>) {
        self.keys.push(key);
        if let Some(child) = child {
            self.children.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::NaturalOrder;

    fn leaf_with(keys: &[i32]) -> Node<i32> {
        let mut node = Node::new_leaf();
        for &k in keys {
            node.insert_key(k, &NaturalOrder);
        }
        node
    }

    fn interior_with(keys: &[i32]) -> Node<i32> {
        Node {
            keys: keys.to_vec(),
            children: (0..=keys.len() as u32).map(NodeId::new).collect(),
            leaf: false,
        }
    }

    #[test]
    fn test_insert_keeps_order() {
        let node = leaf_with(&[30, 10, 20]);
        assert_eq!(node.keys(), &[10, 20, 30]);
        assert!(node.is_leaf());
        assert_eq!(node.len(), 3);
    }

    #[test]
    fn test_bounds() {
        let node = leaf_with(&[10, 20, 20, 30]);
        assert_eq!(node.lower_bound(&20, &NaturalOrder), 1);
        assert_eq!(node.upper_bound(&20, &NaturalOrder), 3);
        assert_eq!(node.lower_bound(&5, &NaturalOrder), 0);
        assert_eq!(node.lower_bound(&99, &NaturalOrder), 4);
        assert!(node.matches(1, &20, &NaturalOrder));
        assert!(!node.matches(0, &20, &NaturalOrder));
        assert!(!node.matches(4, &20, &NaturalOrder));
    }

    #[test]
    fn test_delete_key() {
        let mut node = leaf_with(&[1, 2, 3]);
        assert_eq!(node.delete_key(1), 2);
        assert_eq!(node.keys(), &[1, 3]);
    }

    #[test]
    fn test_split_leaf() {
        let mut node = leaf_with(&[1, 2, 3, 4, 5]);
        let (median, sibling) = node.split_upper(3);
        assert_eq!(median, 3);
        assert_eq!(node.keys(), &[1, 2]);
        assert_eq!(sibling.keys(), &[4, 5]);
        assert!(sibling.is_leaf());
        assert!(sibling.children().is_empty());
    }

    #[test]
    fn test_split_interior() {
        let mut node = interior_with(&[10, 20, 30]);
        let (median, sibling) = node.split_upper(2);
        assert_eq!(median, 20);
        assert_eq!(node.keys(), &[10]);
        assert_eq!(node.children(), &[NodeId::new(0), NodeId::new(1)]);
        assert_eq!(sibling.keys(), &[30]);
        assert_eq!(sibling.children(), &[NodeId::new(2), NodeId::new(3)]);
        assert!(!sibling.is_leaf());
    }

    #[test]
    fn test_detach_and_absorb() {
        let mut parent = interior_with(&[10, 20]);
        let (separator, right) = parent.detach_separator(0);
        assert_eq!((separator, right), (10, NodeId::new(1)));
        assert_eq!(parent.children(), &[NodeId::new(0), NodeId::new(2)]);

        let mut left = leaf_with(&[1, 2]);
        left.absorb(separator, leaf_with(&[11, 12]));
        assert_eq!(left.keys(), &[1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_borrow_at_both_ends() {
        let mut node = interior_with(&[10, 20, 30]);
        assert_eq!(node.pop_back(), (30, Some(NodeId::new(3))));
        assert_eq!(node.pop_front(), (10, Some(NodeId::new(0))));
        assert_eq!(node.keys(), &[20]);
        assert_eq!(node.children(), &[NodeId::new(1), NodeId::new(2)]);

        node.push_front(5, Some(NodeId::new(9)));
        node.push_back(25, Some(NodeId::new(8)));
        assert_eq!(node.keys(), &[5, 20, 25]);
        assert_eq!(node.last_child(), NodeId::new(8));
        assert_eq!(node.child(0), NodeId::new(9));

        let mut leaf = leaf_with(&[1, 2]);
        assert_eq!(leaf.pop_front(), (1, None));
        assert_eq!(leaf.pop_back(), (2, None));
        assert!(leaf.is_empty());
    }
}
