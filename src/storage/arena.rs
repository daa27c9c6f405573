//! Slot table owning every node of a tree.
//!
//! Parent/child links are [`NodeId`]s into this table. Each live node has
//! exactly one parent slot referring to it (or is the root), so releasing a
//! slot when a merge absorbs it is all the teardown a node ever needs.

use super::FreeList;
use crate::node::Node;
use crate::types::NodeId;
use std::ops::{Index, IndexMut};

/// Arena of tree nodes with slot reuse
#[derive(Debug)]
pub struct NodeArena<K> {
    slots: Vec<Option<Node<K>>>,
    free_list: FreeList,
}

impl<K> Default for NodeArena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> NodeArena<K> {
    /// Create an empty arena
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: FreeList::new(),
        }
    }

    /// Store a node, reusing a released slot if one is available
    pub fn allocate(&mut self, node: Node<K>) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            self.slots[id.slot()] = Some(node);
            return id;
        }

        let id = NodeId::new(self.slots.len() as u32);
        self.slots.push(Some(node));
        id
    }

    /// Remove a node from the arena, returning it and freeing its slot
    pub fn release(&mut self, id: NodeId) -> Node<K> {
        match self.slots.get_mut(id.slot()).and_then(Option::take) {
            Some(node) => {
                self.free_list.push(id);
                node
            }
            None => panic!("release of dangling node {}", id),
        }
    }

    /// Get a node if the slot is live
    pub fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.slots.get(id.slot()).and_then(Option::as_ref)
    }

    /// Number of live nodes
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Total number of slots, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of released slots waiting for reuse
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }
}

impl<K> Index<NodeId> for NodeArena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Node<K> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("dangling node {}", id),
        }
    }
}

impl<K> IndexMut<NodeId> for NodeArena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        match self.slots.get_mut(id.slot()).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("dangling node {}", id),
        }
    }
}
