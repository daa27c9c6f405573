//! Free list management.
//!
//! Tracks arena slots released by merges so later splits can reuse them
//! instead of growing the slot table.

use crate::types::NodeId;

/// Released node slots awaiting reuse
#[derive(Debug, Default)]
pub struct FreeList {
    /// Stack of free node IDs; the most recently freed slot is reused first
    slots: Vec<NodeId>,
}

impl FreeList {
    /// Create a new empty free list
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add a slot to the free list
    pub fn push(&mut self, id: NodeId) {
        self.slots.push(id);
    }

    /// Get a free slot, if available
    pub fn pop(&mut self) -> Option<NodeId> {
        self.slots.pop()
    }

    /// Get the number of free slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the free list is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check whether a slot is currently free
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freelist_operations() {
        let mut fl = FreeList::new();
        assert!(fl.is_empty());
        assert_eq!(fl.pop(), None);

        fl.push(NodeId::new(5));
        fl.push(NodeId::new(10));
        assert_eq!(fl.len(), 2);
        assert!(fl.contains(NodeId::new(5)));

        assert_eq!(fl.pop(), Some(NodeId::new(10)));
        assert_eq!(fl.pop(), Some(NodeId::new(5)));
        assert_eq!(fl.pop(), None);
    }
}
