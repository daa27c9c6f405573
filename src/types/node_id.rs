//! Node identifier type.

use std::fmt;

/// Identifier of a node slot in the tree's arena.
///
/// Ids are 0-indexed slot numbers. A slot freed by a merge may be handed out
/// again for a later split, so an id is only meaningful until the next mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw node ID value
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Position of this node in the arena's slot table
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_basics() {
        let id = NodeId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.slot(), 42);
        assert_eq!(u32::from(id), 42);
        assert_eq!(NodeId::from(42), id);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(format!("{}", NodeId::new(7)), "#7");
    }
}
