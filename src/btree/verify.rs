//! Structural invariant checks.
//!
//! [`BTree::verify`] walks the whole tree and reports the first violated
//! invariant as [`TreeError::Corruption`]. It is linear in the size of the
//! tree and meant for tests and the CLI's `verify` command.

use super::BTree;
use crate::error::{Result, TreeError};
use crate::order::KeyOrder;
use crate::types::NodeId;

impl<K, C: KeyOrder<K>, P> BTree<K, C, P> {
    /// Check every structural invariant of the tree
    pub fn verify(&self) -> Result<()> {
        let mut leaf_depth = None;
        let mut visited = 0;
        let key_count = self.verify_node(self.root, 0, None, None, &mut leaf_depth, &mut visited)?;

        if key_count != self.len {
            return Err(TreeError::corruption(format!(
                "tree records {} keys but holds {}",
                self.len, key_count
            )));
        }
        if visited != self.nodes.live_count() {
            return Err(TreeError::corruption(format!(
                "{} nodes reachable from root but {} allocated",
                visited,
                self.nodes.live_count()
            )));
        }
        Ok(())
    }

    /// Returns the number of keys in the subtree rooted at `id`
    fn verify_node(
        &self,
        id: NodeId,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        leaf_depth: &mut Option<usize>,
        visited: &mut usize,
    ) -> Result<usize> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| TreeError::corruption(format!("node {} is not allocated", id)))?;
        *visited += 1;

        let is_root = id == self.root;
        let len = node.len();
        if len > self.config.max_keys() {
            return Err(TreeError::corruption(format!(
                "node {} holds {} keys (max {})",
                id,
                len,
                self.config.max_keys()
            )));
        }
        if !is_root && len < self.config.min_keys() {
            return Err(TreeError::corruption(format!(
                "node {} holds {} keys (min {})",
                id,
                len,
                self.config.min_keys()
            )));
        }
        if is_root && !node.is_leaf() && len == 0 {
            return Err(TreeError::corruption(format!(
                "internal root {} holds no keys",
                id
            )));
        }

        let keys = node.keys();
        if keys.windows(2).any(|pair| self.order.less_than(&pair[1], &pair[0])) {
            return Err(TreeError::corruption(format!("node {} keys out of order", id)));
        }
        let below_lower = lower.is_some_and(|bound| keys.iter().any(|k| self.order.less_than(k, bound)));
        let above_upper = upper.is_some_and(|bound| keys.iter().any(|k| self.order.less_than(bound, k)));
        if below_lower || above_upper {
            return Err(TreeError::corruption(format!(
                "node {} has keys outside its parent's separators",
                id
            )));
        }

        if node.is_leaf() {
            if !node.children().is_empty() {
                return Err(TreeError::corruption(format!("leaf {} has children", id)));
            }
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(TreeError::corruption(format!(
                        "leaf {} at depth {} but other leaves at depth {}",
                        id, depth, expected
                    )));
                }
                Some(_) => {}
            }
            return Ok(len);
        }

        if node.children().len() != len + 1 {
            return Err(TreeError::corruption(format!(
                "node {} has {} keys but {} children",
                id,
                len,
                node.children().len()
            )));
        }

        let mut total = len;
        for (i, &child) in node.children().iter().enumerate() {
            let child_lower = if i == 0 { lower } else { keys.get(i - 1) };
            let child_upper = if i == len { upper } else { keys.get(i) };
            total += self.verify_node(child, depth + 1, child_lower, child_upper, leaf_depth, visited)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use crate::btree::BTree;
    use crate::error::{Result, TreeError};

    fn corruption_of(result: Result<()>) -> String {
        match result {
            Err(TreeError::Corruption(msg)) => msg,
            other => panic!("expected corruption, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_accepts_valid_trees() -> Result<()> {
        let mut tree = BTree::natural(2)?;
        tree.verify()?;
        for key in 0..50 {
            tree.insert(key);
        }
        tree.verify()
    }

    #[test]
    fn test_verify_detects_len_mismatch() -> Result<()> {
        let mut tree = BTree::natural(2)?;
        tree.insert(1);
        tree.len = 2;
        assert!(corruption_of(tree.verify()).contains("records 2 keys"));
        Ok(())
    }

    #[test]
    fn test_verify_detects_underfull_node() -> Result<()> {
        let mut tree = BTree::natural(3)?;
        for key in 0..6 {
            tree.insert(key);
        }
        // Root [2] over [0, 1] and [3, 4, 5]; empty the left leaf.
        let left = tree.nodes[tree.root].child(0);
        tree.nodes[left].delete_key(0);
        tree.nodes[left].delete_key(0);
        tree.len -= 2;
        assert!(corruption_of(tree.verify()).contains("min 2"));
        Ok(())
    }

    #[test]
    fn test_verify_detects_misplaced_key() -> Result<()> {
        let mut tree = BTree::natural(2)?;
        for key in 1..=4 {
            tree.insert(key);
        }
        let right = tree.nodes[tree.root].child(1);
        tree.nodes[right].replace_key(0, 0);
        // [0, 4] is sorted but 0 sits left of the separator 2.
        assert!(corruption_of(tree.verify()).contains("outside its parent's separators"));
        Ok(())
    }
}
