//! Whole-tree traversals: in-order keys, debug printing, snapshot export
//! and lookup tracing.

use super::BTree;
use crate::order::{KeyOrder, KeyPrinter};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::io::{self, Write};

/// Nested copy of a tree's shape for export and visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSnapshot<K> {
    /// Arena slot of the node
    pub node_id: u32,
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Keys in this node
    pub keys: Vec<K>,
    /// Child nodes (only for interior nodes)
    pub children: Vec<TreeSnapshot<K>>,
}

impl<K, C: KeyOrder<K>, P> BTree<K, C, P> {
    /// All keys in order
    pub fn keys(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.len);
        self.collect_in_order(self.root, &mut out);
        out
    }

    fn collect_in_order<'a>(&'a self, id: NodeId, out: &mut Vec<&'a K>) {
        let node = &self.nodes[id];
        if node.is_leaf() {
            out.extend(node.keys());
            return;
        }

        for (i, key) in node.keys().iter().enumerate() {
            self.collect_in_order(node.child(i), out);
            out.push(key);
        }
        self.collect_in_order(node.last_child(), out);
    }

    /// Export the tree structure
    pub fn snapshot(&self) -> TreeSnapshot<K>
    where
        K: Clone,
    {
        self.snapshot_node(self.root)
    }

    fn snapshot_node(&self, id: NodeId) -> TreeSnapshot<K>
    where
        K: Clone,
    {
        let node = &self.nodes[id];
        TreeSnapshot {
            node_id: id.value(),
            is_leaf: node.is_leaf(),
            keys: node.keys().to_vec(),
            children: node
                .children()
                .iter()
                .map(|&child| self.snapshot_node(child))
                .collect(),
        }
    }

    /// Debug search - traces the path through the tree
    pub fn trace_search(&self, key: &K) -> Vec<String>
    where
        K: Debug,
    {
        let mut trace = vec![
            format!("Searching for key: {:?}", key),
            format!("Root node: {}, Height: {}", self.root, self.height()),
        ];

        let mut current = self.root;
        loop {
            let node = &self.nodes[current];
            trace.push(format!(
                "  Node {}: is_leaf={}, keys={:?}",
                current,
                node.is_leaf(),
                node.keys()
            ));

            let index = node.lower_bound(key, &self.order);
            if node.matches(index, key, &self.order) {
                trace.push(format!("  FOUND at index {}", index));
                return trace;
            }
            if node.is_leaf() {
                trace.push("  NOT FOUND in leaf".to_string());
                return trace;
            }

            current = node.child(index);
            trace.push(format!("  -> Descending to child {} (node {})", index, current));
        }
    }
}

impl<K, C, P: KeyPrinter<K>> BTree<K, C, P> {
    /// Print the tree to stdout. Does nothing if the tree has no printer.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.print_to(&mut out)?;
        out.flush()
    }

    /// Print the tree to `out`, one node per line in pre-order, indented by depth
    pub fn print_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(printer) = &self.printer else {
            return Ok(());
        };

        writeln!(out)?;
        self.print_node(printer, self.root, 0, out)?;
        writeln!(out)
    }

    fn print_node<W: Write>(
        &self,
        printer: &P,
        id: NodeId,
        depth: usize,
        out: &mut W,
    ) -> io::Result<()> {
        let node = &self.nodes[id];

        for _ in 0..depth {
            out.write_all(b"\t")?;
        }
        for key in node.keys() {
            printer.print_key(key, &mut *out)?;
            out.write_all(b" ")?;
        }
        writeln!(out)?;

        for &child in node.children() {
            self.print_node(printer, child, depth + 1, out)?;
        }
        Ok(())
    }
}
