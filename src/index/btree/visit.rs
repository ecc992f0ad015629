//! Structured traversal of a tree.
//!
//! [`BPlusTree::walk`] drives a [`Visitor`] over every node in pre-order,
//! children left to right. The textual dump ([`TreePrinter`]) and the shape
//! summary ([`TreeStats`]) are both visitors.

use std::fmt::{self, Write};

use crate::common::NodeId;
use crate::index::btree::node::{InternalNode, LeafNode, Node};
use crate::index::btree::BPlusTree;

/// Callbacks for a pre-order walk. `depth` is 0 at the root.
pub trait Visitor {
    fn visit_leaf(&mut self, depth: usize, id: NodeId, leaf: &LeafNode);

    fn visit_internal(&mut self, depth: usize, id: NodeId, node: &InternalNode);
}

impl BPlusTree {
    /// Walk every node reachable from the root.
    pub fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        let mut stack = vec![(self.root(), 0)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            match node {
                Node::Leaf(leaf) => visitor.visit_leaf(depth, id, leaf),
                Node::Internal(internal) => {
                    visitor.visit_internal(depth, id, internal);
                    // Reversed so the leftmost child is popped first.
                    stack.extend(internal.children().iter().rev().map(|&c| (c, depth + 1)));
                }
            }
        }
    }

    /// Summarize the tree's shape.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.walk(&mut stats);
        stats
    }
}

/// Renders one line per node, indented two spaces per level.
///
/// ```text
/// Internal: Keys=[15]
///   Leaf: Keys=[5, 10], Values=[50, 100]
///   Leaf: Keys=[15, 20, 25], Values=[150, 200, 250]
/// ```
#[derive(Debug, Default)]
pub struct TreePrinter {
    out: String,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the printer and return the rendered dump.
    pub fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
    }
}

impl Visitor for TreePrinter {
    fn visit_leaf(&mut self, depth: usize, _id: NodeId, leaf: &LeafNode) {
        self.indent(depth);
        // Writing into a String cannot fail.
        let _ = writeln!(
            self.out,
            "Leaf: Keys={:?}, Values={:?}",
            leaf.keys(),
            leaf.locators()
        );
    }

    fn visit_internal(&mut self, depth: usize, _id: NodeId, node: &InternalNode) {
        self.indent(depth);
        let _ = writeln!(self.out, "Internal: Keys={:?}", node.keys());
    }
}

/// Shape summary of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Levels from root to the deepest leaf.
    pub height: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub internal_count: usize,
    /// Entries stored in leaves.
    pub key_count: usize,
}

impl Visitor for TreeStats {
    fn visit_leaf(&mut self, depth: usize, _id: NodeId, leaf: &LeafNode) {
        self.node_count += 1;
        self.leaf_count += 1;
        self.key_count += leaf.len();
        self.height = self.height.max(depth + 1);
    }

    fn visit_internal(&mut self, _depth: usize, _id: NodeId, _node: &InternalNode) {
        self.node_count += 1;
        self.internal_count += 1;
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TreeStats {{ height: {}, nodes: {}, leaves: {}, keys: {} }}",
            self.height, self.node_count, self.leaf_count, self.key_count
        )
    }
}
