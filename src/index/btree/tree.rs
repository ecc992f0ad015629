//! The B+Tree index.
//!
//! [`BPlusTree`] maps integer keys to record locators. Inserts split full
//! nodes on the way down (single descent, no backtracking), so a node never
//! exceeds `order` keys between operations.

use std::fmt;

use log::{debug, trace};

use crate::common::{IndexConfig, IndexName, Key, Locator, NodeId, Result};
use crate::index::btree::node::{InternalNode, LeafNode, Node};
use crate::index::btree::visit::TreePrinter;

/// An in-memory B+Tree over `(Key, Locator)` pairs.
///
/// # Architecture
/// ```text
///                 ┌──────────────┐
///                 │ Internal [15]│   root (replaced on root split)
///                 └──────┬───────┘
///            ┌───────────┴───────────┐
///     ┌──────▼──────┐         ┌──────▼───────┐
///     │ Leaf [5,10] │ ──next─▶│Leaf [15,20,25]│ ──next─▶ None
///     └─────────────┘         └──────────────┘
/// ```
///
/// All nodes live in one arena (`Vec<Node>`) and refer to each other by
/// [`NodeId`]. Nodes are only ever appended, so ids never dangle.
///
/// # Example
/// ```
/// use keyindex::BPlusTree;
///
/// let mut tree = BPlusTree::new("users", "id");
/// tree.insert(10, 100);
/// tree.insert(20, 200);
///
/// assert_eq!(tree.search(10), Some(100));
/// assert_eq!(tree.search(99), None);
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree {
    /// Table/column this index covers (diagnostics only).
    name: IndexName,

    /// Fanout and split point.
    config: IndexConfig,

    /// Node arena. `nodes[id.0]` is the node with that id.
    nodes: Vec<Node>,

    /// Current root.
    root: NodeId,

    /// Number of distinct keys.
    len: usize,

    /// Number of levels; 1 while the root is a leaf.
    height: usize,
}

impl BPlusTree {
    /// Create an empty index with the default order.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::build(IndexName::new(table, column), IndexConfig::default())
    }

    /// Create an empty index with a custom config.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if the config's order is below `MIN_ORDER`
    pub fn with_config(name: IndexName, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(name, config))
    }

    /// Rebuild an index from the authoritative record store.
    ///
    /// Entries are inserted in iteration order, so a later duplicate key
    /// overwrites an earlier one.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if the config's order is below `MIN_ORDER`
    pub fn from_entries<I>(name: IndexName, config: IndexConfig, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Key, Locator)>,
    {
        let mut tree = Self::with_config(name, config)?;
        tree.extend(entries);
        debug!(
            "rebuilt index {} with {} keys, height {}",
            tree.name,
            tree.len,
            tree.height
        );
        Ok(tree)
    }

    fn build(name: IndexName, config: IndexConfig) -> Self {
        Self {
            name,
            config,
            nodes: vec![Node::Leaf(LeafNode::with_capacity(config.order))],
            root: NodeId::new(0),
            len: 0,
            height: 1,
        }
    }

    // ========================================================================
    // Public API: Accessors
    // ========================================================================

    pub fn name(&self) -> &IndexName {
        &self.name
    }

    /// Maximum keys per node.
    pub fn order(&self) -> usize {
        self.config.order
    }

    /// Number of distinct keys in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels from root to leaves (1 for a leaf root).
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    ///
    /// Returns `None` for ids that were never allocated by this tree.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert `key -> locator`, overwriting the locator if `key` exists.
    ///
    /// Returns the previous locator for `key`, if any. Never fails.
    pub fn insert(&mut self, key: Key, locator: Locator) -> Option<Locator> {
        if self.nodes[self.root.0].is_full(self.config.order) {
            self.split_root();
        }

        let mut current = self.root;
        loop {
            let (mut index, child) = match &self.nodes[current.0] {
                Node::Leaf(_) => break,
                Node::Internal(internal) => {
                    let index = internal.child_index(key);
                    (index, internal.children[index])
                }
            };

            if self.nodes[child.0].is_full(self.config.order) {
                let promoted = self.split_child(current, index);
                // Equal keys belong to the right half, matching child_index.
                if key >= promoted {
                    index += 1;
                }
            }

            current = self.internal(current).children[index];
        }

        let previous = self.leaf_mut(current).upsert(key, locator);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Wrap the full root in a new internal root and split it.
    fn split_root(&mut self) {
        let old_root = self.root;
        let new_root = self.alloc(Node::Internal(InternalNode::with_child(
            old_root,
            self.config.order,
        )));
        let promoted = self.split_child(new_root, 0);

        self.root = new_root;
        self.height += 1;
        debug!(
            "index {}: root split, promoted {}, height now {}",
            self.name, promoted, self.height
        );
    }

    /// Split the full child at `children[child_index]` of `parent`.
    ///
    /// Returns the key promoted into `parent`.
    fn split_child(&mut self, parent: NodeId, child_index: usize) -> Key {
        let mid = self.config.mid();
        let child = self.internal(parent).children[child_index];
        let right_id = NodeId::new(self.nodes.len());

        let (promoted, right) = match &mut self.nodes[child.0] {
            Node::Leaf(leaf) => {
                let mut right = leaf.split_off(mid);
                right.next = leaf.next.replace(right_id);
                // The separator is copied: it stays as the right leaf's first key.
                (right.keys[0], Node::Leaf(right))
            }
            Node::Internal(internal) => {
                let (promoted, right) = internal.split_off(mid);
                (promoted, Node::Internal(right))
            }
        };

        trace!(
            "index {}: split {} at slot {} of {}, new sibling {}, promoted {}",
            self.name,
            child,
            child_index,
            parent,
            right_id,
            promoted
        );

        self.alloc(right);
        self.internal_mut(parent)
            .insert_split(child_index, promoted, right_id);
        promoted
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    // ========================================================================
    // Public API: Search
    // ========================================================================

    /// Point lookup. `None` means `key` is not indexed.
    pub fn search(&self, key: Key) -> Option<Locator> {
        self.leaf(self.find_leaf(key)).get(key)
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.search(key).is_some()
    }

    /// Smallest key and its locator.
    pub fn first_key_value(&self) -> Option<(Key, Locator)> {
        self.iter().next()
    }

    /// Largest key and its locator.
    pub fn last_key_value(&self) -> Option<(Key, Locator)> {
        let mut current = self.root;
        loop {
            match &self.nodes[current.0] {
                Node::Internal(internal) => current = *internal.children.last()?,
                Node::Leaf(leaf) => return leaf.entries().last(),
            }
        }
    }

    /// Descend to the leaf whose range covers `key`.
    pub(crate) fn find_leaf(&self, key: Key) -> NodeId {
        let mut current = self.root;
        while let Node::Internal(internal) = &self.nodes[current.0] {
            current = internal.children[internal.child_index(key)];
        }
        current
    }

    /// Leftmost leaf: head of the leaf chain.
    pub(crate) fn first_leaf(&self) -> NodeId {
        let mut current = self.root;
        while let Node::Internal(internal) = &self.nodes[current.0] {
            current = internal.children[0];
        }
        current
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub(crate) fn leaf(&self, id: NodeId) -> &LeafNode {
        match &self.nodes[id.0] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("{} is not a leaf", id),
        }
    }

    fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode {
        match &mut self.nodes[id.0] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("{} is not a leaf", id),
        }
    }

    fn internal(&self, id: NodeId) -> &InternalNode {
        match &self.nodes[id.0] {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => unreachable!("{} is not an internal node", id),
        }
    }

    fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode {
        match &mut self.nodes[id.0] {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => unreachable!("{} is not an internal node", id),
        }
    }
}

impl Extend<(Key, Locator)> for BPlusTree {
    fn extend<I: IntoIterator<Item = (Key, Locator)>>(&mut self, iter: I) {
        for (key, locator) in iter {
            self.insert(key, locator);
        }
    }
}

impl fmt::Display for BPlusTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = TreePrinter::new();
        self.walk(&mut printer);
        writeln!(f, "B+Tree for {}:", self.name)?;
        write!(f, "{}", printer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    fn tree_with(keys: impl IntoIterator<Item = Key>) -> BPlusTree {
        let mut tree = BPlusTree::new("users", "id");
        for k in keys {
            tree.insert(k, k * 10);
        }
        tree
    }

    #[test]
    fn test_empty_tree() {
        let tree = BPlusTree::new("users", "id");
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.search(1), None);
        assert_eq!(tree.first_key_value(), None);
        assert_eq!(tree.last_key_value(), None);
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut tree = BPlusTree::new("users", "id");
        assert_eq!(tree.insert(1, 10), None);
        assert_eq!(tree.insert(1, 11), Some(10));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.search(1), Some(11));
    }

    #[test]
    fn test_full_leaf_root_does_not_split_yet() {
        let tree = tree_with(1..=4);
        assert_eq!(tree.height(), 1);
        assert!(tree.node(tree.root()).unwrap().is_leaf());
    }

    #[test]
    fn test_root_split_promotes_first_right_key() {
        let tree = tree_with(1..=5);
        assert_eq!(tree.height(), 2);

        match tree.node(tree.root()).unwrap() {
            Node::Internal(root) => {
                assert_eq!(root.keys(), &[3]);
                assert_eq!(root.children().len(), 2);
                assert_eq!(tree.leaf(root.children()[0]).keys(), &[1, 2]);
                assert_eq!(tree.leaf(root.children()[1]).keys(), &[3, 4, 5]);
            }
            Node::Leaf(_) => panic!("Expected internal root"),
        }
    }

    #[test]
    fn test_update_of_promoted_key_after_split() {
        // Leaves are [1,2] [3,4] [5,6,7,8]; updating 7 splits the last leaf
        // and promotes 7 itself.
        let mut tree = tree_with(1..=8);
        let len = tree.len();
        assert_eq!(tree.insert(7, -7), Some(70));
        assert_eq!(tree.len(), len);
        assert_eq!(tree.leaf(tree.find_leaf(7)).keys(), &[7, 8]);

        for k in (1..=8).filter(|&k| k != 7) {
            assert_eq!(tree.insert(k, -k), Some(k * 10));
        }
        assert_eq!(tree.len(), len);
        tree.check_invariants().unwrap();
        for k in 1..=8 {
            assert_eq!(tree.search(k), Some(-k));
        }
    }

    #[test]
    fn test_internal_split() {
        let tree = tree_with(1..=20);
        assert_eq!(tree.height(), 3);
        tree.check_invariants().unwrap();
        for k in 1..=20 {
            assert_eq!(tree.search(k), Some(k * 10));
        }
    }

    #[test]
    fn test_descending_inserts() {
        let tree = tree_with((1..=50).rev());
        tree.check_invariants().unwrap();
        assert_eq!(tree.first_key_value(), Some((1, 10)));
        assert_eq!(tree.last_key_value(), Some((50, 500)));
    }

    #[test]
    fn test_negative_keys() {
        let tree = tree_with(-10..10);
        tree.check_invariants().unwrap();
        assert_eq!(tree.search(-10), Some(-100));
        assert_eq!(tree.search(0), Some(0));
        assert_eq!(tree.search(10), None);
    }

    #[test]
    fn test_with_config_rejects_small_order() {
        let result = BPlusTree::with_config(IndexName::new("t", "c"), IndexConfig::new(1));
        assert!(matches!(result, Err(Error::InvalidOrder { order: 1, .. })));
    }

    #[test]
    fn test_min_order_tree() {
        let mut tree =
            BPlusTree::with_config(IndexName::new("t", "c"), IndexConfig::new(3)).unwrap();
        tree.extend((0..100).map(|k| (k, k)));
        tree.check_invariants().unwrap();
        assert_eq!(tree.len(), 100);
    }

    #[test]
    fn test_from_entries_last_write_wins() {
        let tree = BPlusTree::from_entries(
            IndexName::new("users", "id"),
            IndexConfig::default(),
            vec![(1, 0), (2, 1), (1, 2)],
        )
        .unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.search(1), Some(2));
    }

    #[test]
    fn test_display_header() {
        let tree = tree_with([10, 20]);
        let dump = tree.to_string();
        assert!(dump.starts_with("B+Tree for users.id:\n"));
        assert!(dump.contains("Leaf: Keys=[10, 20], Values=[100, 200]"));
    }
}
