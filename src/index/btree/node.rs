//! B+Tree node types.
//!
//! A node is either a [`LeafNode`] (keys + locators + link to the right
//! sibling) or an [`InternalNode`] (separator keys + child ids). Children and
//! siblings are referenced by [`NodeId`] into the owning tree's arena.

use crate::common::{Key, Locator, NodeId};

/// A tree node: tagged leaf/internal variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(LeafNode),
    Internal(InternalNode),
}

impl Node {
    /// Keys held by this node (entries for a leaf, separators for an internal node).
    #[inline]
    pub fn keys(&self) -> &[Key] {
        match self {
            Node::Leaf(leaf) => &leaf.keys,
            Node::Internal(internal) => &internal.keys,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// A node is full once it holds `order` keys; the next insert must split it.
    #[inline]
    pub fn is_full(&self, order: usize) -> bool {
        self.keys().len() >= order
    }
}

/// A leaf: sorted keys with their record locators.
///
/// `next` is a non-owning link used only for ordered traversal; the tree's
/// arena owns every node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafNode {
    pub(crate) keys: Vec<Key>,
    pub(crate) locators: Vec<Locator>,
    pub(crate) next: Option<NodeId>,
}

impl LeafNode {
    /// Create an empty leaf with room for `order` entries.
    pub fn with_capacity(order: usize) -> Self {
        Self {
            keys: Vec::with_capacity(order),
            locators: Vec::with_capacity(order),
            next: None,
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn locators(&self) -> &[Locator] {
        &self.locators
    }

    /// Right sibling in the leaf chain.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate `(key, locator)` pairs in ascending key order.
    pub fn entries(&self) -> impl Iterator<Item = (Key, Locator)> + '_ {
        self.keys.iter().copied().zip(self.locators.iter().copied())
    }

    /// First position whose key is `>= key`.
    #[inline]
    pub(crate) fn lower_bound(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    /// Point lookup inside this leaf.
    pub(crate) fn get(&self, key: Key) -> Option<Locator> {
        let pos = self.lower_bound(key);
        match self.keys.get(pos) {
            Some(&k) if k == key => Some(self.locators[pos]),
            _ => None,
        }
    }

    /// Insert a new entry or overwrite an existing one.
    ///
    /// Returns the previous locator when `key` was already present.
    pub(crate) fn upsert(&mut self, key: Key, locator: Locator) -> Option<Locator> {
        let pos = self.lower_bound(key);
        if self.keys.get(pos) == Some(&key) {
            return Some(std::mem::replace(&mut self.locators[pos], locator));
        }
        self.keys.insert(pos, key);
        self.locators.insert(pos, locator);
        None
    }

    /// Move entries `[mid..]` into a new right leaf.
    ///
    /// The chain link is left to the caller, which knows the new leaf's id.
    pub(crate) fn split_off(&mut self, mid: usize) -> LeafNode {
        LeafNode {
            keys: self.keys.split_off(mid),
            locators: self.locators.split_off(mid),
            next: None,
        }
    }
}

/// An internal node: separator keys routing to `keys.len() + 1` children.
///
/// Child `i` covers keys `< keys[i]`; the last child covers keys
/// `>= keys[len - 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternalNode {
    pub(crate) keys: Vec<Key>,
    pub(crate) children: Vec<NodeId>,
}

impl InternalNode {
    /// Create a separator-less node over a single child (a fresh root).
    pub(crate) fn with_child(child: NodeId, order: usize) -> Self {
        let mut children = Vec::with_capacity(order + 1);
        children.push(child);
        Self {
            keys: Vec::with_capacity(order),
            children,
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Index of the child covering `key`: the first `i` with `keys[i] > key`,
    /// or the last child when no separator exceeds `key`.
    #[inline]
    pub(crate) fn child_index(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k <= key)
    }

    /// Move separators `[mid+1..]` and children `[mid+1..]` into a new right node.
    ///
    /// Returns the promoted separator (`keys[mid]`), which stays in neither half.
    pub(crate) fn split_off(&mut self, mid: usize) -> (Key, InternalNode) {
        let right = InternalNode {
            keys: self.keys.split_off(mid + 1),
            children: self.children.split_off(mid + 1),
        };
        let promoted = self.keys[mid];
        self.keys.truncate(mid);
        (promoted, right)
    }

    /// Record a split of `children[child_index]`: `promoted` goes to
    /// `keys[child_index]` and `right` to `children[child_index + 1]`.
    pub(crate) fn insert_split(&mut self, child_index: usize, promoted: Key, right: NodeId) {
        self.keys.insert(child_index, promoted);
        self.children.insert(child_index + 1, right);
    }
}
