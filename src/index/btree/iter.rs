//! Ordered iteration over the leaf chain.
//!
//! Range scans descend once to the start leaf (same routing as
//! [`BPlusTree::search`]) and then follow `next` links; they never re-enter
//! the tree.

use std::ops::{Bound, RangeBounds};

use crate::common::{Key, Locator, NodeId};
use crate::index::btree::node::LeafNode;
use crate::index::btree::BPlusTree;

impl BPlusTree {
    /// Iterate all entries in ascending key order.
    pub fn iter(&self) -> Range<'_> {
        self.range(..)
    }

    /// Iterate entries whose keys fall inside `bounds`, in ascending order.
    ///
    /// # Example
    /// ```
    /// use keyindex::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new("users", "id");
    /// tree.extend((1..=10).map(|k| (k, k * 100)));
    ///
    /// let keys: Vec<i64> = tree.range(3..6).map(|(k, _)| k).collect();
    /// assert_eq!(keys, vec![3, 4, 5]);
    /// ```
    pub fn range<R: RangeBounds<Key>>(&self, bounds: R) -> Range<'_> {
        let (leaf, pos) = match bounds.start_bound() {
            Bound::Unbounded => (self.first_leaf(), 0),
            Bound::Included(&start) => {
                let leaf = self.find_leaf(start);
                (leaf, self.leaf(leaf).lower_bound(start))
            }
            Bound::Excluded(&start) => {
                let leaf = self.find_leaf(start);
                let node = self.leaf(leaf);
                (leaf, node.keys().partition_point(|&k| k <= start))
            }
        };

        Range {
            tree: self,
            leaf: Some(self.leaf(leaf)),
            pos,
            end: bounds.end_bound().cloned(),
        }
    }

    /// Iterate the leaves in chain order, starting from the leftmost leaf.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            tree: self,
            next: Some(self.first_leaf()),
        }
    }
}

/// Iterator over `(key, locator)` pairs in a key range.
///
/// Created by [`BPlusTree::range`] and [`BPlusTree::iter`].
#[derive(Debug, Clone)]
pub struct Range<'a> {
    tree: &'a BPlusTree,
    leaf: Option<&'a LeafNode>,
    pos: usize,
    end: Bound<Key>,
}

impl Range<'_> {
    fn before_end(&self, key: Key) -> bool {
        match self.end {
            Bound::Unbounded => true,
            Bound::Included(end) => key <= end,
            Bound::Excluded(end) => key < end,
        }
    }
}

impl Iterator for Range<'_> {
    type Item = (Key, Locator);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf = self.leaf?;
            if self.pos < leaf.len() {
                let key = leaf.keys[self.pos];
                if !self.before_end(key) {
                    self.leaf = None;
                    return None;
                }
                let locator = leaf.locators[self.pos];
                self.pos += 1;
                return Some((key, locator));
            }

            let tree = self.tree;
            self.leaf = leaf.next().map(|id| tree.leaf(id));
            self.pos = 0;
        }
    }
}

/// Iterator over leaf nodes following the chain.
///
/// Created by [`BPlusTree::leaves`].
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    tree: &'a BPlusTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (NodeId, &'a LeafNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let leaf = self.tree.leaf(id);
        self.next = leaf.next();
        Some((id, leaf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(keys: impl IntoIterator<Item = Key>) -> BPlusTree {
        let mut tree = BPlusTree::new("users", "id");
        tree.extend(keys.into_iter().map(|k| (k, k * 10)));
        tree
    }

    fn keys(range: Range<'_>) -> Vec<Key> {
        range.map(|(k, _)| k).collect()
    }

    #[test]
    fn test_iter_empty() {
        assert_eq!(tree_with([]).iter().next(), None);
    }

    #[test]
    fn test_iter_ascending() {
        let tree = tree_with([7, 3, 9, 1, 5, 8, 2, 6, 4]);
        assert_eq!(keys(tree.iter()), (1..=9).collect::<Vec<_>>());
        assert_eq!(tree.iter().next(), Some((1, 10)));
    }

    #[test]
    fn test_range_bounds() {
        let tree = tree_with(1..=20);

        assert_eq!(keys(tree.range(5..8)), vec![5, 6, 7]);
        assert_eq!(keys(tree.range(5..=8)), vec![5, 6, 7, 8]);
        assert_eq!(keys(tree.range(..3)), vec![1, 2]);
        assert_eq!(keys(tree.range(18..)), vec![18, 19, 20]);
        assert_eq!(
            keys(tree.range((Bound::Excluded(5), Bound::Included(7)))),
            vec![6, 7]
        );
    }

    #[test]
    fn test_range_crosses_leaves() {
        let tree = tree_with(1..=20);
        assert!(tree.leaves().count() > 3);
        assert_eq!(keys(tree.range(2..19)), (2..19).collect::<Vec<_>>());
    }

    #[test]
    fn test_range_start_between_keys() {
        let tree = tree_with((0..20).map(|k| k * 10));
        // 35 routes to the leaf ending in 30; the scan moves on to the next leaf.
        assert_eq!(keys(tree.range(35..70)), vec![40, 50, 60]);
        assert_eq!(keys(tree.range(195..)), Vec::<Key>::new());
        assert_eq!(keys(tree.range(185..)), vec![190]);
    }

    #[test]
    fn test_range_empty() {
        let tree = tree_with(1..=10);
        assert_eq!(keys(tree.range(20..30)), Vec::<Key>::new());
        assert_eq!(keys(tree.range(5..5)), Vec::<Key>::new());
    }

    #[test]
    fn test_leaves_chain() {
        let tree = tree_with(1..=5);
        let leaves: Vec<Vec<Key>> = tree.leaves().map(|(_, l)| l.keys().to_vec()).collect();
        assert_eq!(leaves, vec![vec![1, 2], vec![3, 4, 5]]);
    }
}
