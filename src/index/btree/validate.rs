//! Structural invariant checks.

use crate::common::{InvariantViolation, Key, NodeId};
use crate::index::btree::node::{InternalNode, LeafNode};
use crate::index::btree::visit::Visitor;
use crate::index::btree::BPlusTree;

impl BPlusTree {
    /// Verify every structural invariant of the tree.
    ///
    /// Checks that leaves share one depth, keys are strictly increasing and
    /// within their parent's separator range, no node overflows, internal
    /// nodes have `keys + 1` children, and the leaf chain visits exactly the
    /// leaves reachable from the root in ascending key order.
    ///
    /// Operations keep these invariants; this exists for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut checker = Checker::new(self.order());
        self.walk(&mut checker);
        if let Some(violation) = checker.violation {
            return Err(violation);
        }

        if checker.key_count != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                reported: self.len(),
                actual: checker.key_count,
            });
        }

        self.check_leaf_chain(&checker.leaves)
    }

    fn check_leaf_chain(&self, reachable: &[NodeId]) -> Result<(), InvariantViolation> {
        let mut chained = 0;
        let mut last: Option<Key> = None;

        for (id, leaf) in self.leaves() {
            chained += 1;
            // Stops a cycle from running forever.
            if reachable.get(chained - 1) != Some(&id) {
                return Err(InvariantViolation::LeafChainMismatch {
                    chained,
                    reachable: reachable.len(),
                });
            }
            if let (Some(prev), Some(&first)) = (last, leaf.keys().first()) {
                if first <= prev {
                    return Err(InvariantViolation::UnsortedKeys { node: id });
                }
            }
            if let Some(&k) = leaf.keys().last() {
                last = Some(k);
            }
        }

        if chained != reachable.len() {
            return Err(InvariantViolation::LeafChainMismatch {
                chained,
                reachable: reachable.len(),
            });
        }
        Ok(())
    }
}

/// Pre-order visitor that tracks separator bounds per depth.
struct Checker {
    order: usize,
    /// `(low, high)` allowed key range for each pending node, in walk order.
    bounds: Vec<(Option<Key>, Option<Key>)>,
    leaf_depth: Option<usize>,
    leaves: Vec<NodeId>,
    key_count: usize,
    violation: Option<InvariantViolation>,
}

impl Checker {
    fn new(order: usize) -> Self {
        Self {
            order,
            bounds: vec![(None, None)],
            leaf_depth: None,
            leaves: Vec::new(),
            key_count: 0,
            violation: None,
        }
    }

    fn fail(&mut self, violation: InvariantViolation) {
        if self.violation.is_none() {
            self.violation = Some(violation);
        }
    }

    /// Checks shared by both node kinds; returns the node's allowed range.
    fn check_keys(&mut self, id: NodeId, keys: &[Key]) -> (Option<Key>, Option<Key>) {
        let (low, high) = self.bounds.pop().unwrap_or((None, None));

        if keys.len() > self.order {
            self.fail(InvariantViolation::Overflow {
                node: id,
                len: keys.len(),
                order: self.order,
            });
        }
        if keys.windows(2).any(|w| w[0] >= w[1]) {
            self.fail(InvariantViolation::UnsortedKeys { node: id });
        }
        if let Some(&key) = keys
            .iter()
            .find(|&&k| low.is_some_and(|l| k < l) || high.is_some_and(|h| k >= h))
        {
            self.fail(InvariantViolation::KeyOutOfRange { node: id, key });
        }
        (low, high)
    }
}

impl Visitor for Checker {
    fn visit_leaf(&mut self, depth: usize, id: NodeId, leaf: &LeafNode) {
        self.check_keys(id, leaf.keys());

        if leaf.keys().len() != leaf.locators().len() {
            self.fail(InvariantViolation::LocatorCount {
                node: id,
                keys: leaf.keys().len(),
                locators: leaf.locators().len(),
            });
        }

        match self.leaf_depth {
            None => self.leaf_depth = Some(depth),
            Some(expected) if expected != depth => {
                self.fail(InvariantViolation::UnevenLeafDepth {
                    node: id,
                    depth,
                    expected,
                });
            }
            Some(_) => {}
        }

        self.leaves.push(id);
        self.key_count += leaf.len();
    }

    fn visit_internal(&mut self, _depth: usize, id: NodeId, node: &InternalNode) {
        let (low, high) = self.check_keys(id, node.keys());

        if node.children().len() != node.keys().len() + 1 {
            self.fail(InvariantViolation::ChildCount {
                node: id,
                keys: node.keys().len(),
                children: node.children().len(),
            });
        }

        // Child i covers [keys[i-1], keys[i]). The walk pops the leftmost
        // child first, so push child ranges in reverse.
        let keys = node.keys();
        for i in (0..node.children().len()).rev() {
            let child_low = if i == 0 { low } else { keys.get(i - 1).copied() };
            let child_high = keys.get(i).copied().or(high);
            self.bounds.push((child_low, child_high));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::btree::node::Node;

    #[test]
    fn test_valid_trees_pass() {
        for n in [0, 1, 4, 5, 17, 64, 200] {
            let mut tree = BPlusTree::new("users", "id");
            tree.extend((0..n).map(|k| ((k * 7919) % 1000, k)));
            assert_eq!(tree.check_invariants(), Ok(()), "n = {}", n);
        }
    }

    #[test]
    fn test_detects_unsorted_leaf() {
        let mut tree = BPlusTree::new("users", "id");
        tree.extend([(1, 1), (2, 2)]);
        if let Node::Leaf(leaf) = &mut tree.nodes_mut()[0] {
            leaf.keys.swap(0, 1);
        }
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::UnsortedKeys {
                node: NodeId::new(0)
            })
        );
    }

    #[test]
    fn test_detects_key_out_of_range() {
        let mut tree = BPlusTree::new("users", "id");
        tree.extend((1..=5).map(|k| (k, k)));
        // Leaf 0 covers keys < 3.
        if let Node::Leaf(leaf) = &mut tree.nodes_mut()[0] {
            leaf.keys[1] = 3;
        }
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::KeyOutOfRange {
                node: NodeId::new(0),
                key: 3
            })
        );
    }

    #[test]
    fn test_detects_broken_chain() {
        let mut tree = BPlusTree::new("users", "id");
        tree.extend((1..=5).map(|k| (k, k)));
        if let Node::Leaf(leaf) = &mut tree.nodes_mut()[0] {
            leaf.next = None;
        }
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::LeafChainMismatch {
                chained: 1,
                reachable: 2
            })
        );
    }
}
