//! Error types for keyindex.

use thiserror::Error;

use crate::common::{Key, NodeId};

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in keyindex.
///
/// Index operations themselves never fail: a missed lookup is `None`, not an
/// error. Errors only come from configuration, registry bookkeeping and the
/// invariant checker.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured fanout is too small for the split routine.
    #[error("Invalid order {order}: must be at least {min}")]
    InvalidOrder { order: usize, min: usize },

    /// A table already has an index registered.
    #[error("Index for table '{0}' already exists")]
    IndexAlreadyExists(String),

    /// No index is registered for the table.
    #[error("No index for table '{0}'")]
    IndexNotFound(String),

    /// The tree failed a structural check.
    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// A structural invariant that a tree failed to uphold.
///
/// Produced by [`BPlusTree::check_invariants`](crate::index::BPlusTree::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Leaves were found at different depths.
    #[error("leaf {node} at depth {depth}, expected {expected}")]
    UnevenLeafDepth {
        node: NodeId,
        depth: usize,
        expected: usize,
    },

    /// Keys inside a node are not strictly increasing.
    #[error("keys of {node} are not strictly increasing")]
    UnsortedKeys { node: NodeId },

    /// A node holds more keys than the order allows.
    #[error("{node} holds {len} keys, order is {order}")]
    Overflow {
        node: NodeId,
        len: usize,
        order: usize,
    },

    /// An internal node's child count is not `keys + 1`.
    #[error("{node} has {keys} keys but {children} children")]
    ChildCount {
        node: NodeId,
        keys: usize,
        children: usize,
    },

    /// A leaf's locator count differs from its key count.
    #[error("{node} has {keys} keys but {locators} locators")]
    LocatorCount {
        node: NodeId,
        keys: usize,
        locators: usize,
    },

    /// A key lies outside the range its parent separators allow.
    #[error("key {key} in {node} is outside its separator range")]
    KeyOutOfRange { node: NodeId, key: Key },

    /// The leaf chain disagrees with the leaves reachable by descent.
    #[error("leaf chain visits {chained} leaves, tree has {reachable}")]
    LeafChainMismatch { chained: usize, reachable: usize },

    /// The maintained entry count disagrees with the leaves.
    #[error("tree reports {reported} entries, leaves hold {actual}")]
    LengthMismatch { reported: usize, actual: usize },
}
