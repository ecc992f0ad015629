//! B+Tree index implementation.
//!
//! # Components
//! - [`BPlusTree`] - The index: insert/update, point lookup, range scans
//! - [`Node`] / [`LeafNode`] / [`InternalNode`] - Tagged node variant
//! - [`Visitor`] - Pre-order traversal hook, with [`TreePrinter`] and
//!   [`TreeStats`] built on it
//! - [`Range`] / [`Leaves`] - Iterators over the leaf chain
//!
//! # Split rules
//! With `mid = order / 2`:
//! - Leaf split: the right leaf takes `[mid..]` and its first key is copied
//!   into the parent.
//! - Internal split: the right node takes keys `[mid+1..]`; `keys[mid]` moves
//!   up to the parent and stays in neither half.

mod iter;
mod node;
mod tree;
mod validate;
mod visit;

pub use iter::{Leaves, Range};
pub use node::{InternalNode, LeafNode, Node};
pub use tree::BPlusTree;
pub use visit::{TreePrinter, TreeStats, Visitor};
