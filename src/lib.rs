//! keyindex - An in-memory B+Tree index mapping integer keys to record locators.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │        Insertion / lookup path (SQL layer, record store)        │
//! │              (key, locator) in  ·  Option<locator> out          │
//! └─────────────────────────────────────────────────────────────────┘
//!                                ↓
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 IndexRegistry (index/registry)                  │
//! │                   table name → BPlusTree                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                ↓
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     BPlusTree (index/btree)                     │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │   Internal nodes: separator keys + child NodeIds          │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │   Leaves: keys + locators ──next──▶ ──next──▶ ... (chain) │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │        Visitors: TreePrinter · TreeStats · invariant checks     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tree is never persisted. The surrounding system rebuilds it from the
//! record store on startup ([`BPlusTree::from_entries`]).
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, IndexName, Error, config)
//! - [`index`] - The B+Tree and the per-table registry
//!
//! # Quick Start
//! ```
//! use keyindex::BPlusTree;
//!
//! let mut tree = BPlusTree::new("users", "id");
//! for (key, locator) in [(10, 100), (20, 200), (5, 50), (15, 150), (25, 250)] {
//!     tree.insert(key, locator);
//! }
//!
//! assert_eq!(tree.search(15), Some(150));
//! assert_eq!(tree.search(99), None);
//! assert_eq!(tree.height(), 2);
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_ORDER, MIN_ORDER};
pub use common::{Error, IndexConfig, IndexName, InvariantViolation, Key, Locator, NodeId, Result};

pub use index::btree::{Node, TreeStats, Visitor};
pub use index::{BPlusTree, IndexRegistry};
