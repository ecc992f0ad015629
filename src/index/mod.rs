//! Index structures.
//!
//! - [`btree`] - In-memory B+Tree mapping keys to record locators
//! - [`IndexRegistry`] - One primary-key index per table

pub mod btree;
mod registry;

pub use btree::BPlusTree;
pub use registry::IndexRegistry;
