//! Common types and utilities shared across keyindex.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration (order constants, [`IndexConfig`])
//! - Error types
//! - Identifiers ([`NodeId`], [`IndexName`]) and the `Key`/`Locator` aliases

pub mod config;
pub mod error;
mod index_name;
mod node_id;

pub use config::IndexConfig;
pub use error::{Error, InvariantViolation, Result};
pub use index_name::IndexName;
pub use node_id::NodeId;

/// Indexed column value.
pub type Key = i64;

/// Opaque position of a record in the external record store.
///
/// The index never interprets it; callers dereference it against the store.
pub type Locator = i64;
