//! Per-table index registry.
//!
//! The insertion path registers one primary-key index per table when the
//! table is created, then routes every `(key, locator)` through it. Lookups
//! by key go through the same registry before dereferencing the locator
//! against the record store.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::common::{Error, IndexConfig, IndexName, Key, Locator, Result};
use crate::index::BPlusTree;

/// Indexes keyed by table name.
///
/// # Example
/// ```
/// use keyindex::IndexRegistry;
///
/// let mut registry = IndexRegistry::default();
/// registry.create_index("users", "id").unwrap();
/// registry.insert("users", 1, 0).unwrap();
///
/// assert_eq!(registry.search("users", 1).unwrap(), Some(0));
/// assert!(registry.search("orders", 1).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexRegistry {
    /// Config applied to every index created here.
    config: IndexConfig,

    /// Table name → index. Ordered so dumps are stable.
    indexes: BTreeMap<String, BPlusTree>,
}

impl IndexRegistry {
    /// Create an empty registry.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if the config's order is below `MIN_ORDER`
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            indexes: BTreeMap::new(),
        })
    }

    /// Register an empty index on `table.column`.
    ///
    /// # Errors
    /// - `Error::IndexAlreadyExists` if `table` already has an index
    pub fn create_index(&mut self, table: &str, column: &str) -> Result<&mut BPlusTree> {
        if self.indexes.contains_key(table) {
            return Err(Error::IndexAlreadyExists(table.to_string()));
        }

        let tree = BPlusTree::with_config(IndexName::new(table, column), self.config)?;
        debug!("created index {} (order {})", tree.name(), self.config.order);
        Ok(self.indexes.entry(table.to_string()).or_insert(tree))
    }

    /// Replace (or create) the index on `table.column` from record-store entries.
    ///
    /// Used at startup: the tree itself is never persisted, so it is rebuilt
    /// from the authoritative records.
    pub fn rebuild<I>(&mut self, table: &str, column: &str, entries: I) -> Result<&BPlusTree>
    where
        I: IntoIterator<Item = (Key, Locator)>,
    {
        let tree = BPlusTree::from_entries(IndexName::new(table, column), self.config, entries)?;
        self.indexes.insert(table.to_string(), tree);
        Ok(&self.indexes[table])
    }

    pub fn get(&self, table: &str) -> Option<&BPlusTree> {
        self.indexes.get(table)
    }

    pub fn get_mut(&mut self, table: &str) -> Option<&mut BPlusTree> {
        self.indexes.get_mut(table)
    }

    pub fn contains(&self, table: &str) -> bool {
        self.indexes.contains_key(table)
    }

    /// Number of registered indexes.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Table names in ascending order.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.indexes.keys().map(String::as_str)
    }

    /// Insert or update `key -> locator` in `table`'s index.
    ///
    /// # Errors
    /// - `Error::IndexNotFound` if `table` has no index
    pub fn insert(&mut self, table: &str, key: Key, locator: Locator) -> Result<Option<Locator>> {
        let tree = self
            .indexes
            .get_mut(table)
            .ok_or_else(|| Error::IndexNotFound(table.to_string()))?;
        Ok(tree.insert(key, locator))
    }

    /// Look up `key` in `table`'s index. `Ok(None)` is a normal miss.
    ///
    /// # Errors
    /// - `Error::IndexNotFound` if `table` has no index
    pub fn search(&self, table: &str, key: Key) -> Result<Option<Locator>> {
        self.indexes
            .get(table)
            .map(|tree| tree.search(key))
            .ok_or_else(|| Error::IndexNotFound(table.to_string()))
    }
}

impl fmt::Display for IndexRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (table, tree) in &self.indexes {
            writeln!(f, "Index: {}", table)?;
            write!(f, "{}", tree)?;
        }
        Ok(())
    }
}
