//! Integration tests for the per-table index registry.
//!
//! Mirrors how the insertion path uses it: records are appended to a store,
//! the append position becomes the locator, and lookups dereference it.

use keyindex::{Error, IndexConfig, IndexRegistry};

/// Stand-in for the external record store: locators are append positions.
struct RecordStore {
    rows: Vec<(i64, String)>,
}

impl RecordStore {
    fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn append(&mut self, id: i64, name: &str) -> i64 {
        self.rows.push((id, name.to_string()));
        (self.rows.len() - 1) as i64
    }

    fn get(&self, locator: i64) -> &(i64, String) {
        &self.rows[locator as usize]
    }
}

#[test]
fn test_insert_then_lookup_through_store() {
    let mut store = RecordStore::new();
    let mut registry = IndexRegistry::default();
    registry.create_index("users", "id").unwrap();

    for (id, name) in [(3, "Carol"), (1, "Alice"), (2, "Bob"), (5, "Eve"), (4, "Dan")] {
        let locator = store.append(id, name);
        registry.insert("users", id, locator).unwrap();
    }

    let locator = registry.search("users", 5).unwrap().unwrap();
    assert_eq!(store.get(locator).1, "Eve");
    assert_eq!(registry.search("users", 6).unwrap(), None);
    assert_eq!(registry.get("users").unwrap().height(), 2);
}

#[test]
fn test_rebuild_from_store_on_startup() {
    let mut store = RecordStore::new();
    for id in 0..100 {
        store.append(id, &format!("user{}", id));
    }
    // A later row for the same id supersedes the earlier one.
    store.append(10, "renamed");

    let mut registry = IndexRegistry::new(IndexConfig::new(8)).unwrap();
    let entries: Vec<(i64, i64)> = store
        .rows
        .iter()
        .enumerate()
        .map(|(pos, (id, _))| (*id, pos as i64))
        .collect();
    let tree = registry.rebuild("users", "id", entries).unwrap();

    assert_eq!(tree.len(), 100);
    assert_eq!(tree.order(), 8);
    tree.check_invariants().unwrap();

    let locator = registry.search("users", 10).unwrap().unwrap();
    assert_eq!(store.get(locator).1, "renamed");
}

#[test]
fn test_tables_are_independent() {
    let mut registry = IndexRegistry::default();
    registry.create_index("users", "id").unwrap();
    registry.create_index("orders", "id").unwrap();

    registry.insert("users", 1, 10).unwrap();
    registry.insert("orders", 1, 20).unwrap();

    assert_eq!(registry.search("users", 1).unwrap(), Some(10));
    assert_eq!(registry.search("orders", 1).unwrap(), Some(20));
    assert!(registry.contains("orders"));
    assert!(!registry.contains("items"));

    match registry.search("items", 1) {
        Err(Error::IndexNotFound(table)) => assert_eq!(table, "items"),
        other => panic!("Expected IndexNotFound, got {:?}", other),
    }
}

#[test]
fn test_get_mut_allows_direct_inserts() {
    let mut registry = IndexRegistry::default();
    registry.create_index("users", "id").unwrap();

    let tree = registry.get_mut("users").unwrap();
    tree.extend((0..20).map(|k| (k, k)));

    assert_eq!(registry.get("users").unwrap().len(), 20);
    assert!(!registry.is_empty());
}
