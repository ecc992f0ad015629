//! Index naming.

use std::fmt;

/// The table and column an index covers.
///
/// Used only for diagnostics; it has no effect on the tree algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexName {
    pub table: String,
    pub column: String,
}

impl IndexName {
    /// Create a new IndexName.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}
