//! Configuration for keyindex.

use crate::common::{Error, Result};

/// Default fanout: the maximum number of keys a node holds before it splits.
///
/// Deliberately small so that splits happen after a handful of inserts and
/// the tree shape stays easy to read in diagnostics.
pub const DEFAULT_ORDER: usize = 4;

/// Smallest usable fanout.
///
/// With `order < 3` an internal split (`mid = order / 2`) would leave the
/// right half without any separator key.
pub const MIN_ORDER: usize = 3;

/// Tunables for a single index.
///
/// # Example
/// ```
/// use keyindex::IndexConfig;
///
/// let config = IndexConfig::default().with_order(8);
/// assert!(config.validate().is_ok());
/// assert!(IndexConfig::default().with_order(2).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Maximum number of keys per node (ORDER).
    pub order: usize,
}

impl IndexConfig {
    /// Create a config with the given order.
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    /// Return a copy with a different order.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Check that the config can drive the split routine.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order < MIN_ORDER`
    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order: self.order,
                min: MIN_ORDER,
            });
        }
        Ok(())
    }

    /// Split point used for both leaf and internal splits.
    #[inline]
    pub(crate) fn mid(&self) -> usize {
        self.order / 2
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}
