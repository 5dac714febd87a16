//! CollectionError for table construction

use crate::types::Key;

/// Error type for building a table collection from a node description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// Two nodes share the same key.
    #[error("Duplicate key '{key}' in table description")]
    DuplicateKey { key: Key },

    /// More than one body node was supplied.
    #[error("Table has more than one body: '{first}' and '{second}'")]
    MultipleBodies { first: Key, second: Key },

    /// A node appears under a parent that cannot own it.
    #[error("Node '{key}' of type {kind} cannot be placed {placement}")]
    Misplaced {
        key: Key,
        kind: &'static str,
        placement: &'static str,
    },

    /// A row's cells do not cover exactly one span per leaf column.
    #[error("Row '{row}' has cells spanning {cells} columns but the table has {columns}")]
    CellCountMismatch {
        row: Key,
        cells: usize,
        columns: usize,
    },
}

impl CollectionError {
    /// Creates a new duplicate key error.
    pub fn duplicate_key(key: impl Into<Key>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Creates a new misplaced node error.
    pub fn misplaced(key: impl Into<Key>, kind: &'static str, placement: &'static str) -> Self {
        Self::Misplaced {
            key: key.into(),
            kind,
            placement,
        }
    }
}
