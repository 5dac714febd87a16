//! Element ids for grids and their cells.
//!
//! A grid registers once and gets a [`GridHandle`]. Ids of column headers
//! and cells are derived from the grid's id and the node keys, so they stay
//! stable for as long as the grid is registered.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::RegistryError;

/// Handle of a registered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridHandle(usize);

impl GridHandle {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for GridHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

/// Metadata kept for a registered grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMeta {
    pub id: String,
}

/// Side table from grid handles to their metadata.
///
/// Entries live until [`unregister`](Self::unregister) is called.
#[derive(Debug, Default)]
pub struct GridRegistry {
    grids: HashMap<GridHandle, GridMeta>,
}

impl GridRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grid with an explicit element id.
    pub fn register(&mut self, id: impl Into<String>) -> GridHandle {
        let handle = GridHandle::new();
        let id = id.into();
        log::debug!("[registry] register {handle} as '{id}'");
        self.grids.insert(handle, GridMeta { id });
        handle
    }

    /// Register a grid whose id is derived from its handle.
    pub fn register_generated(&mut self) -> GridHandle {
        let handle = GridHandle::new();
        log::debug!("[registry] register {handle}");
        self.grids.insert(handle, GridMeta {
            id: handle.to_string(),
        });
        handle
    }

    pub fn unregister(&mut self, handle: GridHandle) -> Result<GridMeta, RegistryError> {
        log::debug!("[registry] unregister {handle}");
        self.grids
            .remove(&handle)
            .ok_or_else(|| RegistryError::unknown_grid(handle))
    }

    pub fn contains(&self, handle: GridHandle) -> bool {
        self.grids.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn grid_id(&self, handle: GridHandle) -> Result<&str, RegistryError> {
        self.grids
            .get(&handle)
            .map(|meta| meta.id.as_str())
            .ok_or_else(|| RegistryError::unknown_grid(handle))
    }

    /// Element id of a column header: `{grid}-{column}`.
    pub fn column_header_id(&self, handle: GridHandle, column: &str) -> Result<String, RegistryError> {
        let grid = self.grid_id(handle)?;
        Ok(format!("{grid}-{}", normalize_key(column)))
    }

    /// Element id of a cell: `{grid}-{row}-{column}`.
    pub fn cell_id(&self, handle: GridHandle, row: &str, column: &str) -> Result<String, RegistryError> {
        let grid = self.grid_id(handle)?;
        Ok(format!("{grid}-{}-{}", normalize_key(row), normalize_key(column)))
    }
}

fn normalize_key(key: &str) -> String {
    key.chars().filter(|c| !c.is_whitespace()).collect()
}
