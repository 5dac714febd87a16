//! RegistryError for grid metadata lookups

/// Error type for looking up metadata of a grid that was never registered
/// or has already been unregistered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Unknown grid: {handle}")]
    UnknownGrid { handle: String },
}

impl RegistryError {
    /// Creates a new unknown grid error.
    pub fn unknown_grid(handle: impl ToString) -> Self {
        Self::UnknownGrid {
            handle: handle.to_string(),
        }
    }
}
