// Error types for the catalog store.
// Not-found, invalid-status and id exhaustion are recoverable and reported
// by the shell; IO and serialization failures are fatal and bubble up to
// `main`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No book with id {0}")]
    NotFound(u64),

    #[error("Invalid status '{0}', use 'available' or 'checked-out'")]
    InvalidStatus(String),

    #[error("No id left after {0}")]
    IdOverflow(u64),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether the shell can report this and carry on with the menu.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound(_) | CatalogError::InvalidStatus(_) | CatalogError::IdOverflow(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
