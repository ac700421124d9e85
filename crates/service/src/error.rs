//! Typed error enum for the service layer.

use prompt_curator_storage::StorageError;
use thiserror::Error;

/// Service-layer error. Not-found is never an error here; handlers return
/// `Option`/`bool` for that.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (connectivity, constraint, corrupt row).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Whether this error is likely transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
        }
    }
}
