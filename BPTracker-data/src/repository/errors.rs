use thiserror::Error;

use crate::storage::StorageError;

/// Error type for repository operations
///
/// Missing ids on update or delete are not errors, and neither is an
/// unparseable persisted collection; both are handled inside the repository.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Backend read or write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Collection could not be serialized for writing
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
