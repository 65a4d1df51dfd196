//! Key-value store error types.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](super::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be reached or was told to refuse access.
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    /// A write would exceed the backend's capacity.
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a valid key-value map.
    #[error("storage data is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Returns true if retrying later might succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Io(_))
    }
}
