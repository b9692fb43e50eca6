//! Error types for storage operations.
//!
//! These never cross the [`crate::StorageBackend`] boundary, which reports
//! failures through `false` and empty results. They surface through the
//! fallible inherent API of [`crate::FileBackend`] and through backend-kind
//! parsing.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A backend name did not match any known backend.
    #[error("unknown storage backend: {0:?}")]
    UnknownBackend(String),
}
