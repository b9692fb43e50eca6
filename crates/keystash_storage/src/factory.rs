//! Backend selection.
//!
//! The backend used by [`BackendFactory::create`] is fixed when the crate is
//! compiled: enabling the `memory-backend` feature selects
//! [`MemoryBackend`], otherwise [`FileBackend`] is used. Code that needs to
//! choose a path or backend explicitly builds a [`StorageConfig`] once at
//! startup and hands it to [`BackendFactory::from_config`].

use crate::backend::StorageBackend;
use crate::error::StorageError;
use crate::file::{FileBackend, DEFAULT_FILENAME};
use crate::memory::MemoryBackend;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// The concrete backend selected at compile time.
#[cfg(feature = "memory-backend")]
pub type SelectedBackend = MemoryBackend;

/// The concrete backend selected at compile time.
#[cfg(not(feature = "memory-backend"))]
pub type SelectedBackend = FileBackend;

/// The available backend implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// [`MemoryBackend`].
    Memory,
    /// [`FileBackend`].
    File,
}

impl BackendKind {
    /// The kind selected by the crate's feature flags.
    #[cfg(feature = "memory-backend")]
    pub const SELECTED: Self = Self::Memory;

    /// The kind selected by the crate's feature flags.
    #[cfg(not(feature = "memory-backend"))]
    pub const SELECTED: Self = Self::File;

    /// Returns the short name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        Self::SELECTED
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            _ => Err(StorageError::UnknownBackend(s.to_string())),
        }
    }
}

/// Configuration for building a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Which backend to build.
    pub kind: BackendKind,

    /// Storage file for [`BackendKind::File`]. Ignored by the memory backend.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::SELECTED,
            path: PathBuf::from(DEFAULT_FILENAME),
        }
    }
}

impl StorageConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend kind.
    #[must_use]
    pub fn kind(mut self, kind: BackendKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the storage file path.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// Builds backends behind the [`StorageBackend`] trait.
#[derive(Debug, Clone, Copy)]
pub struct BackendFactory;

impl BackendFactory {
    /// Creates the compile-time selected backend with default settings.
    #[must_use]
    pub fn create() -> Box<dyn StorageBackend> {
        Self::from_config(&StorageConfig::default())
    }

    /// Creates the backend described by `config`.
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Box<dyn StorageBackend> {
        debug!(kind = %config.kind, path = %config.path.display(), "creating storage backend");
        match config.kind {
            BackendKind::Memory => Box::new(MemoryBackend::new()),
            BackendKind::File => Box::new(FileBackend::new(config.path.clone())),
        }
    }
}
