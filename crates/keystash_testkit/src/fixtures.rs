//! Test fixtures and backend helpers.
//!
//! Provides convenience functions for setting up backends in isolated
//! temporary directories and for running one test body against every
//! backend kind.

use keystash_storage::{
    BackendFactory, BackendKind, FileBackend, StorageBackend, StorageConfig,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Every backend kind, in a fixed order.
pub const ALL_KINDS: [BackendKind; 2] = [BackendKind::Memory, BackendKind::File];

/// A test backend with automatic cleanup.
pub struct TestBackend {
    /// The backend instance.
    pub backend: Box<dyn StorageBackend>,
    /// The storage file for file backends.
    path: Option<PathBuf>,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestBackend {
    /// Creates a test backend of the given kind.
    pub fn new(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Memory => Self::memory(),
            BackendKind::File => Self::file(),
        }
    }

    /// Creates a new in-memory test backend.
    pub fn memory() -> Self {
        let config = StorageConfig::new().kind(BackendKind::Memory);
        Self {
            backend: BackendFactory::from_config(&config),
            path: None,
            _temp_dir: None,
        }
    }

    /// Creates a new file test backend inside a fresh temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("storage.txt");
        let config = StorageConfig::new().kind(BackendKind::File).path(&path);

        Self {
            backend: BackendFactory::from_config(&config),
            path: Some(path),
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns the storage file path if file-based, None if in-memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Opens a second, independent backend on the same storage file.
    ///
    /// Returns `None` for in-memory backends, which have nothing to reopen.
    pub fn reopen(&self) -> Option<FileBackend> {
        self.path.as_ref().map(|path| FileBackend::new(path))
    }
}

impl std::ops::Deref for TestBackend {
    type Target = dyn StorageBackend;

    fn deref(&self) -> &Self::Target {
        self.backend.as_ref()
    }
}

impl std::ops::DerefMut for TestBackend {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.backend.as_mut()
    }
}

/// Runs a test once against a fresh backend of every kind.
///
/// # Example
///
/// ```rust
/// use keystash_testkit::with_each_backend;
///
/// with_each_backend(|backend| {
///     assert!(backend.store("k", "v"));
///     assert_eq!(backend.retrieve("k"), "v");
/// });
/// ```
pub fn with_each_backend<F>(mut f: F)
where
    F: FnMut(&mut dyn StorageBackend),
{
    for kind in ALL_KINDS {
        let mut test_backend = TestBackend::new(kind);
        f(&mut *test_backend);
    }
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates a backend holding `count` entries `key_{i}` -> `value_{i}`.
    pub fn populated_backend(kind: BackendKind, count: usize) -> TestBackend {
        let mut test_backend = TestBackend::new(kind);
        for i in 0..count {
            let stored = test_backend.store(&format!("key_{i}"), &format!("value_{i}"));
            assert!(stored, "Failed to store entry {i}");
        }
        test_backend
    }

    /// Creates a backend holding one entry per reserved character.
    pub fn hostile_backend(kind: BackendKind) -> TestBackend {
        let mut test_backend = TestBackend::new(kind);
        for (key, value) in hostile_entries() {
            assert!(test_backend.store(key, value), "Failed to store {key:?}");
        }
        test_backend
    }

    /// Entries whose keys and values contain every reserved character.
    pub fn hostile_entries() -> Vec<(&'static str, &'static str)> {
        vec![
            ("a=b", "x\ny"),
            ("tab\tkey", "tab\tvalue"),
            ("cr\r", "\r\n"),
            ("back\\slash", "\\n is not a newline"),
            ("=", "=="),
            ("trailing\\", "\\"),
        ]
    }
}
