//! In-memory storage backend.

use crate::backend::{sorted_keys, write_samples, StorageBackend};
use crate::stats::{AccessStats, StatsSnapshot};
use std::collections::HashMap;

/// An in-memory storage backend.
///
/// Entries live in a hash map owned by the backend and are lost when it is
/// dropped. Every operation succeeds.
///
/// # Example
///
/// ```rust
/// use keystash_storage::{MemoryBackend, StorageBackend};
///
/// let mut backend = MemoryBackend::new();
/// assert!(backend.store("greeting", "hello"));
/// assert_eq!(backend.retrieve("greeting"), "hello");
/// assert_eq!(backend.retrieve("missing"), "");
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: HashMap<String, String>,
    stats: AccessStats,
}

impl MemoryBackend {
    /// Label reported by [`StorageBackend::backend_type`].
    pub const BACKEND_TYPE: &'static str = "MemoryStorage";

    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn store(&mut self, key: &str, value: &str) -> bool {
        self.stats.record_write();
        self.data.insert(key.to_owned(), value.to_owned());
        true
    }

    fn retrieve(&self, key: &str) -> String {
        self.stats.record_read();
        self.data.get(key).cloned().unwrap_or_default()
    }

    fn remove(&mut self, key: &str) -> bool {
        self.stats.record_write();
        self.data.remove(key).is_some()
    }

    fn list_keys(&self) -> Vec<String> {
        self.stats.record_read();
        sorted_keys(self.data.keys())
    }

    fn clear(&mut self) {
        self.stats.record_write();
        self.data.clear();
    }

    fn backend_type(&self) -> &'static str {
        Self::BACKEND_TYPE
    }

    fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn debug_info(&self) -> String {
        let stats = self.stats.snapshot();
        let mut out = format!("{} Debug Info:\n", Self::BACKEND_TYPE);
        out.push_str(&format!("  Total entries: {}\n", self.data.len()));
        out.push_str(&format!("  Access count: {}\n", stats.total()));
        out.push_str("  Persistence: None (data lost when the backend is dropped)\n");
        write_samples(&mut out, &self.data);
        out
    }
}
