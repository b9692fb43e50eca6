//! # Keystash Storage
//!
//! String key-value storage behind a pluggable backend trait.
//!
//! Backends report outcomes through plain values: mutators return `bool`,
//! lookups of missing keys return an empty string, and unreadable storage
//! reads as empty. Callers own all error policy.
//!
//! ## Available Backends
//!
//! - [`MemoryBackend`] - Hash map living as long as the backend
//! - [`FileBackend`] - Flat text file, re-read and rewritten on every call
//!
//! ## Selecting a Backend
//!
//! [`BackendFactory::create`] builds the backend chosen at compile time by
//! the `memory-backend` feature. [`BackendFactory::from_config`] builds one
//! from an explicit [`StorageConfig`].
//!
//! ## Example
//!
//! ```rust
//! use keystash_storage::{BackendFactory, BackendKind, StorageConfig};
//!
//! let config = StorageConfig::new().kind(BackendKind::Memory);
//! let mut backend = BackendFactory::from_config(&config);
//!
//! assert!(backend.store("b", "2"));
//! assert!(backend.store("a", "1"));
//! assert_eq!(backend.list_keys(), vec!["a", "b"]);
//! assert_eq!(backend.retrieve("missing"), "");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
pub mod codec;
mod error;
mod factory;
mod file;
mod memory;
mod stats;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use factory::{BackendFactory, BackendKind, SelectedBackend, StorageConfig};
pub use file::{FileBackend, DEFAULT_FILENAME};
pub use memory::MemoryBackend;
pub use stats::StatsSnapshot;
