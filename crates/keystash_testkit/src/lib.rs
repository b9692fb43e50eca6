//! # Keystash Testkit
//!
//! Test utilities for Keystash storage backends.
//!
//! This crate provides:
//! - Test fixtures that place file backends in temporary directories
//! - Property-based test generators using proptest
//! - A model-checking harness comparing a backend against a `HashMap`
//! - Known-answer vectors for the file line format
//!
//! ## Usage
//!
//! ```rust
//! use keystash_testkit::prelude::*;
//!
//! with_each_backend(|backend| {
//!     let mut harness = ModelHarness::new(backend);
//!     harness.apply(&Operation::Store { key: "k".into(), value: "v".into() });
//!     harness.verify_all();
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
pub use vectors::*;
