//! Benchmark helpers for Keystash.

#![deny(unsafe_code)]

pub mod utils;
