//! Backend access counters.
//!
//! Counters are atomic so that read-only trait methods (`&self`) can record
//! accesses while keeping backends `Send + Sync`.

use std::sync::atomic::{AtomicU64, Ordering};

/// Read and write counters for a single backend instance.
#[derive(Debug, Default)]
pub(crate) struct AccessStats {
    /// Total number of read operations.
    reads: AtomicU64,
    /// Total number of write operations.
    writes: AtomicU64,
}

impl AccessStats {
    /// Creates a new zeroed counter set.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a read operation.
    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a write operation.
    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a consistent-enough snapshot of the counters.
    pub(crate) fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of a backend's access counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Read operations recorded.
    pub reads: u64,
    /// Write operations recorded.
    pub writes: u64,
}

impl StatsSnapshot {
    /// Returns the total number of recorded operations.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.reads + self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_zero() {
        let stats = AccessStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
        assert_eq!(stats.snapshot().total(), 0);
    }

    #[test]
    fn record_and_snapshot() {
        let stats = AccessStats::new();
        stats.record_read();
        stats.record_read();
        stats.record_write();

        let snap = stats.snapshot();
        assert_eq!(snap.reads, 2);
        assert_eq!(snap.writes, 1);
        assert_eq!(snap.total(), 3);
    }
}
