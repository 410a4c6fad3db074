//! Cache Statistics Module
//!
//! Counters kept by the store, and the snapshot type handed out to callers.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time cache counters.
///
/// `total_entries` is only meaningful on snapshots returned by
/// [`CacheStore::stats`](crate::cache::CacheStore::stats); the store itself
/// keeps it at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that found a live entry
    pub hits: u64,
    /// Reads that found nothing, including expired entries
    pub misses: u64,
    /// Entries dropped to make room
    pub evictions: u64,
    /// Expired entries removed, lazily or by a sweep
    pub expirations: u64,
    /// Live entries at snapshot time
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total reads recorded.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// hits / lookups, or 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    pub(crate) fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    /// Copy of the counters stamped with the current live entry count.
    pub(crate) fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..*self
        }
    }
}
