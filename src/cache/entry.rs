//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and recency metadata.

use std::time::{Duration, Instant};

use crate::cache::MAX_TTL;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, never inspected by the cache
    pub value: V,
    /// Deadline after which the entry is treated as absent
    pub expires_at: Instant,
    /// Recency mark handed out by the LRU tracker
    pub recency: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` after `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now` - The write time
    /// * `ttl` - Time to live, clamped to `MAX_TTL`
    /// * `recency` - Recency mark assigned by the tracker
    pub fn new(value: V, now: Instant, ttl: Duration, recency: u64) -> Self {
        Self {
            value,
            expires_at: deadline(now, ttl),
            recency,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at the given instant.
    ///
    /// Boundary condition: an entry is expired once `now` reaches `expires_at`,
    /// so a zero TTL produces an entry that is never observable.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining time to live, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

// == Utility Functions ==
/// Computes `now + ttl`, clamping TTLs the platform clock cannot represent.
pub fn deadline(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl.min(MAX_TTL))
        .or_else(|| now.checked_add(MAX_TTL))
        .unwrap_or(now)
}
