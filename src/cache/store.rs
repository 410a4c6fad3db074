//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::entry::deadline;
use crate::cache::{CacheEntry, CacheStats, ExpiryQueue, LruTracker, DEFAULT_SWEEP_LIMIT};

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
///
/// The store itself is single-owner (`&mut self` for every mutation); share it
/// across tasks through [`crate::cache::Cache`], which wraps it in a lock.
///
/// Every key in `entries` has exactly one slot in `lru` and one in `expiry`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency index used for eviction
    lru: LruTracker,
    /// Deadline index used for sweeping
    expiry: ExpiryQueue,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed, 0 = unbounded
    max_entries: usize,
    /// Maximum entries removed by one sweep, 0 = unbounded
    sweep_limit: usize,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the specified capacity.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold, 0 for no bound
    pub fn new(max_entries: usize) -> Self {
        Self::with_sweep_limit(max_entries, DEFAULT_SWEEP_LIMIT)
    }

    /// Creates a new CacheStore whose sweeps remove at most `sweep_limit`
    /// entries per pass (0 for no bound).
    pub fn with_sweep_limit(max_entries: usize, sweep_limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            expiry: ExpiryQueue::new(),
            stats: CacheStats::new(),
            max_entries,
            sweep_limit,
        }
    }

    // == Set ==
    /// Stores a value under `key` for `ttl`.
    ///
    /// If the key already exists, value, deadline and recency are replaced in
    /// place and capacity is untouched. If the key is new and the cache is at
    /// capacity, expired entries are swept first and the least recently used
    /// entry is evicted if that did not free a slot.
    pub fn set(&mut self, key: String, value: V, ttl: Duration) {
        let now = Instant::now();

        if let Some(entry) = self.entries.get_mut(&key) {
            let expires_at = deadline(now, ttl);
            self.expiry.reschedule(&key, entry.expires_at, expires_at);
            entry.recency = self.lru.touch(&key, Some(entry.recency));
            entry.expires_at = expires_at;
            entry.value = value;
            return;
        }

        if self.max_entries > 0 && self.entries.len() >= self.max_entries {
            self.make_room(now);
        }

        let recency = self.lru.touch(&key, None);
        let entry = CacheEntry::new(value, now, ttl, recency);
        self.expiry.schedule(key.clone(), entry.expires_at);
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit refreshes the entry's recency. An expired entry is removed on
    /// the spot and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        self.lookup(key).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get), also returning the entry's remaining TTL.
    pub fn get_with_ttl(&mut self, key: &str) -> Option<(&V, Duration)> {
        self.lookup(key)
            .map(|entry| (&entry.value, entry.ttl_remaining()))
    }

    fn lookup(&mut self, key: &str) -> Option<&CacheEntry<V>> {
        let now = Instant::now();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_lookup(false);
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_lookup(false);
            return None;
        }

        self.stats.record_lookup(true);
        let entry = self.entries.get_mut(key)?;
        entry.recency = self.lru.touch(key, Some(entry.recency));
        Some(&*entry)
    }

    // == Exists ==
    /// Returns true if `key` holds a live entry. Never mutates.
    pub fn exists(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether an entry was stored under `key`; deleting a missing
    /// key is a no-op.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Keys ==
    /// Returns every live key in unspecified order.
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    // == Cleanup Expired ==
    /// Removes expired entries, at most `sweep_limit` of them.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.sweep(Instant::now())
    }

    // == Length ==
    /// Returns the number of live entries in the cache.
    ///
    /// Expired entries still waiting for a sweep are not counted.
    pub fn len(&self) -> usize {
        self.entries
            .len()
            .saturating_sub(self.expiry.count_expired(Instant::now()))
    }

    // == Is Empty ==
    /// Returns true if the cache holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of stored entries, expired or not.
    pub fn stored_len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the configured capacity, 0 meaning unbounded.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn make_room(&mut self, now: Instant) {
        let swept = self.sweep(now);
        if swept > 0 {
            debug!(swept, "Freed capacity by sweeping expired entries");
        }

        while self.entries.len() >= self.max_entries {
            let Some(victim) = self.lru.evict_oldest() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&victim) {
                self.expiry.cancel(&victim, entry.expires_at);
            }
            self.stats.record_eviction();
            debug!(key = %victim, "Evicted least recently used entry");
        }
    }

    fn sweep(&mut self, now: Instant) -> usize {
        let mut removed = 0;

        while self.sweep_limit == 0 || removed < self.sweep_limit {
            let Some(key) = self.expiry.pop_expired(now) else {
                break;
            };
            if let Some(entry) = self.entries.remove(&key) {
                self.lru.remove(entry.recency);
            }
            removed += 1;
        }

        self.stats.record_expirations(removed);
        removed
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(entry.recency);
        self.expiry.cancel(key, entry.expires_at);
        Some(entry)
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.entries.len(), self.lru.len(), "LRU index out of sync");
        assert_eq!(self.entries.len(), self.expiry.len(), "Expiry index out of sync");
    }
}
