//! Shared Cache Handle
//!
//! Thread-safe front door to a [`CacheStore`]: one reader/writer lock around
//! the store plus the background sweeper that shares it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::Result;
use crate::tasks::{spawn_cleanup_task, CleanupTask};

// == Cache ==
/// Concurrent cache handle, usable from any number of tasks at once.
///
/// `exists`, `keys`, `size` and `stats` take the shared lock. `set`, `get`
/// (which refreshes recency and drops expired entries), `delete` and
/// `cleanup` take the exclusive lock, as does every sweeper pass.
///
/// Values are returned by clone; store an `Arc<T>` to share large values.
#[derive(Debug)]
pub struct Cache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    sweeper: Option<CleanupTask>,
}

impl<V> Cache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache holding at most `max_size` entries (0 for no bound)
    /// and sweeping expired entries every `cleanup_interval` (zero disables
    /// the sweeper).
    ///
    /// # Errors
    /// Returns `CacheError::Runtime` if a sweeper is requested outside a
    /// Tokio runtime.
    pub fn new(cleanup_interval: Duration, max_size: usize) -> Result<Self> {
        Self::with_store(CacheStore::new(max_size), cleanup_interval)
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = CacheStore::with_sweep_limit(config.max_entries, config.sweep_limit);
        Self::with_store(store, config.cleanup_interval_duration())
    }

    /// Wraps an existing store and starts its sweeper.
    pub fn with_store(store: CacheStore<V>, cleanup_interval: Duration) -> Result<Self> {
        let max_entries = store.max_entries();
        let store = Arc::new(RwLock::new(store));

        let sweeper = if cleanup_interval.is_zero() {
            info!("Cleanup interval is zero, background sweeping disabled");
            None
        } else {
            Some(spawn_cleanup_task(store.clone(), cleanup_interval)?)
        };

        info!(max_entries, ?cleanup_interval, "Cache initialized");
        Ok(Self { store, sweeper })
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`, evicting if the cache is full.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.store.write().await.set(key.into(), value, ttl);
    }

    // == Get ==
    /// Returns a clone of the live value under `key`.
    pub async fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.store.write().await.get(key).cloned()
    }

    /// Returns a clone of the live value under `key` and its remaining TTL.
    pub async fn get_with_ttl(&self, key: &str) -> Option<(V, Duration)>
    where
        V: Clone,
    {
        self.store
            .write()
            .await
            .get_with_ttl(key)
            .map(|(value, ttl)| (value.clone(), ttl))
    }

    // == Exists ==
    /// Returns true if `key` holds a live entry, without refreshing it.
    pub async fn exists(&self, key: &str) -> bool {
        self.store.read().await.exists(key)
    }

    // == Delete ==
    /// Removes `key`; returns whether it was stored.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Keys ==
    /// Returns every live key in unspecified order.
    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    // == Size ==
    /// Returns the number of live entries.
    pub async fn size(&self) -> usize {
        self.store.read().await.len()
    }

    // == Cleanup ==
    /// Runs one bounded sweep now; returns how many entries it removed.
    pub async fn cleanup(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Stop ==
    /// Stops background sweeping. Foreground operations keep working.
    ///
    /// Returns true if this call stopped the sweeper; repeated calls and
    /// caches without a sweeper return false.
    pub fn stop(&self) -> bool {
        self.sweeper.as_ref().is_some_and(CleanupTask::stop)
    }

    /// Returns true while the background sweeper is scheduled and running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .as_ref()
            .is_some_and(|sweeper| !sweeper.is_stopped() && !sweeper.is_finished())
    }
}
