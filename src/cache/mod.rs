//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

use std::time::Duration;

mod entry;
mod expiry;
mod handle;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiry::ExpiryQueue;
pub use handle::Cache;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes at the HTTP boundary
pub const MAX_KEY_LENGTH: usize = 256;

/// Longest TTL honoured; larger values are clamped (about 100 years)
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Default number of expired entries removed by one sweep
pub const DEFAULT_SWEEP_LIMIT: usize = 100;
