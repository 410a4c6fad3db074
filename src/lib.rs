//! Mini Cache - an in-process key-value cache
//!
//! Values live under string keys with a TTL and an optional capacity bound
//! enforced by LRU eviction. A background sweeper purges expired entries.
//! The [`Cache`] handle is the in-process API; [`api`] serves it over HTTP
//! and [`repl`] drives it from a line shell.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;
pub mod ttl;

pub use api::{create_router, AppState};
pub use cache::{Cache, CacheStats, CacheStore};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{spawn_cleanup_task, CleanupTask};
