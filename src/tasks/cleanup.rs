//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

// == Cleanup Task ==
/// Handle to a running sweeper.
///
/// Stopping is idempotent: the first [`CleanupTask::stop`] signals the task,
/// later calls do nothing. Dropping the handle stops the task as well.
#[derive(Debug)]
pub struct CleanupTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl CleanupTask {
    // == Stop ==
    /// Signals the sweeper to exit after any in-flight pass.
    ///
    /// Returns true if this call stopped the task, false if it was already
    /// stopped.
    pub fn stop(&self) -> bool {
        let already_stopped = self.shutdown.send_replace(true);
        if already_stopped {
            debug!("TTL cleanup task already stopped");
            false
        } else {
            info!("Stopping TTL cleanup task");
            true
        }
    }

    /// Returns true once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Returns true once the task has actually exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The task wakes every `interval`, takes the store's write lock for one
/// bounded sweep and goes back to sleep. It never holds the lock while idle.
///
/// # Errors
/// - `CacheError::InvalidRequest` if `interval` is zero
/// - `CacheError::Runtime` if called outside a Tokio runtime
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheStore::<String>::new(1000)));
/// let cleanup = spawn_cleanup_task(cache.clone(), Duration::from_secs(1))?;
/// // Later, during shutdown:
/// cleanup.stop();
/// ```
pub fn spawn_cleanup_task<V>(
    cache: Arc<RwLock<CacheStore<V>>>,
    interval: Duration,
) -> Result<CleanupTask>
where
    V: Send + Sync + 'static,
{
    if interval.is_zero() {
        return Err(CacheError::InvalidRequest(
            "cleanup interval must be greater than zero".to_string(),
        ));
    }
    let runtime = Handle::try_current().map_err(|e| CacheError::Runtime(e.to_string()))?;

    let (shutdown, mut stop_rx) = watch::channel(false);

    let handle = runtime.spawn(async move {
        info!(?interval, "Starting TTL cleanup task");

        let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = {
                        let mut cache_guard = cache.write().await;
                        cache_guard.cleanup_expired()
                    };

                    if removed > 0 {
                        info!("TTL cleanup: removed {} expired entries", removed);
                    } else {
                        debug!("TTL cleanup: no expired entries found");
                    }
                }
                // Fires on stop and when the handle is dropped
                _ = stop_rx.changed() => break,
            }
        }

        info!("TTL cleanup task stopped");
    });

    Ok(CleanupTask { shutdown, handle })
}
