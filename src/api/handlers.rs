//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, DeleteResponse, GetResponse, HealthResponse, KeysResponse, PutRequest,
    SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache; the handle synchronizes internally
    pub cache: Arc<Cache<Value>>,
    /// TTL applied when a PUT body carries none
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache<Value>, default_ttl: Duration) -> Self {
        Self {
            cache: Arc::new(cache),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration, starting the sweeper.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::from_config(config)?;
        Ok(Self::new(cache, config.default_ttl_duration()))
    }
}

/// Handler for PUT /cache/:key
///
/// Stores a JSON value under the path key with an optional TTL.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<PutRequest>,
) -> Result<Json<SetResponse>> {
    validate_key(&key)?;
    let (value, ttl) = req.into_parts(state.default_ttl)?;

    state.cache.set(key.clone(), value, ttl).await;
    debug!(%key, ?ttl, "Stored key");

    Ok(Json(SetResponse::new(key, ttl)))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get_with_ttl(&key).await {
        Some((value, ttl)) => Ok(Json(GetResponse::new(key, value, ttl))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /cache/:key
///
/// Succeeds whether or not the key was present.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let existed = state.cache.delete(&key).await;
    Json(DeleteResponse::new(key, existed))
}

/// Handler for GET /cache
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse::new(state.cache.keys().await))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
