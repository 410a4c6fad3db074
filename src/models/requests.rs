//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;
use crate::error::{CacheError, Result};
use crate::ttl::{parse_ttl, TtlError};

/// TTL as sent by clients: a human-readable string (`"5m"`, `"300ms"`) or a
/// whole number of seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TtlValue {
    Seconds(u64),
    Text(String),
}

impl TtlValue {
    /// Converts the TTL into a duration.
    pub fn to_duration(&self) -> std::result::Result<Duration, TtlError> {
        match self {
            TtlValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            TtlValue::Text(text) => parse_ttl(text),
        }
    }
}

/// Request body for the SET operation (PUT /cache/:key)
///
/// # Fields
/// - `value`: Any JSON value; `null` or a missing field is rejected
/// - `ttl`: Optional TTL (uses the configured default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The value to store
    #[serde(default)]
    pub value: Option<Value>,
    /// Optional TTL
    #[serde(default)]
    pub ttl: Option<TtlValue>,
}

impl PutRequest {
    /// Validates the request and resolves its TTL against `default_ttl`.
    pub fn into_parts(self, default_ttl: Duration) -> Result<(Value, Duration)> {
        let value = self
            .value
            .ok_or_else(|| CacheError::InvalidRequest("Value is required".to_string()))?;

        let ttl = match self.ttl {
            Some(ttl) => ttl.to_duration()?,
            None => default_ttl,
        };

        Ok((value, ttl))
    }
}

/// Validates a key taken from the request path.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}
