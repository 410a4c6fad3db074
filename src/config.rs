//! Configuration Module
//!
//! Loads cache configuration from defaults, an optional YAML file and
//! environment variables, in that order of precedence (last wins).

use std::path::Path;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_SWEEP_LIMIT;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Environment variables read on top of the file.
const ENV_KEYS: [&str; 5] = [
    "MAX_ENTRIES",
    "CLEANUP_INTERVAL",
    "DEFAULT_TTL",
    "SERVER_PORT",
    "SWEEP_LIMIT",
];

/// Cache and server configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of entries the cache can hold, 0 = unbounded
    pub max_entries: usize,
    /// Background cleanup interval in seconds, 0 = no background sweeping
    pub cleanup_interval: u64,
    /// TTL in seconds for HTTP writes that do not carry one
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum expired entries removed per sweep, 0 = unbounded
    pub sweep_limit: usize,
}

/// Key names used by older config files (`cachemaxsize`, `cacherefreshrate`),
/// re-emitted under the current names.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LegacyKeys {
    #[serde(
        rename(deserialize = "cachemaxsize"),
        skip_serializing_if = "Option::is_none"
    )]
    max_entries: Option<usize>,
    #[serde(
        rename(deserialize = "cacherefreshrate"),
        skip_serializing_if = "Option::is_none"
    )]
    cleanup_interval: Option<u64>,
}

impl Config {
    /// Loads configuration.
    ///
    /// With `Some(path)` the file must exist. With `None`, `config.yaml` in
    /// the working directory is used when present.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_LIMIT` - Entries removed per sweep (default: 100)
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let file = match path {
            Some(path) if !path.exists() => {
                return Err(figment::Error::from(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            Some(path) => Some(path),
            None => Some(Path::new(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        Self::figment(file)?.extract()
    }

    /// Loads configuration from defaults and environment variables only.
    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment(None)?.extract()
    }

    fn figment(file: Option<&Path>) -> Result<Figment, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(file) = file {
            let legacy: LegacyKeys = Figment::from(Yaml::file(file)).extract()?;
            figment = figment
                .merge(Serialized::defaults(legacy))
                .merge(Yaml::file(file));
        }

        Ok(figment.merge(Env::raw().only(&ENV_KEYS)))
    }

    /// Background cleanup interval; zero disables the sweeper.
    pub fn cleanup_interval_duration(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }

    /// TTL applied to HTTP writes without an explicit one.
    pub fn default_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            cleanup_interval: 1,
            default_ttl: 300,
            server_port: 3000,
            sweep_limit: DEFAULT_SWEEP_LIMIT,
        }
    }
}
