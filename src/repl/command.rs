//! Command parsing and execution
//!
//! Defines the shell commands and how each one drives the cache.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde_json::{Number, Value};

use crate::cache::Cache;
use crate::ttl::parse_ttl;

/// Shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Store a value: set <key> <value> <ttl>
    Set {
        key: String,
        value: Value,
        ttl: Duration,
    },
    /// Read a value: get <key>
    Get { key: String },
    /// Remove a key: delete <key>
    Delete { key: String },
    /// List live keys: keys
    Keys,
    /// Check for a live key: exists <key>
    Exists { key: String },
    /// Count live entries: size
    Size,
    /// Run one sweep now: cleanup
    Cleanup,
    /// Show statistics: stats
    Stats,
    /// Show help: help
    Help,
    /// Leave the shell: exit | quit
    Exit,
}

/// Command result
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Print the output and keep reading
    Continue(String),
    /// Print the output and leave the shell
    Exit(String),
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            return Ok(None);
        };

        let command = match *cmd {
            "set" => Self::parse_set(args)?,
            "get" => Self::Get {
                key: Self::single_key(args, "get")?,
            },
            "delete" => Self::Delete {
                key: Self::single_key(args, "delete")?,
            },
            "exists" => Self::Exists {
                key: Self::single_key(args, "exists")?,
            },
            "keys" => Self::Keys,
            "size" => Self::Size,
            "cleanup" => Self::Cleanup,
            "stats" => Self::Stats,
            "help" => Self::Help,
            "exit" | "quit" => Self::Exit,
            _ => {
                return Err(anyhow!(
                    "Unknown command: '{}'. Type 'help' for available commands.",
                    cmd
                ))
            }
        };

        Ok(Some(command))
    }

    fn parse_set(args: &[&str]) -> Result<Self> {
        let [key, value, ttl] = args else {
            return Err(anyhow!("Usage: set <key> <value> <ttl>"));
        };
        let ttl = parse_ttl(ttl).with_context(|| format!("Invalid TTL '{}'", ttl))?;

        Ok(Self::Set {
            key: key.to_string(),
            value: infer_value(value),
            ttl,
        })
    }

    fn single_key(args: &[&str], name: &str) -> Result<String> {
        match args {
            [key] => Ok(key.to_string()),
            _ => Err(anyhow!("Usage: {} <key>", name)),
        }
    }

    /// Runs the command against the cache.
    pub async fn execute(self, cache: &Cache<Value>) -> CommandResult {
        let output = match self {
            Self::Set { key, value, ttl } => {
                let shown = format_value(&value);
                cache.set(key.clone(), value, ttl).await;
                format!("Key '{}' set to {} with TTL {:?}", key, shown, ttl)
            }
            Self::Get { key } => match cache.get(&key).await {
                Some(value) => format_value(&value),
                None => format!("Key '{}' not found or expired", key),
            },
            Self::Delete { key } => {
                if cache.delete(&key).await {
                    format!("Key '{}' deleted", key)
                } else {
                    format!("Key '{}' was not present", key)
                }
            }
            Self::Keys => format_keys(cache.keys().await),
            Self::Exists { key } => {
                if cache.exists(&key).await {
                    format!("Key '{}' exists", key)
                } else {
                    format!("Key '{}' does not exist or has expired", key)
                }
            }
            Self::Size => format!("{} live entries", cache.size().await),
            Self::Cleanup => format!("Removed {} expired entries", cache.cleanup().await),
            Self::Stats => {
                let stats = cache.stats().await;
                format!(
                    "entries:     {}\nhits:        {}\nmisses:      {}\nevictions:   {}\nexpirations: {}\nhit rate:    {:.2}",
                    stats.total_entries,
                    stats.hits,
                    stats.misses,
                    stats.evictions,
                    stats.expirations,
                    stats.hit_rate()
                )
            }
            Self::Help => general_help(),
            Self::Exit => return CommandResult::Exit("Shutting down...".to_string()),
        };

        CommandResult::Continue(output)
    }
}

/// Guesses the type of a literal typed at the prompt.
///
/// Tries an integer, then a finite float, then a boolean, and falls back
/// to the raw string.
pub fn infer_value(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Some(float) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(float);
    }
    match raw {
        "t" | "T" | "true" | "TRUE" | "True" => Value::Bool(true),
        "f" | "F" | "false" | "FALSE" | "False" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

/// Renders a value for display: strings raw, scalars plain, anything else
/// as indented JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(_) | Value::Bool(_) => value.to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn format_keys(mut keys: Vec<String>) -> String {
    if keys.is_empty() {
        return "Cache is empty".to_string();
    }
    keys.sort_unstable();

    let mut out = String::from("Keys in cache:");
    for (i, key) in keys.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, key));
    }
    out
}

fn general_help() -> String {
    r#"Available commands:
  set <key> <value> <ttl>   store a value (ttl like 300ms, 5m, 1h30m)
  get <key>                 read a value
  delete <key>              remove a key
  keys                      list live keys
  exists <key>              check whether a key is live
  size                      count live entries
  cleanup                   remove expired entries now
  stats                     show hit/miss/eviction counters
  help                      show this help
  exit, quit                leave the shell

Examples:
  set vladivostok 2000 5m   integer value for five minutes
  set chita city 1h         string value for one hour
  set samara true 30m       boolean value for thirty minutes"#
        .to_string()
}
