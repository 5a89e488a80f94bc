//! Configuration Module
//!
//! Construction-time settings for a cache instance.

use std::env;

use serde::{Deserialize, Deserializer};

/// Capacity used when none is given, or when the given one is not positive.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Environment variable read by [`CacheConfig::from_env`].
pub const CAPACITY_ENV_VAR: &str = "KV_CACHE_CAPACITY";

/// Cache configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of keys the cache can hold
    #[serde(default = "default_capacity", deserialize_with = "deserialize_capacity")]
    pub capacity: usize,
}

impl CacheConfig {
    /// Creates a config from a raw capacity; non-positive values fall back to
    /// [`DEFAULT_CAPACITY`].
    pub fn new(capacity: i64) -> Self {
        Self {
            capacity: normalize_capacity(capacity),
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `KV_CACHE_CAPACITY` - Maximum number of keys (default: 1024)
    pub fn from_env() -> Self {
        let capacity = env::var(CAPACITY_ENV_VAR)
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(0);
        Self::new(capacity)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

fn normalize_capacity(capacity: i64) -> usize {
    if capacity <= 0 {
        DEFAULT_CAPACITY
    } else {
        usize::try_from(capacity).unwrap_or(usize::MAX)
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn deserialize_capacity<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(normalize_capacity(raw))
}
