//! KV Cache - An embeddable in-memory key-value cache
//!
//! Bounded by key count, with LRU eviction and lazily reclaimed per-key TTLs.
//!
//! ```
//! use kv_cache::{Cache, CacheError};
//!
//! let cache: Cache<String, String> = Cache::with_capacity(2);
//! cache.set("a".to_string(), "1".to_string())?;
//! assert_eq!(cache.get(&"a".to_string())?, "1");
//!
//! cache.set_with_ttl("b".to_string(), "2".to_string(), 0)?;
//! assert_eq!(cache.get(&"b".to_string()), Err(CacheError::Expired));
//! # Ok::<(), CacheError>(())
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod storage;

pub use cache::{Cache, CacheStats, Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use storage::Storage;
