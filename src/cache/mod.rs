//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod clock;
mod expiry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use expiry::ExpiryTracker;
pub use lru::RecencyTracker;
pub use stats::CacheStats;
pub use store::Cache;

pub(crate) use stats::StatsRecorder;
