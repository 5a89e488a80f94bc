//! Expiry Tracker Module
//!
//! Absolute expiry deadlines for keys written with a TTL.

use std::hash::Hash;

use dashmap::DashMap;

use crate::error::{CacheError, Result};

// == Expiry Tracker ==
/// Maps keys to their absolute expiry timestamp (Unix epoch seconds).
///
/// A key with no entry never expires.
#[derive(Debug)]
pub struct ExpiryTracker<K: Eq + Hash> {
    deadlines: DashMap<K, i64>,
}

impl<K: Eq + Hash> Default for ExpiryTracker<K> {
    fn default() -> Self {
        Self {
            deadlines: DashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> ExpiryTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            deadlines: DashMap::with_capacity(capacity),
        }
    }

    // == Deadline ==
    /// Computes `now + ttl_secs`, failing if the result is not representable.
    ///
    /// A non-positive TTL yields a deadline at or before `now`.
    pub fn deadline(now: i64, ttl_secs: i64) -> Result<i64> {
        now.checked_add(ttl_secs).ok_or_else(|| {
            CacheError::Internal(format!(
                "ttl of {ttl_secs}s overflows the expiry timestamp"
            ))
        })
    }

    // == Record ==
    /// Stores the expiry deadline for a key, replacing any previous one.
    pub fn record(&self, key: K, expires_at: i64) {
        self.deadlines.insert(key, expires_at);
    }

    // == Clear ==
    /// Drops the deadline for a key. Returns true if one was present.
    pub fn clear(&self, key: &K) -> bool {
        self.deadlines.remove(key).is_some()
    }

    // == Is Expired ==
    /// Checks whether the key's deadline is at or before `now`.
    ///
    /// Keys without a deadline never expire.
    pub fn is_expired(&self, key: &K, now: i64) -> bool {
        self.expires_at(key)
            .is_some_and(|expires_at| expires_at <= now)
    }

    /// Returns the recorded deadline for a key, if any.
    pub fn expires_at(&self, key: &K) -> Option<i64> {
        self.deadlines.get(key).map(|entry| *entry.value())
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<K> {
        self.deadlines.iter().map(|entry| entry.key().clone()).collect()
    }
}
