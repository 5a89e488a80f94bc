//! Cache Store Module
//!
//! Main cache engine combining concurrent map storage with LRU tracking and TTL expiration.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::cache::{CacheStats, Clock, ExpiryTracker, RecencyTracker, StatsRecorder, SystemClock};
use crate::config::{CacheConfig, DEFAULT_CAPACITY};
use crate::error::{CacheError, Result};
use crate::storage::Storage;

// == Cache ==
/// Bounded in-memory cache with LRU eviction and lazy TTL expiration.
///
/// Values and expiry deadlines live in concurrent maps. Every mutation of
/// either map happens while holding the recency lock, which makes the
/// capacity check, eviction and insert of a `set` one atomic unit. Hits read
/// the value map without the lock and only take it to refresh recency.
///
/// Share between threads with `Arc<Cache<K, V>>`.
#[derive(Debug)]
pub struct Cache<K: Eq + Hash, V> {
    /// Key-value storage
    values: DashMap<K, V>,
    /// Absolute expiry deadlines for TTL keys
    expiry: ExpiryTracker<K>,
    /// LRU access tracker, also the write lock for both maps
    recency: Mutex<RecencyTracker<K>>,
    /// Performance statistics
    stats: StatsRecorder,
    /// Maximum number of keys allowed
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructors ==
    /// Creates a cache with the default capacity of 1024 keys.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache holding at most `capacity` keys; 0 means the default.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = i64::try_from(capacity).unwrap_or(i64::MAX);
        Self::with_config(CacheConfig::new(capacity))
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a cache that reads time from `clock`.
    pub fn with_clock<C: Clock + 'static>(config: CacheConfig, clock: C) -> Self {
        let capacity = if config.capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            config.capacity
        };

        let preallocate = capacity.min(DEFAULT_CAPACITY);

        Self {
            values: DashMap::with_capacity(preallocate),
            expiry: ExpiryTracker::with_capacity(preallocate),
            recency: Mutex::new(RecencyTracker::new()),
            stats: StatsRecorder::default(),
            capacity,
            clock: Arc::new(clock),
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// An expired key is reclaimed and reported as [`CacheError::Expired`];
    /// the next lookup of it reports [`CacheError::NotFound`]. A hit marks the
    /// key as most recently used.
    pub fn get(&self, key: &K) -> Result<V> {
        let now = self.clock.now();

        if self.expiry.is_expired(key, now) {
            let mut recency = self.recency.lock();
            // A concurrent write may have refreshed the deadline meanwhile.
            if self.expiry.is_expired(key, now) {
                self.reclaim(&mut recency, key);
                self.stats.record_expiration();
                debug!(now, "reclaimed expired key on get");
                return Err(CacheError::Expired);
            }
        }

        let value = match self.values.get(key) {
            Some(entry) => entry.value().clone(),
            None => {
                self.stats.record_miss();
                return Err(CacheError::NotFound);
            }
        };

        self.refresh(key);

        self.stats.record_hit();
        trace!("cache hit");
        Ok(value)
    }

    // == Set ==
    /// Stores a value without a TTL.
    ///
    /// A deadline recorded by an earlier [`Cache::set_with_ttl`] on a still
    /// live key is kept; only the value and recency change.
    pub fn set(&self, key: K, value: V) -> Result<()> {
        self.write(key, value, None)
    }

    // == Set With TTL ==
    /// Stores a value that expires `ttl_secs` seconds from now.
    ///
    /// A non-positive TTL stores an entry that is already expired.
    pub fn set_with_ttl(&self, key: K, value: V, ttl_secs: i64) -> Result<()> {
        let expires_at =
            ExpiryTracker::<K>::deadline(self.clock.now(), ttl_secs).inspect_err(|err| {
                warn!(error = %err, ttl_secs, "rejected set_with_ttl");
            })?;
        self.write(key, value, Some(expires_at))
    }

    // == Delete ==
    /// Removes a key together with its deadline and recency position.
    ///
    /// Returns [`CacheError::NotFound`] and changes nothing if the key is absent.
    pub fn delete(&self, key: &K) -> Result<()> {
        let mut recency = self.recency.lock();

        if self.values.remove(key).is_none() {
            return Err(CacheError::NotFound);
        }
        self.expiry.clear(key);
        recency.remove(key);

        trace!("deleted key");
        Ok(())
    }

    // == TTL Remaining ==
    /// Returns the seconds left before a key expires, or None if it has no TTL.
    ///
    /// Read-only: neither reclaims an expired key nor refreshes recency.
    pub fn ttl_remaining(&self, key: &K) -> Result<Option<u64>> {
        if !self.values.contains_key(key) {
            return Err(CacheError::NotFound);
        }

        let now = self.clock.now();
        match self.expiry.expires_at(key) {
            None => Ok(None),
            Some(expires_at) if expires_at <= now => Err(CacheError::Expired),
            Some(expires_at) => Ok(Some(expires_at.abs_diff(now))),
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    /// Returns the current number of stored keys, expired-but-unreclaimed included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Internals ==
    /// Marks a key as most recently used if it is still stored.
    ///
    /// A key deleted or evicted between a lock-free read and this call must
    /// not be put back into the recency tracker.
    fn refresh(&self, key: &K) {
        let mut recency = self.recency.lock();
        if self.values.contains_key(key) {
            recency.touch(key);
        }
    }

    fn write(&self, key: K, value: V, expires_at: Option<i64>) -> Result<()> {
        let now = self.clock.now();
        let mut recency = self.recency.lock();

        // Writing over an expired key starts it afresh. Not counted in
        // `CacheStats::expirations`, which tracks `get` outcomes only.
        if self.expiry.is_expired(&key, now) {
            self.reclaim(&mut recency, &key);
            debug!(now, "reclaimed expired key on write");
        }

        if !self.values.contains_key(&key) {
            self.make_room(&mut recency)?;
        }

        if let Some(expires_at) = expires_at {
            self.expiry.record(key.clone(), expires_at);
        }
        self.values.insert(key.clone(), value);
        recency.touch(&key);

        trace!(ttl = expires_at.is_some(), "stored key");
        Ok(())
    }

    /// Evicts least recently used keys until one more key fits.
    ///
    /// Caller must hold the recency lock.
    fn make_room(&self, recency: &mut RecencyTracker<K>) -> Result<()> {
        while self.values.len() >= self.capacity {
            let Some(victim) = recency.evict_oldest() else {
                let err = CacheError::Internal(format!(
                    "store holds {} keys but the recency tracker is empty",
                    self.values.len()
                ));
                warn!(error = %err, capacity = self.capacity, "eviction failed");
                return Err(err);
            };

            self.expiry.clear(&victim);
            if self.values.remove(&victim).is_some() {
                self.stats.record_eviction();
                debug!(capacity = self.capacity, "evicted least recently used key");
            }
        }
        Ok(())
    }

    /// Removes every trace of a key. Caller must hold the recency lock.
    fn reclaim(&self, recency: &mut RecencyTracker<K>, key: &K) {
        self.values.remove(key);
        self.expiry.clear(key);
        recency.remove(key);
    }

    /// Returns the sizes of the recency and expiry trackers.
    #[cfg(test)]
    pub(crate) fn tracked_len(&self) -> (usize, usize) {
        (self.recency.lock().len(), self.expiry.len())
    }

    /// Checks that both trackers only hold stored keys and that every stored
    /// key has exactly one recency position.
    #[cfg(test)]
    pub(crate) fn trackers_consistent(&self) -> bool {
        let recency = self.recency.lock();
        recency.len() == self.values.len()
            && recency.keys().all(|key| self.values.contains_key(key))
            && self.expiry.keys().iter().all(|key| self.values.contains_key(key))
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Storage<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn get(&self, key: &K) -> Result<V> {
        Cache::get(self, key)
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        Cache::set(self, key, value)
    }

    fn set_with_ttl(&self, key: K, value: V, ttl_secs: i64) -> Result<()> {
        Cache::set_with_ttl(self, key, value, ttl_secs)
    }

    fn delete(&self, key: &K) -> Result<()> {
        Cache::delete(self, key)
    }
}
