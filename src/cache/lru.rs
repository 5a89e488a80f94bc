//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == Recency Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Each touch stamps the key with a monotonically increasing sequence number:
/// - `positions` maps key -> stamp for direct lookup
/// - `order` maps stamp -> key, so the smallest stamp is the least recently used
///
/// A key holds exactly one stamp at a time. Not synchronized; the owning cache
/// keeps it behind its recency lock.
#[derive(Debug)]
pub struct RecencyTracker<K> {
    positions: HashMap<K, u64>,
    order: BTreeMap<u64, K>,
    next_stamp: u64,
}

impl<K> Default for RecencyTracker<K> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
            order: BTreeMap::new(),
            next_stamp: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> RecencyTracker<K> {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if it is not tracked.
    pub fn touch(&mut self, key: &K) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        if let Some(previous) = self.positions.insert(key.clone(), stamp) {
            self.order.remove(&previous);
        }
        self.order.insert(stamp, key.clone());
    }

    // == Remove ==
    /// Stops tracking a key. Returns false if it was not tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.positions.remove(key) {
            Some(stamp) => {
                self.order.remove(&stamp);
                true
            }
            None => false,
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.positions.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.first_key_value().map(|(_, key)| key)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.values()
    }
}
