//! Storage Contract
//!
//! The operations every key-value backend offers to embedding code.

use crate::error::Result;

/// A key-value store with optional per-key expiry.
///
/// [`crate::Cache`] is the in-memory implementation. Callers that only need
/// these four operations can take `&dyn Storage<K, V>` and stay independent
/// of the concrete backend.
pub trait Storage<K, V> {
    /// Returns the value for `key`.
    ///
    /// # Errors
    /// - [`crate::CacheError::NotFound`] if the key is absent
    /// - [`crate::CacheError::Expired`] if the key's TTL has elapsed
    fn get(&self, key: &K) -> Result<V>;

    /// Adds or replaces the value for `key`.
    fn set(&self, key: K, value: V) -> Result<()>;

    /// Adds or replaces the value for `key`, expiring it after `ttl_secs` seconds.
    fn set_with_ttl(&self, key: K, value: V, ttl_secs: i64) -> Result<()>;

    /// Removes `key`.
    ///
    /// # Errors
    /// - [`crate::CacheError::NotFound`] if the key is absent
    fn delete(&self, key: &K) -> Result<()>;
}
