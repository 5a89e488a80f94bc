//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// `NotFound` and `Expired` are kept apart so callers can tell a stale key
/// from an absent one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key never existed, or was deleted, evicted or already reclaimed
    #[error("key not found")]
    NotFound,

    /// Key carried a TTL and its deadline has passed
    #[error("key expired")]
    Expired,

    /// Unexpected failure inside the cache
    #[error("internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Returns true for [`CacheError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound)
    }

    /// Returns true for [`CacheError::Expired`].
    pub fn is_expired(&self) -> bool {
        matches!(self, CacheError::Expired)
    }

    /// Returns true for [`CacheError::Internal`].
    pub fn is_internal(&self) -> bool {
        matches!(self, CacheError::Internal(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        assert!(CacheError::NotFound.is_not_found());
        assert!(!CacheError::NotFound.is_expired());
        assert!(CacheError::Expired.is_expired());
        assert!(CacheError::Internal("boom".to_string()).is_internal());
        assert!(!CacheError::Expired.is_internal());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(CacheError::NotFound.to_string(), "key not found");
        assert_eq!(CacheError::Expired.to_string(), "key expired");
        assert_eq!(
            CacheError::Internal("ttl overflow".to_string()).to_string(),
            "internal error: ttl overflow"
        );
    }
}
