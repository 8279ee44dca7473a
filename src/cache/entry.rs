//! Cache Entry Module
//!
//! Defines the structure for individual cached upstream responses.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A cached upstream payload with its expiry.
///
/// The payload is shared behind an `Arc` so cache hits hand out a cheap clone
/// of the exact tree that was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The parsed upstream response body
    pub value: Arc<Value>,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped at `now_ms` that lives for `ttl_ms`.
    pub fn new(value: Arc<Value>, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now_ms` reaches its expiration time.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as `0`.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(Arc::new(json!({"docs": []})), 1_000, 600_000);

        assert_eq!(*entry.value, json!({"docs": []}));
        assert_eq!(entry.expires_at, 601_000);
        assert!(!entry.is_expired_at(1_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(Arc::new(json!(1)), 0, 1_000);

        assert!(!entry.is_expired_at(999));
        assert!(entry.is_expired_at(1_000), "Entry should be expired at boundary");
        assert!(entry.is_expired_at(5_000));
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let entry = CacheEntry::new(Arc::new(json!(null)), 42, 0);
        assert!(entry.is_expired_at(42));
    }

    #[test]
    fn test_expiry_saturates() {
        let entry = CacheEntry::new(Arc::new(json!("v")), u64::MAX - 1, 10);
        assert_eq!(entry.expires_at, u64::MAX);
    }

    #[test]
    fn test_current_timestamp_is_monotonic_enough() {
        let a = current_timestamp_ms();
        let b = current_timestamp_ms();
        assert!(b >= a);
    }
}
