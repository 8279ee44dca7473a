//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and lazy TTL
//! expiration.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Bounded response cache keyed by upstream URL.
///
/// Every entry gets the same fixed TTL. Expiry is lazy: a stale entry is only
/// dropped when a lookup touches it, or when LRU pressure evicts it first.
/// Lookups never fail; a missing or stale key is simply `None`.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of resident entries
    capacity: usize,
    /// Lifetime applied to every stored entry, in milliseconds
    ttl_ms: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries that each
    /// live for `ttl_ms` milliseconds.
    pub fn new(capacity: usize, ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            ttl_ms,
        }
    }

    // == Get ==
    /// Returns the cached payload for `key` if present and unexpired.
    pub fn get(&mut self, key: &str) -> Option<Arc<Value>> {
        self.get_at(key, current_timestamp_ms())
    }

    /// [`get`](Self::get) evaluated at an explicit clock reading.
    ///
    /// A hit moves the key to the most recently used position. A stale entry
    /// is removed and reported as absent.
    pub fn get_at(&mut self, key: &str, now_ms: u64) -> Option<Arc<Value>> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            trace!(key, "cache miss");
            return None;
        };

        if entry.is_expired_at(now_ms) {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            trace!(key, "cache entry expired");
            return None;
        }

        let value = Arc::clone(&entry.value);
        self.lru.touch(key);
        self.stats.record_hit();
        trace!(key, "cache hit");
        Some(value)
    }

    // == Set ==
    /// Stores `value` under `key` with a fresh expiry.
    pub fn set(&mut self, key: String, value: impl Into<Arc<Value>>) {
        self.set_at(key, value, current_timestamp_ms());
    }

    /// [`set`](Self::set) evaluated at an explicit clock reading.
    ///
    /// Inserts or replaces at the most recently used position, then evicts the
    /// single least recently used entry if the store is over capacity.
    pub fn set_at(&mut self, key: String, value: impl Into<Arc<Value>>, now_ms: u64) {
        let entry = CacheEntry::new(value.into(), now_ms, self.ttl_ms);
        self.lru.touch(&key);
        self.entries.insert(key, entry);

        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                trace!(key = %evicted, "cache entry evicted");
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Inspection ==
    /// Returns whether `key` is resident, expired or not, without touching
    /// recency or statistics.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns resident keys from least to most recently used.
    pub fn keys_by_recency(&self) -> Vec<&str> {
        self.lru.keys_oldest_first()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Returns the current number of resident entries, including stale ones
    /// that have not been looked up yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
