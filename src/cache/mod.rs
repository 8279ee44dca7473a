//! Cache Module
//!
//! Provides the in-memory response cache with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default maximum number of resident entries
pub const DEFAULT_CAPACITY: usize = 500;

/// Default entry lifetime in milliseconds (10 minutes)
pub const DEFAULT_TTL_MS: u64 = 600_000;
