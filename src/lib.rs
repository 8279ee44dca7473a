//! Catalog Proxy - A read-through caching proxy for the Open Library API
//!
//! Forwards author and work lookups upstream, caches the JSON responses with
//! TTL expiration and LRU eviction, and reshapes them for book-management
//! clients.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use upstream::CachedFetcher;
