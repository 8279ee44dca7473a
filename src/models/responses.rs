//! Response DTOs for the proxy API
//!
//! Defines the client-facing shapes the upstream payloads are mapped into.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// One author search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorResult {
    /// Author key without the `/authors/` prefix, e.g. `OL25712A`
    pub id: Option<String>,
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub top_work: Option<String>,
    pub work_count: u64,
}

/// One entry of an author's works listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSummary {
    /// Work key without the `/works/` prefix
    pub id: Option<String>,
    pub title: Option<String>,
    /// Author keys; an entry is null when upstream omitted the key
    pub authors: Vec<Option<String>>,
    /// Date string or bare year, exactly as upstream gave it
    pub first_publish_date: Option<Value>,
    pub subjects: Vec<String>,
    pub series: Option<String>,
    pub cover_url: Option<String>,
}

/// External identifiers of a work
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifiers {
    /// ISBN-10 and ISBN-13 values across all editions, first-seen order
    pub isbn: Vec<String>,
    pub openlibrary: Option<String>,
}

/// Full work detail (GET /work/:workKey)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkDetail {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub subjects: Vec<String>,
    pub series: Option<String>,
    pub authors: Vec<Option<String>>,
    pub identifiers: Identifiers,
    pub cover_url: Option<String>,
}

/// Response body for GET /author
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSearchResponse {
    pub authors: Vec<AuthorResult>,
}

/// Response body for GET /author/:authorKey/works
#[derive(Debug, Clone, Serialize)]
pub struct AuthorWorksResponse {
    #[serde(rename = "authorKey")]
    pub author_key: String,
    pub works: Vec<WorkSummary>,
    /// Upstream's total count, or the number of works returned if absent
    pub total: u64,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            ok: true,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// False when caching is disabled; all counters are then zero
    pub enabled: bool,
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    pub total_entries: usize,
    pub capacity: usize,
    pub ttl_ms: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Builds the response from store statistics and limits.
    pub fn new(stats: &CacheStats, capacity: usize, ttl_ms: u64) -> Self {
        Self {
            enabled: true,
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            capacity,
            ttl_ms,
            hit_rate: stats.hit_rate(),
        }
    }

    /// Response reported when no cache store exists.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            hits: 0,
            misses: 0,
            expirations: 0,
            evictions: 0,
            total_entries: 0,
            capacity: 0,
            ttl_ms: 0,
            hit_rate: 0.0,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
