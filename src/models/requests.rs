//! Request DTOs for the proxy API
//!
//! Query-string parameters accepted by the catalog routes.
//!
//! Handlers extract the raw query as ordered pairs and build these from it,
//! so unknown or repeated parameters never reject a request. When a name
//! repeats, its first value wins.

use crate::config::MAX_PAGE_SIZE;

/// Raw query-string pairs in request order
pub type QueryPairs = [(String, String)];

fn first_value(pairs: &QueryPairs, name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

/// Query string for author search (GET /author?query=...)
#[derive(Debug, Clone, Default)]
pub struct AuthorSearchParams {
    /// Free-text author name
    pub query: Option<String>,
}

impl AuthorSearchParams {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            query: first_value(pairs, "query"),
        }
    }

    /// Returns the trimmed search term, or None when it is missing or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// Query string for an author's works listing (GET /author/:key/works?limit=...)
///
/// `limit` is kept as raw text so that a malformed value falls back to the
/// configured page size instead of rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct WorksParams {
    pub limit: Option<String>,
}

impl WorksParams {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            limit: first_value(pairs, "limit"),
        }
    }

    /// Resolves the page size: the caller's limit if it parses, otherwise
    /// `default_size`, clamped to [1, 500] either way.
    pub fn resolve_limit(&self, default_size: u32) -> u32 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(default_size as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as u32
    }
}
