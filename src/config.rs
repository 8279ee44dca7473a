//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL_MS};

/// Upper bound for any works page size, configured or requested
pub const MAX_PAGE_SIZE: u32 = 500;

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Unparseable numbers fall back to their default.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub port: u16,
    /// Default page size for author works listings, within [1, 500]
    pub page_size: u32,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Whether upstream responses are cached at all
    pub cache_enabled: bool,
    /// Lifetime of each cached response in milliseconds
    pub cache_ttl_ms: u64,
    /// Maximum number of cached responses
    pub cache_max: usize,
    /// Value sent as `Access-Control-Allow-Origin`
    pub cors_origin: String,
    /// Prefix all routes are mounted under, empty for the root
    pub base_path: String,
    /// Base URL of the upstream catalog API
    pub upstream_base_url: String,
    /// Base URL of the upstream cover image host
    pub covers_base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `OL_PAGE_SIZE` - Default works page size, clamped to [1, 500] (default: 200)
    /// - `LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
    /// - `ENABLE_CACHE` - `true` enables caching, anything else disables it (default: true)
    /// - `CACHE_TTL_MS` - Cache entry lifetime in milliseconds (default: 600000)
    /// - `CACHE_MAX` - Maximum cached responses (default: 500)
    /// - `CORS_ORIGIN` - Allowed CORS origin (default: *)
    /// - `BASE_PATH` - Route prefix such as `/books` (default: empty)
    /// - `OL_BASE_URL` - Upstream API base (default: https://openlibrary.org)
    /// - `OL_COVERS_URL` - Upstream covers base (default: https://covers.openlibrary.org)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            page_size: parse_var(&lookup, "OL_PAGE_SIZE")
                .map(|size: i64| size.clamp(1, MAX_PAGE_SIZE as i64) as u32)
                .unwrap_or(defaults.page_size),
            log_level: lookup("LOG_LEVEL")
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.log_level),
            cache_enabled: lookup("ENABLE_CACHE")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.cache_enabled),
            cache_ttl_ms: parse_var(&lookup, "CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            cache_max: parse_var(&lookup, "CACHE_MAX").unwrap_or(defaults.cache_max),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            base_path: lookup("BASE_PATH")
                .map(|v| normalize_base_path(&v))
                .unwrap_or(defaults.base_path),
            upstream_base_url: lookup("OL_BASE_URL").unwrap_or(defaults.upstream_base_url),
            covers_base_url: lookup("OL_COVERS_URL").unwrap_or(defaults.covers_base_url),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            page_size: 200,
            log_level: "info".to_string(),
            cache_enabled: true,
            cache_ttl_ms: DEFAULT_TTL_MS,
            cache_max: DEFAULT_CAPACITY,
            cors_origin: "*".to_string(),
            base_path: String::new(),
            upstream_base_url: "https://openlibrary.org".to_string(),
            covers_base_url: "https://covers.openlibrary.org".to_string(),
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|v| v.trim().parse().ok())
}

/// Strips trailing slashes and ensures a leading one, so `books/` becomes
/// `/books` and `/` becomes the empty root prefix.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
