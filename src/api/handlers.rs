//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint. Every catalog handler
//! builds an upstream URL, goes through the cached fetch and maps the result.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{
    map_author_result, map_work_detail, map_work_summary, AuthorSearchParams,
    AuthorSearchResponse, AuthorWorksResponse, HealthResponse, StatsResponse, WorkDetail,
    WorksParams,
};
use crate::upstream::{CachedFetcher, CatalogUrls};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-through access to the upstream catalog
    pub upstream: Arc<CachedFetcher>,
    /// Upstream URL builder
    pub urls: Arc<CatalogUrls>,
    /// Startup configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState around an existing orchestrator.
    pub fn new(config: Config, upstream: CachedFetcher) -> Result<Self> {
        let urls = CatalogUrls::new(&config.upstream_base_url, &config.covers_base_url)?;
        Ok(Self {
            upstream: Arc::new(upstream),
            urls: Arc::new(urls),
            config: Arc::new(config),
        })
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the HTTP fetcher and, when caching is enabled, the cache store.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.clone(), CachedFetcher::from_config(config))
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /author?query=...
///
/// Searches authors by name.
pub async fn author_search_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AuthorSearchResponse>> {
    let params = AuthorSearchParams::from_pairs(&pairs);
    let Some(term) = params.search_term() else {
        return Err(ProxyError::InvalidRequest("Missing query".to_string()));
    };
    debug!(term, "author search");

    let data = state.upstream.cached_fetch(&state.urls.author_search(term)).await?;
    let authors = array_field(&data, "docs")
        .iter()
        .map(map_author_result)
        .collect();

    Ok(Json(AuthorSearchResponse { authors }))
}

/// Handler for GET /author/:author_key/works?limit=...
///
/// Lists an author's works, one page of at most `limit` entries.
pub async fn author_works_handler(
    State(state): State<AppState>,
    Path(author_key): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AuthorWorksResponse>> {
    let author_key = catalog_key(author_key)?;
    let limit = WorksParams::from_pairs(&pairs).resolve_limit(state.config.page_size);
    let url = state.urls.author_works(&author_key, limit);

    let data = state.upstream.cached_fetch(&url).await?;
    let works: Vec<_> = array_field(&data, "entries")
        .iter()
        .map(|entry| map_work_summary(entry, &state.urls))
        .collect();
    let total = data
        .get("size")
        .and_then(Value::as_u64)
        .unwrap_or(works.len() as u64);

    Ok(Json(AuthorWorksResponse {
        author_key,
        works,
        total,
    }))
}

/// Handler for GET /work/:work_key
///
/// Fetches the work and its first page of editions, then merges them.
pub async fn work_detail_handler(
    State(state): State<AppState>,
    Path(work_key): Path<String>,
) -> Result<Json<WorkDetail>> {
    let work_key = catalog_key(work_key)?;
    let work = state.upstream.cached_fetch(&state.urls.work(&work_key)).await?;
    let editions = state
        .upstream
        .cached_fetch(&state.urls.work_editions(&work_key))
        .await?;

    Ok(Json(map_work_detail(
        &work,
        array_field(&editions, "entries"),
        &state.urls,
    )))
}

/// Handler for GET /cover/:cover
///
/// Redirects to the upstream cover image host; nothing is fetched or cached.
pub async fn cover_handler(
    State(state): State<AppState>,
    Path(cover): Path<String>,
) -> Result<impl IntoResponse> {
    let cover = catalog_key(cover)?;
    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, state.urls.cover_by_olid(&cover))],
    ))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    match state.upstream.snapshot().await {
        Some((stats, capacity, ttl_ms)) => Json(StatsResponse::new(&stats, capacity, ttl_ms)),
        None => Json(StatsResponse::disabled()),
    }
}

/// Rejects path keys that URL normalization would collapse (`.` and `..`).
fn catalog_key(key: String) -> Result<String> {
    if key.is_empty() || key.chars().all(|c| c == '.') {
        return Err(ProxyError::InvalidRequest("Invalid key".to_string()));
    }
    Ok(key)
}

/// Returns `doc[field]` as a slice, empty when missing or not an array.
fn array_field<'a>(doc: &'a Value, field: &str) -> &'a [Value] {
    doc.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
