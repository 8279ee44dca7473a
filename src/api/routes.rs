//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    author_search_handler, author_works_handler, cover_handler, health_handler, stats_handler,
    work_detail_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check
/// - `GET /author?query=` - Author search
/// - `GET /author/:author_key/works?limit=` - Works by author
/// - `GET /work/:work_key` - Work detail with ISBNs
/// - `GET /cover/:cover` - Redirect to the cover image host
/// - `GET /stats` - Cache statistics
///
/// All routes are nested under the configured base path when one is set.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    let routes = Router::new()
        .route("/health", get(health_handler))
        .route("/author", get(author_search_handler))
        .route("/author/:author_key/works", get(author_works_handler))
        .route("/work/:work_key", get(work_detail_handler))
        .route("/cover/:cover", get(cover_handler))
        .route("/stats", get(stats_handler));

    let base_path = state.config.base_path.clone();
    let app = if base_path.is_empty() {
        routes
    } else {
        Router::new().nest(&base_path, routes)
    };

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for browser tooling: the configured origin, GET only.
fn cors_layer(origin: &str) -> CorsLayer {
    let origin = origin.trim();
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                warn!(origin, "CORS_ORIGIN is not a valid header value, allowing any origin");
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
