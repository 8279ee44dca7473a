//! Integration Tests for API Endpoints
//!
//! Drives the full router with the real HTTP fetcher against a mock
//! upstream catalog.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use catalog_proxy::{api::create_router, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// == Helper Functions ==

fn config_for(server: &MockServer) -> Config {
    Config {
        upstream_base_url: server.uri(),
        covers_base_url: "https://covers.example".to_string(),
        ..Config::default()
    }
}

fn create_test_app(config: &Config) -> Router {
    create_router(AppState::from_config(config).unwrap())
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_to_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Author Search ==

#[tokio::test]
async fn test_author_search_maps_and_caches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/authors.json"))
        .and(query_param("q", "terry pratchett"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numFound": 1,
            "docs": [{
                "key": "OL25712A",
                "name": "Terry Pratchett",
                "birth_date": "28 April 1948",
                "top_work": "Good Omens",
                "work_count": 412
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app(&config_for(&server));

    for _ in 0..2 {
        let response = get(&app, "/author?query=terry%20pratchett").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_to_json(response).await;
        assert_eq!(
            json,
            json!({"authors": [{
                "id": "OL25712A",
                "name": "Terry Pratchett",
                "birth_date": "28 April 1948",
                "top_work": "Good Omens",
                "work_count": 412
            }]})
        );
    }
}

#[tokio::test]
async fn test_author_search_missing_query_skips_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_test_app(&config_for(&server));
    let response = get(&app, "/author").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_to_json(response).await["error"], "Missing query");
}

#[tokio::test]
async fn test_author_search_repeated_query_uses_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/authors.json"))
        .and(query_param("q", "a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"docs": []})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app(&config_for(&server));
    let response = get(&app, "/author?query=a&query=b").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await, json!({"authors": []}));
}

// == Author Works ==

#[tokio::test]
async fn test_author_works_repeated_limit_uses_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors/OL1A/works.json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"size": 3, "entries": []})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app(&config_for(&server));
    let response = get(&app, "/author/OL1A/works?limit=1&limit=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await["total"], 3);
}

#[tokio::test]
async fn test_dot_segment_keys_are_bad_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_test_app(&config_for(&server));

    for uri in ["/author/%2E%2E/works", "/work/%2E%2E", "/cover/%2E%2E"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body_to_json(response).await["error"], "Invalid key");
    }
}

#[tokio::test]
async fn test_author_works_with_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors/OL25712A/works.json"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "size": 412,
            "entries": [{
                "key": "/works/OL45883W",
                "title": "Mort",
                "authors": [{"author": {"key": "/authors/OL25712A"}}],
                "subjects": ["Discworld series"],
                "covers": [8231856]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app(&config_for(&server));
    let response = get(&app, "/author/OL25712A/works?limit=20").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["authorKey"], "OL25712A");
    assert_eq!(json["total"], 412);
    assert_eq!(
        json["works"][0],
        json!({
            "id": "OL45883W",
            "title": "Mort",
            "authors": ["OL25712A"],
            "first_publish_date": null,
            "subjects": ["Discworld series"],
            "series": "Discworld series",
            "cover_url": "https://covers.example/b/id/8231856-L.jpg"
        })
    );
}

#[tokio::test]
async fn test_author_works_upstream_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors/OL0A/works.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let app = create_test_app(&config_for(&server));

    // Failures are not cached, so the second request goes upstream again.
    for _ in 0..2 {
        let response = get(&app, "/author/OL0A/works").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_to_json(response).await["error"], "OpenLibrary error 404");
    }

    let stats = body_to_json(get(&app, "/stats").await).await;
    assert_eq!(stats["total_entries"], 0);
}

// == Work Detail ==

#[tokio::test]
async fn test_work_detail_merges_editions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/OL45883W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "/works/OL45883W",
            "title": "Mort",
            "description": {"type": "/type/text", "value": "Death takes an apprentice."},
            "subjects": ["Fantasy"],
            "authors": [{"author": {"key": "/authors/OL25712A"}}],
            "covers": [8231856]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/works/OL45883W/editions.json"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                {"isbn_10": ["0552131067"], "isbn_13": ["9780552131063"]},
                {"isbn_13": ["9780552131063"]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_test_app(&config_for(&server));
    let first = body_to_json(get(&app, "/work/OL45883W").await).await;
    let second = body_to_json(get(&app, "/work/OL45883W").await).await;

    assert_eq!(first, second);
    assert_eq!(
        first,
        json!({
            "id": "OL45883W",
            "title": "Mort",
            "description": "Death takes an apprentice.",
            "subjects": ["Fantasy"],
            "series": null,
            "authors": ["OL25712A"],
            "identifiers": {
                "isbn": ["0552131067", "9780552131063"],
                "openlibrary": "OL45883W"
            },
            "cover_url": "https://covers.example/b/id/8231856-L.jpg"
        })
    );
}

#[tokio::test]
async fn test_work_detail_malformed_upstream_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/OL1W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let app = create_test_app(&config_for(&server));
    let response = get(&app, "/work/OL1W").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// == Cache Toggle ==

#[tokio::test]
async fn test_disabled_cache_forwards_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/OL45883W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "/works/OL45883W"})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/works/OL45883W/editions.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": []})))
        .expect(2)
        .mount(&server)
        .await;

    let config = Config {
        cache_enabled: false,
        ..config_for(&server)
    };
    let app = create_test_app(&config);

    for _ in 0..2 {
        assert_eq!(get(&app, "/work/OL45883W").await.status(), StatusCode::OK);
    }

    let stats = body_to_json(get(&app, "/stats").await).await;
    assert_eq!(stats["enabled"], false);
}

#[tokio::test]
async fn test_capacity_evicts_least_recent_response() {
    let server = MockServer::start().await;
    for key in ["OL1W", "OL2W"] {
        Mock::given(method("GET"))
            .and(path(format!("/works/{}.json", key)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": key})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/works/{}/editions.json", key)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": []})))
            .mount(&server)
            .await;
    }

    // Each work lookup stores two responses (work + editions).
    let config = Config {
        cache_max: 2,
        ..config_for(&server)
    };
    let app = create_test_app(&config);

    get(&app, "/work/OL1W").await;
    get(&app, "/work/OL2W").await;

    let stats = body_to_json(get(&app, "/stats").await).await;
    assert_eq!(stats["total_entries"], 2);
    assert_eq!(stats["evictions"], 2);
    assert_eq!(stats["capacity"], 2);
}

// == Misc Routes ==

#[tokio::test]
async fn test_cover_redirect_under_base_path() {
    let server = MockServer::start().await;
    let config = Config {
        base_path: "/books".to_string(),
        ..config_for(&server)
    };
    let app = create_test_app(&config);

    let response = get(&app, "/books/cover/OL7353617M-L.jpg").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://covers.example/b/olid/OL7353617M-L.jpg"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let app = create_test_app(&config_for(&server));

    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["ok"], true);
    assert!(json.get("timestamp").is_some());
}
