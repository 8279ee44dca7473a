//! API Module
//!
//! HTTP handlers and routing for the catalog proxy.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /author?query=` - Search authors by name
//! - `GET /author/:author_key/works` - List an author's works
//! - `GET /work/:work_key` - Work detail including ISBNs
//! - `GET /cover/:cover` - Redirect to a cover image
//! - `GET /stats` - Cache statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
