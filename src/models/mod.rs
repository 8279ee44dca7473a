//! Request and Response models for the proxy API
//!
//! This module defines the DTOs used for query strings and response bodies,
//! and the mappers that fill the response shapes from upstream JSON.

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use mappers::{map_author_result, map_work_detail, map_work_summary, series_from_subjects};
pub use requests::{AuthorSearchParams, WorksParams};
pub use responses::{
    AuthorResult, AuthorSearchResponse, AuthorWorksResponse, ErrorResponse, HealthResponse,
    Identifiers, StatsResponse, WorkDetail, WorkSummary,
};
