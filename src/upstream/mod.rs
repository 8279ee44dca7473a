//! Upstream Module
//!
//! Talks to the upstream catalog: URL construction, the single-shot JSON
//! fetcher and the read-through cached fetch used by every handler.

mod cached;
mod fetcher;
mod urls;

pub use cached::CachedFetcher;
pub use fetcher::{HttpFetcher, JsonFetcher};
pub use urls::{CatalogUrls, EDITIONS_PAGE_SIZE};
