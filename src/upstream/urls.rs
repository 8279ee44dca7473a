//! Upstream URL construction.
//!
//! The URL strings built here double as cache keys, so the same request
//! parameters must always produce the same string.

use reqwest::Url;

use crate::error::ProxyError;

/// Editions fetched alongside a work to collect its ISBNs
pub const EDITIONS_PAGE_SIZE: u32 = 50;

// == Catalog URLs ==
/// Builds canonical upstream URLs from the configured API and covers hosts.
#[derive(Debug, Clone)]
pub struct CatalogUrls {
    api: Url,
    covers: Url,
}

impl CatalogUrls {
    /// Parses both base URLs. Each must be an absolute http(s) URL.
    pub fn new(api_base: &str, covers_base: &str) -> Result<Self, ProxyError> {
        Ok(Self {
            api: parse_base(api_base)?,
            covers: parse_base(covers_base)?,
        })
    }

    /// `/search/authors.json?q={query}`
    pub fn author_search(&self, query: &str) -> String {
        let mut url = join(&self.api, &["search", "authors.json"]);
        url.query_pairs_mut().append_pair("q", query);
        url.into()
    }

    /// `/authors/{key}/works.json?limit={limit}`
    pub fn author_works(&self, author_key: &str, limit: u32) -> String {
        let mut url = join(&self.api, &["authors", author_key, "works.json"]);
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        url.into()
    }

    /// `/works/{key}.json`
    pub fn work(&self, work_key: &str) -> String {
        let file = format!("{}.json", work_key);
        join(&self.api, &["works", file.as_str()]).into()
    }

    /// `/works/{key}/editions.json?limit=50`
    pub fn work_editions(&self, work_key: &str) -> String {
        let mut url = join(&self.api, &["works", work_key, "editions.json"]);
        url.query_pairs_mut()
            .append_pair("limit", &EDITIONS_PAGE_SIZE.to_string());
        url.into()
    }

    /// Large cover image for a numeric cover id: `/b/id/{id}-L.jpg`
    pub fn cover_by_id(&self, cover_id: &str) -> String {
        let file = format!("{}-L.jpg", cover_id);
        join(&self.covers, &["b", "id", file.as_str()]).into()
    }

    /// Cover image addressed by edition id and size suffix: `/b/olid/{cover}`
    pub fn cover_by_olid(&self, cover: &str) -> String {
        join(&self.covers, &["b", "olid", cover]).into()
    }
}

fn parse_base(raw: &str) -> Result<Url, ProxyError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ProxyError::InvalidConfig(format!("bad upstream URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ProxyError::InvalidConfig(format!(
            "upstream URL '{}' must be an absolute http(s) URL",
            raw
        )));
    }
    Ok(url)
}

/// Appends percent-encoded path segments to `base`.
fn join(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // parse_base rejects cannot-be-a-base URLs, so this always succeeds.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
