//! Upstream Fetcher
//!
//! Single-attempt JSON GET against the upstream catalog.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::UpstreamError;

// == Fetcher Trait ==
/// Anything that can turn an upstream URL into a parsed JSON body.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Issues one GET for `url` and parses the body.
    ///
    /// Fails with [`UpstreamError::Status`] on a non-2xx status and with
    /// [`UpstreamError::Parse`] when the body is not JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value, UpstreamError>;
}

// == HTTP Fetcher ==
/// [`JsonFetcher`] backed by a shared reqwest client with default settings.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, UpstreamError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "upstream responded");

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
