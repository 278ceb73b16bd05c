use std::time::Duration;

use futures::future::join_all;
use reqwest::{Client, StatusCode, Url};
use tracing::{info, warn};

use crate::config::ColumnConfig;
use crate::feed::{FeedResponse, Item};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid proxy base '{0}'")]
    InvalidProxyBase(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("proxy returned HTTP {0}")]
    Status(StatusCode),
    #[error("unreadable response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("conversion service error: {0}")]
    Service(String),
}

/// Builds the conversion proxy request for `feed_url`.
///
/// The feed URL is not validated, only percent-encoded into `rss_url`.
pub fn proxy_url(proxy_base: &str, feed_url: &str) -> Result<Url, FetchError> {
    Url::parse_with_params(proxy_base, &[("rss_url", feed_url)])
        .map_err(|_| FetchError::InvalidProxyBase(proxy_base.to_string()))
}

pub struct Fetcher {
    client: Client,
    proxy_base: String,
}

impl Fetcher {
    pub fn new(proxy_base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("TriColumnNews/1.0 (RSS Reader)")
            .build()?;

        Ok(Self {
            client,
            proxy_base: proxy_base.to_string(),
        })
    }

    pub fn proxy_base(&self) -> &str {
        &self.proxy_base
    }

    pub async fn fetch_feed_items(&self, feed_url: &str) -> Result<Vec<Item>, FetchError> {
        let url = proxy_url(&self.proxy_base, feed_url)?;
        info!("Fetching feed: {}", feed_url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        let parsed: FeedResponse = serde_json::from_slice(&bytes)?;

        if parsed.is_error() {
            let message = parsed
                .message
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(FetchError::Service(message));
        }

        let items = parsed.into_items();
        info!("Fetched {} items from {}", items.len(), feed_url);
        Ok(items)
    }

    /// Fetches every column's feed concurrently. Results are in column order;
    /// one failure does not affect the others.
    pub async fn fetch_all(&self, columns: &[ColumnConfig]) -> Vec<Result<Vec<Item>, FetchError>> {
        let results = join_all(
            columns
                .iter()
                .map(|column| self.fetch_feed_items(&column.url)),
        )
        .await;

        for (column, result) in columns.iter().zip(&results) {
            if let Err(e) = result {
                warn!("Failed to fetch feed '{}': {}", column.name, e);
            }
        }

        results
    }
}
