//! Remote watch-list endpoints.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};

use super::WatchlistError;
use quoteboard_market_data::{Quote, DEFAULT_TIMEOUT};

/// Default worker hosting the watch list.
pub const DEFAULT_WATCHLIST_URL: &str = "https://raspy-bush-6713.zangjichao.workers.dev";

/// CRUD surface of the watch-list service.
#[async_trait]
pub trait WatchlistBackend: Send + Sync {
    /// Current list, already priced by the service.
    async fn list(&self) -> Result<Vec<Quote>, WatchlistError>;

    async fn add(&self, symbol: &str) -> Result<(), WatchlistError>;

    async fn delete(&self, symbol: &str) -> Result<(), WatchlistError>;
}

/// `GET /stocks`, `GET /add?symbol=`, `GET /delete?symbol=` over HTTP.
pub struct HttpWatchlistBackend {
    client: Client,
    base_url: String,
}

impl HttpWatchlistBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Turn a non-OK response into `Rejected` with the body as the message.
    async fn check(response: Response) -> Result<Response, WatchlistError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            text.trim().to_string()
        };
        Err(WatchlistError::Rejected(message))
    }

    async fn mutate(&self, path: &str, symbol: &str) -> Result<(), WatchlistError> {
        let url = self.endpoint(path);
        debug!("Watch list: GET {}?symbol={}", url, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

impl Default for HttpWatchlistBackend {
    fn default() -> Self {
        Self::new(DEFAULT_WATCHLIST_URL)
    }
}

#[async_trait]
impl WatchlistBackend for HttpWatchlistBackend {
    async fn list(&self) -> Result<Vec<Quote>, WatchlistError> {
        let url = self.endpoint("stocks");
        debug!("Watch list: GET {}", url);

        let response = Self::check(self.client.get(&url).send().await?).await?;
        let body = response.text().await?;

        let quotes: Vec<Quote> = serde_json::from_str(&body)
            .map_err(|e| WatchlistError::MalformedResponse(e.to_string()))?;
        Ok(quotes.into_iter().map(Quote::normalized).collect())
    }

    async fn add(&self, symbol: &str) -> Result<(), WatchlistError> {
        self.mutate("add", symbol).await
    }

    async fn delete(&self, symbol: &str) -> Result<(), WatchlistError> {
        self.mutate("delete", symbol).await
    }
}
