//! The watch list as a quote provider.

use std::sync::Arc;

use async_trait::async_trait;

use super::{WatchlistBackend, WatchlistError};
use quoteboard_market_data::provider::{FetchStrategy, ProviderCapabilities};
use quoteboard_market_data::{Market, MarketDataError, Quote, QuoteProvider};

const PROVIDER_ID: &str = "WATCHLIST";

/// Serves `/stocks` through the common provider interface so the watch-list
/// board refreshes exactly like the market boards.
pub struct WatchlistQuoteProvider {
    backend: Arc<dyn WatchlistBackend>,
}

impl WatchlistQuoteProvider {
    pub fn new(backend: Arc<dyn WatchlistBackend>) -> Self {
        Self { backend }
    }
}

impl From<WatchlistError> for MarketDataError {
    fn from(err: WatchlistError) -> Self {
        match err {
            WatchlistError::MalformedResponse(message) => MarketDataError::MalformedPayload {
                provider: PROVIDER_ID.to_string(),
                message,
            },
            other => MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl QuoteProvider for WatchlistQuoteProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            markets: &[Market::AShare, Market::UsShare],
            strategy: FetchStrategy::DirectJson,
            supports_history: false,
        }
    }

    /// The whole list, or only `symbols` when any are given.
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError> {
        let quotes = self.backend.list().await?;
        if symbols.is_empty() {
            return Ok(quotes);
        }

        let wanted: Vec<String> = symbols.iter().map(|s| s.trim().to_uppercase()).collect();
        Ok(quotes
            .into_iter()
            .filter(|q| wanted.contains(&q.symbol.to_uppercase()))
            .collect())
    }
}
