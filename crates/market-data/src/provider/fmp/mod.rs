//! FinancialModelingPrep quote provider.
//!
//! One batched GET against `/api/v3/quote/{symbols}` returns a JSON array
//! with one object per known symbol. Unknown symbols are simply missing.
//! API documentation: https://site.financialmodelingprep.com/developer/docs

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::{Market, Quote};
use crate::provider::http::{build_client, get_text, DEFAULT_TIMEOUT};
use crate::provider::{FetchStrategy, ProviderCapabilities, QuoteProvider};

const BASE_URL: &str = "https://financialmodelingprep.com/api/v3";
const PROVIDER_ID: &str = "FMP";

// ============================================================================
// API Response Structures
// ============================================================================

/// One element of the `/quote` response array
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteItem {
    symbol: String,
    name: Option<String>,
    price: Option<f64>,
    change: Option<f64>,
    changes_percentage: Option<f64>,
    market_cap: Option<f64>,
    // Note: dayLow, dayHigh, volume, pe, eps and friends exist but are not used
}

impl From<QuoteItem> for Quote {
    fn from(item: QuoteItem) -> Self {
        Quote::new(
            item.symbol,
            item.name.unwrap_or_default(),
            item.price.unwrap_or_default(),
            item.change.unwrap_or_default(),
            item.changes_percentage.unwrap_or_default(),
            item.market_cap.unwrap_or_default(),
        )
    }
}

// ============================================================================
// FmpProvider
// ============================================================================

/// Direct-JSON provider for US shares.
pub struct FmpProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FmpProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout, None),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the batched quote URL; symbols are comma-joined and escaped.
    pub fn quote_url(&self, symbols: &[String]) -> String {
        let joined = symbols
            .iter()
            .map(|s| urlencoding::encode(s.trim()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}/quote/{}", self.base_url, joined)
    }
}

/// Decode a `/quote` body and reorder the result to match `symbols`.
///
/// Entries for symbols that were not requested are dropped, as are
/// duplicates.
fn parse_quotes(body: &str, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError> {
    let value: Value = serde_json::from_str(body).map_err(|e| MarketDataError::MalformedPayload {
        provider: PROVIDER_ID.to_string(),
        message: format!("Failed to parse quote response: {}", e),
    })?;

    // Errors come back as a 200 with an object body
    if let Some(message) = value.get("Error Message").and_then(Value::as_str) {
        return Err(MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: message.to_string(),
        });
    }

    let items: Vec<QuoteItem> =
        serde_json::from_value(value).map_err(|e| MarketDataError::MalformedPayload {
            provider: PROVIDER_ID.to_string(),
            message: format!("Expected an array of quotes: {}", e),
        })?;

    let mut by_symbol: HashMap<String, Quote> = items
        .into_iter()
        .map(|item| (match_key(&item.symbol), Quote::from(item)))
        .collect();

    let quotes = symbols
        .iter()
        .filter_map(|s| by_symbol.remove(&match_key(s)))
        .collect();
    Ok(quotes)
}

/// Share-class separators differ between callers (`BRK B`, `BRK.B`) and the
/// API (`BRK-B`).
fn match_key(symbol: &str) -> String {
    symbol
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '.' | '_' => '-',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

// ============================================================================
// QuoteProvider Implementation
// ============================================================================

#[async_trait]
impl QuoteProvider for FmpProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            markets: &[Market::UsShare],
            strategy: FetchStrategy::DirectJson,
            supports_history: false,
        }
    }

    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError> {
        if self.api_key.trim().is_empty() {
            return Err(MarketDataError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if symbols.is_empty() {
            return Err(MarketDataError::EmptyResult {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let url = self.quote_url(symbols);
        let params = [("apikey", self.api_key.as_str())];
        let body = get_text(&self.client, PROVIDER_ID, &url, &params).await?;
        let quotes = parse_quotes(&body, symbols)?;

        if quotes.is_empty() {
            return Err(MarketDataError::EmptyResult {
                provider: PROVIDER_ID.to_string(),
            });
        }

        debug!("FMP: fetched {} of {} quotes", quotes.len(), symbols.len());
        Ok(quotes)
    }
}

// ============================================================================
// Tests
// ============================================================================
