//! EastMoney A-share provider (snapshot + daily K-line).
//!
//! - Snapshot via `push2.eastmoney.com/api/qt/stock/get` (scaled integers)
//! - History via `push2his.eastmoney.com/api/qt/stock/kline/get`
//!   (comma-joined rows, oldest first)
//!
//! Both hosts want a `Referer` from `quote.eastmoney.com` and a browser UA.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::errors::MarketDataError;
use crate::models::{AShareCode, KlineBar, Market, Quote, Snapshot};
use crate::provider::http::{build_client, get_text, DEFAULT_TIMEOUT};
use crate::provider::{FetchStrategy, ProviderCapabilities, QuoteProvider};

use models::{
    parse_kline, scaled, text, Envelope, KlineData, SnapshotData, KLINE_FIELDS, PERCENT_SCALE,
    SNAPSHOT_FIELDS,
};

const SNAPSHOT_URL: &str = "https://push2.eastmoney.com/api/qt/stock/get";
const KLINE_URL: &str = "https://push2his.eastmoney.com/api/qt/stock/kline/get";
const REFERER: &str = "https://quote.eastmoney.com/";
const PROVIDER_ID: &str = "EASTMONEY";

/// Daily bars, forward-adjusted.
const KLINE_DAILY: &str = "101";
const ADJUST_FORWARD: &str = "1";

pub struct EastMoneyProvider {
    client: Client,
    snapshot_url: String,
    kline_url: String,
}

impl EastMoneyProvider {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout, Some(REFERER)),
            snapshot_url: SNAPSHOT_URL.to_string(),
            kline_url: KLINE_URL.to_string(),
        }
    }

    /// Override both endpoints, e.g. when going through a local proxy.
    pub fn with_endpoints(
        mut self,
        snapshot_url: impl Into<String>,
        kline_url: impl Into<String>,
    ) -> Self {
        self.snapshot_url = snapshot_url.into();
        self.kline_url = kline_url.into();
        self
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, MarketDataError> {
        let envelope: Envelope<T> =
            serde_json::from_str(body).map_err(|e| MarketDataError::MalformedPayload {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })?;

        if envelope.rc != 0 {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("rc={}", envelope.rc),
            });
        }

        envelope.data.ok_or_else(|| MarketDataError::EmptyResult {
            provider: PROVIDER_ID.to_string(),
        })
    }

    /// Turn a snapshot body into a [`Snapshot`] for `code`.
    fn parse_snapshot(code: &AShareCode, body: &str) -> Result<Snapshot, MarketDataError> {
        let data: SnapshotData = Self::decode(body)?;
        let scale = data.price_scale();

        let returned = text(&data.f57);
        if !returned.is_empty() && returned != code.code() {
            return Err(MarketDataError::ValidationFailed {
                message: format!(
                    "EastMoney returned {} for requested {}",
                    returned,
                    code.code()
                ),
            });
        }

        Ok(Snapshot {
            symbol: code.code().to_string(),
            name: text(&data.f58),
            price: scaled(&data.f43, scale),
            open: scaled(&data.f46, scale),
            high: scaled(&data.f44, scale),
            low: scaled(&data.f45, scale),
            previous_close: scaled(&data.f60, scale),
            change: scaled(&data.f169, scale),
            changes_percentage: scaled(&data.f170, PERCENT_SCALE),
            volume: scaled(&data.f47, 1.0),
            turnover: scaled(&data.f48, 1.0),
            market_cap: scaled(&data.f116, 1.0),
        })
    }

    /// Turn a K-line body into bars, newest first, at most `limit` of them.
    fn parse_history(body: &str, limit: usize) -> Result<Vec<KlineBar>, MarketDataError> {
        let data: KlineData = Self::decode(body)?;

        let mut bars: Vec<KlineBar> = data
            .klines
            .iter()
            .filter_map(|line| {
                let bar = parse_kline(line);
                if bar.is_none() {
                    warn!("Skipping unreadable K-line row: {}", line);
                }
                bar
            })
            .collect();

        // The endpoint returns oldest first
        bars.reverse();
        bars.truncate(limit);

        if bars.is_empty() {
            return Err(MarketDataError::EmptyResult {
                provider: PROVIDER_ID.to_string(),
            });
        }

        debug!(
            "EastMoney: {} bars for {}",
            bars.len(),
            data.name.or(data.code).unwrap_or_default()
        );
        Ok(bars)
    }
}

impl Default for EastMoneyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Snapshot> for Quote {
    fn from(s: Snapshot) -> Self {
        Quote::new(
            s.symbol,
            s.name,
            s.price,
            s.change,
            s.changes_percentage,
            s.market_cap,
        )
    }
}

#[async_trait]
impl QuoteProvider for EastMoneyProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            markets: &[Market::AShare],
            strategy: FetchStrategy::DirectJson,
            supports_history: true,
        }
    }

    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError> {
        let mut quotes = Vec::with_capacity(symbols.len());
        let mut last_error: Option<MarketDataError> = None;

        for symbol in symbols {
            let code = match AShareCode::parse(symbol) {
                Ok(code) => code,
                Err(e) => {
                    warn!("Skipping symbol for EastMoney: {}", e);
                    continue;
                }
            };

            match self.fetch_snapshot(&code).await {
                Ok(snapshot) => quotes.push(Quote::from(snapshot)),
                Err(e) => {
                    debug!("EastMoney snapshot for {} failed: {}", code, e);
                    last_error = Some(e);
                }
            }
        }

        if quotes.is_empty() {
            return Err(last_error.unwrap_or(MarketDataError::EmptyResult {
                provider: PROVIDER_ID.to_string(),
            }));
        }
        Ok(quotes)
    }

    async fn fetch_snapshot(&self, code: &AShareCode) -> Result<Snapshot, MarketDataError> {
        let secid = code.secid();
        let params = [("secid", secid.as_str()), ("fields", SNAPSHOT_FIELDS)];
        let body = get_text(&self.client, PROVIDER_ID, &self.snapshot_url, &params).await?;
        Self::parse_snapshot(code, &body)
    }

    async fn fetch_history(
        &self,
        code: &AShareCode,
        limit: usize,
    ) -> Result<Vec<KlineBar>, MarketDataError> {
        let secid = code.secid();
        let lmt = limit.max(1).to_string();
        let params = [
            ("secid", secid.as_str()),
            ("fields1", "f1,f2,f3"),
            ("fields2", KLINE_FIELDS),
            ("klt", KLINE_DAILY),
            ("fqt", ADJUST_FORWARD),
            ("end", "20500101"),
            ("lmt", lmt.as_str()),
        ];
        let body = get_text(&self.client, PROVIDER_ID, &self.kline_url, &params).await?;
        Self::parse_history(&body, limit.max(1))
    }
}
