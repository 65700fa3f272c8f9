//! Tencent (`qt.gtimg.cn`) A-share quote provider.
//!
//! The endpoint does not serve JSON. It answers with a GBK-encoded script
//! that assigns one `v_<exchange><code>` variable per requested symbol,
//! each holding a `~`-delimited record. The provider loads that script,
//! reads the variables it assigns, and decodes each record by offset.

mod fields;
mod script;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::errors::MarketDataError;
use crate::models::{AShareCode, Market, Quote};
use crate::provider::http::{build_client, get_bytes, DEFAULT_TIMEOUT};
use crate::provider::{FetchStrategy, ProviderCapabilities, QuoteProvider};

pub use fields::{parse_record, TencentFields, MARKET_CAP_SCALE, MIN_FIELD_COUNT};
pub use script::ScriptGlobals;

const BASE_URL: &str = "https://qt.gtimg.cn";
const PROVIDER_ID: &str = "TENCENT";

/// Script-feed provider for Shanghai and Shenzhen shares.
pub struct TencentProvider {
    client: Client,
    base_url: String,
}

impl TencentProvider {
    /// Create a provider with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout, None),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at another host (mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the feed URL for a set of codes, e.g. `.../q=sh600519,sz000858`.
    pub fn feed_url(&self, codes: &[AShareCode]) -> String {
        let joined = codes
            .iter()
            .map(AShareCode::prefixed)
            .collect::<Vec<_>>()
            .join(",");
        format!("{}/q={}", self.base_url, joined)
    }

    /// Load the feed script and collect the variables it assigns.
    async fn load_script(&self, url: &str) -> Result<ScriptGlobals, MarketDataError> {
        let bytes = get_bytes(&self.client, PROVIDER_ID, url, &[]).await?;
        let (body, _, had_errors) = encoding_rs::GBK.decode(&bytes);
        if had_errors {
            debug!("Tencent feed contained bytes outside GBK; replaced");
        }
        Ok(ScriptGlobals::parse(&body))
    }

    /// Read each expected variable and decode it, keeping input order.
    pub fn quotes_from_globals(codes: &[AShareCode], globals: &ScriptGlobals) -> Vec<Quote> {
        codes
            .iter()
            .filter_map(|code| {
                let variable = code.script_variable();
                match globals.get(&variable) {
                    Some(raw) => parse_record(code, raw),
                    None => {
                        debug!("Tencent feed did not assign {}", variable);
                        None
                    }
                }
            })
            .collect()
    }
}

impl Default for TencentProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for TencentProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            markets: &[Market::AShare],
            strategy: FetchStrategy::ScriptFeed,
            supports_history: false,
        }
    }

    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError> {
        let codes: Vec<AShareCode> = symbols
            .iter()
            .filter_map(|symbol| match AShareCode::parse(symbol) {
                Ok(code) => Some(code),
                Err(e) => {
                    warn!("Skipping symbol for Tencent feed: {}", e);
                    None
                }
            })
            .collect();

        if codes.is_empty() {
            return Err(MarketDataError::EmptyResult {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let url = self.feed_url(&codes);
        debug!("Loading Tencent feed for {} symbols", codes.len());

        let globals = self.load_script(&url).await?;
        let quotes = Self::quotes_from_globals(&codes, &globals);

        if quotes.is_empty() {
            return Err(MarketDataError::EmptyResult {
                provider: PROVIDER_ID.to_string(),
            });
        }

        debug!(
            "Tencent: parsed {} of {} requested symbols",
            quotes.len(),
            codes.len()
        );
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::fields::fixtures::{moutai, record};
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = TencentProvider::new();
        assert_eq!(provider.id(), "TENCENT");
    }

    #[test]
    fn test_capabilities() {
        let caps = TencentProvider::new().capabilities();
        assert_eq!(caps.strategy, FetchStrategy::ScriptFeed);
        assert!(caps.supports(Market::AShare));
        assert!(!caps.supports(Market::UsShare));
    }

    #[test]
    fn test_feed_url_prefixes_exchanges() {
        let provider = TencentProvider::new();
        let codes = vec![
            AShareCode::parse("600519").unwrap(),
            AShareCode::parse("000858").unwrap(),
        ];
        assert_eq!(
            provider.feed_url(&codes),
            "https://qt.gtimg.cn/q=sh600519,sz000858"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let provider = TencentProvider::new().with_base_url("http://127.0.0.1:9000/");
        let codes = vec![AShareCode::parse("601318").unwrap()];
        assert_eq!(provider.feed_url(&codes), "http://127.0.0.1:9000/q=sh601318");
    }

    #[test]
    fn test_quotes_from_globals_reads_expected_variables() {
        let body = format!(
            "v_sh600519=\"{}\";\nv_sz000858=\"1~五粮液\";\n",
            moutai()
        );
        let globals = ScriptGlobals::parse(&body);
        let codes = vec![
            AShareCode::parse("600519").unwrap(),
            AShareCode::parse("000858").unwrap(),
            AShareCode::parse("601166").unwrap(),
        ];

        let quotes = TencentProvider::quotes_from_globals(&codes, &globals);
        // 000858 is too short, 601166 was never assigned
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "600519");
        assert_eq!(quotes[0].change, 10.0);
        assert_eq!(quotes[0].market_cap, 5_000_000.0);
    }

    #[test]
    fn test_quotes_keep_input_order() {
        let a = record(46, &[(1, "招商银行"), (2, "600036"), (3, "35"), (4, "34")]);
        let b = record(46, &[(1, "五粮液"), (2, "000858"), (3, "150"), (4, "151")]);
        let body = format!("v_sh600036=\"{}\";v_sz000858=\"{}\";", a, b);
        let globals = ScriptGlobals::parse(&body);
        let codes = vec![
            AShareCode::parse("000858").unwrap(),
            AShareCode::parse("600036").unwrap(),
        ];

        let quotes = TencentProvider::quotes_from_globals(&codes, &globals);
        assert_eq!(quotes[0].symbol, "000858");
        assert_eq!(quotes[0].change, -1.0);
        assert_eq!(quotes[1].symbol, "600036");
    }

    #[tokio::test]
    async fn test_invalid_symbols_only_is_empty_result() {
        let provider = TencentProvider::new();
        let err = provider
            .fetch_quotes(&["AAPL".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::EmptyResult { .. }));
    }
}
