//! Quote source: one provider plus everything that turns its output into a
//! displayable batch.
//!
//! The source fills missing names from the shared directory, drops quotes
//! that fail validation, and replaces any failure (or an empty result) with
//! a fallback batch so the board is never left blank.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

use super::QuoteValidator;
use crate::errors::MarketDataError;
use crate::fallback::FallbackGenerator;
use crate::models::{Quote, QuoteBatch};
use crate::names::NameDirectory;
use crate::provider::QuoteProvider;

pub struct QuoteSource {
    provider: Arc<dyn QuoteProvider>,
    names: Arc<dyn NameDirectory>,
    validator: QuoteValidator,
    fallback: FallbackGenerator,
    default_symbols: Vec<String>,
    last_live: Mutex<Vec<String>>,
}

impl QuoteSource {
    pub fn new(provider: Arc<dyn QuoteProvider>, names: Arc<dyn NameDirectory>) -> Self {
        Self {
            provider,
            fallback: FallbackGenerator::new(names.clone()),
            names,
            validator: QuoteValidator::new(),
            default_symbols: Vec::new(),
            last_live: Mutex::new(Vec::new()),
        }
    }

    /// Symbols to mock when a request names none and no live batch has been
    /// seen yet (a provider that serves a whole list, such as a watch list).
    pub fn with_default_symbols(mut self, symbols: Vec<String>) -> Self {
        self.default_symbols = symbols;
        self
    }

    pub fn with_validator(mut self, validator: QuoteValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    pub fn provider(&self) -> &Arc<dyn QuoteProvider> {
        &self.provider
    }

    /// Fetch live quotes without any fallback.
    ///
    /// Symbols are trimmed and de-duplicated (first occurrence wins) before
    /// the provider sees them. An empty result is an error.
    pub async fn fetch(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError> {
        let symbols = dedupe(symbols);
        let provider_id = self.provider.id();

        debug!("Fetching {} symbols from {}", symbols.len(), provider_id);
        let quotes = self.provider.fetch_quotes(&symbols).await?;

        let quotes: Vec<Quote> = quotes
            .into_iter()
            .map(|mut quote| {
                if quote.name.trim().is_empty() {
                    quote.name = self.names.display_name(&quote.symbol);
                }
                quote.normalized()
            })
            .collect();

        let (valid, invalid) = self.validator.validate_batch(quotes);
        for (quote, err) in &invalid {
            warn!("Dropping quote {} from {}: {}", quote.symbol, provider_id, err);
        }

        if valid.is_empty() {
            return Err(MarketDataError::EmptyResult {
                provider: provider_id.to_string(),
            });
        }

        Ok(valid)
    }

    /// Fetch quotes, substituting synthetic data on any failure.
    ///
    /// Never fails. The batch's origin records whether it is live.
    pub async fn load(&self, symbols: &[String]) -> QuoteBatch {
        let provider_id = self.provider.id();

        match self.fetch(symbols).await {
            Ok(quotes) => {
                info!("Loaded {} quotes from {}", quotes.len(), provider_id);
                self.remember(&quotes);
                QuoteBatch::live(Cow::Borrowed(provider_id), quotes)
            }
            Err(e) => {
                warn!(
                    "{} fetch failed ({}): {}. Serving fallback quotes",
                    provider_id,
                    e.category().as_str(),
                    e
                );
                let symbols = self.fallback_symbols(symbols);
                QuoteBatch::fallback(e.to_string(), self.fallback.generate(&symbols))
            }
        }
    }

    /// Requested symbols, else the last live ones, else the defaults.
    fn fallback_symbols(&self, requested: &[String]) -> Vec<String> {
        let requested = dedupe(requested);
        if !requested.is_empty() {
            return requested;
        }
        let last_live = self.last_live.lock().map(|s| s.clone()).unwrap_or_default();
        if !last_live.is_empty() {
            return last_live;
        }
        dedupe(&self.default_symbols)
    }

    fn remember(&self, quotes: &[Quote]) {
        if let Ok(mut last_live) = self.last_live.lock() {
            *last_live = quotes.iter().map(|q| q.symbol.clone()).collect();
        }
    }
}

fn dedupe(symbols: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    symbols
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BatchOrigin;
    use crate::names::StaticNameDirectory;
    use crate::provider::{FetchStrategy, ProviderCapabilities};
    use crate::models::Market;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    enum Behavior {
        Quotes(Vec<Quote>),
        Empty,
        Timeout,
    }

    struct MockProvider {
        behavior: Behavior,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        fn capabilities(&self) -> ProviderCapabilities {
            ProviderCapabilities {
                markets: &[Market::AShare, Market::UsShare],
                strategy: FetchStrategy::DirectJson,
                supports_history: false,
            }
        }

        async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = symbols.to_vec();
            match &self.behavior {
                Behavior::Quotes(q) => Ok(q.clone()),
                Behavior::Empty => Ok(Vec::new()),
                Behavior::Timeout => Err(MarketDataError::Timeout {
                    provider: "MOCK".to_string(),
                }),
            }
        }
    }

    fn source(provider: Arc<MockProvider>) -> QuoteSource {
        QuoteSource::new(provider, Arc::new(StaticNameDirectory::builtin()))
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_load_live_fills_missing_names() {
        let provider = Arc::new(MockProvider::new(Behavior::Quotes(vec![
            Quote::new("600519", "", 1800.0, 10.0, 0.56, 2.2e12),
            Quote::new("AAPL", "Apple", 190.0, 1.0, 0.5, 3e12),
        ])));
        let batch = source(provider.clone())
            .load(&symbols(&["600519", "AAPL"]))
            .await;

        assert_eq!(batch.origin, BatchOrigin::Live { provider: Cow::Borrowed("MOCK") });
        assert_eq!(batch.quotes[0].name, "贵州茅台");
        assert_eq!(batch.quotes[1].name, "Apple");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_dedupes_symbols() {
        let provider = Arc::new(MockProvider::new(Behavior::Empty));
        let batch = source(provider.clone())
            .load(&symbols(&["AAPL", " AAPL", "TSLA", ""]))
            .await;

        assert_eq!(*provider.seen.lock().unwrap(), symbols(&["AAPL", "TSLA"]));
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_becomes_fallback() {
        let provider = Arc::new(MockProvider::new(Behavior::Empty));
        let batch = source(provider).load(&symbols(&["600519", "000858"])).await;

        assert!(batch.is_fallback());
        assert_eq!(batch.len(), 2);
        assert!(batch.quotes.iter().all(|q| q.price > 0.0));
        assert_eq!(batch.quotes[1].name, "五粮液");
    }

    #[tokio::test]
    async fn test_transport_error_becomes_fallback() {
        let provider = Arc::new(MockProvider::new(Behavior::Timeout));
        let batch = source(provider).load(&symbols(&["GME"])).await;

        match &batch.origin {
            BatchOrigin::Fallback { reason } => assert!(reason.contains("Timeout")),
            other => panic!("expected fallback, got {:?}", other),
        }
        assert_eq!(batch.quotes[0].symbol, "GME");
    }

    #[tokio::test]
    async fn test_invalid_quotes_are_dropped() {
        let provider = Arc::new(MockProvider::new(Behavior::Quotes(vec![
            Quote::new("NIO", "NIO Inc.", 5.0, 0.1, 2.0, 1e10),
            Quote::new("TSLA", "Tesla, Inc.", -3.0, 0.0, 0.0, 0.0),
        ])));
        let quotes = source(provider).fetch(&symbols(&["NIO", "TSLA"])).await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "NIO");
    }

    #[tokio::test]
    async fn test_all_invalid_is_empty_result() {
        let provider = Arc::new(MockProvider::new(Behavior::Quotes(vec![Quote::new(
            "TSLA", "", -3.0, 0.0, 0.0, 0.0,
        )])));
        let err = source(provider).fetch(&symbols(&["TSLA"])).await.unwrap_err();
        assert!(matches!(err, MarketDataError::EmptyResult { .. }));
    }

    #[tokio::test]
    async fn test_unnamed_request_falls_back_to_defaults() {
        let provider = Arc::new(MockProvider::new(Behavior::Timeout));
        let source = source(provider).with_default_symbols(symbols(&["AAPL", "TSLA"]));
        let batch = source.load(&[]).await;

        assert!(batch.is_fallback());
        let mocked: Vec<&str> = batch.quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(mocked, vec!["AAPL", "TSLA"]);
    }

    #[tokio::test]
    async fn test_unnamed_request_falls_back_to_last_live() {
        let provider = Arc::new(MockProvider::new(Behavior::Quotes(vec![Quote::new(
            "NIO", "NIO Inc.", 5.0, 0.1, 2.0, 1e10,
        )])));
        let live = source(provider).with_default_symbols(symbols(&["AAPL"]));
        assert!(!live.load(&[]).await.is_fallback());

        assert_eq!(live.fallback_symbols(&[]), symbols(&["NIO"]));
        assert_eq!(live.fallback_symbols(&symbols(&["GME"])), symbols(&["GME"]));
    }
}
