//! Quote provider trait definitions.
//!
//! This module defines the core `QuoteProvider` trait that all
//! quote sources implement, whatever transport they use.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{AShareCode, KlineBar, Quote, Snapshot};

use super::capabilities::ProviderCapabilities;

/// Trait for quote providers.
///
/// Implement this trait to add support for a new quote source. Callers only
/// ever see `fetch_quotes`; whether the provider issues a JSON request or
/// loads a script feed stays behind this interface.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use quoteboard_market_data::provider::{FetchStrategy, ProviderCapabilities, QuoteProvider};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl QuoteProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities {
///             markets: &[Market::UsShare],
///             strategy: FetchStrategy::DirectJson,
///             supports_history: false,
///         }
///     }
///
///     // ... implement fetch_quotes
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "TENCENT", "FMP", etc.
    /// Used for logging and for tagging live batches.
    fn id(&self) -> &'static str;

    /// Describes what this provider can do.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Fetch quotes for an ordered list of symbols.
    ///
    /// Best-effort: symbols the provider does not know are simply absent
    /// from the result. An error means the whole call failed (transport,
    /// payload, or configuration), including the case where nothing parsed.
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError>;

    /// Fetch a real-time snapshot for a single A-share.
    ///
    /// Default implementation returns `NotSupported`.
    async fn fetch_snapshot(&self, code: &AShareCode) -> Result<Snapshot, MarketDataError> {
        let _ = code;
        Err(MarketDataError::NotSupported {
            operation: "snapshot".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Fetch up to `limit` daily bars, newest first.
    ///
    /// Default implementation returns `NotSupported`.
    async fn fetch_history(
        &self,
        code: &AShareCode,
        limit: usize,
    ) -> Result<Vec<KlineBar>, MarketDataError> {
        let _ = (code, limit);
        Err(MarketDataError::NotSupported {
            operation: "history".to_string(),
            provider: self.id().to_string(),
        })
    }
}
