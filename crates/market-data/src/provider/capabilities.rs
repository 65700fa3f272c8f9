//! Provider capabilities.
//!
//! Describes what a quote provider can do and how it reaches its data, so
//! callers can pick a provider per market without knowing the mechanism.

use crate::models::Market;

/// How a provider obtains its payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchStrategy {
    /// One HTTP GET whose body is a JSON document.
    DirectJson,

    /// The response is an executable script that assigns one variable per
    /// symbol; the variables are read back after the load completes.
    ScriptFeed,
}

/// Describes the capabilities of a quote provider.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Markets this provider can quote.
    pub markets: &'static [Market],

    /// Payload mechanism used by the provider.
    pub strategy: FetchStrategy,

    /// Whether the provider serves snapshots and daily history.
    pub supports_history: bool,
}

impl ProviderCapabilities {
    pub fn supports(&self, market: Market) -> bool {
        self.markets.contains(&market)
    }
}
