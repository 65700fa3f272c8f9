use serde::{Deserialize, Deserializer, Serialize};

use super::types::ProviderId;

/// A single ticker's price snapshot at fetch time.
///
/// Serialized with camelCase keys so the watch-list service's JSON array
/// deserializes directly into `Vec<Quote>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Exchange ticker, unique within a batch
    pub symbol: String,

    /// Display name (provider-sourced or from the name directory)
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Current trade price in provider-native currency
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,

    /// Price delta vs previous close
    #[serde(default, deserialize_with = "null_as_default")]
    pub change: f64,

    /// `change / previous_close * 100`
    #[serde(default, deserialize_with = "null_as_default")]
    pub changes_percentage: f64,

    /// Total market capitalization in raw currency units; 0 when unknown
    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap: f64,
}

impl Quote {
    /// Create a quote with every numeric field normalized.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        change: f64,
        changes_percentage: f64,
        market_cap: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            change,
            changes_percentage,
            market_cap,
        }
        .normalized()
    }

    /// Replace non-finite numbers with zero and clamp negative market caps.
    ///
    /// A quote leaving this crate never carries NaN or infinity.
    pub fn normalized(mut self) -> Self {
        self.price = finite_or_zero(self.price);
        self.change = finite_or_zero(self.change);
        self.changes_percentage = finite_or_zero(self.changes_percentage);
        self.market_cap = finite_or_zero(self.market_cap).max(0.0);
        self
    }

    /// Whether a market cap should be displayed at all.
    pub fn has_market_cap(&self) -> bool {
        self.market_cap > 0.0
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where a batch of quotes came from.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchOrigin {
    /// Parsed from a provider response.
    Live { provider: ProviderId },
    /// Synthesized because the provider call failed or returned nothing.
    Fallback { reason: String },
}

/// The result of one refresh: a whole collection, replaced wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteBatch {
    pub quotes: Vec<Quote>,
    pub origin: BatchOrigin,
}

impl QuoteBatch {
    pub fn live(provider: ProviderId, quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            origin: BatchOrigin::Live { provider },
        }
    }

    pub fn fallback(reason: impl Into<String>, quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            origin: BatchOrigin::Fallback {
                reason: reason.into(),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, BatchOrigin::Fallback { .. })
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
