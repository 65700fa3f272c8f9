//! Quoteboard Market Data Crate
//!
//! Fetches A-share and US quotes from public endpoints and turns them into
//! displayable batches.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Three providers: Tencent script feed (A-share), FinancialModelingPrep
//!   JSON (US), EastMoney JSON (A-share snapshot and daily K-line)
//! - Positional field parsing of the `~`-delimited Tencent records
//! - A shared symbol-to-name directory
//! - Synthetic fallback quotes so a failed refresh never shows an empty board
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   QuoteSource    |  (dedupe, names, validation, fallback)
//! +------------------+
//!          |
//!          v
//! +------------------+     +--------------------+
//! |  QuoteProvider   | --> | Tencent / FMP / EM |  (script feed or JSON)
//! +------------------+     +--------------------+
//!          |
//!          v
//! +------------------+
//! |   QuoteBatch     |  (Live or Fallback)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - One ticker's price snapshot
//! - [`QuoteBatch`] - A whole refresh result tagged with its origin
//! - [`AShareCode`] - Six-digit code with exchange derivation
//! - [`Snapshot`] / [`KlineBar`] - EastMoney detail data

pub mod errors;
pub mod fallback;
pub mod models;
pub mod names;
pub mod provider;
pub mod registry;

pub use errors::{FailureCategory, MarketDataError};

pub use models::{
    AShareCode, BatchOrigin, Exchange, KlineBar, Market, ProviderId, Quote, QuoteBatch, Snapshot,
};

pub use fallback::{FallbackGenerator, FallbackRanges};
pub use names::{placeholder_name, NameDirectory, StaticNameDirectory};

// Re-export provider types
pub use provider::eastmoney::EastMoneyProvider;
pub use provider::fmp::FmpProvider;
pub use provider::tencent::TencentProvider;
pub use provider::{FetchStrategy, ProviderCapabilities, QuoteProvider, DEFAULT_TIMEOUT};

// Re-export registry types
pub use registry::{QuoteSource, QuoteValidator, ValidationSeverity, ValidatorConfig};
