//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that all providers implement
//! - Provider capabilities (markets, fetch strategy)
//! - Concrete provider implementations (Tencent, FMP, EastMoney)
//!
//! # Architecture
//!
//! The provider system is designed to be:
//! - **Mechanism-agnostic**: A script feed and a JSON API look the same to callers
//! - **Extensible**: New providers can be added by implementing `QuoteProvider`
//! - **Best-effort**: Unknown symbols are dropped, never errored individually

mod capabilities;
mod http;
mod traits;

pub mod eastmoney;
pub mod fmp;
pub mod tencent;

// Re-exports
pub use capabilities::{FetchStrategy, ProviderCapabilities};
pub use http::DEFAULT_TIMEOUT;
pub use traits::QuoteProvider;
