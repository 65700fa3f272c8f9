//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases for common identifiers (ProviderId)
//! - `quote` - Quote snapshot and batch structures (Quote, QuoteBatch)
//! - `symbol` - A-share code handling and exchange derivation (AShareCode, Exchange)
//! - `market` - The two dashboard markets and their default watch sets (Market)
//! - `history` - EastMoney snapshot and daily K-line data (Snapshot, KlineBar)

mod history;
mod market;
mod quote;
mod symbol;
mod types;

pub use history::{KlineBar, Snapshot};
pub use market::Market;
pub use quote::{BatchOrigin, Quote, QuoteBatch};
pub use symbol::{AShareCode, Exchange};
pub use types::ProviderId;
