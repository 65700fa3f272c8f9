//! Remote watch list: HTTP client, validation service, and a quote provider
//! adapter for the watch-list board.

mod backend;
mod errors;
mod provider;
mod service;

pub use backend::{HttpWatchlistBackend, WatchlistBackend, DEFAULT_WATCHLIST_URL};
pub use errors::WatchlistError;
pub use provider::WatchlistQuoteProvider;
pub use service::{normalize_symbol, WatchlistService};
