//! Quoteboard Core - dashboard state, watch list and table logic.
//!
//! Sits on top of `quoteboard-market-data`: it decides when boards refresh
//! and which result wins, validates watch-list edits, and shapes quotes
//! into sorted, paginated, formatted rows.

pub mod board;
pub mod dashboard;
pub mod errors;
pub mod refresh;
pub mod watchlist;

pub use dashboard::{BoardKind, Dashboard, DashboardSettings};
pub use refresh::{BoardSnapshot, RefreshController, RefreshOutcome, RefreshState, RefreshTicket};
pub use watchlist::{HttpWatchlistBackend, WatchlistBackend, WatchlistService};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use errors::ValidationError;
