//! Core error types for the quoteboard application.

use thiserror::Error;

use crate::watchlist::WatchlistError;
use quoteboard_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the dashboard.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Watch-list operation failed: {0}")]
    Watchlist(#[from] WatchlistError),
}

impl Error {
    /// Whether the error was caught before any network request was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// User-input errors, raised before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a stock symbol")]
    EmptySymbol,

    #[error("{0} is already in the watch list")]
    DuplicateSymbol(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        let err: Error = ValidationError::EmptySymbol.into();
        assert!(err.is_validation());

        let err: Error = WatchlistError::Rejected("nope".to_string()).into();
        assert!(!err.is_validation());
    }

    #[test]
    fn test_duplicate_message_names_symbol() {
        let err = ValidationError::DuplicateSymbol("AAPL".to_string());
        assert_eq!(err.to_string(), "AAPL is already in the watch list");
    }
}
