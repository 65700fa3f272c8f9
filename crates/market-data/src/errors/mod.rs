//! Error types and failure classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`FailureCategory`]: Classification used when falling back to synthetic data

mod category;

pub use category::FailureCategory;

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Each variant is classified into a [`FailureCategory`] via the
/// [`category`](Self::category) method.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-success status, load failure).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered, but the body could not be decoded.
    #[error("Malformed payload from {provider}: {message}")]
    MalformedPayload {
        /// The provider that sent the payload
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// The provider answered with zero usable records.
    #[error("No quotes parsed from {provider}")]
    EmptyResult {
        /// The provider that returned nothing
        provider: String,
    },

    /// Data validation failed.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// The provider needs an API key and none was configured.
    #[error("Missing API key for {provider}")]
    MissingApiKey {
        /// The provider that requires the key
        provider: String,
    },

    /// The provider does not offer the requested operation.
    #[error("{operation} is not supported by {provider}")]
    NotSupported {
        /// The operation that was attempted
        operation: String,
        /// The provider that was asked
        provider: String,
    },
}

impl MarketDataError {
    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use quoteboard_market_data::errors::{FailureCategory, MarketDataError};
    ///
    /// let error = MarketDataError::EmptyResult { provider: "TENCENT".to_string() };
    /// assert_eq!(error.category(), FailureCategory::Payload);
    ///
    /// let error = MarketDataError::Timeout { provider: "TENCENT".to_string() };
    /// assert_eq!(error.category(), FailureCategory::Transport);
    /// ```
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::Network(_) | Self::Timeout { .. } | Self::ProviderError { .. } => {
                FailureCategory::Transport
            }

            Self::MalformedPayload { .. }
            | Self::EmptyResult { .. }
            | Self::ValidationFailed { .. } => FailureCategory::Payload,

            Self::MissingApiKey { .. } | Self::NotSupported { .. } => {
                FailureCategory::Configuration
            }
        }
    }

    pub(crate) fn from_request(provider: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::ProviderError {
                provider: provider.to_string(),
                message: format!("Request failed: {}", e),
            }
        }
    }
}
