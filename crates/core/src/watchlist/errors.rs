use thiserror::Error;

/// Failures talking to the remote watch-list service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchlistError {
    /// The service answered with a non-OK status; carries its message text.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The `/stocks` body was not a quote array.
    #[error("Malformed watch-list response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for WatchlistError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
