//! Watch-list service: input validation in front of the backend.

use std::sync::Arc;

use log::info;
use tokio::sync::RwLock;

use super::WatchlistBackend;
use crate::errors::{Result, ValidationError};
use quoteboard_market_data::Quote;

/// Canonical form of user input: trimmed, upper-case.
pub fn normalize_symbol(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Validates watch-list edits and forwards them to a backend.
///
/// The service remembers the symbols from the last `list()` (or from
/// [`with_known_symbols`](Self::with_known_symbols)) so duplicates are
/// rejected without a request.
pub struct WatchlistService {
    backend: Arc<dyn WatchlistBackend>,
    known: RwLock<Vec<String>>,
}

impl WatchlistService {
    pub fn new(backend: Arc<dyn WatchlistBackend>) -> Self {
        Self {
            backend,
            known: RwLock::new(Vec::new()),
        }
    }

    pub fn with_known_symbols(backend: Arc<dyn WatchlistBackend>, symbols: Vec<String>) -> Self {
        let known = symbols.iter().map(|s| normalize_symbol(s)).collect();
        Self {
            backend,
            known: RwLock::new(known),
        }
    }

    pub fn backend(&self) -> Arc<dyn WatchlistBackend> {
        self.backend.clone()
    }

    /// Symbols the service currently believes are listed.
    pub async fn known_symbols(&self) -> Vec<String> {
        self.known.read().await.clone()
    }

    /// Replace the remembered symbols, e.g. from a live board refresh.
    pub async fn remember(&self, symbols: &[String]) {
        *self.known.write().await = symbols.iter().map(|s| normalize_symbol(s)).collect();
    }

    /// Fetch the list and remember its symbols.
    pub async fn list(&self) -> Result<Vec<Quote>> {
        let quotes = self.backend.list().await?;
        *self.known.write().await = quotes.iter().map(|q| normalize_symbol(&q.symbol)).collect();
        Ok(quotes)
    }

    /// Add a symbol. Empty and already-listed symbols fail before any request.
    ///
    /// Returns the normalized symbol that was added.
    pub async fn add(&self, input: &str) -> Result<String> {
        let symbol = normalize_symbol(input);
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol.into());
        }
        if self.known.read().await.contains(&symbol) {
            return Err(ValidationError::DuplicateSymbol(symbol).into());
        }

        self.backend.add(&symbol).await?;
        info!("Added {} to the watch list", symbol);

        let mut known = self.known.write().await;
        if !known.contains(&symbol) {
            known.push(symbol.clone());
        }
        Ok(symbol)
    }

    /// Remove a symbol. Empty input fails before any request.
    pub async fn delete(&self, input: &str) -> Result<String> {
        let symbol = normalize_symbol(input);
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol.into());
        }

        self.backend.delete(&symbol).await?;
        info!("Removed {} from the watch list", symbol);

        self.known.write().await.retain(|s| s != &symbol);
        Ok(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::watchlist::WatchlistError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // =========================================================================
    // Mock backend
    // =========================================================================

    #[derive(Default)]
    struct MockBackend {
        quotes: Mutex<Vec<Quote>>,
        reject_with: Option<String>,
        requests: AtomicUsize,
    }

    impl MockBackend {
        fn with_symbols(symbols: &[&str]) -> Self {
            let quotes = symbols
                .iter()
                .map(|s| Quote::new(*s, *s, 10.0, 0.0, 0.0, 0.0))
                .collect();
            Self {
                quotes: Mutex::new(quotes),
                ..Default::default()
            }
        }

        fn requests(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WatchlistBackend for MockBackend {
        async fn list(&self) -> std::result::Result<Vec<Quote>, WatchlistError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(self.quotes.lock().unwrap().clone())
        }

        async fn add(&self, symbol: &str) -> std::result::Result<(), WatchlistError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if let Some(message) = &self.reject_with {
                return Err(WatchlistError::Rejected(message.clone()));
            }
            self.quotes
                .lock()
                .unwrap()
                .push(Quote::new(symbol, symbol, 1.0, 0.0, 0.0, 0.0));
            Ok(())
        }

        async fn delete(&self, symbol: &str) -> std::result::Result<(), WatchlistError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.quotes.lock().unwrap().retain(|q| q.symbol != symbol);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_add_empty_makes_no_request() {
        let backend = Arc::new(MockBackend::default());
        let service = WatchlistService::new(backend.clone());

        for input in ["", "   "] {
            let err = service.add(input).await.unwrap_err();
            assert!(matches!(err, Error::Validation(ValidationError::EmptySymbol)));
        }
        assert_eq!(backend.requests(), 0);
    }

    #[tokio::test]
    async fn test_add_duplicate_makes_no_request() {
        let backend = Arc::new(MockBackend::default());
        let service =
            WatchlistService::with_known_symbols(backend.clone(), vec!["AAPL".to_string()]);

        let err = service.add(" aapl ").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateSymbol(ref s)) if s == "AAPL"
        ));
        assert_eq!(backend.requests(), 0);
    }

    #[tokio::test]
    async fn test_remembered_symbols_reject_duplicates() {
        let backend = Arc::new(MockBackend::default());
        let service = WatchlistService::new(backend.clone());

        service.remember(&["tsla".to_string()]).await;
        assert_eq!(service.known_symbols().await, vec!["TSLA".to_string()]);
        assert!(service.add("TSLA").await.unwrap_err().is_validation());
        assert_eq!(backend.requests(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_detected_after_list() {
        let backend = Arc::new(MockBackend::with_symbols(&["TSLA", "NIO"]));
        let service = WatchlistService::new(backend.clone());

        service.list().await.unwrap();
        assert_eq!(backend.requests(), 1);

        assert!(service.add("nio").await.unwrap_err().is_validation());
        assert_eq!(backend.requests(), 1);
    }

    #[tokio::test]
    async fn test_add_normalizes_and_remembers() {
        let backend = Arc::new(MockBackend::default());
        let service = WatchlistService::new(backend.clone());

        assert_eq!(service.add("  gme ").await.unwrap(), "GME");
        assert_eq!(service.known_symbols().await, vec!["GME".to_string()]);
        assert!(service.add("GME").await.is_err());
        assert_eq!(backend.requests(), 1);
    }

    #[tokio::test]
    async fn test_rejected_add_surfaces_message() {
        let backend = Arc::new(MockBackend {
            reject_with: Some("Symbol not found".to_string()),
            ..Default::default()
        });
        let service = WatchlistService::new(backend);

        let err = service.add("ZZZZ").await.unwrap_err();
        assert!(matches!(err, Error::Watchlist(WatchlistError::Rejected(ref m)) if m == "Symbol not found"));
        assert!(service.known_symbols().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_forgets_symbol() {
        let backend = Arc::new(MockBackend::with_symbols(&["AAPL", "TSLA"]));
        let service = WatchlistService::new(backend.clone());
        service.list().await.unwrap();

        assert_eq!(service.delete("tsla").await.unwrap(), "TSLA");
        assert_eq!(service.known_symbols().await, vec!["AAPL".to_string()]);
        assert_eq!(backend.quotes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_empty_makes_no_request() {
        let backend = Arc::new(MockBackend::default());
        let service = WatchlistService::new(backend.clone());
        assert!(service.delete(" ").await.unwrap_err().is_validation());
        assert_eq!(backend.requests(), 0);
    }
}
