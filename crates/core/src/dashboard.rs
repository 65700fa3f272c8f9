//! Wiring of providers, sources and controllers for the four boards.

use std::sync::Arc;
use std::time::Duration;

use quoteboard_market_data::{
    EastMoneyProvider, FmpProvider, Market, NameDirectory, QuoteProvider, QuoteSource,
    StaticNameDirectory, TencentProvider, DEFAULT_TIMEOUT,
};

use crate::refresh::RefreshController;
use crate::watchlist::{
    HttpWatchlistBackend, WatchlistBackend, WatchlistQuoteProvider, WatchlistService,
    DEFAULT_WATCHLIST_URL,
};

/// Settings the dashboard needs from its host.
#[derive(Clone, Debug)]
pub struct DashboardSettings {
    pub fmp_api_key: String,
    pub watchlist_url: String,
    pub request_timeout: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            fmp_api_key: "demo".to_string(),
            watchlist_url: DEFAULT_WATCHLIST_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Which board a source feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoardKind {
    /// Tencent script feed
    AShare,
    /// FinancialModelingPrep
    Us,
    /// Remote watch list
    Watchlist,
}

impl BoardKind {
    pub fn market(&self) -> Option<Market> {
        match self {
            Self::AShare => Some(Market::AShare),
            Self::Us => Some(Market::UsShare),
            Self::Watchlist => None,
        }
    }
}

/// Owns one quote source and one refresh controller per board, plus the
/// EastMoney provider and the watch-list service.
pub struct Dashboard {
    names: Arc<dyn NameDirectory>,
    a_share: QuoteSource,
    us: QuoteSource,
    watchlist: QuoteSource,
    eastmoney: Arc<EastMoneyProvider>,
    watchlist_service: WatchlistService,
    a_share_refresh: RefreshController,
    us_refresh: RefreshController,
    watchlist_refresh: RefreshController,
}

impl Dashboard {
    pub fn new(settings: &DashboardSettings) -> Self {
        let timeout = settings.request_timeout;
        let backend: Arc<dyn WatchlistBackend> = Arc::new(HttpWatchlistBackend::with_timeout(
            settings.watchlist_url.clone(),
            timeout,
        ));

        Self::with_parts(
            Arc::new(TencentProvider::with_timeout(timeout)),
            Arc::new(FmpProvider::with_timeout(settings.fmp_api_key.clone(), timeout)),
            Arc::new(EastMoneyProvider::with_timeout(timeout)),
            backend,
            Arc::new(StaticNameDirectory::builtin()),
        )
    }

    pub fn with_parts(
        a_share: Arc<dyn QuoteProvider>,
        us: Arc<dyn QuoteProvider>,
        eastmoney: Arc<EastMoneyProvider>,
        watchlist: Arc<dyn WatchlistBackend>,
        names: Arc<dyn NameDirectory>,
    ) -> Self {
        Self {
            a_share: QuoteSource::new(a_share, names.clone()),
            us: QuoteSource::new(us, names.clone()),
            watchlist: QuoteSource::new(
                Arc::new(WatchlistQuoteProvider::new(watchlist.clone())),
                names.clone(),
            )
            .with_default_symbols(Market::UsShare.default_symbols()),
            eastmoney,
            watchlist_service: WatchlistService::new(watchlist),
            names,
            a_share_refresh: RefreshController::new(),
            us_refresh: RefreshController::new(),
            watchlist_refresh: RefreshController::new(),
        }
    }

    pub fn names(&self) -> &Arc<dyn NameDirectory> {
        &self.names
    }

    pub fn source(&self, board: BoardKind) -> &QuoteSource {
        match board {
            BoardKind::AShare => &self.a_share,
            BoardKind::Us => &self.us,
            BoardKind::Watchlist => &self.watchlist,
        }
    }

    pub fn controller(&self, board: BoardKind) -> &RefreshController {
        match board {
            BoardKind::AShare => &self.a_share_refresh,
            BoardKind::Us => &self.us_refresh,
            BoardKind::Watchlist => &self.watchlist_refresh,
        }
    }

    pub fn eastmoney(&self) -> &EastMoneyProvider {
        &self.eastmoney
    }

    pub fn watchlist(&self) -> &WatchlistService {
        &self.watchlist_service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::{RefreshOutcome, RefreshState};
    use crate::watchlist::WatchlistError;
    use async_trait::async_trait;
    use quoteboard_market_data::Quote;

    struct FixedBackend(Result<Vec<Quote>, WatchlistError>);

    #[async_trait]
    impl WatchlistBackend for FixedBackend {
        async fn list(&self) -> Result<Vec<Quote>, WatchlistError> {
            self.0.clone()
        }

        async fn add(&self, _symbol: &str) -> Result<(), WatchlistError> {
            Ok(())
        }

        async fn delete(&self, _symbol: &str) -> Result<(), WatchlistError> {
            Ok(())
        }
    }

    fn dashboard_with(backend: FixedBackend) -> Dashboard {
        Dashboard::with_parts(
            Arc::new(TencentProvider::new()),
            Arc::new(FmpProvider::new("demo")),
            Arc::new(EastMoneyProvider::new()),
            Arc::new(backend),
            Arc::new(StaticNameDirectory::builtin()),
        )
    }

    async fn refresh_watchlist(dashboard: &Dashboard) -> RefreshOutcome {
        dashboard
            .controller(BoardKind::Watchlist)
            .refresh(dashboard.source(BoardKind::Watchlist), &[])
            .await
    }

    #[test]
    fn test_board_markets() {
        assert_eq!(BoardKind::AShare.market(), Some(Market::AShare));
        assert_eq!(BoardKind::Us.market(), Some(Market::UsShare));
        assert_eq!(BoardKind::Watchlist.market(), None);
    }

    #[test]
    fn test_sources_use_expected_providers() {
        let dashboard = Dashboard::new(&DashboardSettings::default());
        assert_eq!(dashboard.source(BoardKind::AShare).provider_id(), "TENCENT");
        assert_eq!(dashboard.source(BoardKind::Us).provider_id(), "FMP");
        assert_eq!(dashboard.source(BoardKind::Watchlist).provider_id(), "WATCHLIST");
        assert_eq!(dashboard.controller(BoardKind::Us).latest_generation(), 0);
    }

    #[tokio::test]
    async fn test_watchlist_board_unreachable_shows_default_fallback() {
        let dashboard =
            dashboard_with(FixedBackend(Err(WatchlistError::Transport("refused".to_string()))));

        let outcome = refresh_watchlist(&dashboard).await;
        assert!(matches!(
            outcome,
            RefreshOutcome::Applied { state: RefreshState::Fallback, count, .. } if count > 0
        ));

        let board = dashboard.controller(BoardKind::Watchlist).snapshot().await;
        assert_eq!(board.state, RefreshState::Fallback);
        let symbols: Vec<String> = board.quotes.iter().map(|q| q.symbol.clone()).collect();
        assert_eq!(symbols, Market::UsShare.default_symbols());
        assert!(board.quotes.iter().all(|q| q.price > 0.0 && !q.name.is_empty()));
    }

    #[tokio::test]
    async fn test_watchlist_board_empty_list_is_not_empty_table() {
        let dashboard = dashboard_with(FixedBackend(Ok(Vec::new())));

        refresh_watchlist(&dashboard).await;
        let board = dashboard.controller(BoardKind::Watchlist).snapshot().await;
        assert_eq!(board.state, RefreshState::Fallback);
        assert!(!board.quotes.is_empty());
    }
}
