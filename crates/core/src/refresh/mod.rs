//! Board refresh control.
//!
//! Every refresh takes a ticket carrying a generation number. Only the
//! result for the most recently issued ticket is applied to the board;
//! anything older is discarded, so the last *started* refresh wins even when
//! responses arrive out of order.

mod state;

pub use state::{RefreshEvent, RefreshState};

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use tokio::sync::RwLock;

use quoteboard_market_data::{BatchOrigin, Quote, QuoteBatch, QuoteSource};

/// Proof that a refresh was started; hand it back to [`RefreshController::complete`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The batch replaced the board.
    Applied {
        generation: u64,
        state: RefreshState,
        count: usize,
    },
    /// A newer refresh was started after this one; the batch was dropped.
    Stale { generation: u64, latest: u64 },
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Everything a view needs to render one board.
#[derive(Clone, Debug, Default)]
pub struct BoardSnapshot {
    /// Current phase.
    pub state: RefreshState,
    /// How the last applied refresh ended (`Success` or `Fallback`).
    pub last_outcome: Option<RefreshState>,
    pub quotes: Vec<Quote>,
    pub origin: Option<BatchOrigin>,
    /// Generation of the batch currently shown, 0 before the first one.
    pub generation: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl BoardSnapshot {
    /// Refresh is re-enabled whenever nothing is in flight.
    pub fn can_refresh(&self) -> bool {
        !self.state.is_loading()
    }
}

#[derive(Debug, Default)]
pub struct RefreshController {
    latest: AtomicU64,
    board: RwLock<BoardSnapshot>,
}

impl RefreshController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recently started refresh.
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Start a refresh: bump the generation and enter `Loading`.
    pub async fn begin(&self) -> RefreshTicket {
        let mut board = self.board.write().await;
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        board.state = board
            .state
            .on(RefreshEvent::Start)
            .unwrap_or(RefreshState::Loading);

        debug!("Refresh {} started", generation);
        RefreshTicket { generation }
    }

    /// Apply `batch` if `ticket` is still the latest refresh.
    ///
    /// On success the board is replaced wholesale, passes through `Success`
    /// or `Fallback`, and settles back to `Idle`.
    pub async fn complete(&self, ticket: RefreshTicket, batch: QuoteBatch) -> RefreshOutcome {
        let mut board = self.board.write().await;
        let latest = self.latest.load(Ordering::SeqCst);

        if ticket.generation != latest || board.generation >= ticket.generation {
            debug!(
                "Discarding stale refresh {} (latest is {})",
                ticket.generation, latest
            );
            return RefreshOutcome::Stale {
                generation: ticket.generation,
                latest,
            };
        }

        let event = if batch.is_fallback() || batch.is_empty() {
            RefreshEvent::FellBack
        } else {
            RefreshEvent::Loaded
        };

        let Some(outcome) = board.state.on(event) else {
            warn!(
                "Refresh {} completed while board was {}",
                ticket.generation,
                board.state.as_str()
            );
            return RefreshOutcome::Stale {
                generation: ticket.generation,
                latest,
            };
        };

        let count = batch.len();
        board.quotes = batch.quotes;
        board.origin = Some(batch.origin);
        board.generation = ticket.generation;
        board.updated_at = Some(Utc::now());
        board.last_outcome = Some(outcome);
        board.state = outcome.on(RefreshEvent::Settle).unwrap_or_default();

        debug!(
            "Refresh {} applied: {} quotes ({})",
            ticket.generation,
            count,
            outcome.as_str()
        );
        RefreshOutcome::Applied {
            generation: ticket.generation,
            state: outcome,
            count,
        }
    }

    /// Run one full refresh against `source`.
    pub async fn refresh(&self, source: &QuoteSource, symbols: &[String]) -> RefreshOutcome {
        let ticket = self.begin().await;
        let batch = source.load(symbols).await;
        self.complete(ticket, batch).await
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.board.read().await.clone()
    }
}
