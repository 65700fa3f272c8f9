use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use quoteboard_core::board::{default_page_size, SortKey};
use quoteboard_core::watchlist::normalize_symbol;
use quoteboard_core::{BoardKind, Dashboard, RefreshOutcome, RefreshState, ValidationError};
use quoteboard_market_data::{AShareCode, QuoteProvider};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::render::{print_board, print_history, print_snapshot, TableOptions};

pub struct BoardArgs {
    pub page: usize,
    pub page_size: Option<usize>,
    pub sort: SortKey,
    pub symbols: Vec<String>,
}

fn title(board: BoardKind) -> &'static str {
    match board {
        BoardKind::AShare => "中国A股市场",
        BoardKind::Us => "America stock market",
        BoardKind::Watchlist => "Watch list",
    }
}

fn table_options(board: BoardKind, args: &BoardArgs) -> TableOptions {
    let market = board.market();
    TableOptions {
        sort: args.sort,
        page: args.page,
        page_size: args
            .page_size
            .or_else(|| market.and_then(default_page_size)),
        market,
    }
}

fn symbols_for(board: BoardKind, requested: &[String]) -> Vec<String> {
    match board.market() {
        Some(market) if requested.is_empty() => market.default_symbols(),
        _ => requested.to_vec(),
    }
}

/// Refresh one board once and print it.
pub async fn show_board(dashboard: &Dashboard, board: BoardKind, args: BoardArgs) -> anyhow::Result<()> {
    let symbols = symbols_for(board, &args.symbols);
    let controller = dashboard.controller(board);

    let outcome = controller.refresh(dashboard.source(board), &symbols).await;
    debug!("{:?}", outcome);

    print_board(title(board), &controller.snapshot().await, &table_options(board, &args));
    Ok(())
}

pub async fn watch_list(dashboard: &Dashboard) -> anyhow::Result<()> {
    let args = BoardArgs {
        page: 1,
        page_size: None,
        sort: SortKey::default(),
        symbols: Vec::new(),
    };
    let controller = dashboard.controller(BoardKind::Watchlist);

    let outcome = controller
        .refresh(dashboard.source(BoardKind::Watchlist), &[])
        .await;
    debug!("{:?}", outcome);

    let board = controller.snapshot().await;
    // Only a live list may seed the duplicate check
    if board.state == RefreshState::Success {
        let symbols: Vec<String> = board.quotes.iter().map(|q| q.symbol.clone()).collect();
        info!("Watch list has {} symbols", symbols.len());
        dashboard.watchlist().remember(&symbols).await;
    }

    print_board(title(BoardKind::Watchlist), &board, &table_options(BoardKind::Watchlist, &args));
    Ok(())
}

pub async fn watch_add(dashboard: &Dashboard, symbol: &str) -> anyhow::Result<()> {
    let service = dashboard.watchlist();
    // Empty input must fail before the list request too
    if normalize_symbol(symbol).is_empty() {
        return Err(quoteboard_core::Error::from(ValidationError::EmptySymbol).into());
    }
    service.list().await.context("Failed to load the watch list")?;

    let added = service.add(symbol).await?;
    println!("Added {}", added);
    Ok(())
}

pub async fn watch_delete(dashboard: &Dashboard, symbol: &str) -> anyhow::Result<()> {
    let removed = dashboard.watchlist().delete(symbol).await?;
    println!("Removed {}", removed);
    Ok(())
}

pub async fn snapshot(dashboard: &Dashboard, code: &str) -> anyhow::Result<()> {
    let code = AShareCode::parse(code)?;
    let snapshot = dashboard
        .eastmoney()
        .fetch_snapshot(&code)
        .await
        .with_context(|| format!("Failed to load snapshot for {}", code))?;
    print_snapshot(&snapshot);
    Ok(())
}

pub async fn history(dashboard: &Dashboard, code: &str, limit: usize) -> anyhow::Result<()> {
    let code = AShareCode::parse(code)?;
    let bars = dashboard
        .eastmoney()
        .fetch_history(&code, limit)
        .await
        .with_context(|| format!("Failed to load history for {}", code))?;
    print_history(code.code(), &bars);
    Ok(())
}

/// Refresh a board every `interval`; `rounds` of `None` runs until killed.
///
/// Each tick starts its refresh without waiting for the previous one, so a
/// slow response can be overtaken; the controller drops it as stale.
pub async fn watch_board(
    dashboard: Arc<Dashboard>,
    board: BoardKind,
    args: BoardArgs,
    interval: Duration,
    rounds: Option<usize>,
) -> anyhow::Result<()> {
    let symbols = Arc::new(symbols_for(board, &args.symbols));
    let options = Arc::new(table_options(board, &args));
    let mut ticker = tokio::time::interval(interval);
    let mut tasks = Vec::new();
    let mut round = 0usize;

    while rounds.map_or(true, |limit| round < limit) {
        ticker.tick().await;
        round += 1;

        let (dashboard, symbols, options) = (dashboard.clone(), symbols.clone(), options.clone());
        tasks.push(tokio::spawn(async move {
            let controller = dashboard.controller(board);
            match controller.refresh(dashboard.source(board), &symbols).await {
                RefreshOutcome::Applied { generation, state, count } => {
                    info!("Refresh {} applied {} quotes ({})", generation, count, state.as_str());
                    print_board(title(board), &controller.snapshot().await, &options);
                }
                RefreshOutcome::Stale { generation, latest } => {
                    info!("Refresh {} superseded by {}", generation, latest);
                }
            }
        }));
        tasks = reap_finished(tasks).await?;
    }

    for task in tasks {
        task.await.context("Refresh task panicked")?;
    }
    Ok(())
}

/// Await the refresh tasks that have finished so a panic surfaces on the
/// next tick; the rest are handed back.
async fn reap_finished(tasks: Vec<JoinHandle<()>>) -> anyhow::Result<Vec<JoinHandle<()>>> {
    let (finished, running): (Vec<_>, Vec<_>) =
        tasks.into_iter().partition(|task| task.is_finished());
    for task in finished {
        task.await.context("Refresh task panicked")?;
    }
    Ok(running)
}
