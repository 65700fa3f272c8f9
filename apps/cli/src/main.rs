mod commands;
mod config;
mod main_lib;
mod render;

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::BoardArgs;
use config::Config;
use main_lib::init_tracing;
use quoteboard_core::board::SortKey;
use quoteboard_core::{BoardKind, Dashboard};

#[derive(Parser)]
#[command(name = "quoteboard")]
#[command(about = "A-share and US stock quotes in the terminal", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  quoteboard a-share --sort marketCap\n  quoteboard us --symbols AAPL TSLA\n  quoteboard watch add nio\n  quoteboard history 600519 --limit 10\n  quoteboard watch-board --board us --interval 5 --rounds 3\n"
)]
struct Cli {
    /// FinancialModelingPrep API key (overrides QB_FMP_API_KEY)
    #[arg(long, global = true)]
    fmp_api_key: Option<String>,

    /// Watch-list service base URL (overrides QB_WATCHLIST_URL)
    #[arg(long, global = true)]
    watchlist_url: Option<String>,

    /// HTTP timeout in milliseconds (overrides QB_REQUEST_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Args)]
struct TableArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Rows per page (A-share default 5, US shows all)
    #[arg(long)]
    page_size: Option<usize>,
    /// Column to sort by, descending: price, change, changesPercentage, marketCap
    #[arg(long, default_value = "changesPercentage")]
    sort: SortKey,
    /// Symbols to show instead of the defaults
    #[arg(long, num_args = 1..)]
    symbols: Vec<String>,
}

impl From<TableArgs> for BoardArgs {
    fn from(args: TableArgs) -> Self {
        Self {
            page: args.page,
            page_size: args.page_size,
            sort: args.sort,
            symbols: args.symbols,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BoardChoice {
    AShare,
    Us,
    Watchlist,
}

impl From<BoardChoice> for BoardKind {
    fn from(choice: BoardChoice) -> Self {
        match choice {
            BoardChoice::AShare => BoardKind::AShare,
            BoardChoice::Us => BoardKind::Us,
            BoardChoice::Watchlist => BoardKind::Watchlist,
        }
    }
}

#[derive(Subcommand)]
enum WatchCommand {
    /// Show the watch list with prices
    List,
    /// Add a symbol
    Add { symbol: String },
    /// Remove a symbol
    Delete { symbol: String },
}

#[derive(Subcommand)]
enum CliCommand {
    /// Shanghai / Shenzhen quotes (Tencent feed)
    AShare(TableArgs),
    /// US quotes (FinancialModelingPrep)
    Us(TableArgs),
    /// Remote watch list
    Watch {
        #[command(subcommand)]
        command: WatchCommand,
    },
    /// Real-time detail for one A-share (EastMoney)
    Snapshot { code: String },
    /// Daily K-line for one A-share, newest first (EastMoney)
    History {
        code: String,
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },
    /// Refresh a board periodically
    WatchBoard {
        #[arg(long, value_enum, default_value = "a-share")]
        board: BoardChoice,
        /// Seconds between refreshes
        #[arg(long, default_value_t = 10)]
        interval: u64,
        /// Stop after this many refreshes; runs until interrupted when omitted
        #[arg(long)]
        rounds: Option<usize>,
        #[command(flatten)]
        table: TableArgs,
    },
}

/// Exit status for input rejected before any request was made.
const EXIT_INVALID_INPUT: i32 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    init_tracing(&config.log_format);

    if let Some(key) = cli.fmp_api_key {
        config.fmp_api_key = key;
    }
    if let Some(url) = cli.watchlist_url {
        config.watchlist_url = url;
    }
    if let Some(ms) = cli.timeout_ms {
        config.request_timeout = Duration::from_millis(ms);
    }

    let dashboard = Arc::new(Dashboard::new(&config.dashboard_settings()));
    tracing::debug!("Request timeout {:?}", config.request_timeout);

    if let Err(err) = run(cli.command, dashboard).await {
        if let Some(core_err) = err.downcast_ref::<quoteboard_core::Error>() {
            if core_err.is_validation() {
                eprintln!("{}", core_err);
                std::process::exit(EXIT_INVALID_INPUT);
            }
        }
        return Err(err);
    }
    Ok(())
}

async fn run(command: CliCommand, dashboard: Arc<Dashboard>) -> anyhow::Result<()> {
    match command {
        CliCommand::AShare(args) => {
            commands::show_board(&dashboard, BoardKind::AShare, args.into()).await
        }
        CliCommand::Us(args) => commands::show_board(&dashboard, BoardKind::Us, args.into()).await,
        CliCommand::Watch { command } => match command {
            WatchCommand::List => commands::watch_list(&dashboard).await,
            WatchCommand::Add { symbol } => commands::watch_add(&dashboard, &symbol).await,
            WatchCommand::Delete { symbol } => commands::watch_delete(&dashboard, &symbol).await,
        },
        CliCommand::Snapshot { code } => commands::snapshot(&dashboard, &code).await,
        CliCommand::History { code, limit } => commands::history(&dashboard, &code, limit).await,
        CliCommand::WatchBoard {
            board,
            interval,
            rounds,
            table,
        } => {
            commands::watch_board(
                dashboard,
                board.into(),
                table.into(),
                Duration::from_secs(interval.max(1)),
                rounds,
            )
            .await
        }
    }
}
