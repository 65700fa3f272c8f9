//! Plain-text tables for the terminal.

use quoteboard_core::board::{
    format_change, format_market_cap, format_percent, format_price, paginate, sort_quotes, SortKey,
};
use quoteboard_core::BoardSnapshot;
use quoteboard_market_data::{BatchOrigin, KlineBar, Market, Quote, Snapshot};

pub struct TableOptions {
    pub sort: SortKey,
    pub page: usize,
    /// `None` prints every row on one page
    pub page_size: Option<usize>,
    /// Unit system for market caps; per-row guess when `None`
    pub market: Option<Market>,
}

pub fn print_board(title: &str, snapshot: &BoardSnapshot, options: &TableOptions) {
    let mut quotes = snapshot.quotes.clone();
    sort_quotes(&mut quotes, options.sort);

    let page_size = options.page_size.unwrap_or(quotes.len().max(1));
    let page = paginate(&quotes, options.page, page_size);

    println!("{}", title);
    if let Some(BatchOrigin::Fallback { reason }) = &snapshot.origin {
        println!("(placeholder data: {})", reason);
    }
    if let Some(updated) = snapshot.updated_at {
        println!("updated {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    println!(
        "{:<8} {:<28} {:>10} {:>9} {:>9} {:>12}",
        "SYMBOL", "NAME", "PRICE", "CHANGE", "PCT", "MKT CAP"
    );
    for quote in page.items {
        println!("{}", row(quote, options.market));
    }
    println!(
        "page {}/{} ({} rows, sorted by {})",
        options.page,
        page.total_pages(),
        page.total,
        options.sort
    );
}

fn row(quote: &Quote, market: Option<Market>) -> String {
    let market = market.unwrap_or_else(|| Market::of_symbol(&quote.symbol));
    format!(
        "{:<8} {:<28} {:>10} {:>9} {:>9} {:>12}",
        quote.symbol,
        truncate(&quote.name, 28),
        format_price(quote.price),
        format_change(quote.change),
        format_percent(quote.changes_percentage),
        format_market_cap(quote.market_cap, market)
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub fn print_snapshot(s: &Snapshot) {
    println!("{} {}", s.symbol, s.name);
    println!("  price       {}", format_price(s.price));
    println!(
        "  change      {} ({})",
        format_change(s.change),
        format_percent(s.changes_percentage)
    );
    println!("  open        {}", format_price(s.open));
    println!("  high / low  {} / {}", format_price(s.high), format_price(s.low));
    println!("  prev close  {}", format_price(s.previous_close));
    println!("  volume      {:.0}", s.volume);
    println!("  turnover    {}", format_market_cap(s.turnover, Market::AShare));
    println!("  market cap  {}", format_market_cap(s.market_cap, Market::AShare));
}

pub fn print_history(code: &str, bars: &[KlineBar]) {
    println!("{} daily bars (newest first)", code);
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>12} {:>8}",
        "DATE", "OPEN", "CLOSE", "HIGH", "LOW", "VOLUME", "PCT"
    );
    for bar in bars {
        println!(
            "{:<10} {:>10} {:>10} {:>10} {:>10} {:>12.0} {:>8}",
            bar.date.format("%Y-%m-%d"),
            format_price(bar.open),
            format_price(bar.close),
            format_price(bar.high),
            format_price(bar.low),
            bar.volume,
            format_percent(bar.change_percent)
        );
    }
}
