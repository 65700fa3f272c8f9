//! Table logic for the quote boards: sorting, pagination and cell
//! formatting.

mod format;
mod page;
mod sort;

pub use format::{format_change, format_market_cap, format_percent, format_price};
pub use page::{paginate, Page};
pub use sort::{sort_quotes, SortKey};

use quoteboard_market_data::Market;

/// Rows per page when the user does not choose; `None` shows everything.
pub fn default_page_size(market: Market) -> Option<usize> {
    match market {
        Market::AShare => Some(5),
        Market::UsShare => None,
    }
}
