use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use quoteboard_market_data::Quote;

/// Sortable numeric columns. Every column sorts descending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    Price,
    Change,
    #[default]
    ChangesPercentage,
    MarketCap,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Price,
        SortKey::Change,
        SortKey::ChangesPercentage,
        SortKey::MarketCap,
    ];

    pub fn value(&self, quote: &Quote) -> f64 {
        match self {
            Self::Price => quote.price,
            Self::Change => quote.change,
            Self::ChangesPercentage => quote.changes_percentage,
            Self::MarketCap => quote.market_cap,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Change => "change",
            Self::ChangesPercentage => "changesPercentage",
            Self::MarketCap => "marketCap",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "price" => Ok(Self::Price),
            "change" => Ok(Self::Change),
            "changespercentage" | "percent" | "pct" => Ok(Self::ChangesPercentage),
            "marketcap" | "cap" => Ok(Self::MarketCap),
            other => Err(format!("unknown sort column '{}'", other)),
        }
    }
}

/// Sort in place, largest first. Ties keep their original order.
pub fn sort_quotes(quotes: &mut [Quote], key: SortKey) {
    quotes.sort_by(|a, b| descending(key.value(a), key.value(b)));
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
