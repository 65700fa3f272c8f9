use std::fmt;
use std::str::FromStr;

/// The two dashboard markets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Market {
    /// Shanghai / Shenzhen listed shares, quoted in CNY.
    AShare,
    /// US listed shares, quoted in USD.
    UsShare,
}

const A_SHARE_DEFAULTS: &[&str] = &["600519", "601318", "600036", "601166", "600276", "000858"];

const US_DEFAULTS: &[&str] = &["AAPL", "BRK B", "FFAI", "GME", "NIO", "TSLA"];

impl Market {
    /// Symbols shown when the user does not pass any.
    pub fn default_symbols(&self) -> Vec<String> {
        let list = match self {
            Self::AShare => A_SHARE_DEFAULTS,
            Self::UsShare => US_DEFAULTS,
        };
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Guess the market from a symbol: six digits is an A-share code.
    pub fn of_symbol(symbol: &str) -> Self {
        let trimmed = symbol.trim();
        if trimmed.len() == 6 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Self::AShare
        } else {
            Self::UsShare
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AShare => "a-share",
            Self::UsShare => "us",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a-share" | "ashare" | "cn" => Ok(Self::AShare),
            "us" | "us-share" => Ok(Self::UsShare),
            other => Err(format!("unknown market '{}'", other)),
        }
    }
}
