use std::fmt;

use crate::errors::MarketDataError;

/// Mainland exchange an A-share code trades on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Exchange {
    Shanghai,
    Shenzhen,
}

impl Exchange {
    /// Derive the exchange from a bare 6-digit code.
    ///
    /// Shanghai codes start with `6`; everything else is routed to Shenzhen.
    pub fn of(code: &str) -> Self {
        if code.starts_with('6') {
            Self::Shanghai
        } else {
            Self::Shenzhen
        }
    }

    /// Tencent-style prefix (`sh` / `sz`).
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Shanghai => "sh",
            Self::Shenzhen => "sz",
        }
    }

    /// EastMoney market id used in `secid`.
    pub fn eastmoney_market(&self) -> u8 {
        match self {
            Self::Shanghai => 1,
            Self::Shenzhen => 0,
        }
    }
}

/// A validated 6-digit A-share code.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct AShareCode {
    code: String,
    exchange: Exchange,
}

impl AShareCode {
    /// Parse a user-supplied code.
    ///
    /// Accepts `600519` as well as an already prefixed `sh600519` / `SZ000858`.
    pub fn parse(input: &str) -> Result<Self, MarketDataError> {
        let trimmed = input.trim().to_ascii_lowercase();
        let bare = trimmed
            .strip_prefix("sh")
            .or_else(|| trimmed.strip_prefix("sz"))
            .unwrap_or(&trimmed);

        if bare.len() != 6 || !bare.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MarketDataError::ValidationFailed {
                message: format!("'{}' is not a 6-digit A-share code", input.trim()),
            });
        }

        Ok(Self {
            code: bare.to_string(),
            exchange: Exchange::of(bare),
        })
    }

    /// The bare code, e.g. `600519`.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn exchange(&self) -> Exchange {
        self.exchange
    }

    /// Exchange-prefixed form, e.g. `sh600519`.
    pub fn prefixed(&self) -> String {
        format!("{}{}", self.exchange.prefix(), self.code)
    }

    /// Name of the variable the script feed assigns, e.g. `v_sh600519`.
    pub fn script_variable(&self) -> String {
        format!("v_{}", self.prefixed())
    }

    /// EastMoney security id, e.g. `1.600519`.
    pub fn secid(&self) -> String {
        format!("{}.{}", self.exchange.eastmoney_market(), self.code)
    }
}

impl fmt::Display for AShareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shanghai_code() {
        let code = AShareCode::parse("600519").unwrap();
        assert_eq!(code.exchange(), Exchange::Shanghai);
        assert_eq!(code.prefixed(), "sh600519");
        assert_eq!(code.script_variable(), "v_sh600519");
        assert_eq!(code.secid(), "1.600519");
    }

    #[test]
    fn test_shenzhen_code() {
        let code = AShareCode::parse("000858").unwrap();
        assert_eq!(code.exchange(), Exchange::Shenzhen);
        assert_eq!(code.prefixed(), "sz000858");
        assert_eq!(code.secid(), "0.000858");

        let growth = AShareCode::parse("300750").unwrap();
        assert_eq!(growth.prefixed(), "sz300750");
    }

    #[test]
    fn test_prefixed_input_is_accepted() {
        let code = AShareCode::parse(" SH600036 ").unwrap();
        assert_eq!(code.code(), "600036");
        assert_eq!(code.to_string(), "600036");
    }

    #[test]
    fn test_invalid_codes_rejected() {
        assert!(AShareCode::parse("").is_err());
        assert!(AShareCode::parse("60051").is_err());
        assert!(AShareCode::parse("AAPL").is_err());
        assert!(AShareCode::parse("6005190").is_err());
    }
}
