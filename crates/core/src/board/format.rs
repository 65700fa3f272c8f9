use quoteboard_market_data::Market;

/// Market cap with the market's unit suffix; blank when unknown.
///
/// A-share: 万亿 (1e12), 亿 (1e8), 万 (1e4). US: T, B, M, K.
pub fn format_market_cap(value: f64, market: Market) -> String {
    if !value.is_finite() || value <= 0.0 {
        return String::new();
    }

    let units: &[(f64, &str)] = match market {
        Market::AShare => &[(1e12, "万亿"), (1e8, "亿"), (1e4, "万")],
        Market::UsShare => &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")],
    };

    units
        .iter()
        .find(|(scale, _)| value >= *scale)
        .map(|(scale, suffix)| format!("{:.2}{}", value / scale, suffix))
        .unwrap_or_else(|| format!("{:.0}", value))
}

pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_change(value: f64) -> String {
    format!("{:+.2}", value)
}

pub fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_share_units() {
        assert_eq!(format_market_cap(2.26e12, Market::AShare), "2.26万亿");
        assert_eq!(format_market_cap(5_000_000.0, Market::AShare), "500.00万");
        assert_eq!(format_market_cap(3.5e9, Market::AShare), "35.00亿");
        assert_eq!(format_market_cap(999.0, Market::AShare), "999");
    }

    #[test]
    fn test_us_units() {
        assert_eq!(format_market_cap(3.1e12, Market::UsShare), "3.10T");
        assert_eq!(format_market_cap(1.2e10, Market::UsShare), "12.00B");
        assert_eq!(format_market_cap(4.5e6, Market::UsShare), "4.50M");
        assert_eq!(format_market_cap(1500.0, Market::UsShare), "1.50K");
    }

    #[test]
    fn test_zero_and_nan_are_blank() {
        assert_eq!(format_market_cap(0.0, Market::UsShare), "");
        assert_eq!(format_market_cap(f64::NAN, Market::AShare), "");
    }

    #[test]
    fn test_signed_columns() {
        assert_eq!(format_price(1800.0), "1800.00");
        assert_eq!(format_change(10.0), "+10.00");
        assert_eq!(format_change(-0.456), "-0.46");
        assert_eq!(format_percent(0.56), "+0.56%");
    }
}
