//! EastMoney response structures and field decoding.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::models::KlineBar;

/// Every EastMoney endpoint wraps its payload the same way.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    /// Return code, 0 on success
    #[serde(default)]
    pub rc: i64,
    /// `null` when the security is unknown
    pub data: Option<T>,
}

/// `/api/qt/stock/get` payload.
///
/// Prices arrive as integers scaled by `10^f59`; suspended shares report
/// `"-"` instead of a number.
#[derive(Debug, Default, Deserialize)]
pub(super) struct SnapshotData {
    /// Latest price
    #[serde(default)]
    pub f43: Value,
    /// High
    #[serde(default)]
    pub f44: Value,
    /// Low
    #[serde(default)]
    pub f45: Value,
    /// Open
    #[serde(default)]
    pub f46: Value,
    /// Volume (lots)
    #[serde(default)]
    pub f47: Value,
    /// Turnover (CNY)
    #[serde(default)]
    pub f48: Value,
    /// Code
    #[serde(default)]
    pub f57: Value,
    /// Name
    #[serde(default)]
    pub f58: Value,
    /// Decimal places used by the price fields
    #[serde(default)]
    pub f59: Value,
    /// Previous close
    #[serde(default)]
    pub f60: Value,
    /// Total market cap (CNY)
    #[serde(default)]
    pub f116: Value,
    /// Change
    #[serde(default)]
    pub f169: Value,
    /// Change percent, scaled by 100
    #[serde(default)]
    pub f170: Value,
}

/// Field list requested from the snapshot endpoint.
pub(super) const SNAPSHOT_FIELDS: &str = "f43,f44,f45,f46,f47,f48,f57,f58,f59,f60,f116,f169,f170";

/// Scale used for `f170`.
pub(super) const PERCENT_SCALE: f64 = 100.0;

/// Scale applied when `f59` is absent (two decimals, i.e. stocks).
pub(super) const DEFAULT_PRICE_DECIMALS: i32 = 2;

impl SnapshotData {
    /// Divisor for the price fields: 100 for stocks, 1000 for funds.
    pub fn price_scale(&self) -> f64 {
        let decimals = self
            .f59
            .as_i64()
            .map(|d| d.clamp(0, 6) as i32)
            .unwrap_or(DEFAULT_PRICE_DECIMALS);
        10f64.powi(decimals)
    }
}

/// `/api/qt/stock/kline/get` payload.
#[derive(Debug, Deserialize)]
pub(super) struct KlineData {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub klines: Vec<String>,
}

/// Columns requested from the K-line endpoint, in this order:
/// date, open, close, high, low, volume, change percent.
pub(super) const KLINE_FIELDS: &str = "f51,f52,f53,f54,f55,f56,f59";

/// Read a possibly-string, possibly-missing number and divide by `scale`.
pub(super) fn scaled(value: &Value, scale: f64) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|v| v.is_finite())
        .map(|v| v / scale)
        .unwrap_or(0.0)
}

pub(super) fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Parse one `date,open,close,high,low,volume,changePercent` row.
///
/// Rows with too few columns or an unreadable date are skipped; unreadable
/// numbers read as zero.
pub(super) fn parse_kline(line: &str) -> Option<KlineBar> {
    let cols: Vec<&str> = line.split(',').collect();
    if cols.len() < 7 {
        return None;
    }

    let date = NaiveDate::parse_from_str(cols[0].trim(), "%Y-%m-%d").ok()?;
    let number = |i: usize| -> f64 {
        cols[i]
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    };

    Some(KlineBar {
        date,
        open: number(1),
        close: number(2),
        high: number(3),
        low: number(4),
        volume: number(5),
        change_percent: number(6),
    })
}
