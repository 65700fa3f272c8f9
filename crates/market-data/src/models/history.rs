use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Real-time snapshot of a single A-share from EastMoney.
///
/// Prices are already de-scaled (EastMoney reports them as integers).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    pub change: f64,
    pub changes_percentage: f64,
    /// Traded volume in lots
    pub volume: f64,
    /// Traded amount in CNY
    pub turnover: f64,
    pub market_cap: f64,
}

/// One trading day of OHLC data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KlineBar {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub change_percent: f64,
}
