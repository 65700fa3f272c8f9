use std::time::Duration;

use quoteboard_core::watchlist::DEFAULT_WATCHLIST_URL;
use quoteboard_core::DashboardSettings;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub struct Config {
    pub fmp_api_key: String,
    pub watchlist_url: String,
    pub request_timeout: Duration,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fmp_api_key = lookup("QB_FMP_API_KEY")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "demo".into());
        let watchlist_url =
            lookup("QB_WATCHLIST_URL").unwrap_or_else(|| DEFAULT_WATCHLIST_URL.into());
        let timeout_ms: u64 = lookup("QB_REQUEST_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        let log_format = lookup("QB_LOG_FORMAT").unwrap_or_else(|| "text".into());
        Self {
            fmp_api_key,
            watchlist_url,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        }
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            fmp_api_key: self.fmp_api_key.clone(),
            watchlist_url: self.watchlist_url.clone(),
            request_timeout: self.request_timeout,
        }
    }
}
