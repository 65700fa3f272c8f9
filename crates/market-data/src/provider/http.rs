//! Shared HTTP plumbing for the concrete providers.

use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};

use crate::errors::MarketDataError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build a client with a timeout and optional `Referer`.
pub(crate) fn build_client(timeout: Duration, referer: Option<&'static str>) -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    if let Some(referer) = referer {
        headers.insert(REFERER, HeaderValue::from_static(referer));
    }

    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// GET `url` and return the raw body, mapping transport and status failures.
pub(crate) async fn get_bytes(
    client: &Client,
    provider: &str,
    url: &str,
    params: &[(&str, &str)],
) -> Result<Vec<u8>, MarketDataError> {
    debug!("{} request: {} with {} params", provider, url, params.len());

    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| MarketDataError::from_request(provider, e))?;

    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: "Rate limited".to_string(),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: format!("HTTP {} - {}", status, body.trim()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| MarketDataError::from_request(provider, e))?;

    Ok(bytes.to_vec())
}

/// GET `url` and return the body as UTF-8 text.
pub(crate) async fn get_text(
    client: &Client,
    provider: &str,
    url: &str,
    params: &[(&str, &str)],
) -> Result<String, MarketDataError> {
    let bytes = get_bytes(client, provider, url, params).await?;
    String::from_utf8(bytes).map_err(|e| MarketDataError::MalformedPayload {
        provider: provider.to_string(),
        message: format!("Body is not UTF-8: {}", e),
    })
}
