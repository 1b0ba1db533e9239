use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

pub const FEED_PATH: &str = "data/market.json";

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IndexQuote {
    pub chg_pct: f64,
}

/// One fetched instance of the market data payload. Replaced wholesale on
/// every successful refresh cycle; never persisted.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MarketSnapshot {
    pub egx30: IndexQuote,
    pub egx70: IndexQuote,
    pub usd_egp: f64,
}

#[derive(Debug, Error)]
pub enum FeedError {
    /// Request rejected, timed out, or answered with a non-success status.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Body was not valid JSON or did not match the snapshot shape.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Client for the external market feed. Cheap to clone.
#[derive(Clone)]
pub struct FeedClient {
    http: Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Fetches and parses the current snapshot. Exactly one attempt: a
    /// failed cycle waits for the next scheduled refresh instead of
    /// retrying.
    pub async fn fetch(&self) -> Result<MarketSnapshot, FeedError> {
        let body = self
            .http
            .get(self.snapshot_url())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_snapshot(&body)
    }

    /// Feed URL with a cache-busting timestamp so intermediaries never
    /// serve a stale snapshot.
    fn snapshot_url(&self) -> String {
        format!(
            "{}/{FEED_PATH}?_={}",
            self.base_url,
            Utc::now().timestamp_millis()
        )
    }
}

pub fn parse_snapshot(body: &str) -> Result<MarketSnapshot, FeedError> {
    Ok(serde_json::from_str(body)?)
}

/// Flattens an error and its source chain into one log-friendly line.
pub fn describe_error(error: &dyn std::error::Error) -> String {
    let mut pieces = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() {
            pieces.push(format!("caused by {text}"));
        }
        source = cause.source();
    }
    pieces.join(" | ")
}
