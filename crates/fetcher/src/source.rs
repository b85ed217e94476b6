use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use satparity_common::types::RateBatch;

/// Rate fetch failures. All are transient from the poller's point of view.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate API returned status {0}")]
    Status(StatusCode),

    #[error("malformed rate payload: {0}")]
    Payload(String),

    #[error("rate payload has no usable USD rate")]
    MissingUsd,
}

/// Trait that every exchange rate provider must implement.
pub trait RateSource: Send + Sync {
    /// Fetch one batch of BTC rates for every currency the provider knows.
    fn fetch(&self) -> impl Future<Output = Result<RateBatch, FetchError>> + Send;

    /// Human-readable provider name (e.g., "yadio").
    fn name(&self) -> &'static str;
}

/// yadio.io exchange rate API (`GET /exrates/BTC`).
pub struct YadioSource {
    client: Client,
    url: String,
}

impl YadioSource {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RateSource for YadioSource {
    async fn fetch(&self) -> Result<RateBatch, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: serde_json::Value = response.json().await?;
        parse_rates(&body, Utc::now())
    }

    fn name(&self) -> &'static str {
        "yadio"
    }
}

/// Parse a `{"BTC": {"<CODE>": <rate>, ...}}` payload into a batch.
///
/// Non-numeric entries are dropped. The USD entry must be a positive number
/// since every estimate depends on it.
pub fn parse_rates(body: &serde_json::Value, fetched_at: DateTime<Utc>) -> Result<RateBatch, FetchError> {
    let table = body
        .get("BTC")
        .and_then(|v| v.as_object())
        .ok_or_else(|| FetchError::Payload("missing BTC rate table".to_string()))?;

    let mut rates = BTreeMap::new();
    for (code, value) in table {
        match value.as_f64() {
            Some(rate) => {
                rates.insert(code.to_ascii_uppercase(), rate);
            }
            None => {
                tracing::debug!(code = %code, value = %value, "Ignoring non-numeric rate");
            }
        }
    }

    let btc_usd_rate = rates
        .get("USD")
        .copied()
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .ok_or(FetchError::MissingUsd)?;

    Ok(RateBatch {
        fetched_at,
        btc_usd_rate,
        rates,
    })
}
