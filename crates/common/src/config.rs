use std::net::SocketAddr;
use std::str::FromStr;

use serde::Deserialize;

use crate::types::PolicyVersion;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Exchange rate endpoint returning BTC rates for every currency
    pub rates_api_url: String,

    /// Rate refresh interval in seconds (default: 300 = 5 min)
    pub rates_poll_interval_secs: u64,

    /// HTTP timeout for a single rate fetch in seconds
    pub rates_http_timeout_secs: u64,

    /// Address the API server binds to
    pub api_bind_addr: SocketAddr,

    /// Which near-parity/past-guard revision the estimator runs with
    pub parity_policy: PolicyVersion,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        tracing::debug!(
            rates_api_url = %config.rates_api_url,
            poll_interval_secs = config.rates_poll_interval_secs,
            policy = %config.parity_policy,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            rates_api_url: lookup("RATES_API_URL")
                .unwrap_or_else(|| "https://api.yadio.io/exrates/BTC".to_string()),
            rates_poll_interval_secs: parse_positive(&lookup, "RATES_POLL_INTERVAL_SECS", "300")?,
            rates_http_timeout_secs: parse_positive(&lookup, "RATES_HTTP_TIMEOUT_SECS", "10")?,
            api_bind_addr: parse_or(&lookup, "API_BIND_ADDR", "0.0.0.0:3000")?,
            parity_policy: parse_or(&lookup, "PARITY_POLICY", "canonical")?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rates_api_url: "https://api.yadio.io/exrates/BTC".to_string(),
            rates_poll_interval_secs: 300,
            rates_http_timeout_secs: 10,
            api_bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            parity_policy: PolicyVersion::Canonical,
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> anyhow::Result<T> {
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|_| {
        anyhow::anyhow!(
            "{} must be a valid {}, got {:?}",
            key,
            std::any::type_name::<T>(),
            raw
        )
    })
}

/// Like `parse_or`, but zero is rejected.
fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> anyhow::Result<u64> {
    let value: u64 = parse_or(lookup, key, default)?;
    if value == 0 {
        anyhow::bail!("{} must be greater than zero", key);
    }
    Ok(value)
}
