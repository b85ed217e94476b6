use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of sats in one bitcoin.
pub const SATS_PER_BTC: f64 = 100_000_000.0;

/// A (date, USD price of one BTC) anchor on the reference curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub date: DateTime<Utc>,
    pub price: f64,
}

/// A live rate observation for one currency, valid for one fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub code: String,
    /// Units of the currency one bitcoin buys
    pub units_per_btc: f64,
    /// USD price of one bitcoin at fetch time
    pub btc_usd_rate: f64,
}

impl RateSnapshot {
    pub fn new(code: impl Into<String>, units_per_btc: f64, btc_usd_rate: f64) -> Self {
        Self {
            code: code.into(),
            units_per_btc,
            btc_usd_rate,
        }
    }

    /// Value of one sat expressed in this currency.
    pub fn sat_price(&self) -> f64 {
        self.units_per_btc / SATS_PER_BTC
    }
}

/// Whether sat parity lies behind, ahead of, or at the evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParityKind {
    Past,
    Future,
    Now,
}

impl std::fmt::Display for ParityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParityKind::Past => write!(f, "past"),
            ParityKind::Future => write!(f, "future"),
            ParityKind::Now => write!(f, "now"),
        }
    }
}

/// Classified parity outcome derived from a single snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityInfo {
    pub kind: ParityKind,
    pub date: DateTime<Utc>,
}

/// Revision of the near-parity and past-guard rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyVersion {
    /// `[1, 1.25)` near-parity band plus the `sat_price > 1` past guard
    Canonical,
    /// `|sat_price - 1| < 0.1` tolerance, no past guard
    Legacy,
}

impl std::fmt::Display for PolicyVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyVersion::Canonical => write!(f, "canonical"),
            PolicyVersion::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for PolicyVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "canonical" => Ok(PolicyVersion::Canonical),
            "legacy" => Ok(PolicyVersion::Legacy),
            other => Err(format!("unknown parity policy: {}", other)),
        }
    }
}

/// Colour bucket a rendered currency falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityBand {
    /// At parity right now
    JustHit,
    /// Parity reached some time ago
    Past,
    /// Parity expected within a year
    NextYear,
    /// Parity expected within four years
    WithinFourYears,
    /// Parity further out than four years
    Beyond,
}

impl std::fmt::Display for ParityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParityBand::JustHit => write!(f, "just_hit"),
            ParityBand::Past => write!(f, "past"),
            ParityBand::NextYear => write!(f, "next_year"),
            ParityBand::WithinFourYears => write!(f, "within_four_years"),
            ParityBand::Beyond => write!(f, "beyond"),
        }
    }
}

/// One fetched batch of BTC exchange rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBatch {
    pub fetched_at: DateTime<Utc>,
    pub btc_usd_rate: f64,
    /// Currency code -> units of that currency per BTC
    pub rates: BTreeMap<String, f64>,
}

impl RateBatch {
    /// Snapshots for every currency in the batch except BTC itself.
    pub fn snapshots(&self) -> impl Iterator<Item = RateSnapshot> + '_ {
        self.rates
            .iter()
            .filter(|(code, _)| code.as_str() != "BTC")
            .map(|(code, rate)| RateSnapshot::new(code.clone(), *rate, self.btc_usd_rate))
    }
}
