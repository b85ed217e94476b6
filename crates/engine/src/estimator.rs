//! Parity estimator. Dates the moment one sat becomes worth one currency unit.
//!
//! For a currency trading at `units_per_btc`, parity requires BTC to cost
//! `btc_usd_rate * SATS_PER_BTC / units_per_btc` dollars. That target price is
//! located on the reference curve and its date linearly interpolated.
//!
//! Two heuristics suppress classification noise and are configured by
//! [`ParityPolicy`]:
//! - a near-parity rule that reports `now` for currencies sitting at parity
//! - a past guard that only reports `past` from an interpolated date when the
//!   currency is actually above parity

use chrono::{DateTime, Utc};

use satparity_common::types::{ParityInfo, ParityKind, PolicyVersion, RateSnapshot, SATS_PER_BTC};

use crate::curve::CurveStore;
use crate::error::EstimateError;

/// Upper bound (exclusive) of the canonical near-parity band `[1, upper)`.
pub const NEAR_PARITY_BAND_UPPER: f64 = 1.25;

/// Absolute tolerance around 1 used by the legacy policy.
pub const LEGACY_NEAR_PARITY_TOLERANCE: f64 = 0.1;

/// Rule deciding when a sat price counts as "at parity right now".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NearParity {
    /// `1 <= sat_price < upper`
    Band { upper: f64 },
    /// `|sat_price - 1| < tolerance`
    Tolerance { tolerance: f64 },
}

impl NearParity {
    pub fn contains(&self, sat_price: f64) -> bool {
        match *self {
            NearParity::Band { upper } => (1.0..upper).contains(&sat_price),
            NearParity::Tolerance { tolerance } => (sat_price - 1.0).abs() < tolerance,
        }
    }
}

/// Near-parity and past-guard rules the estimator runs with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParityPolicy {
    pub version: PolicyVersion,
    pub near_parity: NearParity,
    /// Interpolated dates at or before `now` only count as `past` when `sat_price > 1`
    pub past_requires_sat_above_one: bool,
}

impl ParityPolicy {
    pub fn canonical() -> Self {
        Self {
            version: PolicyVersion::Canonical,
            near_parity: NearParity::Band {
                upper: NEAR_PARITY_BAND_UPPER,
            },
            past_requires_sat_above_one: true,
        }
    }

    pub fn legacy() -> Self {
        Self {
            version: PolicyVersion::Legacy,
            near_parity: NearParity::Tolerance {
                tolerance: LEGACY_NEAR_PARITY_TOLERANCE,
            },
            past_requires_sat_above_one: false,
        }
    }
}

impl Default for ParityPolicy {
    fn default() -> Self {
        Self::canonical()
    }
}

impl From<PolicyVersion> for ParityPolicy {
    fn from(version: PolicyVersion) -> Self {
        match version {
            PolicyVersion::Canonical => Self::canonical(),
            PolicyVersion::Legacy => Self::legacy(),
        }
    }
}

/// Pure estimator over an immutable reference curve.
#[derive(Debug, Clone)]
pub struct ParityEstimator {
    curve: CurveStore,
    policy: ParityPolicy,
}

impl ParityEstimator {
    pub fn new(curve: CurveStore, policy: ParityPolicy) -> Self {
        Self { curve, policy }
    }

    pub fn curve(&self) -> &CurveStore {
        &self.curve
    }

    pub fn policy(&self) -> &ParityPolicy {
        &self.policy
    }

    /// Classify and date sat parity for one snapshot, evaluated at `now`.
    pub fn estimate(
        &self,
        snapshot: &RateSnapshot,
        now: DateTime<Utc>,
    ) -> Result<ParityInfo, EstimateError> {
        validate(snapshot)?;

        let sat_price = snapshot.sat_price();

        if self.policy.near_parity.contains(sat_price) {
            return Ok(ParityInfo {
                kind: ParityKind::Now,
                date: now,
            });
        }

        let usd_price_needed = snapshot.btc_usd_rate * (SATS_PER_BTC / snapshot.units_per_btc);

        if let Some(date) = self.interpolate(usd_price_needed) {
            let reached = date <= now && (!self.policy.past_requires_sat_above_one || sat_price > 1.0);
            let kind = if reached {
                ParityKind::Past
            } else {
                ParityKind::Future
            };

            tracing::debug!(
                code = %snapshot.code,
                sat_price,
                usd_price_needed,
                date = %date,
                kind = %kind,
                "Parity date interpolated on curve"
            );

            return Ok(ParityInfo { kind, date });
        }

        // Target price lies outside the curve: pin to whichever end applies
        let info = if sat_price >= 1.0 {
            ParityInfo {
                kind: ParityKind::Past,
                date: self.curve.first().date,
            }
        } else {
            ParityInfo {
                kind: ParityKind::Future,
                date: self.curve.last().date,
            }
        };

        tracing::debug!(
            code = %snapshot.code,
            sat_price,
            usd_price_needed,
            kind = %info.kind,
            "Parity price outside curve range"
        );

        Ok(info)
    }

    /// Date at which the curve reaches `usd_price`, or `None` if no bracket contains it.
    ///
    /// The first bracket `current.price <= usd_price <= next.price` wins. The
    /// offset into the bracket is computed in milliseconds and floored.
    pub fn interpolate(&self, usd_price: f64) -> Option<DateTime<Utc>> {
        let (current, next) = self
            .curve
            .brackets()
            .find(|(current, next)| current.price <= usd_price && usd_price <= next.price)?;

        let ratio = (usd_price - current.price) / (next.price - current.price);
        let start_ms = current.date.timestamp_millis();
        let span_ms = next.date.timestamp_millis() - start_ms;
        let offset_ms = (span_ms as f64 * ratio).floor() as i64;

        DateTime::from_timestamp_millis(start_ms + offset_ms)
    }
}

fn validate(snapshot: &RateSnapshot) -> Result<(), EstimateError> {
    for (field, value) in [
        ("units_per_btc", snapshot.units_per_btc),
        ("btc_usd_rate", snapshot.btc_usd_rate),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(EstimateError::InvalidInput {
                code: snapshot.code.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}
