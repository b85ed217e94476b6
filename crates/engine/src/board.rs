//! Board builder. Turns one fetched rate batch into renderable currency cards.
//!
//! Every currency in the batch is run through the estimator, classified into a
//! colour band and labelled. Currencies with invalid rates are skipped rather
//! than failing the whole batch.

use chrono::{DateTime, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use satparity_common::currency::currency_name;
use satparity_common::types::{ParityBand, ParityInfo, ParityKind, RateBatch};

use crate::distance::format_time_distance;
use crate::estimator::ParityEstimator;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Past parities older than this are hidden unless historic rates are requested.
const HISTORIC_WINDOW: Months = Months::new(36);

/// A single currency ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyParity {
    pub code: String,
    pub name: String,
    pub units_per_btc: f64,
    pub sat_price: f64,
    pub parity: ParityInfo,
    pub band: ParityBand,
    pub label: String,
}

/// All currencies of one batch, sorted by sat price (descending).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParityBoard {
    pub fetched_at: DateTime<Utc>,
    pub btc_usd_rate: f64,
    pub currencies: Vec<CurrencyParity>,
    /// Codes left out because their snapshot was invalid
    pub skipped: Vec<String>,
}

impl ParityBoard {
    /// Currencies to render. Without `show_historic`, currencies that hit
    /// parity before midnight UTC of the same calendar day three years
    /// before `now` are dropped.
    pub fn visible(&self, show_historic: bool, now: DateTime<Utc>) -> Vec<&CurrencyParity> {
        let cutoff = now
            .date_naive()
            .checked_sub_months(HISTORIC_WINDOW)
            .map(|day| day.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        self.currencies
            .iter()
            .filter(|c| show_historic || c.parity.kind != ParityKind::Past || c.parity.date >= cutoff)
            .collect()
    }

    /// Case-insensitive lookup by currency code.
    pub fn find(&self, code: &str) -> Option<&CurrencyParity> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

/// Estimate every currency in `batch` at `now`.
pub fn build_board(
    estimator: &ParityEstimator,
    batch: &RateBatch,
    now: DateTime<Utc>,
) -> ParityBoard {
    let mut currencies = Vec::with_capacity(batch.rates.len());
    let mut skipped = Vec::new();

    for snapshot in batch.snapshots() {
        match estimator.estimate(&snapshot, now) {
            Ok(parity) => {
                let sat_price = snapshot.sat_price();
                currencies.push(CurrencyParity {
                    name: currency_name(&snapshot.code)
                        .map(str::to_string)
                        .unwrap_or_else(|| snapshot.code.clone()),
                    units_per_btc: snapshot.units_per_btc,
                    sat_price,
                    band: classify_band(sat_price, &parity, now),
                    label: parity_label(&parity, now),
                    parity,
                    code: snapshot.code,
                });
            }
            Err(e) => {
                tracing::warn!(code = %snapshot.code, error = %e, "Skipping currency with invalid rate");
                skipped.push(snapshot.code);
            }
        }
    }

    currencies.sort_by(|a, b| {
        b.sat_price
            .total_cmp(&a.sat_price)
            .then_with(|| a.code.cmp(&b.code))
    });

    tracing::debug!(
        currencies = currencies.len(),
        skipped = skipped.len(),
        "Built parity board"
    );

    ParityBoard {
        fetched_at: batch.fetched_at,
        btc_usd_rate: batch.btc_usd_rate,
        currencies,
        skipped,
    }
}

/// Colour band for a currency card.
pub fn classify_band(sat_price: f64, parity: &ParityInfo, now: DateTime<Utc>) -> ParityBand {
    if sat_price >= 1.0 {
        return if parity.kind == ParityKind::Now {
            ParityBand::JustHit
        } else {
            ParityBand::Past
        };
    }

    let days_to_parity = match parity.kind {
        ParityKind::Future => (parity.date - now).num_milliseconds() as f64 / MS_PER_DAY,
        _ => 0.0,
    };

    if days_to_parity <= 365.0 {
        ParityBand::NextYear
    } else if days_to_parity <= 365.0 * 4.0 {
        ParityBand::WithinFourYears
    } else {
        ParityBand::Beyond
    }
}

/// Card caption, e.g. `"Hit parity 3 years ago"`.
pub fn parity_label(parity: &ParityInfo, now: DateTime<Utc>) -> String {
    match parity.kind {
        ParityKind::Past => format!("Hit parity {} ago", format_time_distance(parity.date, now)),
        ParityKind::Future => format!(
            "Expected parity in {}",
            format_time_distance(parity.date, now)
        ),
        ParityKind::Now => "Just hit parity!".to_string(),
    }
}
