//! Ad-hoc parity estimation route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use satparity_common::error::AppError;
use satparity_common::types::{ParityBand, ParityInfo, RateSnapshot};
use satparity_engine::board::{classify_band, parity_label};
use satparity_engine::distance::format_time_distance;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/estimate", post(estimate))
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(default = "default_code")]
    pub code: String,
    pub units_per_btc: f64,
    pub btc_usd_rate: f64,
    /// Evaluation time; defaults to the current time
    pub now: Option<DateTime<Utc>>,
}

fn default_code() -> String {
    "XXX".to_string()
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub code: String,
    pub sat_price: f64,
    pub parity: ParityInfo,
    pub band: ParityBand,
    pub label: String,
    pub distance: String,
}

/// POST /api/estimate
///
/// Estimate parity for caller-supplied rates.
async fn estimate(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResponse>, AppError> {
    let Json(req) = payload?;
    let now = req.now.unwrap_or_else(Utc::now);
    let snapshot = RateSnapshot::new(req.code, req.units_per_btc, req.btc_usd_rate);

    let parity = state.estimator.estimate(&snapshot, now)?;
    let sat_price = snapshot.sat_price();

    Ok(Json(EstimateResponse {
        band: classify_band(sat_price, &parity, now),
        label: parity_label(&parity, now),
        distance: format_time_distance(parity.date, now),
        code: snapshot.code,
        sat_price,
        parity,
    }))
}
