//! Rate refresh status endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use satparity_common::types::PolicyVersion;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/status", get(get_status))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub ready: bool,
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub refreshes: u64,
    pub currencies: usize,
    pub policy: PolicyVersion,
    pub rates_api_url: String,
    pub poll_interval_secs: u64,
}

/// GET /api/status
///
/// Outcome of the most recent rate refresh.
async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let guard = state.board.read().await;

    Json(StatusResponse {
        ready: guard.board.is_some(),
        last_attempt: guard.last_attempt,
        last_success: guard.last_success,
        last_error: guard.last_error.clone(),
        refreshes: guard.refreshes,
        currencies: guard.board.as_ref().map_or(0, |b| b.currencies.len()),
        policy: state.estimator.policy().version,
        rates_api_url: state.config.rates_api_url.clone(),
        poll_interval_secs: state.config.rates_poll_interval_secs,
    })
}
