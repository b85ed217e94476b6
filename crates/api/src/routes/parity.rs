//! Parity board and timeline routes.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use satparity_common::error::AppError;
use satparity_engine::board::{CurrencyParity, ParityBoard};
use satparity_engine::timeline::Timeline;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/parity", get(list_parity))
        .route("/api/parity/{code}", get(get_currency))
        .route("/api/timeline", get(get_timeline))
}

#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    /// Include currencies that hit parity more than three years ago
    #[serde(default)]
    pub show_historic: bool,
    /// Evaluation time for the historic filter and timeline; defaults to the current time
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

impl BoardQuery {
    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub fetched_at: DateTime<Utc>,
    pub btc_usd_rate: f64,
    pub show_historic: bool,
    pub currencies: Vec<CurrencyParity>,
    pub skipped: Vec<String>,
}

fn not_ready() -> AppError {
    AppError::Unavailable("Exchange rates have not been fetched yet".to_string())
}

/// GET /api/parity
///
/// Currencies of the latest batch, sorted by sat price.
async fn list_parity(
    State(state): State<AppState>,
    query: Result<Query<BoardQuery>, QueryRejection>,
) -> Result<Json<BoardResponse>, AppError> {
    let Query(query) = query?;
    let guard = state.board.read().await;
    let board: &ParityBoard = guard.board.as_ref().ok_or_else(not_ready)?;

    let currencies = board
        .visible(query.show_historic, query.now())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(BoardResponse {
        fetched_at: board.fetched_at,
        btc_usd_rate: board.btc_usd_rate,
        show_historic: query.show_historic,
        currencies,
        skipped: board.skipped.clone(),
    }))
}

/// GET /api/parity/{code}
///
/// A single currency, regardless of the historic filter.
async fn get_currency(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CurrencyParity>, AppError> {
    let guard = state.board.read().await;
    let board = guard.board.as_ref().ok_or_else(not_ready)?;

    board
        .find(&code)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Currency {} not found", code)))
}

/// GET /api/timeline
///
/// Parity dates placed along the reference curve.
async fn get_timeline(
    State(state): State<AppState>,
    query: Result<Query<BoardQuery>, QueryRejection>,
) -> Result<Json<Timeline>, AppError> {
    let Query(query) = query?;
    let guard = state.board.read().await;
    let board = guard.board.as_ref().ok_or_else(not_ready)?;
    let now = query.now();

    let timeline = Timeline::build(
        state.estimator.curve(),
        board.visible(query.show_historic, now),
        now,
    );
    Ok(Json(timeline))
}
