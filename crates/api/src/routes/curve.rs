//! Reference curve route.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use satparity_common::types::{ControlPoint, PolicyVersion};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/curve", get(get_curve))
}

#[derive(Debug, Serialize)]
pub struct CurveResponse {
    pub policy: PolicyVersion,
    pub points: Vec<ControlPoint>,
}

/// GET /api/curve
///
/// Control points the estimator interpolates on.
async fn get_curve(State(state): State<AppState>) -> Json<CurveResponse> {
    Json(CurveResponse {
        policy: state.estimator.policy().version,
        points: state.estimator.curve().points().to_vec(),
    })
}
