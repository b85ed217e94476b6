//! Shared application state for the Axum API server.

use std::sync::Arc;

use satparity_common::config::AppConfig;
use satparity_engine::estimator::ParityEstimator;
use satparity_fetcher::state::SharedBoard;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub estimator: Arc<ParityEstimator>,
    /// Written by the rate poller, read by the handlers
    pub board: SharedBoard,
}

impl AppState {
    pub fn new(config: AppConfig, estimator: Arc<ParityEstimator>, board: SharedBoard) -> Self {
        Self {
            config,
            estimator,
            board,
        }
    }
}
