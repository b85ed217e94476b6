use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::MissedTickBehavior;

use satparity_common::types::ParityKind;
use satparity_engine::board::build_board;
use satparity_engine::estimator::ParityEstimator;

use crate::source::{FetchError, RateSource};
use crate::state::SharedBoard;

/// Counts from one successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PollSummary {
    pub btc_usd_rate: f64,
    pub currencies: usize,
    pub skipped: usize,
    pub past: usize,
    pub now: usize,
    pub future: usize,
}

/// Rate poller that periodically fetches rates and rebuilds the parity board.
pub struct RatePoller<S> {
    source: S,
    poll_interval: Duration,
    estimator: Arc<ParityEstimator>,
    board: SharedBoard,
}

impl<S: RateSource> RatePoller<S> {
    /// `poll_interval_secs` must be non-zero; `AppConfig` rejects zero.
    pub fn new(
        source: S,
        poll_interval_secs: u64,
        estimator: Arc<ParityEstimator>,
        board: SharedBoard,
    ) -> Self {
        Self {
            source,
            poll_interval: Duration::from_secs(poll_interval_secs),
            estimator,
            board,
        }
    }

    /// Start the polling loop. The first refresh happens immediately; runs
    /// until the task is cancelled.
    pub async fn run(&self) {
        tracing::info!(
            source = self.source.name(),
            poll_interval_secs = self.poll_interval.as_secs(),
            policy = %self.estimator.policy().version,
            "Rate poller started"
        );

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(e) = self.poll_once(Utc::now()).await {
                // Keep serving the previous board; the next tick retries
                tracing::warn!(
                    source = self.source.name(),
                    error = %e,
                    "Rate fetch failed, retrying next interval"
                );
            }
        }
    }

    /// Fetch one batch and publish a fresh board evaluated at `now`.
    pub async fn poll_once(&self, now: DateTime<Utc>) -> Result<PollSummary, FetchError> {
        let result = self.source.fetch().await;

        let batch = match result {
            Ok(batch) => batch,
            Err(e) => {
                let mut state = self.board.write().await;
                state.last_attempt = Some(now);
                state.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        let board = build_board(&self.estimator, &batch, now);
        let count = |kind: ParityKind| {
            board
                .currencies
                .iter()
                .filter(|c| c.parity.kind == kind)
                .count()
        };
        let summary = PollSummary {
            btc_usd_rate: board.btc_usd_rate,
            currencies: board.currencies.len(),
            skipped: board.skipped.len(),
            past: count(ParityKind::Past),
            now: count(ParityKind::Now),
            future: count(ParityKind::Future),
        };

        {
            let mut state = self.board.write().await;
            state.board = Some(board);
            state.last_attempt = Some(now);
            state.last_success = Some(now);
            state.last_error = None;
            state.refreshes += 1;
        }

        tracing::info!(
            btc_usd_rate = summary.btc_usd_rate,
            currencies = summary.currencies,
            skipped = summary.skipped,
            past = summary.past,
            now = summary.now,
            future = summary.future,
            "Parity board refreshed"
        );

        Ok(summary)
    }
}
