//! Integration tests for the rate poller and the yadio HTTP source.
//!
//! The HTTP tests serve a canned payload from a local axum server, so no
//! network access is needed.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use satparity_common::types::{ParityKind, RateBatch};
use satparity_engine::curve::CurveStore;
use satparity_engine::estimator::{ParityEstimator, ParityPolicy};
use satparity_fetcher::poller::RatePoller;
use satparity_fetcher::source::{FetchError, RateSource, YadioSource};
use satparity_fetcher::state::shared_board;

// ============================================================
// Helpers
// ============================================================

/// Source that replays queued results in order.
struct StubSource {
    results: Mutex<VecDeque<Result<RateBatch, FetchError>>>,
}

impl StubSource {
    fn new(results: Vec<Result<RateBatch, FetchError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }
}

impl RateSource for StubSource {
    async fn fetch(&self) -> Result<RateBatch, FetchError> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::Payload("no more batches".to_string())))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

fn estimator() -> Arc<ParityEstimator> {
    Arc::new(ParityEstimator::new(
        CurveStore::reference().unwrap(),
        ParityPolicy::canonical(),
    ))
}

fn batch(rates: &[(&str, f64)]) -> RateBatch {
    RateBatch {
        fetched_at: now(),
        btc_usd_rate: 68_000.0,
        rates: rates
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Serve `payload` at `/exrates/BTC` on an ephemeral port and return the URL.
async fn serve_payload(payload: serde_json::Value) -> String {
    let app = Router::new().route(
        "/exrates/BTC",
        get(move || {
            let payload = payload.clone();
            async move { Json(payload) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/exrates/BTC", addr)
}

// ============================================================
// Poller
// ============================================================

#[tokio::test]
async fn test_poll_once_publishes_board() {
    let board = shared_board();
    let poller = RatePoller::new(
        StubSource::new(vec![Ok(batch(&[
            ("USD", 68_000.0),
            ("ABC", 110_000_000.0),
            ("VND", 1_700_000_000.0),
            ("BAD", 0.0),
            ("BTC", 1.0),
        ]))]),
        300,
        estimator(),
        board.clone(),
    );

    let summary = poller.poll_once(now()).await.unwrap();
    assert_eq!(summary.currencies, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.now, 1);
    assert_eq!(summary.past, 1);
    assert_eq!(summary.future, 1);

    let state = board.read().await;
    let published = state.board.as_ref().unwrap();
    assert_eq!(published.currencies[0].code, "VND");
    assert_eq!(published.find("ABC").unwrap().parity.kind, ParityKind::Now);
    assert_eq!(state.refreshes, 1);
    assert_eq!(state.last_success, Some(now()));
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_board() {
    let board = shared_board();
    let poller = RatePoller::new(
        StubSource::new(vec![
            Ok(batch(&[("USD", 68_000.0)])),
            Err(FetchError::MissingUsd),
            Ok(batch(&[("USD", 68_000.0), ("EUR", 63_000.0)])),
        ]),
        300,
        estimator(),
        board.clone(),
    );

    poller.poll_once(now()).await.unwrap();
    assert!(poller.poll_once(now()).await.is_err());

    {
        let state = board.read().await;
        assert_eq!(state.board.as_ref().unwrap().currencies.len(), 1);
        assert_eq!(
            state.last_error.as_deref(),
            Some("rate payload has no usable USD rate")
        );
        assert_eq!(state.refreshes, 1);
    }

    // Recovers on the next cycle
    poller.poll_once(now()).await.unwrap();
    let state = board.read().await;
    assert_eq!(state.board.as_ref().unwrap().currencies.len(), 2);
    assert!(state.last_error.is_none());
    assert_eq!(state.refreshes, 2);
}

// ============================================================
// Yadio source over HTTP
// ============================================================

#[tokio::test]
async fn test_yadio_source_fetches_batch() {
    let url = serve_payload(json!({
        "BTC": {"USD": 68000.0, "EUR": 63000.0, "VES": 3_400_000.0, "BTC": 1},
        "base": "BTC",
        "timestamp": 1_760_000_000_000u64
    }))
    .await;

    let source = YadioSource::new(url, 5).unwrap();
    let batch = source.fetch().await.unwrap();
    assert_eq!(batch.btc_usd_rate, 68000.0);
    assert_eq!(batch.rates["VES"], 3_400_000.0);
    assert_eq!(batch.snapshots().count(), 3);
}

#[tokio::test]
async fn test_yadio_source_not_found_status() {
    let url = serve_payload(json!({})).await.replace("/exrates/BTC", "/missing");
    let source = YadioSource::new(url, 5).unwrap();
    match source.fetch().await {
        Err(FetchError::Status(status)) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {:?}", other),
    }
}
