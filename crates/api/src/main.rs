//! Sat Parity API server binary entrypoint.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use satparity_common::config::AppConfig;
use satparity_common::types::PolicyVersion;
use satparity_engine::curve::CurveStore;
use satparity_engine::estimator::{ParityEstimator, ParityPolicy};
use satparity_fetcher::poller::RatePoller;
use satparity_fetcher::source::YadioSource;
use satparity_fetcher::state::shared_board;

use satparity_api::routes::create_app;
use satparity_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("satparity_api=debug,satparity_fetcher=info,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting Sat Parity API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    if config.parity_policy == PolicyVersion::Legacy {
        tracing::warn!("Running with the legacy parity policy: 0.1 tolerance, no past guard");
    }

    let curve = CurveStore::reference()?;
    tracing::info!(points = curve.len(), "Reference curve loaded");

    let estimator = Arc::new(ParityEstimator::new(
        curve,
        ParityPolicy::from(config.parity_policy),
    ));
    let board = shared_board();

    // Rate poller feeds the board in the background
    let source = YadioSource::new(&config.rates_api_url, config.rates_http_timeout_secs)?;
    tracing::info!(url = source.url(), "Spawning rate poller");
    let poller = RatePoller::new(
        source,
        config.rates_poll_interval_secs,
        estimator.clone(),
        board.clone(),
    );
    let poller_handle = tokio::spawn(async move { poller.run().await });

    // Build application state
    let addr = config.api_bind_addr;
    let state = AppState::new(config, estimator, board);

    // Build router
    let app = create_app(state);

    // Start server
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    poller_handle.abort();
    tracing::info!("Sat Parity API server stopped.");
    Ok(())
}
