use std::sync::Arc;

use satparity_common::config::AppConfig;
use satparity_common::types::PolicyVersion;
use satparity_engine::curve::CurveStore;
use satparity_engine::estimator::{ParityEstimator, ParityPolicy};
use satparity_fetcher::poller::RatePoller;
use satparity_fetcher::source::YadioSource;
use satparity_fetcher::state::shared_board;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "satparity_fetcher=info,satparity_engine=info".into()),
        )
        .json()
        .init();

    tracing::info!("Sat Parity fetcher starting...");

    // Load configuration
    let config = AppConfig::from_env()?;

    if config.parity_policy == PolicyVersion::Legacy {
        tracing::warn!("Running with the legacy parity policy: 0.1 tolerance, no past guard");
    }

    // A broken reference curve is fatal
    let curve = CurveStore::reference()?;
    let estimator = Arc::new(ParityEstimator::new(
        curve,
        ParityPolicy::from(config.parity_policy),
    ));

    let source = YadioSource::new(&config.rates_api_url, config.rates_http_timeout_secs)?;
    tracing::info!(url = source.url(), "Starting rate poller");

    let poller = RatePoller::new(
        source,
        config.rates_poll_interval_secs,
        estimator,
        shared_board(),
    );

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Sat Parity fetcher stopped.");
    Ok(())
}
