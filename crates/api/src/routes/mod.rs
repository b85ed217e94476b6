pub mod curve;
pub mod estimate;
pub mod health;
pub mod parity;
pub mod status;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Request bodies are tiny JSON documents.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(parity::router())
        .merge(curve::router())
        .merge(estimate::router())
        .merge(status::router())
        .with_state(state)
}

/// The router as served: all routes plus tracing, CORS and the body size limit.
pub fn create_app(state: AppState) -> Router {
    create_router(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
