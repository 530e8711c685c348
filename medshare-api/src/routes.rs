//! API route configuration.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Largest JSON document accepted for storage.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Content
        .route("/api/v1/content", post(handlers::upload_content))
        .route("/api/v1/content/:cid", get(handlers::get_content))
        .route("/api/v1/gateway/:cid", get(handlers::gateway_url))

        // Pins
        .route("/api/v1/pins", get(handlers::list_pins))
        .route(
            "/api/v1/pins/:cid",
            get(handlers::pin_status).delete(handlers::unpin),
        )

        // Access statistics
        .route("/api/v1/stats", post(handlers::access_logs))
        .route("/api/v1/stats/:cid", get(handlers::cid_stats))

        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
