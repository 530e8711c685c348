//! # MedShare API Server
//!
//! REST API over the content store, consumed by the patient portal.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/content` - Store a JSON record
//! - `GET /api/v1/content/:cid` - Retrieve a record with gateway fallback
//! - `GET /api/v1/gateway/:cid` - Public gateway link
//! - `GET /api/v1/pins` - List pins, optionally filtered by CID
//! - `GET /api/v1/pins/:cid` - Pin status
//! - `DELETE /api/v1/pins/:cid` - Unpin
//! - `GET /api/v1/stats/:cid` - Access statistics for one CID
//! - `POST /api/v1/stats` - Access statistics for a batch of CIDs
//!
//! ## Example
//!
//! ```rust,ignore
//! use medshare_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! let server = ApiServer::from_config(&config)?;
//! server.run(config.bind_addr).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// API server for MedShare content storage.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server over an existing state.
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates a server backed by the pinning service described in `config`.
    pub fn from_config(config: &ApiConfig) -> medshare_core::Result<Self> {
        Ok(Self::new(AppState::new(config)?))
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        if !self.state.store.is_configured() {
            warn!("Pinata credentials not configured; uploads and pin queries will fail");
        }
        info!("MedShare API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with configuration from the environment.
pub async fn start_server() -> std::io::Result<()> {
    let config = ApiConfig::from_env().map_err(std::io::Error::other)?;
    let server = ApiServer::from_config(&config).map_err(std::io::Error::other)?;
    server.run(config.bind_addr).await
}
