//! App state: content store and config.

use std::net::SocketAddr;
use std::sync::Arc;

use medshare_core::error::{MedshareError, Result};
use medshare_core::traits::ContentStore;
use medshare_pinning::{PinataClient, PinataConfig};

/// Default bind address.
const DEFAULT_BIND: &str = "0.0.0.0:3001";

/// Environment variable overriding the bind address.
const ENV_BIND: &str = "MEDSHARE_BIND";

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address the server binds to
    pub bind_addr: SocketAddr,
    /// Pinning service settings
    pub pinata: PinataConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            pinata: PinataConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads the config from environment variables and `.env`.
    pub fn from_env() -> Result<Self> {
        let pinata = PinataConfig::from_env()?;

        let bind = std::env::var(ENV_BIND).unwrap_or_else(|_| DEFAULT_BIND.into());
        let bind_addr = bind.parse().map_err(|e| {
            MedshareError::ConfigError(format!("Invalid {} '{}': {}", ENV_BIND, bind, e))
        })?;

        Ok(Self { bind_addr, pinata })
    }
}

/// Shared handler state.
pub struct AppState {
    /// Backing content store
    pub store: Arc<dyn ContentStore>,
}

impl AppState {
    /// Builds state backed by a Pinata client for `config`.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = PinataClient::with_config(config.pinata.clone())?;
        Ok(Self::with_store(Arc::new(client)))
    }

    /// Builds state over any content store.
    pub fn with_store(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }
}
