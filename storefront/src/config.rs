//! Storefront configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";
const DEFAULT_STATE_DIR: &str = ".storefront";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Configuration values for the storefront client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct StorefrontSettings {
    /// Base URL of the catalogue API collaborator.
    pub api_base_url: Option<String>,
    /// Directory holding the durable cart/wishlist/recently-viewed records.
    pub state_dir: Option<PathBuf>,
    /// Request timeout for catalogue fetches, in seconds.
    pub timeout_seconds: Option<u64>,
}

impl StorefrontSettings {
    /// Return the configured API base URL, falling back to the default.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Return the configured state directory, falling back to the default.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
    }

    /// Return the configured request timeout, falling back to the default.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}
