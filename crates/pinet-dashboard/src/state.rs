//! Application state shared across HTTP handlers

use std::sync::Arc;

use pinet_client::PiNetClient;

use crate::config::Config;
use crate::error::DashboardError;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Build a client for a single request
    ///
    /// The client is dropped, and its session released, when the handler
    /// that asked for it returns.
    ///
    /// # Errors
    /// Returns an error if the API is not configured or the session cannot
    /// be built.
    pub fn client(&self) -> Result<PiNetClient, DashboardError> {
        let (url, key) = self.config.api.credentials()?;
        let client = PiNetClient::new(url, key)?.with_timeout(self.config.api.timeout());
        Ok(client)
    }
}
