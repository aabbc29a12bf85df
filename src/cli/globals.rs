use crate::{client::ApiClient, config::AppConfig};
use anyhow::{Context, Result};

/// Arguments shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub request_timeout_seconds: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            request_timeout_seconds: 0,
        }
    }

    /// Validated backend configuration.
    ///
    /// # Errors
    /// Returns an error if the API URL is not an absolute http(s) URL.
    pub fn app_config(&self) -> Result<AppConfig> {
        let config = AppConfig::new(&self.api_url)
            .with_context(|| format!("Invalid API URL: {}", self.api_url))?;
        Ok(config.with_request_timeout_seconds(self.request_timeout_seconds))
    }

    /// Client with a cookie jar, for commands that act as one logged-in user.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client cannot be built.
    pub fn session_client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(self.app_config()?)?)
    }

    /// Client without a cookie jar, for the edge server.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client cannot be built.
    pub fn stateless_client(&self) -> Result<ApiClient> {
        Ok(ApiClient::stateless(self.app_config()?)?)
    }
}
