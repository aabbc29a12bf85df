//! Backend endpoint configuration. Values come from CLI arguments with environment
//! fallbacks (`FINTRACK_API_URL`, `FINTRACK_REQUEST_TIMEOUT_SECONDS`); this module only
//! normalizes and validates them. Configuration values are public; do not store secrets here.

use crate::client::AppError;
use std::time::Duration;
use url::Url;

/// Client configuration shared by the CLI, the edge server and the session manager.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    /// Builds a config from a raw base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the URL is empty, relative, or not HTTP(S).
    pub fn new(api_base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            request_timeout: None,
        })
    }

    /// Applies a request timeout; `0` keeps requests unbounded.
    #[must_use]
    pub fn with_request_timeout_seconds(mut self, seconds: u64) -> Self {
        self.request_timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        self
    }

    /// Joins a path onto the configured base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let base = self.api_base_url.as_str().trim_end_matches('/');
        let joined = format!("{}/{}", base, path.trim().trim_start_matches('/'));
        Url::parse(&joined).map_err(|err| AppError::Config(format!("Invalid endpoint {joined}: {err}")))
    }
}

fn parse_base_url(value: &str) -> Result<Url, AppError> {
    let trimmed = normalize_value(value)
        .ok_or_else(|| AppError::Config("Missing FINTRACK_API_URL".to_string()))?;
    let url = Url::parse(trimmed.trim_end_matches('/'))
        .map_err(|err| AppError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::Config(format!(
                "Unsupported API base URL scheme: {scheme}"
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(AppError::Config(format!(
            "API base URL must include a host: {trimmed}"
        )));
    }

    Ok(url)
}

fn normalize_value(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
