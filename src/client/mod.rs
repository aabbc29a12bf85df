//! HTTP gateway to the finance backend. Every call goes through [`ApiClient`], which
//! attaches credentials, enforces the response envelope and maps failures onto
//! [`AppError`]. There is no retry and no backoff; callers decide how to degrade.

pub mod auth;
pub mod envelope;
pub mod errors;
pub mod finance;

pub use self::envelope::{Empty, Envelope};
pub use self::errors::AppError;

use self::envelope::ErrorBody;
use crate::{config::AppConfig, APP_USER_AGENT};
use reqwest::{
    header::{AUTHORIZATION, COOKIE},
    Client, RequestBuilder, StatusCode,
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Name of the `HttpOnly` cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "jwt";

/// Maximum number of error body characters surfaced to users.
const MAX_ERROR_CHARS: usize = 200;

/// How a request proves who is asking.
#[derive(Clone, Copy, Debug)]
pub enum Credentials<'a> {
    /// Whatever the client's cookie jar holds (browser-style `credentials: include`).
    Jar,
    /// `Authorization: Bearer <token>`, used for server-side verification.
    Bearer(&'a SecretString),
    /// An explicit `jwt=<token>` cookie, used when forwarding a visitor's session.
    Cookie(&'a SecretString),
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    config: AppConfig,
}

impl ApiClient {
    /// Client with a cookie jar, so the session cookie set by login rides along on later calls.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        Self::build(config, true)
    }

    /// Client without a cookie jar, for the edge server where each request carries its
    /// visitor's own token and nothing may leak between visitors.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn stateless(config: AppConfig) -> Result<Self, AppError> {
        Self::build(config, false)
    }

    fn build(config: AppConfig, cookie_store: bool) -> Result<Self, AppError> {
        let mut builder = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(cookie_store);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn get_request(&self, path: &str) -> Result<RequestBuilder, AppError> {
        Ok(self.http.get(self.config.endpoint(path)?))
    }

    fn post_request(&self, path: &str) -> Result<RequestBuilder, AppError> {
        Ok(self.http.post(self.config.endpoint(path)?))
    }

    /// Sends the request and unwraps the envelope. Non-2xx, `success: false` and
    /// undecodable bodies all become errors.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credentials: Credentials<'_>,
    ) -> Result<Envelope<T>, AppError> {
        let request = authorize(request, credentials);
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), "backend responded");

        read_envelope(status, &body)
    }
}

fn authorize(request: RequestBuilder, credentials: Credentials<'_>) -> RequestBuilder {
    match credentials {
        Credentials::Jar => request,
        Credentials::Bearer(token) => {
            request.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()))
        }
        Credentials::Cookie(token) => request.header(
            COOKIE,
            format!("{SESSION_COOKIE_NAME}={}", token.expose_secret()),
        ),
    }
}

fn read_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<Envelope<T>, AppError> {
    if !status.is_success() {
        let message = backend_message(body);
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized(message));
        }
        return Err(AppError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))?;

    if !envelope.success {
        let message = envelope
            .message
            .as_deref()
            .map_or_else(|| "Request failed.".to_string(), sanitize_body);
        return Err(AppError::Rejected(message));
    }

    Ok(envelope)
}

/// Pulls `message` (or `error`) out of an error body, falling back to the raw text.
fn backend_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .map_or_else(|| sanitize_body(body), |message| sanitize_body(&message))
}

/// Trims and truncates error text before it reaches a user.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
