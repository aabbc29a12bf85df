//! Wrappers for the auth and user endpoints. Passwords are only exposed while the request
//! body is serialized and are never logged.

use super::{ApiClient, AppError, Credentials, Empty};
use crate::models::{LoginGrant, VerifiedUser};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    alias: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct EmailAvailability {
    #[serde(default)]
    taken: bool,
}

impl ApiClient {
    /// `POST /api/auth/login`. On success the backend sets the session cookie in the jar.
    ///
    /// # Errors
    /// Returns the transport or backend failure; callers decide how to report it.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginGrant, AppError> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let request = self.post_request("/api/auth/login")?.json(&body);
        let envelope = self.execute::<LoginGrant>(request, Credentials::Jar).await?;
        Ok(envelope.data)
    }

    /// `POST /api/auth/logout` with the cookie jar attached.
    ///
    /// # Errors
    /// Returns the transport or backend failure.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AppError> {
        let request = self.post_request("/api/auth/logout")?;
        self.execute::<Empty>(request, Credentials::Jar).await?;
        Ok(())
    }

    /// `GET /api/auth/verify`. Returns the backend's view of who holds the credentials.
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` for a rejected token, otherwise the transport failure.
    #[instrument(skip(self, credentials))]
    pub async fn verify(&self, credentials: Credentials<'_>) -> Result<VerifiedUser, AppError> {
        let request = self.get_request("/api/auth/verify")?;
        let envelope = self.execute::<VerifiedUser>(request, credentials).await?;
        Ok(envelope.data)
    }

    /// `GET /api/users/check-taken?email=`. Returns `true` when the email is registered.
    ///
    /// # Errors
    /// Returns the transport or backend failure, including `success: false`.
    #[instrument(skip(self))]
    pub async fn check_email_taken(&self, email: &str) -> Result<bool, AppError> {
        let request = self
            .get_request("/api/users/check-taken")?
            .query(&[("email", email)]);
        let envelope = self
            .execute::<EmailAvailability>(request, Credentials::Jar)
            .await?;
        Ok(envelope.data.taken)
    }

    /// `POST /api/users/register`.
    ///
    /// # Errors
    /// Returns the transport or backend failure; the backend message is preserved.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        alias: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), AppError> {
        let body = RegisterRequest {
            alias,
            email,
            password: password.expose_secret(),
        };
        let request = self.post_request("/api/users/register")?.json(&body);
        self.execute::<Empty>(request, Credentials::Jar).await?;
        Ok(())
    }
}
