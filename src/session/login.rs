use super::SessionManager;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

pub const MISSING_CREDENTIALS: &str = "Please provide your email and password.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials, please try again.";

/// Where a successful login lands.
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Navigate(&'static str),
    Error(&'static str),
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }

    /// Submits the form through the session manager. Empty fields never reach the backend.
    pub async fn submit(&self, session: &SessionManager) -> LoginOutcome {
        let email = self.email.trim();
        if email.is_empty() || self.password.expose_secret().is_empty() {
            debug!("login form missing fields");
            return LoginOutcome::Error(MISSING_CREDENTIALS);
        }

        if session.login(email, &self.password).await {
            LoginOutcome::Navigate(DASHBOARD_PATH)
        } else {
            LoginOutcome::Error(INVALID_CREDENTIALS)
        }
    }
}
