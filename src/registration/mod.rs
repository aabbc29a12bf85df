//! Registration form rules and submission, plus the debounced email-availability check.

pub mod email_check;

pub use self::email_check::{EmailChecker, EmailLookup, EmailStatus, DEFAULT_DEBOUNCE};

use crate::{
    client::{ApiClient, AppError},
    LOGIN_PATH,
};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

pub const REGISTER_FAILED: &str = "Failed to register";

/// Per-field validation messages; `None` means the field is fine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub alias: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alias.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    Navigate(&'static str),
    Invalid(FieldErrors),
    Error(String),
}

#[derive(Debug)]
pub struct RegistrationForm {
    pub alias: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

impl RegistrationForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.alias.trim().is_empty() {
            errors.alias = Some("Name is required");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.email = Some("Email is required");
        } else if !valid_email(email) {
            errors.email = Some("Invalid email format");
        }

        let password = self.password.expose_secret();
        if password.is_empty() {
            errors.password = Some("Password is required");
        }
        if password != self.confirm_password.expose_secret() {
            errors.confirm_password = Some("Passwords do not match");
        }

        errors
    }

    /// Validates, then posts `{alias, email, password}`. Success lands on the login page.
    pub async fn submit(&self, client: &ApiClient) -> RegisterOutcome {
        let errors = self.validate();
        if !errors.is_empty() {
            return RegisterOutcome::Invalid(errors);
        }

        let email = self.email.trim();
        match client
            .register(self.alias.trim(), email, &self.password)
            .await
        {
            Ok(()) => {
                info!("registered account");
                RegisterOutcome::Navigate(LOGIN_PATH)
            }
            Err(err) => {
                warn!("Registration failed: {err}");
                match err {
                    AppError::Http { message, .. } | AppError::Rejected(message) => {
                        RegisterOutcome::Error(message)
                    }
                    _ => RegisterOutcome::Error(REGISTER_FAILED.to_string()),
                }
            }
        }
    }
}
