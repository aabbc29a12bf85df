use thiserror::Error;

/// Failure taxonomy for every backend call.
///
/// `Unauthorized` is kept apart from other HTTP failures because it drives the
/// session transition to `Unauthenticated` and a redirect to `/login`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Response error: {0}")]
    Parse(String),
}

impl AppError {
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Message suitable for showing next to a form.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Config(message)
            | Self::Network(message)
            | Self::Timeout(message)
            | Self::Unauthorized(message)
            | Self::Http { message, .. }
            | Self::Rejected(message)
            | Self::Parse(message) => message,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout("Request timed out. Please try again.".to_string())
        } else if err.is_decode() {
            Self::Parse(format!("Failed to decode response: {err}"))
        } else {
            Self::Network(format!("Unable to reach the server: {err}"))
        }
    }
}
