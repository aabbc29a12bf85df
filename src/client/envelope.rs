//! The one response shape every backend endpoint is held to: `{success, message?, ...}` with
//! the payload fields flattened next to `success`. Responses without `success` are rejected as
//! parse errors instead of being guessed at.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

/// Payload of endpoints that only report `success`.
#[derive(Debug, Default, Deserialize)]
pub struct Empty {}

/// Error bodies are read leniently; older endpoints use `error` instead of `message`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
