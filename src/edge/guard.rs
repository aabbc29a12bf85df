//! Request interceptor for the protected pages.
//!
//! Flow: match the path against the protected prefixes, read the `jwt` cookie (or a bearer
//! header), ask the backend to verify it, and either attach the verified session to the request
//! or answer with a redirect to `/login`. Any failure along the way redirects; the guard never
//! lets a request through on an error.

use crate::{
    client::{ApiClient, Credentials, SESSION_COOKIE_NAME},
    models::VerifiedUser,
    LOGIN_PATH,
};
use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, warn};

pub const PROTECTED_PREFIXES: [&str; 5] = [
    "/dashboard",
    "/budgets",
    "/transactions",
    "/insights",
    "/settings",
];

/// Identity admitted by the guard, available to protected handlers as an `Extension`.
#[derive(Clone, Debug)]
pub struct VerifiedSession {
    pub user_id: String,
    pub token: Arc<SecretString>,
}

/// `/budgets` and `/budgets/42` are protected, `/budgetsfoo` is not.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

#[must_use]
pub fn redirect_to_login() -> Response {
    Redirect::temporary(LOGIN_PATH).into_response()
}

pub async fn require_session(
    State(client): State<Arc<ApiClient>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !is_protected(path) {
        return next.run(request).await;
    }

    let Some(token) = extract_session_token(request.headers()) else {
        debug!(path, "no session token, redirecting to login");
        return redirect_to_login();
    };

    match client.verify(Credentials::Bearer(&token)).await {
        Ok(VerifiedUser {
            user_id: Some(user_id),
        }) => {
            debug!(user_id = %user_id, "session verified");
            request.extensions_mut().insert(VerifiedSession {
                user_id,
                token: Arc::new(token),
            });
            next.run(request).await
        }
        Ok(VerifiedUser { user_id: None }) => {
            warn!("verify accepted a token without a user_id");
            redirect_to_login()
        }
        Err(err) => {
            warn!("session rejected: {err}");
            redirect_to_login()
        }
    }
}

/// Reads the session cookie, falling back to `Authorization: Bearer`.
fn extract_session_token(headers: &HeaderMap) -> Option<SecretString> {
    extract_cookie_token(headers)
        .or_else(|| extract_bearer_token(headers))
        .map(SecretString::from)
}

fn extract_cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            let val = val.trim();
            (key.trim() == SESSION_COOKIE_NAME && !val.is_empty()).then(|| val.to_string())
        })
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use secrecy::ExposeSecret;

    fn token(headers: &HeaderMap) -> Option<String> {
        extract_session_token(headers).map(|token| token.expose_secret().to_string())
    }

    #[test]
    fn protected_prefixes_are_segment_aware() {
        assert!(is_protected("/dashboard"));
        assert!(is_protected("/budgets/42"));
        assert!(is_protected("/settings/"));
        assert!(!is_protected("/budgetsfoo"));
        assert!(!is_protected("/"));
        assert!(!is_protected("/login"));
        assert!(!is_protected("/api/dashboard"));
    }

    #[test]
    fn cookie_token_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; jwt=abc.def ; lang=en"),
        );
        assert_eq!(token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn empty_cookie_falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("jwt="));
        assert_eq!(token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(token(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(token(&headers), None);
    }
}
