//! # Fintrack (personal finance tracker client)
//!
//! `fintrack` is the client side of a personal-finance tracker. The backend issues and
//! verifies session tokens; this crate owns everything the client does around them.
//!
//! ## Session lifecycle
//!
//! A [`session::SessionManager`] is the single source of truth for whether the current
//! process has an authenticated user. It starts `Unknown`, settles after
//! [`session::SessionManager::rehydrate`], and moves between `Authenticated` and
//! `Unauthenticated` on login, logout, or a `401` from any data load.
//!
//! - **Fail closed:** every transport or backend failure during login or verification is
//!   reported as "not authenticated", never as an error to the caller.
//! - **No local crypto:** tokens are opaque here; verification is delegated to the backend.
//!
//! ## Edge guard
//!
//! The [`edge`] server sits in front of the protected pages (`/dashboard`, `/budgets`,
//! `/transactions`, `/insights`, `/settings`). Requests without a session cookie, or whose
//! token the backend rejects, are redirected to `/login` before any loader runs.
//!
//! ## Registration
//!
//! [`registration::EmailChecker`] debounces the "is this email taken?" lookup so at most one
//! request is issued per idle period, and superseded checks are never sent.

pub mod cli;
pub mod client;
pub mod config;
pub mod edge;
pub mod finance;
pub mod models;
pub mod registration;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Path every unauthenticated visitor is sent to.
pub const LOGIN_PATH: &str = "/login";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
