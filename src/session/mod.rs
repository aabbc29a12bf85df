//! Session state for the current process. The manager rehydrates once at startup by asking
//! the backend who owns the cookie jar, then tracks login, logout and expiry. State is
//! published on a `watch` channel so any number of readers can follow transitions without
//! holding a lock. Only non-sensitive metadata is kept in memory; the token lives in the jar.

pub mod login;

use crate::{
    client::{ApiClient, Credentials},
    models::SessionUser,
};
use secrecy::SecretString;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// Rehydration has not finished yet.
    Unknown,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub status: AuthStatus,
    pub user: Option<SessionUser>,
}

impl SessionState {
    const fn unknown() -> Self {
        Self {
            status: AuthStatus::Unknown,
            user: None,
        }
    }

    const fn unauthenticated() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            user: None,
        }
    }

    const fn authenticated(user: SessionUser) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user: Some(user),
        }
    }

    /// Authenticated and, when the backend sent an `expires_at`, not yet past it.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
            && !self.user.as_ref().is_some_and(SessionUser::is_expired)
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.status == AuthStatus::Unknown
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.user_id.as_str())
    }
}

/// Single owner of the session. Share it by reference or `Arc`; it is not `Clone` so there
/// is never more than one source of truth per process.
#[derive(Debug)]
pub struct SessionManager {
    client: ApiClient,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let (state, _) = watch::channel(SessionState::unknown());
        Self { client, state }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Follows every transition from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Re-verifies the cookie jar with the backend. Any failure, including transport errors and
    /// 5xx responses, settles on `Unauthenticated`; nothing is returned to the caller but the
    /// resulting state.
    #[instrument(skip(self))]
    pub async fn rehydrate(&self) -> SessionState {
        let next = match self.client.verify(Credentials::Jar).await {
            Ok(verified) => match verified.user_id {
                Some(user_id) => SessionState::authenticated(SessionUser::new(user_id, None)),
                None => {
                    warn!("verify succeeded without a user_id");
                    SessionState::unauthenticated()
                }
            },
            Err(err) if err.is_unauthorized() => {
                debug!("no active session: {err}");
                SessionState::unauthenticated()
            }
            Err(err) => {
                error!("Failed to rehydrate session: {err}");
                SessionState::unauthenticated()
            }
        };

        self.state.send_replace(next.clone());
        next
    }

    /// Logs in with the given credentials. Returns `true` only when the backend answered 2xx
    /// with `success: true` and a `user_id`; every other outcome leaves the session
    /// unauthenticated and returns `false`.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> bool {
        match self.client.login(email, password).await {
            Ok(grant) => {
                if let Some(user_id) = grant.user_id {
                    info!(user_id = %user_id, "login succeeded");
                    self.state.send_replace(SessionState::authenticated(SessionUser::new(
                        user_id,
                        grant.expires_at,
                    )));
                    true
                } else {
                    warn!("login response carried no user_id");
                    self.state.send_replace(SessionState::unauthenticated());
                    false
                }
            }
            Err(err) => {
                warn!("login failed: {err}");
                self.state.send_replace(SessionState::unauthenticated());
                false
            }
        }
    }

    /// Logs out. Local state is cleared whatever the backend says, since a session stuck
    /// "logged in" on the client is worse than an orphaned server-side one. Returns whether
    /// the backend acknowledged the logout.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> bool {
        let acknowledged = match self.client.logout().await {
            Ok(()) => true,
            Err(err) => {
                error!("Logout request failed: {err}");
                false
            }
        };

        self.state.send_replace(SessionState::unauthenticated());
        acknowledged
    }

    /// Drops the session after a data load came back `401`.
    pub fn expire(&self) {
        let was_authenticated = self.state.borrow().is_authenticated();
        self.state.send_replace(SessionState::unauthenticated());
        if was_authenticated {
            info!("session expired, redirecting to login");
        }
    }
}
