use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Payload of a successful `POST /api/auth/login`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginGrant {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// Payload of a successful `GET /api/auth/verify`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct VerifiedUser {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// The identity held by an authenticated session. Only non-sensitive metadata; the token
/// itself stays in the cookie jar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub user_id: String,
    pub expires_at: Option<i64>,
}

impl SessionUser {
    #[must_use]
    pub fn new(user_id: String, expires_at: Option<i64>) -> Self {
        Self {
            user_id,
            expires_at,
        }
    }

    /// True once `expires_at` (unix seconds) is at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX));
        self.is_expired_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_inclusive_and_optional() {
        let user = SessionUser::new("u1".to_string(), Some(1_700_000_000));
        assert!(!user.is_expired_at(1_699_999_999));
        assert!(user.is_expired_at(1_700_000_000));

        let open_ended = SessionUser::new("u1".to_string(), None);
        assert!(!open_ended.is_expired_at(i64::MAX));
        assert!(!open_ended.is_expired());
    }
}
