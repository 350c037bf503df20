//! Authenticated browser sessions.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, UserId};

/// Opaque session identifier carried in the `session` cookie.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Cookie holding the session token.
    pub const COOKIE_NAME: &'static str = "session";

    /// Generates a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a token read from a cookie, rejecting blank values.
    pub fn from_cookie(value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Server-side session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Session {
    /// Longest session lifetime: one year.
    pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

    /// Opens a session for `user_id` lasting `ttl_secs`, capped at
    /// [`Session::MAX_TTL_SECS`].
    pub fn open(user_id: UserId, ttl_secs: u64) -> Self {
        let now = Timestamp::now();
        let ttl = ttl_secs.min(Self::MAX_TTL_SECS) as i64;
        Self {
            user_id,
            created_at: now,
            expires_at: now.checked_plus_secs(ttl).unwrap_or(now),
        }
    }

    pub fn is_expired_at(&self, at: &Timestamp) -> bool {
        !at.is_before(&self.expires_at)
    }
}
