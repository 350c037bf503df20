//! Session store port.
//!
//! Sessions are opaque tokens held in an HTTP-only cookie and resolved
//! server-side. The store owns creation, lookup and invalidation.

use async_trait::async_trait;

use crate::domain::auth::{Session, SessionError, SessionToken};
use crate::domain::foundation::UserId;

/// Persists browser sessions.
///
/// # Contract
///
/// - `create` returns a fresh, never-before-issued token
/// - `get` returns `None` for unknown or expired tokens
/// - `clear` is idempotent; clearing an unknown token, or no token at all,
///   succeeds without effect
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Opens a session for `user_id`.
    async fn create(&self, user_id: UserId) -> Result<SessionToken, SessionError>;

    /// Resolves a token to its live session.
    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, SessionError>;

    /// Ends the caller's session, if any.
    async fn clear(&self, token: Option<&SessionToken>) -> Result<(), SessionError>;
}
