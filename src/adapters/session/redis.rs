//! Redis-backed session store.
//!
//! Each session is one JSON value under `{prefix}{token}`, written with
//! `SET .. EX ttl` so Redis drops it when it expires.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::auth::{Session, SessionError, SessionToken};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::SessionStore;

#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    key_prefix: String,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection, key_prefix: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            ttl_secs,
        }
    }

    fn key(&self, token: &SessionToken) -> String {
        session_key(&self.key_prefix, token)
    }
}

fn session_key(prefix: &str, token: &SessionToken) -> String {
    format!("{}{}", prefix, token.as_str())
}

fn unavailable(e: redis::RedisError) -> SessionError {
    tracing::error!(error = %e, "Redis session store error");
    SessionError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user_id: UserId) -> Result<SessionToken, SessionError> {
        let token = SessionToken::generate();
        let session = Session::open(user_id, self.ttl_secs);
        let value =
            serde_json::to_string(&session).map_err(|e| SessionError::Corrupt(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(self.key(&token), value, self.ttl_secs)
            .await
            .map_err(unavailable)?;

        tracing::debug!(user_id = %user_id, "Session created");
        Ok(token)
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, SessionError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.key(token)).await.map_err(unavailable)?;

        let Some(value) = value else {
            return Ok(None);
        };

        let session: Session =
            serde_json::from_str(&value).map_err(|e| SessionError::Corrupt(e.to_string()))?;

        if session.is_expired_at(&Timestamp::now()) {
            return Ok(None);
        }
        Ok(Some(session))
    }

    async fn clear(&self, token: Option<&SessionToken>) -> Result<(), SessionError> {
        let Some(token) = token else {
            return Ok(());
        };

        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.key(token)).await.map_err(unavailable)?;

        tracing::debug!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("key_prefix", &self.key_prefix)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
