//! In-memory session store for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::auth::{Session, SessionError, SessionToken};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::SessionStore;

/// Not shared across processes; sessions are lost on restart.
///
/// Expired sessions are swept on every `create`, so the map is bounded by the
/// number of sessions opened within one TTL.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
    ttl_secs: u64,
}

impl InMemorySessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl_secs,
        }
    }

    /// Number of stored sessions, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: UserId) -> Result<SessionToken, SessionError> {
        let token = SessionToken::generate();
        let session = Session::open(user_id, self.ttl_secs);
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired_at(&now));
        sessions.insert(token.clone(), session);
        Ok(token)
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, SessionError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;

        match sessions.get(token) {
            Some(session) if session.is_expired_at(&now) => {
                sessions.remove(token);
                Ok(None)
            }
            Some(session) => Ok(Some(session.clone())),
            None => Ok(None),
        }
    }

    async fn clear(&self, token: Option<&SessionToken>) -> Result<(), SessionError> {
        if let Some(token) = token {
            self.sessions.write().await.remove(token);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_session_is_retrievable() {
        let store = InMemorySessionStore::new(3600);
        let user_id = UserId::new();

        let token = store.create(user_id).await.unwrap();
        let session = store.get(&token).await.unwrap().unwrap();

        assert_eq!(session.user_id, user_id);
    }

    #[tokio::test]
    async fn tokens_are_unique_per_session() {
        let store = InMemorySessionStore::new(3600);
        let user_id = UserId::new();

        let a = store.create(user_id).await.unwrap();
        let b = store.create(user_id).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn clear_removes_session() {
        let store = InMemorySessionStore::new(3600);
        let token = store.create(UserId::new()).await.unwrap();

        store.clear(Some(&token)).await.unwrap();

        assert!(store.get(&token).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clear_without_token_is_noop() {
        let store = InMemorySessionStore::new(3600);
        store.create(UserId::new()).await.unwrap();

        store.clear(None).await.unwrap();

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_token_yields_none() {
        let store = InMemorySessionStore::new(3600);
        let token = SessionToken::generate();
        assert!(store.get(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_session_is_dropped() {
        let store = InMemorySessionStore::new(0);
        let token = store.create(UserId::new()).await.unwrap();

        assert!(store.get(&token).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_sweeps_expired_sessions() {
        let store = InMemorySessionStore::new(0);

        for _ in 0..5 {
            store.create(UserId::new()).await.unwrap();
        }

        assert_eq!(store.len().await, 1);
    }
}
