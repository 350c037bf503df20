//! In-memory user repository.
//!
//! Mirrors the uniqueness rules of the `users` table so tests observe the same
//! conflicts the database would raise.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored user.
    pub async fn all(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }
}

fn conflicts(existing: &User, candidate: &User) -> Option<&'static str> {
    if existing.id == candidate.id {
        return None;
    }
    if existing.linkedin_id == candidate.linkedin_id {
        return Some("LinkedIn account already linked");
    }
    match (&existing.stripe_customer_id, &candidate.stripe_customer_id) {
        (Some(a), Some(b)) if a == b => Some("Billing customer already linked to another user"),
        _ => None,
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(DomainError::new(ErrorCode::UserExists, "User already exists"));
        }
        if let Some(message) = users.values().find_map(|u| conflicts(u, user)) {
            return Err(DomainError::new(ErrorCode::UserExists, message));
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User {} not found", user.id),
            ));
        }
        if let Some(message) = users.values().find_map(|u| conflicts(u, user)) {
            return Err(DomainError::new(ErrorCode::UserExists, message));
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_linkedin_id(&self, linkedin_id: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.linkedin_id == linkedin_id)
            .cloned())
    }

    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.stripe_customer_id.as_deref() == Some(customer_id))
            .cloned())
    }
}
