//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Persistence for user accounts.
///
/// # Contract
///
/// - `save` fails with `ErrorCode::UserExists` for a duplicate LinkedIn id
/// - `update` fails with `ErrorCode::UserNotFound` for an unknown id
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_linkedin_id(&self, linkedin_id: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<User>, DomainError>;
}
