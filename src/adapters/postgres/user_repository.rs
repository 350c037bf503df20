//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{SubscriptionStatus, User};
use crate::ports::UserRepository;

const SELECT_USER: &str = r#"
    SELECT id, linkedin_id, email, name, image, linkedin_access_token, linkedin_token_expires_at,
           stripe_customer_id, stripe_subscription_id, subscription_status, subscription_period_end,
           created_at, updated_at
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    linkedin_id: String,
    email: Option<String>,
    name: Option<String>,
    image: Option<String>,
    linkedin_access_token: Option<String>,
    linkedin_token_expires_at: Option<DateTime<Utc>>,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
    subscription_status: String,
    subscription_period_end: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let subscription_status = parse_status(&row.subscription_status)?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            linkedin_id: row.linkedin_id,
            email: row.email,
            name: row.name,
            image: row.image,
            linkedin_access_token: row.linkedin_access_token.map(SecretString::new),
            linkedin_token_expires_at: row.linkedin_token_expires_at.map(Timestamp::from_datetime),
            stripe_customer_id: row.stripe_customer_id,
            stripe_subscription_id: row.stripe_subscription_id,
            subscription_status,
            subscription_period_end: row.subscription_period_end.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    s.parse().map_err(|e: String| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid subscription status: {}", e),
        )
    })
}

fn map_write_error(context: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("users_linkedin_id_key") => {
                return DomainError::new(ErrorCode::UserExists, "LinkedIn account already linked")
            }
            Some("users_stripe_customer_id_key") => {
                return DomainError::new(
                    ErrorCode::UserExists,
                    "Billing customer already linked to another user",
                )
            }
            _ => {}
        }
    }
    DomainError::database(context, e)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, linkedin_id, email, name, image, linkedin_access_token,
                linkedin_token_expires_at, stripe_customer_id, stripe_subscription_id,
                subscription_status, subscription_period_end, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.linkedin_id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.image)
        .bind(user.linkedin_access_token.as_ref().map(|t| t.expose_secret().as_str()))
        .bind(user.linkedin_token_expires_at.map(|t| *t.as_datetime()))
        .bind(&user.stripe_customer_id)
        .bind(&user.stripe_subscription_id)
        .bind(user.subscription_status.as_str())
        .bind(user.subscription_period_end.map(|t| *t.as_datetime()))
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to save user", e))?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                name = $3,
                image = $4,
                linkedin_access_token = $5,
                linkedin_token_expires_at = $6,
                stripe_customer_id = $7,
                stripe_subscription_id = $8,
                subscription_status = $9,
                subscription_period_end = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.image)
        .bind(user.linkedin_access_token.as_ref().map(|t| t.expose_secret().as_str()))
        .bind(user.linkedin_token_expires_at.map(|t| *t.as_datetime()))
        .bind(&user.stripe_customer_id)
        .bind(&user.stripe_subscription_id)
        .bind(user.subscription_status.as_str())
        .bind(user.subscription_period_end.map(|t| *t.as_datetime()))
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User {} not found", user.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_linkedin_id(&self, linkedin_id: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("{} WHERE linkedin_id = $1", SELECT_USER))
                .bind(linkedin_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find user by LinkedIn id", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("{} WHERE stripe_customer_id = $1", SELECT_USER))
                .bind(customer_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find user by customer id", e))?;

        row.map(User::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            linkedin_id: "li-1".to_string(),
            email: Some("ada@example.com".to_string()),
            name: None,
            image: None,
            linkedin_access_token: Some("token".to_string()),
            linkedin_token_expires_at: None,
            stripe_customer_id: Some("cus_1".to_string()),
            stripe_subscription_id: None,
            subscription_status: status.to_string(),
            subscription_period_end: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_user() {
        let row = row("past_due");
        let id = row.id;
        let user = User::try_from(row).unwrap();

        assert_eq!(*user.id.as_uuid(), id);
        assert_eq!(user.subscription_status, SubscriptionStatus::PastDue);
        assert_eq!(
            user.linkedin_access_token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("token")
        );
        assert!(user.subscription_period_end.is_some());
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let err = User::try_from(row("gold")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn parse_status_accepts_stored_values() {
        for status in ["none", "trialing", "active", "past_due", "canceled", "unpaid"] {
            assert_eq!(parse_status(status).unwrap().as_str(), status);
        }
    }
}
