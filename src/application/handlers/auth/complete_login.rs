//! CompleteLoginHandler - finishes a LinkedIn login after the state check.
//!
//! Exchanges the authorization code, creates or refreshes the account and
//! opens a session.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::auth::{AuthError, LinkedInIdentity, SessionError, SessionToken};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::{IdentityProvider, SessionStore, UserRepository};

/// Command to complete a login.
#[derive(Debug, Clone)]
pub struct CompleteLoginCommand {
    pub code: String,
    /// Must equal the redirect URI sent with the authorization request.
    pub redirect_uri: String,
}

#[derive(Debug, Clone)]
pub struct CompleteLoginResult {
    pub user_id: UserId,
    pub session_token: SessionToken,
    /// True when this login created the account.
    pub is_new_user: bool,
}

#[derive(Debug, Error)]
pub enum CompleteLoginError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("User store error: {0}")]
    Repository(#[from] DomainError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub struct CompleteLoginHandler {
    identity_provider: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl CompleteLoginHandler {
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            identity_provider,
            users,
            sessions,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteLoginCommand,
    ) -> Result<CompleteLoginResult, CompleteLoginError> {
        // 1. Trade the code for an identity
        let identity = self
            .identity_provider
            .exchange_code(&cmd.code, &cmd.redirect_uri)
            .await?;

        // 2. Create or refresh the account
        let (user, is_new_user) = self.upsert(&identity).await?;

        // 3. Open a session
        let session_token = self.sessions.create(user.id).await?;

        tracing::info!(user_id = %user.id, is_new_user, "LinkedIn login completed");

        Ok(CompleteLoginResult {
            user_id: user.id,
            session_token,
            is_new_user,
        })
    }

    async fn upsert(&self, identity: &LinkedInIdentity) -> Result<(User, bool), DomainError> {
        let subject = &identity.profile.subject;

        if let Some(mut user) = self.users.find_by_linkedin_id(subject).await? {
            user.refresh_from_linkedin(identity);
            self.users.update(&user).await?;
            return Ok((user, false));
        }

        let user = User::from_linkedin(identity);
        match self.users.save(&user).await {
            Ok(()) => Ok((user, true)),
            // A concurrent first login won the insert
            Err(e) if e.code == ErrorCode::UserExists => {
                let mut existing = self
                    .users
                    .find_by_linkedin_id(subject)
                    .await?
                    .ok_or(e)?;
                existing.refresh_from_linkedin(identity);
                self.users.update(&existing).await?;
                Ok((existing, false))
            }
            Err(e) => Err(e),
        }
    }
}
