//! Identity provider port (LinkedIn OAuth 2.0 / OpenID Connect).

use async_trait::async_trait;

use crate::domain::auth::{AuthError, LinkedInIdentity};

/// Parameters embedded in the authorization redirect.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationRequest<'a> {
    pub client_id: &'a str,
    pub redirect_uri: &'a str,
    pub state: &'a str,
}

/// Builds authorization URLs and redeems authorization codes.
///
/// # Contract
///
/// - `authorization_url` is pure: no network access
/// - `exchange_code` returns `AuthError::ExchangeFailed` when the provider
///   rejects the code, `AuthError::ProviderUnavailable` on transport failure
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Absolute URL the browser is redirected to.
    fn authorization_url(&self, request: &AuthorizationRequest<'_>) -> Result<String, AuthError>;

    /// Redeems `code` and fetches the member's profile.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<LinkedInIdentity, AuthError>;
}
