//! Authentication errors.

use thiserror::Error;

/// Errors raised along the LinkedIn login flow.
///
/// These are domain-centric: they describe what went wrong from the
/// application's perspective, not LinkedIn's wire format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// A required OAuth setting is absent.
    #[error("OAuth is not configured: missing {0}")]
    NotConfigured(&'static str),

    /// The callback `state` did not match the issued token.
    #[error("Invalid OAuth state")]
    InvalidState,

    /// The callback carried no authorization code.
    #[error("Missing authorization code")]
    MissingCode,

    /// The member declined, or LinkedIn reported an error.
    #[error("Authorization denied: {0}")]
    Denied(String),

    /// LinkedIn rejected the code or returned an unusable response.
    #[error("Code exchange failed: {0}")]
    ExchangeFailed(String),

    /// LinkedIn could not be reached.
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

impl AuthError {
    pub fn exchange_failed(message: impl Into<String>) -> Self {
        Self::ExchangeFailed(message.into())
    }

    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::ProviderUnavailable(message.into())
    }

    /// True for failures caused by the caller rather than the provider.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidState | AuthError::MissingCode | AuthError::Denied(_)
        )
    }
}

/// Errors from the session store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt session record: {0}")]
    Corrupt(String),
}
