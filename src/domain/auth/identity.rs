//! Identity returned by LinkedIn after a successful code exchange.

use secrecy::SecretString;

use crate::domain::foundation::Timestamp;

/// LinkedIn member profile from the OpenID userinfo endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedInProfile {
    /// Stable member identifier (`sub` claim).
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Access token granted for posting on the member's behalf.
#[derive(Debug, Clone)]
pub struct ProviderGrant {
    pub access_token: SecretString,
    pub expires_at: Option<Timestamp>,
    pub scope: Option<String>,
}

/// Outcome of a completed authorization-code exchange.
#[derive(Debug, Clone)]
pub struct LinkedInIdentity {
    pub profile: LinkedInProfile,
    pub grant: ProviderGrant,
}
