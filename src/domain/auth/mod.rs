//! Authentication domain: OAuth state, LinkedIn identity, sessions.

mod errors;
mod identity;
mod oauth_state;
mod session;

pub use errors::{AuthError, SessionError};
pub use identity::{LinkedInIdentity, LinkedInProfile, ProviderGrant};
pub use oauth_state::OAuthState;
pub use session::{Session, SessionToken};
