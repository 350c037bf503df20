//! CSRF state token for the LinkedIn authorization handshake.

use std::fmt;

use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Single-use random value binding an authorization redirect to its callback.
///
/// Issued by the login initiation endpoint, stored client-side in the
/// `oauth_state` cookie and compared exactly once against the `state`
/// query parameter the provider echoes back.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthState(String);

impl OAuthState {
    /// Cookie holding the issued token.
    pub const COOKIE_NAME: &'static str = "oauth_state";

    /// Cookie lifetime; the token is void after this.
    pub const TTL_SECS: u64 = 600;

    /// Generates a fresh token from the OS random source.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Restores a previously issued token, rejecting blank values.
    pub fn from_cookie(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    /// Returns the token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time, exact comparison against the callback's `state`.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

// Token values stay out of logs.
impl fmt::Debug for OAuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OAuthState(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn generated_tokens_are_distinct() {
        let tokens: HashSet<String> = (0..1000)
            .map(|_| OAuthState::generate().as_str().to_string())
            .collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn generated_token_is_a_uuid() {
        let state = OAuthState::generate();
        assert!(Uuid::parse_str(state.as_str()).is_ok());
    }

    #[test]
    fn matches_exact_value_only() {
        let state = OAuthState::from_cookie("abc-123").unwrap();
        assert!(state.matches("abc-123"));
        assert!(!state.matches("abc-124"));
        assert!(!state.matches("abc-1234"));
        assert!(!state.matches("ABC-123"));
        assert!(!state.matches(""));
    }

    #[test]
    fn from_cookie_rejects_blank() {
        assert!(OAuthState::from_cookie("").is_none());
        assert!(OAuthState::from_cookie("   ").is_none());
    }

    #[test]
    fn debug_does_not_leak_value() {
        let state = OAuthState::from_cookie("secret-value").unwrap();
        assert!(!format!("{:?}", state).contains("secret-value"));
    }

    proptest! {
        #[test]
        fn token_matches_itself_and_nothing_else(other in "[a-f0-9-]{0,40}") {
            let state = OAuthState::generate();
            prop_assert!(state.matches(state.as_str()));
            prop_assert_eq!(state.matches(&other), other == state.as_str());
        }
    }
}
