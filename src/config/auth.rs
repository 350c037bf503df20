//! Authentication configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::auth::Session;

/// Authentication configuration (LinkedIn OAuth + sessions)
///
/// The client id and redirect URI are optional at load time. The login
/// initiation endpoint reports them missing per request instead of
/// refusing to boot the whole service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// LinkedIn OAuth client id
    pub linkedin_client_id: Option<String>,

    /// LinkedIn OAuth client secret (used for the code exchange)
    pub linkedin_client_secret: Option<SecretString>,

    /// Redirect URI registered with LinkedIn
    pub linkedin_redirect_uri: Option<String>,

    /// Space-separated OAuth scopes
    #[serde(default = "default_scopes")]
    pub linkedin_scopes: String,

    /// Authorization endpoint
    #[serde(default = "default_authorization_url")]
    pub linkedin_authorization_url: String,

    /// Token endpoint
    #[serde(default = "default_token_url")]
    pub linkedin_token_url: String,

    /// OpenID userinfo endpoint
    #[serde(default = "default_userinfo_url")]
    pub linkedin_userinfo_url: String,

    /// Session lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

impl AuthConfig {
    /// Client id, treating an empty value as absent.
    pub fn client_id(&self) -> Option<&str> {
        non_empty(self.linkedin_client_id.as_deref())
    }

    /// Redirect URI, treating an empty value as absent.
    pub fn redirect_uri(&self) -> Option<&str> {
        non_empty(self.linkedin_redirect_uri.as_deref())
    }

    /// Session TTL as Duration
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production the redirect URI, when set, must use HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.session_ttl_secs == 0 || self.session_ttl_secs > Session::MAX_TTL_SECS {
            return Err(ValidationError::InvalidSessionTtl);
        }

        if let Some(uri) = self.redirect_uri() {
            if reqwest::Url::parse(uri).is_err() {
                return Err(ValidationError::InvalidRedirectUri(uri.to_string()));
            }
            if *environment == Environment::Production && !uri.starts_with("https://") {
                return Err(ValidationError::InvalidRedirectUri(uri.to_string()));
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            linkedin_client_id: None,
            linkedin_client_secret: None,
            linkedin_redirect_uri: None,
            linkedin_scopes: default_scopes(),
            linkedin_authorization_url: default_authorization_url(),
            linkedin_token_url: default_token_url(),
            linkedin_userinfo_url: default_userinfo_url(),
            session_ttl_secs: default_session_ttl(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn default_scopes() -> String {
    "openid profile email w_member_social".to_string()
}

fn default_authorization_url() -> String {
    "https://www.linkedin.com/oauth/v2/authorization".to_string()
}

fn default_token_url() -> String {
    "https://www.linkedin.com/oauth/v2/accessToken".to_string()
}

fn default_userinfo_url() -> String {
    "https://api.linkedin.com/v2/userinfo".to_string()
}

fn default_session_ttl() -> u64 {
    60 * 60 * 24 * 30
}
