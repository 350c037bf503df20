//! Shared application state for the HTTP adapters.

use std::sync::Arc;

use crate::application::CompleteLoginHandler;
use crate::config::{AuthConfig, ServerConfig};
use crate::ports::{
    BillingEventHandler, IdentityProvider, SessionStore, UserRepository, WebhookVerifier,
};

/// Request-independent settings the handlers read.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Public base URL, without trailing slash.
    pub app_url: String,
    pub linkedin_client_id: Option<String>,
    pub linkedin_redirect_uri: Option<String>,
    pub session_ttl_secs: u64,
    /// Adds `Secure` to every cookie.
    pub secure_cookies: bool,
}

impl HttpSettings {
    pub fn from_config(server: &ServerConfig, auth: &AuthConfig) -> Self {
        Self {
            app_url: server.app_url().to_string(),
            linkedin_client_id: auth.client_id().map(String::from),
            linkedin_redirect_uri: auth.redirect_uri().map(String::from),
            session_ttl_secs: auth.session_ttl_secs,
            secure_cookies: server.is_production(),
        }
    }

    /// Absolute application URL for `path`.
    pub fn app_path(&self, path: &str) -> String {
        format!("{}/{}", self.app_url, path.trim_start_matches('/'))
    }
}

/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub sessions: Arc<dyn SessionStore>,
    pub users: Arc<dyn UserRepository>,
    pub webhook_verifier: Arc<dyn WebhookVerifier>,
    pub billing_handler: Arc<dyn BillingEventHandler>,
    pub settings: Arc<HttpSettings>,
}

impl AppState {
    pub fn complete_login_handler(&self) -> CompleteLoginHandler {
        CompleteLoginHandler::new(
            self.identity_provider.clone(),
            self.users.clone(),
            self.sessions.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    #[test]
    fn settings_follow_config() {
        let server = ServerConfig {
            environment: Environment::Production,
            app_url: "https://app.postcadence.io/".to_string(),
            ..Default::default()
        };
        let auth = AuthConfig {
            linkedin_client_id: Some("client".to_string()),
            linkedin_redirect_uri: Some("  ".to_string()),
            session_ttl_secs: 120,
            ..Default::default()
        };

        let settings = HttpSettings::from_config(&server, &auth);

        assert_eq!(settings.app_url, "https://app.postcadence.io");
        assert_eq!(settings.app_path("/dashboard"), "https://app.postcadence.io/dashboard");
        assert_eq!(settings.linkedin_client_id.as_deref(), Some("client"));
        assert!(settings.linkedin_redirect_uri.is_none());
        assert_eq!(settings.session_ttl_secs, 120);
        assert!(settings.secure_cookies);
    }
}
