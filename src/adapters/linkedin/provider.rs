//! LinkedIn identity provider.
//!
//! # Flow
//!
//! 1. `authorization_url` sends the member to LinkedIn with our client id,
//!    redirect URI, scopes and the anti-forgery `state`
//! 2. LinkedIn redirects back with `code`
//! 3. `exchange_code` trades the code for an access token, then reads the
//!    member profile from the userinfo endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::auth::{AuthError, LinkedInIdentity, LinkedInProfile, ProviderGrant};
use crate::domain::foundation::Timestamp;
use crate::ports::{AuthorizationRequest, IdentityProvider};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

/// OpenID userinfo response.
#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl From<UserInfoResponse> for LinkedInProfile {
    fn from(info: UserInfoResponse) -> Self {
        Self {
            subject: info.sub,
            email: info.email,
            name: info.name,
            picture: info.picture,
        }
    }
}

/// `IdentityProvider` backed by LinkedIn.
pub struct LinkedInIdentityProvider {
    http_client: reqwest::Client,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    scopes: String,
    authorization_url: String,
    token_url: String,
    userinfo_url: String,
}

impl LinkedInIdentityProvider {
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| AuthError::provider_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            client_id: config.client_id().map(String::from),
            client_secret: config.linkedin_client_secret.clone(),
            scopes: config.linkedin_scopes.clone(),
            authorization_url: config.linkedin_authorization_url.clone(),
            token_url: config.linkedin_token_url.clone(),
            userinfo_url: config.linkedin_userinfo_url.clone(),
        })
    }

    async fn fetch_token(&self, code: &str, redirect_uri: &str) -> Result<TokenResponse, AuthError> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or(AuthError::NotConfigured("LinkedIn client id"))?;
        let client_secret = self
            .client_secret
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::NotConfigured("LinkedIn client secret"))?;

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "LinkedIn token request failed");
                AuthError::provider_unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "LinkedIn rejected authorization code");
            return Err(AuthError::exchange_failed(format!(
                "token endpoint returned {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse LinkedIn token response");
            AuthError::exchange_failed(format!("invalid token response: {}", e))
        })
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<LinkedInProfile, AuthError> {
        let response = self
            .http_client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "LinkedIn userinfo request failed");
                AuthError::provider_unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, "LinkedIn userinfo request rejected");
            return Err(AuthError::exchange_failed(format!(
                "userinfo endpoint returned {}",
                status
            )));
        }

        let info: UserInfoResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse LinkedIn userinfo");
            AuthError::exchange_failed(format!("invalid userinfo response: {}", e))
        })?;

        Ok(info.into())
    }
}

#[async_trait]
impl IdentityProvider for LinkedInIdentityProvider {
    fn authorization_url(&self, request: &AuthorizationRequest<'_>) -> Result<String, AuthError> {
        let url = Url::parse_with_params(
            &self.authorization_url,
            &[
                ("response_type", "code"),
                ("client_id", request.client_id),
                ("redirect_uri", request.redirect_uri),
                ("state", request.state),
                ("scope", self.scopes.as_str()),
            ],
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Invalid LinkedIn authorization endpoint");
            AuthError::NotConfigured("LinkedIn authorization URL")
        })?;

        Ok(url.into())
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<LinkedInIdentity, AuthError> {
        let token = self.fetch_token(code, redirect_uri).await?;
        let expires_at = match token.expires_in {
            Some(secs) => Some(Timestamp::now().checked_plus_secs(secs).ok_or_else(|| {
                tracing::warn!(expires_in = secs, "LinkedIn token expiry out of range");
                AuthError::exchange_failed("token expiry out of range")
            })?),
            None => None,
        };
        let profile = self.fetch_profile(&token.access_token).await?;

        tracing::info!(subject = %profile.subject, "LinkedIn code exchange completed");

        Ok(LinkedInIdentity {
            profile,
            grant: ProviderGrant {
                access_token: SecretString::new(token.access_token),
                expires_at,
                scope: token.scope,
            },
        })
    }
}
