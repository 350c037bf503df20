//! HTTP handlers for the LinkedIn login endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use reqwest::Url;
use serde::Deserialize;

use crate::application::CompleteLoginCommand;
use crate::domain::auth::{AuthError, OAuthState, SessionToken};
use crate::ports::AuthorizationRequest;

use super::super::cookies::{expired_cookie, http_only_cookie};
use super::super::dto::SuccessResponse;
use super::super::redirect::found;
use super::super::state::AppState;
use super::AuthApiError;

/// Query string LinkedIn sends back to the callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET /api/auth/linkedin-initiate
///
/// Sets the `oauth_state` cookie and sends the browser to LinkedIn.
pub async fn linkedin_initiate(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Response), AuthApiError> {
    let settings = &state.settings;
    let client_id = settings
        .linkedin_client_id
        .as_deref()
        .ok_or(AuthError::NotConfigured("linkedin_client_id"))?;
    let redirect_uri = settings
        .linkedin_redirect_uri
        .as_deref()
        .ok_or(AuthError::NotConfigured("linkedin_redirect_uri"))?;

    let oauth_state = OAuthState::generate();
    let url = state
        .identity_provider
        .authorization_url(&AuthorizationRequest {
            client_id,
            redirect_uri,
            state: oauth_state.as_str(),
        })?;

    tracing::debug!("Redirecting to LinkedIn authorization");

    let jar = jar.add(http_only_cookie(
        OAuthState::COOKIE_NAME,
        oauth_state.as_str(),
        OAuthState::TTL_SECS,
        settings.secure_cookies,
    ));
    Ok((jar, found(&url)))
}

/// GET /api/auth/linkedin-callback
///
/// The `oauth_state` cookie is single use: every response expires it.
pub async fn linkedin_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Response) {
    let secure = state.settings.secure_cookies;
    let expected = jar
        .get(OAuthState::COOKIE_NAME)
        .and_then(|c| OAuthState::from_cookie(c.value()));
    let jar = jar.add(expired_cookie(OAuthState::COOKIE_NAME, secure));

    if let Some(error) = params.error.as_deref() {
        let denied = AuthError::Denied(error.to_string());
        tracing::warn!(
            error = %denied,
            description = params.error_description.as_deref().unwrap_or(""),
            "LinkedIn returned an authorization error"
        );
        return (jar, found(&login_error_url(&state.settings.app_url, error)));
    }

    match complete_login(&state, expected.as_ref(), params).await {
        Ok(token) => {
            let jar = jar.add(http_only_cookie(
                SessionToken::COOKIE_NAME,
                token.as_str(),
                state.settings.session_ttl_secs,
                secure,
            ));
            (jar, found(&state.settings.app_path("/dashboard")))
        }
        Err(e) => (jar, e.into_response()),
    }
}

async fn complete_login(
    state: &AppState,
    expected: Option<&OAuthState>,
    params: CallbackParams,
) -> Result<SessionToken, AuthApiError> {
    let returned = params.state.as_deref().ok_or(AuthError::InvalidState)?;
    match expected {
        Some(expected) if expected.matches(returned) => {}
        _ => return Err(AuthError::InvalidState.into()),
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or(AuthError::MissingCode)?;
    let redirect_uri = state
        .settings
        .linkedin_redirect_uri
        .clone()
        .ok_or(AuthError::NotConfigured("linkedin_redirect_uri"))?;

    let result = state
        .complete_login_handler()
        .handle(CompleteLoginCommand { code, redirect_uri })
        .await?;

    Ok(result.session_token)
}

/// `{app_url}/login?error=<error>`, with `error` query-encoded.
fn login_error_url(app_url: &str, error: &str) -> String {
    let login = format!("{}/login", app_url);
    match Url::parse_with_params(&login, &[("error", error)]) {
        Ok(url) => url.to_string(),
        Err(_) => login,
    }
}

/// POST /api/auth/logout
pub async fn logout_post(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = end_session(&state, jar).await;
    (jar, (StatusCode::OK, Json(SuccessResponse { success: true })))
}

/// GET /api/auth/logout
pub async fn logout_get(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    let jar = end_session(&state, jar).await;
    (jar, found(&state.settings.app_url))
}

/// Clears the store once and expires the cookie. Store failures never reach
/// the caller.
async fn end_session(state: &AppState, jar: CookieJar) -> CookieJar {
    let token = jar
        .get(SessionToken::COOKIE_NAME)
        .and_then(|c| SessionToken::from_cookie(c.value()));

    if let Err(e) = state.sessions.clear(token.as_ref()).await {
        tracing::warn!(error = %e, "Failed to clear session");
    }

    jar.add(expired_cookie(
        SessionToken::COOKIE_NAME,
        state.settings.secure_cookies,
    ))
}
