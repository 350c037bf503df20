//! Error responses for the auth endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::CompleteLoginError;
use crate::domain::auth::AuthError;

use super::super::dto::ErrorResponse;

/// API error that converts login failures into HTTP responses.
///
/// Provider and storage detail is logged, never returned.
#[derive(Debug)]
pub enum AuthApiError {
    Auth(AuthError),
    Internal(String),
}

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<CompleteLoginError> for AuthApiError {
    fn from(err: CompleteLoginError) -> Self {
        match err {
            CompleteLoginError::Auth(e) => Self::Auth(e),
            CompleteLoginError::Repository(e) => Self::Internal(e.to_string()),
            CompleteLoginError::Session(e) => Self::Internal(e.to_string()),
        }
    }
}

impl AuthApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AuthApiError::Auth(AuthError::NotConfigured(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "LinkedIn OAuth is not configured",
            ),
            AuthApiError::Auth(AuthError::InvalidState) => {
                (StatusCode::BAD_REQUEST, "Invalid OAuth state")
            }
            AuthApiError::Auth(AuthError::MissingCode) => {
                (StatusCode::BAD_REQUEST, "Missing authorization code")
            }
            AuthApiError::Auth(AuthError::Denied(_)) => {
                (StatusCode::BAD_REQUEST, "Authorization denied")
            }
            AuthApiError::Auth(AuthError::ExchangeFailed(_))
            | AuthApiError::Auth(AuthError::ProviderUnavailable(_)) => {
                (StatusCode::BAD_GATEWAY, "LinkedIn authentication failed")
            }
            AuthApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to complete login")
            }
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match &self {
            AuthApiError::Auth(e) if e.is_client_error() => {
                tracing::warn!(error = %e, "Login request rejected");
            }
            AuthApiError::Auth(e) => tracing::error!(error = %e, "Login failed"),
            AuthApiError::Internal(detail) => tracing::error!(error = %detail, "Login failed"),
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::SessionError;
    use crate::domain::foundation::DomainError;

    #[test]
    fn maps_each_failure_to_status() {
        let cases = [
            (AuthError::NotConfigured("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AuthError::InvalidState, StatusCode::BAD_REQUEST),
            (AuthError::MissingCode, StatusCode::BAD_REQUEST),
            (AuthError::Denied("user_cancelled_login".into()), StatusCode::BAD_REQUEST),
            (AuthError::exchange_failed("bad"), StatusCode::BAD_GATEWAY),
            (AuthError::provider_unavailable("down"), StatusCode::BAD_GATEWAY),
        ];
        for (err, expected) in cases {
            assert_eq!(AuthApiError::from(err).into_response().status(), expected);
        }
    }

    #[test]
    fn storage_failures_are_internal() {
        let repo: AuthApiError =
            CompleteLoginError::Repository(DomainError::database("insert", "boom")).into();
        let session: AuthApiError =
            CompleteLoginError::Session(SessionError::Unavailable("redis".into())).into();

        assert_eq!(repo.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(session.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn provider_detail_is_not_exposed() {
        let err = AuthApiError::from(AuthError::exchange_failed("secret detail"));
        let (_, message) = err.status_and_message();
        assert!(!message.contains("secret"));
    }
}
