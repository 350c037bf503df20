//! Axum router for the auth endpoints.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{linkedin_callback, linkedin_initiate, logout_get, logout_post};

/// Routes, mounted under `/api/auth`:
///
/// - `GET /linkedin-initiate`
/// - `GET /linkedin-callback`
/// - `POST|GET /logout`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/linkedin-initiate", get(linkedin_initiate))
        .route("/linkedin-callback", get(linkedin_callback))
        .route("/logout", get(logout_get).post(logout_post))
}
