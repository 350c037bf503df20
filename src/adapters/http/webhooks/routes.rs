//! Axum router for the webhook endpoints.

use axum::routing::post;
use axum::Router;

use super::super::state::AppState;
use super::handlers::billing_webhook;

/// Routes, mounted under `/api/webhooks`:
///
/// - `POST /billing`
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/billing", post(billing_webhook))
}
