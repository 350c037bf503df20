//! HTTP adapters - the public REST surface.
//!
//! ```text
//! /health
//! /api/auth/linkedin-initiate
//! /api/auth/linkedin-callback
//! /api/auth/logout
//! /api/webhooks/billing
//! ```

pub mod auth;
pub mod cookies;
pub mod dto;
mod health;
pub mod redirect;
pub mod state;
pub mod webhooks;

use std::time::Duration;

use axum::http::HeaderName;
use axum::routing::get;
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use auth::auth_routes;
pub use health::health;
pub use state::{AppState, HttpSettings};
pub use webhooks::webhook_routes;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Everything under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/webhooks", webhook_routes())
}

/// The complete application with its middleware stack.
///
/// Requests get an `x-request-id` (kept if the caller sent one), which is
/// echoed on the response.
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}
