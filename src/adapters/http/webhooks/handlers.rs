//! Webhook ingestion: verify, then dispatch.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::billing::BillingError;

use super::super::dto::{ErrorResponse, ReceivedResponse};
use super::super::state::AppState;

pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

/// POST /api/webhooks/billing
///
/// The body is verified exactly as received. The business handler only sees
/// events whose signature checked out.
pub async fn billing_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .ok_or(WebhookApiError::MissingSignature)?
        .to_str()
        .map_err(|_| WebhookApiError::Failed(BillingError::parse("non-ASCII signature header")))?;

    let event = state
        .webhook_verifier
        .construct_event(&body, signature)
        .map_err(WebhookApiError::Failed)?;

    tracing::info!(
        event_id = %event.id,
        event_type = ?event.event_type,
        livemode = event.livemode,
        "Billing webhook verified"
    );

    let event_id = event.id.clone();
    state
        .billing_handler
        .handle(event)
        .await
        .map_err(WebhookApiError::Failed)?;

    tracing::debug!(event_id = %event_id, "Billing webhook processed");
    Ok(Json(ReceivedResponse { received: true }))
}

/// Webhook failures. Every failure past the header check answers with the
/// same body so callers learn nothing about why.
#[derive(Debug)]
pub enum WebhookApiError {
    MissingSignature,
    Failed(BillingError),
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            WebhookApiError::MissingSignature => {
                tracing::warn!("Billing webhook without signature header");
                "Missing stripe-signature header"
            }
            WebhookApiError::Failed(e) if e.is_verification_failure() => {
                tracing::warn!(error = %e, "Billing webhook rejected");
                "Webhook handler failed"
            }
            WebhookApiError::Failed(e) => {
                tracing::error!(error = %e, "Billing webhook failed");
                "Webhook handler failed"
            }
        };

        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_is_bad_request() {
        for err in [
            WebhookApiError::MissingSignature,
            WebhookApiError::Failed(BillingError::InvalidSignature),
            WebhookApiError::Failed(BillingError::Storage("down".into())),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}
