//! Integration tests for billing webhook ingestion.
//!
//! Requests are signed with the same scheme Stripe uses and sent through the
//! full router; the business handler is a recorder.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::Router;
use http::{Request, Response, StatusCode};
use secrecy::SecretString;
use tower::ServiceExt;

use postcadence::adapters::http::{app_router, AppState, HttpSettings};
use postcadence::adapters::stripe::signature_header;
use postcadence::adapters::{
    InMemorySessionStore, InMemoryUserRepository, LinkedInIdentityProvider, StripeWebhookVerifier,
};
use postcadence::application::SubscriptionSyncHandler;
use postcadence::config::AuthConfig;
use postcadence::domain::auth::{LinkedInIdentity, LinkedInProfile, ProviderGrant};
use postcadence::domain::billing::{BillingError, BillingEvent, BillingEventType};
use postcadence::domain::user::{SubscriptionStatus, User};
use postcadence::ports::{BillingEventHandler, UserRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SECRET: &str = "whsec_test_secret";

/// Records every dispatched event, optionally failing.
#[derive(Default)]
struct RecordingHandler {
    events: Mutex<Vec<BillingEvent>>,
    fail: bool,
}

impl RecordingHandler {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn events(&self) -> Vec<BillingEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl BillingEventHandler for RecordingHandler {
    async fn handle(&self, event: BillingEvent) -> Result<(), BillingError> {
        self.events.lock().unwrap().push(event);
        if self.fail {
            return Err(BillingError::Storage("database unavailable".to_string()));
        }
        Ok(())
    }
}

fn state_with(
    billing_handler: Arc<dyn BillingEventHandler>,
    users: Arc<InMemoryUserRepository>,
) -> AppState {
    AppState {
        identity_provider: Arc::new(
            LinkedInIdentityProvider::from_config(&AuthConfig::default()).unwrap(),
        ),
        sessions: Arc::new(InMemorySessionStore::new(3600)),
        users,
        webhook_verifier: Arc::new(StripeWebhookVerifier::new(SecretString::new(
            SECRET.to_string(),
        ))),
        billing_handler,
        settings: Arc::new(HttpSettings {
            app_url: "http://localhost:3000".to_string(),
            linkedin_client_id: None,
            linkedin_redirect_uri: None,
            session_ttl_secs: 3600,
            secure_cookies: false,
        }),
    }
}

fn recording_app(handler: Arc<RecordingHandler>) -> Router {
    let state = state_with(handler, Arc::new(InMemoryUserRepository::new()));
    app_router(state, Duration::from_secs(5))
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn webhook(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhooks/billing")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("stripe-signature", signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn signed(body: &str) -> Request<Body> {
    let header = signature_header(SECRET, now(), body.as_bytes());
    webhook(body, Some(&header))
}

async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn failed_body() -> serde_json::Value {
    serde_json::json!({"error": "Webhook handler failed"})
}

// =============================================================================
// Verification
// =============================================================================

#[tokio::test]
async fn signed_minimal_event_is_received() {
    let handler = Arc::new(RecordingHandler::default());
    let app = recording_app(handler.clone());

    let response = app.oneshot(signed(r#"{"id":"evt_1"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"received": true})
    );
    let events = handler.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "evt_1");
}

#[tokio::test]
async fn missing_signature_header_never_dispatches() {
    let handler = Arc::new(RecordingHandler::default());
    let app = recording_app(handler.clone());

    let response = app
        .oneshot(webhook(r#"{"id":"evt_1"}"#, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"error": "Missing stripe-signature header"})
    );
    assert!(handler.events().is_empty());
}

#[tokio::test]
async fn tampered_signature_is_rejected() {
    let handler = Arc::new(RecordingHandler::default());
    let app = recording_app(handler.clone());
    let body = r#"{"id":"evt_1"}"#;

    let mut header = signature_header(SECRET, now(), body.as_bytes());
    let last = header.pop().unwrap();
    header.push(if last == 'a' { 'b' } else { 'a' });

    let response = app.oneshot(webhook(body, Some(&header))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, failed_body());
    assert!(handler.events().is_empty());
}

#[tokio::test]
async fn tampered_body_is_rejected() {
    let handler = Arc::new(RecordingHandler::default());
    let app = recording_app(handler.clone());

    let header = signature_header(SECRET, now(), br#"{"id":"evt_1"}"#);
    let response = app
        .oneshot(webhook(r#"{"id":"evt_2"}"#, Some(&header)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(handler.events().is_empty());
}

#[tokio::test]
async fn wrong_secret_is_rejected() {
    let handler = Arc::new(RecordingHandler::default());
    let app = recording_app(handler.clone());
    let body = r#"{"id":"evt_1"}"#;

    let header = signature_header("whsec_other", now(), body.as_bytes());
    let response = app.oneshot(webhook(body, Some(&header))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, failed_body());
    assert!(handler.events().is_empty());
}

#[tokio::test]
async fn stale_timestamp_is_rejected() {
    let handler = Arc::new(RecordingHandler::default());
    let app = recording_app(handler.clone());
    let body = r#"{"id":"evt_1"}"#;

    let header = signature_header(SECRET, now() - 301, body.as_bytes());
    let response = app.oneshot(webhook(body, Some(&header))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(handler.events().is_empty());
}

#[tokio::test]
async fn extreme_timestamp_is_rejected_generically() {
    for header in [
        "t=-9223372036854775808,v1=00",
        "t=9223372036854775807,v1=00",
    ] {
        let handler = Arc::new(RecordingHandler::default());
        let app = recording_app(handler.clone());

        let response = app
            .oneshot(webhook(r#"{"id":"evt_1"}"#, Some(header)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, failed_body());
        assert!(handler.events().is_empty());
    }
}

#[tokio::test]
async fn malformed_header_is_rejected() {
    let handler = Arc::new(RecordingHandler::default());
    let app = recording_app(handler.clone());

    let response = app
        .oneshot(webhook(r#"{"id":"evt_1"}"#, Some("garbage")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, failed_body());
}

#[tokio::test]
async fn any_matching_v1_signature_is_accepted() {
    let handler = Arc::new(RecordingHandler::default());
    let app = recording_app(handler.clone());
    let body = r#"{"id":"evt_rotated"}"#;

    let ts = now();
    let valid = signature_header(SECRET, ts, body.as_bytes());
    let valid_v1 = valid.split(",v1=").nth(1).unwrap();
    let header = format!("t={},v1={},v1={}", ts, "00".repeat(32), valid_v1);

    let response = app.oneshot(webhook(body, Some(&header))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(handler.events().len(), 1);
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn dispatch_failure_has_same_body_as_verification_failure() {
    let handler = Arc::new(RecordingHandler::failing());
    let app = recording_app(handler.clone());

    let response = app.oneshot(signed(r#"{"id":"evt_1"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, failed_body());
    assert_eq!(handler.events().len(), 1);
}

#[tokio::test]
async fn event_type_reaches_handler() {
    let handler = Arc::new(RecordingHandler::default());
    let app = recording_app(handler.clone());
    let body = serde_json::json!({
        "id": "evt_inv",
        "type": "invoice.payment_failed",
        "created": 1_700_000_000,
        "livemode": false,
        "data": {"object": {"id": "in_1", "customer": "cus_1", "subscription": "sub_1"}}
    })
    .to_string();

    let response = app.oneshot(signed(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        handler.events()[0].event_type,
        BillingEventType::InvoicePaymentFailed
    );
}

#[tokio::test]
async fn subscription_sync_updates_user_end_to_end() {
    let users = Arc::new(InMemoryUserRepository::new());
    let mut user = User::from_linkedin(&LinkedInIdentity {
        profile: LinkedInProfile {
            subject: "li-1".to_string(),
            email: Some("ada@example.com".to_string()),
            name: None,
            picture: None,
        },
        grant: ProviderGrant {
            access_token: SecretString::new("token".to_string()),
            expires_at: None,
            scope: None,
        },
    });
    user.stripe_customer_id = Some("cus_1".to_string());
    users.save(&user).await.unwrap();

    let state = state_with(Arc::new(SubscriptionSyncHandler::new(users.clone())), users.clone());
    let app = app_router(state, Duration::from_secs(5));

    let body = serde_json::json!({
        "id": "evt_sub",
        "type": "customer.subscription.updated",
        "created": 1_700_000_000,
        "livemode": false,
        "data": {"object": {
            "id": "sub_1",
            "customer": "cus_1",
            "status": "active",
            "current_period_end": 1_900_000_000
        }}
    })
    .to_string();

    let response = app.oneshot(signed(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = users.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.subscription_status, SubscriptionStatus::Active);
    assert_eq!(stored.stripe_subscription_id.as_deref(), Some("sub_1"));
}

#[tokio::test]
async fn event_for_unknown_customer_fails() {
    let users = Arc::new(InMemoryUserRepository::new());
    let state = state_with(Arc::new(SubscriptionSyncHandler::new(users.clone())), users);
    let app = app_router(state, Duration::from_secs(5));

    let body = serde_json::json!({
        "id": "evt_inv",
        "type": "invoice.paid",
        "data": {"object": {"id": "in_1", "customer": "cus_missing"}}
    })
    .to_string();

    let response = app.oneshot(signed(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, failed_body());
}
