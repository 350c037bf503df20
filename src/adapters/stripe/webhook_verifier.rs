//! Stripe webhook verification.
//!
//! Implements the `WebhookVerifier` port. An event is only built after the
//! signature over the exact request bytes has been checked.
//!
//! # Security
//!
//! - HMAC-SHA256 with constant-time comparison
//! - Timestamps older than the tolerance (default 5 minutes) are rejected
//! - Timestamps more than 60 seconds in the future are rejected
//! - The signing secret is held as `secrecy::SecretString`

use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::billing::{BillingError, BillingEvent, BillingEventData, BillingEventType};
use crate::domain::foundation::Timestamp;
use crate::domain::user::SubscriptionStatus;
use crate::ports::WebhookVerifier;

use super::signature::{compute_signature, SignatureHeader};
use super::webhook_types::{
    StripeCheckoutSession, StripeInvoice, StripeSubscription, StripeWebhookEvent,
};

/// Default age limit for signed timestamps.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Allowed clock skew for timestamps ahead of ours.
const MAX_FUTURE_SKEW_SECS: i64 = 60;

/// Verifies Stripe-signed webhook payloads.
pub struct StripeWebhookVerifier {
    secret: SecretString,
    tolerance_secs: i64,
    require_livemode: bool,
}

impl StripeWebhookVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
            require_livemode: false,
        }
    }

    pub fn from_config(config: &PaymentConfig) -> Self {
        Self::new(config.stripe_webhook_secret.clone())
            .with_tolerance(config.webhook_tolerance_secs)
            .with_require_livemode(config.require_livemode)
    }

    pub fn with_tolerance(mut self, secs: i64) -> Self {
        self.tolerance_secs = secs;
        self
    }

    /// Reject test-mode events (production).
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }

    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
        now: i64,
    ) -> Result<(), BillingError> {
        // `t=` may be any i64; saturates to "too old"
        let age = now.saturating_sub(header.timestamp);

        if age > self.tolerance_secs {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook timestamp outside tolerance"
            );
            return Err(BillingError::TimestampOutOfRange { age_secs: age });
        }

        if age < -MAX_FUTURE_SKEW_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook timestamp in the future"
            );
            return Err(BillingError::TimestampInFuture);
        }

        let expected = compute_signature(
            self.secret.expose_secret().as_bytes(),
            header.timestamp,
            payload,
        );

        if !header.matches(&expected) {
            tracing::warn!(
                candidates = header.v1_signatures.len(),
                "Webhook signature mismatch"
            );
            return Err(BillingError::InvalidSignature);
        }

        Ok(())
    }

    fn parse_event(&self, payload: &[u8]) -> Result<BillingEvent, BillingError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            BillingError::parse(format!("Invalid JSON: {}", e))
        })?;

        if self.require_livemode && !stripe_event.livemode {
            tracing::warn!(event_id = %stripe_event.id, "Rejected test mode event");
            return Err(BillingError::LivemodeRequired);
        }

        let event_type = BillingEventType::from_stripe(&stripe_event.event_type);
        let data = extract_event_data(&event_type, &stripe_event)?;

        Ok(BillingEvent {
            id: stripe_event.id,
            event_type,
            data,
            created_at: Timestamp::from_unix_secs(stripe_event.created),
            livemode: stripe_event.livemode,
        })
    }
}

impl WebhookVerifier for StripeWebhookVerifier {
    fn construct_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<BillingEvent, BillingError> {
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Malformed Stripe-Signature header");
            BillingError::parse(e.to_string())
        })?;

        self.verify_signature(payload, &header, chrono::Utc::now().timestamp())?;
        self.parse_event(payload)
    }
}

/// Narrow `data.object` to the fields the subscription sync needs.
fn extract_event_data(
    event_type: &BillingEventType,
    event: &StripeWebhookEvent,
) -> Result<BillingEventData, BillingError> {
    let object = event.object();

    match event_type {
        BillingEventType::CheckoutSessionCompleted => {
            let session: StripeCheckoutSession = from_object(object, "checkout session")?;
            let user_id = session.user_id();
            Ok(BillingEventData::Checkout {
                session_id: session.id,
                customer_id: session.customer.map(|c| c.into_id()),
                subscription_id: session.subscription.map(|s| s.into_id()),
                user_id,
            })
        }
        BillingEventType::SubscriptionCreated
        | BillingEventType::SubscriptionUpdated
        | BillingEventType::SubscriptionDeleted
        | BillingEventType::TrialWillEnd => {
            let sub: StripeSubscription = from_object(object, "subscription")?;
            Ok(BillingEventData::Subscription {
                subscription_id: sub.id,
                customer_id: sub.customer.into_id(),
                status: SubscriptionStatus::from_stripe(&sub.status),
                current_period_end: sub.current_period_end,
            })
        }
        BillingEventType::InvoicePaid | BillingEventType::InvoicePaymentFailed => {
            let invoice: StripeInvoice = from_object(object, "invoice")?;
            Ok(BillingEventData::Invoice {
                invoice_id: invoice.id,
                customer_id: invoice.customer.map(|c| c.into_id()),
                subscription_id: invoice.subscription.map(|s| s.into_id()),
            })
        }
        BillingEventType::Unknown(_) => Ok(BillingEventData::Raw { object }),
    }
}

fn from_object<T: serde::de::DeserializeOwned>(
    object: serde_json::Value,
    kind: &str,
) -> Result<T, BillingError> {
    if object.is_null() {
        return Err(BillingError::MissingField("data.object"));
    }
    serde_json::from_value(object)
        .map_err(|e| BillingError::parse(format!("Invalid {} object: {}", kind, e)))
}
