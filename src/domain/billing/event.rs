//! Verified billing events.
//!
//! Produced by a `WebhookVerifier` only after the signature check passed,
//! then handed to the `BillingEventHandler`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::user::SubscriptionStatus;

/// A billing event whose origin has been verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingEvent {
    /// Provider event id (`evt_...`).
    pub id: String,
    pub event_type: BillingEventType,
    pub data: BillingEventData,
    pub created_at: Timestamp,
    pub livemode: bool,
}

/// Event types the subscription sync reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingEventType {
    CheckoutSessionCompleted,
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionDeleted,
    InvoicePaid,
    InvoicePaymentFailed,
    TrialWillEnd,
    /// Anything else, with the provider's type string.
    Unknown(String),
}

impl BillingEventType {
    /// Maps a Stripe event `type` string.
    pub fn from_stripe(event_type: &str) -> Self {
        match event_type {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "customer.subscription.created" => Self::SubscriptionCreated,
            "customer.subscription.updated" => Self::SubscriptionUpdated,
            "customer.subscription.deleted" => Self::SubscriptionDeleted,
            "invoice.paid" | "invoice.payment_succeeded" => Self::InvoicePaid,
            "invoice.payment_failed" => Self::InvoicePaymentFailed,
            "customer.subscription.trial_will_end" => Self::TrialWillEnd,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Event payload, narrowed to the fields the sync needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BillingEventData {
    Checkout {
        session_id: String,
        customer_id: Option<String>,
        subscription_id: Option<String>,
        /// Our user id, from session metadata or `client_reference_id`.
        user_id: Option<String>,
    },
    Subscription {
        subscription_id: String,
        customer_id: String,
        status: SubscriptionStatus,
        current_period_end: Option<i64>,
    },
    Invoice {
        invoice_id: String,
        customer_id: Option<String>,
        subscription_id: Option<String>,
    },
    /// Payload of an event type we do not interpret.
    Raw { object: serde_json::Value },
}
