//! Stripe objects as they arrive in webhook payloads.
//!
//! Only the envelope `id` is required. Everything else defaults, so a
//! correctly signed but sparse payload still parses and is acknowledged.

use std::collections::HashMap;

use serde::Deserialize;

/// Stripe event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeWebhookEvent {
    /// Event id (`evt_...`).
    pub id: String,

    #[serde(rename = "type", default)]
    pub event_type: String,

    /// Unix seconds.
    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub data: Option<StripeEventData>,

    #[serde(default)]
    pub livemode: bool,
}

impl StripeWebhookEvent {
    /// The `data.object` payload, or `Null` when absent.
    pub fn object(&self) -> serde_json::Value {
        self.data
            .as_ref()
            .map(|d| d.object.clone())
            .unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    #[serde(default)]
    pub object: serde_json::Value,
}

/// A reference that Stripe sends either as a bare id or as an expanded object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Expandable {
    Id(String),
    Object { id: String },
}

impl Expandable {
    pub fn into_id(self) -> String {
        match self {
            Expandable::Id(id) | Expandable::Object { id } => id,
        }
    }
}

/// `checkout.session` object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    #[serde(default)]
    pub customer: Option<Expandable>,
    #[serde(default)]
    pub subscription: Option<Expandable>,
    #[serde(default)]
    pub client_reference_id: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl StripeCheckoutSession {
    /// Our user id: `metadata.user_id` first, then `client_reference_id`.
    pub fn user_id(&self) -> Option<String> {
        self.metadata
            .get("user_id")
            .or(self.client_reference_id.as_ref())
            .filter(|v| !v.is_empty())
            .cloned()
    }
}

/// `subscription` object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    pub id: String,
    pub customer: Expandable,
    pub status: String,
    #[serde(default)]
    pub current_period_end: Option<i64>,
}

/// `invoice` object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeInvoice {
    pub id: String,
    #[serde(default)]
    pub customer: Option<Expandable>,
    #[serde(default)]
    pub subscription: Option<Expandable>,
}
