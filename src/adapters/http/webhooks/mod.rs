//! HTTP adapter for inbound billing webhooks.
//!
//! - `POST /api/webhooks/billing` - Verified Stripe events

mod handlers;
mod routes;

pub use handlers::{billing_webhook, WebhookApiError, STRIPE_SIGNATURE_HEADER};
pub use routes::webhook_routes;
