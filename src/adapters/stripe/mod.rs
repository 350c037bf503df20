//! Stripe webhook adapter.
//!
//! Implements the `WebhookVerifier` port: parses the `Stripe-Signature`
//! header, checks the HMAC-SHA256 signature over the raw body and narrows the
//! event payload into a domain `BillingEvent`.
//!
//! # Configuration
//!
//! - `POSTCADENCE__PAYMENT__STRIPE_WEBHOOK_SECRET`: signing secret (`whsec_...`)
//! - `POSTCADENCE__PAYMENT__WEBHOOK_TOLERANCE_SECS`: accepted timestamp age

mod signature;
mod webhook_types;
mod webhook_verifier;

pub use signature::{hex_encode, signature_header, SignatureHeader, SignatureParseError};
pub use webhook_types::{
    Expandable, StripeCheckoutSession, StripeInvoice, StripeSubscription, StripeWebhookEvent,
};
pub use webhook_verifier::{StripeWebhookVerifier, DEFAULT_TOLERANCE_SECS};
