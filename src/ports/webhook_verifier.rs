//! Webhook verifier port.

use crate::domain::billing::{BillingError, BillingEvent};

/// Authenticates a raw webhook delivery and constructs the event.
///
/// # Contract
///
/// - `payload` is the exact request body; implementations must verify the
///   signature over these bytes before parsing anything out of them
/// - no event is returned unless verification succeeded
pub trait WebhookVerifier: Send + Sync {
    fn construct_event(&self, payload: &[u8], signature: &str)
        -> Result<BillingEvent, BillingError>;
}
