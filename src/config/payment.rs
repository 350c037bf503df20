//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe webhooks)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe webhook signing secret
    pub stripe_webhook_secret: SecretString,

    /// Accepted webhook timestamp age in seconds
    #[serde(default = "default_tolerance")]
    pub webhook_tolerance_secs: i64,

    /// Reject test-mode events
    #[serde(default)]
    pub require_livemode: bool,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.stripe_webhook_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }
        if !secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_webhook_secret: SecretString::new(String::new()),
            webhook_tolerance_secs: default_tolerance(),
            require_livemode: false,
        }
    }
}

fn default_tolerance() -> i64 {
    300
}
