//! Billing event handler port.

use async_trait::async_trait;

use crate::domain::billing::{BillingError, BillingEvent};

/// Business reaction to a verified billing event.
///
/// Deliveries may repeat or arrive out of order; implementations decide
/// their own idempotency.
#[async_trait]
pub trait BillingEventHandler: Send + Sync {
    async fn handle(&self, event: BillingEvent) -> Result<(), BillingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_event_handler_is_object_safe() {
        fn _accepts_dyn(_handler: &dyn BillingEventHandler) {}
    }
}
