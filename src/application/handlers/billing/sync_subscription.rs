//! SubscriptionSyncHandler - applies verified billing events to user accounts.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::billing::{BillingError, BillingEvent, BillingEventData, BillingEventType};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{SubscriptionStatus, User};
use crate::ports::{BillingEventHandler, UserRepository};

/// What a sync did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Updated {
        user_id: UserId,
        status: SubscriptionStatus,
    },
    /// Event acknowledged without touching any account.
    Ignored,
}

/// Keeps each user's subscription state in line with Stripe.
///
/// | Event                           | Effect                                  |
/// |---------------------------------|-----------------------------------------|
/// | `checkout.session.completed`    | link customer + subscription, `Active`  |
/// | `customer.subscription.created` | apply reported status and period end    |
/// | `customer.subscription.updated` | apply reported status and period end    |
/// | `customer.subscription.deleted` | `Canceled`                              |
/// | `invoice.paid`                  | `Active`                                |
/// | `invoice.payment_failed`        | `PastDue`                               |
/// | anything else                   | ignored                                 |
pub struct SubscriptionSyncHandler {
    users: Arc<dyn UserRepository>,
}

impl SubscriptionSyncHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn sync(&self, event: &BillingEvent) -> Result<SyncOutcome, BillingError> {
        match (&event.event_type, &event.data) {
            (
                BillingEventType::CheckoutSessionCompleted,
                BillingEventData::Checkout {
                    customer_id,
                    subscription_id,
                    user_id,
                    ..
                },
            ) => {
                let mut user = self
                    .checkout_user(user_id.as_deref(), customer_id.as_deref())
                    .await?;
                user.attach_checkout(customer_id.clone(), subscription_id.clone());
                self.store(user).await
            }

            (
                BillingEventType::SubscriptionCreated | BillingEventType::SubscriptionUpdated,
                BillingEventData::Subscription {
                    subscription_id,
                    customer_id,
                    status,
                    current_period_end,
                },
            ) => {
                let mut user = self.customer_user(customer_id).await?;
                user.apply_subscription(
                    subscription_id,
                    *status,
                    current_period_end.map(Timestamp::from_unix_secs),
                );
                self.store(user).await
            }

            (
                BillingEventType::SubscriptionDeleted,
                BillingEventData::Subscription {
                    subscription_id,
                    customer_id,
                    current_period_end,
                    ..
                },
            ) => {
                let mut user = self.customer_user(customer_id).await?;
                user.apply_subscription(
                    subscription_id,
                    SubscriptionStatus::Canceled,
                    current_period_end.map(Timestamp::from_unix_secs),
                );
                self.store(user).await
            }

            (
                BillingEventType::InvoicePaid | BillingEventType::InvoicePaymentFailed,
                BillingEventData::Invoice { customer_id, .. },
            ) => {
                let customer_id = customer_id
                    .as_deref()
                    .ok_or(BillingError::MissingField("customer"))?;
                let mut user = self.customer_user(customer_id).await?;
                let status = if event.event_type == BillingEventType::InvoicePaid {
                    SubscriptionStatus::Active
                } else {
                    SubscriptionStatus::PastDue
                };
                user.set_subscription_status(status);
                self.store(user).await
            }

            (BillingEventType::TrialWillEnd, _) | (BillingEventType::Unknown(_), _) => {
                tracing::debug!(event_id = %event.id, event_type = ?event.event_type, "Billing event ignored");
                Ok(SyncOutcome::Ignored)
            }

            (event_type, _) => {
                tracing::warn!(event_id = %event.id, ?event_type, "Billing event payload does not match its type");
                Err(BillingError::parse(format!(
                    "unexpected payload for {:?}",
                    event_type
                )))
            }
        }
    }

    /// Checkout names our user directly; fall back to a known customer.
    async fn checkout_user(
        &self,
        user_id: Option<&str>,
        customer_id: Option<&str>,
    ) -> Result<User, BillingError> {
        if let Some(raw) = user_id {
            let id: UserId = raw
                .parse()
                .map_err(|_| BillingError::UserNotFound(raw.to_string()))?;
            return self
                .users
                .find_by_id(&id)
                .await
                .map_err(storage)?
                .ok_or_else(|| BillingError::UserNotFound(raw.to_string()));
        }

        match customer_id {
            Some(customer_id) => self.customer_user(customer_id).await,
            None => Err(BillingError::MissingField("metadata.user_id")),
        }
    }

    async fn customer_user(&self, customer_id: &str) -> Result<User, BillingError> {
        self.users
            .find_by_stripe_customer_id(customer_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| BillingError::UserNotFound(format!("customer {}", customer_id)))
    }

    async fn store(&self, user: User) -> Result<SyncOutcome, BillingError> {
        self.users.update(&user).await.map_err(storage)?;
        Ok(SyncOutcome::Updated {
            user_id: user.id,
            status: user.subscription_status,
        })
    }
}

fn storage(e: DomainError) -> BillingError {
    BillingError::Storage(e.to_string())
}

#[async_trait]
impl BillingEventHandler for SubscriptionSyncHandler {
    async fn handle(&self, event: BillingEvent) -> Result<(), BillingError> {
        match self.sync(&event).await {
            Ok(SyncOutcome::Updated { user_id, status }) => {
                tracing::info!(
                    event_id = %event.id,
                    user_id = %user_id,
                    status = %status,
                    "Subscription synced"
                );
                Ok(())
            }
            Ok(SyncOutcome::Ignored) => Ok(()),
            Err(e) => {
                tracing::error!(event_id = %event.id, error = %e, "Subscription sync failed");
                Err(e)
            }
        }
    }
}
