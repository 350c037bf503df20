//! Billing handlers.

mod sync_subscription;

pub use sync_subscription::{SubscriptionSyncHandler, SyncOutcome};
