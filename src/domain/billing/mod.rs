//! Billing domain: verified webhook events and their errors.

mod errors;
mod event;

pub use errors::BillingError;
pub use event::{BillingEvent, BillingEventData, BillingEventType};
