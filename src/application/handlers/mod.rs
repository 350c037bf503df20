//! Application handlers.
//!
//! Command handlers that orchestrate domain operations through ports.

pub mod auth;
pub mod billing;

pub use auth::{CompleteLoginCommand, CompleteLoginError, CompleteLoginHandler, CompleteLoginResult};
pub use billing::{SubscriptionSyncHandler, SyncOutcome};
