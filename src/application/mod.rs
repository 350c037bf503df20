//! Application layer - command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    CompleteLoginCommand, CompleteLoginError, CompleteLoginHandler, CompleteLoginResult,
    SubscriptionSyncHandler, SyncOutcome,
};
