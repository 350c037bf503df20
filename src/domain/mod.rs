//! Domain layer - the vocabulary of the auth and billing boundary.
//!
//! No I/O happens here; ports and adapters do that.

pub mod auth;
pub mod billing;
pub mod foundation;
pub mod user;
