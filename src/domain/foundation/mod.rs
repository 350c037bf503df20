//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps and the common error type.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::UserId;
pub use timestamp::Timestamp;
