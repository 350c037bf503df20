//! Billing webhook errors.

use thiserror::Error;

/// Errors raised while verifying or handling a billing webhook.
///
/// The HTTP boundary collapses every variant into one generic response;
/// the detail exists for server-side logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BillingError {
    /// Signature did not match the payload.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature timestamp is older than the tolerance window.
    #[error("Timestamp out of range ({age_secs} seconds old)")]
    TimestampOutOfRange { age_secs: i64 },

    /// Signature timestamp is in the future beyond clock skew.
    #[error("Timestamp in the future")]
    TimestampInFuture,

    /// Header or payload could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Test-mode event received where only live events are accepted.
    #[error("Test mode event rejected")]
    LivemodeRequired,

    /// A field the handler needs is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The event references a user we do not know.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Persisting the change failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BillingError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }

    /// True if the event's authenticity could not be established.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            BillingError::InvalidSignature
                | BillingError::TimestampOutOfRange { .. }
                | BillingError::TimestampInFuture
                | BillingError::ParseError(_)
                | BillingError::LivemodeRequired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_failures_are_classified() {
        assert!(BillingError::InvalidSignature.is_verification_failure());
        assert!(BillingError::TimestampOutOfRange { age_secs: 900 }.is_verification_failure());
        assert!(BillingError::parse("bad json").is_verification_failure());
        assert!(!BillingError::UserNotFound("u".into()).is_verification_failure());
        assert!(!BillingError::Storage("db down".into()).is_verification_failure());
    }

    #[test]
    fn timestamp_error_reports_age() {
        let err = BillingError::TimestampOutOfRange { age_secs: 600 };
        assert_eq!(err.to_string(), "Timestamp out of range (600 seconds old)");
    }
}
