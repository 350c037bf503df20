//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid application URL: {0}")]
    InvalidAppUrl(String),

    #[error("Application URL must use HTTPS in production")]
    AppUrlMustBeHttps,

    #[error("Invalid OAuth redirect URI: {0}")]
    InvalidRedirectUri(String),

    #[error("Session TTL must be between 1 second and one year")]
    InvalidSessionTtl,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid Stripe webhook secret format")]
    InvalidStripeWebhookSecret,
}
