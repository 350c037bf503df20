//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the HTTP boundary and the outside world. Adapters implement these ports.
//!
//! - `IdentityProvider` - LinkedIn authorization URL and code exchange
//! - `SessionStore` - browser session lifecycle
//! - `WebhookVerifier` - signature-checked construction of billing events
//! - `BillingEventHandler` - business reaction to verified events
//! - `UserRepository` - account persistence

mod billing_event_handler;
mod identity_provider;
mod session_store;
mod user_repository;
mod webhook_verifier;

pub use billing_event_handler::BillingEventHandler;
pub use identity_provider::{AuthorizationRequest, IdentityProvider};
pub use session_store::SessionStore;
pub use user_repository::UserRepository;
pub use webhook_verifier::WebhookVerifier;
