//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum routes, handlers and middleware stack
//! - `linkedin` - OAuth 2.0 / OpenID Connect identity provider
//! - `stripe` - webhook signature verification and event parsing
//! - `postgres` - user persistence
//! - `session` - Redis and in-memory session stores
//! - `memory` - in-memory user repository for tests and local runs

pub mod http;
pub mod linkedin;
pub mod memory;
pub mod postgres;
pub mod session;
pub mod stripe;

pub use linkedin::LinkedInIdentityProvider;
pub use memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;
pub use session::{InMemorySessionStore, RedisSessionStore};
pub use stripe::StripeWebhookVerifier;
