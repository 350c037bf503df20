//! LinkedIn OAuth adapter.
//!
//! Implements the `IdentityProvider` port against LinkedIn's OpenID Connect
//! endpoints: authorization URL construction, authorization-code exchange and
//! the userinfo lookup.

mod provider;

pub use provider::LinkedInIdentityProvider;
