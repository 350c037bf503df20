//! PostCadence - LinkedIn sign-in and Stripe billing backend.
//!
//! Users sign in with LinkedIn (OAuth 2.0 + OpenID Connect); subscription
//! state is kept in sync from verified Stripe webhooks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
