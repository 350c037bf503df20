//! HTTP adapter for the LinkedIn login endpoints.
//!
//! - `GET /api/auth/linkedin-initiate` - Start the LinkedIn login
//! - `GET /api/auth/linkedin-callback` - Finish the login, open a session
//! - `POST /api/auth/logout` - Clear the session, acknowledge
//! - `GET /api/auth/logout` - Clear the session, redirect home

mod error;
mod handlers;
mod routes;

pub use error::AuthApiError;
pub use handlers::{linkedin_callback, linkedin_initiate, logout_get, logout_post, CallbackParams};
pub use routes::auth_routes;
