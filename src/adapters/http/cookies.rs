//! Cookies written by the auth endpoints.
//!
//! Every cookie is `Path=/; HttpOnly; SameSite=Lax`, with `Secure` added in
//! production.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// A cookie the browser keeps for `max_age_secs`.
pub fn http_only_cookie(
    name: &'static str,
    value: impl Into<String>,
    max_age_secs: u64,
    secure: bool,
) -> Cookie<'static> {
    let max_age = i64::try_from(max_age_secs).unwrap_or(i64::MAX);
    Cookie::build((name, value.into()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// A cookie that tells the browser to drop `name` now.
pub fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    http_only_cookie(name, String::new(), 0, secure)
}
