//! `302 Found` responses.
//!
//! `axum::response::Redirect::to` answers 303, browsers following the OAuth
//! dance expect 302.

use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// 302 to `location`. A location that is not a valid header value becomes a
/// bare 500.
pub fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(LOCATION, value)]).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_sets_location() {
        let response = found("https://app.postcadence.io/dashboard");

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "https://app.postcadence.io/dashboard"
        );
    }

    #[test]
    fn invalid_location_is_internal_error() {
        let response = found("https://bad\nheader");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
