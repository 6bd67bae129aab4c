//! Preflight (OPTIONS) response construction.

use axum::body::Body;
use axum::http::HeaderValue;
use axum::response::Response;

/// Methods advertised to the browser.
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Request headers advertised to the browser.
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Seconds the browser may cache the negotiation result.
pub const MAX_AGE_SECS: &str = "86400";

/// Build the response for a preflight request.
///
/// The caller's `Origin` value is reflected verbatim; the remaining
/// negotiation headers are fixed. No body is written and the status
/// defaults to 200.
pub fn preflight_response(origin: &HeaderValue) -> Response {
    let mut response = Response::new(Body::empty());
    let headers = response.headers_mut();
    headers.insert("Access-Control-Allow-Origin", origin.clone());
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    // Nonstandard spelling ("Allow-Max-Age") kept for compatibility with
    // existing clients of this API.
    headers.insert(
        "Access-Control-Allow-Max-Age",
        HeaderValue::from_static(MAX_AGE_SECS),
    );
    response
}
