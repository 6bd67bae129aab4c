//! API request error taxonomy.

use thiserror::Error;

/// Errors that can occur while extracting parameters from a request.
///
/// All variants are request-local and non-fatal to the server; each is
/// reported to the client as a `"NG"` envelope carrying the error's
/// display text. Origin rejection and method mismatch never reach this
/// type; they are bare status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not declare `Content-Type: application/json`.
    #[error("content-type is not application/json")]
    UnsupportedContentType,

    /// `Content-Length` was missing or not an integer.
    #[error("content-length is not a valid integer")]
    MalformedLength,

    /// `Content-Length` was zero or negative.
    #[error("content-length is empty")]
    EmptyBody,

    /// The declared length exceeds the configured cap.
    #[error("declared content-length {declared} exceeds limit of {limit} bytes")]
    BodyTooLarge { declared: u64, limit: u64 },

    /// The body stream ended before delivering the declared byte count.
    #[error("request body ended after {read} of {declared} bytes")]
    ShortRead { read: u64, declared: u64 },

    /// The body stream failed mid-read.
    #[error("failed to read request body: {0}")]
    Read(#[from] axum::Error),

    /// The body was not valid JSON for the expected parameter shape.
    #[error("invalid parameters: {0}")]
    Decode(#[from] serde_json::Error),
}
