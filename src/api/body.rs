//! Strict declared-length body acquisition.
//!
//! # Responsibilities
//! - Parse and sanity-check the declared `Content-Length`
//! - Collect exactly that many bytes from the body stream
//! - Distinguish malformed, empty, oversized, short and failed reads
//!
//! # Design Decisions
//! - The declared length is parsed here rather than taken from the HTTP
//!   layer, so zero, negative and non-numeric declarations each produce
//!   a distinct diagnostic
//! - Frames are accumulated in a loop; one frame delivering fewer bytes
//!   than the declared count does not mean the stream is exhausted
//! - The length cap is enforced before the buffer is allocated

use axum::body::Body;
use axum::http::{header, HeaderMap};
use futures_util::StreamExt;

use crate::api::error::ApiError;

/// Parse the declared `Content-Length`.
///
/// Absent or non-numeric values are [`ApiError::MalformedLength`]; zero
/// and negative values are [`ApiError::EmptyBody`].
fn declared_length(headers: &HeaderMap) -> Result<u64, ApiError> {
    let raw = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::MalformedLength)?;

    let length: i64 = raw.parse().map_err(|_| ApiError::MalformedLength)?;

    if length <= 0 {
        return Err(ApiError::EmptyBody);
    }

    Ok(length as u64)
}

/// Collect exactly the declared number of bytes from the request body.
///
/// The stream is drained frame by frame until the declared count has
/// been collected; a stream that terminates exactly at the declared
/// count is the success path. Termination before the count is a
/// [`ApiError::ShortRead`], a stream failure is [`ApiError::Read`], and
/// bytes beyond the declared count are never read.
pub async fn read_declared_body(
    headers: &HeaderMap,
    body: Body,
    max_bytes: usize,
) -> Result<Vec<u8>, ApiError> {
    let declared = declared_length(headers)?;

    if declared > max_bytes as u64 {
        return Err(ApiError::BodyTooLarge {
            declared,
            limit: max_bytes as u64,
        });
    }

    let declared = declared as usize;
    let mut collected = Vec::with_capacity(declared);
    let mut stream = body.into_data_stream();

    while collected.len() < declared {
        match stream.next().await {
            Some(Ok(chunk)) => {
                let remaining = declared - collected.len();
                collected.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
            }
            Some(Err(e)) => return Err(ApiError::Read(e)),
            None => {
                return Err(ApiError::ShortRead {
                    read: collected.len() as u64,
                    declared: declared as u64,
                })
            }
        }
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::HeaderValue;
    use futures_util::stream;

    const MAX: usize = 1024;

    fn headers_with_length(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn chunked_body(chunks: &[&'static [u8]]) -> Body {
        let frames: Vec<Result<Bytes, std::io::Error>> = chunks
            .iter()
            .map(|c| Ok(Bytes::from_static(*c)))
            .collect();
        Body::from_stream(stream::iter(frames))
    }

    #[tokio::test]
    async fn collects_across_multiple_frames() {
        let headers = headers_with_length("10");
        let body = chunked_body(&[b"abcd", b"efgh", b"ij"]);

        let collected = read_declared_body(&headers, body, MAX).await.unwrap();
        assert_eq!(collected, b"abcdefghij");
    }

    #[tokio::test]
    async fn single_exact_frame_succeeds() {
        let headers = headers_with_length("4");
        let body = chunked_body(&[b"data"]);

        let collected = read_declared_body(&headers, body, MAX).await.unwrap();
        assert_eq!(collected, b"data");
    }

    #[tokio::test]
    async fn short_stream_reports_counts() {
        let headers = headers_with_length("10");
        let body = chunked_body(&[b"abc"]);

        let err = read_declared_body(&headers, body, MAX).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::ShortRead {
                read: 3,
                declared: 10
            }
        ));
    }

    #[tokio::test]
    async fn missing_length_is_malformed() {
        let headers = HeaderMap::new();
        let body = chunked_body(&[b"abc"]);

        let err = read_declared_body(&headers, body, MAX).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedLength));
    }

    #[tokio::test]
    async fn non_numeric_length_is_malformed() {
        let headers = headers_with_length("ten");
        let body = chunked_body(&[b"abc"]);

        let err = read_declared_body(&headers, body, MAX).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedLength));
    }

    #[tokio::test]
    async fn zero_and_negative_lengths_are_empty() {
        for declared in ["0", "-5"] {
            let headers = headers_with_length(declared);
            let body = chunked_body(&[b"abc"]);

            let err = read_declared_body(&headers, body, MAX).await.unwrap_err();
            assert!(matches!(err, ApiError::EmptyBody), "length {declared}");
        }
    }

    #[tokio::test]
    async fn oversized_declaration_is_rejected_before_reading() {
        let headers = headers_with_length("2048");
        let body = chunked_body(&[b"abc"]);

        let err = read_declared_body(&headers, body, MAX).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::BodyTooLarge {
                declared: 2048,
                limit: 1024
            }
        ));
    }

    #[tokio::test]
    async fn stream_error_propagates() {
        let headers = headers_with_length("10");
        let frames: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"abc")),
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom")),
        ];
        let body = Body::from_stream(stream::iter(frames));

        let err = read_declared_body(&headers, body, MAX).await.unwrap_err();
        assert!(matches!(err, ApiError::Read(_)));
    }

    #[tokio::test]
    async fn bytes_beyond_declared_are_dropped() {
        let headers = headers_with_length("4");
        let body = chunked_body(&[b"abcdefgh"]);

        let collected = read_declared_body(&headers, body, MAX).await.unwrap();
        assert_eq!(collected, b"abcd");
    }
}
