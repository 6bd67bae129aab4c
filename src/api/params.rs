//! Request parameters and the computation they feed.

use serde::Deserialize;

use crate::api::error::ApiError;

/// Parameters received from the client.
///
/// Unknown JSON fields are ignored; missing fields default to zero. No
/// range validation is performed on `x` or `y`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RequestParams {
    pub x: i64,
    pub y: i64,
}

impl RequestParams {
    /// Decode parameters from a raw JSON body.
    pub fn from_json(raw: &[u8]) -> Result<Self, ApiError> {
        Ok(serde_json::from_slice(raw)?)
    }
}

/// The computation performed once parameters are validated.
pub fn calc(params: RequestParams) -> i64 {
    params.x.wrapping_add(params.y)
}
