//! Response envelope shared by every API reply.

use serde::Serialize;

/// Outcome marker for an API reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NG")]
    Ng,
}

/// The reply shape sent for every POST, success or failure.
///
/// Exactly one of `value` / `message` is meaningful: `value` when the
/// status is `OK`, `message` when it is `NG`. The struct is built fresh
/// per request and serialized once at the end of the request lifecycle.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub status: Status,
    pub value: i64,
    pub message: String,
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self {
            status: Status::Ng,
            value: 0,
            message: String::new(),
        }
    }
}

impl ResponseEnvelope {
    /// Successful reply carrying a computed value.
    pub fn ok(value: i64) -> Self {
        Self {
            status: Status::Ok,
            value,
            ..Self::default()
        }
    }

    /// Failed reply carrying a diagnostic message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}
