//! Cross-origin request handling.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → policy.rs (is the declared Origin acceptable?)
//!     → preflight.rs (OPTIONS: emit negotiation headers)
//!     → POST pipeline (Origin reflected on the API response)
//! ```
//!
//! # Design Decisions
//! - Policy is evaluated once per request, before method dispatch
//! - Accepted origins are reflected verbatim, never replaced with `*`
//! - Rejection is a bare 403 with no body

pub mod policy;
pub mod preflight;

pub use policy::OriginPolicy;
pub use preflight::preflight_response;
