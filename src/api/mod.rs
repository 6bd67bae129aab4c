//! JSON API subsystem.
//!
//! # Data Flow
//! ```text
//! POST request
//!     → content-type precondition (application/json, exact)
//!     → body.rs (acquire exactly Content-Length bytes)
//!     → params.rs (decode JSON into RequestParams, compute)
//!     → envelope.rs (OK / NG reply shape)
//! ```
//!
//! # Design Decisions
//! - Content-Type is checked before any body byte is read
//! - Every pipeline failure maps to a "NG" envelope on a 200
//! - The envelope is serialized exactly once, at the end of the request

pub mod body;
pub mod envelope;
pub mod error;
pub mod params;

pub use envelope::ResponseEnvelope;
pub use error::ApiError;
pub use params::RequestParams;
