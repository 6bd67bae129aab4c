//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layering)
//!     → dispatcher (origin check, method branch)
//!     → cors / api subsystems
//!     → JSON envelope or bare status back to the client
//! ```

pub mod server;

pub use server::HttpServer;
