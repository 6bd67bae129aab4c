//! CORS-enabled JSON Web API server library.

pub mod api;
pub mod config;
pub mod cors;
pub mod http;

pub use config::ServerConfig;
pub use cors::OriginPolicy;
pub use http::HttpServer;
