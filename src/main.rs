//! CORS-enabled JSON Web API server.
//!
//! A small HTTP server built with Tokio and Axum that exposes one JSON
//! endpoint behind a CORS policy and serves static content for every
//! other path.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────┐
//!                    │                 API SERVER                  │
//!                    │                                             │
//!   Client Request   │  ┌────────┐   ┌────────────┐   ┌─────────┐ │
//!   ─────────────────┼─▶│  http  │──▶│    cors    │──▶│   api   │ │
//!                    │  │ server │   │   policy   │   │ pipeline│ │
//!                    │  └────────┘   └────────────┘   └────┬────┘ │
//!                    │                                      │      │
//!   Client Response  │  ┌──────────────────────────────────▼────┐ │
//!   ◀────────────────┼──│        JSON envelope (OK / NG)        │ │
//!                    │  └───────────────────────────────────────┘ │
//!                    │                                             │
//!                    │  ┌───────────────────────────────────────┐ │
//!                    │  │        Cross-Cutting Concerns          │ │
//!                    │  │  ┌────────┐ ┌─────────┐ ┌───────────┐ │ │
//!                    │  │  │ config │ │ tracing │ │  static   │ │ │
//!                    │  │  │        │ │         │ │  content  │ │ │
//!                    │  │  └────────┘ └─────────┘ └───────────┘ │ │
//!                    │  └───────────────────────────────────────┘ │
//!                    └────────────────────────────────────────────┘
//! ```
//!
//! Web API input: `{"x": integer, "y": integer}`
//! Web API output: `{"status": "OK"|"NG", "value": integer, "message": string}`

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cors_api::config::{self, ServerConfig};
use cors_api::http::HttpServer;

#[derive(Parser)]
#[command(name = "cors-api")]
#[command(about = "CORS-enabled JSON Web API server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServerConfig::default(),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!(
                "cors_api={},tower_http=info",
                config.observability.log_level
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("cors-api v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_path = %config.api.path,
        static_files = config.static_files.enabled,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
