//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum Router with the API route and static-file fallback
//! - Wire up middleware (tracing, timeout, default response headers)
//! - Dispatch by method: preflight, POST pipeline, or bare status
//! - Graceful shutdown on Ctrl+C

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::body::read_declared_body;
use crate::api::envelope::ResponseEnvelope;
use crate::api::error::ApiError;
use crate::api::params::{calc, RequestParams};
use crate::config::ServerConfig;
use crate::cors::policy::OriginPolicy;
use crate::cors::preflight::preflight_response;

/// Value stamped into the `Server` response header.
const SERVER_HEADER: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub policy: OriginPolicy,
    pub max_body_bytes: usize,
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState {
            policy: OriginPolicy::from_config(&config.cors),
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route(&config.api.path, any(api_handler))
            .with_state(state);

        if config.static_files.enabled {
            router = router.fallback_service(ServeDir::new(&config.static_files.root));
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::SERVER,
                HeaderValue::from_static(SERVER_HEADER),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_XSS_PROTECTION,
                HeaderValue::from_static("1; mode=block"),
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Dispatch a request to the API endpoint.
///
/// The origin policy is evaluated exactly once, before anything else;
/// rejection is a bare 403 with no body. OPTIONS receives the preflight
/// negotiation headers, POST reflects the origin and runs the parameter
/// pipeline, and every other method is a bare 405.
async fn api_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    dump_request(&request);

    let (parts, body) = request.into_parts();

    let origin = match parts.headers.get(header::ORIGIN) {
        Some(value) if state.policy.allows(Some(value)) => value.clone(),
        _ => return StatusCode::FORBIDDEN.into_response(),
    };

    match parts.method {
        Method::OPTIONS => preflight_response(&origin),
        Method::POST => {
            let envelope = match run_pipeline(&state, &parts.headers, body).await {
                Ok(value) => ResponseEnvelope::ok(value),
                Err(e) => {
                    tracing::debug!(error = %e, "Parameter pipeline failed");
                    ResponseEnvelope::failure(e.to_string())
                }
            };

            (
                [(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin)],
                Json(envelope),
            )
                .into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

/// Run the POST pipeline: content-type precondition, strict body read,
/// JSON decode, computation.
async fn run_pipeline(
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
) -> Result<i64, ApiError> {
    // Checked before any body byte is read.
    let content_type = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok());
    if content_type != Some("application/json") {
        return Err(ApiError::UnsupportedContentType);
    }

    let raw = read_declared_body(headers, body, state.max_body_bytes).await?;
    let params = RequestParams::from_json(&raw)?;
    Ok(calc(params))
}

/// Log a diagnostic dump of the inbound request.
fn dump_request(request: &Request<Body>) {
    tracing::debug!(
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        "Inbound API request"
    );
    for (name, value) in request.headers() {
        tracing::trace!(header = %name, value = ?value, "Request header");
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState {
            policy: OriginPolicy::Permissive,
            max_body_bytes: 1024,
        }
    }

    fn json_headers(body: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_LENGTH,
            HeaderValue::from_str(&body.len().to_string()).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn pipeline_computes_the_sum() {
        let body = r#"{"x": 2, "y": 3}"#;
        let result = run_pipeline(&test_state(), &json_headers(body), Body::from(body)).await;
        assert_eq!(result.unwrap(), 5);
    }

    #[tokio::test]
    async fn pipeline_rejects_wrong_content_type() {
        let body = r#"{"x": 2, "y": 3}"#;
        let mut headers = json_headers(body);
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let err = run_pipeline(&test_state(), &headers, Body::from(body))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedContentType));
    }

    #[tokio::test]
    async fn pipeline_rejects_charset_suffix() {
        // The precondition is an exact match, not a media-type parse.
        let body = r#"{"x": 1, "y": 1}"#;
        let mut headers = json_headers(body);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );

        let err = run_pipeline(&test_state(), &headers, Body::from(body))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedContentType));
    }

    #[tokio::test]
    async fn pipeline_distinguishes_zero_length_from_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));
        let err = run_pipeline(&test_state(), &headers, Body::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::EmptyBody));

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("abc"));
        let err = run_pipeline(&test_state(), &headers, Body::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedLength));
    }

    #[tokio::test]
    async fn pipeline_reports_short_bodies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("100"));

        let err = run_pipeline(&test_state(), &headers, Body::from(r#"{"x":1}"#))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::ShortRead {
                read: 7,
                declared: 100
            }
        ));
    }

    #[tokio::test]
    async fn pipeline_reports_decode_failures() {
        let body = "not json at all";
        let err = run_pipeline(&test_state(), &json_headers(body), Body::from(body))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
