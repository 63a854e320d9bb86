//! HTTP server setup and configuration.

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::config::Config;

/// Upper bound on one upstream call, buffered or streaming. There is no
/// per-chunk timeout; a slow-trickling upstream within this bound is not
/// cut off.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(120);

/// Browser origins allowed to call the proxy cross-origin.
const ALLOWED_ORIGINS: [&str; 5] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:5175",
    "http://localhost:5176",
    "https://yippee701.github.io",
];

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: Client,
}

/// Cross-origin policy: fixed origin allow-list, credentials allowed.
///
/// Methods and headers mirror the request (a wildcard cannot be combined
/// with credentials).
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            ALLOWED_ORIGINS.iter().copied().map(HeaderValue::from_static),
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the axum router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server.
pub async fn run_server(config: Config, port: u16) -> anyhow::Result<()> {
    let http_client = Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let state = AppState {
        config: Arc::new(config),
        http_client,
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "Starting LLM proxy server");

    axum::serve(listener, app).await?;

    Ok(())
}
