//! Error types for the proxy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Result type alias for proxy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for request handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API key is empty; checked before any upstream call.
    #[error("API key not configured")]
    ApiKeyMissing,

    /// The upstream provider answered with a non-success status.
    /// The body is relayed verbatim, unparsed.
    #[error("LLM API error: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream request failed at the transport level before a
    /// response arrived.
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::ApiKeyMissing => StatusCode::INTERNAL_SERVER_ERROR,
            Error::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": status.as_u16()
            }
        });

        (status, axum::Json(body)).into_response()
    }
}
