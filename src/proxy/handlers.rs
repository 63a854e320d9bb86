//! HTTP request handlers.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;

use super::server::AppState;
use super::stream;
use super::types::{build_payload, ChatRequest, ChatResponse};
use crate::error::Error;

/// Handle GET / - liveness probe.
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Hello, SAE!"
    }))
}

/// Handle GET /health - reports the configured model.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "model": state.config.model
    }))
}

/// Handle POST /chat - forward a conversation upstream.
///
/// Buffered mode returns one JSON object; streaming mode re-emits the
/// upstream event stream as SSE frames.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, Error> {
    // Checked before any upstream call.
    if !state.config.is_configured() {
        return Err(Error::ApiKeyMissing);
    }

    tracing::info!(
        messages = request.messages.len(),
        stream = request.stream,
        "Received chat request"
    );

    let payload = build_payload(&state.config, &request);
    let upstream_url = format!(
        "{}/chat/completions",
        state.config.base_url.trim_end_matches('/')
    );

    let upstream_response = state
        .http_client
        .post(&upstream_url)
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", state.config.api_key.expose_secret()),
        )
        .json(&payload)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to reach upstream");
            Error::from(e)
        })?;

    if request.stream {
        streaming_response(upstream_response).await
    } else {
        buffered_response(upstream_response).await
    }
}

/// Handle a buffered upstream response.
///
/// Non-success statuses are relayed with the upstream body embedded in the
/// error message. On success, missing fields in the response JSON degrade to
/// an empty content string rather than raising.
async fn buffered_response(upstream_response: reqwest::Response) -> Result<Response, Error> {
    let status = upstream_response.status();
    if !status.is_success() {
        let body = upstream_response.text().await.unwrap_or_default();
        tracing::error!(%status, body = %body, "Upstream returned error");
        return Err(Error::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }

    let data: serde_json::Value = upstream_response.json().await?;
    let content = extract_content(&data);

    Ok(Json(ChatResponse {
        content: content.to_string(),
    })
    .into_response())
}

/// Handle a streaming upstream response.
///
/// A non-success status is delivered as a single in-band error frame: SSE
/// framing commits the transport to 200 before any data flows, so once this
/// path is chosen, errors can only travel in-band. On success the body is the
/// lazy relay stream, consumed once, terminated by the `[DONE]` frame.
async fn streaming_response(upstream_response: reqwest::Response) -> Result<Response, Error> {
    let status = upstream_response.status();
    if !status.is_success() {
        let body = upstream_response.text().await.unwrap_or_default();
        tracing::error!(%status, body = %body, "Upstream rejected streaming request");
        return Ok(sse_response(Body::from(stream::error_frame(&body))));
    }

    let frames = stream::frame_lines(upstream_response.bytes_stream())
        .map(|result| result.map(bytes::Bytes::from));

    Ok(sse_response(Body::from_stream(frames)))
}

/// Build a text/event-stream response around the given body.
fn sse_response(body: Body) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .unwrap()
}

/// Extract `choices[0].message.content` from an upstream completion.
///
/// Returns an empty string if any link in that path is absent or not text.
fn extract_content(response: &serde_json::Value) -> &str {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content_present() {
        let response = serde_json::json!({
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop"
            }]
        });
        assert_eq!(extract_content(&response), "Hello!");
    }

    #[test]
    fn test_extract_content_no_choices() {
        let response = serde_json::json!({"id": "chatcmpl-123"});
        assert_eq!(extract_content(&response), "");
    }

    #[test]
    fn test_extract_content_empty_choices() {
        let response = serde_json::json!({"id": "chatcmpl-123", "choices": []});
        assert_eq!(extract_content(&response), "");
    }

    #[test]
    fn test_extract_content_missing_message() {
        let response = serde_json::json!({
            "choices": [{"index": 0, "finish_reason": "stop"}]
        });
        assert_eq!(extract_content(&response), "");
    }

    #[test]
    fn test_extract_content_null_content() {
        let response = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        });
        assert_eq!(extract_content(&response), "");
    }

    #[test]
    fn test_extract_content_non_string_content() {
        let response = serde_json::json!({
            "choices": [{"message": {"content": 42}}]
        });
        assert_eq!(extract_content(&response), "");
    }
}
