//! SSE relay stream.
//!
//! Re-emits upstream event-stream lines as downstream SSE frames. Upstream
//! chunks arrive on arbitrary byte boundaries, so [`LineBuffer`] reassembles
//! complete lines before framing. The relay is a straight-through pipe: it
//! reads one chunk, writes its frames, and suspends on both sides, so
//! backpressure and cancellation propagate for free.

use async_stream::try_stream;
use bytes::Bytes;
use futures::{Stream, StreamExt};

/// Terminal frame appended after the upstream stream is exhausted.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Internal state for line buffering across chunk boundaries.
///
/// Buffers raw bytes until a newline arrives, then drains complete lines.
/// Handles CRLF and a trailing unterminated line.
pub(crate) struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Append a chunk and drain every complete line it finishes.
    ///
    /// Returned lines carry no terminator. Splitting only at `\n` keeps
    /// multi-byte UTF-8 sequences intact even when a chunk boundary falls
    /// inside one.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Flush the remaining unterminated line, if any.
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.buffer).into_owned())
        }
    }
}

/// Wrap an upstream byte stream into downstream SSE frames.
///
/// Every line whose trimmed form is non-empty is re-emitted verbatim as
/// `<line>\n\n`; the line's own `data:` prefix (or lack of one) passes
/// through untouched. After normal exhaustion one [`DONE_FRAME`] is
/// appended. A chunk error ends the stream with that error and no
/// [`DONE_FRAME`], which the caller surfaces as a truncated body.
pub fn frame_lines<S, E>(upstream: S) -> impl Stream<Item = Result<String, E>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Send + 'static,
{
    try_stream! {
        let mut lines = LineBuffer::new();

        futures::pin_mut!(upstream);
        while let Some(chunk) = upstream.next().await {
            let chunk = chunk?;
            for line in lines.push(&chunk) {
                if !line.trim().is_empty() {
                    yield format!("{line}\n\n");
                }
            }
        }

        if let Some(line) = lines.finish() {
            if !line.trim().is_empty() {
                yield format!("{line}\n\n");
            }
        }

        yield DONE_FRAME.to_string();
    }
}

/// Build the single in-band error frame used when the upstream rejects a
/// streaming request before any data flows. The body is JSON-encoded so the
/// frame is always parseable, whatever the upstream returned.
pub fn error_frame(body: &str) -> String {
    format!("data: {}\n\n", serde_json::json!({ "error": body }))
}
