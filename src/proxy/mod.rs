//! HTTP proxy server module.
//!
//! This module provides the HTTP API the front-end talks to: a liveness
//! probe, a health endpoint, and the chat relay that forwards conversations
//! to the upstream provider.

mod handlers;
mod server;
pub mod stream;
pub mod types;

pub use server::{create_router, run_server, AppState};
pub use types::{ChatMessage, ChatRequest, ChatResponse, CompletionPayload, Role};
