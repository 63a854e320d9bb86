//! knowself - server-side LLM chat proxy for the Know Yourself front-end.
//!
//! Keeps the provider API key off the client, prepends the product's system
//! prompt to every conversation, and relays completions back either as one
//! JSON object or as a re-emitted SSE stream.

pub mod config;
pub mod error;
pub mod proxy;

pub use config::Config;
pub use error::{Error, Result};
