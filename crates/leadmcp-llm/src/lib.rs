//! Chat-completion client used as the classifier gateway.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint with a single
//! system + user message pair and returns the assistant's text.

pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::{OpenAiClient, OpenAiSettings};
pub use error::GatewayError;
