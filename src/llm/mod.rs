//! Fallback model client.
//!
//! The gateway makes at most one generic model call per request, and only
//! when the primary specialist dispatch has already failed. The default
//! implementation targets any OpenAI-compatible chat-completions endpoint.

/// Model client trait.
pub mod client;
/// OpenAI-compatible chat-completions client.
pub mod openai;

pub use client::ModelClient;
pub use openai::OpenAICompatClient;
