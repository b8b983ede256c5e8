//! Last-resort response generation.
//!
//! Invoked only after the primary dispatch has failed. Makes exactly one
//! generic model call with a fixed tutor persona; when that is impossible
//! or also fails, resolves to a static degraded message. All failure paths
//! here terminate in a value, never an unhandled fault.

use crate::llm::ModelClient;
use crate::types::{AgentId, DispatchFailure, DispatchOutcome, InboundMessage};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

/// Fixed system instruction for the fallback model call.
pub const TUTOR_SYSTEM_PROMPT: &str = "You are an expert Python programming tutor. \
Provide helpful, accurate, and educational responses to students learning Python. \
If the question is about Python programming, give detailed explanations with code examples. \
If the question is general, provide the best possible answer.";

/// The static apology returned when every path has failed.
pub const DEGRADED_MESSAGE: &str = "Sorry, I'm having trouble processing your request \
right now. Could you try rephrasing your question?";

/// Degraded-path responder wrapping the optional fallback model.
///
/// `None` means no credential was configured at startup; the responder
/// then short-circuits straight to exhaustion without attempting a call.
pub struct FallbackResponder {
    model: Option<Arc<dyn ModelClient>>,
}

impl FallbackResponder {
    pub fn new(model: Option<Arc<dyn ModelClient>>) -> Self {
        Self { model }
    }

    /// Makes the one generic model call for a failed dispatch.
    ///
    /// Success keeps the nominal agent and wraps the completion as
    /// `{"message": ..., "source": "fallback-model"}`. Any failure,
    /// including a missing credential, resolves to
    /// [`DispatchFailure::AllFallbacksExhausted`].
    pub async fn respond(&self, agent: AgentId, message: &InboundMessage) -> DispatchOutcome {
        let Some(model) = &self.model else {
            tracing::warn!(agent = %agent, "fallback model credential not configured");
            return DispatchOutcome::Failure {
                agent,
                kind: DispatchFailure::AllFallbacksExhausted(
                    "fallback model credential not configured".to_string(),
                ),
            };
        };

        let started = Instant::now();
        match model
            .generate_with_system(TUTOR_SYSTEM_PROMPT, &message.text)
            .await
        {
            Ok(text) => DispatchOutcome::Success {
                agent,
                raw_response: json!({
                    "message": text,
                    "source": "fallback-model",
                }),
                latency_ms: started.elapsed().as_millis() as u64,
            },
            Err(err) => {
                tracing::error!(agent = %agent, error = %err, "fallback model call failed");
                DispatchOutcome::Failure {
                    agent,
                    kind: DispatchFailure::AllFallbacksExhausted(err.to_string()),
                }
            }
        }
    }
}
