//! Timeout-bound dispatch to downstream tutoring services.
//!
//! One attempt per request, no retries: retry policy, if ever wanted,
//! belongs to a caller wrapping the dispatcher so the timeout budget stays
//! predictable.

use crate::agents::registry::{AgentRegistry, HttpMethod};
use crate::types::{AgentId, DispatchFailure, DispatchOutcome, InboundMessage};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared `user_context` object carried by every POST payload.
#[derive(Debug, Serialize)]
pub struct UserContext {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl UserContext {
    fn from_message(message: &InboundMessage) -> Self {
        Self {
            user_id: message.user_id.clone(),
            difficulty: message.difficulty.clone(),
        }
    }
}

/// Per-agent request body, serialized snake_case for wire compatibility
/// with the existing specialist services. Each variant carries exactly the
/// fields its service accepts; the shape is fixed per agent.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AgentPayload {
    Triage {
        query: String,
        user_id: String,
        context: Value,
    },
    Concepts {
        concept: String,
        difficulty_level: String,
        user_context: UserContext,
    },
    Debug {
        error_message: String,
        user_context: UserContext,
    },
    Exercise {
        topic: String,
        difficulty: String,
        user_context: UserContext,
    },
    /// Read-only query keyed by user id; no request body.
    Progress { user_id: String },
    CodeReview {
        code: String,
        feedback_type: String,
        user_context: UserContext,
    },
}

/// Builds the agent-specific payload for a message.
///
/// The triage payload carries the classifier's choice as advisory
/// `suggested_agent` context; triage's own response decides the final
/// delegate.
pub fn build_payload(agent: AgentId, message: &InboundMessage) -> AgentPayload {
    let difficulty = message
        .difficulty
        .clone()
        .unwrap_or_else(|| "beginner".to_string());

    match agent {
        AgentId::Triage => AgentPayload::Triage {
            query: message.text.clone(),
            user_id: message.user_id.clone(),
            context: json!({
                "history": message.history,
                "difficulty": message.difficulty,
                "suggested_agent": agent.as_str(),
            }),
        },
        AgentId::Concepts => AgentPayload::Concepts {
            concept: message.text.clone(),
            difficulty_level: difficulty,
            user_context: UserContext::from_message(message),
        },
        AgentId::Debug => AgentPayload::Debug {
            error_message: message.text.clone(),
            user_context: UserContext::from_message(message),
        },
        AgentId::Exercise => AgentPayload::Exercise {
            topic: message.text.clone(),
            difficulty,
            user_context: UserContext::from_message(message),
        },
        AgentId::Progress => AgentPayload::Progress {
            user_id: message.user_id.clone(),
        },
        AgentId::CodeReview => AgentPayload::CodeReview {
            code: message.text.clone(),
            feedback_type: "comprehensive".to_string(),
            user_context: UserContext::from_message(message),
        },
    }
}

/// Dispatches a message to the downstream service for an agent.
pub struct AgentDispatcher {
    registry: Arc<AgentRegistry>,
    http: reqwest::Client,
    timeout: Duration,
}

impl AgentDispatcher {
    pub fn new(registry: Arc<AgentRegistry>, http: reqwest::Client, timeout: Duration) -> Self {
        Self {
            registry,
            http,
            timeout,
        }
    }

    /// Performs the single timeout-bound call for `agent`.
    ///
    /// Every outcome is a value: a well-formed error response becomes
    /// `UpstreamError`, no network path becomes `UpstreamUnavailable`, an
    /// exceeded bound becomes `UpstreamTimeout`.
    pub async fn dispatch(&self, agent: AgentId, message: &InboundMessage) -> DispatchOutcome {
        let descriptor = self.registry.descriptor(agent);
        let started = Instant::now();

        let request = match (descriptor.method, build_payload(agent, message)) {
            (HttpMethod::Get, AgentPayload::Progress { user_id }) => self
                .http
                .get(format!("{}/{}", descriptor.address, user_id)),
            (_, payload) => self.http.post(&descriptor.address).json(&payload),
        };

        let response = request.timeout(self.timeout).send().await;

        match response {
            Err(err) if err.is_timeout() => DispatchOutcome::Failure {
                agent,
                kind: DispatchFailure::UpstreamTimeout(self.timeout.as_millis() as u64),
            },
            Err(err) => DispatchOutcome::Failure {
                agent,
                kind: DispatchFailure::UpstreamUnavailable(err.to_string()),
            },
            Ok(response) => {
                let status = response.status();
                let latency_ms = started.elapsed().as_millis() as u64;
                let body = response.text().await.unwrap_or_default();

                if !status.is_success() {
                    return DispatchOutcome::Failure {
                        agent,
                        kind: DispatchFailure::UpstreamError {
                            status: status.as_u16(),
                            body,
                        },
                    };
                }

                // Specialists speak JSON; tolerate a plain-text body.
                let raw_response = serde_json::from_str(&body)
                    .unwrap_or_else(|_| Value::String(body));

                DispatchOutcome::Success {
                    agent,
                    raw_response,
                    latency_ms,
                }
            }
        }
    }
}
