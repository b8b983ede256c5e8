//! Request coordination state machine.
//!
//! Sequences classification, dispatch, and fallback, then merges in the
//! struggle signal. Every phase and transition is a value of [`Phase`],
//! so the chain `Received -> Classified -> Dispatching ->
//! FallbackAttempting -> Completed` is enumerable and the terminal state
//! always carries a [`RoutedResult`]. The only error the coordinator
//! returns is the upfront validation failure; upstream and fallback
//! failures are absorbed into the `source` tag.

use crate::agents::classifier;
use crate::agents::dispatcher::AgentDispatcher;
use crate::agents::fallback::{FallbackResponder, DEGRADED_MESSAGE};
use crate::agents::struggle;
use crate::types::{
    AgentId, AppError, DispatchOutcome, InboundMessage, Result, ResponseSource, RoutedResult,
};
use chrono::Utc;
use serde_json::Value;
use std::time::Instant;

/// Processing phases of a single request.
#[derive(Debug)]
enum Phase {
    Classified {
        agent: AgentId,
    },
    Dispatching {
        agent: AgentId,
    },
    FallbackAttempting {
        agent: AgentId,
    },
    Completed {
        agent: AgentId,
        response: Value,
        source: ResponseSource,
    },
}

/// Top-level entry point for one inbound message.
///
/// Created fresh per request; holds no state across requests.
pub struct RequestCoordinator {
    dispatcher: AgentDispatcher,
    fallback: FallbackResponder,
}

impl RequestCoordinator {
    pub fn new(dispatcher: AgentDispatcher, fallback: FallbackResponder) -> Self {
        Self {
            dispatcher,
            fallback,
        }
    }

    /// Runs the full pipeline for one message.
    ///
    /// Returns `Err` only for an empty or whitespace-only message; every
    /// other path terminates in a [`RoutedResult`].
    pub async fn handle(&self, message: InboundMessage) -> Result<RoutedResult> {
        // Received: fail fast on an absent message.
        if message.text.trim().is_empty() {
            return Err(AppError::InvalidInput("message is required".to_string()));
        }

        let started = Instant::now();
        let mut phase = Phase::Classified {
            agent: classifier::classify(&message.text),
        };

        let (agent, response, source) = loop {
            phase = match phase {
                Phase::Classified { agent } => {
                    tracing::info!(agent = %agent, user = %message.user_id, "message classified");
                    Phase::Dispatching { agent }
                }

                Phase::Dispatching { agent } => {
                    match self.dispatcher.dispatch(agent, &message).await {
                        DispatchOutcome::Success {
                            agent,
                            raw_response,
                            latency_ms,
                        } => {
                            tracing::info!(agent = %agent, latency_ms, "primary dispatch succeeded");
                            Phase::Completed {
                                agent: resolve_delegate(agent, &raw_response),
                                response: raw_response,
                                source: ResponseSource::Primary,
                            }
                        }
                        DispatchOutcome::Failure { agent, kind } => {
                            tracing::warn!(agent = %agent, error = %kind, "primary dispatch failed");
                            Phase::FallbackAttempting { agent }
                        }
                    }
                }

                Phase::FallbackAttempting { agent } => {
                    match self.fallback.respond(agent, &message).await {
                        DispatchOutcome::Success {
                            agent,
                            raw_response,
                            ..
                        } => Phase::Completed {
                            agent,
                            response: raw_response,
                            source: ResponseSource::Fallback,
                        },
                        DispatchOutcome::Failure { agent, kind } => {
                            tracing::warn!(agent = %agent, error = %kind, "degrading to static response");
                            Phase::Completed {
                                agent,
                                response: Value::String(DEGRADED_MESSAGE.to_string()),
                                source: ResponseSource::Degraded,
                            }
                        }
                    }
                }

                Phase::Completed {
                    agent,
                    response,
                    source,
                } => break (agent, response, source),
            };
        };

        let response_time = started.elapsed().as_millis() as u64;
        let struggle_detection =
            struggle::detect(&message.text, &message.history, response_time);

        Ok(RoutedResult {
            agent,
            response,
            response_time,
            struggle_detection,
            source,
            timestamp: Utc::now(),
        })
    }
}

/// Applies the triage delegate override.
///
/// Triage may hand the request to a specialist and report it in the
/// response body; that delegated identifier is authoritative for the final
/// result. Absent or unrecognized values keep the nominal agent.
fn resolve_delegate(agent: AgentId, raw_response: &Value) -> AgentId {
    if agent != AgentId::Triage {
        return agent;
    }

    raw_response
        .get("agent")
        .and_then(Value::as_str)
        .and_then(AgentId::parse)
        .unwrap_or(agent)
}
