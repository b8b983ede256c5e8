use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// Inbound request body for `POST /api/tutor`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TutorRequest {
    /// The learner's message. Must be non-empty; an absent field is
    /// treated as empty so validation owns the error shape.
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub context: TutorContext,
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

/// Optional conversational context sent by the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TutorContext {
    /// Recent messages, most-recent-last.
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// A validated inbound message, the unit the routing core operates on.
///
/// History is re-bounded to the last [`HISTORY_WINDOW`] entries regardless
/// of what the client sent.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub text: String,
    pub user_id: String,
    pub history: Vec<String>,
    pub difficulty: Option<String>,
}

/// Number of prior messages the gateway keeps for struggle scoring.
pub const HISTORY_WINDOW: usize = 5;

impl From<TutorRequest> for InboundMessage {
    fn from(request: TutorRequest) -> Self {
        let mut history = request.context.history;
        if history.len() > HISTORY_WINDOW {
            history.drain(..history.len() - HISTORY_WINDOW);
        }
        Self {
            text: request.message,
            user_id: request.user_id,
            history,
            difficulty: request.context.difficulty,
        }
    }
}

// ============= Agent Types =============

/// The closed set of tutoring agents a message can be routed to.
///
/// Adding an agent requires a registry entry and a classifier rule; the
/// compiler enforces both through exhaustive matches.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AgentId {
    Triage,
    Concepts,
    Debug,
    Exercise,
    Progress,
    CodeReview,
}

impl AgentId {
    /// All agents, in classifier priority order (triage last as the default).
    pub const ALL: [AgentId; 6] = [
        AgentId::Concepts,
        AgentId::Debug,
        AgentId::Exercise,
        AgentId::Progress,
        AgentId::CodeReview,
        AgentId::Triage,
    ];

    /// Wire identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::Triage => "triage",
            AgentId::Concepts => "concepts",
            AgentId::Debug => "debug",
            AgentId::Exercise => "exercise",
            AgentId::Progress => "progress",
            AgentId::CodeReview => "code-review",
        }
    }

    /// Parse a wire identifier. Used for the triage delegate override,
    /// where the value comes from an upstream response body.
    pub fn parse(value: &str) -> Option<AgentId> {
        match value.trim().to_lowercase().as_str() {
            "triage" => Some(AgentId::Triage),
            "concepts" => Some(AgentId::Concepts),
            "debug" => Some(AgentId::Debug),
            "exercise" => Some(AgentId::Exercise),
            "progress" => Some(AgentId::Progress),
            "code-review" => Some(AgentId::CodeReview),
            _ => None,
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============= Struggle Detection Types =============

/// Heuristic estimate of learner difficulty, recomputed per request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StruggleSignal {
    /// Score in [0, 1].
    pub score: f64,
    /// Distinct indicator phrases found in the message.
    pub matched_indicators: Vec<String>,
    /// True when score > 0.5.
    pub is_struggling: bool,
    /// True when score > 0.7.
    pub requires_intervention: bool,
}

// ============= Dispatch Types =============

/// Result of a single dispatch or fallback attempt.
#[derive(Debug)]
pub enum DispatchOutcome {
    Success {
        agent: AgentId,
        raw_response: serde_json::Value,
        latency_ms: u64,
    },
    Failure {
        agent: AgentId,
        kind: DispatchFailure,
    },
}

/// Why a dispatch or fallback attempt failed.
///
/// All four kinds are recovered inside the coordinator; they never escape
/// as request-level errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchFailure {
    #[error("upstream returned {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("upstream call exceeded {0}ms")]
    UpstreamTimeout(u64),

    #[error("all fallbacks exhausted: {0}")]
    AllFallbacksExhausted(String),
}

/// Which path produced the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    /// The classified specialist answered.
    Primary,
    /// The specialist failed; the generic model answered.
    Fallback,
    /// Both failed; the static apology was returned.
    Degraded,
}

/// The single value every tutor request resolves to.
///
/// Constructed once per request, never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutedResult {
    pub agent: AgentId,
    #[schema(value_type = Object)]
    pub response: serde_json::Value,
    /// Wall-clock time spent in dispatch (and fallback, when taken), in ms.
    pub response_time: u64,
    pub struggle_detection: StruggleSignal,
    pub source: ResponseSource,
    pub timestamp: DateTime<Utc>,
}

// ============= Code Execution Types =============

/// Inbound request body for `POST /api/execute`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Requested execution timeout in seconds.
    #[serde(default = "default_execution_timeout")]
    pub timeout: u64,
    /// Requested memory limit in MB.
    #[serde(default = "default_memory_limit")]
    pub memory_limit: u64,
}

fn default_execution_timeout() -> u64 {
    5
}

fn default_memory_limit() -> u64 {
    50
}

// ============= Error Types =============

/// Request-level errors that surface to the HTTP caller.
///
/// Upstream and fallback failures are not here: the coordinator recovers
/// those internally ([`DispatchFailure`]). These variants are the paths
/// that terminate a request directly.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Human-readable string included in 500 bodies so the presentation layer
/// always has something to display.
pub const INTERNAL_FALLBACK_RESPONSE: &str =
    "I hit an unexpected problem while routing your question. Please try again in a moment.";

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        match self {
            AppError::InvalidInput(msg) => {
                let body = serde_json::json!({ "error": msg });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            AppError::Configuration(msg)
            | AppError::Model(msg)
            | AppError::Upstream(msg)
            | AppError::Internal(msg) => {
                let body = serde_json::json!({
                    "error": "Internal server error",
                    "details": msg,
                    "fallbackResponse": INTERNAL_FALLBACK_RESPONSE,
                    "timestamp": Utc::now(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
